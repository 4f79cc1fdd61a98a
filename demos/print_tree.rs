use avltree::{AvlTree, AvlTreeError};

fn main() -> Result<(), AvlTreeError> {
    let mut tree = AvlTree::new();
    for (key, name) in [(1, "one"), (2, "two"), (3, "three"), (4, "four"), (5, "five"), (6, "six")] {
        tree.insert(key, name)?;
    }

    println!("Keys:");
    tree.print(false)?;

    println!();
    println!("Nodes:");
    tree.print(true)?;
    Ok(())
}
