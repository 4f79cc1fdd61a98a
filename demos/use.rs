use avltree::{AvlTree, AvlTreeError};

fn main() -> Result<(), AvlTreeError> {
    let mut tree = AvlTree::new();
    tree.insert(0, "zero")?;
    tree.insert(1, "one")?;
    tree.insert(2, "two")?;
    if let Err(err) = tree.insert(2, "two") {
        println!("insert 2 again: {err}");
    }
    tree.upsert(2, "TWO");
    tree.insert(3, "three")?;
    tree.insert(4, "four")?;
    tree.insert(5, "five")?;
    assert_eq!(tree.get(&1), Some(&"one"));
    tree.delete(&1);
    assert!(tree.find(&1).is_none());
    tree.delete(&1);

    println!("{:?}", tree);
    println!("balanced: {}, height: {}", tree.is_balanced(), tree.height());
    Ok(())
}
