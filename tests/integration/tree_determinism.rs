use doctree::tree::{PathTree, PathTreeBuilder};
use doctree::Record;

fn fixture() -> Vec<Record<u32>> {
    vec![
        Record::new("10NetZero/sites/alpha/report.md", "r1", 1),
        Record::new("10NetZero/readme.md", "r2", 2),
        Record::new("10NetZero/sites/beta/report.md", "r3", 3),
        Record::new("archive/2024/notes.md", "r4", 4),
        Record::new("10NetZero/sites/alpha/photos.md", "r5", 5),
    ]
}

fn shape(tree: &PathTree<u32>) -> Vec<(String, bool, usize, Option<u32>)> {
    tree.walk()
        .map(|n| {
            (
                n.full_path().to_string(),
                n.is_leaf(),
                n.depth(),
                n.record().map(|r| r.payload),
            )
        })
        .collect()
}

#[test]
fn repeated_builds_are_identical() {
    let records = fixture();
    let builder = PathTreeBuilder::new();
    let first = builder.build(records.clone()).unwrap();
    let second = builder.build(records.clone()).unwrap();
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(first.to_nested(), second.to_nested());
}

#[test]
fn rebuild_after_change_keeps_unchanged_paths() {
    let mut records = fixture();
    let before = PathTreeBuilder::new().build(records.clone()).unwrap();
    records.push(Record::new("10NetZero/sites/gamma/report.md", "r6", 6));
    let after = PathTreeBuilder::new().build(records).unwrap();

    for node in before.walk() {
        let same = after.get(node.full_path()).unwrap();
        assert_eq!(same.is_leaf(), node.is_leaf());
    }
    assert_eq!(after.len(), before.len() + 2);
}

#[test]
fn nested_json_is_stable() {
    let tree = PathTreeBuilder::new().build(fixture()).unwrap();
    let json = serde_json::to_value(tree.to_nested()).unwrap();
    assert_eq!(json[0]["full_path"], "10NetZero");
    assert_eq!(json[0]["children"][0]["name"], "sites");
    assert_eq!(
        json[0]["children"][0]["children"][0]["children"][1]["record"]["payload"],
        5
    );
    assert_eq!(json[1]["children"][0]["children"][0]["is_leaf"], true);
}
