use doctree::tree::PathTreeBuilder;
use doctree::Record;
use proptest::prelude::*;
use std::collections::HashSet;

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

/// Paths whose final segment ends in `.md` and whose directories never do,
/// so no path can be a strict prefix of another.
fn leaf_path() -> impl Strategy<Value = String> {
    (prop::collection::vec(segment(), 0..4), segment())
        .prop_map(|(dirs, file)| {
            let mut parts = dirs;
            parts.push(format!("{file}.md"));
            parts.join("/")
        })
}

fn unique_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(leaf_path(), 0..40).prop_map(|paths| {
        let mut seen = HashSet::new();
        paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
    })
}

proptest! {
    #[test]
    fn leaves_biject_onto_records(paths in unique_paths()) {
        let records: Vec<Record<usize>> = paths
            .iter()
            .enumerate()
            .map(|(i, p)| Record::new(p.clone(), i as u64, i))
            .collect();
        let tree = PathTreeBuilder::new().build(records.clone()).unwrap();

        prop_assert_eq!(tree.leaf_count(), records.len());
        prop_assert!(tree.conflicts().is_empty());
        for record in &records {
            let leaf = tree.get(&record.path).unwrap();
            prop_assert!(leaf.is_leaf());
            prop_assert_eq!(leaf.record().unwrap(), record);
        }
    }

    #[test]
    fn depth_is_longest_segment_count(paths in unique_paths()) {
        let expected = paths.iter().map(|p| p.split('/').count()).max().unwrap_or(0);
        let tree = PathTreeBuilder::new()
            .build(paths.iter().map(|p| Record::bare(p.clone(), 0u64)))
            .unwrap();
        prop_assert_eq!(tree.max_depth(), expected);
    }

    #[test]
    fn full_paths_are_unique_and_cumulative(paths in unique_paths()) {
        let tree = PathTreeBuilder::new()
            .build(paths.iter().map(|p| Record::bare(p.clone(), 0u64)))
            .unwrap();
        let mut seen = HashSet::new();
        for node in tree.walk() {
            prop_assert!(seen.insert(node.full_path().to_string()));
            let expected = match node.parent() {
                Some(parent) => format!("{}/{}", parent.full_path(), node.name()),
                None => node.name().to_string(),
            };
            prop_assert_eq!(node.full_path(), expected.as_str());
        }
        prop_assert_eq!(seen.len(), tree.len());
    }

    #[test]
    fn siblings_keep_first_encounter_order(paths in unique_paths()) {
        let tree = PathTreeBuilder::new()
            .build(paths.iter().map(|p| Record::bare(p.clone(), 0u64)))
            .unwrap();
        let first_seen = |full_path: &str| {
            paths
                .iter()
                .position(|p| p == full_path || p.starts_with(&format!("{full_path}/")))
                .unwrap()
        };
        let roots: Vec<usize> = tree.roots().map(|n| first_seen(n.full_path())).collect();
        prop_assert!(roots.windows(2).all(|w| w[0] < w[1]));
        for node in tree.walk() {
            let order: Vec<usize> = node.children().map(|c| first_seen(c.full_path())).collect();
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
