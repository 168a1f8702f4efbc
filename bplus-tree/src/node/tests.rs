use crate::{error::IndexError, split::SplitKind};

use super::{Body, InsertResult, Node, NodeType, Slot};

fn fill_leaf(capacity: usize, keys: &[i32]) -> (Node<i32>, Vec<(SplitKind, i32)>) {
    let mut node = Node::new_leaf(capacity);
    let mut events = Vec::new();
    for &key in keys {
        let result = node.insert(key, &mut |kind, key: &i32| events.push((kind, *key)));
        assert!(matches!(result, InsertResult::Normal));
    }
    (node, events)
}

#[test]
fn leaf_insert_keeps_order() {
    let (node, events) = fill_leaf(5, &[3, 1, 2]);
    assert_eq!(node.node_type(), NodeType::Leaf);
    assert_eq!(node.keys(), &[1, 2, 3]);
    assert_eq!(node.slots(), &[Slot, Slot, Slot]);
    assert!(node.children().is_empty());
    assert!(events.is_empty());
}

#[test]
fn positions_around_duplicates() {
    let (node, _) = fill_leaf(6, &[5, 3, 1, 3]);
    assert_eq!(node.keys(), &[1, 3, 3, 5]);
    assert_eq!(node.leaf_position(&3), 1);
    assert_eq!(node.leaf_position(&4), 3);
    assert_eq!(node.leaf_position(&9), 4);
    assert_eq!(node.child_index(&3), 3);
    assert_eq!(node.child_index(&0), 0);
    assert_eq!(node.child_index(&5), 4);
}

#[test]
fn full_leaf_splits_in_half() {
    let (mut node, _) = fill_leaf(4, &[1, 2, 3]);
    let mut events = Vec::new();
    let result = node.insert(4, &mut |kind, key: &i32| events.push((kind, *key)));

    let (separator, sibling) = match result {
        InsertResult::Splitted(separator, sibling) => (separator, sibling),
        InsertResult::Normal => panic!("a full leaf must split"),
    };
    assert_eq!(separator, 3);
    assert_eq!(node.keys(), &[1, 2]);
    assert_eq!(node.slots().len(), 2);
    assert_eq!(sibling.keys(), &[3, 4]);
    assert_eq!(sibling.slots().len(), 2);
    assert!(sibling.is_leaf());
    assert_eq!(events, vec![(SplitKind::Leaf, 4)]);
}

#[test]
fn split_keeps_lower_half_below_upper_half() {
    let (mut node, _) = fill_leaf(8, &[9, 2, 7, 7, 4, 1, 7]);
    let (separator, sibling) = match node.insert(10, &mut |_, _: &i32| {}) {
        InsertResult::Splitted(separator, sibling) => (separator, sibling),
        InsertResult::Normal => panic!("a full leaf must split"),
    };
    assert_eq!(node.keys(), &[1, 2, 4, 7]);
    assert_eq!(sibling.keys(), &[7, 7, 9, 10]);
    let retained_max = node.keys().iter().max().copied().unwrap();
    let moved_min = sibling.keys().iter().min().copied().unwrap();
    assert!(retained_max <= moved_min);
    assert_eq!(separator, moved_min);
}

#[test]
fn interior_split_promotes_middle_key() {
    let leaves: Vec<Box<Node<i32>>> = (0..5)
        .map(|i| {
            let (leaf, _) = fill_leaf(4, &[i * 10, i * 10 + 1]);
            Box::new(leaf)
        })
        .collect();
    let mut node = Node {
        capacity: 4,
        keys: vec![10, 20, 30, 40],
        body: super::Body::Interior(leaves),
    };

    let (separator, sibling) = node.split();
    assert_eq!(separator, 30);
    assert_eq!(node.keys(), &[10, 20]);
    assert_eq!(node.children().len(), 3);
    assert_eq!(sibling.keys(), &[40]);
    assert_eq!(sibling.children().len(), 2);
    assert_eq!(sibling.node_type(), NodeType::Interior);
    assert_eq!(sibling.children()[0].keys(), &[30, 31]);
    assert!(sibling.slots().is_empty());
}

#[test]
fn search_descends_to_leaf() {
    let left = fill_leaf(4, &[1, 2]).0;
    let right = Box::new(fill_leaf(4, &[3, 4, 5]).0);
    let mut root = Node::new_root(4, 3, left, right);
    assert_eq!(root.height(), 2);
    assert!(root.search(&1));
    assert!(root.search(&3));
    assert!(root.search(&5));
    assert!(!root.search(&0));
    assert!(!root.search(&6));

    let result = root.insert(6, &mut |_, _: &i32| {});
    assert!(matches!(result, InsertResult::Normal));
    assert!(matches!(root.insert(7, &mut |_, _: &i32| {}), InsertResult::Normal));
    assert_eq!(root.keys(), &[3, 5]);
    assert!(root.search(&7));
}

#[test]
fn debug_output_names_node_kinds() {
    let left = fill_leaf(4, &[1, 2]).0;
    let right = Box::new(fill_leaf(4, &[3]).0);
    let root = Node::new_root(4, 3, left, right);
    let rendered = format!("{:?}", root);
    assert!(rendered.starts_with("InteriorNode"));
    assert!(rendered.contains("LeafNode { keys: [1, 2], slots_num: 2 }"));
}

#[test]
fn placeholder_holds_no_storage() {
    let node: Node<i32> = Node::placeholder(16);
    assert!(node.is_leaf());
    assert_eq!(node.capacity(), 16);
    assert_eq!(node.keys.capacity(), 0);
    assert!(node.slots().is_empty());
}

fn leaf(capacity: usize, keys: Vec<i32>) -> Box<Node<i32>> {
    let slots = vec![Slot; keys.len()];
    Box::new(Node {
        capacity,
        keys,
        body: Body::Leaf(slots),
    })
}

fn interior(capacity: usize, keys: Vec<i32>, children: Vec<Box<Node<i32>>>) -> Box<Node<i32>> {
    Box::new(Node {
        capacity,
        keys,
        body: Body::Interior(children),
    })
}

fn verify_root(node: &Node<i32>) -> Result<(), IndexError> {
    node.verify(0, None, None, &mut None)
}

#[test]
fn verify_accepts_well_formed_tree() {
    let root = interior(4, vec![5], vec![leaf(4, vec![1, 5]), leaf(4, vec![5, 7])]);
    assert_eq!(verify_root(&root), Ok(()));
    assert_eq!(verify_root(&leaf(4, vec![])), Ok(()));
}

#[test]
fn verify_reports_unsorted_keys() {
    let root = leaf(4, vec![3, 1]);
    assert_eq!(verify_root(&root), Err(IndexError::Unsorted { depth: 0 }));
}

#[test]
fn verify_reports_full_node() {
    let root = leaf(3, vec![1, 2, 3]);
    assert_eq!(
        verify_root(&root),
        Err(IndexError::NodeFull {
            depth: 0,
            keys: 3,
            capacity: 3
        })
    );
}

#[test]
fn verify_reports_child_count_mismatch() {
    let root = interior(4, vec![10], vec![leaf(4, vec![1])]);
    assert_eq!(
        verify_root(&root),
        Err(IndexError::ChildCountMismatch {
            depth: 0,
            keys: 1,
            children: 1
        })
    );
}

#[test]
fn verify_reports_slot_count_mismatch() {
    let root = Node {
        capacity: 4,
        keys: vec![1, 2],
        body: Body::Leaf(vec![Slot]),
    };
    assert_eq!(
        verify_root(&root),
        Err(IndexError::SlotCountMismatch {
            depth: 0,
            keys: 2,
            slots: 1
        })
    );
}

#[test]
fn verify_reports_empty_child() {
    let root = interior(4, vec![5], vec![leaf(4, vec![1]), leaf(4, vec![])]);
    assert_eq!(verify_root(&root), Err(IndexError::EmptyNode { depth: 1 }));
}

#[test]
fn verify_reports_key_outside_separators() {
    let root = interior(4, vec![5], vec![leaf(4, vec![1, 7]), leaf(4, vec![5])]);
    assert_eq!(
        verify_root(&root),
        Err(IndexError::SeparatorViolation { depth: 0, child: 0 })
    );

    let root = interior(4, vec![5], vec![leaf(4, vec![1]), leaf(4, vec![4, 6])]);
    assert_eq!(
        verify_root(&root),
        Err(IndexError::SeparatorViolation { depth: 0, child: 1 })
    );
}

#[test]
fn verify_reports_uneven_leaf_depth() {
    let right = interior(4, vec![8], vec![leaf(4, vec![5]), leaf(4, vec![8])]);
    let root = interior(4, vec![5], vec![leaf(4, vec![1]), right]);
    assert_eq!(
        verify_root(&root),
        Err(IndexError::UnevenLeafDepth {
            expected: 1,
            found: 2
        })
    );
}
