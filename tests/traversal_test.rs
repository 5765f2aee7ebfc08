//! Tests for descendant tree construction and cycle safety

use kintree::domain::{DomainError, FamilyTree, PersonDraft, PersonId, TreeNode};

fn add(tree: &mut FamilyTree, name: &str) -> PersonId {
    tree.create_person(PersonDraft {
        name: name.to_string(),
        ..Default::default()
    })
    .expect("create person")
    .id
}

fn find_node<'a, 'b>(nodes: &'b [TreeNode<'a>], id: PersonId) -> Option<&'b TreeNode<'a>> {
    for node in nodes {
        if node.person.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

#[test]
fn given_empty_tree_when_building_then_forest_is_empty() {
    let tree = FamilyTree::new();
    assert!(tree.build_tree(None).unwrap().is_empty());
}

#[test]
fn given_family_when_building_then_parentless_people_are_roots() {
    let mut tree = FamilyTree::new();
    let john = add(&mut tree, "John");
    let mary = add(&mut tree, "Mary");
    let mike = add(&mut tree, "Mike");

    tree.link_parent_child(john, mike).unwrap();
    tree.link_parent_child(mary, mike).unwrap();

    let forest = tree.build_tree(None).unwrap();
    let root_ids: Vec<PersonId> = forest.iter().map(|n| n.person.id).collect();

    assert_eq!(root_ids, vec![john, mary]);
}

#[test]
fn given_root_id_when_building_then_forest_contains_only_that_subtree() {
    let mut tree = FamilyTree::new();
    let john = add(&mut tree, "John");
    let mary = add(&mut tree, "Mary");
    let mike = add(&mut tree, "Mike");

    tree.link_parent_child(john, mike).unwrap();
    tree.link_parent_child(mary, mike).unwrap();

    let forest = tree.build_tree(Some(john)).unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].person.id, john);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].person.id, mike);
}

#[test]
fn given_missing_root_id_when_building_then_not_found() {
    let mut tree = FamilyTree::new();
    add(&mut tree, "John");

    assert!(matches!(
        tree.build_tree(Some(42)),
        Err(DomainError::PersonNotFound { .. })
    ));
}

#[test]
fn given_spouses_when_building_then_spouses_attach_to_the_node() {
    let mut tree = FamilyTree::new();
    let john = add(&mut tree, "John");
    let mary = add(&mut tree, "Mary");
    let mike = add(&mut tree, "Mike");

    tree.link_spouse(john, mary).unwrap();
    tree.link_parent_child(john, mike).unwrap();

    let forest = tree.build_tree(Some(john)).unwrap();
    let spouse_ids: Vec<PersonId> = forest[0].spouses.iter().map(|p| p.id).collect();

    assert_eq!(spouse_ids, vec![mary]);
}

#[test]
fn given_cyclic_edges_when_building_then_second_visit_is_truncated() {
    let mut tree = FamilyTree::new();
    let a = add(&mut tree, "A");
    let b = add(&mut tree, "B");

    tree.link_parent_child(a, b).unwrap();
    tree.link_parent_child(b, a).unwrap();

    let forest = tree.build_tree(Some(a)).unwrap();

    let root = &forest[0];
    assert_eq!(root.person.id, a);
    assert!(!root.truncated);

    let child = &root.children[0];
    assert_eq!(child.person.id, b);
    assert!(!child.truncated);

    // cycle closes back on A: leaf node, nothing expanded
    let repeat = &child.children[0];
    assert_eq!(repeat.person.id, a);
    assert!(repeat.truncated);
    assert!(repeat.children.is_empty());
    assert!(repeat.spouses.is_empty());
}

#[test]
fn given_all_people_have_parents_when_building_then_falls_back_to_first_in_storage_order() {
    let mut tree = FamilyTree::new();
    let a = add(&mut tree, "A");
    let b = add(&mut tree, "B");

    tree.link_parent_child(a, b).unwrap();
    tree.link_parent_child(b, a).unwrap();

    let forest = tree.build_tree(None).unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].person.id, a);
}

#[test]
fn given_child_shared_by_two_roots_when_building_then_child_expands_once() {
    let mut tree = FamilyTree::new();
    let john = add(&mut tree, "John");
    let mary = add(&mut tree, "Mary");
    let mike = add(&mut tree, "Mike");
    let grandchild = add(&mut tree, "Zoe");

    tree.link_parent_child(john, mike).unwrap();
    tree.link_parent_child(mary, mike).unwrap();
    tree.link_parent_child(mike, grandchild).unwrap();

    let forest = tree.build_tree(None).unwrap();
    assert_eq!(forest.len(), 2);

    // first root expands Mike fully, second root sees him truncated
    let under_john = find_node(&forest[0..1], mike).unwrap();
    assert!(!under_john.truncated);
    assert_eq!(under_john.children[0].person.id, grandchild);

    let under_mary = find_node(&forest[1..2], mike).unwrap();
    assert!(under_mary.truncated);
    assert!(under_mary.children.is_empty());
}
