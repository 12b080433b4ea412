use casestudies::architecture::Store;
use casestudies::demos::nested::{NestedAction, NestedReducer, NestedState, NodeArena, NodeId};

fn names(arena: &NodeArena, id: NodeId) -> Vec<String> {
    arena
        .children(id)
        .iter()
        .filter_map(|child| arena.get(*child))
        .map(|node| node.name.clone())
        .collect()
}

#[test]
fn mock_tree_has_expected_shape() {
    let state = NestedState::mock();
    let tree = &state.tree;

    assert_eq!(tree.node_count(), 6);
    assert_eq!(names(tree, tree.root()), vec!["Bar", "Baz", "Qux"]);
    let baz = tree.children(tree.root())[1];
    assert_eq!(names(tree, baz), vec!["Fizz", "Buzz"]);
    assert_eq!(tree.depth(tree.children(baz)[0]), Some(2));
}

#[test]
fn removing_a_node_removes_its_subtree() {
    let mut tree = NestedState::mock().tree;
    let baz = tree.children(tree.root())[1];

    assert_eq!(tree.remove(baz), 3);
    assert_eq!(tree.node_count(), 3);
    assert_eq!(names(&tree, tree.root()), vec!["Bar", "Qux"]);
    assert_eq!(tree.remove(baz), 0);
}

#[test]
fn store_edits_the_tree_at_any_depth() {
    let store = Store::new(NestedState::mock(), NestedReducer, ());
    let baz = store.state().tree.children(NodeId(0))[1];
    let fizz = store.state().tree.children(baz)[0];

    store.send(NestedAction::Append {
        parent: fizz,
        name: "Deep".to_string(),
    });
    store.send(NestedAction::Rename {
        id: baz,
        name: "Renamed".to_string(),
    });
    store.send(NestedAction::Append {
        parent: NodeId(999),
        name: "Orphan".to_string(),
    });

    let tree = store.state().tree;
    assert_eq!(tree.get(baz).map(|node| node.name.as_str()), Some("Renamed"));
    assert_eq!(names(&tree, fizz), vec!["Deep"]);
    assert_eq!(tree.depth(tree.children(fizz)[0]), Some(3));
    assert_eq!(tree.node_count(), 7);
}
