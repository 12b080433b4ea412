//! "Recursive state and actions": a tree of rows, each able to hold more rows.

mod arena;

pub use arena::{Node, NodeArena, NodeId, Outline};

use crate::architecture::{Action, Effect, FeatureState, Reducer};

#[derive(Debug, Clone, PartialEq)]
pub struct NestedState {
    pub tree: NodeArena,
}

impl FeatureState for NestedState {}

impl NestedState {
    /// Sample tree the screen opens with.
    pub fn mock() -> Self {
        let outline = Outline::node(
            "Foo",
            vec![
                Outline::leaf("Bar"),
                Outline::node("Baz", vec![Outline::leaf("Fizz"), Outline::leaf("Buzz")]),
                Outline::leaf("Qux"),
            ],
        );
        Self {
            tree: NodeArena::from_outline(outline),
        }
    }
}

impl Default for NestedState {
    fn default() -> Self {
        Self::mock()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NestedAction {
    Append { parent: NodeId, name: String },
    Remove(NodeId),
    Rename { id: NodeId, name: String },
}

impl Action for NestedAction {}

pub struct NestedReducer;

impl Reducer for NestedReducer {
    type State = NestedState;
    type Action = NestedAction;
    type Environment = ();

    fn reduce(&self, state: &mut NestedState, action: NestedAction, _: &()) -> Effect<NestedAction> {
        match action {
            NestedAction::Append { parent, name } => {
                if state.tree.add_child(parent, name).is_none() {
                    tracing::debug!(%parent, "append to unknown node ignored");
                }
            }
            NestedAction::Remove(id) => {
                let removed = state.tree.remove(id);
                tracing::debug!(%id, removed, "removed subtree");
            }
            NestedAction::Rename { id, name } => {
                if !state.tree.rename(id, name) {
                    tracing::debug!(%id, "rename of unknown node ignored");
                }
            }
        }
        Effect::none()
    }
}

pub const COMMANDS: &[&str] = &["append <id> <name>", "remove <id>", "rename <id> <name>"];

pub fn parse_command(command: &str) -> Option<NestedAction> {
    let mut words = command.split_whitespace();
    let verb = words.next()?;
    let id = NodeId(words.next()?.trim_start_matches('#').parse().ok()?);
    let rest = words.collect::<Vec<_>>().join(" ");
    match (verb, rest.is_empty()) {
        ("append", false) => Some(NestedAction::Append {
            parent: id,
            name: rest,
        }),
        ("remove", true) => Some(NestedAction::Remove(id)),
        ("rename", false) => Some(NestedAction::Rename { id, name: rest }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_multi_word_names() {
        assert_eq!(
            parse_command("append #2 New row"),
            Some(NestedAction::Append {
                parent: NodeId(2),
                name: "New row".to_string(),
            })
        );
        assert_eq!(parse_command("remove 3"), Some(NestedAction::Remove(NodeId(3))));
        assert_eq!(parse_command("remove 3 extra"), None);
        assert_eq!(parse_command("rename 1"), None);
    }

    #[test]
    fn removing_the_root_is_ignored() {
        let mut state = NestedState::mock();
        let root = state.tree.root();
        let before = state.clone();

        NestedReducer.reduce(&mut state, NestedAction::Remove(root), &());

        assert_eq!(state, before);
    }
}
