//! Interaction command resolution.
//!
//! The option tree of an interaction says which node to run:
//!
//! - a `SubCommandGroup` option names a group, and its only child names the
//!   subcommand; the subcommand's options are the arguments
//! - a `SubCommand` option names a subcommand directly
//! - anything else means the root itself is the leaf
//!
//! The gate runs for the root and again for every node entered below it;
//! passing a group grants nothing to its subcommands.

use super::node::CommandNode;
use crate::caps::{Clearance, PermissionGate};
use crate::error::{DispatchError, PermissionDenied};
use crate::handlers::core::context::InvocationContext;
use parley_proto::{InteractionOption, OptionType};
use std::sync::Arc;

/// Nodes below the root an option tree leads to, and the leaf's options.
#[derive(Debug, Clone)]
pub struct Route {
    /// Entered nodes in order (group, then subcommand). Empty when the root
    /// is the leaf.
    pub nodes: Vec<Arc<CommandNode>>,
    pub options: Vec<InteractionOption>,
}

/// Where an interaction walk stopped.
#[derive(Debug)]
pub enum InteractionOutcome {
    Leaf {
        node: Arc<CommandNode>,
        clearance: Clearance,
        options: Vec<InteractionOption>,
    },
    Denied {
        node: Arc<CommandNode>,
        denied: PermissionDenied,
    },
}

/// Follow `options` below `root` without checking permissions.
pub fn route(root: &Arc<CommandNode>, options: &[InteractionOption]) -> Result<Route, DispatchError> {
    let Some(first) = options.first() else {
        return Ok(leaf_route(options));
    };

    match first.kind {
        OptionType::SubCommandGroup => {
            let group = root
                .child(&first.name)
                .filter(|node| node.is_group())
                .ok_or_else(|| unresolved(&[root.name(), &first.name]))?;

            let sub_option = first
                .options
                .first()
                .filter(|o| o.kind == OptionType::SubCommand)
                .ok_or_else(|| unresolved(&[root.name(), &first.name, "?"]))?;

            let sub = group
                .child(&sub_option.name)
                .filter(|node| !node.is_group())
                .ok_or_else(|| unresolved(&[root.name(), &first.name, &sub_option.name]))?;

            Ok(Route {
                nodes: vec![Arc::clone(group), Arc::clone(sub)],
                options: sub_option.options.clone(),
            })
        }
        OptionType::SubCommand => {
            let sub = root
                .child(&first.name)
                .filter(|node| !node.is_group())
                .ok_or_else(|| unresolved(&[root.name(), &first.name]))?;

            Ok(Route {
                nodes: vec![Arc::clone(sub)],
                options: first.options.clone(),
            })
        }
        _ => Ok(leaf_route(options)),
    }
}

/// Gate the root, follow the option tree, then gate every entered node.
pub async fn resolve(
    root: &Arc<CommandNode>,
    options: &[InteractionOption],
    ctx: &InvocationContext,
    gate: &PermissionGate,
) -> Result<InteractionOutcome, DispatchError> {
    let mut clearance = match gate.check(root, ctx).await {
        Ok(clearance) => clearance,
        Err(denied) => {
            return Ok(InteractionOutcome::Denied {
                node: Arc::clone(root),
                denied,
            });
        }
    };

    let Route { nodes, options } = route(root, options)?;

    let mut leaf = Arc::clone(root);
    for node in nodes {
        clearance = match gate.check(&node, ctx).await {
            Ok(clearance) => clearance,
            Err(denied) => return Ok(InteractionOutcome::Denied { node, denied }),
        };
        leaf = node;
    }

    Ok(InteractionOutcome::Leaf {
        node: leaf,
        clearance,
        options,
    })
}

fn leaf_route(options: &[InteractionOption]) -> Route {
    Route {
        nodes: Vec::new(),
        options: options.to_vec(),
    }
}

fn unresolved(path: &[&str]) -> DispatchError {
    DispatchError::UnresolvedCommand(path.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::InteractionCommand;
    use parley_proto::OptionValue;

    fn root() -> Arc<CommandNode> {
        InteractionCommand::new("test")
            .subcommand(InteractionCommand::group("g").subcommand(InteractionCommand::new("s")))
            .subcommand(InteractionCommand::new("sub"))
            .build()
            .unwrap()
    }

    fn text(name: &str, value: &str) -> InteractionOption {
        InteractionOption::value(OptionType::String, name, OptionValue::String(value.into()))
    }

    #[test]
    fn test_group_route() {
        let options = vec![InteractionOption::routing(
            OptionType::SubCommandGroup,
            "g",
            vec![InteractionOption::routing(
                OptionType::SubCommand,
                "s",
                vec![text("x", "1")],
            )],
        )];
        let root = root();
        let route = route(&root, &options).unwrap();
        let names: Vec<_> = route.nodes.iter().map(|n| n.path()).collect();
        assert_eq!(names, vec!["test g", "test g s"]);
        assert_eq!(route.options, vec![text("x", "1")]);
    }

    #[test]
    fn test_subcommand_route() {
        let options = vec![InteractionOption::routing(OptionType::SubCommand, "sub", vec![])];
        let route = route(&root(), &options).unwrap();
        assert_eq!(route.nodes.len(), 1);
        assert_eq!(route.nodes[0].name(), "sub");
        assert!(route.options.is_empty());
    }

    #[test]
    fn test_root_is_leaf() {
        let options = vec![text("a", "b")];
        let route = route(&root(), &options).unwrap();
        assert!(route.nodes.is_empty());
        assert_eq!(route.options, options);
    }

    #[test]
    fn test_malformed_payloads() {
        let root = root();

        let group_without_sub = vec![InteractionOption::routing(OptionType::SubCommandGroup, "g", vec![])];
        assert!(matches!(
            route(&root, &group_without_sub),
            Err(DispatchError::UnresolvedCommand(_))
        ));

        let unknown = vec![InteractionOption::routing(OptionType::SubCommand, "nope", vec![])];
        assert!(matches!(
            route(&root, &unknown),
            Err(DispatchError::UnresolvedCommand(path)) if path == "test nope"
        ));

        let group_as_sub = vec![InteractionOption::routing(OptionType::SubCommand, "g", vec![])];
        assert!(route(&root, &group_as_sub).is_err());
    }
}
