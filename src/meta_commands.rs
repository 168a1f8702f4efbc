use std::fmt::Write;

use bplus_tree::BPlusTree;

use crate::statements::Key;

pub enum MetaCommandError {
    UnrecognizedCommand,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommandResult {
    Exit,
    Output(String),
}

/// Handles the dot-prefixed commands of the prompt.
pub fn handle_meta_command(
    input: &str,
    tree: &BPlusTree<Key>,
) -> Result<MetaCommandResult, MetaCommandError> {
    match input {
        ".exit" => Ok(MetaCommandResult::Exit),
        ".tree" => Ok(MetaCommandResult::Output(render_levels(tree))),
        ".stats" => {
            let stats = tree.split_stats();
            Ok(MetaCommandResult::Output(format!(
                "capacity: {}\nkeys: {}\nheight: {}\nleaf splits: {}\nnon-leaf splits: {}",
                tree.capacity(),
                tree.len(),
                tree.height(),
                stats.leaf,
                stats.non_leaf
            )))
        }
        ".check" => Ok(MetaCommandResult::Output(match tree.verify() {
            Ok(()) => String::from("Tree is consistent."),
            Err(err) => format!("Tree is corrupted: {}", err),
        })),
        _ => Err(MetaCommandError::UnrecognizedCommand),
    }
}

/// One line per level, each node printed as its key list.
pub fn render_levels(tree: &BPlusTree<Key>) -> String {
    let mut out = String::new();
    for (depth, level) in tree.levels().iter().enumerate() {
        if depth > 0 {
            out.push('\n');
        }
        let _ = write!(out, "level {}:", depth);
        for node in level {
            let _ = write!(out, " {:?}", node.keys());
        }
    }
    out
}
