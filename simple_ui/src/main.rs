use std::{cmp::Ordering, process};

use bplus_tree::{BPlusTree, NodeType};
use cursive::{
    view::{Nameable, Resizable},
    views::{Button, Dialog, DummyView, EditView, LinearLayout, TextView},
    Cursive,
};
use cursive_table_view::{TableView, TableViewItem};
use dockie::{statements::Key, ConfigError, IndexConfig};
use log::warn;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
enum NodeColumn {
    Depth,
    Kind,
    Keys,
}

/// One node of the tree as shown in the table.
#[derive(Debug, Clone, PartialEq)]
struct NodeRow {
    /// Breadth-first position, keeps left-to-right order within a level
    position: usize,
    depth: usize,
    kind: NodeType,
    keys: Vec<Key>,
}

impl TableViewItem<NodeColumn> for NodeRow {
    fn to_column(&self, column: NodeColumn) -> String {
        match column {
            NodeColumn::Depth => self.depth.to_string(),
            NodeColumn::Kind => match self.kind {
                NodeType::Leaf => String::from("leaf"),
                NodeType::Interior => String::from("interior"),
            },
            NodeColumn::Keys => format!("{:?}", self.keys),
        }
    }

    fn cmp(&self, other: &Self, column: NodeColumn) -> Ordering
    where
        Self: Sized,
    {
        match column {
            NodeColumn::Keys => self.keys.cmp(&other.keys),
            NodeColumn::Depth | NodeColumn::Kind => self.position.cmp(&other.position),
        }
    }
}

struct App {
    tree: BPlusTree<Key>,
}

fn node_rows(tree: &BPlusTree<Key>) -> Vec<NodeRow> {
    let mut rows = Vec::new();
    for (depth, level) in tree.levels().into_iter().enumerate() {
        for node in level {
            rows.push(NodeRow {
                position: rows.len(),
                depth,
                kind: node.node_type(),
                keys: node.keys().to_vec(),
            });
        }
    }
    rows
}

fn make_table() -> TableView<NodeRow, NodeColumn> {
    TableView::<NodeRow, NodeColumn>::new()
        .column(NodeColumn::Depth, "Depth", |c| c.width(8))
        .column(NodeColumn::Kind, "Kind", |c| c.width(10))
        .column(NodeColumn::Keys, "Keys", |c| c)
}

fn read_key(s: &mut Cursive) -> Option<Key> {
    let content = s.call_on_name("key", |view: &mut EditView| view.get_content())?;
    match content.trim().parse::<Key>() {
        Ok(key) => Some(key),
        Err(_) => {
            warn!("Ignoring non-integer key {:?}", content);
            set_status(s, format!("'{}' is not an integer", content.trim()));
            None
        }
    }
}

fn set_status(s: &mut Cursive, message: String) {
    s.call_on_name("status", |view: &mut TextView| view.set_content(message));
}

fn refresh(s: &mut Cursive) {
    let rows = s.with_user_data(|app: &mut App| node_rows(&app.tree));
    if let Some(rows) = rows {
        s.call_on_name("nodes", |table: &mut TableView<NodeRow, NodeColumn>| {
            table.set_items(rows)
        });
    }
}

fn on_insert(s: &mut Cursive) {
    let key = match read_key(s) {
        Some(key) => key,
        None => return,
    };
    let summary = s.with_user_data(|app: &mut App| {
        app.tree.insert(key);
        let stats = app.tree.split_stats();
        format!(
            "Inserted {}: height {}, {} leaf / {} non-leaf splits",
            key,
            app.tree.height(),
            stats.leaf,
            stats.non_leaf
        )
    });
    if let Some(summary) = summary {
        set_status(s, summary);
    }
    s.call_on_name("key", |view: &mut EditView| view.set_content(""));
    refresh(s);
}

fn on_search(s: &mut Cursive) {
    let key = match read_key(s) {
        Some(key) => key,
        None => return,
    };
    let found = s.with_user_data(|app: &mut App| app.tree.search(&key));
    let message = match found {
        Some(true) => format!("Found {}", key),
        _ => format!("{} not found", key),
    };
    set_status(s, message);
}

/// Builds the index from the loaded configuration; a bad configuration is
/// reported rather than replaced by the default.
fn open_tree(
    config: Result<IndexConfig, ConfigError>,
) -> Result<(IndexConfig, BPlusTree<Key>), String> {
    let config = config.map_err(|err| format!("Invalid configuration: {}", err))?;
    let tree = config
        .open_index()
        .map_err(|err| format!("Cannot create index: {}", err))?;
    Ok((config, tree))
}

fn main() {
    let (config, tree) = match open_tree(IndexConfig::from_env()) {
        Ok(opened) => opened,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };

    let mut siv = cursive::default();
    siv.add_global_callback('q', |s| s.quit());
    siv.set_user_data(App { tree });

    let input = LinearLayout::horizontal()
        .child(TextView::new("Key: "))
        .child(
            EditView::new()
                .on_submit(|s, _| on_insert(s))
                .with_name("key")
                .fixed_width(16),
        )
        .child(DummyView)
        .child(Button::new("Insert", on_insert))
        .child(Button::new("Search", on_search));
    let layout = LinearLayout::vertical()
        .child(input)
        .child(TextView::new(format!("Node capacity {}", config.capacity)).with_name("status"))
        .child(DummyView)
        .child(make_table().with_name("nodes").min_size((50, 20)));

    siv.add_layer(Dialog::around(layout).title("dockie index"));
    refresh(&mut siv);
    siv.run();
}
