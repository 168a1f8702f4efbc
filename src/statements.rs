use std::fmt;

use bplus_tree::BPlusTree;

pub type Key = i64;

#[derive(Debug, PartialEq, Eq)]
pub enum Statement {
    Insert(Key),
    Search(Key),
}

#[derive(Debug, PartialEq, Eq)]
pub enum PrepareError {
    UnrecognizedStatement(String),
    MissingKey,
    InvalidKey(String),
    TrailingInput(String),
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::UnrecognizedStatement(word) => {
                write!(f, "Unrecognized keyword at start of '{}'", word)
            }
            PrepareError::MissingKey => write!(f, "Syntax error: a key is required"),
            PrepareError::InvalidKey(key) => write!(f, "Syntax error: '{}' is not an integer", key),
            PrepareError::TrailingInput(rest) => {
                write!(f, "Syntax error: unexpected '{}' after the key", rest)
            }
        }
    }
}

/// Parses one line of input, `insert <key>` or `search <key>`.
pub fn prepare_statement(input: &str) -> Result<Statement, PrepareError> {
    let mut words = input.split_whitespace();
    let keyword = words.next().unwrap_or_default();
    let build: fn(Key) -> Statement = match keyword {
        "insert" => Statement::Insert,
        "search" => Statement::Search,
        _ => return Err(PrepareError::UnrecognizedStatement(input.to_string())),
    };
    let key = words.next().ok_or(PrepareError::MissingKey)?;
    let key = key
        .parse::<Key>()
        .map_err(|_| PrepareError::InvalidKey(key.to_string()))?;
    if let Some(rest) = words.next() {
        return Err(PrepareError::TrailingInput(rest.to_string()));
    }
    Ok(build(key))
}

/// Runs a prepared statement and returns the line to show the user.
pub fn execute_statement(statement: Statement, tree: &mut BPlusTree<Key>) -> String {
    match statement {
        Statement::Insert(key) => {
            tree.insert(key);
            String::from("Executed.")
        }
        Statement::Search(key) => {
            if tree.search(&key) {
                format!("Found {}.", key)
            } else {
                format!("{} not found.", key)
            }
        }
    }
}
