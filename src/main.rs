use std::{io, process::ExitCode};

use dockie::{repl::REPL, statements::Key, IndexConfig};
use log::{error, info};

fn main() -> ExitCode {
    env_logger::init();

    let config = match IndexConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let mut tree = match config.open_index_with_hook(|kind, key: &Key| {
        info!("{} split while inserting {}", kind, key);
    }) {
        Ok(tree) => tree,
        Err(err) => {
            error!("Cannot create index: {}", err);
            return ExitCode::FAILURE;
        }
    };
    println!("---- Index ready, node capacity {} ----", config.capacity);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(err) = REPL::new(stdin.lock()).run(&mut tree, &mut stdout) {
        error!("I/O error: {}", err);
        return ExitCode::FAILURE;
    }
    println!("---- Index closed ----");
    ExitCode::SUCCESS
}
