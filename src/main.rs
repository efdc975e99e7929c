// src/main.rs

pub mod commands;
pub mod loader;
pub mod merge;
pub mod query;
pub mod report;
pub mod resolve;
pub mod resolver;
pub mod summary;
pub mod util;

use anyhow::Result;

fn main() -> Result<()> {
    commands::run_cli()
}
