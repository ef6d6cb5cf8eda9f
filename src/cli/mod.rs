//! Command-line interface module
//!
//! Provides argument parsing and command execution.

pub mod args;
pub mod commands;
pub mod parser;

pub use args::{parse_args, Args, Command};
pub use commands::execute_command;
pub use parser::{
    fold_pairs_into_mapping, mapping_arg, mapping_from_matches, split_argument, ArgumentMapping,
    ScriptArgumentParser,
};
