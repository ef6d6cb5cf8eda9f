//! Command-line argument definitions

use crate::{
    cli::parser::{split_argument, ScriptArgumentParser},
    error,
};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// ConfigMe - create, validate and remove configuration assets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "configme")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Ignore folder creation failures instead of reporting them
    #[arg(long = "lenient-create", global = true)]
    pub lenient_create: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a configuration asset into an output folder
    Generate {
        /// Folder the asset is written into, created when missing
        #[arg(short = 'o', long = "output-folder")]
        output_folder: PathBuf,

        /// File name of the asset
        #[arg(short = 'a', long)]
        asset: String,

        /// Variable written into the asset, repeatable
        #[arg(long = "var", value_name = "KEY:VALUE", value_parser = split_argument)]
        vars: Vec<(String, String)>,

        /// Remove the output folder before generating
        #[arg(long)]
        clean: bool,

        /// Folder that must exist before anything is generated
        #[arg(short = 't', long = "template-folder")]
        template_folder: Option<PathBuf>,
    },

    /// Check that a location exists and is a folder
    Check {
        /// Folder to check
        #[arg(short = 'l', long)]
        location: PathBuf,

        /// What kind of location this is, used in error messages
        #[arg(short = 's', long, default_value = "location")]
        subject: String,
    },

    /// Remove a location and everything in it
    Remove {
        /// Folder to remove
        #[arg(short = 'l', long)]
        location: PathBuf,
    },
}

/// Parse the argument list (without the program name)
pub fn parse_args<I, T>(args: I) -> error::Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    ScriptArgumentParser::for_args::<Args>().parse_into(args)
}
