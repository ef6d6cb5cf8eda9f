//! Script argument parser
//!
//! Wraps a [`clap::Command`] so that malformed input, an empty argument list
//! and help requests come back as [`ConfigmeError`] values instead of
//! terminating the process. Also provides the `KEY:VALUE` / `KEY=VALUE`
//! splitter and the fold of repeated pairs into an ordered mapping.

use crate::error::{ConfigmeError, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, error::ErrorKind};
use indexmap::IndexMap;
use std::ffi::OsString;

/// Flags that always count as a help request
const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// Ordered mapping built from repeated `KEY:VALUE` arguments
pub type ArgumentMapping = IndexMap<String, String>;

/// Argument parser that reports every outcome through [`ConfigmeError`]
#[derive(Debug, Clone)]
pub struct ScriptArgumentParser {
    command: Command,
}

impl ScriptArgumentParser {
    /// Wrap an already configured clap command
    pub fn new(command: Command) -> Self {
        Self { command }
    }

    /// Build the parser from a clap derive definition
    pub fn for_args<P: CommandFactory>() -> Self {
        Self::new(P::command())
    }

    /// Always fails with a [`ConfigmeError::ScriptArgument`] carrying `message`
    pub fn error<T>(&self, message: impl Into<String>) -> Result<T> {
        Err(ConfigmeError::script_argument(message))
    }

    /// Help text of the wrapped command, without styling
    pub fn format_help(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    /// Parse the argument list (without the program name).
    ///
    /// An empty list and any `-h`/`--help` flag are reported before clap ever
    /// sees the arguments.
    pub fn parse<I, T>(&self, args: I) -> Result<ArgMatches>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        if args.is_empty() {
            return self.error(format!(
                "No script arguments specified\n\n{}",
                self.format_help()
            ));
        }

        if args
            .iter()
            .any(|arg| HELP_FLAGS.iter().any(|flag| arg.as_os_str() == *flag))
        {
            return Err(ConfigmeError::script_help_argument(self.format_help()));
        }

        let argv = std::iter::once(OsString::from(self.command.get_name())).chain(args);

        self.command
            .clone()
            .try_get_matches_from(argv)
            .or_else(|err| self.translate_clap_error(err))
    }

    /// Parse the argument list straight into a derive definition
    pub fn parse_into<P, I, T>(&self, args: I) -> Result<P>
    where
        P: FromArgMatches,
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let matches = self.parse(args)?;
        P::from_arg_matches(&matches).or_else(|err| self.translate_clap_error(err))
    }

    fn translate_clap_error<T>(&self, err: clap::Error) -> Result<T> {
        match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Err(ConfigmeError::script_help_argument(err.to_string()))
            }
            _ => self.error(err.to_string()),
        }
    }
}

/// Split `token` on the leftmost `:` or `=` into a key and the remainder.
///
/// Usable directly as a clap value parser.
pub fn split_argument(token: &str) -> Result<(String, String)> {
    match token.find([':', '=']) {
        Some(index) => Ok((token[..index].to_string(), token[index + 1..].to_string())),
        None => Err(ConfigmeError::script_argument(format!(
            "Argument '{token}' must be of the form KEY:VALUE or KEY=VALUE"
        ))),
    }
}

/// Fold key/value pairs into one mapping; a repeated key keeps its first
/// position and takes the last value.
pub fn fold_pairs_into_mapping<I, K, V>(pairs: I) -> ArgumentMapping
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .fold(ArgumentMapping::new(), |mut mapping, (key, value)| {
            mapping.insert(key.into(), value.into());
            mapping
        })
}

/// Repeatable `--<id> KEY:VALUE` argument whose values are split pairs.
///
/// Builder-API counterpart of a derive field declared as
/// `Vec<(String, String)>` with `value_parser = split_argument`; use it with
/// commands assembled through [`Command`] directly.
pub fn mapping_arg(id: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("KEY:VALUE")
        .value_parser(split_argument)
        .action(ArgAction::Append)
}

/// Mapping collected by an argument built with [`mapping_arg`].
///
/// Derive-based definitions fold their pair list with
/// [`fold_pairs_into_mapping`] instead.
pub fn mapping_from_matches(matches: &ArgMatches, id: &str) -> ArgumentMapping {
    matches
        .get_many::<(String, String)>(id)
        .map(|pairs| fold_pairs_into_mapping(pairs.cloned()))
        .unwrap_or_default()
}
