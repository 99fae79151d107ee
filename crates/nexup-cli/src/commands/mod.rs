//! Command dispatch and handler modules.

mod upload;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Upload(args) => upload::exec(args),
    }
}
