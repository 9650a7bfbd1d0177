//! Command-line interface.
//!
//! Flags are handled before any terminal setup:
//!
//! ```ignore
//! use tappable::cli::{parse_args, run_cli_command};
//!
//! let args = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&args.command) {
//!     return result;
//! }
//! // No CLI command, continue to the demo
//! ```

pub mod args;
pub mod lookup;
pub mod version;

pub use args::{parse_args, ArgsError, CliArgs, CliCommand, USAGE};
pub use lookup::{handle_lookup_command, lookup_word};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

/// Run a non-interactive command.
///
/// Returns `None` for [`CliCommand::Demo`], which the binary runs itself.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{USAGE}");
            Some(Ok(()))
        }
        CliCommand::Lookup { word } => Some(handle_lookup_command(word)),
        CliCommand::Demo { .. } => None,
    }
}
