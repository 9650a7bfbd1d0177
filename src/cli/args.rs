//! Command-line argument parsing.

use std::path::PathBuf;
use thiserror::Error;

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Look a word up once and print the results
    Lookup { word: String },
    /// Run the terminal demo (default), optionally on a text file
    Demo { file: Option<PathBuf> },
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// Number of `-v` flags
    pub verbosity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("unknown argument: {0}")]
    Unknown(String),
}

pub const USAGE: &str = "\
Usage: tappable [OPTIONS]

Options:
  --file PATH      Show the text in PATH instead of the built-in sample
  --lookup WORD    Print the meanings and images for WORD and exit
  -v, -vv          Increase log verbosity
  -V, --version    Print version
  -h, --help       Print this help";

/// Parse command-line arguments (the first item is the program name).
///
/// # Examples
///
/// ```
/// use tappable::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["tappable".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut verbosity = 0u8;
    let mut file = None;
    let mut lookup = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                return Ok(CliArgs {
                    command: CliCommand::Version,
                    verbosity,
                })
            }
            "--help" | "-h" => {
                return Ok(CliArgs {
                    command: CliCommand::Help,
                    verbosity,
                })
            }
            "--lookup" => {
                lookup = Some(args.next().ok_or(ArgsError::MissingValue("--lookup"))?);
            }
            "--file" => {
                file = Some(PathBuf::from(
                    args.next().ok_or(ArgsError::MissingValue("--file"))?,
                ));
            }
            flag if flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((flag.len() - 1) as u8);
            }
            _ => return Err(ArgsError::Unknown(arg.clone())),
        }
    }

    let command = match lookup {
        Some(word) => CliCommand::Lookup { word },
        None => CliCommand::Demo { file },
    };
    Ok(CliArgs { command, verbosity })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, ArgsError> {
        let mut all = vec!["tappable".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]).unwrap().command, CliCommand::Version);
        assert_eq!(parse(&["-V"]).unwrap().command, CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, CliCommand::Demo { file: None });
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            parse(&["--file", "notes.txt"]).unwrap().command,
            CliCommand::Demo {
                file: Some(PathBuf::from("notes.txt"))
            }
        );
    }

    #[test]
    fn test_parse_lookup() {
        assert_eq!(
            parse(&["-v", "--lookup", "lamet"]).unwrap(),
            CliArgs {
                command: CliCommand::Lookup {
                    word: "lamet".to_string()
                },
                verbosity: 1,
            }
        );
    }

    #[test]
    fn test_parse_verbosity_accumulates() {
        assert_eq!(parse(&["-vv", "-v"]).unwrap().verbosity, 3);
    }

    #[test]
    fn test_parse_missing_value() {
        assert_eq!(parse(&["--lookup"]), Err(ArgsError::MissingValue("--lookup")));
        assert_eq!(parse(&["--file"]), Err(ArgsError::MissingValue("--file")));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            Err(ArgsError::Unknown("--unknown".to_string()))
        );
    }
}
