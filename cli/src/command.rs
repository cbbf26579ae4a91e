use std::{fmt::Display, str::FromStr};

/// Describes a menu line that could not be turned into a [`Command`]
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for the menu")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' takes fewer arguments")]
    TooManyArguments(&'static str),
    #[error("'{0}' is not a valid count")]
    InvalidNumber(String),
    #[error("Empty command")]
    Empty,
}

/// One menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Index more files
    Load(Vec<String>),
    Search(String),
    And(String, String),
    /// Frequent-terms report, optionally with an explicit K
    Top(Option<usize>),
    Stats,
    Docs,
    Config,
    /// Release the index and start over
    Reset,
    Help,
    Quit,
}

pub const MENU: &str = "\
Commands:
  1 | load <file>...        index one or more files
  2 | search <term>         documents containing a term, most frequent first
  3 | and <term> <term>     documents containing both terms
  4 | top [k]               most frequent terms across the corpus
  5 | stats                 index health statistics
      docs                  list indexed documents
      config                show engine configuration
      reset                 release the index and start over
      help                  show this menu
  6 | quit                  leave";

impl Command {
    /// Parse a menu line. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }

    fn exactly<'a>(
        name: &'static str,
        expected: &'static str,
        args: &[&'a str],
        n: usize,
    ) -> Result<Vec<&'a str>, CommandError> {
        if args.len() < n {
            return Err(CommandError::MissingArgument {
                command: name,
                expected,
            });
        }
        if args.len() > n {
            return Err(CommandError::TooManyArguments(name));
        }
        Ok(args.to_vec())
    }

    fn none(name: &'static str, args: &[&str]) -> Result<(), CommandError> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(CommandError::TooManyArguments(name))
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match head.as_str() {
            "1" | "load" | "build" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "load",
                        expected: "at least one file",
                    });
                }
                Ok(Command::Load(args.iter().map(|a| a.to_string()).collect()))
            }
            "2" | "search" => {
                let args = Self::exactly("search", "one term", &args, 1)?;
                Ok(Command::Search(args[0].to_string()))
            }
            "3" | "and" => {
                let args = Self::exactly("and", "two terms", &args, 2)?;
                Ok(Command::And(args[0].to_string(), args[1].to_string()))
            }
            "4" | "top" => match args.as_slice() {
                [] => Ok(Command::Top(None)),
                [k] => k
                    .parse::<usize>()
                    .map(|k| Command::Top(Some(k)))
                    .map_err(|_| CommandError::InvalidNumber(k.to_string())),
                _ => Err(CommandError::TooManyArguments("top")),
            },
            "5" | "stats" => Self::none("stats", &args).map(|_| Command::Stats),
            "docs" => Self::none("docs", &args).map(|_| Command::Docs),
            "config" => Self::none("config", &args).map(|_| Command::Config),
            "reset" => Self::none("reset", &args).map(|_| Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "6" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(head)),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Load(files) => write!(f, "load {}", files.join(" ")),
            Command::Search(term) => write!(f, "search {}", term),
            Command::And(left, right) => write!(f, "and {} {}", left, right),
            Command::Top(Some(k)) => write!(f, "top {}", k),
            Command::Top(None) => write!(f, "top"),
            Command::Stats => write!(f, "stats"),
            Command::Docs => write!(f, "docs"),
            Command::Config => write!(f, "config"),
            Command::Reset => write!(f, "reset"),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
