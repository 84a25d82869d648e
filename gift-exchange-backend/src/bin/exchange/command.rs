use core::str::FromStr;

pub const HELP: &[&str] = &[
    "reveal <participant-id>",
    "broadcast",
    "reset",
    "help",
    "quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reveal(String),
    Broadcast,
    Reset,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("missing participant id, usage: reveal <participant-id>")]
    MissingGiver,
    #[error("unexpected argument {0}")]
    UnexpectedArgument(String),
    #[error("unknown command {0}, try help")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = match words.next().ok_or(CommandError::Empty)? {
            "reveal" => Self::Reveal(words.next().ok_or(CommandError::MissingGiver)?.to_owned()),
            "broadcast" => Self::Broadcast,
            "reset" => Self::Reset,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        match words.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_owned())),
            None => Ok(command),
        }
    }
}
