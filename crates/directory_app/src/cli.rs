//! Startup flags and the commands typed at the `directory>` prompt.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use directory_core::{FilterSet, MemberId, Msg};
use directory_logging::LogDestination;
use thiserror::Error;

use crate::platform::SETTINGS_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "directory",
    version,
    about = "Browse the professional directory from the terminal"
)]
pub struct StartupArgs {
    /// API base url; wins over DIRECTORY_API_URL and the settings file.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Initial company filter.
    #[arg(long, value_name = "COMPANY")]
    pub company: Option<String>,
    /// Initial job title filter.
    #[arg(long, value_name = "JOB")]
    pub job: Option<String>,
    /// Look up a single person by id.
    #[arg(long, value_name = "ID")]
    pub person: Option<String>,
    /// Where log output goes; defaults to the settings file value.
    #[arg(long, value_enum)]
    pub log: Option<LogChoice>,
    #[arg(long, value_name = "FILE", default_value = SETTINGS_FILE)]
    pub settings: PathBuf,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl StartupArgs {
    pub fn initial_filters(&self) -> FilterSet {
        FilterSet {
            company_query: self.company.clone(),
            job_query: self.job.clone(),
            person_id: self.person.clone(),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogChoice {
    File,
    Terminal,
    Both,
    Off,
}

impl From<LogChoice> for LogDestination {
    fn from(choice: LogChoice) -> Self {
        match choice {
            LogChoice::File => LogDestination::File,
            LogChoice::Terminal => LogDestination::Terminal,
            LogChoice::Both => LogDestination::Both,
            LogChoice::Off => LogDestination::Off,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "directory>",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
struct PromptLine {
    #[command(subcommand)]
    command: Command,
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Search with new filters; a search without filters repeats the last one
    Search {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        job: Option<String>,
        #[arg(long)]
        person: Option<String>,
    },
    /// Run the current search again from the first page
    Refresh,
    /// Load the next page of results
    More,
    /// Show details and experiences of a listed professional
    Open { id: String },
    /// Close the detail view
    Close,
    /// Dismiss the error panel
    Dismiss,
    /// Leave the directory
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// The message this command dispatches, or `None` for `quit`.
    pub fn into_msg(self) -> Option<Msg> {
        let msg = match self {
            Command::Search {
                company,
                job,
                person,
            } => Msg::FiltersSubmitted(FilterSet {
                company_query: company,
                job_query: job,
                person_id: person,
            }),
            Command::Refresh => Msg::Refresh,
            Command::More => Msg::MoreRequested,
            Command::Open { id } => Msg::DetailOpened(MemberId::from(id)),
            Command::Close => Msg::DetailClosed,
            Command::Dismiss => Msg::ErrorDismissed,
            Command::Quit => return None,
        };
        Some(msg)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unterminated quote in command")]
    UnterminatedQuote,
    /// Rendered clap output: a usage error, or help text on `help`.
    #[error("{0}")]
    Usage(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens = tokenize(line)?;
    if tokens.is_empty() {
        return Err(CommandError::Empty);
    }
    PromptLine::try_parse_from(tokens)
        .map(|prompt| prompt.command)
        .map_err(|err| CommandError::Usage(err.render().to_string()))
}

/// Splits on whitespace; single or double quotes group words.
fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote = None;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
