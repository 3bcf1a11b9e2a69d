//! Line-oriented interactive session
//!
//! Every accepted command re-renders the dashboard from scratch. A bad
//! command or a failed forecast is reported and the session carries on.

use crate::dashboard::{Dashboard, DashboardParams};
use chrono::NaiveDate;
use log::debug;
use price_forecast::utils::parse_date;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

pub const PROMPT: &str = "> ";

pub const HELP: &str = "\
Commands:
  start YYYY-MM-DD   set the first date of the range
  end YYYY-MM-DD     set the last date of the range
  horizon N          number of days to predict (1-30)
  reset              restore the full range and default horizon
  show               render the dashboard again
  help               show this message
  quit               leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start(NaiveDate),
    End(NaiveDate),
    Horizon(usize),
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' takes a single argument")]
    TrailingInput(&'static str),

    #[error("Cannot read '{0}' as a date")]
    BadDate(String),

    #[error("Cannot read '{0}' as a number of days")]
    BadNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "start" => Command::Start(date_argument("start", words.next())?),
            "end" => Command::End(date_argument("end", words.next())?),
            "horizon" => {
                let raw = words.next().ok_or(CommandError::MissingArgument("horizon"))?;
                let days = raw
                    .parse()
                    .map_err(|_| CommandError::BadNumber(raw.to_string()))?;
                Command::Horizon(days)
            }
            "reset" => Command::Reset,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(keyword.clone())),
        };

        if words.next().is_some() {
            let name = match command {
                Command::Start(_) => "start",
                Command::End(_) => "end",
                Command::Horizon(_) => "horizon",
                Command::Reset => "reset",
                Command::Show => "show",
                Command::Help => "help",
                Command::Quit => "quit",
            };
            return Err(CommandError::TrailingInput(name));
        }
        Ok(command)
    }
}

fn date_argument(name: &'static str, raw: Option<&str>) -> Result<NaiveDate, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument(name))?;
    parse_date(raw).ok_or_else(|| CommandError::BadDate(raw.to_string()))
}

/// Apply `command` to `params`; `None` means the session should end
pub fn apply(
    command: Command,
    params: DashboardParams,
    defaults: DashboardParams,
) -> Option<DashboardParams> {
    match command {
        Command::Start(start) => Some(DashboardParams { start, ..params }),
        Command::End(end) => Some(DashboardParams { end, ..params }),
        Command::Horizon(horizon) => Some(DashboardParams { horizon, ..params }),
        Command::Reset => Some(defaults),
        Command::Show | Command::Help => Some(params),
        Command::Quit => None,
    }
}

/// Run commands from `input` until it ends or `quit`, returning the last parameters
pub fn run_session<R: BufRead, W: Write>(
    dashboard: &Dashboard,
    initial: DashboardParams,
    input: R,
    out: &mut W,
) -> io::Result<DashboardParams> {
    let defaults = dashboard.default_params();
    let mut params = initial;

    write!(out, "{}", dashboard.render(&params).to_text(dashboard.config()))?;
    writeln!(out, "Type 'help' for commands.")?;
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Help) => writeln!(out, "{}", HELP)?,
            Ok(command) => match apply(command, params, defaults) {
                Some(next) => {
                    debug!("Session command {:?}", command);
                    params = next;
                    write!(out, "{}", dashboard.render(&params).to_text(dashboard.config()))?;
                }
                None => break,
            },
            Err(err) => writeln!(out, "{}", err)?,
        }
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(params)
}
