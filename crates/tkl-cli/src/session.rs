use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use colored::Colorize;
use tkl_ledger::ProjectionBuilder;
use tkl_office::{BoxOffice, IssueRequest, VerifyRequest};
use tkl_types::EventType;

use crate::cli::OutputFormat;
use crate::render;

/// One line of session input.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Issue(IssueRequest),
    Verify(VerifyRequest),
    Audit,
    Tickets,
    Check,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let command = match verb.as_str() {
            "issue" => {
                let event: EventType = words
                    .next()
                    .context("usage: issue <event> <count> <buyer name>")?
                    .parse()?;
                let count: u32 = words
                    .next()
                    .context("usage: issue <event> <count> <buyer name>")?
                    .parse()
                    .context("ticket count must be a whole number")?;
                let buyer = words.collect::<Vec<_>>().join(" ");
                Self::Issue(IssueRequest::new(event, buyer, count))
            }
            "verify" => {
                let id = words.next().context("usage: verify <ticket_id>")?;
                Self::Verify(VerifyRequest::new(id))
            }
            "audit" => Self::Audit,
            "tickets" => Self::Tickets,
            "check" => Self::Check,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(Some(command))
    }
}

const HELP: &str = "\
commands:
  issue <event> <count> <buyer name>   issue tickets (events: Sports, Art, Cultural, Literature, MUN)
  verify <ticket_id>                   look up a ticket
  tickets                              list issued tickets
  audit                                show the full ledger
  check                                run a full integrity diagnosis
  quit                                 end the session";

/// Drive one session over `input`. The office and its ledger live exactly
/// as long as this call.
pub fn run_session<R: BufRead, W: Write>(
    office: &BoxOffice,
    input: R,
    out: &mut W,
    format: OutputFormat,
    prompt: bool,
) -> anyhow::Result<()> {
    if prompt {
        write!(out, "{} ", "tkl>".cyan().bold())?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        match SessionCommand::parse(&line) {
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = execute(office, command, out, format) {
                    render::error(out, format, &e.to_string())?;
                }
            }
            Ok(None) => {}
            Err(e) => render::error(out, format, &e.to_string())?,
        }

        if prompt {
            write!(out, "{} ", "tkl>".cyan().bold())?;
            out.flush()?;
        }
    }

    Ok(())
}

fn execute<W: Write>(
    office: &BoxOffice,
    command: SessionCommand,
    out: &mut W,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        SessionCommand::Issue(request) => {
            let receipt = office.issue(&request)?;
            render::issue(out, format, &request, &receipt)
        }
        SessionCommand::Verify(request) => {
            let verdict = office.verify(&request)?;
            render::verification(out, format, &verdict)
        }
        SessionCommand::Audit => render::audit(out, format, &office.audit()?),
        SessionCommand::Tickets => {
            let rows = ProjectionBuilder::ticket_summary(office.ledger())?;
            render::tickets(out, format, &rows)
        }
        SessionCommand::Check => render::check(out, format, &office.check()?),
        SessionCommand::Help => {
            writeln!(out, "{HELP}")?;
            Ok(())
        }
        SessionCommand::Quit => Ok(()),
    }
}
