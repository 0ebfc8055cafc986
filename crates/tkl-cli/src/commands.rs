use std::fs;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tkl_office::{BoxOffice, IssueRequest, OfficeConfig, VerifyRequest};

use crate::cli::*;
use crate::render;
use crate::session::run_session;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let office = match cli.seed {
        Some(seed) => BoxOffice::with_seed(config, seed),
        None => BoxOffice::new(config),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Session(args) => cmd_session(&office, args, &mut out, cli.format),
        Command::Demo(args) => cmd_demo(&office, args, &mut out, cli.format),
    }
}

/// Office settings from a TOML file; defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<OfficeConfig> {
    let Some(path) = path else {
        return Ok(OfficeConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn cmd_session<W: Write>(
    office: &BoxOffice,
    args: SessionArgs,
    out: &mut W,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match args.script {
        Some(path) => {
            let file = fs::File::open(&path)
                .with_context(|| format!("opening script {}", path.display()))?;
            run_session(office, BufReader::new(file), out, format, false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal() && format == OutputFormat::Text;
            if interactive {
                writeln!(
                    out,
                    "{} session open. Type {} for commands.",
                    "TicketLedger".bold(),
                    "help".yellow()
                )?;
            }
            run_session(office, stdin.lock(), out, format, interactive)
        }
    }
}

fn cmd_demo<W: Write>(
    office: &BoxOffice,
    args: DemoArgs,
    out: &mut W,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let request = IssueRequest::new(args.event, args.buyer, args.count);
    let receipt = office.issue(&request)?;
    render::issue(out, format, &request, &receipt)?;

    if let Some(first) = receipt.tickets.first() {
        let verdict = office.verify(&VerifyRequest::new(first.ticket_id.as_str()))?;
        render::verification(out, format, &verdict)?;
    }
    let verdict = office.verify(&VerifyRequest::new("T000000"))?;
    render::verification(out, format, &verdict)?;

    render::audit(out, format, &office.audit()?)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_config_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), OfficeConfig::default());
    }

    #[test]
    fn config_file_is_parsed_as_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tkl.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "unique_ticket_ids = true\nmax_tickets_per_request = 5\n\n[ledger]\nmax_entries = 50").unwrap();
        drop(file);

        let config = load_config(Some(&path)).unwrap();
        assert!(config.unique_ticket_ids);
        assert_eq!(config.max_tickets_per_request, Some(5));
        assert_eq!(config.max_id_attempts, 32);
        assert_eq!(config.ledger.max_entries, Some(50));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tkl.toml");
        fs::write(&path, "max_tickets_per_request = \"lots\"").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn session_script_is_read_from_file() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("day1.tkl");
        fs::write(&script, "issue art 2 Bo\ncheck\n").unwrap();

        let office = BoxOffice::with_seed(OfficeConfig::default(), 4);
        let mut out = Vec::new();
        cmd_session(&office, SessionArgs { script: Some(script) }, &mut out, OutputFormat::Text).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("2 ticket(s) issued to Bo for Art"));
        assert!(output.contains("Ledger integrity verified (3 entries)"));
    }

    #[test]
    fn unreadable_config_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/tkl.toml"))).is_err());
    }

    #[test]
    fn demo_runs_the_sample_batch() {
        colored::control::set_override(false);
        let office = BoxOffice::with_seed(OfficeConfig::unique_ids(), 11);
        let args = DemoArgs {
            event: tkl_types::EventType::Sports,
            buyer: "Alice".into(),
            count: 3,
        };
        let mut out = Vec::new();
        cmd_demo(&office, args, &mut out, OutputFormat::Text).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("3 ticket(s) issued to Alice for Sports"));
        assert!(output.contains("is VALID"));
        assert!(output.contains("T000000 not found"));
        assert!(output.contains("Ledger: 4 entries"));
        assert!(output.contains("Ledger integrity verified"));
    }
}
