use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tkl_types::EventType;

#[derive(Parser)]
#[command(
    name = "tkl",
    about = "TicketLedger: event tickets on a hash-chained ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with office and ledger settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible ticket ids
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a ticketing session (interactive, or driven by a script)
    Session(SessionArgs),
    /// Issue a sample batch, verify it, and print the audit
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct SessionArgs {
    /// Read session commands from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,
}

#[derive(Args)]
pub struct DemoArgs {
    #[arg(long, default_value = "Sports")]
    pub event: EventType,
    #[arg(long, default_value = "Alice")]
    pub buyer: String,
    #[arg(short = 'n', long, default_value = "3")]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session() {
        let cli = Cli::try_parse_from(["tkl", "session"]).unwrap();
        if let Command::Session(args) = cli.command {
            assert!(args.script.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_session_script() {
        let cli = Cli::try_parse_from(["tkl", "session", "--script", "day1.tkl"]).unwrap();
        if let Command::Session(args) = cli.command {
            assert_eq!(args.script, Some(PathBuf::from("day1.tkl")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_demo_defaults() {
        let cli = Cli::try_parse_from(["tkl", "demo"]).unwrap();
        if let Command::Demo(args) = cli.command {
            assert_eq!(args.event, EventType::Sports);
            assert_eq!(args.buyer, "Alice");
            assert_eq!(args.count, 3);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_demo_event() {
        let cli = Cli::try_parse_from(["tkl", "demo", "--event", "mun", "-n", "2"]).unwrap();
        if let Command::Demo(args) = cli.command {
            assert_eq!(args.event, EventType::Mun);
            assert_eq!(args.count, 2);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reject_unknown_event() {
        assert!(Cli::try_parse_from(["tkl", "demo", "--event", "opera"]).is_err());
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "tkl", "--verbose", "--format", "json", "--seed", "7", "--config", "tkl.toml", "demo",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.config, Some(PathBuf::from("tkl.toml")));
    }
}
