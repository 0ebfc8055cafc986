use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tkl_office::{AuditReport, IssueReceipt, IssueRequest, TicketRow, ValidationReport, Verification};

use crate::cli::OutputFormat;

fn json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// A failed command. JSON sessions get an `{"error": ...}` object so the
/// stream stays parseable.
pub fn error<W: Write>(out: &mut W, format: OutputFormat, message: &str) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, &serde_json::json!({ "error": message }));
    }
    writeln!(out, "{} {message}", "✗".red().bold())?;
    Ok(())
}

pub fn issue<W: Write>(
    out: &mut W,
    format: OutputFormat,
    request: &IssueRequest,
    receipt: &IssueReceipt,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, receipt);
    }
    writeln!(
        out,
        "{} {} ticket(s) issued to {} for {}",
        "✓".green().bold(),
        receipt.len(),
        request.buyer.bold(),
        request.event.to_string().yellow()
    )?;
    for ticket in &receipt.tickets {
        writeln!(out, "  {}  {}", ticket.ticket_id.as_str().cyan(), ticket.time.dimmed())?;
    }
    Ok(())
}

pub fn verification<W: Write>(
    out: &mut W,
    format: OutputFormat,
    verdict: &Verification,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, verdict);
    }
    match verdict {
        Verification::Valid { ticket } => {
            writeln!(
                out,
                "{} Ticket {} is {}",
                "✓".green().bold(),
                ticket.ticket_id.as_str().cyan(),
                "VALID".green()
            )?;
            writeln!(out, "  Event: {}", ticket.event.to_string().yellow())?;
            writeln!(out, "  Buyer: {}", ticket.buyer)?;
            writeln!(out, "  Time:  {}", ticket.time)?;
        }
        Verification::NotFound { ticket_id } => {
            writeln!(
                out,
                "{} Ticket {} not found or invalid",
                "✗".red().bold(),
                ticket_id.cyan()
            )?;
        }
    }
    Ok(())
}

pub fn tickets<W: Write>(out: &mut W, format: OutputFormat, rows: &[TicketRow]) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, &rows);
    }
    if rows.is_empty() {
        writeln!(out, "No tickets issued yet.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<12} {:<20} {:<9} {}",
        "Event".bold(),
        "Buyer".bold(),
        "Ticket".bold(),
        "Time of Purchase".bold()
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<12} {:<20} {:<9} {}",
            row.event.to_string(),
            row.buyer,
            row.ticket_id,
            row.time
        )?;
    }
    Ok(())
}

pub fn audit<W: Write>(out: &mut W, format: OutputFormat, report: &AuditReport) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, report);
    }
    writeln!(out, "Ledger: {} entries", report.entries.len().to_string().bold())?;
    for row in &report.entries {
        writeln!(
            out,
            "{}  {}  {}",
            format!("#{}", row.index).yellow().bold(),
            row.timestamp.dimmed(),
            row.payload
        )?;
        writeln!(out, "    prev: {}", row.previous_hash.dimmed())?;
        writeln!(out, "    hash: {}", row.hash)?;
    }
    writeln!(out)?;
    tickets(out, format, &report.tickets)?;
    writeln!(out)?;
    if report.integrity_ok {
        writeln!(out, "{} Ledger integrity verified", "✓".green().bold())?;
    } else {
        writeln!(out, "{} Ledger integrity {}", "✗".red().bold(), "FAILED".red().bold())?;
    }
    Ok(())
}

pub fn check<W: Write>(out: &mut W, format: OutputFormat, report: &ValidationReport) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, report);
    }
    let mark = |ok: bool| if ok { "valid".green() } else { "BROKEN".red() };
    if report.is_valid() {
        writeln!(
            out,
            "{} Ledger integrity verified ({} entries)",
            "✓".green().bold(),
            report.entry_count
        )?;
    } else {
        writeln!(
            out,
            "{} Ledger integrity check failed ({} violations)",
            "✗".red().bold(),
            report.violations.len()
        )?;
    }
    writeln!(out, "  Genesis: {}", mark(report.genesis_valid))?;
    writeln!(out, "  Indices: {}", mark(report.indices_contiguous))?;
    writeln!(out, "  Links:   {}", mark(report.links_valid))?;
    writeln!(out, "  Hashes:  {}", mark(report.hashes_valid))?;
    for violation in &report.violations {
        writeln!(
            out,
            "  {} #{}: {}",
            "!".red(),
            violation.index,
            violation.description
        )?;
    }
    Ok(())
}
