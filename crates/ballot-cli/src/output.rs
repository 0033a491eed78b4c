//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use ballot_core::{Ballot, LogEntry, LedgerEvent, Voter, VoterStatus};
use ballot_types::Address;
use colored::Colorize;
use tabled::{Table, Tabled};

/// Format address (short version).
pub fn format_address_short(addr: &str) -> String {
    if addr.len() > 12 {
        format!("{}...{}", &addr[..10], &addr[addr.len() - 8..])
    } else {
        addr.to_string()
    }
}

/// Format an optional address, showing "-" for none.
pub fn format_optional_address(addr: Option<Address>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Error line shown before a failing command exits.
pub fn format_error(msg: &str) -> String {
    format!("Error: {}", msg)
}

/// Print error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{}", format_error(msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    println!("{}", format!("⚠ {}", msg).yellow());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

/// Print the receipt of a committed transition.
pub fn print_receipt(entry: &LogEntry) {
    print_success(&format!("Transaction completed. Hash: {}", entry.hash_hex()));
    println!("  Seq:   {}", entry.seq.to_string().bright_green());
    println!("  Event: {}", entry.event.to_string().bright_cyan());
}

#[derive(Tabled)]
struct ProposalRow {
    index: u32,
    name: String,
    votes: u64,
    leading: String,
}

/// Render the proposal table.
pub fn proposals_table(ballot: &Ballot) -> String {
    let winner = ballot.winning_proposal();
    let any_votes = ballot.total_votes() > 0;
    let rows: Vec<ProposalRow> = ballot
        .proposals()
        .iter()
        .enumerate()
        .map(|(i, p)| ProposalRow {
            index: i as u32,
            name: p.name.to_string(),
            votes: p.vote_count,
            leading: if any_votes && i as u32 == winner {
                "*".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    Table::new(rows).to_string()
}

/// Print the proposal table.
pub fn print_proposals(ballot: &Ballot) {
    println!("{}", "Proposals".bold());
    println!("{}", proposals_table(ballot));
}

/// Print a voter record.
pub fn print_voter(address: &Address, voter: &Voter, delegators: &[Address]) {
    let status = match voter.status() {
        VoterStatus::Unregistered => "Unregistered".red(),
        VoterStatus::Registered => "Registered".yellow(),
        VoterStatus::Voted => "Voted".green(),
    };

    println!("{}", "Voter Information".bold());
    println!("{}", "=".repeat(50));
    println!("Address:   {}", address.to_string().bright_cyan());
    println!("Status:    {}", status);
    println!("Weight:    {}", voter.weight.to_string().bright_yellow());
    println!("Voted:     {}", voter.voted);
    println!(
        "Vote:      {}",
        voter.vote.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("Delegate:  {}", format_optional_address(voter.delegate));
    if !delegators.is_empty() {
        println!("Represents {} delegator(s):", delegators.len());
        for d in delegators {
            println!("  • {}", d.to_string().bright_cyan());
        }
    }
}

/// One-line rendering of a journal entry.
pub fn format_event(entry: &LogEntry) -> String {
    let label = match &entry.event {
        LedgerEvent::NewVoter { .. } => "New voter",
        LedgerEvent::Delegated { .. } => "New vote delegation",
        LedgerEvent::Voted { .. } => "New vote cast",
    };
    format!(
        "#{} {} {} ({})",
        entry.seq,
        label,
        entry.event,
        format_address_short(&entry.hash_hex())
    )
}

/// Print a journal entry.
pub fn print_event(entry: &LogEntry) {
    println!("{}", format_event(entry));
}
