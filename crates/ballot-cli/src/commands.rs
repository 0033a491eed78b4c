//! CLI command implementations.
//!
//! Each ledger command attaches to the persisted snapshot, runs one
//! operation and prints the outcome.

use ballot_core::{EventKind, LogEntry};
use ballot_storage::{FileStore, LedgerService};
use ballot_types::{Address, ProposalName};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::time::Duration;

use crate::accounts::{dev_account, resolve_account};
use crate::config::{CliConfig, CONFIG_KEYS};
use crate::output::*;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "ballot")]
#[command(about = "Delegated voting ledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Ledger directory
    #[arg(short, long, global = true, env = "BALLOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Calling account: 0x address or dev account index
    #[arg(short, long, global = true, env = "BALLOT_FROM")]
    pub from: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new ballot with the caller as chairperson
    Deploy {
        /// Proposal names (defaults to the configured list)
        names: Vec<String>,

        /// Replace an existing ballot
        #[arg(long)]
        force: bool,
    },

    /// Give an account the right to vote
    GiveRight {
        /// Voter address or dev account index
        voter: String,
    },

    /// Delegate the caller's vote
    Delegate {
        /// Delegate address or dev account index
        to: String,
    },

    /// Vote for a proposal
    Vote {
        /// Proposal index
        index: u32,
    },

    /// List proposals and their vote counts
    Proposals {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single proposal
    Proposal {
        /// Proposal index
        index: u32,
    },

    /// Show a voter record
    Voter {
        /// Address or dev account index (defaults to the caller)
        address: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the chairperson
    Chairperson,

    /// Show the winning proposal
    Winner,

    /// Print journal entries
    Events {
        /// Only entries of this kind (new-voter, delegated, voted)
        #[arg(short, long)]
        kind: Option<EventKind>,

        /// Only entries after this sequence number
        #[arg(short, long, default_value = "0")]
        since: u64,

        /// Keep polling for new entries until interrupted
        #[arg(long)]
        follow: bool,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "1000")]
        interval: u64,

        /// Print as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// List development accounts
    Accounts {
        /// Number of accounts
        #[arg(short, long, default_value = "5")]
        count: u32,
    },

    /// Replay a sample voting population with dev accounts 1-4
    Simulate,

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration commands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolved global options.
struct Context {
    data_dir: PathBuf,
    caller: Address,
}

impl Context {
    fn new(data_dir: Option<PathBuf>, from: Option<String>, config: &CliConfig) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
        let caller = match from.or_else(|| config.default_account.clone()) {
            Some(account) => resolve_account(&account)?,
            None => dev_account(0),
        };
        Ok(Self { data_dir, caller })
    }

    /// Attach to the ballot in the data directory.
    fn open(&self) -> anyhow::Result<LedgerService<FileStore>> {
        let store = FileStore::open(&self.data_dir)?;
        Ok(LedgerService::open(store)?)
    }
}

/// Execute command.
pub async fn execute(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let Cli {
        data_dir,
        from,
        command,
        ..
    } = cli;

    let context = || -> anyhow::Result<Context> {
        let ctx = Context::new(data_dir.clone(), from.clone(), &config)?;
        tracing::debug!(caller = %ctx.caller, data_dir = %ctx.data_dir.display(), "Resolved context");
        Ok(ctx)
    };

    match command {
        Commands::Deploy { names, force } => deploy(&context()?, &config, names, force),
        Commands::GiveRight { voter } => give_right(&context()?, &voter),
        Commands::Delegate { to } => delegate(&context()?, &to),
        Commands::Vote { index } => vote(&context()?, index),
        Commands::Proposals { json } => {
            let service = context()?.open()?;
            service.read(|ballot| -> anyhow::Result<()> {
                if json {
                    println!("{}", serde_json::to_string_pretty(ballot.proposals())?);
                } else {
                    print_proposals(ballot);
                }
                Ok(())
            })
        }
        Commands::Proposal { index } => {
            let service = context()?.open()?;
            let proposal = service
                .read(|ballot| ballot.proposal(index).cloned())
                .ok_or_else(|| anyhow::anyhow!("No proposal at index {}", index))?;
            println!("Index: {}", index.to_string().bright_yellow());
            println!("Name:  {}", proposal.name.to_string().bright_cyan());
            println!("Votes: {}", proposal.vote_count.to_string().bright_green());
            Ok(())
        }
        Commands::Voter { address, json } => {
            let ctx = context()?;
            let address = match address {
                Some(a) => resolve_account(&a)?,
                None => ctx.caller,
            };
            let service = ctx.open()?;
            let (voter, delegators) =
                service.read(|ballot| (ballot.voter(&address), ballot.delegators(&address)));
            if json {
                println!("{}", serde_json::to_string_pretty(&voter)?);
            } else {
                print_voter(&address, &voter, &delegators);
            }
            Ok(())
        }
        Commands::Chairperson => {
            let service = context()?.open()?;
            println!("{}", service.read(|ballot| ballot.chairperson()));
            Ok(())
        }
        Commands::Winner => {
            let service = context()?.open()?;
            let (index, name, total) = service.read(|ballot| {
                (ballot.winning_proposal(), ballot.winner_name(), ballot.total_votes())
            });
            if total == 0 {
                print_warning("No votes have been cast yet");
            }
            println!("Winning proposal: {} ({})", name.to_string().bright_green(), index);
            Ok(())
        }
        Commands::Events {
            kind,
            since,
            follow,
            interval,
            json,
        } => events(&context()?, kind, since, follow, interval, json).await,
        Commands::Accounts { count } => {
            let ctx = context()?;
            for i in 0..count {
                let marker = if dev_account(i) == ctx.caller { " (caller)" } else { "" };
                println!("{:>3}  {}{}", i, dev_account(i).to_string().bright_cyan(), marker);
            }
            Ok(())
        }
        Commands::Simulate => simulate(&context()?),
        Commands::Config(cmd) => execute_config(cmd, config.clone()),
    }
}

fn deploy(ctx: &Context, config: &CliConfig, names: Vec<String>, force: bool) -> anyhow::Result<()> {
    let names = if names.is_empty() {
        config.proposals.clone()
    } else {
        names
    };
    let names = names
        .iter()
        .map(|n| ProposalName::new(n))
        .collect::<Result<Vec<_>, _>>()?;

    let store = FileStore::open(&ctx.data_dir)?;
    let service = LedgerService::deploy(store, ctx.caller, names, force)?;

    print_success(&format!("Ballot deployed at {}", ctx.data_dir.display()));
    println!("Chairperson: {}", ctx.caller.to_string().bright_cyan());
    service.read(print_proposals);
    Ok(())
}

fn give_right(ctx: &Context, voter: &str) -> anyhow::Result<()> {
    let voter = resolve_account(voter)?;
    let service = ctx.open()?;

    if service.read(|ballot| ballot.chairperson()) != ctx.caller {
        anyhow::bail!("Caller is not the chairperson for this ballot");
    }

    print_info(&format!("Giving right to vote to {}", voter));
    let entry = service.grant_right(ctx.caller, voter)?;
    print_receipt(&entry);
    Ok(())
}

fn delegate(ctx: &Context, to: &str) -> anyhow::Result<()> {
    let to = resolve_account(to)?;
    let service = ctx.open()?;

    let entry = service.delegate(ctx.caller, to)?;
    print_receipt(&entry);

    let resolved = service.read(|ballot| ballot.voter(&ctx.caller).delegate);
    println!("Delegate: {}", format_optional_address(resolved).bright_cyan());
    Ok(())
}

fn vote(ctx: &Context, index: u32) -> anyhow::Result<()> {
    let service = ctx.open()?;

    let name = service.read(|ballot| ballot.proposal(index).map(|p| p.name.clone()));
    let name = match name {
        Some(name) => name,
        None => {
            let count = service.read(|ballot| ballot.proposal_count());
            anyhow::bail!("Proposal index {} out of range (proposal count {})", index, count);
        }
    };

    print_info(&format!("Voting for proposal {}", name));
    let entry = service.vote(ctx.caller, index)?;
    print_receipt(&entry);
    Ok(())
}

async fn events(
    ctx: &Context,
    kind: Option<EventKind>,
    since: u64,
    follow: bool,
    interval: u64,
    json: bool,
) -> anyhow::Result<()> {
    let service = ctx.open()?;
    let mut cursor = since;

    let print_new = |cursor: &mut u64| -> anyhow::Result<()> {
        let entries: Vec<LogEntry> = service.read(|ballot| ballot.events_since(*cursor).to_vec());
        for entry in &entries {
            *cursor = entry.seq;
            if kind.map_or(true, |k| entry.event.kind() == k) {
                if json {
                    println!("{}", serde_json::to_string(entry)?);
                } else {
                    print_event(entry);
                }
            }
        }
        Ok(())
    };

    print_new(&mut cursor)?;
    if !follow {
        return Ok(());
    }

    print_info("Listening for events. Press Ctrl-C to stop.");
    let mut ticker = tokio::time::interval(Duration::from_millis(interval.max(1)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if service.reload()? {
                    print_new(&mut cursor)?;
                }
            }
            _ = &mut ctrl_c => {
                println!();
                print_info("Stopped listening");
                return Ok(());
            }
        }
    }
}

fn simulate(ctx: &Context) -> anyhow::Result<()> {
    let service = ctx.open()?;
    let chair = ctx.caller;
    if service.read(|ballot| ballot.chairperson()) != chair {
        anyhow::bail!("Caller is not the chairperson for this ballot");
    }

    let [a1, a2, a3, a4] = [dev_account(1), dev_account(2), dev_account(3), dev_account(4)];

    for voter in [a1, a2, a3, a4] {
        print_receipt(&service.grant_right(chair, voter)?);
    }
    print_receipt(&service.vote(a1, 0)?);
    print_receipt(&service.delegate(a2, a3)?);
    print_receipt(&service.vote(a3, 0)?);
    print_receipt(&service.delegate(a4, a2)?);

    println!();
    service.read(print_proposals);
    println!("Winner: {}", service.read(|ballot| ballot.winner_name()).to_string().bright_green());
    Ok(())
}

fn execute_config(cmd: ConfigCommands, mut config: CliConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", "Current Configuration".bold());
            println!("{}", "=".repeat(50));
            for key in CONFIG_KEYS {
                println!("{:<16} {}", format!("{}:", key), config.get(key).unwrap_or_default());
            }
            println!();
            println!("Config file: {}", CliConfig::config_path()?.display());
        }

        ConfigCommands::Get { key } => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("Unknown config key: {} (expected one of {})", key, CONFIG_KEYS.join(", ")),
        },

        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            print_success(&format!("Set {} = {}", key, value));
        }

        ConfigCommands::Reset { yes } => {
            let confirm = yes
                || Confirm::new()
                    .with_prompt("Reset configuration to defaults?")
                    .default(false)
                    .interact()?;

            if confirm {
                CliConfig::default().save()?;
                print_success("Configuration reset to defaults");
            } else {
                println!("Reset cancelled");
            }
        }

        ConfigCommands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
