//! Switcher binary entry point

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use shared::{logging, ChannelId, Directory, GroupId, PersonId};
use switcher::{
    services::{DiscordClient, RealAuditSink, RealGroupCatalog, RealMembershipStore},
    SwitcherError, Switcher, SwitcherResult, ToggleRequest,
};

#[derive(Parser)]
#[command(name = "switcher")]
#[command(about = "Switches on-leave status across every group of an organization")]
struct Args {
    /// Directory configuration file
    #[arg(long, default_value = "switcher.json")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Toggle a person's on-leave status
    Toggle {
        #[arg(long)]
        user: String,
        /// Group the request originates from
        #[arg(long)]
        group: String,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        duration: Option<String>,
    },
    /// Show what a toggle would do without changing anything
    Status {
        #[arg(long)]
        user: String,
        #[arg(long)]
        group: String,
    },
    /// Post the switcher panel to a channel
    Panel {
        #[arg(long)]
        group: String,
        #[arg(long)]
        channel: String,
        /// Label for the switcher button
        #[arg(long)]
        button_label: Option<String>,
    },
}

type LiveSwitcher = Switcher<RealMembershipStore, RealGroupCatalog, RealAuditSink>;

fn build_switcher(config: &Path) -> SwitcherResult<LiveSwitcher> {
    let directory = Directory::load(config)?;
    info!(
        "📒 Loaded {} organization(s) from {}",
        directory.organization_count(),
        config.display()
    );
    let client = Arc::new(DiscordClient::from_env()?);

    Ok(Switcher::new(
        Arc::new(directory),
        RealMembershipStore::new(client.clone()),
        RealGroupCatalog::new(client.clone()),
        RealAuditSink::new(client),
    ))
}

async fn run(switcher: &LiveSwitcher, command: Command) -> SwitcherResult<()> {
    match command {
        Command::Toggle {
            user,
            group,
            reason,
            duration,
        } => {
            let mut request = ToggleRequest::new(PersonId::new(user), GroupId::new(group));
            if let Some(reason) = reason {
                request = request.with_reason(reason);
            }
            if let Some(duration) = duration {
                request = request.with_duration(duration);
            }

            let outcome = switcher.toggle(request).await?;
            for notice in outcome.failure_notices() {
                eprintln!("{notice}");
            }
            println!("{}", outcome.message());
        }
        Command::Status { user, group } => {
            let preview = switcher
                .preview(&PersonId::new(user), &GroupId::new(group))
                .await?;
            for snapshot in &preview.classifications.groups {
                println!("{}:", snapshot.group_name);
                for state in &snapshot.categories {
                    println!(
                        "  {} / {}: {}",
                        state.pair.off_leave, state.pair.on_leave, state.classification
                    );
                }
            }
            match preview.decision {
                Some(decision) => println!(
                    "A toggle would set {} ({} action(s){})",
                    decision.target_state(),
                    preview.actions.len(),
                    if decision.had_conflict { ", conflict" } else { "" }
                ),
                None => {
                    let nothing = SwitcherError::NoApplicableState {
                        person: preview.classifications.person,
                    };
                    println!("{}", nothing.requester_message());
                }
            }
        }
        Command::Panel {
            group,
            channel,
            button_label,
        } => {
            switcher
                .post_panel(
                    &GroupId::new(group),
                    &ChannelId::new(channel),
                    button_label.as_deref(),
                )
                .await?;
            println!("On-leave switcher has been posted!");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup("leave switcher");

    let result = match build_switcher(&args.config) {
        Ok(switcher) => run(&switcher, args.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        logging::log_error("switcher", &e);
        eprintln!("{}", e.requester_message());
        std::process::exit(1);
    }
}
