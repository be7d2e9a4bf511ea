use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use rs_mailbox_client::config::{Config, load_config, load_config_from, log_path};
use rs_mailbox_client::domain::email::{Draft, Mailbox};
use rs_mailbox_client::store::http::HttpStore;
use rs_mailbox_client::store::repo::{MailboxStore, StoreError};
use rs_mailbox_client::terminal::{TuiOptions, run_tui};

#[derive(Parser)]
#[command(name = "rs_mailbox_client")]
#[command(about = "Terminal client for an inbox/sent/archive mail service", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `base_url` from the config
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive client
    Tui {
        /// Mailbox shown on startup
        #[arg(long, default_value_t = Mailbox::Inbox)]
        mailbox: Mailbox,

        /// Open this email right away
        #[arg(long)]
        open: Option<u32>,
    },

    /// Print a mailbox in server order
    List { mailbox: Mailbox },

    /// Send an email without opening the interface
    Send {
        /// Comma-separated recipients
        #[arg(long)]
        to: String,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long, default_value = "")]
        body: String,
    },
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .map_err(|e| anyhow!("Configuration error: {e}"))?;

    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    Ok(cfg)
}

fn init_logging(to_file: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if to_file {
        // the terminal belongs to the interface
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path()?)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(matches!(cli.cmd, Command::Tui { .. }))?;

    let cfg = resolve_config(&cli)?;
    let store = HttpStore::new(&cfg.base_url, cfg.timeout())?;
    log::debug!("using mail service at {}", store.base_url());

    match cli.cmd {
        Command::Tui { mailbox, open } => run_tui(
            Arc::new(store),
            TuiOptions {
                mailbox,
                open,
                account: cfg.user_email.clone(),
            },
        ),

        Command::List { mailbox } => {
            let items = store.list_mailbox(mailbox)?;
            if items.is_empty() {
                println!("{} is empty", mailbox.title());
            }
            for e in items {
                let marker = if e.read { ' ' } else { '*' };
                println!(
                    "{:>6} {} {:<30} {:<40} {}",
                    e.id, marker, e.sender, e.subject, e.timestamp
                );
            }
            Ok(())
        }

        Command::Send { to, subject, body } => {
            let draft = Draft {
                recipients: to,
                subject,
                body,
            };
            match store.send_email(&draft) {
                Ok(message) => {
                    println!("{message}");
                    Ok(())
                }
                Err(StoreError::Rejected { error, .. }) => Err(anyhow!(error)),
                Err(e) => Err(e.into()),
            }
        }
    }
}
