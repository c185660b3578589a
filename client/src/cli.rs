//! CLI module for the cadastro client.

use std::io::Write as _;

use cadastro_engine::{FormFields, Store, UsuarioId};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::config::{ApiConfig, DeploymentMode};
use crate::record_store::RecordStore;

/// Default log filter when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "cadastro_client=info";

/// Cadastro CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "cadastro", version, about = "Manage users against the cadastro API")]
pub struct Cli {
    /// Deployment whose API to use.
    #[arg(short, long, value_enum, default_value_t = DeploymentMode::Development)]
    pub mode: DeploymentMode,

    /// Override the API base URL.
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Log filter override (e.g. `debug`, `cadastro_client=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot actions. Without a subcommand the interactive shell starts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the user list.
    List,
    /// Add a user.
    Add {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        idade: String,
    },
    /// Delete a user by id.
    Delete { id: UsuarioId },
    /// Start the interactive shell.
    Shell,
}

/// A line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Refresh,
    Add(FormFields),
    Delete(UsuarioId),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one shell line.
    ///
    /// `add` takes the age and email first so the rest of the line can be a
    /// name with spaces.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return Err("empty command".to_string());
        };

        match cmd {
            "list" | "ls" => Ok(ShellCommand::List),
            "refresh" => Ok(ShellCommand::Refresh),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            "add" => {
                let age = words.next().unwrap_or_default();
                let email = words.next().unwrap_or_default();
                let name = words.collect::<Vec<_>>().join(" ");
                Ok(ShellCommand::Add(FormFields::new(name, email, age)))
            }
            "delete" | "del" | "rm" => {
                let raw = words.next().ok_or("usage: delete <id>")?;
                raw.parse()
                    .map(ShellCommand::Delete)
                    .map_err(|_| format!("invalid id: {raw}"))
            }
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

const SHELL_HELP: &str = "\
commands:
  list                      show the user list
  refresh                   fetch the list from the API again
  add <idade> <email> <nome> add a user
  delete <id>               delete a user
  quit                      leave the shell";

/// Render the banner, the mode and the list.
pub fn render(store: &Store) -> String {
    let mut out = String::new();

    let header = match store.notice() {
        Some(notice) => format!("[{}] {}\n", store.mode(), notice),
        None => format!("[{}]\n", store.mode()),
    };
    out.push_str(&header);

    if store.is_empty() {
        out.push_str("  (no users)\n");
        return out;
    }

    for usuario in store.records() {
        let age = usuario
            .age
            .map(|a| format!("{a} anos"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  #{} {} <{}>, {}",
            usuario.id, usuario.name, usuario.email, age
        ));
        if usuario.is_provisional() {
            out.push_str(" (local)");
        }
        out.push('\n');
    }

    out
}

/// Install the tracing subscriber. Logs go to stderr.
pub fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the client with the given CLI arguments.
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::resolve(cli.mode, cli.base_url.as_deref())?;
    info!(base_url = %config.base_url, mode = ?cli.mode, "using API");

    let api = ApiClient::new(&config)?;
    let mut records = RecordStore::new(api);

    // Mount.
    records.initialize().await;

    match cli.command.unwrap_or(Command::Shell) {
        Command::List => {}
        Command::Add { nome, email, idade } => {
            records
                .create_from(FormFields::new(nome, email, idade))
                .await?;
        }
        Command::Delete { id } => {
            records.delete(id).await?;
        }
        Command::Shell => return shell(&mut records).await,
    }

    print!("{}", render(records.store()));
    Ok(())
}

/// Read commands from stdin until `quit` or end of input.
async fn shell(records: &mut RecordStore) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", render(records.store()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };
        debug!(?command, "shell command");

        match command {
            ShellCommand::List => {}
            ShellCommand::Refresh => {
                records.initialize().await;
            }
            ShellCommand::Add(fields) => {
                records.create_from(fields).await?;
            }
            ShellCommand::Delete(id) => {
                records.delete(id).await?;
            }
            ShellCommand::Help => {
                println!("{SHELL_HELP}");
                continue;
            }
            ShellCommand::Quit => break,
        }

        print!("{}", render(records.store()));
    }

    Ok(())
}
