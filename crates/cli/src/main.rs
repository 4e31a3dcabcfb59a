//! Command-line client for the sortstash array service.

mod api_client;

use anyhow::{Context, Result};
use api_client::ApiClient;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sortstashctl")]
#[command(about = "Command-line client for the sortstash array service")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ApiArgs {
    /// Server API URL
    #[arg(
        long,
        env = "SORTSTASH_SERVER",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,

    /// Session token (from `register` or `login`)
    #[arg(long, env = "SORTSTASH_TOKEN")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user and print the session token
    Register {
        username: String,
        password: String,
    },
    /// Log in and print a fresh session token (invalidates the previous one)
    Login {
        username: String,
        password: String,
    },
    /// Change the password; prints the replacement token
    ChangePassword {
        new_password: String,
    },
    /// Array operations
    Array {
        #[command(subcommand)]
        command: ArrayCommands,
    },
    /// Request history operations
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum ArrayCommands {
    /// Create (or fully replace) the stored array with random values
    Create {
        /// Number of elements to generate (must be > 0)
        size: i64,
    },
    /// Update the stored array
    Patch {
        /// Regenerate the array with this many random values
        #[arg(long)]
        new_size: Option<i64>,
        /// Replace the array with these values (comma-separated)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Vec<i64>,
    },
    /// Print the stored array
    Get,
    /// Shell-sort the stored array in place
    Sort,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Print the request history, newest first
    Show,
    /// Delete the request history
    Clear,
}

fn format_array(values: &[i64]) -> String {
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

/// Build a client for endpoints that issue tokens (no token required).
fn public_client(api: &ApiArgs) -> Result<ApiClient> {
    ApiClient::new(&api.server, None)
}

/// Build a client for endpoints that require a session token.
fn authed_client(api: &ApiArgs) -> Result<ApiClient> {
    let token = api
        .token
        .as_deref()
        .context("no session token; pass --token or set SORTSTASH_TOKEN")?;
    ApiClient::new(&api.server, Some(token))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Register { username, password } => {
            let client = public_client(&cli.api)?;
            let response = client.register(&username, &password).await?;
            println!("{}", response.message);
            println!("Token: {}", response.token);
            println!("Export it for later commands: export SORTSTASH_TOKEN={}", response.token);
        }
        Commands::Login { username, password } => {
            let client = public_client(&cli.api)?;
            let response = client.login(&username, &password).await?;
            println!("{}", response.message);
            println!("Token: {}", response.token);
            println!("Export it for later commands: export SORTSTASH_TOKEN={}", response.token);
        }
        Commands::ChangePassword { new_password } => {
            let client = authed_client(&cli.api)?;
            let response = client.change_password(&new_password).await?;
            println!("{}", response.message);
            println!("New token: {}", response.new_token);
            println!(
                "The old token is no longer valid; export the new one: export SORTSTASH_TOKEN={}",
                response.new_token
            );
        }
        Commands::Array { command } => {
            let client = authed_client(&cli.api)?;
            match command {
                ArrayCommands::Create { size } => {
                    let response = client.create_array(size).await?;
                    println!("{}", response.message);
                    println!("{}", format_array(&response.array));
                }
                ArrayCommands::Patch { new_size, values } => {
                    let response = client.patch_array(new_size, &values).await?;
                    println!("{}", response.message);
                    println!("{}", format_array(&response.array));
                }
                ArrayCommands::Get => {
                    let response = client.get_array().await?;
                    println!("{}", format_array(&response.array));
                }
                ArrayCommands::Sort => {
                    let response = client.sort_array().await?;
                    println!("{}", response.message);
                    println!("{}", format_array(&response.array));
                }
            }
        }
        Commands::History { command } => {
            let client = authed_client(&cli.api)?;
            match command {
                HistoryCommands::Show => {
                    let entries = client.list_history().await?;
                    if entries.is_empty() {
                        println!("History is empty.");
                    }
                    for entry in entries {
                        println!(
                            "{:>6}  {:<28} {}",
                            entry.id, entry.endpoint, entry.timestamp
                        );
                    }
                }
                HistoryCommands::Clear => {
                    let response = client.clear_history().await?;
                    println!("{}", response.message);
                }
            }
        }
    }

    Ok(())
}
