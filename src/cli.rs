use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::connection::{self, Connection};
use crate::dispatch::Dispatcher;
use crate::payload::Payload;

/// CLI for chathook: push messages and files to a chat channel webhook.
#[derive(Parser)]
#[clap(
    name = "chathook",
    version,
    about = "Push messages, files and connection sets to a chat-service webhook"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Destination flags shared by the sending subcommands. When `--webhook` is
/// absent the default connection (or the environment fallback) is used.
#[derive(Args)]
pub struct Target {
    /// Webhook endpoint URL
    #[clap(long)]
    pub webhook: Option<String>,
    /// Display username attached to outgoing messages
    #[clap(long)]
    pub username: Option<String>,
    /// Human-readable server label
    #[clap(long)]
    pub server: Option<String>,
    /// Human-readable channel label
    #[clap(long)]
    pub channel: Option<String>,
}

impl Target {
    fn resolve(&self) -> Result<Connection> {
        match &self.webhook {
            Some(webhook) => {
                let username = self.username.as_deref().unwrap_or("chathook");
                Ok(Connection::new(
                    webhook.clone(),
                    username,
                    self.server.clone(),
                    self.channel.clone(),
                )?)
            }
            None => Ok(connection::default_connection()?),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a text message, optionally chunked into fenced blocks
    Send {
        /// The message text
        message: String,
        /// Split the message into code-fenced chunks
        #[clap(long)]
        chunked: bool,
        /// Maximum characters per chunk
        #[clap(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        #[clap(flatten)]
        target: Target,
    },
    /// Send a file as a multipart upload
    SendFile {
        /// Path of the file to send
        path: PathBuf,
        #[clap(flatten)]
        target: Target,
    },
    /// Export the target connection to a CSV file
    Export {
        /// Path of the CSV file to write
        path: PathBuf,
        /// Add to an existing file instead of replacing it
        #[clap(long)]
        append: bool,
        #[clap(flatten)]
        target: Target,
    },
    /// List the connections stored in a CSV file
    Import {
        /// Path of the CSV file to read
        path: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let dispatcher = Dispatcher::new();

    match cli.command {
        Commands::Send {
            message,
            chunked,
            chunk_size,
            target,
        } => {
            let conn = target.resolve()?;
            if chunked {
                match dispatcher
                    .send_chunked_text(&conn, &message, chunk_size)
                    .await?
                {
                    Some(outcomes) => {
                        let sent = outcomes.iter().filter(|o| o.is_ok()).count();
                        println!("Sent {sent}/{} chunks.", outcomes.len());
                        for (i, outcome) in outcomes.iter().enumerate() {
                            if let Err(e) = outcome {
                                eprintln!("[ERROR] chunk {i} failed: {e}");
                            }
                        }
                    }
                    None => println!("Nothing to send."),
                }
            } else {
                match dispatcher.send_text(&conn, &message).await? {
                    Some(receipt) => println!("Sent, status {}.", receipt.status),
                    None => println!("Nothing to send."),
                }
            }
        }
        Commands::SendFile { path, target } => {
            let conn = target.resolve()?;
            match dispatcher.send_payload(&conn, &Payload::File(path)).await? {
                Some(receipt) => println!("Sent, status {}.", receipt.status),
                None => println!("Nothing to send."),
            }
        }
        Commands::Export {
            path,
            append,
            target,
        } => {
            let conn = target.resolve()?;
            connection::export_connections(std::slice::from_ref(&conn), &path, append)?;
            println!("Exported 1 connection to {}.", path.display());
        }
        Commands::Import { path } => {
            let conns = connection::import_connections(&path)?;
            println!("{} connection(s) in {}:", conns.len(), path.display());
            for conn in &conns {
                println!(
                    "  {} @ {} ({}/{})",
                    conn.username(),
                    conn.webhook_url(),
                    conn.server_label().unwrap_or("-"),
                    conn.channel_label().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}
