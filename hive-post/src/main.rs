//! hive-post - Publish and inspect posts on the Hive blockchain

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use libhivecast::logging::{LogFormat, LoggingConfig};
use libhivecast::{Config, HiveService, HivecastError, PostRequest};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "hive-post")]
#[command(version, about = "Publish and inspect posts on the Hive blockchain", long_about = None)]
struct Cli {
    /// Path to config file (defaults to $HIVECAST_CONFIG or ~/.config/hivecast/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log format: text, json or pretty (defaults to $HIVECAST_LOG_FORMAT or text)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a post (reads the body from stdin if not provided)
    Publish {
        /// Post title
        #[arg(short, long)]
        title: String,

        /// Tag (repeatable); the first tag is the post's category
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Publishing account (defaults to the configured username)
        #[arg(short, long)]
        author: Option<String>,

        /// Post body in markdown
        content: Option<String>,
    },

    /// Show an account
    Account {
        name: String,
    },

    /// Show a post
    Get {
        author: String,
        permlink: String,
    },

    /// Check that the posting key belongs to an account
    ValidateKey {
        /// Account to check (defaults to the configured username)
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// What a command wants to tell the user, and whether it counts as success
struct Outcome {
    output: String,
    success: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    let mut logging = LoggingConfig::from_env(filter);
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    if cli.verbose {
        logging.filter = filter.to_string();
    }
    logging.init();

    match run(cli).await {
        Ok(outcome) => {
            println!("{}", outcome.output);
            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<HivecastError>()
                .map(HivecastError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    debug!(
        username = %config.hive.username,
        api_url = %config.hive.api_url,
        "Loaded configuration"
    );
    let service = HiveService::from_config(&config)?;

    match cli.command {
        Command::Publish {
            title,
            tags,
            author,
            content,
        } => {
            let content = match content {
                Some(content) => content,
                None => read_stdin().context("Failed to read post body from stdin")?,
            };
            if content.trim().is_empty() {
                let error = HivecastError::InvalidInput("Post body cannot be empty".to_string());
                return Err(error.into());
            }

            let request = PostRequest {
                title,
                content,
                tags,
                author: author.unwrap_or_default(),
            };
            let result = service.publish_post(request).await;
            debug!(
                success = result.success,
                permlink = ?result.permlink,
                "Publish finished"
            );

            let output = match cli.format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)
                    .context("Failed to encode result")?,
                OutputFormat::Text => match (&result.url, &result.error) {
                    (Some(url), _) => url.clone(),
                    (None, Some(error)) => error.clone(),
                    (None, None) => "Failed to publish post".to_string(),
                },
            };
            Ok(Outcome {
                output,
                success: result.success,
            })
        }

        Command::Account { name } => {
            let account = service.get_account(&name).await;
            render_lookup(account, &format!("Account '{}' not found", name))
        }

        Command::Get { author, permlink } => {
            let post = service.get_post(&author, &permlink).await;
            render_lookup(post, &format!("Post @{}/{} not found", author, permlink))
        }

        Command::ValidateKey { name } => {
            let name = name.unwrap_or_else(|| service.username().to_string());
            let valid = service.validate_posting_key(&name).await;
            debug!(account = %name, valid, "Checked posting key");

            let output = match cli.format {
                OutputFormat::Json => {
                    serde_json::json!({ "account": name, "valid": valid }).to_string()
                }
                OutputFormat::Text if valid => "valid".to_string(),
                OutputFormat::Text => "invalid".to_string(),
            };
            Ok(Outcome {
                output,
                success: valid,
            })
        }
    }
}

/// Records are always printed as JSON; `--format` only affects publish and key checks
fn render_lookup<T: serde::Serialize>(
    record: Option<T>,
    not_found: &str,
) -> anyhow::Result<Outcome> {
    match record {
        Some(record) => Ok(Outcome {
            output: serde_json::to_string_pretty(&record).context("Failed to encode record")?,
            success: true,
        }),
        None => Ok(Outcome {
            output: not_found.to_string(),
            success: false,
        }),
    }
}

fn read_stdin() -> std::io::Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer)
}
