//! py-docs-bot CLI - answers !docs commands on Reddit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use docs_bot::{
    format_reply, BotConfig, CommandParser, Credentials, DocsBot, DocsResolver, DocsUrls, Exit,
    HttpProber, Prober, RedditClient, ReferenceTable, RetryPolicy, Supervisor, DEFAULT_TRIGGER,
    USER_AGENT,
};

/// Reply to !docs commands on Reddit with links to the Python documentation.
#[derive(Parser)]
#[command(name = "py-docs-bot")]
#[command(about = "Python documentation bot for reddit")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monitor a subreddit and reply to commands
    Run {
        /// Subreddit to monitor
        #[arg(long, env = "DOCS_BOT_SUBREDDIT", default_value = "learnpython")]
        subreddit: String,

        /// Command token that starts a request line
        #[arg(long, env = "DOCS_BOT_TRIGGER", default_value = DEFAULT_TRIGGER)]
        trigger: String,

        /// Reference table (JSON)
        #[arg(long, env = "DOCS_BOT_DATASTORE", default_value = "datastore/datastore.json")]
        datastore: PathBuf,

        /// Serve documentation links from this host instead of python.org
        #[arg(long, env = "DOCS_BOT_DOCS_HOST")]
        docs_host: Option<String>,

        /// Credentials file (TOML with a [reddit] table)
        #[arg(long, env = "DOCS_BOT_CREDENTIALS", default_value = "credentials.toml")]
        credentials: PathBuf,

        /// Consecutive failures tolerated before exiting
        #[arg(long, default_value = "10")]
        max_restarts: u32,

        /// Also answer comments posted before the bot started
        #[arg(long)]
        include_existing: bool,
    },

    /// Resolve references locally and print the reply without posting it
    Resolve {
        /// Comma-separated references, e.g. "zip, re.search, pep-8"
        references: String,

        /// Reference table (JSON)
        #[arg(long, env = "DOCS_BOT_DATASTORE", default_value = "datastore/datastore.json")]
        datastore: PathBuf,

        /// Serve documentation links from this host instead of python.org
        #[arg(long, env = "DOCS_BOT_DOCS_HOST")]
        docs_host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Run {
            subreddit,
            trigger,
            datastore,
            docs_host,
            credentials,
            max_restarts,
            include_existing,
        } => {
            let config = BotConfig {
                subreddit,
                trigger,
                datastore_path: datastore,
                docs_host,
                credentials_path: credentials,
                skip_existing: !include_existing,
                retry: RetryPolicy {
                    max_restarts,
                    ..RetryPolicy::default()
                },
            };
            run(config).await
        }
        Commands::Resolve {
            references,
            datastore,
            docs_host,
        } => run_resolve(&references, &datastore, docs_host.as_deref()).await,
    }
}

fn init_tracing(verbose: bool, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("docs_bot=debug,py_docs_bot=debug,info")
        } else {
            EnvFilter::new("docs_bot=info,py_docs_bot=info,warn")
        }
    });

    if json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

fn build_resolver(datastore: &Path, docs_host: Option<&str>) -> Result<DocsResolver> {
    let table = ReferenceTable::load(datastore)
        .with_context(|| format!("Could not open reference table {}", datastore.display()))?;
    let prober: Arc<dyn Prober> = Arc::new(HttpProber::new(USER_AGENT)?);
    let table = Arc::new(table);
    Ok(match docs_host {
        Some(host) => DocsResolver::with_urls(table, prober, DocsUrls::with_host(host)),
        None => DocsResolver::new(table, prober),
    })
}

async fn run(config: BotConfig) -> Result<()> {
    let resolver = build_resolver(&config.datastore_path, config.docs_host.as_deref())?;
    let credentials = Credentials::load(&config.credentials_path)
        .context("No credentials found in credentials file or environment, exiting")?;

    let bot = DocsBot::new(CommandParser::new(&config.trigger), resolver);
    let reddit = Arc::new(RedditClient::new(credentials, USER_AGENT)?);

    tracing::info!(
        subreddit = %config.subreddit,
        trigger = %config.trigger,
        skip_existing = config.skip_existing,
        max_restarts = config.retry.max_restarts,
        "Python Documentation Bot is starting up"
    );

    let bot = &bot;
    let subreddit = config.subreddit.as_str();
    let supervisor = Supervisor::new(config.retry.clone());
    let exit = supervisor
        .run_until(
            || {
                let reddit = Arc::clone(&reddit);
                let mut stream = reddit.comment_stream(subreddit, config.skip_existing);
                async move { bot.monitor(&mut stream, reddit.as_ref()).await }
            },
            shutdown_signal(),
        )
        .await?;

    match exit {
        Exit::Shutdown => tracing::info!("Shut down on interrupt"),
        Exit::Completed => tracing::warn!("Comment stream ended"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for interrupt, running until killed");
        std::future::pending::<()>().await;
    }
}

async fn run_resolve(references: &str, datastore: &Path, docs_host: Option<&str>) -> Result<()> {
    let resolver = build_resolver(datastore, docs_host)?;

    let parser = CommandParser::default();
    let Some(command) = parser.parse(&format!("{} {references}", parser.trigger())) else {
        println!("{}", "No references given".yellow());
        return Ok(());
    };

    let results = resolver.resolve_all(&command.references).await?;
    match format_reply(&results) {
        Some(reply) => println!("{reply}"),
        None => println!(
            "{} {}",
            "No documentation found for:".yellow(),
            command.references.join(", ")
        ),
    }

    Ok(())
}
