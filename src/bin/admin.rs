//! CLI administration tool for shorturl.
//!
//! Provides schema setup, link inspection and deletion, and counters without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create or upgrade the schema
//! cargo run --bin admin -- db migrate
//!
//! # Most visited links
//! cargo run --bin admin -- stats --top 20
//!
//! # Delete a link
//! cargo run --bin admin -- links delete aB3xYz
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server: `DATABASE_URL`, or `DB_HOST`,
//! `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.

use shorturl::application::services::LinkService;
use shorturl::config::{Config, mask_connection_string};
use shorturl::domain::entities::ShortLink;
use shorturl::infrastructure::database;
use shorturl::infrastructure::persistence::PgShortLinkRepository;
use shorturl::AppError;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type Service = LinkService<PgShortLinkRepository>;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and delete short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show link and access counters
    Stats {
        /// Number of most visited links to show
        #[arg(long, default_value_t = 10)]
        top: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links, most visited first
    List {
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// Delete a link by its short code
    Delete {
        code: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = PgPool::connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&config.database_url)
            )
        })?;

    let service = LinkService::new(Arc::new(PgShortLinkRepository::new(Arc::new(
        pool.clone(),
    ))));

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &service).await?,
        Commands::Stats { top } => handle_stats(top, &service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_links_action(action: LinksAction, service: &Service) -> Result<()> {
    match action {
        LinksAction::List { limit } => list_links(service, limit).await,
        LinksAction::Delete { code, yes } => delete_link(service, code, yes).await,
    }
}

/// Lists links as a table.
///
/// ```text
///   ID    Code       Hits      Created            URL
///   ────────────────────────────────────────────────────────────
///   1     aB3xYz     42        2025-01-15 10:30   https://example.com
/// ```
async fn list_links(service: &Service, limit: i64) -> Result<()> {
    println!("{}", "Short links".bright_blue().bold());
    println!();

    let links = service
        .most_accessed(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    print_link_table(&links);

    let total = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    println!();
    println!(
        "  Showing {} of {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &Service, code: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete short link".bright_blue().bold());
    println!();

    let link = match service.get(&code).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("  No link with code '{code}'").yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  Code:  {}", link.code.cyan());
    println!("  URL:   {}", link.url);
    println!("  Hits:  {}", link.access_count.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(&link.code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays totals and the most visited links.
async fn handle_stats(top: i64, service: &Service) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let accesses = service
        .total_accesses()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to sum accesses: {}", e))?;

    println!(
        "  Links:     {}",
        links_count.to_string().bright_green().bold()
    );
    println!("  Accesses:  {}", accesses.to_string().bright_green().bold());
    println!();

    let links = service
        .most_accessed(top)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    if !links.is_empty() {
        println!("{}", "Most visited".bright_white().bold());
        print_link_table(&links);
        println!();
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            database::migrate(pool).await?;

            println!("{}", "Schema is up to date".green().bold());
        }
    }

    Ok(())
}

fn print_link_table(links: &[ShortLink]) {
    println!(
        "  {:<6} {:<10} {:<9} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Hits".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in links {
        println!(
            "  {:<6} {:<10} {:<9} {:<18} {}",
            link.id.to_string().bright_black(),
            link.code.cyan(),
            link.access_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            truncate(&link.url, 60)
        );
    }
}

/// Shortens long URLs for table display.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{head}…")
}
