//! CLI administration tool for alias-shortener.
//!
//! Issues bearer tokens and manages aliases directly in the database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a bearer token for user 42, valid for 24 hours
//! cargo run --bin admin -- token issue --uid 42
//!
//! # Bind a URL to a generated or chosen alias
//! cargo run --bin admin -- alias add https://example.com --alias docs
//!
//! # Look up and delete an alias
//! cargo run --bin admin -- alias resolve docs
//! cargo run --bin admin -- alias delete docs
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `APP_SECRET`: required by `token` commands
//! - `DATABASE_URL`: required by `alias`, `stats` and `db` commands

use alias_shortener::application::services::{AliasService, ServiceError, TokenVerifier};
use alias_shortener::infrastructure::persistence::PgAliasRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing alias-shortener.
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
    /// Issue bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a signed bearer token
    Issue {
        /// User id carried in the `uid` claim
        #[arg(short, long)]
        uid: i64,

        /// Validity in hours
        #[arg(short, long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

/// Alias management subcommands.
#[derive(Subcommand)]
enum AliasAction {
    /// Bind a URL to an alias
    Add {
        /// Target URL
        url: String,

        /// Alias to use (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Print the URL bound to an alias
    Resolve { alias: String },

    /// Delete an alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
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
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Alias { action } => handle_alias_action(action, &connect().await?).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Signs a bearer token with `APP_SECRET`.
fn handle_token_action(action: TokenAction) -> Result<()> {
    let TokenAction::Issue { uid, ttl_hours } = action;

    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive, got {}", ttl_hours);
    }
    let ttl = chrono::TimeDelta::try_hours(ttl_hours)
        .with_context(|| format!("--ttl-hours is out of range, got {}", ttl_hours))?;

    let secret = std::env::var("APP_SECRET").context("APP_SECRET must be set")?;
    let token = TokenVerifier::new(&secret)
        .issue(uid, ttl)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("{}", "🔑 Bearer token issued".bright_blue().bold());
    println!();
    println!("  UID:     {}", uid.to_string().cyan());
    println!("  Expires: in {} hours", ttl_hours.to_string().cyan());
    println!("  Token:   {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches alias management commands.
async fn handle_alias_action(action: AliasAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAliasRepository::new(Arc::new(pool.clone())));
    let service = AliasService::new(repo);

    match action {
        AliasAction::Add { url, alias } => match service.create(&url, alias.as_deref()).await {
            Ok(created) => {
                println!("{}", "✅ Alias created".green().bold());
                println!("  ID:    {}", created.id.to_string().bright_black());
                println!("  Alias: {}", created.alias.cyan());
                println!("  URL:   {}", url.bright_white());
            }
            Err(ServiceError::AliasExists) => {
                println!("{}", "⚠️  Alias already exists".yellow());
            }
            Err(e) => return Err(anyhow::anyhow!("Failed to add alias: {}", e)),
        },
        AliasAction::Resolve { alias } => match service.resolve(&alias).await {
            Ok(url) => println!("  {} → {}", alias.cyan(), url.bright_white()),
            Err(ServiceError::NotFound) => println!("{}", "⚠️  Alias not found".yellow()),
            Err(e) => return Err(anyhow::anyhow!("Failed to resolve alias: {}", e)),
        },
        AliasAction::Delete { alias, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete alias '{}'?", alias))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            match service.delete(&alias).await {
                Ok(()) => println!("{}", "✅ Alias deleted".green().bold()),
                Err(ServiceError::NotFound) => println!("{}", "⚠️  Alias not found".yellow()),
                Err(e) => return Err(anyhow::anyhow!("Failed to delete alias: {}", e)),
            }
        }
    }

    println!();

    Ok(())
}

/// Displays the number of stored aliases.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let aliases_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(pool)
        .await?;

    println!(
        "  Aliases: {}",
        aliases_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_issue_rejects_out_of_range_ttl() {
        let action = TokenAction::Issue {
            uid: 1,
            ttl_hours: i64::MAX,
        };

        assert!(handle_token_action(action).is_err());
    }

    #[test]
    fn test_token_issue_rejects_non_positive_ttl() {
        let action = TokenAction::Issue {
            uid: 1,
            ttl_hours: 0,
        };

        assert!(handle_token_action(action).is_err());
    }
}
