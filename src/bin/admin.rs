//! CLI administration tool for splitlink.
//!
//! Works directly on the JSON data file, without the HTTP server running.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link with its routing configuration
//! cargo run --bin admin -- links show spring-sale
//!
//! # Daily clicks for the last 7 days
//! cargo run --bin admin -- stats spring-sale --days 7
//!
//! # Backup and restore
//! cargo run --bin admin -- export --output backup.json
//! cargo run --bin admin -- import backup.json
//!
//! # Delete everything
//! cargo run --bin admin -- clear
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_FILE` (required): JSON data file
//! - `DEFAULT_DOMAIN`, `PUBLIC_SCHEME`: same meaning as for the server
//!
//! The server keeps its own copy of the data in memory. Stop it before
//! running `import` or `clear`, or the next write from the server will
//! overwrite the change.

use splitlink::config::Config;
use splitlink::domain::analytics::DEFAULT_CHART_DAYS;
use splitlink::prelude::*;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing splitlink data.
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
    /// Inspect links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show click statistics for a short code
    Stats {
        /// Short code
        code: String,

        /// Number of days of history to show
        #[arg(short, long, default_value_t = DEFAULT_CHART_DAYS)]
        days: u32,
    },

    /// Export all links and settings as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with the contents of an export file
    Import {
        /// Export file to read
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete all links and reset settings
    Clear {
        /// Skip confirmation prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Link inspection subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List all links
    List,

    /// Show one link by short code
    Show {
        /// Short code
        code: String,
    },
}

/// Services built on top of the data file.
struct Admin {
    store: Arc<JsonStore>,
    links: LinkService<JsonStore, JsonStore>,
    stats: StatsService<JsonStore>,
    backup: BackupService<JsonStore>,
}

impl Admin {
    async fn open(config: &Config) -> Result<Self> {
        let path = config
            .data_file
            .as_ref()
            .context("DATA_FILE must be set")?;

        let store = Arc::new(
            JsonStore::open(path, config.default_settings())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?,
        );

        Ok(Self {
            links: LinkService::new(store.clone(), store.clone(), config.public_scheme.as_str()),
            stats: StatsService::new(store.clone()),
            backup: BackupService::new(store.clone(), config.default_settings()),
            store,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let admin = Admin::open(&config).await?;

    match cli.command {
        Commands::Links { action } => match action {
            LinksAction::List => list_links(&admin).await?,
            LinksAction::Show { code } => show_link(&admin, &code).await?,
        },
        Commands::Stats { code, days } => show_stats(&admin, &code, days).await?,
        Commands::Export { output } => export(&admin, output).await?,
        Commands::Import { file, yes } => import(&admin, file, yes).await?,
        Commands::Clear { yes } => clear(&admin, yes).await?,
    }

    Ok(())
}

/// Lists all links with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code         Clicks   Created            Status    Destination
///   ────────────────────────────────────────────────────────────────
///   spring-sale  42       2024-01-15 10:30   ACTIVE    https://example.com/
/// ```
async fn list_links(admin: &Admin) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = admin
        .links
        .get_all_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<16} {:<8} {:<18} {:<9} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in &links {
        let status = if link.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        let destination = if link.variants().is_some() {
            format!("{} (A/B)", link.original_url)
        } else {
            link.original_url.clone()
        };

        println!(
            "  {:<16} {:<8} {:<18} {:<9} {}",
            link.short_code.cyan(),
            link.stats.total_clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            destination
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints one link with its short URL, UTM parameters and A/B variants.
async fn show_link(admin: &Admin, code: &str) -> Result<()> {
    let link = admin
        .links
        .get_link_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load link: {}", e))?
        .context("Link not found")?;

    let short_url = admin
        .links
        .get_short_url(&link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build short URL: {}", e))?;

    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  Code:        {}", link.short_code.cyan());
    println!("  Short URL:   {}", short_url.bright_yellow());
    println!("  Destination: {}", link.original_url);
    println!("  ID:          {}", link.id.bright_black());
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Status:      {}",
        if link.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        }
    );
    if let Some(domain) = &link.custom_domain {
        println!("  Domain:      {}", domain);
    }

    if let Some(utm) = link.utm_params.as_ref().filter(|u| !u.is_empty()) {
        println!();
        println!("{}", "  UTM parameters:".bright_white().bold());
        for (name, value) in utm.pairs() {
            println!("    {:<14} {}", name, value);
        }
    }

    if let Some(variants) = link.variants() {
        println!();
        println!("{}", "  A/B variants:".bright_white().bold());
        for variant in variants {
            println!("    {:>6.2}%  {}", variant.weight, variant.url);
        }
    }

    println!();
    println!(
        "  Clicks: {} total, {} in the last 24h",
        link.stats.total_clicks.to_string().bright_green().bold(),
        link.stats.clicks_24h.to_string().bright_green()
    );
    println!();

    Ok(())
}

/// Displays click totals and a daily bar chart.
async fn show_stats(admin: &Admin, code: &str, days: u32) -> Result<()> {
    let days = days.clamp(1, 365);

    let view = admin
        .stats
        .get_chart_stats(code, days)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load stats: {}", e))?
        .context("Link not found")?;

    println!("{} {}", "📊 Statistics for".bright_blue().bold(), code.cyan());
    println!();
    println!(
        "  Total clicks:    {}",
        view.total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Last 24 hours:   {}",
        view.clicks_24h.to_string().bright_green().bold()
    );
    println!();

    let max = view.history.iter().map(|d| d.count).max().unwrap_or(0).max(1);
    for day in &view.history {
        let width = (day.count * 40 / max) as usize;
        println!(
            "  {}  {:>6}  {}",
            day.date.format("%Y-%m-%d").to_string().bright_black(),
            day.count,
            "█".repeat(width).green()
        );
    }
    println!();

    Ok(())
}

/// Writes the export document to a file or stdout.
async fn export(admin: &Admin, output: Option<PathBuf>) -> Result<()> {
    let json = admin
        .backup
        .export_json()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to export: {}", e))?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {}",
                "✅ Exported to".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Replaces all data with an export file after confirmation.
async fn import(admin: &Admin, file: PathBuf, skip_confirm: bool) -> Result<()> {
    println!("{}", "📥 Import".bright_blue().bold());
    println!();

    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!(
        "  Current links: {}",
        admin.store.link_count().await.to_string().bright_white()
    );
    println!(
        "{}",
        "⚠️  Imported data replaces the current data".yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Import this file?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let summary = admin
        .backup
        .import_json(&text)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to import: {}", e))?;

    println!();
    println!("{}", "✅ Import complete!".green().bold());
    if summary.links_replaced {
        println!("  Links:    {}", summary.links.to_string().bright_green());
    }
    if summary.settings_replaced {
        println!("  Settings: {}", "replaced".bright_green());
    }
    println!();

    Ok(())
}

/// Deletes all links and resets settings, asking twice.
async fn clear(admin: &Admin, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Clear all data".bright_blue().bold());
    println!();
    println!(
        "  Links to delete: {}",
        admin.store.link_count().await.to_string().bright_white()
    );
    println!();

    if !skip_confirm {
        let first = Confirm::new()
            .with_prompt("Delete all links and statistics?")
            .default(false)
            .interact()?;

        if !first {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }

        let second = Confirm::new()
            .with_prompt("This cannot be undone. Are you absolutely sure?")
            .default(false)
            .interact()?;

        if !second {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    admin
        .backup
        .clear_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear data: {}", e))?;

    println!("{}", "✅ All data deleted".green().bold());
    println!();

    Ok(())
}
