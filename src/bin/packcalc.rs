//! Command-line pack calculator.
//!
//! Runs the same pack service as the HTTP server, limits included, without
//! starting a server.
//!
//! # Usage
//!
//! ```bash
//! # Calculate packs with the default sizes
//! cargo run --bin packcalc -- solve 12001
//!
//! # Custom pack sizes
//! cargo run --bin packcalc -- solve 500000 --sizes 23,31,53
//!
//! # Print the API response shape
//! cargo run --bin packcalc -- solve 251 --json
//!
//! # Show default pack sizes
//! cargo run --bin packcalc -- sizes
//! ```
//!
//! # Environment Variables
//!
//! - `PACK_SIZES` (optional): default sizes, same format as the server
//! - `MAX_ITEMS`, `MAX_PACK_SIZE`, `MAX_PACK_SIZE_COUNT` (optional): request
//!   limits, same defaults as the server

use pack_calculator::api::dto::calculate::CalculateResponse;
use pack_calculator::application::services::PackService;
use pack_calculator::config::{self, Config};
use pack_calculator::domain::entities::{PackSizes, ShipmentPlan};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;

/// CLI tool for calculating shipment packs.
#[derive(Parser)]
#[command(name = "packcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the packs to ship for an order
    Solve {
        /// Number of items ordered (prompted if omitted)
        #[arg(allow_negative_numbers = true)]
        items: Option<i64>,

        /// Comma-separated pack sizes (defaults to PACK_SIZES or built-in sizes)
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        sizes: Vec<i64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the default pack sizes
    Sizes,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { items, sizes, json } => handle_solve(items, sizes, json)?,
        Commands::Sizes => handle_sizes()?,
    }

    Ok(())
}

/// Solves an order and prints the plan.
fn handle_solve(items: Option<i64>, sizes: Vec<i64>, json: bool) -> Result<()> {
    let items = match items {
        Some(n) => n,
        None => Input::<i64>::new()
            .with_prompt("Items ordered")
            .interact_text()?,
    };

    let config = config::load_from_env()?;
    let plan = calculate(&config, items, sizes)?;

    if json {
        let response = CalculateResponse::from(plan);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

/// Runs an order through the configured [`PackService`].
///
/// An empty `sizes` selects the configured default sizes.
fn calculate(config: &Config, items: i64, sizes: Vec<i64>) -> Result<ShipmentPlan> {
    let service = PackService::from_config(config);
    let sizes = (!sizes.is_empty()).then_some(sizes);

    service
        .calculate(items, sizes)
        .context("Calculation failed")
}

/// Prints a plan as a table.
///
/// # Output Format
///
/// ```text
/// 📦 Shipment for 12001 items
///
///   Pack size   Count
///   ───────────────────
///   5000        2
///   2000        1
///   250         1
///
///   Shipped: 12250 (surplus 249) in 4 packs
/// ```
fn print_plan(plan: &ShipmentPlan) {
    println!(
        "{}",
        format!("📦 Shipment for {} items", plan.items_ordered)
            .bright_blue()
            .bold()
    );
    println!();
    println!(
        "  {:<11} {:<6}",
        "Pack size".bright_white().bold(),
        "Count".bright_white().bold()
    );
    println!("  {}", "─".repeat(19).bright_black());

    for (size, count) in plan.packs.iter().rev() {
        println!("  {:<11} {:<6}", size.to_string().cyan(), count);
    }

    println!();

    let surplus = if plan.surplus() == 0 {
        "no surplus".green()
    } else {
        format!("surplus {}", plan.surplus()).yellow()
    };

    println!(
        "  Shipped: {} ({}) in {} packs",
        plan.items_shipped.to_string().bright_yellow().bold(),
        surplus,
        plan.total_packs
    );
}

/// Prints the normalized default pack sizes.
fn handle_sizes() -> Result<()> {
    let raw = Config::load_pack_sizes()?;
    let sizes = PackSizes::new(&raw).context("PACK_SIZES is invalid")?;

    println!("{}", "📏 Default pack sizes".bright_blue().bold());
    println!();
    println!("  {}", sizes.to_string().cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_with_defaults() {
        let plan = calculate(&Config::default(), 12_001, vec![]).unwrap();

        assert_eq!(plan.items_shipped, 12_250);
        assert_eq!(plan.count_of(5000), 2);
        assert_eq!(plan.count_of(2000), 1);
        assert_eq!(plan.count_of(250), 1);
    }

    #[test]
    fn test_calculate_with_custom_sizes() {
        let plan = calculate(&Config::default(), 263, vec![23, 31, 53]).unwrap();

        assert_eq!(plan.items_shipped, 263);
    }

    #[test]
    fn test_calculate_rejects_oversized_order() {
        let err = calculate(&Config::default(), 3_000_000_000, vec![250]).unwrap_err();

        assert!(format!("{err:#}").contains("items must be <= 1000000"));
    }

    #[test]
    fn test_calculate_rejects_oversized_pack() {
        let err = calculate(&Config::default(), 1, vec![3_000_000_000]).unwrap_err();

        assert!(format!("{err:#}").contains("pack sizes must be <= 1000000"));
    }

    #[test]
    fn test_calculate_follows_configured_limits() {
        let config = Config {
            max_items: 100,
            ..Config::default()
        };

        assert!(calculate(&config, 100, vec![]).is_ok());
        assert!(calculate(&config, 101, vec![]).is_err());
    }
}
