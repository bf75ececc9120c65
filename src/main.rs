// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

// Use library instead of local modules
use ideology_trends::{init_logging, load_csv, total, Config, Dashboard, Dataset, Ideology};

/// Leader ideology trends: yearly counts per ideology, in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with `year` and `hog_ideology` columns
    #[arg(short, long, value_name = "FILE", env = "IDEOLOGY_DATA", global = true)]
    data: Option<PathBuf>,

    /// Path to configuration file (defaults to ./ideology-trends.toml if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui,

    /// Print yearly counts for one ideology
    Trend {
        /// Ideology value, e.g. leftist
        ideology: String,

        /// Print the chart figure as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print dataset totals
    Summary,

    /// Write a default ideology-trends.toml to the current directory
    InitConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    match args.command {
        Some(Command::InitConfig) => run_init_config(),
        Some(Command::Trend { ref ideology, json }) => {
            run_trend(&load_dashboard(&args)?, ideology, json)
        }
        Some(Command::Summary) => run_summary(load_dashboard(&args)?.dataset()),
        Some(Command::Tui) | None => run_ui_mode(load_dashboard(&args)?),
    }
}

/// Resolve config, apply `--data`, and read the dataset once.
fn load_dashboard(args: &Args) -> Result<Dashboard> {
    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(ref data) = args.data {
        config.data.path = data.clone();
    }

    let dataset = Arc::new(load_csv(&config.data.path)?);
    Ok(Dashboard::with_default(dataset, config.dashboard.default_ideology))
}

fn run_init_config() -> Result<()> {
    let path = PathBuf::from(ideology_trends::config::DEFAULT_CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let content = Config::default_toml()?;
    std::fs::write(&path, content).context("Failed to write ideology-trends.toml")?;

    println!("✅ Created {} with default settings.", path.display());
    Ok(())
}

fn run_trend(dashboard: &Dashboard, ideology: &str, json: bool) -> Result<()> {
    let (counts, chart) = dashboard.trend(ideology);

    if json {
        let figure = serde_json::to_string_pretty(&chart.to_figure())?;
        println!("{}", figure);
        return Ok(());
    }

    println!("📊 {}", chart.title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if counts.is_empty() {
        println!("No data for '{}'.", ideology);
        return Ok(());
    }

    let max = chart.max_count().max(1);
    println!("{:>6}  {:>5}", chart.x_title, chart.y_title);
    for c in &counts {
        let width = c.count * 40 / max;
        println!("{:>6}  {:>5}  {}", c.year, c.count, "█".repeat(width));
    }
    println!("\nTotal: {} across {} years", total(&counts), counts.len());

    Ok(())
}

fn run_summary(dataset: &Dataset) -> Result<()> {
    println!("🗂️  Dataset: {}", dataset.source);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Records:     {}", dataset.len());
    if let Some((first, last)) = dataset.year_range() {
        println!("Years:       {} - {}", first, last);
    }
    println!("Loaded at:   {}", dataset.loaded_at.to_rfc3339());
    println!("SHA-256:     {}", dataset.fingerprint);

    println!("\nBy ideology:");
    for (ideology, count) in dataset.ideology_totals() {
        let marker = if Ideology::is_recognized(&ideology) { " " } else { "*" };
        let name = if ideology.is_empty() { "(blank)" } else { ideology.as_str() };
        println!("  {}{:<12} {:>7}", marker, name, count);
    }

    let unrecognized = dataset.unrecognized_count();
    if unrecognized > 0 {
        println!("\n* {} records never appear in a chart", unrecognized);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(dashboard: Dashboard) -> Result<()> {
    println!("🖥️  Loading Ideology Trends UI...\n");
    println!("✓ Loaded {} records\n", dashboard.dataset().len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(dashboard);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_dashboard: Dashboard) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin ideology-server --features server");
    std::process::exit(1);
}
