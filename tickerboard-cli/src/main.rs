//! Tickerboard CLI: headless access to the board.
//!
//! Commands:
//! - `snapshot`: seed a board, apply ticks, print the sorted visible table
//! - `export`: write a selection of records as CSV
//! - `config init`: write the default TOML config

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tickerboard_core::export;
use tickerboard_core::format::{
    format_compact_currency, format_currency, format_market_cap, format_pe_ratio,
    format_signed_percentage, format_volume,
};
use tickerboard_core::{
    Board, BoardConfig, SectorFilter, SortDirection, SortField, SortSpec, StockRecord,
};

const LOG_ENV: &str = "TICKERBOARD_LOG";

#[derive(Parser)]
#[command(name = "tickerboard", about = "Tickerboard CLI: synthetic stock watchlist")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds a board.
#[derive(clap::Args, Debug, Clone)]
struct BoardArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generator seed, overriding the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to apply before output.
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Case-insensitive name/symbol filter.
    #[arg(long)]
    search: Option<String>,

    /// Sector filter: a sector label or "all".
    #[arg(long)]
    sector: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the visible records as a table.
    Snapshot {
        #[command(flatten)]
        board: BoardArgs,

        /// Sort field (symbol, name, price, change, percentChange, volume,
        /// marketCap, peRatio, oneDayChange).
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending.
        #[arg(long, default_value_t = false)]
        desc: bool,

        /// Emit the visible records as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write selected records to a CSV file.
    Export {
        #[command(flatten)]
        board: BoardArgs,

        /// Output file.
        #[arg(long)]
        out: PathBuf,

        /// Symbols to select.
        #[arg(long, num_args = 1..)]
        select: Vec<String>,

        /// Select every visible record.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Config file commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config as TOML.
    Init {
        /// Destination file. Prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Snapshot {
            board,
            sort,
            desc,
            json,
        } => run_snapshot(&board, sort.as_deref(), desc, json),
        Commands::Export {
            board,
            out,
            select,
            all,
        } => run_export(&board, &out, &select, all),
        Commands::Config { action } => match action {
            ConfigAction::Init { out, force } => run_config_init(out.as_deref(), force),
        },
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| default.to_string());
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .try_init();
}

/// Seed a board from the shared options, tick it and apply the filters.
fn build_board(args: &BoardArgs) -> Result<Board> {
    let mut config = match &args.config {
        Some(path) => BoardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BoardConfig::default(),
    };
    if args.seed.is_some() {
        config.board.seed = args.seed;
    }

    let mut board = Board::new(&config);
    for _ in 0..args.ticks {
        board.apply_tick();
    }
    debug!(ticks = args.ticks, "ticks applied");

    if let Some(term) = &args.search {
        board.set_search(term);
    }
    if let Some(label) = &args.sector {
        let sector: SectorFilter = label.parse()?;
        board.set_sector(sector);
    }
    Ok(board)
}

fn parse_sort(field: Option<&str>, desc: bool) -> Result<SortSpec> {
    let Some(label) = field else {
        return Ok(SortSpec::default());
    };
    let Some(field) = SortField::from_label(label) else {
        let valid: Vec<&str> = SortField::ALL.iter().map(|f| f.label()).collect();
        bail!("unknown sort field '{label}'. Valid: {}", valid.join(", "));
    };
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    Ok(SortSpec::new(field, direction))
}

fn run_snapshot(args: &BoardArgs, sort: Option<&str>, desc: bool, json: bool) -> Result<()> {
    let mut board = build_board(args)?;
    board.set_sort(parse_sort(sort, desc)?);

    let view = board.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "Snapshot at {} ({} ticks, sort: {})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        args.ticks,
        board.sort_spec()
    );
    println!();
    println!("{}", table_header());
    println!("{}", "-".repeat(table_header().chars().count()));
    for record in &view {
        println!("{}", table_row(record));
    }

    let summary = board.summary();
    println!();
    println!(
        "Showing {}/{}  gainers {}  losers {}  unchanged {}  traded {}",
        summary.visible,
        summary.total,
        summary.gainers,
        summary.losers,
        summary.unchanged,
        format_compact_currency(summary.traded_value)
    );
    Ok(())
}

fn table_header() -> String {
    format!(
        "{:<6} {:<26} {:>10} {:>9} {:>8} {:>8} {:>9} {:>7} {:<11}",
        "Symbol", "Name", "Price", "Change", "% Chg", "Volume", "Mkt Cap", "P/E", "Sector"
    )
}

fn table_row(record: &StockRecord) -> String {
    let name: String = record.name.chars().take(26).collect();
    format!(
        "{:<6} {:<26} {:>10} {:>9} {:>8} {:>8} {:>9} {:>7} {:<11}",
        record.symbol,
        name,
        format_currency(record.price),
        format_currency(record.change),
        format_signed_percentage(record.percent_change),
        format_volume(record.volume),
        format_market_cap(record.market_cap),
        format_pe_ratio(record.pe_ratio),
        record.sector,
    )
}

fn run_export(args: &BoardArgs, out: &Path, select: &[String], all: bool) -> Result<()> {
    let mut board = build_board(args)?;

    if all {
        board.select_all(true);
    }
    for symbol in select {
        if board.get(symbol).is_none() {
            bail!("no record with symbol '{symbol}' on the board");
        }
        board.toggle_select(symbol, true);
    }
    if board.selected_count() == 0 {
        bail!("nothing selected; pass --select SYMBOL... or --all");
    }

    let rows = export::write_selection_csv(out, board.records(), board.controller().selection())?;
    info!(rows, path = %out.display(), "export finished");
    println!("Exported {rows} row(s) to {}", out.display());
    Ok(())
}

fn run_config_init(out: Option<&Path>, force: bool) -> Result<()> {
    let toml = BoardConfig::default().to_toml()?;
    match out {
        None => print!("{toml}"),
        Some(path) => {
            if path.exists() && !force {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, toml)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
