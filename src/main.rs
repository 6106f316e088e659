use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use tag_ledger::cli::{
    handle_credits_command, handle_series_command, handle_tags_command, CliContext, CreditsArgs,
    SeriesArgs,
};
use tag_ledger::config::{paths::LedgerPaths, settings::Settings};
use tag_ledger::logging;

#[derive(Parser)]
#[command(
    name = "tagledger",
    author = "Kaylee Beyene",
    version,
    about = "Tag credit allowances and period reports for a personal ledger",
    long_about = "tagledger reads a ledger snapshot of tagged transactions and reports \
                  how much of each tag's yearly, monthly or weekly credit allowance has \
                  been used, along with per-period totals for charting."
)]
struct Cli {
    /// Snapshot document to read (.json, .yaml or .yml)
    #[arg(long, global = true, env = "TAG_LEDGER_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, default settings and an empty snapshot
    Init,

    /// Show current configuration and paths
    Config,

    /// List tags and their credit settings
    Tags,

    /// Per-period totals of a tag
    Series(SeriesArgs),

    /// Transactions newest first with each tag's running credit
    #[command(alias = "register")]
    Credits(CreditsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let level = match cli.verbose {
        0 => settings.log_level.clone(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };
    logging::init(&level);

    let ctx = CliContext::new(paths, settings, cli.snapshot);

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing tag-ledger at: {}", ctx.paths.base_dir().display());
            ctx.paths.ensure_directories()?;
            if !ctx.paths.is_initialized() {
                ctx.settings.save(&ctx.paths)?;
            }
            if ctx.store()?.create_empty()? {
                println!("Created empty snapshot: {}", ctx.snapshot_path().display());
            } else {
                println!("Snapshot already exists: {}", ctx.snapshot_path().display());
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("tag-ledger Configuration");
            println!("========================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Data directory:   {}", ctx.paths.data_dir().display());
            println!("Snapshot:         {}", ctx.snapshot_path().display());
            println!();
            println!("Settings:");
            println!("  Show credit amount:  {}", ctx.settings.show_credit_amount);
            println!("  Show credit percent: {}", ctx.settings.show_credit_percent);
            println!("  Currency symbol:     {}", ctx.settings.currency_symbol);
            println!("  Date format:         {}", ctx.settings.date_format);
            println!("  Log level:           {}", ctx.settings.log_level);
        }
        Some(Commands::Tags) => handle_tags_command(&ctx)?,
        Some(Commands::Series(args)) => handle_series_command(&ctx, args)?,
        Some(Commands::Credits(args)) => handle_credits_command(&ctx, args)?,
        None => {
            println!("tagledger - tag credit allowances for a personal ledger");
            println!();
            println!("Run 'tagledger --help' for usage information.");
        }
    }

    Ok(())
}
