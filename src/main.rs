use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;

use mana_tools::cli::{CliArgs, Command, CompressionLevel, PurgeArgs, ReorganizeArgs};
use mana_tools::config::ToolsConfig;
use mana_tools::ledger::{PurgeOptions, parse_cutoff, purge_folder};
use mana_tools::output::save_png;
use mana_tools::sprite::{SheetLayout, load_sheet, reorganize};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match cli.command {
        Command::Purge(args) => run_purge(&args),
        Command::Reorganize(args) => run_reorganize(&args),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[allow(clippy::print_stdout)]
fn run_purge(args: &PurgeArgs) -> Result<()> {
    let config = ToolsConfig::load_optional(args.config.as_deref())?;
    init_logging(args.verbose);

    let cutoff = parse_cutoff(&args.date)?;
    let options = merge_purge_options(args, &config);

    let report = purge_folder(&args.folder, cutoff, &options)?;
    report.log_summary();

    if args.json {
        println!("{}", report.to_json()?);
    }

    Ok(())
}

fn run_reorganize(args: &ReorganizeArgs) -> Result<()> {
    let config = ToolsConfig::load_optional(args.config.as_deref())?;
    init_logging(args.verbose);

    let layout = merge_sheet_layout(args, &config);
    let compress = merge_compress(args, &config)?;

    let sheet = load_sheet(&args.source)?;
    let result = reorganize(&sheet, &layout)?;

    info!(
        "{}: width=\"{}\" height=\"{}\"",
        args.source.display(),
        result.crop.width,
        result.crop.height
    );

    save_png(&result.image, &args.target, compress)?;
    info!("Saved {}", args.target.display());

    Ok(())
}

/// CLI > config > default
fn merge_purge_options(args: &PurgeArgs, config: &ToolsConfig) -> PurgeOptions {
    PurgeOptions {
        account_file: args
            .account_file
            .clone()
            .unwrap_or_else(|| config.purge.account_file.clone()),
        character_file: args
            .character_file
            .clone()
            .unwrap_or_else(|| config.purge.character_file.clone()),
        output_suffix: config.purge.output_suffix.clone(),
        server_account_type: config.purge.server_account_type.clone(),
    }
}

/// CLI > config > default
fn merge_sheet_layout(args: &ReorganizeArgs, config: &ToolsConfig) -> SheetLayout {
    let sheet = &config.sheet;
    SheetLayout {
        cell_width: args.cell_width.unwrap_or(sheet.cell_width),
        cell_height: args.cell_height.unwrap_or(sheet.cell_height),
        directions: args.directions.unwrap_or(sheet.directions),
        frames: args.frames.unwrap_or(sheet.frames),
        transparent_key: sheet.transparent_key,
    }
}

fn merge_compress(args: &ReorganizeArgs, config: &ToolsConfig) -> Result<Option<CompressionLevel>> {
    if args.compress.is_some() {
        return Ok(args.compress);
    }

    config
        .sheet
        .compress
        .as_ref()
        .map(|c| {
            c.level()
                .map_err(|e| anyhow!("invalid compress value in config file: {}", e))
        })
        .transpose()
}
