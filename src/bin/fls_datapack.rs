//! FLS data pack build entry point
//!
//! Running with no arguments builds `output/` and the hashed zip inside it.
//! Prints the build report as JSON to stdout.
//! Returns non-zero on any failure.

use clap::Parser;
use log::{error, info, LevelFilter};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use fls_datapack::{BuildConfig, BuildError, BuildPipeline, Palette, BUILDER_VERSION};

#[derive(Parser)]
#[command(name = "fls-datapack")]
#[command(about = "Build the FLS data pack and its content-hashed zip", version)]
struct Cli {
    /// JSON build config; flags below take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pack output directory (wiped on every build)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Archive file name before the digest is added
    #[arg(long)]
    archive_name: Option<String>,

    /// Honeycomb block loot table to copy instead of the bundled one
    #[arg(long)]
    loot_table: Option<PathBuf>,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn build_config(&self) -> Result<BuildConfig, BuildError> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(name) = &self.archive_name {
            config.archive_name = name.clone();
        }
        if let Some(path) = &self.loot_table {
            config.loot_table_source = Some(path.clone());
        }
        Ok(config)
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), BuildError> {
    let config = cli.build_config()?;
    info!("fls-datapack {} building into {}", BUILDER_VERSION, config.output_dir.display());

    let report = BuildPipeline::new(config, Palette::standard()).run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
