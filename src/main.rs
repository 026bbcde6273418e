// This is the command line entry point for the image converter.
// The lib.rs file serves as the public API for embedding the converter.

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use image_converter_lib::{
    AppState, ConversionRequest, Locator, ProcessStatus, Settings, TargetFormat,
    convert_images, scan_directory, watch_progress,
};

#[derive(Debug, Parser)]
#[command(name = "image-converter")]
#[command(about = "Batch resize and re-encode the images in a directory", long_about = None)]
struct Cli {
    /// Settings file remembering the last directory and output folder
    #[arg(long, global = true, default_value = "image-converter.json")]
    settings: PathBuf,

    /// Log every file instead of only the run summary
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the images a conversion would pick up
    Scan {
        /// Source directory, defaults to the last one used
        dir: Option<String>,
    },
    /// Convert every image in a directory into an output subfolder
    Convert {
        /// Source directory, defaults to the last one used
        dir: Option<String>,
        /// PNG, JPEG, WEBP, WEBP_LOSSY or WEBP_LOSSLESS
        #[arg(short, long, default_value = "PNG")]
        format: TargetFormat,
        /// 0-100, only used by lossy formats
        #[arg(short, long, default_value_t = 100)]
        quality: u8,
        /// Target width, 0 keeps the original size
        #[arg(long, default_value_t = 0)]
        width: u32,
        /// Target height, 0 keeps the original size
        #[arg(long, default_value_t = 0)]
        height: u32,
        /// Output subfolder name, defaults to the remembered one
        #[arg(short, long)]
        output_folder: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn resolve_source(dir: Option<String>, settings: &Settings) -> Result<Locator> {
    dir.map(Locator::from)
        .or_else(|| settings.source_directory.clone())
        .context("No source directory given and none remembered")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load(&cli.settings)?;
    debug!("Loaded settings: {:?}", settings);
    let state = AppState::default();

    match cli.command {
        Commands::Scan { dir } => {
            let source = resolve_source(dir, &settings)?;
            let records = scan_directory(state, source.clone()).await?;
            for record in &records {
                println!("{:>12}  {}", record.size, record.name);
            }
            println!("{} images in {}", records.len(), source);

            settings.source_directory = Some(source);
        }
        Commands::Convert { dir, format, quality, width, height, output_folder } => {
            let source = resolve_source(dir, &settings)?;
            let output_folder = output_folder.unwrap_or_else(|| settings.target_folder_name.clone());

            scan_directory(state.clone(), source.clone()).await?;

            let request = ConversionRequest::new(source.clone(), format)
                .with_output_folder(output_folder.clone())
                .with_quality(quality)
                .with_size(width, height);

            // Subscribe before the run starts so no progress event is missed
            let reporter = tokio::spawn(watch_progress(state.store().subscribe(), |progress| {
                println!(
                    "[{:>3}%] {}/{}",
                    progress.percentage(),
                    progress.completed,
                    progress.total
                );
            }));
            let summary = match convert_images(state.clone(), request).await {
                Ok(summary) => {
                    // The run always ends with RunningChanged(false), let the reporter drain
                    reporter.await?;
                    summary
                }
                Err(e) => {
                    // Rejected runs may never publish RunningChanged
                    reporter.abort();
                    return Err(e.into());
                }
            };

            for record in state.store().records() {
                if let ProcessStatus::Error(cause) = &record.status {
                    println!("FAILED  {}: {}", record.name, cause);
                }
            }
            info!(
                "{} converted, {} failed, output in {}",
                summary.succeeded, summary.failed, summary.output_dir
            );

            settings.source_directory = Some(source);
            settings.target_folder_name = output_folder;
        }
    }

    settings.save(&cli.settings)?;
    Ok(())
}
