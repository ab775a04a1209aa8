use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use wavestudio::app::{self, AppError, Overrides};
use wavestudio::types::Band;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Grayscale binarization threshold
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Mother wavelet name (haar, db2, db3, db4, sym4, coif1)
    #[arg(long, global = true)]
    wavelet: Option<String>,

    /// Coefficient band used as fingerprint (approximation or details)
    #[arg(long, global = true)]
    band: Option<Band>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two grayscale grids stored as CSV
    Match {
        grid1: PathBuf,
        grid2: PathBuf,
        /// Expected side length of both grids
        hash_size: Option<usize>,
    },
    /// Print the wavelet coefficient bands of every signal in a CSV file
    Decompose {
        csv: PathBuf,
        /// Number of decomposition levels
        #[arg(long)]
        levels: Option<usize>,
    },
}

fn run(args: Args) -> Result<(), AppError> {
    let mut overrides = Overrides {
        threshold: args.threshold,
        wavelet: args.wavelet,
        band: args.band,
        ..Overrides::default()
    };
    match args.command {
        Command::Match {
            grid1,
            grid2,
            hash_size,
        } => {
            overrides.hash_size = hash_size;
            let settings = app::resolve_settings(args.settings.as_deref(), &overrides)?;
            let score = app::match_files(&grid1, &grid2, &settings)?;
            println!("Match = {score:.1}%");
        }
        Command::Decompose { csv, levels } => {
            overrides.levels = levels;
            let settings = app::resolve_settings(args.settings.as_deref(), &overrides)?;
            println!("{}", app::decompose_file(&csv, &settings)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
