use clap::{Parser, Subcommand};
use cli::{ConversionJob, DEFAULT_OUTPUT};
use color_eyre::eyre::{Result, WrapErr};
use geofence::{ConversionSettings, FenceBatch, ImageSource, PipelineBuilder};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Convert image silhouettes into geofence polygons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every image listed in a job file
    Convert {
        /// Path to the TOML or JSON job file
        #[arg(short, long)]
        config: PathBuf,
        /// Output JSON path (overrides the job file)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write a GeoJSON preview (overrides the job file)
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Convert a single image without a job file
    Single {
        /// Path to the input image
        #[arg(short, long)]
        file: PathBuf,
        /// Description used as the fence name prefix
        #[arg(short, long)]
        desc: String,
        /// Meters per image pixel
        #[arg(short, long, default_value = "1.0")]
        scale: f64,
        /// Anchor latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Anchor longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Output JSON path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Luminance threshold
        #[arg(long, default_value = "120")]
        threshold: u8,
        /// Simplification tolerance in pixels
        #[arg(long, default_value = "2.0")]
        tolerance: f64,
        /// Also write a GeoJSON preview
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Print the JSON schema of the job file
    Schema,
    /// Write a starter job file
    Init {
        /// Destination (.toml or .json)
        #[arg(default_value = "geofence.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { config, output, geojson } => {
            let job = ConversionJob::from_file(&config)
                .wrap_err_with(|| format!("Failed to read job file {}", config.display()))?;
            let output = output.unwrap_or_else(|| job.output_path());
            let geojson = geojson.or_else(|| job.geojson.clone());
            run_batch(&job.images, &job.settings, &output, geojson.as_deref())?;
        }
        Commands::Single {
            file,
            desc,
            scale,
            lat,
            lon,
            output,
            threshold,
            tolerance,
            geojson,
        } => {
            let settings = ConversionSettings {
                threshold,
                tolerance,
                ..ConversionSettings::default()
            };
            let sources = [ImageSource::new(file, desc, scale, lat, lon)];
            run_batch(&sources, &settings, &output, geojson.as_deref())?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&ConversionJob::schema())?);
        }
        Commands::Init { path } => {
            ConversionJob::example().to_file(&path)?;
            info!("Wrote starter job to {}", path.display());
        }
    }

    Ok(())
}

fn run_batch(
    sources: &[ImageSource],
    settings: &ConversionSettings,
    output: &Path,
    geojson: Option<&Path>,
) -> Result<()> {
    info!("Converting {} image(s) with {:?}", sources.len(), settings);
    let pipeline = PipelineBuilder::from_settings(settings).build();

    let batch: FenceBatch = pipeline.convert_all(sources)?;
    batch
        .save_json(output)
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

    if let Some(path) = geojson {
        batch.save_geojson(path)?;
    }

    info!("✅ {} fence(s) written to {}", batch.len(), output.display());
    Ok(())
}
