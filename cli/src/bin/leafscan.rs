use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use leafscan::{render_measurement, LeafScanConfig, LeafSession};
use leaf_shape::ShapeMeasurement;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Catalog labeled leaf images and measure leaf shapes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RootArgs {
    /// Dataset root laid out as <root>/<label>/<image>
    #[arg(short, long)]
    root: Option<PathBuf>,
    /// TOML or JSON file with a `root_dir` key
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RootArgs {
    fn session(&self) -> Result<LeafSession> {
        let config = LeafScanConfig::resolve(self.root.clone(), self.config.as_deref())?;
        Ok(LeafSession::new(config))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List every labeled image under the dataset root
    Catalog {
        #[command(flatten)]
        root: RootArgs,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Measure the leaf shape in a single image
    Features {
        /// Path to the image file
        image: PathBuf,
        /// Print the measurement as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up a catalog entry by file name and measure it
    Inspect {
        #[command(flatten)]
        root: RootArgs,
        /// File name of the image, e.g. IMG_0001.jpg
        #[arg(short, long)]
        name: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Measure every catalog entry, one JSON line per image
    Survey {
        #[command(flatten)]
        root: RootArgs,
    },
    /// Print the JSON schema of the measurement output
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Catalog { root, json } => {
            let session = root.session()?;
            let catalog = session
                .catalog()
                .wrap_err_with(|| format!("Failed to build catalog for {}", session.root().display()))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&*catalog)?);
            } else {
                for entry in catalog.iter() {
                    println!("{}\t{}\t{}", entry.display_name(), entry.label, entry.path.display());
                }
            }
            info!("{} images in catalog", catalog.len());
        }
        Commands::Features { image, json } => {
            let measurement = leaf_shape::extract_features(image)?;
            print_measurement(&measurement, *json)?;
        }
        Commands::Inspect { root, name, json } => {
            let session = root.session()?;
            let inspection = session.inspect(name)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&inspection)?);
            } else {
                println!("Selected Image: {}", inspection.entry.display_name());
                println!("Disease: {}", inspection.entry.label);
                print_measurement(&inspection.measurement, false)?;
            }
        }
        Commands::Survey { root } => {
            let session = root.session()?;
            let rows = session.survey()?;
            for row in &rows {
                println!("{}", serde_json::to_string(row)?);
            }
            let failed = rows.iter().filter(|row| row.error.is_some()).count();
            info!("Surveyed {} images ({} failed to decode)", rows.len(), failed);
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(ShapeMeasurement);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn print_measurement(measurement: &ShapeMeasurement, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(measurement)?);
    } else {
        println!("{}", render_measurement(measurement));
    }
    Ok(())
}
