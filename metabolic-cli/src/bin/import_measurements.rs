use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::info;
use metabolic_cli::{read_json, Importer, DEFAULT_API_URL};
use metabolic_model::NewMeasurement;

#[derive(Parser)]
#[command(name = "import-measurements", about = "Post measurements from a JSON file")]
struct Args {
    /// JSON array of measurements, e.g. a previous export
    file: PathBuf,

    #[arg(long, env = "METABOLIC_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    log4rs::init_file("log4rs.yml", Default::default())?;
    let args = Args::parse();

    let measurements: Vec<NewMeasurement> = read_json(&args.file)?;
    let importer = Importer::new(Box::new(metabolic_client::create(args.api_url)));
    let stored = importer.run(&measurements).await;
    info!("Stored {} of {} measurements", stored, measurements.len());

    Ok(())
}
