use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use metabolic_cli::{calculate_form, format_errors, read_json, DEFAULT_API_URL};
use metabolic_client::Calculator;
use metabolic_model::{RawBiometricInput, ValidationErrors};

#[derive(Parser)]
#[command(name = "metabolic-calc", about = "Calculate BMI, BMR and TDEE from a form")]
struct Args {
    /// JSON file with height, weight, age, gender and activityLevel
    form: PathBuf,

    /// Store the result as a measurement
    #[arg(long)]
    save: bool,

    #[arg(long, env = "METABOLIC_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    dotenv::dotenv().ok();
    log4rs::init_file("log4rs.yml", Default::default())?;
    let args = Args::parse();

    let raw: RawBiometricInput = read_json(&args.form)?;
    let calculator = Calculator::new(Box::new(metabolic_client::create(args.api_url)));

    match calculate_form(&calculator, &raw, args.save).await {
        Ok(calculation) => {
            println!("{}", serde_json::to_string_pretty(&calculation.result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.downcast::<ValidationErrors>() {
            Ok(errors) => {
                eprintln!("{}", format_errors(&errors));
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        },
    }
}
