use anyhow::Context;
use clap::{Parser, Subcommand};
use ispu_predictor::{
    api::handlers::BatchResponse,
    batch::{parse_csv, process_batch},
    config::Config,
    export::generate_prediction_workbook,
    ml::ModelGateway,
    models::{reference_table, PollutantReading},
};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ispu-cli")]
#[command(about = "ISPU air-quality prediction CLI", long_about = None)]
struct Cli {
    /// Model artifact; defaults to the configured path
    #[arg(short, long, env = "ISPU__MODEL__PATH")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the ISPU value for one reading
    Predict {
        #[arg(long)]
        pm10: f64,

        #[arg(long)]
        pm25: f64,

        #[arg(long)]
        so2: f64,

        #[arg(long)]
        co: f64,

        #[arg(long)]
        o3: f64,

        #[arg(long)]
        no2: f64,

        /// Measured ISPU value to evaluate the prediction against
        #[arg(short, long)]
        actual: Option<f64>,
    },

    /// Predict every row of a CSV file
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Write the results to this Excel workbook
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the ISPU category reference table
    Categories,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ispu_predictor=warn,ispu_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Categories => {
            println!("{}", serde_json::to_string_pretty(&reference_table())?);
        }
        Commands::Predict {
            pm10,
            pm25,
            so2,
            co,
            o3,
            no2,
            actual,
        } => {
            let gateway = load_gateway(cli.model)?;
            let reading = PollutantReading::new(pm10, pm25, so2, co, o3, no2);
            let prediction = gateway.predict(&reading)?;

            let mut body = json!({
                "prediction": prediction.value,
                "category": prediction.category.label(),
                "color": prediction.category.color(),
            });
            if let Some(actual) = actual {
                let outcome = prediction.evaluate(actual);
                body["evaluation"] = json!({
                    "actual": outcome.actual,
                    "difference": outcome.difference,
                    "status": outcome.verdict.label(),
                    "message": outcome.verdict.message(),
                });
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Batch { input, output } => {
            let gateway = load_gateway(cli.model)?;
            let batch = parse_csv(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let result = process_batch(&gateway, batch)?;

            if let Some(output) = output {
                let bytes = generate_prediction_workbook(&result)?;
                std::fs::write(&output, bytes)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                eprintln!("✅ Wrote {} rows to {}", result.len(), output.display());
            }

            println!(
                "{}",
                serde_json::to_string_pretty(&BatchResponse::from(&result))?
            );
        }
    }

    Ok(())
}

/// `--model` wins; otherwise the configured path.
fn model_path(model: Option<PathBuf>) -> PathBuf {
    if let Some(path) = model {
        return path;
    }
    match Config::load() {
        Ok(config) => config.model.path,
        Err(e) => {
            tracing::warn!("Failed to load configuration: {}", e);
            tracing::warn!("Using default model path");
            Config::default().model.path
        }
    }
}

fn load_gateway(model: Option<PathBuf>) -> anyhow::Result<ModelGateway> {
    let path = model_path(model);
    ModelGateway::load(&path).with_context(|| format!("failed to load model {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_model_env_follows_config_convention() {
        let cmd = Cli::command();
        let model = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "model")
            .unwrap();
        assert_eq!(
            model.get_env().and_then(|env| env.to_str()),
            Some("ISPU__MODEL__PATH")
        );
    }

    #[test]
    fn test_explicit_model_path_wins() {
        let cli = Cli::try_parse_from(["ispu-cli", "--model", "custom.json", "categories"]).unwrap();
        assert_eq!(model_path(cli.model), PathBuf::from("custom.json"));
    }

    #[test]
    fn test_batch_arguments() {
        let cli =
            Cli::try_parse_from(["ispu-cli", "batch", "-i", "data.csv", "-o", "out.xlsx"]).unwrap();
        match cli.command {
            Commands::Batch { input, output } => {
                assert_eq!(input, PathBuf::from("data.csv"));
                assert_eq!(output, Some(PathBuf::from("out.xlsx")));
            }
            _ => panic!("expected batch command"),
        }
    }
}
