//! Command execution logic for the Veritas CLI.

use crate::cli::args::*;
use crate::detector::{DetectorConfig, FakeNewsDetector};
use crate::error::Result;

/// Execute the parsed command.
pub fn execute_command(args: VeritasArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => execute_train(train_args, args.output_format),
        Command::Predict(predict_args) => execute_predict(predict_args, args.output_format),
        Command::Stats(stats_args) => execute_stats(stats_args, args.output_format),
    }
}

fn detector_for(model_path: &std::path::Path) -> FakeNewsDetector {
    let config = DetectorConfig {
        model_path: model_path.to_path_buf(),
        ..DetectorConfig::default()
    };
    FakeNewsDetector::new(config)
}

fn execute_train(args: &TrainArgs, format: OutputFormat) -> Result<()> {
    let detector = detector_for(&args.model);
    let accuracy = detector.train(&args.corpus)?;
    detector.save_model()?;

    match format {
        OutputFormat::Json => {
            let stats = detector.stats();
            println!("{}", serde_json::to_string_pretty(&stats).map_err(json_error)?);
        }
        OutputFormat::Human => {
            println!("Model trained successfully");
            println!("Held-out accuracy: {accuracy:.4}");
            println!("Saved to: {}", args.model.display());
        }
    }
    Ok(())
}

fn execute_predict(args: &PredictArgs, format: OutputFormat) -> Result<()> {
    let detector = detector_for(&args.model);
    detector.load_model()?;

    let results = detector.batch_predict(&args.texts);
    for (text, result) in args.texts.iter().zip(results) {
        match format {
            OutputFormat::Json => match result {
                Ok(prediction) => println!(
                    "{}",
                    serde_json::to_string(&prediction).map_err(json_error)?
                ),
                Err(e) => println!("{}", serde_json::json!({ "error": e.to_string() })),
            },
            OutputFormat::Human => match result {
                Ok(prediction) => println!(
                    "{} -> {} (probability {:.4}, confidence {})",
                    text, prediction.label, prediction.probability, prediction.confidence
                ),
                Err(e) => println!("{text} -> error: {e}"),
            },
        }
    }
    Ok(())
}

fn execute_stats(args: &StatsArgs, format: OutputFormat) -> Result<()> {
    let detector = detector_for(&args.model);
    detector.load_model()?;
    let stats = detector.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).map_err(json_error)?);
        }
        OutputFormat::Human => {
            println!("Model trained: {}", stats.trained);
            println!("Vocabulary size: {}", stats.vocabulary_size);
        }
    }
    Ok(())
}

fn json_error(e: serde_json::Error) -> crate::error::VeritasError {
    crate::error::VeritasError::serialization(e.to_string())
}
