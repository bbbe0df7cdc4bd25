//! CLI Command Implementations
//!
//! Each validation-style command returns whether the checked documents were
//! valid so the binary can set its exit status.

use std::path::Path;

use log::{info, warn};
use walkdir::WalkDir;

use crate::config::ModelConfig;
use crate::editor::ModelBuilder;
use crate::error::{BuilderError, Result};
use crate::layers::LayerType;
use crate::training::{CancelToken, MockTrainer};
use crate::validation::ValidationResult;

/// Write a starter model document.
pub fn new_model(path: &Path, label: &str) -> Result<()> {
    info!("Creating model document at: {}", path.display());

    ModelConfig::canonical(label).save(path)?;

    println!("Model created: {}", path.display());
    Ok(())
}

/// Validate a model document.
pub fn validate(path: &Path, json: bool) -> Result<bool> {
    let builder = ModelBuilder::from_config(ModelConfig::load(path)?);
    let result = builder.validation();
    print_result(&result, json)?;
    Ok(result.is_valid())
}

/// Check training readiness of a model document.
pub fn check_training(path: &Path, json: bool) -> Result<bool> {
    let builder = ModelBuilder::from_config(ModelConfig::load(path)?);
    let result = builder.training_readiness();
    print_result(&result, json)?;
    Ok(result.is_valid())
}

/// Show recommended next layers.
pub fn recommend(path: &Path) -> Result<()> {
    let builder = ModelBuilder::from_config(ModelConfig::load(path)?);
    let recommendations = builder.recommendations();

    if recommendations.is_empty() {
        println!("Model is complete. No further layers recommended.");
        return Ok(());
    }

    let names: Vec<&str> = recommendations.iter().map(LayerType::name).collect();
    println!("Recommended next layers: {}", names.join(", "));
    Ok(())
}

/// Print per-layer output dimensions.
pub fn shapes(path: &Path) -> Result<()> {
    let builder = ModelBuilder::from_config(ModelConfig::load(path)?);

    println!("{:<4} {:<10} {:<14} {}", "#", "Layer", "Output", "Description");
    println!("{:-<60}", "");
    for (i, shape) in builder.shapes().iter().enumerate() {
        println!(
            "{:<4} {:<10} {:<14} {}",
            i, shape.display_name, shape.dims.to_string(), shape.description
        );
    }
    println!("{:-<60}", "");

    let summary = builder.summary();
    println!(
        "Total layers: {} | Output shape: {} | Parameters: {}",
        summary.total_layers, summary.output_shape, summary.parameters
    );
    Ok(())
}

/// Append a default layer and rewrite the document.
pub fn add_layer(path: &Path, layer_type: &str) -> Result<()> {
    let layer_type: LayerType = layer_type.parse()?;
    let (mut builder, label) = open(path)?;

    if !builder.is_recommended(layer_type) {
        warn!("{} is not a recommended next layer here", layer_type);
    }

    let result = builder.add_default_layer(layer_type);
    builder.export(&label)?.save(path)?;

    println!("Added {} at position {}", layer_type, builder.layers().len());
    print_result(&result, false)?;
    Ok(())
}

/// Remove the layer at a 1-based position and rewrite the document.
pub fn remove_layer(path: &Path, position: usize) -> Result<()> {
    let (mut builder, label) = open(path)?;

    let index = position
        .checked_sub(1)
        .ok_or(BuilderError::LayerIndexOutOfRange {
            index: 0,
            len: builder.layers().len(),
        })?;

    let result = builder.remove_layer(index)?;
    builder.export(&label)?.save(path)?;

    println!("Removed layer at position {}", position);
    print_result(&result, false)?;
    Ok(())
}

/// Validate every JSON document under a directory.
pub fn validate_dir(dir: &Path) -> Result<bool> {
    info!("Scanning {} for model documents", dir.display());

    let mut checked = 0;
    let mut invalid = 0;

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| BuilderError::Io(e.into()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }

        checked += 1;
        match ModelConfig::load(path) {
            Ok(config) => {
                let result = ModelBuilder::from_config(config).validation();
                let status = if result.is_valid() { "ok" } else { "INVALID" };
                println!(
                    "{:<8} {} ({} error(s), {} warning(s))",
                    status,
                    path.display(),
                    result.errors().len(),
                    result.warnings().len()
                );
                if !result.is_valid() {
                    invalid += 1;
                }
            }
            Err(e) => {
                invalid += 1;
                println!("{:<8} {} ({})", "UNREADABLE", path.display(), e);
            }
        }
    }

    println!("{:-<60}", "");
    println!("Checked {} document(s), {} invalid", checked, invalid);
    Ok(invalid == 0)
}

/// Train with the mock backend and store the history in the document.
pub fn train(path: &Path, epochs: Option<u32>) -> Result<()> {
    let (mut builder, label) = open(path)?;

    if let Some(epochs) = epochs {
        let mut settings = builder.training_settings().clone();
        settings.epochs = epochs;
        builder.set_training_settings(settings);
    }

    let settings = builder.training_settings();
    println!("=== Training ===");
    println!(
        "Configuration: {} epochs × {} batch size, {} optimizer, lr {}",
        settings.epochs, settings.batch_size, settings.optimizer, settings.learning_rate
    );
    println!("Estimated time: {}", settings.estimated_training_time());
    println!();

    let mut trainer = MockTrainer::new();
    let history = builder.train_with(&mut trainer, CancelToken::new(), |m| {
        println!(
            "Epoch {}: loss {:.4} - accuracy {:.4}",
            m.epoch, m.loss, m.accuracy
        );
    })?;

    println!();
    println!("Training complete in {} ms", history.training_time);

    builder.export(&label)?.save(path)?;
    println!("History saved to: {}", path.display());
    Ok(())
}

/// Load a document into an editing session, keeping its label for re-export
fn open(path: &Path) -> Result<(ModelBuilder, String)> {
    let config = ModelConfig::load(path)?;
    let label = config.metadata.label.clone();
    Ok((ModelBuilder::from_config(config), label))
}

fn print_result(result: &ValidationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.to_human_summary());
    }
    Ok(())
}
