//! CLI Module
//!
//! Command-line interface for inspecting and editing model documents.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CNN Builder - validate and edit MNIST CNN architectures
#[derive(Parser, Debug)]
#[command(name = "cnn-builder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter model document with the canonical MNIST architecture
    #[command(name = "new")]
    New {
        /// Path for the new document
        path: PathBuf,

        /// Model label stored in the metadata
        #[arg(short, long, default_value = "mnist-cnn")]
        label: String,
    },

    /// Validate the layer sequence of a model document
    #[command(name = "validate")]
    Validate {
        /// Path to the model document
        path: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a model document can be trained
    #[command(name = "check-training")]
    CheckTraining {
        /// Path to the model document
        path: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recommended next layers
    #[command(name = "recommend")]
    Recommend {
        /// Path to the model document
        path: PathBuf,
    },

    /// Print output dimensions of every layer
    #[command(name = "shapes")]
    Shapes {
        /// Path to the model document
        path: PathBuf,
    },

    /// Append a layer with default hyperparameters
    #[command(name = "add-layer")]
    AddLayer {
        /// Path to the model document
        path: PathBuf,

        /// Layer type (e.g. Conv2D, ReLU, Dense)
        layer_type: String,
    },

    /// Remove the layer at a 1-based position
    #[command(name = "remove-layer")]
    RemoveLayer {
        /// Path to the model document
        path: PathBuf,

        /// 1-based layer position
        position: usize,
    },

    /// Validate every model document in a directory
    #[command(name = "validate-dir")]
    ValidateDir {
        /// Directory to scan for *.json documents
        dir: PathBuf,
    },

    /// Train with the mock backend and store the history in the document
    #[command(name = "train")]
    Train {
        /// Path to the model document
        path: PathBuf,

        /// Override the number of epochs
        #[arg(short, long)]
        epochs: Option<u32>,
    },
}
