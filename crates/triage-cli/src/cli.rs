//! Command-line arguments. Every option can also come from the environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "triage", version, about = "Obesity triage with a pre-trained Random Forest")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the triage web form and JSON API.
    Serve(ServeArgs),
    /// Print the artifact's schema and model summary.
    Inspect(ModelArgs),
    /// Classify one form read from a JSON file and print the result.
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Model artifact (`.json`, or `.onnx` with a `.json` schema sidecar).
    #[arg(long, env = "TRIAGE_MODEL", default_value = "models/demo-forest.json")]
    pub model: PathBuf,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, env = "TRIAGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8501)]
    pub port: u16,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// JSON file holding one form submission.
    #[arg(long)]
    pub input: PathBuf,
}

impl ServeArgs {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
