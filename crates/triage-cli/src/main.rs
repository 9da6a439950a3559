use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use triage_cli::cli::{Cli, Command, ModelArgs, PredictArgs, ServeArgs};
use triage_cli::display;
use triage_cli::{AppState, router};
use triage_core::FormInput;
use triage_model::{ModelArtifact, TriagePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Inspect(args) => inspect(args),
        Command::Predict(args) => predict(args),
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!("triage v{}", env!("CARGO_PKG_VERSION"));

    // A missing or inconsistent artifact stops startup; nothing is served.
    let pipeline = TriagePipeline::load(&args.model.model)
        .with_context(|| format!("loading {}", args.model.model.display()))?;
    let state = AppState::new(pipeline).context("compiling page templates")?;
    let app = router(state);

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn inspect(args: ModelArgs) -> anyhow::Result<()> {
    let artifact = ModelArtifact::load(&args.model)?;
    display::print_artifact_card(&artifact.summary());
    Ok(())
}

fn predict(args: PredictArgs) -> anyhow::Result<()> {
    let pipeline = TriagePipeline::load(&args.model.model)?;

    let file = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let input: FormInput = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let report = pipeline.run(&input)?;
    display::print_report_card(&report);
    Ok(())
}
