mod config;
mod telemetry;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pdf_service_client::{PdfServiceClient, Placeholders, ReqwestTransport};
use tracing::info;

use crate::config::Settings;

#[derive(Parser)]
#[command(
    name = "pdf-service",
    about = "Render HTML templates through the remote PDF service"
)]
struct Cli {
    /// Base URL of the PDF service. Falls back to PDF_SERVICE_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the service's /health endpoint; exits non-zero unless UP.
    Health,
    /// Render an HTML template into a PDF.
    Render {
        /// HTML template file.
        #[arg(long)]
        template: PathBuf,
        /// JSON object of placeholder values.
        #[arg(long)]
        values: Option<PathBuf>,
        /// Where to write the PDF.
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.url)?;
    let client = build_client(&settings)?;

    match cli.command {
        Commands::Health => {
            let health = client.service_healthy().await;
            println!("{health}");
            if !health.is_up() {
                bail!("PDF service is not up: {health}");
            }
        }
        Commands::Render {
            template,
            values,
            output,
        } => {
            let html = tokio::fs::read(&template)
                .await
                .with_context(|| format!("reading template {}", template.display()))?;
            let values = match values {
                Some(path) => read_values(&path).await?,
                None => Placeholders::new(),
            };

            let pdf = client.generate_from_html(html, values).await?;
            tokio::fs::write(&output, &pdf)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            info!(output = %output.display(), bytes = pdf.len(), "PDF written");
        }
    }
    Ok(())
}

fn build_client(settings: &Settings) -> Result<PdfServiceClient> {
    let transport = ReqwestTransport::with_timeout(settings.timeout)?;
    let mut builder = PdfServiceClient::builder()
        .base_url(settings.base_url.as_str())
        .transport(transport);
    if settings.s2s_auth {
        builder = builder.s2s_auth_token(config::current_s2s_token);
    }
    Ok(builder.build()?)
}

async fn read_values(path: &Path) -> Result<Placeholders> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading values {}", path.display()))?;
    match serde_json::from_slice(&raw)
        .with_context(|| format!("parsing values {}", path.display()))?
    {
        serde_json::Value::Object(map) => Ok(map),
        other => bail!(
            "values in {} must be a JSON object, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
