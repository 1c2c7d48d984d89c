//! Smoke binary for the KYC widget.
//!
//! Drives the full verification flow from a terminal: create a session
//! for a CPF against a real backend, build the iframe URL, and print it.
//! There is no DOM here, so the host page is the headless adapter that
//! logs every visual effect instead of rendering it.
//!
//! ```text
//! kyc-widget --host https://api.example.com --token SECRET \
//!     --cpf 111.444.777-35 --viewport-width 844
//! ```
//!
//! Configuration comes from a TOML file (`--config`), individual CLI
//! flags, or `KYC_*` environment variables; flags win over the file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use kyc_core::domain::config::WidgetConfig;
use kyc_widget::infrastructure::host_page::headless::HeadlessHostPage;
use kyc_widget::infrastructure::session_api::HttpSessionApi;
use kyc_widget::{Callbacks, Widget};

#[derive(Debug, Parser)]
#[command(name = "kyc-widget", about = "Run one KYC verification flow from the terminal")]
struct Cli {
    /// TOML config file with top-level keys matching WidgetConfig.
    #[arg(long, env = "KYC_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL that issues verification sessions.
    #[arg(long, env = "KYC_HOST")]
    host: Option<String>,

    /// API credential presented when creating a session.
    #[arg(long, env = "KYC_TOKEN")]
    token: Option<String>,

    /// Language of the remote flow (pt, en, es).
    #[arg(long)]
    lang: Option<String>,

    /// Base URL of the remote verification widget.
    #[arg(long)]
    app_url: Option<String>,

    /// CPF to verify. Punctuation is accepted and stripped.
    #[arg(long)]
    cpf: String,

    /// Correlation id threaded into the iframe URL; random when absent.
    #[arg(long)]
    reference_id: Option<String>,

    /// Simulated viewport width, which picks the flow variant.
    #[arg(long, default_value_t = 1280)]
    viewport_width: u32,

    /// Origin reported for this "page" and sealed into the token.
    #[arg(long, default_value = "https://localhost")]
    origin: String,

    /// Ask the remote flow to confirm the phone via SMS.
    #[arg(long)]
    enable_sms_confirmation: bool,

    /// Run only the SMS confirmation, skipping document capture.
    #[arg(long)]
    only_sms_confirmation: bool,
}

impl Cli {
    /// Merges the config file (when given) with CLI overrides.
    fn into_config(self) -> anyhow::Result<(WidgetConfig, String, Option<String>, u32, String)> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str::<WidgetConfig>(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => {
                let (Some(host), Some(token)) = (self.host.clone(), self.token.clone()) else {
                    bail!("--host and --token are required without --config");
                };
                WidgetConfig::new(host, token)
            }
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(token) = self.token {
            config.token = token;
        }
        if let Some(lang) = self.lang {
            config.lang = lang.parse()?;
        }
        if let Some(app_url) = self.app_url {
            config.app_url = app_url;
        }
        config.enable_sms_confirmation |= self.enable_sms_confirmation;
        config.only_sms_confirmation |= self.only_sms_confirmation;

        Ok((
            config,
            self.cpf,
            self.reference_id,
            self.viewport_width,
            self.origin,
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let (config, cpf, reference_id, viewport_width, origin) = cli.into_config()?;

    info!(host = %config.host, app_url = %config.app_url, "KYC widget smoke run starting");

    let page = Arc::new(HeadlessHostPage::new(origin, viewport_width));
    let api = Arc::new(HttpSessionApi::new(config.host.clone()));
    let mut widget = Widget::new(config, Callbacks::default(), page.clone(), api)?;

    widget.mount();

    let reference_id = reference_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    widget.verify_document(&cpf, Some(&reference_id)).await?;

    let frame_url = page
        .frame_url()
        .context("modal opened but no frame URL was produced")?;
    println!("{frame_url}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
