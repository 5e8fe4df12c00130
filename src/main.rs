//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use then_now::adapters::ai::{GeminiAdapter, MockAiAdapter};
use then_now::adapters::persistence::ImageStore;
use then_now::adapters::ui::tui::TuiInputPort;
use then_now::ports::{AiPort, InputPort};
use then_now::shared::config::AppConfig;
use then_now::usecases::{ImageEditService, TimelineService};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    then_now::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Model client: one shared handle for every view ---
    let ai: Arc<dyn AiPort> = match cfg.api_key() {
        Some(api_key) => {
            info!(
                url = %cfg.api_url_or_default(),
                timeline_model = %cfg.timeline_model_or_default(),
                image_model = %cfg.image_model_or_default(),
                "Gemini adapter enabled"
            );
            Arc::new(GeminiAdapter::new(cfg.api_url_or_default(), api_key))
        }
        None => {
            warn!("GEMINI_API_KEY not set, using mock AI adapter");
            Arc::new(MockAiAdapter::new())
        }
    };

    let output_dir = PathBuf::from(cfg.output_dir_or_default());
    info!(path = %output_dir.display(), "edited images directory");
    let store = Arc::new(ImageStore::new(&output_dir));

    // --- Services ---
    let timeline_service = Arc::new(TimelineService::new(
        Arc::clone(&ai),
        cfg.timeline_model_or_default(),
    ));
    let image_edit_service = Arc::new(ImageEditService::new(
        Arc::clone(&ai),
        cfg.image_model_or_default(),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        timeline_service,
        image_edit_service,
        store,
    ));

    // --- Run (main menu -> Timeline / Image Editor) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
