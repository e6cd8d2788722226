// FICHIER : essaim/src/utils/logger.rs

use crate::config::LoggingConfig;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Garde contre la double initialisation
static INIT: Once = Once::new();

pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        // =========================================================================
        // LAYER 1 : CONSOLE (Pour l'Humain)
        // =========================================================================
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(env_filter);

        // =========================================================================
        // LAYER 2 : FICHIER JSON (Optionnel, pour l'analyse des runs)
        // =========================================================================
        let file_layer = config.json_dir.as_ref().map(|dir| {
            std::fs::create_dir_all(dir).ok();
            let file_appender = rolling::daily(dir, "essaim.log");

            fmt::layer()
                .json()
                .with_writer(file_appender)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new(config.level.as_str()))
        });

        let registry = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        if let Err(_e) = registry.try_init() {
            tracing::warn!("[Logger] Tentative de ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        tracing::info!(level = %config.level, "🚀 Logger initialisé");
    });
}
