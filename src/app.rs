//! Process-wide application context.
//!
//! Owns the store and wires the scanner, notifier and pipeline around it.
//! The server and the CLI both start from here, so they see one store.

use crate::config::Settings;
use crate::error::DeliveryResult;
use crate::notifier::Notifier;
use crate::pipeline::Pipeline;
use crate::scanner::{shared, MockSource, SharedSource, SourceSet};
use crate::server::AppState;
use crate::storage::{MemoryStore, Store};
use std::sync::Arc;
use tracing::debug;

/// Shared components for one process.
pub struct AppContext {
    pub settings: Settings,
    pub store: Arc<dyn Store>,
    pub notifier: Arc<Notifier>,
    pub pipeline: Arc<Pipeline>,
}

impl AppContext {
    /// Wire the default components for `settings`.
    pub fn from_settings(settings: Settings) -> DeliveryResult<Self> {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let source = default_source_for(&settings);
        Self::with_parts(settings, store, source)
    }

    /// Wire the context around an explicit store and source.
    pub fn with_parts(
        settings: Settings,
        store: Arc<dyn Store>,
        source: SharedSource,
    ) -> DeliveryResult<Self> {
        let notifier = Arc::new(Notifier::from_settings(Arc::clone(&store), &settings)?);
        let pipeline = Arc::new(Pipeline::new(
            Arc::clone(&store),
            source,
            Arc::clone(&notifier),
        ));

        Ok(Self {
            settings,
            store,
            notifier,
            pipeline,
        })
    }

    /// HTTP server state for this context.
    pub fn server_state(&self) -> Arc<AppState> {
        Arc::new(AppState {
            store: Arc::clone(&self.store),
            pipeline: Arc::clone(&self.pipeline),
            cron_secret: self.settings.cron_secret.clone(),
        })
    }
}

/// The simulated source set used until real fetchers exist.
pub fn default_source_for(settings: &Settings) -> SharedSource {
    debug!(
        latency_ms = settings.scan_latency_ms,
        concurrency = settings.source_concurrency,
        "Using simulated source"
    );
    shared(
        SourceSet::new(settings.source_concurrency)
            .with_source(shared(MockSource::new(settings.scan_latency()))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Trigger;

    #[tokio::test]
    async fn test_context_runs_simulated_scan() {
        let settings = Settings {
            scan_latency_ms: 0,
            ..Settings::default()
        };
        let ctx = AppContext::from_settings(settings).unwrap();

        let outcome = ctx.pipeline.run(Trigger::Manual).await.unwrap();
        assert!(outcome.candidates >= 2);
        assert_eq!(outcome.added_count(), outcome.candidates);
        assert_eq!(ctx.store.tool_count().await.unwrap(), outcome.added_count());
        assert_eq!(ctx.notifier.mailer_name(), "log");
    }

    #[test]
    fn test_server_state_carries_secret() {
        let settings = Settings {
            cron_secret: Some("abc".to_string()),
            ..Settings::default()
        };
        let ctx = AppContext::from_settings(settings).unwrap();
        assert_eq!(ctx.server_state().cron_secret.as_deref(), Some("abc"));
    }
}
