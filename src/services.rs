//! Wiring of the store, the domain services and the suggestion generator.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lyrical_authz::SessionStore;
use lyrical_db::MemoryStore;
use lyrical_kernel::settings::Settings;

use crate::modules::books::catalog::Catalog;
use crate::modules::reviews::ledger::ReviewLedger;
use crate::modules::suggestions::gemini::GeminiGenerator;
use crate::modules::suggestions::generator::{DisabledGenerator, SuggestionGenerator};
use crate::modules::suggestions::requester::SuggestionRequester;

/// Shared services handed to the modules
#[derive(Clone)]
pub struct Services {
    pub store: Arc<MemoryStore>,
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<ReviewLedger>,
    pub suggestions: Arc<SuggestionRequester>,
    pub sessions: Arc<SessionStore>,
}

impl Services {
    /// Seeded store plus the generator selected by the suggestion settings
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let store = MemoryStore::seeded()
            .with_latency(Duration::from_millis(settings.storage.simulated_latency_ms));

        let generator: Arc<dyn SuggestionGenerator> =
            match GeminiGenerator::from_settings(&settings.suggestions)
                .context("failed to build suggestion HTTP client")?
            {
                Some(gemini) => Arc::new(gemini),
                None => Arc::new(DisabledGenerator),
            };

        Ok(Self::with_parts(Arc::new(store), generator, settings))
    }

    /// Assemble services around an explicit store and generator
    pub fn with_parts(
        store: Arc<MemoryStore>,
        generator: Arc<dyn SuggestionGenerator>,
        settings: &Settings,
    ) -> Self {
        let catalog = Catalog::new(store.clone(), settings.catalog.default_page_size);
        let ledger = ReviewLedger::new(store.clone(), store.clone());
        let suggestions = SuggestionRequester::new(
            generator,
            Duration::from_millis(settings.suggestions.timeout_ms),
        );
        let sessions = SessionStore::new(store.clone());

        Self {
            store,
            catalog: Arc::new(catalog),
            ledger: Arc::new(ledger),
            suggestions: Arc::new(suggestions),
            sessions: Arc::new(sessions),
        }
    }
}
