//! Spec cache and regeneration orchestration
//!
//! Process-wide state keyed by a fingerprint of the active configuration.
//! The first request initializes it; later requests regenerate only when
//! the fingerprint changes. The state lives behind an injected `Arc`, not
//! an ambient global, and is resettable for tests.

use crate::builder::build_spec;
use crate::spec::{Info, OpenApiSpec};
use crate::store::{OpenApiError, SpecFormat, SpecStore};
use parking_lot::Mutex;
use std::sync::Arc;
use trellis_core::{ApiConfig, RouteDefinition};

#[derive(Default)]
struct CacheState {
    fingerprint: Option<String>,
    spec: Option<OpenApiSpec>,
    generations: usize,
}

/// Decides when the document must be (re)generated and holds the cached
/// result.
pub struct SpecOrchestrator {
    store: Arc<dyn SpecStore>,
    state: Mutex<CacheState>,
}

impl SpecOrchestrator {
    pub fn new(store: Arc<dyn SpecStore>) -> Self {
        Self {
            store,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Consulted once per inbound request.
    ///
    /// Regeneration is a pure function of routes and config, so redundant
    /// runs from concurrent requests observing a stale fingerprint are
    /// idempotent; the persisted file is last-writer-wins. The cached
    /// document is replaced atomically under the lock.
    pub fn poll(
        &self,
        config: &ApiConfig,
        routes: &[(String, RouteDefinition)],
        info: &Info,
    ) -> Result<(), OpenApiError> {
        let fingerprint = config.fingerprint();
        let mut state = self.state.lock();

        match &state.fingerprint {
            None => {
                tracing::info!(
                    swagger_ui = %config.swagger_ui_path,
                    json = %config.openapi_json_path,
                    yaml = %config.openapi_yaml_path,
                    "Trellis initialized; API documentation endpoints are ready"
                );
            }
            Some(stored) if *stored != fingerprint => {
                tracing::info!("Configuration changed, re-initializing the OpenAPI document");
            }
            _ => return Ok(()),
        }
        state.fingerprint = Some(fingerprint);

        if !config.expose_openapi_spec {
            tracing::info!(
                "OpenAPI spec exposure is disabled; set expose_openapi_spec = true to serve the documentation endpoints"
            );
            state.spec = None;
            return Ok(());
        }

        let spec = self.generate(config, routes, info)?;
        state.spec = Some(spec);
        state.generations += 1;
        Ok(())
    }

    fn generate(
        &self,
        config: &ApiConfig,
        routes: &[(String, RouteDefinition)],
        info: &Info,
    ) -> Result<OpenApiSpec, OpenApiError> {
        if !config.regenerate {
            if let Some(existing) = self.store.read_spec(&config.spec_file_path)? {
                return Ok(existing);
            }
        }
        let spec = build_spec(routes, info, config.openapi_spec_overrides.as_ref());
        self.store.write_spec(
            &config.spec_file_path,
            &spec,
            SpecFormat::for_path(&config.spec_file_path),
        )?;
        Ok(spec)
    }

    /// The currently cached document, if generation has run.
    pub fn cached_spec(&self) -> Option<OpenApiSpec> {
        self.state.lock().spec.clone()
    }

    /// Number of times generation has run. Observable for tests.
    pub fn generation_count(&self) -> usize {
        self.state.lock().generations
    }

    /// Forget all cached state, returning to the uninitialized state.
    pub fn reset(&self) {
        *self.state.lock() = CacheState::default();
    }
}
