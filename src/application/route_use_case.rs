// ============================================================
// Layer 2 — RouteUseCase
// ============================================================
// Batch driver around the Router: one result (or error) per input
// path, in input order. A failing file never stops the batch; the
// caller reports each error and decides the exit status.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::router::Router;
use crate::domain::document::Document;
use crate::domain::result::ClassificationResult;
use crate::error::PipelineError;
use crate::infra::config::PipelineConfig;
use crate::infra::model_store::ModelStore;

/// Outcome for one submitted path.
#[derive(Debug)]
pub struct RouteOutcome {
    pub path:   PathBuf,
    pub result: Result<ClassificationResult, PipelineError>,
}

impl RouteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct RouteUseCase {
    router: Router,
}

impl RouteUseCase {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Router wired from configuration, with the stored model if one exists.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let extensions = config
            .extension_table()
            .context("invalid extension table")?;
        let mut router = Router::new(
            extensions,
            config.routing_table(),
            config.extractor(),
            config.preview_chars,
        );

        let store = ModelStore::new(config.model_path());
        match store.load().context("cannot load stored model")? {
            Some(model) => router = router.with_model(Arc::new(model)),
            None => tracing::warn!(
                path = %store.path().display(),
                "no trained model; OCR documents cannot be classified"
            ),
        }

        Ok(Self::new(router))
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn route_all<I, P>(&self, paths: I) -> Vec<RouteOutcome>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .map(|p| {
                let path = p.into();
                let result = self.router.route(&Document::new(&path));
                if let Err(e) = &result {
                    tracing::warn!(path = %path.display(), stage = e.stage(), error = %e, "routing failed");
                }
                RouteOutcome { path, result }
            })
            .collect()
    }
}
