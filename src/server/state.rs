//! Application state for the HTTP server

use std::sync::Arc;

use super::page::PageRenderer;
use crate::pipeline::TextPipeline;

/// Shared state handed to every route handler (cheap Arc clones)
#[derive(Clone)]
pub struct AppState {
    /// The conversion pipeline
    pub pipeline: Arc<TextPipeline>,

    /// Form page renderer
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(pipeline: Arc<TextPipeline>) -> Result<Self, minijinja::Error> {
        Ok(Self {
            pipeline,
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}
