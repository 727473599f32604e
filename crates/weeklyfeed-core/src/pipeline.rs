use std::future::Future;

use crate::config::AppConfig;
use crate::feed::Loader;
use crate::render::{Mount, Renderer};
use crate::{Error, Result};

/// What a pipeline run did to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReport {
    /// The list was written with this many entries
    Rendered(usize),
    /// Nothing to show or the load failed; the fallback fragment was written
    Fallback,
    /// The page has no container; nothing was written
    MissingContainer,
}

/// Load once and render the result into `page`.
///
/// `page` must already be parsed and ready. Loading and building the fragment
/// both happen on a separate task; any failure there, a panic included, ends up
/// as the fallback fragment, so this never returns an error.
pub async fn run_once<M>(config: &AppConfig, page: &mut M) -> RunReport
where
    M: Mount + ?Sized,
{
    let renderer = Renderer::new(config);

    let (report, fragment) = match render_guarded(config, &renderer).await {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::warn!("Showing fallback updates section: {}", e);
            (RunReport::Fallback, renderer.fallback())
        }
    };

    if renderer.mount(page, &fragment) {
        report
    } else {
        RunReport::MissingContainer
    }
}

/// Load and build the container's fragment
async fn render_guarded(config: &AppConfig, renderer: &Renderer) -> Result<(RunReport, String)> {
    let loader = Loader::new(config)?;
    let renderer = renderer.clone();

    spawn_guarded(async move {
        let outcome = loader.load().await;
        let report = match &outcome {
            Ok(records) if !records.is_empty() => RunReport::Rendered(records.len()),
            Ok(_) => RunReport::Fallback,
            Err(e) => {
                tracing::warn!("Showing fallback updates section: {}", e);
                RunReport::Fallback
            }
        };
        (report, renderer.fragment(&outcome))
    })
    .await
}

/// Run `task` on its own tokio task so that a panic cannot escape
async fn spawn_guarded<F>(task: F) -> Result<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(task).await.map_err(|e| {
        tracing::error!("Update task failed: {}", e);
        Error::Task(e.to_string())
    })
}
