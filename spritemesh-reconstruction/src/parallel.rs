//! Batch mesh generation across independent sprites
//!
//! Each source runs its own pipeline; nothing is shared between runs except
//! the read-only configuration. Results keep the order of the inputs.

use crate::pipeline::{MeshPipeline, PipelineConfig, PipelineResult};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use spritemesh_core::{Error, Result, TextureSource, VisibilityGrid};

/// Thread settings for batch generation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of worker threads (None = rayon's default)
    pub num_threads: Option<usize>,
    /// Worker thread name prefix
    pub thread_name_prefix: String,
    /// Run sequentially on the calling thread when false
    pub enabled: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "spritemesh-batch".to_string(),
            enabled: true,
        }
    }
}

impl BatchConfig {
    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Enable or disable parallel processing
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Build one mesh per source on the global rayon pool
pub fn build_batch<S>(sources: &[S], config: &PipelineConfig) -> Vec<Result<PipelineResult>>
where
    S: TextureSource + Sync,
{
    let pipeline = MeshPipeline::new(config.clone());
    sources
        .par_iter()
        .map(|source| pipeline.build_from_source(source))
        .collect()
}

/// Build one mesh per precomputed grid on the global rayon pool
pub fn build_batch_grids(
    grids: &[VisibilityGrid],
    config: &PipelineConfig,
) -> Vec<Result<PipelineResult>> {
    let pipeline = MeshPipeline::new(config.clone());
    grids
        .par_iter()
        .map(|grid| pipeline.build_from_grid(grid))
        .collect()
}

/// Build one mesh per source on a dedicated thread pool.
///
/// The outer `Result` fails only when the pool cannot be created.
pub fn build_batch_with<S>(
    sources: &[S],
    config: &PipelineConfig,
    batch: &BatchConfig,
) -> Result<Vec<Result<PipelineResult>>>
where
    S: TextureSource + Sync,
{
    if !batch.enabled {
        let pipeline = MeshPipeline::new(config.clone());
        return Ok(sources
            .iter()
            .map(|source| pipeline.build_from_source(source))
            .collect());
    }

    let mut builder = ThreadPoolBuilder::new();
    if let Some(num_threads) = batch.num_threads {
        builder = builder.num_threads(num_threads);
    }
    if !batch.thread_name_prefix.is_empty() {
        let prefix = batch.thread_name_prefix.clone();
        builder = builder.thread_name(move |index| format!("{}-{}", prefix, index));
    }

    let pool = builder
        .build()
        .map_err(|e| Error::Algorithm(format!("Failed to create thread pool: {}", e)))?;

    tracing::debug!(
        sources = sources.len(),
        threads = pool.current_num_threads(),
        "Running batch on dedicated pool"
    );
    Ok(pool.install(|| build_batch(sources, config)))
}
