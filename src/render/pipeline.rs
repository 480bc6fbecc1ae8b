use std::sync::Arc;

use bytes::Bytes;
use futures::{StreamExt, stream};
use tracing::{info, warn};

use crate::assets::decode::decode_image;
use crate::assets::fetch::{ImageFailure, ImageFetch};
use crate::encode::png::encode_png;
use crate::foundation::core::CollageSpec;
use crate::foundation::error::{AlbumWallError, AlbumWallResult};
use crate::metadata::ImageSource;
use crate::render::cpu::CollageCanvas;

/// Default number of covers fetched at the same time.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Output of one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollageResult {
    pub image_bytes: Vec<u8>,
    pub failed_names: Vec<String>,
}

/// Fetches covers and draws them into a wall.
///
/// The renderer is shareable across requests: it only holds immutable configuration and a
/// fetcher, and each [`CollageRenderer::render`] call owns its own surface.
pub struct CollageRenderer {
    spec: CollageSpec,
    fetcher: Arc<dyn ImageFetch>,
    concurrency: usize,
}

impl CollageRenderer {
    /// Build a renderer for a validated `spec`.
    pub fn new(spec: CollageSpec, fetcher: Arc<dyn ImageFetch>) -> AlbumWallResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            fetcher,
            concurrency: DEFAULT_FETCH_CONCURRENCY,
        })
    }

    /// Bound the number of in-flight cover fetches (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Geometry this renderer draws with.
    pub fn spec(&self) -> &CollageSpec {
        &self.spec
    }

    /// Render `sources` in row-major order.
    pub async fn render(&self, sources: &[ImageSource]) -> AlbumWallResult<CollageResult> {
        render_collage(sources, &self.spec, self.fetcher.as_ref(), self.concurrency).await
    }
}

/// Fetch every source concurrently, then draw them on one surface and encode to PNG.
///
/// Source `i` always lands in cell `i`; a source that cannot be fetched or decoded leaves
/// its cell as background and is reported in [`CollageResult::failed_names`]. Sources past
/// the grid capacity are never fetched.
#[tracing::instrument(skip(sources, spec, fetcher), fields(sources = sources.len()))]
pub async fn render_collage(
    sources: &[ImageSource],
    spec: &CollageSpec,
    fetcher: &dyn ImageFetch,
    concurrency: usize,
) -> AlbumWallResult<CollageResult> {
    spec.validate()?;
    let capacity = spec.grid_capacity();
    if sources.len() > capacity {
        warn!(
            sources = sources.len(),
            capacity, "dropping sources beyond grid capacity"
        );
    }
    let placed = &sources[..sources.len().min(capacity)];

    // `buffered` yields in input order, so results line up with `placed`.
    let requests: Vec<_> = placed
        .iter()
        .map(|source| fetcher.fetch(&source.url))
        .collect();
    let fetched: Vec<Result<Bytes, ImageFailure>> = stream::iter(requests)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let jobs: Vec<(ImageSource, Result<Bytes, ImageFailure>)> =
        placed.iter().cloned().zip(fetched).collect();
    let spec = *spec;
    tokio::task::spawn_blocking(move || compose(&spec, jobs))
        .await
        .map_err(|e| AlbumWallError::render(format!("render worker: {e}")))?
}

/// Decode and draw already-fetched covers; the single owner of the surface.
pub(crate) fn compose(
    spec: &CollageSpec,
    jobs: Vec<(ImageSource, Result<Bytes, ImageFailure>)>,
) -> AlbumWallResult<CollageResult> {
    let mut canvas = CollageCanvas::new(spec)?;
    let mut failed_names = Vec::new();

    for (index, (source, fetched)) in jobs.into_iter().enumerate() {
        let drawn = fetched
            .and_then(|bytes| decode_image(&bytes))
            .map_err(|e| e.to_string())
            .and_then(|img| canvas.draw_cell(index, &img).map_err(|e| e.to_string()));
        if let Err(reason) = drawn {
            warn!(
                index,
                name = %source.display_name,
                url = %source.url,
                %reason,
                "source left blank"
            );
            failed_names.push(source.display_name);
        }
    }

    let frame = canvas.finish()?;
    let image_bytes = encode_png(&frame)?;
    info!(
        width = frame.width,
        height = frame.height,
        failed = failed_names.len(),
        bytes = image_bytes.len(),
        "collage rendered"
    );
    Ok(CollageResult {
        image_bytes,
        failed_names,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
