use glam::Quat;
use rayon::prelude::*;

use crate::{
    buffers::{ColorBuffer, DepthBuffer},
    config::ProjectionConfig,
    error::{PixmeshError, PixmeshResult},
    frustum::{CameraFrustum, PixelRays},
    mesh::QuadMesh,
    project::project_pixel,
    quad::append_quad,
    underlay::{classify, resolve_horizontal, resolve_vertical},
};

/// How often (in visited pixels) the observer is invoked.
const PROGRESS_STRIDE: u64 = 1000;

/// Rows per worker band in the parallel pass.
const ROW_BAND: usize = 32;

/// Counters describing one projection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    pub pixels_total: u64,
    pub pixels_visited: u64,
    pub quads_emitted: u64,
    pub skipped_max_depth: u64,
    pub degenerate_pixels: u64,
    pub cancelled: bool,
}

impl ProjectionStats {
    fn absorb(&mut self, other: &ProjectionStats) {
        self.pixels_visited += other.pixels_visited;
        self.quads_emitted += other.quads_emitted;
        self.skipped_max_depth += other.skipped_max_depth;
        self.degenerate_pixels += other.degenerate_pixels;
    }
}

/// Projects the depth/color pair into a quad mesh with a single sequential
/// row-major pass.
pub fn project(
    depth: &DepthBuffer,
    color: &ColorBuffer,
    frustum: &CameraFrustum,
    cfg: &ProjectionConfig,
) -> PixmeshResult<QuadMesh> {
    project_with_stats(depth, color, frustum, cfg).map(|(mesh, _)| mesh)
}

/// Like [`project`] but also returns the pass counters.
pub fn project_with_stats(
    depth: &DepthBuffer,
    color: &ColorBuffer,
    frustum: &CameraFrustum,
    cfg: &ProjectionConfig,
) -> PixmeshResult<(QuadMesh, ProjectionStats)> {
    project_with_observer(depth, color, frustum, cfg, &mut |_, _| true)
}

/// Sequential pass with cooperative progress reporting: `observer` receives
/// (visited, total) every [`PROGRESS_STRIDE`] pixels and cancels the run by
/// returning `false`. A cancelled run returns the mesh built so far with
/// `stats.cancelled` set; the accumulator is never left inconsistent.
pub fn project_with_observer(
    depth: &DepthBuffer,
    color: &ColorBuffer,
    frustum: &CameraFrustum,
    cfg: &ProjectionConfig,
    observer: &mut dyn FnMut(u64, u64) -> bool,
) -> PixmeshResult<(QuadMesh, ProjectionStats)> {
    validate_inputs(depth, color, cfg)?;

    let rays = frustum.pixel_rays(depth.width(), depth.height());
    let mut mesh = QuadMesh::with_capacity(depth.pixel_count());
    let mut stats = ProjectionStats {
        pixels_total: depth.pixel_count() as u64,
        ..ProjectionStats::default()
    };

    tracing::info!(
        width = depth.width(),
        height = depth.height(),
        "projection starting"
    );

    for y in 0..depth.height() {
        for x in 0..depth.width() {
            project_one(depth, color, &rays, frustum.rotation, cfg, x, y, &mut mesh, &mut stats);
            if stats.pixels_visited.is_multiple_of(PROGRESS_STRIDE) {
                tracing::debug!(
                    visited = stats.pixels_visited,
                    quads = stats.quads_emitted,
                    "projection progress"
                );
                if !observer(stats.pixels_visited, stats.pixels_total) {
                    stats.cancelled = true;
                    tracing::info!(
                        visited = stats.pixels_visited,
                        quads = stats.quads_emitted,
                        "projection cancelled"
                    );
                    return Ok((mesh, stats));
                }
            }
        }
    }

    tracing::info!(
        quads = stats.quads_emitted,
        skipped = stats.skipped_max_depth,
        degenerate = stats.degenerate_pixels,
        "projection finished"
    );
    Ok((mesh, stats))
}

/// Parallel pass: rows are split into bands, each band accumulates a private
/// mesh on a pool thread, and the bands are merged in row order afterwards.
/// The result is identical to the sequential pass.
pub fn project_parallel(
    depth: &DepthBuffer,
    color: &ColorBuffer,
    frustum: &CameraFrustum,
    cfg: &ProjectionConfig,
    threads: Option<usize>,
) -> PixmeshResult<(QuadMesh, ProjectionStats)> {
    validate_inputs(depth, color, cfg)?;
    let pool = build_thread_pool(threads)?;

    let rays = frustum.pixel_rays(depth.width(), depth.height());
    let rotation = frustum.rotation;
    let rows: Vec<u32> = (0..depth.height()).collect();

    let bands: Vec<(QuadMesh, ProjectionStats)> = pool.install(|| {
        rows.par_chunks(ROW_BAND)
            .map(|band| {
                let mut mesh = QuadMesh::with_capacity(band.len() * depth.width() as usize);
                let mut stats = ProjectionStats::default();
                for &y in band {
                    for x in 0..depth.width() {
                        project_one(
                            depth, color, &rays, rotation, cfg, x, y, &mut mesh, &mut stats,
                        );
                    }
                }
                (mesh, stats)
            })
            .collect()
    });

    let mut mesh = QuadMesh::with_capacity(depth.pixel_count());
    let mut stats = ProjectionStats {
        pixels_total: depth.pixel_count() as u64,
        ..ProjectionStats::default()
    };
    for (band_mesh, band_stats) in &bands {
        mesh.merge(band_mesh);
        stats.absorb(band_stats);
    }

    tracing::info!(
        quads = stats.quads_emitted,
        bands = bands.len(),
        "parallel projection finished"
    );
    Ok((mesh, stats))
}

#[allow(clippy::too_many_arguments)]
fn project_one(
    depth: &DepthBuffer,
    color: &ColorBuffer,
    rays: &PixelRays,
    rotation: Quat,
    cfg: &ProjectionConfig,
    x: u32,
    y: u32,
    mesh: &mut QuadMesh,
    stats: &mut ProjectionStats,
) {
    stats.pixels_visited += 1;

    let d = depth.get(x, y);
    if d >= cfg.max_depth {
        stats.skipped_max_depth += 1;
        return;
    }
    let Some(footprint) = project_pixel(rays, x, y, d) else {
        stats.degenerate_pixels += 1;
        return;
    };

    let rgba = color.get(x, y);
    let triggers = classify(depth, x, y, cfg.underlay_threshold);

    if triggers.any_horizontal() {
        append_quad(
            mesh,
            footprint.position,
            footprint.half_size,
            rotation,
            rgba,
            resolve_horizontal(cfg, triggers),
        );
        stats.quads_emitted += 1;
    }
    // a second, vertically extended quad keeps the diagonal corner covered
    // when both axes need underlay
    if triggers.any_vertical() || !triggers.any_horizontal() {
        append_quad(
            mesh,
            footprint.position,
            footprint.half_size,
            rotation,
            rgba,
            resolve_vertical(cfg, triggers),
        );
        stats.quads_emitted += 1;
    }
}

fn validate_inputs(
    depth: &DepthBuffer,
    color: &ColorBuffer,
    cfg: &ProjectionConfig,
) -> PixmeshResult<()> {
    cfg.validate()?;
    if depth.width() != color.width() || depth.height() != color.height() {
        return Err(PixmeshError::buffer(format!(
            "depth and color buffers must share dimensions, got {}x{} vs {}x{}",
            depth.width(),
            depth.height(),
            color.width(),
            color.height()
        )));
    }
    // worst case is 2 quads * 4 vertices per pixel; faces index with u32
    let worst_vertices = depth.pixel_count() as u64 * 8;
    if worst_vertices > u64::from(u32::MAX) {
        return Err(PixmeshError::validation(format!(
            "{}x{} capture can exceed u32 vertex indexing",
            depth.width(),
            depth.height()
        )));
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> PixmeshResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PixmeshError::validation(
            "projection 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PixmeshError::validation(format!("failed to build thread pool: {e}")))
}
