use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::command::DrawPlan;
use crate::command::decode::decode_commands;
use crate::compose::kernel::{FrameData, composite_band};
use crate::foundation::error::{ScrimError, ScrimResult};
use crate::foundation::geom::PixelRect;
use crate::surface::block_linear::BlockNv12Band;
use crate::surface::pitch::{PitchNv12Band, RgbBand, RgbaBand};
use crate::surface::{BAND_ROW_ALIGN, BandSplit, SurfaceFormat, SurfaceTarget};

pub(crate) mod accumulator;
pub(crate) mod blur;
pub(crate) mod circle;
pub(crate) mod kernel;
pub(crate) mod rect;
pub(crate) mod segment;
pub(crate) mod stamp;
pub(crate) mod text;

/// Execution controls for [`compose`].
///
/// The defaults render sequentially; parallel rendering splits the surface
/// into horizontal bands and composites them on a rayon pool. Sequential and
/// parallel execution produce byte-identical surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    /// Composite bands on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (defaults to the rayon global
    /// heuristic).
    pub threads: Option<usize>,
    /// Rows per worker band; a positive multiple of 16 so NV12 chroma rows
    /// and GOB rows never straddle bands.
    pub band_rows: u32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            band_rows: 64,
        }
    }
}

/// Rasterize `plan` onto `target` in place: blur regions first, then the
/// draw commands in submission order.
///
/// An empty plan warns and leaves the surface untouched; so does a plan
/// whose commands all lie outside the surface. Invalid surfaces, options or
/// plans error before any pixel is written.
#[tracing::instrument(skip_all)]
pub fn compose(
    target: &mut SurfaceTarget<'_>,
    plan: &DrawPlan,
    opts: &ComposeOptions,
) -> ScrimResult<()> {
    target.validate()?;
    validate_options(opts)?;
    if plan.is_empty() {
        tracing::warn!("compose called with an empty draw plan");
        return Ok(());
    }

    // NV12 destinations blend in YUV, so vector/text command colors are
    // converted up front and the per-pixel loop never branches on colorspace.
    let yuv = matches!(
        target.format(),
        SurfaceFormat::BlockLinearNv12 | SurfaceFormat::PitchLinearNv12
    );
    let commands = decode_commands(plan, yuv)?;
    let frame = FrameData {
        commands: &commands,
        text_locations: &plan.text_locations,
        line_location_base: &plan.line_location_base,
        atlas: &plan.atlas,
        atlas_width: plan.atlas_width,
        masks: &plan.masks,
        rgba_sources: &plan.rgba_sources,
        nv12_sources: &plan.nv12_sources,
    };
    let grid = launch_grid(plan.bounds, target.width(), target.height());
    let rotate_msaa = plan.rotate_msaa;

    // One specialization per (format, rotation/multisample) pair, selected
    // here once; the per-pixel loops are monomorphic.
    match target {
        SurfaceTarget::Rgb {
            data,
            stride,
            width,
            height,
        } => run_passes(
            RgbBand::full(data, *stride, *width, *height),
            &frame,
            plan,
            grid,
            rotate_msaa,
            opts,
        ),
        SurfaceTarget::Rgba {
            data,
            stride,
            width,
            height,
        } => run_passes(
            RgbaBand::full(data, *stride, *width, *height),
            &frame,
            plan,
            grid,
            rotate_msaa,
            opts,
        ),
        SurfaceTarget::BlockLinearNv12 {
            luma,
            chroma,
            width,
            height,
        } => run_passes(
            BlockNv12Band::full(luma, chroma, *width, *height),
            &frame,
            plan,
            grid,
            rotate_msaa,
            opts,
        ),
        SurfaceTarget::PitchLinearNv12 {
            luma,
            chroma,
            stride,
            width,
            height,
        } => run_passes(
            PitchNv12Band::full(luma, chroma, *stride, *width, *height),
            &frame,
            plan,
            grid,
            rotate_msaa,
            opts,
        ),
    }
}

fn run_passes<B: BandSplit>(
    mut full: B,
    frame: &FrameData<'_>,
    plan: &DrawPlan,
    grid: Option<PixelRect>,
    rotate_msaa: bool,
    opts: &ComposeOptions,
) -> ScrimResult<()> {
    blur::run_blur(&mut full, &plan.blurs);

    let Some(grid) = grid else {
        if !frame.commands.is_empty() {
            tracing::warn!("all draw commands lie outside the destination surface");
        }
        return Ok(());
    };

    let kernel: fn(&mut B, PixelRect, &FrameData<'_>) = if rotate_msaa {
        composite_band::<B, true>
    } else {
        composite_band::<B, false>
    };

    if !opts.parallel {
        kernel(&mut full, grid, frame);
        return Ok(());
    }

    let pool = build_thread_pool(opts.threads)?;
    let bands = full.split_bands(opts.band_rows);
    pool.install(|| {
        bands
            .into_par_iter()
            .for_each(|mut band| kernel(&mut band, grid, frame));
    });
    Ok(())
}

/// Options are rejected up front so an invalid call never reaches the blur
/// or composite passes.
fn validate_options(opts: &ComposeOptions) -> ScrimResult<()> {
    if opts.band_rows == 0 || !opts.band_rows.is_multiple_of(BAND_ROW_ALIGN) {
        return Err(ScrimError::validation(format!(
            "band_rows must be a positive multiple of {BAND_ROW_ALIGN}"
        )));
    }
    if opts.threads == Some(0) {
        return Err(ScrimError::validation(
            "compose 'threads' must be >= 1 when set",
        ));
    }
    Ok(())
}

/// Clip the plan's command bounds to the surface and round the origin down
/// to the quad lattice. `None` means there is nothing to composite.
fn launch_grid(bounds: Option<PixelRect>, width: u32, height: u32) -> Option<PixelRect> {
    let b = bounds?;
    let clipped = b.intersect(PixelRect::new(0, 0, width as i32 - 1, height as i32 - 1));
    if clipped.is_empty() {
        return None;
    }
    Some(PixelRect::new(
        clipped.left & !1,
        clipped.top & !1,
        clipped.right,
        clipped.bottom,
    ))
}

fn build_thread_pool(threads: Option<usize>) -> ScrimResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScrimError::validation(
            "compose 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrimError::compose(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/grid.rs"]
mod grid_tests;

#[cfg(test)]
#[path = "../../tests/unit/compose/options.rs"]
mod options_tests;
