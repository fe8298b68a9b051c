//! Scrim is an on-screen-display compositor. It rasterizes a batch of 2D
//! primitives (axis-aligned and rotated rectangles, circles, shaped text
//! glyphs, segmentation masks and image stamps) onto an existing RGB, RGBA
//! or NV12 surface in place, and box-blurs rectangular regions of the same
//! surface for redaction.
//!
//! The API is plan-oriented:
//!
//! - Accumulate draw calls on a [`DrawList`] and [`DrawList::build`] it into
//!   an immutable [`DrawPlan`]
//! - Wrap the destination pixels in a [`SurfaceTarget`]
//! - [`compose`] the plan onto the target, optionally in parallel via
//!   [`ComposeOptions`]
//!
//! Submission order is composite order: later commands paint over earlier
//! ones. Blur regions are applied before any drawing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod compose;
mod foundation;
mod surface;

pub use crate::command::encode::DrawList;
pub use crate::command::{BoxBlurCommand, DrawPlan, TextLocation};
pub use crate::compose::{ComposeOptions, compose};
pub use crate::foundation::error::{ScrimError, ScrimResult};
pub use crate::foundation::geom::PixelRect;
pub use crate::surface::{SurfaceFormat, SurfaceTarget, block_linear_plane_len};
