use serde::{Deserialize, Serialize};

use crate::foundation::geom::PixelRect;

pub(crate) mod decode;
pub(crate) mod encode;

/// One glyph placement: a destination rectangle plus the column of the glyph
/// atlas row holding its coverage bytes.
///
/// Glyph shaping and atlas production happen outside this crate; a text line
/// is submitted as a slice of locations in left-to-right order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLocation {
    /// Destination x of the glyph's top-left corner.
    pub image_x: i32,
    /// Destination y of the glyph's top-left corner.
    pub image_y: i32,
    /// Starting byte column of this glyph inside the atlas row.
    pub text_x: i32,
    /// Glyph width in pixels.
    pub text_w: i32,
    /// Glyph height in pixels.
    pub text_h: i32,
}

/// A rectangular region to box-blur in place, with an odd kernel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxBlurCommand {
    /// Region to redact, inclusive destination pixels.
    pub rect: PixelRect,
    /// Odd box kernel edge length in tile samples.
    pub kernel_size: i32,
}

// Serialized command records: a 24-byte header (tag, padding, inclusive
// bounding box, RGBA color) followed by a fixed-size payload per tag. All
// fields little-endian. The offsets table indexes record starts so the
// stream stays relocatable; bulk payloads (masks, stamp pixels) live in the
// plan's side tables and records store their index.

pub(crate) const HEADER_BYTES: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CommandTag {
    Rectangle = 1,
    Circle = 2,
    Text = 3,
    Segment = 4,
    RgbaSource = 5,
    Nv12Source = 6,
}

impl CommandTag {
    pub(crate) fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Rectangle),
            2 => Some(Self::Circle),
            3 => Some(Self::Text),
            4 => Some(Self::Segment),
            5 => Some(Self::RgbaSource),
            6 => Some(Self::Nv12Source),
            _ => None,
        }
    }

    pub(crate) fn payload_bytes(self) -> usize {
        match self {
            Self::Rectangle => 72,
            Self::Circle => 16,
            Self::Text => 8,
            Self::Segment => 24,
            Self::RgbaSource => 20,
            Self::Nv12Source => 24,
        }
    }
}

pub(crate) struct Nv12SourceData {
    pub(crate) luma: Vec<u8>,
    pub(crate) chroma: Vec<u8>,
}

/// A finished, immutable batch of serialized draw commands plus the side
/// tables they reference.
///
/// Built by [`DrawList`](crate::DrawList); borrowed read-only by
/// [`compose`](crate::compose) for the duration of one call.
pub struct DrawPlan {
    pub(crate) commands: Vec<u8>,
    pub(crate) offsets: Vec<i32>,
    pub(crate) text_locations: Vec<TextLocation>,
    pub(crate) line_location_base: Vec<i32>,
    pub(crate) atlas: Vec<u8>,
    pub(crate) atlas_width: u32,
    pub(crate) masks: Vec<Vec<f32>>,
    pub(crate) rgba_sources: Vec<Vec<u8>>,
    pub(crate) nv12_sources: Vec<Nv12SourceData>,
    pub(crate) blurs: Vec<BoxBlurCommand>,
    pub(crate) bounds: Option<PixelRect>,
    pub(crate) rotate_msaa: bool,
}

impl DrawPlan {
    /// Number of serialized draw commands (blur regions not included).
    pub fn num_commands(&self) -> usize {
        self.offsets.len()
    }

    /// Number of box-blur regions.
    pub fn num_blurs(&self) -> usize {
        self.blurs.len()
    }

    /// `true` when the plan holds neither draw commands nor blur regions.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty() && self.blurs.is_empty()
    }

    /// Union of all draw-command bounding boxes, `None` when there are no
    /// draw commands.
    pub fn bounds(&self) -> Option<PixelRect> {
        self.bounds
    }

    /// `true` when any rectangle needs the rotation/multisample path.
    pub fn rotate_msaa(&self) -> bool {
        self.rotate_msaa
    }
}
