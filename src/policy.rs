//! Sizing policy: pure decisions about whether and how to resize.
//!
//! Every function here is side-effect free; the batch processor feeds it
//! dimensions read from the codec and acts on the returned plan.

use crate::error::{ResizeError, Result};

/// Outcome of planning a resize for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub needed: bool,
    pub new_width: u32,
    pub new_height: u32,
}

/// An image needs resizing iff its long edge exceeds `max_edge`.
pub fn should_resize(width: u32, height: u32, max_edge: u32) -> bool {
    width.max(height) > max_edge
}

/// Scale the long edge down to `max_edge`, preserving aspect ratio.
///
/// The short edge is truncated, not rounded. Output pixel dimensions are
/// part of the contract: `1000x500` at `max_edge=542` is exactly `542x271`.
pub fn compute_new_size(width: u32, height: u32, max_edge: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidImage(format!(
            "image reports zero dimension ({}x{})",
            width, height
        )));
    }

    let (new_width, new_height) = if width > height {
        // Width is the long edge.
        (
            max_edge,
            (height as u64 * max_edge as u64 / width as u64) as u32,
        )
    } else {
        // Height is the long edge, square included.
        (
            (width as u64 * max_edge as u64 / height as u64) as u32,
            max_edge,
        )
    };

    Ok((new_width, new_height))
}

/// Combine the decision and the dimension computation.
///
/// When no resize is needed the plan carries the source dimensions
/// unchanged, so callers can report them without re-reading the image.
pub fn plan_resize(width: u32, height: u32, max_edge: u32) -> Result<ResizePlan> {
    if !should_resize(width, height, max_edge) {
        return Ok(ResizePlan {
            needed: false,
            new_width: width,
            new_height: height,
        });
    }

    let (new_width, new_height) = compute_new_size(width, height, max_edge)?;
    Ok(ResizePlan {
        needed: true,
        new_width,
        new_height,
    })
}

/// Map a 1-100 quality setting onto a PNG compression level in 0-9.
///
/// Quality 100 means no extra compression pass (level 0); quality 1 maps to
/// the maximum level 9. JPEG ignores this and uses the quality directly.
pub fn quality_to_compression_level(quality: u8) -> u8 {
    if quality >= 100 {
        return 0;
    }
    ((100 - quality) as u16 * 9 / 99) as u8
}
