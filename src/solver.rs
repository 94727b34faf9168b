//! Resolution solver: the largest dimensions that fit a memory budget.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! The decoded size of an image is not simply `width × height × bpp`: each
//! row is padded so that it starts on an aligned byte offset, and that
//! padding is what a naive estimate under-counts. The solver therefore
//! iterates — seed a height from the unaligned ideal, measure the real
//! aligned footprint, and if it overshoots, re-estimate using the padded
//! stride in the denominator. The stride is non-increasing as the height
//! shrinks, so the loop converges.

use crate::format::PixelFormat;
use crate::imaging::Dimensions;

/// Byte boundary each scanline must start on in the decoded buffer.
pub const ROW_ALIGNMENT: u32 = 4;

/// Target dimensions and output DPI for one image, clamped to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub width: u32,
    pub height: u32,
    /// Output DPI, rescaled in proportion to the width reduction so print
    /// dimensions are preserved.
    pub dpi: u32,
}

impl ResizeSpec {
    /// Solve for `original` under `budget` bytes and clamp the result so it
    /// never exceeds the original dimensions.
    ///
    /// An original whose aligned buffer already fits the budget is returned
    /// unchanged, before quantization is ever applied — snapping a fitting
    /// image down to a DPI multiple would shrink something that needs no
    /// shrinking.
    pub fn for_image(
        original: Dimensions,
        format: PixelFormat,
        alignment: u32,
        budget: u64,
        dpi: u32,
    ) -> Self {
        // Saturating: dimensions come from untrusted file headers, and a
        // crafted ~2^31 square would overflow the multiply. A saturated
        // footprint still compares correctly against any real budget.
        let ideal = aligned_stride(original.width, format, alignment)
            .saturating_mul(original.height as u64);
        if ideal <= budget {
            return Self {
                width: original.width,
                height: original.height,
                dpi: dpi.max(1),
            };
        }
        let (w, h) = solve(original.width, original.height, format, alignment, budget, dpi);
        let width = w.min(original.width);
        let height = h.min(original.height);
        let out_dpi = ((width as f64) / (original.width as f64 / dpi.max(1) as f64)) as u32;
        Self {
            width,
            height,
            dpi: out_dpi.max(1),
        }
    }

    /// Whether acting on this spec would actually reduce the image.
    ///
    /// When the original already fits the budget the spec equals the
    /// original and nothing should be resized.
    pub fn shrinks(&self, original: Dimensions) -> bool {
        self.width < original.width || self.height < original.height
    }
}

/// Find the largest `(width, height)` preserving the original aspect ratio
/// whose aligned decoded buffer fits within `budget` bytes.
///
/// `dpi` quantization snaps the accepted width down to the nearest multiple
/// of `dpi` and recomputes the height from the snapped width; a `dpi` of 0
/// or 1 leaves the width as-is. When the snap (or a degenerate budget)
/// would produce a zero dimension, the result is floored to 1×1 — callers
/// gate on [`ResizeSpec::shrinks`], so a floor never upscales anything.
///
/// The result may exceed the original dimensions when the budget is large;
/// [`ResizeSpec::for_image`] applies the no-upscale clamp.
pub fn solve(
    original_width: u32,
    original_height: u32,
    format: PixelFormat,
    alignment: u32,
    budget: u64,
    dpi: u32,
) -> (u32, u32) {
    debug_assert!(original_width > 0 && original_height > 0);
    debug_assert!(alignment > 0);
    debug_assert!(budget > 0);

    let bpp = format.bytes_per_pixel() as u64;
    let alignment = alignment as u64;
    let ratio = original_width as f64 / original_height as f64;
    let dpi = dpi.max(1) as u64;

    let mut estimate = (budget as f64 / (bpp as f64 * ratio)).sqrt();

    loop {
        let height = estimate.floor() as u64;
        let width = (ratio * height as f64).floor() as u64;
        let stride = (width * bpp).div_ceil(alignment) * alignment;
        let total = stride * height;

        if total <= budget {
            let snapped = (width - width % dpi).clamp(1, u32::MAX as u64);
            let snapped_height =
                ((snapped as f64 / ratio).floor() as u64).clamp(1, u32::MAX as u64);
            return (snapped as u32, snapped_height as u32);
        }

        // The unaligned seed under-counts row padding; shrink using the
        // measured stride and try again.
        estimate = (budget as f64 / (stride as f64 * bpp as f64)).sqrt();
    }
}

/// Aligned byte length of one decoded row.
pub fn aligned_stride(width: u32, format: PixelFormat, alignment: u32) -> u64 {
    (width as u64 * format.bytes_per_pixel() as u64).div_ceil(alignment as u64) * alignment as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Decoded footprint of a solver result, row padding included.
    fn footprint(w: u32, h: u32, format: PixelFormat, alignment: u32) -> u64 {
        aligned_stride(w, format, alignment) * h as u64
    }

    // =========================================================================
    // solve: budget and aspect properties
    // =========================================================================

    #[test]
    fn spec_scenario_6000x4000_png_under_10mb() {
        // 6000x4000 ARGB, alignment 4, 10 MB budget, quantization off.
        let (w, h) = solve(6000, 4000, PixelFormat::Argb32, 4, 10_000_000, 0);

        assert!(footprint(w, h, PixelFormat::Argb32, 4) <= 10_000_000);
        let ratio = w as f64 / h as f64;
        assert!((ratio - 1.5).abs() < 0.01, "ratio {ratio} drifted from 1.5");
        // First estimate already fits: sqrt(1e7 / 6) ≈ 1290.99
        assert_eq!((w, h), (1935, 1290));
    }

    #[test]
    fn budget_respected_across_formats_and_alignments() {
        let cases = [
            (1920, 1080, PixelFormat::Rgb24, 4, 2_000_000),
            (4032, 3024, PixelFormat::Argb32, 4, 5_000_000),
            (333, 777, PixelFormat::Argb32, 8, 100_000),
            (1000, 10, PixelFormat::Indexed8, 64, 5_000),
            (10, 1000, PixelFormat::Rgb24, 16, 30_000),
        ];
        for (ow, oh, fmt, align, budget) in cases {
            let (w, h) = solve(ow, oh, fmt, align, budget, 0);
            assert!(
                footprint(w, h, fmt, align) <= budget,
                "{ow}x{oh} {fmt:?} align {align}: {w}x{h} exceeds {budget}"
            );
        }
    }

    #[test]
    fn aspect_ratio_preserved_within_rounding() {
        let (w, h) = solve(3000, 2000, PixelFormat::Argb32, 4, 1_000_000, 0);
        let original = 3000.0 / 2000.0;
        let solved = w as f64 / h as f64;
        assert!((solved - original).abs() < 0.02);
    }

    #[test]
    fn alignment_padding_forces_extra_iteration() {
        // Extreme landscape with a wide alignment boundary: the unaligned
        // seed (h=7, w=707) pads out to stride 768 and overshoots 5000
        // bytes, so the solver must re-estimate from the stride.
        let (w, h) = solve(1000, 10, PixelFormat::Indexed8, 64, 5_000, 0);
        assert_eq!((w, h), (200, 2));
        assert!(footprint(w, h, PixelFormat::Indexed8, 64) <= 5_000);
    }

    // =========================================================================
    // solve: DPI quantization
    // =========================================================================

    #[test]
    fn quantized_width_is_a_dpi_multiple() {
        for dpi in [72, 96, 300] {
            let (w, _) = solve(6000, 4000, PixelFormat::Argb32, 4, 10_000_000, dpi);
            assert_eq!(w % dpi, 0, "width {w} not a multiple of {dpi}");
        }
    }

    #[test]
    fn quantization_recomputes_height_from_snapped_width() {
        let (w, h) = solve(6000, 4000, PixelFormat::Argb32, 4, 10_000_000, 72);
        // 1935 snaps down to 1872; height follows the ratio.
        assert_eq!(w, 1872);
        assert_eq!(h, (1872.0 / 1.5) as u32);
    }

    #[test]
    fn dpi_of_one_leaves_width_unsnapped() {
        let plain = solve(6000, 4000, PixelFormat::Argb32, 4, 10_000_000, 0);
        let unit = solve(6000, 4000, PixelFormat::Argb32, 4, 10_000_000, 1);
        assert_eq!(plain, unit);
    }

    #[test]
    fn snap_to_zero_floors_at_one_pixel() {
        // Accepted width (50) is below the DPI unit (72): the modulo snap
        // would hit zero, so the solver floors at 1x1.
        let (w, h) = solve(100, 100, PixelFormat::Argb32, 4, 10_000, 72);
        assert_eq!((w, h), (1, 1));
    }

    #[test]
    fn tiny_budget_floors_at_one_pixel() {
        let (w, h) = solve(5000, 5000, PixelFormat::Argb32, 4, 3, 0);
        assert_eq!((w, h), (1, 1));
    }

    // =========================================================================
    // ResizeSpec: clamping and the shrink gate
    // =========================================================================

    #[test]
    fn large_budget_clamps_to_original() {
        let original = dims(800, 600);
        let spec = ResizeSpec::for_image(
            original,
            PixelFormat::Rgb24,
            ROW_ALIGNMENT,
            2 * 1024 * 1024 * 1024,
            1,
        );
        assert_eq!((spec.width, spec.height), (800, 600));
        assert!(!spec.shrinks(original));
    }

    #[test]
    fn fitting_image_is_never_quantized_down() {
        // 20x20 ARGB is 1,600 bytes — well under budget. The raw solver
        // candidate (50 wide) would snap to zero at 72 DPI; the fits-already
        // path must keep the original instead.
        let original = dims(20, 20);
        let spec = ResizeSpec::for_image(original, PixelFormat::Argb32, ROW_ALIGNMENT, 10_000, 72);
        assert_eq!((spec.width, spec.height), (20, 20));
        assert!(!spec.shrinks(original));
    }

    #[test]
    fn absurd_header_dimensions_do_not_overflow_the_fit_check() {
        // A crafted header can claim dimensions whose aligned footprint
        // exceeds u64; the fit check must saturate rather than wrap around
        // and misclassify the image as fitting.
        let original = dims(u32::MAX, u32::MAX);
        let spec = ResizeSpec::for_image(original, PixelFormat::Argb32, ROW_ALIGNMENT, 10_000, 1);
        assert!(spec.shrinks(original));
        assert_eq!((spec.width, spec.height), (50, 50));
        assert!(footprint(spec.width, spec.height, PixelFormat::Argb32, ROW_ALIGNMENT) <= 10_000);
    }

    #[test]
    fn tight_budget_shrinks_below_original() {
        let original = dims(6000, 4000);
        let spec =
            ResizeSpec::for_image(original, PixelFormat::Argb32, ROW_ALIGNMENT, 10_000_000, 1);
        assert!(spec.width < 6000 && spec.height < 4000);
        assert!(spec.shrinks(original));
    }

    #[test]
    fn output_dpi_scales_with_width_reduction() {
        let original = dims(6000, 4000);
        let spec =
            ResizeSpec::for_image(original, PixelFormat::Argb32, ROW_ALIGNMENT, 10_000_000, 300);
        // new_dpi = new_width / (6000 / 300); width snapped to 1800 here.
        assert_eq!(spec.width % 300, 0);
        assert_eq!(spec.dpi, spec.width / 20);
        assert!(spec.dpi < 300);
    }

    #[test]
    fn unreduced_image_keeps_its_dpi() {
        let original = dims(400, 300);
        let spec =
            ResizeSpec::for_image(original, PixelFormat::Rgb24, ROW_ALIGNMENT, u64::MAX / 2, 100);
        assert_eq!(spec.dpi, 100);
    }

    #[test]
    fn aligned_stride_pads_to_boundary() {
        assert_eq!(aligned_stride(10, PixelFormat::Indexed8, 4), 12);
        assert_eq!(aligned_stride(10, PixelFormat::Argb32, 4), 40);
        assert_eq!(aligned_stride(1, PixelFormat::Indexed8, 64), 64);
    }
}
