//! Placement geometry calculations
//!
//! Pure math with no PDF codec types, so the compositor's placement rules
//! can be tested on their own. All values are in PDF points (1/72 inch),
//! coordinate origin at the bottom-left of the page.

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }
}

/// A placement rectangle in page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Check that a scale factor is usable: positive and finite
pub fn is_valid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}

/// Calculate where a scaled header page lands on a target page
///
/// The header is anchored to the target's top-left corner: its top edge
/// aligns with the target's top edge, its left edge with the target's left
/// edge. Since page space puts the origin at the bottom-left, that means
/// `y = target.height - header.height * scale`.
///
/// No clamping is applied: a header larger than the target overflows the
/// page boundary, and `y` may go negative.
pub fn placement(target: PageSize, header: PageSize, scale: f32) -> Rect {
    Rect {
        x: 0.0,
        y: target.height - header.height * scale,
        width: header.width * scale,
        height: header.height * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_preserves_size() {
        let rect = placement(PageSize::letter(), PageSize::new(200.0, 100.0), 1.0);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.height, 100.0);
    }

    #[test]
    fn test_top_left_anchoring() {
        let rect = placement(PageSize::letter(), PageSize::new(200.0, 100.0), 0.5);
        assert_eq!(rect.x, 0.0);
        // Top edge of the scaled header meets the top edge of the page
        assert_eq!(rect.y + rect.height, 792.0);
        assert_eq!(rect.y, 742.0);
    }

    #[test]
    fn test_uniform_scaling_preserves_aspect_ratio() {
        let header = PageSize::new(300.0, 120.0);
        let rect = placement(PageSize::letter(), header, 1.7);
        assert!((rect.width / rect.height - header.width / header.height).abs() < 1e-5);
    }

    #[test]
    fn test_oversized_header_overflows_without_clamping() {
        // Header taller than the target: y goes negative, nothing is clamped
        let rect = placement(PageSize::new(200.0, 100.0), PageSize::new(400.0, 300.0), 1.0);
        assert_eq!(rect.y, -200.0);
        assert_eq!(rect.width, 400.0);
    }

    #[test]
    fn test_scale_validity() {
        assert!(is_valid_scale(0.5));
        assert!(is_valid_scale(3.0));
        assert!(!is_valid_scale(0.0));
        assert!(!is_valid_scale(-1.0));
        assert!(!is_valid_scale(f32::NAN));
        assert!(!is_valid_scale(f32::INFINITY));
        assert!(!is_valid_scale(f32::NEG_INFINITY));
    }
}
