//! Page size calculations

/// Resolution at which one image pixel maps to one PDF point
pub const DEFAULT_DPI: f64 = 72.0;

/// Simple length type in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches * 72.0)
    }

    /// Create a length from a pixel count printed at `dpi`
    pub fn from_pixels(pixels: u32, dpi: f64) -> Self {
        Self::from_inches(f64::from(pixels) / dpi)
    }

    /// Get the value in points
    pub fn pt(&self) -> f64 {
        self.0
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: Length,
    pub height: Length,
}

impl PageSize {
    /// A page exactly covering a `width` x `height` pixel image
    pub fn for_pixels(width: u32, height: u32, dpi: f64) -> Self {
        Self {
            width: Length::from_pixels(width, dpi),
            height: Length::from_pixels(height, dpi),
        }
    }

    /// MediaBox rectangle `[0 0 w h]`
    pub fn media_box(&self) -> [f64; 4] {
        [0.0, 0.0, self.width.pt(), self.height.pt()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        assert!((Length::from_inches(1.0).pt() - 72.0).abs() < 0.001);
        assert!((Length::from_pixels(300, 300.0).pt() - 72.0).abs() < 0.001);
    }

    #[test]
    fn test_pixels_are_points_at_default_dpi() {
        let size = PageSize::for_pixels(600, 450, DEFAULT_DPI);
        assert_eq!(size.media_box(), [0.0, 0.0, 600.0, 450.0]);
    }

    #[test]
    fn test_higher_dpi_shrinks_page() {
        let size = PageSize::for_pixels(600, 450, 144.0);
        assert!((size.width.pt() - 300.0).abs() < 0.001);
        assert!((size.height.pt() - 225.0).abs() < 0.001);
    }
}
