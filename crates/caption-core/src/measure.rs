//! Text measurement for highlight sizing.
//!
//! The highlight box must cover the rendered word exactly, so the word is
//! measured before the highlight is sized. Real glyph metrics live with the
//! renderer's font stack; this crate only defines the boundary and a
//! deterministic advance-class approximation good enough for box sizing.

/// Pixel extent of a rendered string at a fixed font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub width_px: u32,
    pub height_px: u32,
}

/// Glyph-metrics capability for a fixed font and size.
pub trait TextMeasurer: Send + Sync {
    /// Measure the bounding box of `text` rendered on a single line.
    fn measure(&self, text: &str) -> TextExtent;
}

/// Configuration for the heuristic measurer.
#[derive(Debug, Clone)]
pub struct GlyphMetricsConfig {
    /// Font size in pixels.
    pub font_size_px: u32,

    /// Advance width of a regular glyph, as a fraction of the font size.
    pub regular_advance: f64,

    /// Advance width of a narrow glyph (i, l, punctuation).
    pub narrow_advance: f64,

    /// Advance width of a wide glyph (m, w, uppercase).
    pub wide_advance: f64,

    /// Line height as a fraction of the font size.
    pub line_height: f64,
}

impl Default for GlyphMetricsConfig {
    fn default() -> Self {
        Self {
            font_size_px: 60,
            regular_advance: 0.58,
            narrow_advance: 0.30,
            wide_advance: 0.85,
            line_height: 1.2,
        }
    }
}

/// Deterministic advance-class text measurer.
///
/// Classifies each character as narrow, regular, or wide and sums scaled
/// advances. Not typographically exact, but monotone in text length and
/// stable across runs, which is what highlight sizing needs.
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    config: GlyphMetricsConfig,
}

impl GlyphMetrics {
    pub fn new(config: GlyphMetricsConfig) -> Self {
        Self { config }
    }

    pub fn with_font_size(font_size_px: u32) -> Self {
        Self::new(GlyphMetricsConfig {
            font_size_px,
            ..GlyphMetricsConfig::default()
        })
    }

    fn advance_for(&self, ch: char) -> f64 {
        match ch {
            'i' | 'j' | 'l' | 't' | 'f' | 'r' | '.' | ',' | '\'' | '!' | ':' | ';' | '|' => {
                self.config.narrow_advance
            }
            'm' | 'w' | 'M' | 'W' | '@' => self.config.wide_advance,
            c if c.is_uppercase() || c.is_numeric() => self.config.regular_advance * 1.15,
            _ => self.config.regular_advance,
        }
    }
}

impl TextMeasurer for GlyphMetrics {
    fn measure(&self, text: &str) -> TextExtent {
        let size = self.config.font_size_px as f64;
        let width: f64 = text.chars().map(|ch| self.advance_for(ch) * size).sum();
        TextExtent {
            width_px: width.ceil() as u32,
            height_px: (size * self.config.line_height).ceil() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_text_is_wider() {
        let metrics = GlyphMetrics::with_font_size(60);
        let short = metrics.measure("hi");
        let long = metrics.measure("hippopotamus");
        assert!(long.width_px > short.width_px);
    }

    #[test]
    fn test_height_scales_with_font_size() {
        let small = GlyphMetrics::with_font_size(30).measure("word");
        let large = GlyphMetrics::with_font_size(60).measure("word");
        assert_eq!(large.height_px, small.height_px * 2);
        assert!(large.width_px > small.width_px);
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        let extent = GlyphMetrics::with_font_size(60).measure("");
        assert_eq!(extent.width_px, 0);
        assert!(extent.height_px > 0);
    }

    #[test]
    fn test_measurement_is_deterministic() {
        let metrics = GlyphMetrics::with_font_size(60);
        assert_eq!(metrics.measure("stable"), metrics.measure("stable"));
    }
}
