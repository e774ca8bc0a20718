//! Lowering a composite plan to an ffmpeg filter chain.
//!
//! The chain starts with the fixed horizontal mirror (`hflip`) and then
//! emits one filter per draw op in plan order: `drawbox` for highlights,
//! `drawtext` for words. Filter order is draw order, which is how the
//! highlight-beneath-text contract reaches the encoder. Every overlay
//! filter is gated by `enable='gte(t,S)*lt(t,E)'` so it renders only inside
//! its half-open visibility window (`between()` is closed on both ends).

use std::path::Path;

use caplit_caption_core::{CompositePlan, PrimitiveKind};

/// Visual styling for the caption overlay filters.
#[derive(Debug, Clone)]
pub struct FilterStyle {
    pub font_path: std::path::PathBuf,
    pub font_size_px: u32,
    pub text_color: String,
    pub highlight_color: String,
}

/// Build the complete `-vf` chain for a composite plan.
pub fn build_filter_chain(plan: &CompositePlan, style: &FilterStyle) -> String {
    let mut filters = vec!["hflip".to_string()];

    for op in plan.ops() {
        let primitive = &op.primitive;
        let start = primitive.start_secs;
        let end = primitive.end_secs();

        match primitive.kind {
            PrimitiveKind::Highlight => filters.push(format!(
                "drawbox=x=(iw-{w})/2:y=(ih-{h})/2:w={w}:h={h}:color={color}:t=fill\
                 :enable='gte(t\\,{start:.3})*lt(t\\,{end:.3})'",
                w = primitive.width_px,
                h = primitive.height_px,
                color = style.highlight_color,
            )),
            PrimitiveKind::Text => filters.push(format!(
                "drawtext=fontfile={font}:text='{text}':fontsize={size}:fontcolor={color}\
                 :x=(w-text_w)/2:y=(h-text_h)/2\
                 :enable='gte(t\\,{start:.3})*lt(t\\,{end:.3})'",
                font = escape_filter_path(&style.font_path),
                text = escape_drawtext(&primitive.text),
                size = style.font_size_px,
                color = style.text_color,
            )),
        }
    }

    filters.join(",")
}

/// Escape a word for splicing into a single-quoted drawtext argument.
///
/// Inside single quotes only the quote itself is special at the filtergraph
/// level; it has to close the string, insert an escaped quote, and reopen.
fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "'\\''")
}

/// Escape a font path for use as an unquoted filter option value.
fn escape_filter_path(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use caplit_caption_core::{build_overlay_pairs, plan_composite, GlyphMetrics};
    use caplit_caption_model::CaptionEvent;

    fn style() -> FilterStyle {
        FilterStyle {
            font_path: "fonts/Montserrat-ExtraBold.ttf".into(),
            font_size_px: 60,
            text_color: "white".to_string(),
            highlight_color: "blue".to_string(),
        }
    }

    fn chain_for(events: &[CaptionEvent]) -> String {
        let measurer = GlyphMetrics::with_font_size(60);
        let plan = plan_composite(build_overlay_pairs(events, &measurer));
        build_filter_chain(&plan, &style())
    }

    #[test]
    fn test_mirror_comes_first() {
        let chain = chain_for(&[CaptionEvent::clamped(0.0, 1.0, "hello")]);
        assert!(chain.starts_with("hflip,"));
    }

    #[test]
    fn test_empty_plan_is_mirror_only() {
        let chain = chain_for(&[]);
        assert_eq!(chain, "hflip");
    }

    #[test]
    fn test_drawbox_precedes_drawtext_per_event() {
        let chain = chain_for(&[
            CaptionEvent::clamped(0.0, 1.0, "hello"),
            CaptionEvent::clamped(1.0, 1.0, "world"),
        ]);

        let kinds: Vec<&str> = chain
            .split(',')
            .filter_map(|f| {
                if f.starts_with("drawbox") {
                    Some("box")
                } else if f.starts_with("drawtext") {
                    Some("text")
                } else {
                    None
                }
            })
            .collect();
        assert_eq!(kinds, vec!["box", "text", "box", "text"]);
    }

    #[test]
    fn test_enable_window_is_half_open() {
        let chain = chain_for(&[CaptionEvent::clamped(1.5, 0.25, "ok")]);
        assert!(chain.contains("gte(t\\,1.500)"));
        assert!(chain.contains("lt(t\\,1.750)"));
        assert!(!chain.contains("between"));
    }

    #[test]
    fn test_highlight_box_is_centered_and_filled() {
        let chain = chain_for(&[CaptionEvent::clamped(0.0, 1.0, "word")]);
        let measurer = GlyphMetrics::with_font_size(60);
        use caplit_caption_core::TextMeasurer;
        let extent = measurer.measure("word");

        assert!(chain.contains(&format!("w={}", extent.width_px)));
        assert!(chain.contains(&format!("x=(iw-{})/2", extent.width_px)));
        assert!(chain.contains("t=fill"));
        assert!(chain.contains("color=blue"));
    }

    #[test]
    fn test_drawtext_escapes_apostrophe() {
        let chain = chain_for(&[CaptionEvent::clamped(0.0, 1.0, "don't")]);
        assert!(!chain.contains("text='don't'"));
        assert!(chain.contains("don"));
    }
}
