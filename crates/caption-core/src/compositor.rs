//! Composite planning: base track plus time-windowed overlay draws.
//!
//! The plan is pure data consumed by the render backend; the order of
//! [`DrawOp`]s IS the draw order. The one hard ordering contract: for every
//! caption event the highlight is drawn beneath the text, otherwise the box
//! obscures the word. Temporal overlap between unrelated events is tolerated
//! (the speech engine's word timestamps are not checked for overlap); among
//! overlapping events the later op in plan order wins visually.

use crate::overlay::OverlayPrimitive;

/// A single draw instruction over the base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    /// Position in the draw order; the base track is layer 0.
    pub layer: usize,

    /// The element to draw, with its own visibility window.
    pub primitive: OverlayPrimitive,
}

/// One composited timeline: the base track plus ordered overlay draws.
#[derive(Debug, Clone, Default)]
pub struct CompositePlan {
    ops: Vec<DrawOp>,
}

impl CompositePlan {
    /// Draw instructions in order, bottom-most first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Ops whose visibility window contains `t`, in draw order.
    pub fn visible_at(&self, t: f64) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| op.primitive.visible_at(t))
            .collect()
    }
}

/// Build the composite plan from overlay primitives.
///
/// Primitives arrive as highlight/text pairs in event order (the builder's
/// output contract) and are laid out bottom-up in that same order, which
/// places every highlight beneath its word.
pub fn plan_composite(primitives: Vec<OverlayPrimitive>) -> CompositePlan {
    let ops = primitives
        .into_iter()
        .enumerate()
        .map(|(i, primitive)| DrawOp {
            layer: i + 1,
            primitive,
        })
        .collect();

    CompositePlan { ops }
}
