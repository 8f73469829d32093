//! Vector path geometry: the compiled drawing-command representation, the path-data
//! parser, and the analytic bounds calculator.

pub mod bounds;
pub mod parser;
pub mod tokenizer;

use crate::geom::Rect;

/// A single drawing primitive in a compiled path.
///
/// Each op consumes a fixed number of values from the flat point array:
/// 2 for `Move`/`Line`, 4 for `Quad`, 6 for `Cubic`, 7 for `Arc`
/// (rx, ry, rotation in degrees, large-arc flag, sweep flag, x, y), 0 for `Close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOp {
    Move,
    Line,
    Quad,
    Cubic,
    Arc,
    Close,
}

impl PathOp {
    pub fn point_count(self) -> usize {
        match self {
            PathOp::Move | PathOp::Line => 2,
            PathOp::Quad => 4,
            PathOp::Cubic => 6,
            PathOp::Arc => 7,
            PathOp::Close => 0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PathOp::Move => 'M',
            PathOp::Line => 'L',
            PathOp::Quad => 'Q',
            PathOp::Cubic => 'C',
            PathOp::Arc => 'A',
            PathOp::Close => 'Z',
        }
    }
}

/// The parser's output: an op sequence plus a flat coordinate array.
///
/// Immutable once constructed; rebuilt wholesale when the source path data changes.
/// A path that failed to parse keeps whatever was accumulated before the first
/// unparseable token, with [`CompiledPath::failed`] set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledPath {
    ops: Vec<PathOp>,
    points: Vec<f64>,
    failed: bool,
}

impl CompiledPath {
    /// Builds a compiled path from pre-assembled parts, checking the op/point-count
    /// invariant. Returns `None` if an op would run past the end of the point array.
    pub fn from_parts(ops: Vec<PathOp>, points: Vec<f64>) -> Option<Self> {
        let needed: usize = ops.iter().map(|op| op.point_count()).sum();
        if needed != points.len() {
            return None;
        }
        Some(Self {
            ops,
            points,
            failed: false,
        })
    }

    pub(crate) fn push(&mut self, op: PathOp, values: &[f64]) {
        debug_assert_eq!(values.len(), op.point_count());
        self.ops.push(op);
        self.points.extend_from_slice(values);
    }

    pub(crate) fn mark_failed(&mut self) {
        self.failed = true;
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// True if parsing stopped before consuming the whole input.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// A path is only worth drawing if it parsed cleanly and contains at least one
    /// op other than `Move`/`Close`. A path that only moves around is treated as empty.
    pub fn is_drawable(&self) -> bool {
        !self.failed
            && self
                .ops
                .iter()
                .any(|op| !matches!(op, PathOp::Move | PathOp::Close))
    }

    /// Renders the compiled form back to an absolute-coordinate path string.
    ///
    /// Diagnostic surface: the output round-trips through [`parser::parse`] but is not
    /// guaranteed to be byte-identical to the original source text.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let mut i = 0usize;
        for op in &self.ops {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push(op.letter());
            let n = op.point_count();
            for (k, v) in self.points[i..i + n].iter().enumerate() {
                if k > 0 {
                    out.push(',');
                }
                out.push_str(&format!("{v}"));
            }
            i += n;
        }
        out
    }
}

/// The closed set of drawable outline shapes.
///
/// Most variants are pure data; only `General` needs the full command/point
/// representation. Dispatch is by pattern match rather than a virtual base type.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    },
    /// A rectangular ring: an outer rounded rect with an inner hole inset by
    /// `inset` on every side.
    Frame {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        inset: f64,
        radius: f64,
    },
    General(CompiledPath),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
            }
            | Shape::RoundedRect {
                x,
                y,
                width,
                height,
                ..
            }
            | Shape::Frame {
                x,
                y,
                width,
                height,
                ..
            } => crate::geom::rect(*x, *y, *width, *height),
            Shape::General(path) => bounds::bounds(path),
        }
    }

    pub fn is_drawable(&self) -> bool {
        match self {
            Shape::Rect { width, height, .. }
            | Shape::RoundedRect { width, height, .. }
            | Shape::Frame { width, height, .. } => *width > 0.0 && *height > 0.0,
            Shape::General(path) => path.is_drawable(),
        }
    }
}
