//! Contract for the external constructive-area-geometry collaborator.
//!
//! The boolean outline engine itself lives outside this kernel; it is
//! consumed as an opaque "combine two outlines into a new outline" service.
//! This module defines that contract plus the conversions between stored
//! paths and the flat curve-list representation the engine works on.

use nalgebra::Vector2;

use crate::curve::{Cubic, Line, Quad, Segment};
use crate::path::{Path, PathSeg};

/// Boolean operator applied to two outlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    Add,
    Subtract,
    Intersect,
    Xor,
}

/// External boolean-outline engine.
///
/// Each `combine` call returns an immutable snapshot: iterating a result
/// stays valid while the *source* operands are mutated afterwards. That
/// guarantee belongs to the engine; `Path` itself makes no such promise.
pub trait AreaEngine {
    fn combine(&self, op: BoolOp, lhs: &[Segment], rhs: &[Segment]) -> Vec<Segment>;
}

/// Flatten a segment stream into the engine's curve list with absolute
/// coordinates. Open subpaths get their implicit closing edge materialized,
/// so the outline always encloses area.
pub fn outline_of<I>(segs: I) -> Vec<Segment>
where
    I: IntoIterator<Item = PathSeg>,
{
    let mut out = Vec::new();
    let mut mov: Option<Vector2<f64>> = None;
    let mut cur = Vector2::zeros();
    for seg in segs {
        match seg {
            PathSeg::MoveTo(p) => {
                close_open(&mut out, mov, cur);
                mov = Some(p);
                cur = p;
            }
            PathSeg::LineTo(p) => {
                out.push(Segment::Line(Line::new(cur, p)));
                cur = p;
            }
            PathSeg::QuadTo(c, p) => {
                out.push(Segment::Quad(Quad::new(cur, c, p)));
                cur = p;
            }
            PathSeg::CubicTo(c0, c1, p) => {
                out.push(Segment::Cubic(Cubic::new(cur, c0, c1, p)));
                cur = p;
            }
            PathSeg::Close => {
                if let Some(m) = mov {
                    if cur != m {
                        out.push(Segment::Line(Line::new(cur, m)));
                    }
                    cur = m;
                }
            }
        }
    }
    close_open(&mut out, mov, cur);
    tracing::trace!(segments = out.len(), "converted path to outline");
    out
}

fn close_open(out: &mut Vec<Segment>, mov: Option<Vector2<f64>>, cur: Vector2<f64>) {
    if let Some(m) = mov {
        if cur != m {
            out.push(Segment::Line(Line::new(cur, m)));
        }
    }
}

/// Rebuild a path from an engine result. A `MoveTo` is emitted wherever the
/// next curve does not start at the current point, and every contiguous run
/// is closed.
pub fn path_from_outline(outline: &[Segment]) -> Path {
    let mut path = Path::with_capacity(outline.len() + 2);
    let mut cur: Option<Vector2<f64>> = None;
    for seg in outline {
        let start = seg.start();
        if cur != Some(start) {
            if cur.is_some() {
                path.close_path();
            }
            path.move_to(start.x, start.y);
        }
        match seg {
            Segment::Line(l) => path.line_to(l.p1.x, l.p1.y),
            Segment::Quad(q) => path.quad_to(q.c.x, q.c.y, q.p1.x, q.p1.y),
            Segment::Cubic(c) => {
                path.cubic_to(c.c0.x, c.c0.y, c.c1.x, c.c1.y, c.p1.x, c.p1.y)
            }
        }
        cur = Some(seg.end());
    }
    if cur.is_some() {
        path.close_path();
    }
    path
}
