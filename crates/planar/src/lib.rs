//! 2D affine-geometry kernel: points, parametric curves, paths, coordinate
//! transforms, and crossing-number containment/intersection queries.
//!
//! This is the mathematical substrate beneath a rendering or hit-testing
//! layer; it has no UI, no I/O, and produces no rendered output. Everything
//! here is single-threaded, synchronous value manipulation over IEEE doubles.
//!
//! Module map (leaf-first)
//! - `solve`: degree ≤ 3 polynomial root solving with ULP-scaled refinement.
//! - `curve`: Bézier curve types, flatness, subdivision, crossing primitives.
//! - `affine`: state-classified transforms with shortcut composition paths.
//! - `path`: growable segment storage plus the crossing-number query engine.
//! - `shape`, `cag`: the exposed shape contract and the consumed
//!   boolean-outline collaborator contract.
//! - `sample`: deterministic random-geometry generators for tests/benches.

pub mod affine;
pub mod cag;
pub mod curve;
pub mod error;
pub mod path;
pub mod sample;
pub mod shape;
pub mod solve;

pub mod api;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports to keep caller code close to the math notation.
pub use affine::{Affine2, Class, MatrixState};
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
pub use path::{Path, PathSeg, WindingRule};
pub use shape::{Rect, Shape};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::affine::{Affine2, Class, MatrixState};
    pub use crate::cag::{path_from_outline, AreaEngine, BoolOp};
    pub use crate::curve::{Cubic, Line, Quad, Segment};
    pub use crate::error::{InvalidWindingRule, NoninvertibleTransform};
    pub use crate::path::{Path, PathSeg, SegKind, Segments, WindingRule};
    pub use crate::shape::{Rect, Shape};
    pub use crate::solve::{solve_cubic, solve_quadratic, RootBuf};
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn parallelogram_area(a: Vec2<f64>, b: Vec2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
