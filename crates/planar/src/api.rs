//! Curated internal API surface (UNSTABLE).
//!
//! Important
//! - This is not a stable public API; it is a convenience surface for
//!   project-internal callers. Breaking changes are allowed and expected.
//! - Prefer these re-exports for clarity and consistency across callers.

// Affine transform engine
pub use crate::affine::{Affine2, Class, MatrixState};
// Curve math and crossing primitives
pub use crate::curve::cross::{
    point_crossings_for_cubic, point_crossings_for_line, point_crossings_for_quad,
    rect_crossings_for_cubic, rect_crossings_for_line, rect_crossings_for_quad, RectCrossings,
};
pub use crate::curve::{Cubic, Line, Quad, Segment};
// Scalar root solver
pub use crate::solve::{solve_cubic, solve_quadratic, ulp, RootBuf};
// Path storage and queries
pub use crate::path::{Path, PathSeg, SegKind, Segments, WindingRule};
// Shape contract and rectangle value
pub use crate::shape::{Rect, Shape};
// CAG collaborator contract
pub use crate::cag::{outline_of, path_from_outline, AreaEngine, BoolOp};
// Deterministic samplers
pub use crate::sample::{draw_affine, draw_path, draw_point, AffineCfg, PathCfg, ReplayToken};
// Errors
pub use crate::error::{InvalidWindingRule, NoninvertibleTransform};
