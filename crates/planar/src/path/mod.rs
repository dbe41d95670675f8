//! Growable path storage and the crossing-number query engine.
//!
//! Purpose
//! - Store an ordered sequence of typed segments in two parallel growable
//!   buffers (segment tags and packed coordinates) plus a winding rule.
//! - Answer point containment and rectangle containment/intersection by
//!   accumulating crossing counts over every stored segment, delegating
//!   curve segments to `curve::cross`.
//!
//! Why this design
//! - Parallel flat buffers keep appends cheap and let a whole-path transform
//!   run as one batch pass over the coordinate array.
//! - Every open subpath contributes its implicit closing edge to crossing
//!   sums; omitting it would classify open subpaths as "outside" themselves.
//!
//! Invariants
//! - The first stored segment is always `MoveTo`; drawing verbs on an empty
//!   path panic ("missing initial moveto").
//! - `Close` stores no coordinates and targets the most recent `MoveTo`.
//!
//! Concurrency: a `Path` is a plain mutable value with no internal locking;
//! `&mut` aliasing rules already prevent mutation concurrent with iteration.
//!
//! References
//! - Code cross-refs: `curve::cross`, `affine::Affine2::transform_coords_within`,
//!   `shape::{Rect, Shape}`.

mod iter;

pub use iter::{PathSeg, Segments};

use nalgebra::{vector, Vector2};

use crate::affine::Affine2;
use crate::curve::cross::{self, RectCrossings};
use crate::curve::{Cubic, Quad};
use crate::error::InvalidWindingRule;
use crate::shape::{Rect, Shape};

/// Policy for deciding "inside" from an accumulated crossing count.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindingRule {
    /// Odd crossing count means inside.
    EvenOdd = 0,
    /// Any non-zero signed crossing count means inside.
    #[default]
    NonZero = 1,
}

impl TryFrom<u8> for WindingRule {
    type Error = InvalidWindingRule;

    fn try_from(v: u8) -> Result<Self, InvalidWindingRule> {
        match v {
            0 => Ok(WindingRule::EvenOdd),
            1 => Ok(WindingRule::NonZero),
            other => Err(InvalidWindingRule(other)),
        }
    }
}

/// Segment tag stored in the type buffer.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegKind {
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
    Close,
}

impl SegKind {
    /// Number of coordinate scalars the segment stores.
    #[inline]
    pub fn coord_count(self) -> usize {
        match self {
            SegKind::MoveTo | SegKind::LineTo => 2,
            SegKind::QuadTo => 4,
            SegKind::CubicTo => 6,
            SegKind::Close => 0,
        }
    }
}

/// Default capacity hint, in segments.
const INIT_SIZE: usize = 20;
/// Growth increment floor, in segments.
const EXPAND_MIN: usize = 10;
/// Per-growth increment cap, in segments.
const EXPAND_MAX: usize = 500;

/// Grow `vec` to hold `needed` more elements. Growth is geometric between a
/// floor and a cap; on allocation failure the increment is halved toward the
/// exact requirement before giving up. Size arithmetic that overflows the
/// address space fails immediately.
fn grow<T>(vec: &mut Vec<T>, needed: usize, floor: usize, cap: usize) {
    let len = vec.len();
    let Some(total) = len.checked_add(needed) else {
        panic!("path storage exceeds addressable capacity");
    };
    if total <= vec.capacity() {
        return;
    }
    let increment = if len > cap {
        cap.max(len >> 3)
    } else {
        len.clamp(floor, cap)
    };
    let mut request = needed.max(increment);
    loop {
        match vec.try_reserve_exact(request) {
            Ok(()) => return,
            Err(_) if request > needed => {
                request = needed + (request - needed) / 2;
                tracing::trace!(request, "path buffer growth retrying with smaller increment");
            }
            Err(err) => panic!("path storage allocation failed: {err}"),
        }
    }
}

/// Ordered segment store with a winding rule.
#[derive(Clone, Debug)]
pub struct Path {
    kinds: Vec<SegKind>,
    coords: Vec<f64>,
    winding: WindingRule,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    /// Empty path with the default capacity hint and winding rule.
    pub fn new() -> Self {
        Self::with_capacity(INIT_SIZE)
    }

    /// Empty path sized for about `segments` segments.
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            kinds: Vec::with_capacity(segments),
            coords: Vec::with_capacity(segments * 2),
            winding: WindingRule::default(),
        }
    }

    pub fn with_winding(winding: WindingRule) -> Self {
        let mut p = Self::new();
        p.winding = winding;
        p
    }

    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding
    }

    #[inline]
    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.winding = rule;
    }

    /// Number of stored segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// The end point of the last segment; after a `Close`, the origin of the
    /// closed subpath. `None` for an empty path.
    pub fn current_point(&self) -> Option<Vector2<f64>> {
        if self.kinds.is_empty() {
            return None;
        }
        let mut index = self.coords.len();
        if *self.kinds.last().unwrap() == SegKind::Close {
            for &kind in self.kinds[..self.kinds.len() - 1].iter().skip(1).rev() {
                match kind {
                    SegKind::MoveTo => break,
                    SegKind::Close => {}
                    other => index -= other.coord_count(),
                }
            }
        }
        Some(vector![self.coords[index - 2], self.coords[index - 1]])
    }

    fn need_room(&mut self, need_move: bool, new_coords: usize) {
        if need_move && self.kinds.is_empty() {
            panic!("missing initial moveto in path definition");
        }
        grow(&mut self.kinds, 1, EXPAND_MIN, EXPAND_MAX);
        grow(&mut self.coords, new_coords, EXPAND_MIN * 2, EXPAND_MAX * 2);
    }

    /// Begin a new subpath. A `MoveTo` directly on top of another overwrites
    /// it instead of appending a dead point.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if self.kinds.last() == Some(&SegKind::MoveTo) {
            let n = self.coords.len();
            self.coords[n - 2] = x;
            self.coords[n - 1] = y;
        } else {
            self.need_room(false, 2);
            self.kinds.push(SegKind::MoveTo);
            self.coords.push(x);
            self.coords.push(y);
        }
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.need_room(true, 2);
        self.kinds.push(SegKind::LineTo);
        self.coords.push(x);
        self.coords.push(y);
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.need_room(true, 4);
        self.kinds.push(SegKind::QuadTo);
        self.coords.extend_from_slice(&[cx, cy, x, y]);
    }

    pub fn cubic_to(&mut self, c0x: f64, c0y: f64, c1x: f64, c1y: f64, x: f64, y: f64) {
        self.need_room(true, 6);
        self.kinds.push(SegKind::CubicTo);
        self.coords.extend_from_slice(&[c0x, c0y, c1x, c1y, x, y]);
    }

    /// Close the current subpath back to its `MoveTo` point. Repeated closes
    /// collapse into one.
    pub fn close_path(&mut self) {
        if self.kinds.last() != Some(&SegKind::Close) {
            self.need_room(true, 0);
            self.kinds.push(SegKind::Close);
        }
    }

    /// Truncate to empty without releasing storage.
    pub fn reset(&mut self) {
        self.kinds.clear();
        self.coords.clear();
    }

    /// Release spare capacity.
    pub fn trim_to_size(&mut self) {
        self.kinds.shrink_to_fit();
        self.coords.shrink_to_fit();
    }

    /// Append every segment of `segs`. With `connect`, a leading `MoveTo`
    /// onto a non-empty path becomes a `LineTo` — or is dropped when it
    /// targets the current endpoint exactly and the path is not freshly
    /// closed.
    pub fn append<I>(&mut self, segs: I, connect: bool)
    where
        I: IntoIterator<Item = PathSeg>,
    {
        let mut connect = connect;
        for seg in segs {
            match seg {
                PathSeg::MoveTo(p) => {
                    if !connect || self.kinds.is_empty() {
                        self.move_to(p.x, p.y);
                    } else {
                        let n = self.coords.len();
                        if self.kinds.last() != Some(&SegKind::Close)
                            && self.coords[n - 2] == p.x
                            && self.coords[n - 1] == p.y
                        {
                            // Redundant connecting segment; skip it.
                        } else {
                            self.line_to(p.x, p.y);
                        }
                    }
                }
                PathSeg::LineTo(p) => self.line_to(p.x, p.y),
                PathSeg::QuadTo(c, p) => self.quad_to(c.x, c.y, p.x, p.y),
                PathSeg::CubicTo(c0, c1, p) => {
                    self.cubic_to(c0.x, c0.y, c1.x, c1.y, p.x, p.y)
                }
                PathSeg::Close => self.close_path(),
            }
            connect = false;
        }
    }

    /// Batch-transform every stored coordinate in place.
    pub fn transform(&mut self, at: &Affine2) {
        let n = self.coords.len() / 2;
        at.transform_coords_within(&mut self.coords, 0, 0, n);
    }

    /// A transformed copy; `self` is untouched.
    pub fn transformed(&self, at: &Affine2) -> Path {
        let mut out = self.clone();
        out.transform(at);
        out
    }

    /// Fresh pass over the stored segments, optionally pre-transformed.
    pub fn segments(&self, tr: Option<&Affine2>) -> Segments<'_> {
        Segments::new(self, tr)
    }

    /// Control-polygon bounding box over all stored coordinates. An empty
    /// path reports a zero rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        let mut i = self.coords.len();
        if i == 0 {
            return Rect::from_origin_size(0.0, 0.0, 0.0, 0.0);
        }
        let mut y1 = self.coords[i - 1];
        let mut y2 = y1;
        let mut x1 = self.coords[i - 2];
        let mut x2 = x1;
        i -= 2;
        while i > 0 {
            let y = self.coords[i - 1];
            let x = self.coords[i - 2];
            i -= 2;
            if x < x1 {
                x1 = x;
            }
            if y < y1 {
                y1 = y;
            }
            if x > x2 {
                x2 = x;
            }
            if y > y2 {
                y2 = y;
            }
        }
        Rect::from_min_max(vector![x1, y1], vector![x2, y2])
    }

    // --- crossing queries --------------------------------------------------

    /// Point containment under the path's winding rule, with the half-open
    /// boundary convention (bottom/left edges of an upright box are inside,
    /// top/right outside). NaN or infinite inputs are never contained.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        if self.kinds.len() < 2 {
            return false;
        }
        let mask = match self.winding {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 1,
        };
        (self.point_crossings(x, y) & mask) != 0
    }

    /// True when the rectangle lies entirely inside the filled region.
    pub fn contains_rect(&self, r: &Rect) -> bool {
        if r.is_empty() {
            return false;
        }
        let mask = match self.winding {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 2,
        };
        match self.rect_crossings(r.min.x, r.min.y, r.max.x, r.max.y) {
            RectCrossings::Intersects => false,
            RectCrossings::Count(c) => (c & mask) != 0,
        }
    }

    /// True when the rectangle touches or overlaps the filled region.
    pub fn intersects_rect(&self, r: &Rect) -> bool {
        if r.is_empty() {
            return false;
        }
        let mask = match self.winding {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 2,
        };
        match self.rect_crossings(r.min.x, r.min.y, r.max.x, r.max.y) {
            RectCrossings::Intersects => true,
            RectCrossings::Count(c) => (c & mask) != 0,
        }
    }

    /// Signed crossings of the rightward ray from `(px, py)` with every
    /// stored segment, implicit closing edges included.
    fn point_crossings(&self, px: f64, py: f64) -> i32 {
        if self.kinds.is_empty() {
            return 0;
        }
        let coords = &self.coords;
        let mut movx = coords[0];
        let mut movy = coords[1];
        let mut curx = movx;
        let mut cury = movy;
        let mut crossings = 0;
        let mut ci = 2;
        for &kind in &self.kinds[1..] {
            match kind {
                SegKind::MoveTo => {
                    if cury != movy {
                        crossings +=
                            cross::point_crossings_for_line(px, py, curx, cury, movx, movy);
                    }
                    movx = coords[ci];
                    movy = coords[ci + 1];
                    curx = movx;
                    cury = movy;
                    ci += 2;
                }
                SegKind::LineTo => {
                    let endx = coords[ci];
                    let endy = coords[ci + 1];
                    ci += 2;
                    crossings += cross::point_crossings_for_line(px, py, curx, cury, endx, endy);
                    curx = endx;
                    cury = endy;
                }
                SegKind::QuadTo => {
                    let q = Quad::new(
                        vector![curx, cury],
                        vector![coords[ci], coords[ci + 1]],
                        vector![coords[ci + 2], coords[ci + 3]],
                    );
                    ci += 4;
                    crossings += cross::point_crossings_for_quad(px, py, &q);
                    curx = q.p1.x;
                    cury = q.p1.y;
                }
                SegKind::CubicTo => {
                    let c = Cubic::new(
                        vector![curx, cury],
                        vector![coords[ci], coords[ci + 1]],
                        vector![coords[ci + 2], coords[ci + 3]],
                        vector![coords[ci + 4], coords[ci + 5]],
                    );
                    ci += 6;
                    crossings += cross::point_crossings_for_cubic(px, py, &c);
                    curx = c.p1.x;
                    cury = c.p1.y;
                }
                SegKind::Close => {
                    if cury != movy {
                        crossings +=
                            cross::point_crossings_for_line(px, py, curx, cury, movx, movy);
                    }
                    curx = movx;
                    cury = movy;
                }
            }
        }
        if cury != movy {
            crossings += cross::point_crossings_for_line(px, py, curx, cury, movx, movy);
        }
        crossings
    }

    /// Crossing accumulation against the four rectangle edges, bailing out as
    /// soon as any segment proves a definite boundary intersection.
    fn rect_crossings(&self, rxmin: f64, rymin: f64, rxmax: f64, rymax: f64) -> RectCrossings {
        if self.kinds.is_empty() {
            return RectCrossings::ZERO;
        }
        let coords = &self.coords;
        let mut movx = coords[0];
        let mut movy = coords[1];
        let mut curx = movx;
        let mut cury = movy;
        let mut cr = RectCrossings::ZERO;
        let mut ci = 2;
        for &kind in &self.kinds[1..] {
            if cr.is_intersects() {
                return cr;
            }
            match kind {
                SegKind::MoveTo => {
                    if curx != movx || cury != movy {
                        cr = cross::rect_crossings_for_line(
                            cr, rxmin, rymin, rxmax, rymax, curx, cury, movx, movy,
                        );
                    }
                    movx = coords[ci];
                    movy = coords[ci + 1];
                    curx = movx;
                    cury = movy;
                    ci += 2;
                }
                SegKind::LineTo => {
                    let endx = coords[ci];
                    let endy = coords[ci + 1];
                    ci += 2;
                    cr = cross::rect_crossings_for_line(
                        cr, rxmin, rymin, rxmax, rymax, curx, cury, endx, endy,
                    );
                    curx = endx;
                    cury = endy;
                }
                SegKind::QuadTo => {
                    let q = Quad::new(
                        vector![curx, cury],
                        vector![coords[ci], coords[ci + 1]],
                        vector![coords[ci + 2], coords[ci + 3]],
                    );
                    ci += 4;
                    cr = cross::rect_crossings_for_quad(cr, rxmin, rymin, rxmax, rymax, &q);
                    curx = q.p1.x;
                    cury = q.p1.y;
                }
                SegKind::CubicTo => {
                    let c = Cubic::new(
                        vector![curx, cury],
                        vector![coords[ci], coords[ci + 1]],
                        vector![coords[ci + 2], coords[ci + 3]],
                        vector![coords[ci + 4], coords[ci + 5]],
                    );
                    ci += 6;
                    cr = cross::rect_crossings_for_cubic(cr, rxmin, rymin, rxmax, rymax, &c);
                    curx = c.p1.x;
                    cury = c.p1.y;
                }
                SegKind::Close => {
                    if curx != movx || cury != movy {
                        cr = cross::rect_crossings_for_line(
                            cr, rxmin, rymin, rxmax, rymax, curx, cury, movx, movy,
                        );
                    }
                    curx = movx;
                    cury = movy;
                }
            }
        }
        if !cr.is_intersects() && (curx != movx || cury != movy) {
            cr = cross::rect_crossings_for_line(
                cr, rxmin, rymin, rxmax, rymax, curx, cury, movx, movy,
            );
        }
        cr
    }
}

impl Shape for Path {
    fn bounds(&self) -> Rect {
        Path::bounds(self)
    }

    fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.contains(p.x, p.y)
    }

    fn contains_rect(&self, r: &Rect) -> bool {
        Path::contains_rect(self, r)
    }

    fn intersects_rect(&self, r: &Rect) -> bool {
        Path::intersects_rect(self, r)
    }

    fn segments<'a>(&'a self, tr: Option<&Affine2>) -> Box<dyn Iterator<Item = PathSeg> + 'a> {
        Box::new(Path::segments(self, tr))
    }
}
