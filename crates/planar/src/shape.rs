//! Axis-aligned rectangle value and the common shape contract.
//!
//! `Rect` is plain query/bounds data, not a shape wrapper; the adapter types
//! that re-expose stored coordinates through the shape contract live outside
//! this kernel.

use nalgebra::{vector, Vector2};

use crate::affine::Affine2;
use crate::path::PathSeg;

/// Axis-aligned rectangle given by its min/max corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Rect {
    #[inline]
    pub fn from_min_max(min: Vector2<f64>, max: Vector2<f64>) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_origin_size(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: vector![x, y],
            max: vector![x + w, y + h],
        }
    }

    /// Smallest rectangle covering all points; `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Vector2<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut r = Rect {
            min: first,
            max: first,
        };
        for p in iter {
            r.union_point(p);
        }
        Some(r)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when the rectangle encloses no area. NaN extents compare false
    /// against everything and therefore count as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.max.x > self.min.x && self.max.y > self.min.y)
    }

    #[inline]
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow to cover `p`.
    pub fn union_point(&mut self, p: Vector2<f64>) {
        if p.x < self.min.x {
            self.min.x = p.x;
        }
        if p.y < self.min.y {
            self.min.y = p.y;
        }
        if p.x > self.max.x {
            self.max.x = p.x;
        }
        if p.y > self.max.y {
            self.max.y = p.y;
        }
    }
}

/// Common contract every geometry answers: bounds, containment and
/// intersection queries, and a segment iterator optionally pre-transformed
/// by a supplied affine transform.
pub trait Shape {
    fn bounds(&self) -> Rect;

    fn contains_point(&self, p: Vector2<f64>) -> bool;

    fn contains_rect(&self, r: &Rect) -> bool;

    fn intersects_rect(&self, r: &Rect) -> bool;

    /// Forward-only segment cursor; each call starts a fresh pass.
    fn segments<'a>(&'a self, tr: Option<&Affine2>) -> Box<dyn Iterator<Item = PathSeg> + 'a>;
}
