//! Segment iteration over stored paths.
//!
//! The iterator is forward-only and restartable per call (each `segments()`
//! call starts a fresh pass), and may carry a transform applied to every
//! coordinate it yields. It borrows the path, so the borrow checker enforces
//! the no-mutation-during-iteration obligation at compile time.

use nalgebra::{vector, Vector2};

use super::{Path, SegKind};
use crate::affine::Affine2;

/// One path segment with absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSeg {
    MoveTo(Vector2<f64>),
    LineTo(Vector2<f64>),
    QuadTo(Vector2<f64>, Vector2<f64>),
    CubicTo(Vector2<f64>, Vector2<f64>, Vector2<f64>),
    Close,
}

/// Borrowing cursor over a path's segments.
pub struct Segments<'a> {
    kinds: &'a [SegKind],
    coords: &'a [f64],
    kind_idx: usize,
    coord_idx: usize,
    transform: Option<Affine2>,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(path: &'a Path, transform: Option<&Affine2>) -> Self {
        Self {
            kinds: &path.kinds,
            coords: &path.coords,
            kind_idx: 0,
            coord_idx: 0,
            transform: transform.copied(),
        }
    }

    #[inline]
    fn point(&mut self) -> Vector2<f64> {
        let p = vector![self.coords[self.coord_idx], self.coords[self.coord_idx + 1]];
        self.coord_idx += 2;
        match &self.transform {
            Some(tr) => tr.apply(p),
            None => p,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        let kind = *self.kinds.get(self.kind_idx)?;
        self.kind_idx += 1;
        Some(match kind {
            SegKind::MoveTo => PathSeg::MoveTo(self.point()),
            SegKind::LineTo => PathSeg::LineTo(self.point()),
            SegKind::QuadTo => PathSeg::QuadTo(self.point(), self.point()),
            SegKind::CubicTo => PathSeg::CubicTo(self.point(), self.point(), self.point()),
            SegKind::Close => PathSeg::Close,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.kinds.len() - self.kind_idx;
        (rem, Some(rem))
    }
}
