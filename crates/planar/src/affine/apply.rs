//! Point and batch application with per-state specialized loops.
//!
//! Purpose
//! - Map single points, point slices, and packed `[x, y]*` coordinate runs
//!   through the transform, reading only the matrix components the current
//!   state makes non-trivial.
//! - Honor the aliased-buffer contract: an overlapping in-slice transform
//!   whose destination starts past its source copies the source range first,
//!   then transforms in place (read fully, then write).
//!
//! References
//! - Code cross-refs: `path::Path::transform` (equal-offset in-place use).

use super::{Affine2, MatrixState};
use nalgebra::{vector, Vector2};

impl Affine2 {
    /// Transform a single point.
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        let (x, y) = (p.x, p.y);
        match self.state {
            MatrixState::General => vector![
                self.m00 * x + self.m01 * y + self.m02,
                self.m10 * x + self.m11 * y + self.m12
            ],
            MatrixState::ShearScale => {
                vector![self.m00 * x + self.m01 * y, self.m10 * x + self.m11 * y]
            }
            MatrixState::ShearTranslate => {
                vector![self.m01 * y + self.m02, self.m10 * x + self.m12]
            }
            MatrixState::Shear => vector![self.m01 * y, self.m10 * x],
            MatrixState::ScaleTranslate => {
                vector![self.m00 * x + self.m02, self.m11 * y + self.m12]
            }
            MatrixState::Scale => vector![self.m00 * x, self.m11 * y],
            MatrixState::Translate => vector![x + self.m02, y + self.m12],
            MatrixState::Identity => p,
        }
    }

    /// Transform a direction vector (the translation does not apply).
    pub fn apply_vector(&self, v: Vector2<f64>) -> Vector2<f64> {
        let (x, y) = (v.x, v.y);
        match self.state {
            MatrixState::General | MatrixState::ShearScale => {
                vector![self.m00 * x + self.m01 * y, self.m10 * x + self.m11 * y]
            }
            MatrixState::ShearTranslate | MatrixState::Shear => {
                vector![self.m01 * y, self.m10 * x]
            }
            MatrixState::ScaleTranslate | MatrixState::Scale => {
                vector![self.m00 * x, self.m11 * y]
            }
            MatrixState::Translate | MatrixState::Identity => v,
        }
    }

    /// Transform a slice of points in place.
    pub fn transform_points(&self, pts: &mut [Vector2<f64>]) {
        for p in pts.iter_mut() {
            *p = self.apply(*p);
        }
    }

    /// Transform `count` packed `[x, y]` pairs from `src` into `dst`
    /// (disjoint buffers; the borrow rules already rule out aliasing here).
    pub fn transform_coords(&self, src: &[f64], dst: &mut [f64], count: usize) {
        let n = count * 2;
        assert!(src.len() >= n, "source buffer too short");
        assert!(dst.len() >= n, "destination buffer too short");
        match self.state {
            MatrixState::General => {
                for i in (0..n).step_by(2) {
                    let (x, y) = (src[i], src[i + 1]);
                    dst[i] = self.m00 * x + self.m01 * y + self.m02;
                    dst[i + 1] = self.m10 * x + self.m11 * y + self.m12;
                }
            }
            MatrixState::ShearScale => {
                for i in (0..n).step_by(2) {
                    let (x, y) = (src[i], src[i + 1]);
                    dst[i] = self.m00 * x + self.m01 * y;
                    dst[i + 1] = self.m10 * x + self.m11 * y;
                }
            }
            MatrixState::ShearTranslate => {
                for i in (0..n).step_by(2) {
                    let (x, y) = (src[i], src[i + 1]);
                    dst[i] = self.m01 * y + self.m02;
                    dst[i + 1] = self.m10 * x + self.m12;
                }
            }
            MatrixState::Shear => {
                for i in (0..n).step_by(2) {
                    let (x, y) = (src[i], src[i + 1]);
                    dst[i] = self.m01 * y;
                    dst[i + 1] = self.m10 * x;
                }
            }
            MatrixState::ScaleTranslate => {
                for i in (0..n).step_by(2) {
                    dst[i] = self.m00 * src[i] + self.m02;
                    dst[i + 1] = self.m11 * src[i + 1] + self.m12;
                }
            }
            MatrixState::Scale => {
                for i in (0..n).step_by(2) {
                    dst[i] = self.m00 * src[i];
                    dst[i + 1] = self.m11 * src[i + 1];
                }
            }
            MatrixState::Translate => {
                for i in (0..n).step_by(2) {
                    dst[i] = src[i] + self.m02;
                    dst[i + 1] = src[i + 1] + self.m12;
                }
            }
            MatrixState::Identity => {
                dst[..n].copy_from_slice(&src[..n]);
            }
        }
    }

    /// Transform `count` pairs within one buffer, reading at `src_off` and
    /// writing at `dst_off`.
    ///
    /// When the destination range starts inside the not-yet-read part of the
    /// source range, the source is copied to the destination first and then
    /// transformed in place, so every input is read before it is overwritten.
    pub fn transform_coords_within(
        &self,
        coords: &mut [f64],
        mut src_off: usize,
        dst_off: usize,
        count: usize,
    ) {
        let n = count * 2;
        assert!(src_off + n <= coords.len(), "source range out of bounds");
        assert!(dst_off + n <= coords.len(), "destination range out of bounds");
        if dst_off > src_off && dst_off < src_off + n {
            coords.copy_within(src_off..src_off + n, dst_off);
            src_off = dst_off;
        }
        if src_off == dst_off {
            self.transform_in_place(&mut coords[dst_off..dst_off + n]);
        } else {
            // Destination at or before the source: forward iteration writes
            // only positions already read.
            for i in (0..n).step_by(2) {
                let p = self.apply(vector![coords[src_off + i], coords[src_off + i + 1]]);
                coords[dst_off + i] = p.x;
                coords[dst_off + i + 1] = p.y;
            }
        }
    }

    /// In-place transform of a packed coordinate run.
    pub(crate) fn transform_in_place(&self, coords: &mut [f64]) {
        let n = coords.len() & !1;
        match self.state {
            MatrixState::Identity => {}
            MatrixState::Translate => {
                for i in (0..n).step_by(2) {
                    coords[i] += self.m02;
                    coords[i + 1] += self.m12;
                }
            }
            MatrixState::Scale => {
                for i in (0..n).step_by(2) {
                    coords[i] *= self.m00;
                    coords[i + 1] *= self.m11;
                }
            }
            MatrixState::ScaleTranslate => {
                for i in (0..n).step_by(2) {
                    coords[i] = self.m00 * coords[i] + self.m02;
                    coords[i + 1] = self.m11 * coords[i + 1] + self.m12;
                }
            }
            _ => {
                for i in (0..n).step_by(2) {
                    let p = self.apply(vector![coords[i], coords[i + 1]]);
                    coords[i] = p.x;
                    coords[i + 1] = p.y;
                }
            }
        }
    }
}
