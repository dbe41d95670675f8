//! Per-state closed-form inversion.
//!
//! Each state inverts only what it uses: a pure scale reciprocates the
//! diagonal, a pure shear swaps and reciprocates the anti-diagonal, and only
//! the general states pay for the full adjugate. Failure is reported with the
//! offending determinant and is never retried.

use super::{Affine2, MatrixState};
use crate::error::NoninvertibleTransform;
use nalgebra::{vector, Vector2};

impl Affine2 {
    /// The inverse transform, or the singularity that prevents it.
    pub fn inverse(&self) -> Result<Affine2, NoninvertibleTransform> {
        match self.state {
            MatrixState::General => {
                let det = self.m00 * self.m11 - self.m01 * self.m10;
                check_det(det)?;
                Ok(Affine2::with_state(
                    self.m11 / det,
                    -self.m10 / det,
                    -self.m01 / det,
                    self.m00 / det,
                    (self.m01 * self.m12 - self.m11 * self.m02) / det,
                    (self.m10 * self.m02 - self.m00 * self.m12) / det,
                    MatrixState::General,
                ))
            }
            MatrixState::ShearScale => {
                let det = self.m00 * self.m11 - self.m01 * self.m10;
                check_det(det)?;
                Ok(Affine2::with_state(
                    self.m11 / det,
                    -self.m10 / det,
                    -self.m01 / det,
                    self.m00 / det,
                    0.0,
                    0.0,
                    MatrixState::ShearScale,
                ))
            }
            MatrixState::ShearTranslate => {
                check_nonzero(self.m01, self.m10, -(self.m01 * self.m10))?;
                Ok(Affine2::with_state(
                    0.0,
                    1.0 / self.m01,
                    1.0 / self.m10,
                    0.0,
                    -self.m12 / self.m10,
                    -self.m02 / self.m01,
                    MatrixState::ShearTranslate,
                ))
            }
            MatrixState::Shear => {
                check_nonzero(self.m01, self.m10, -(self.m01 * self.m10))?;
                Ok(Affine2::with_state(
                    0.0,
                    1.0 / self.m01,
                    1.0 / self.m10,
                    0.0,
                    0.0,
                    0.0,
                    MatrixState::Shear,
                ))
            }
            MatrixState::ScaleTranslate => {
                check_nonzero(self.m00, self.m11, self.m00 * self.m11)?;
                Ok(Affine2::with_state(
                    1.0 / self.m00,
                    0.0,
                    0.0,
                    1.0 / self.m11,
                    -self.m02 / self.m00,
                    -self.m12 / self.m11,
                    MatrixState::ScaleTranslate,
                ))
            }
            MatrixState::Scale => {
                check_nonzero(self.m00, self.m11, self.m00 * self.m11)?;
                Ok(Affine2::with_state(
                    1.0 / self.m00,
                    0.0,
                    0.0,
                    1.0 / self.m11,
                    0.0,
                    0.0,
                    MatrixState::Scale,
                ))
            }
            MatrixState::Translate => Ok(Affine2::with_state(
                1.0,
                0.0,
                0.0,
                1.0,
                -self.m02,
                -self.m12,
                MatrixState::Translate,
            )),
            MatrixState::Identity => Ok(Affine2::identity()),
        }
    }

    /// Invert in place.
    pub fn invert(&mut self) -> Result<(), NoninvertibleTransform> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Map a point through the inverse without constructing it.
    pub fn inverse_apply(
        &self,
        p: Vector2<f64>,
    ) -> Result<Vector2<f64>, NoninvertibleTransform> {
        match self.state {
            MatrixState::General | MatrixState::ShearScale => {
                let det = self.m00 * self.m11 - self.m01 * self.m10;
                check_det(det)?;
                let x = p.x - self.m02;
                let y = p.y - self.m12;
                Ok(vector![
                    (x * self.m11 - y * self.m01) / det,
                    (y * self.m00 - x * self.m10) / det
                ])
            }
            MatrixState::ShearTranslate | MatrixState::Shear => {
                check_nonzero(self.m01, self.m10, -(self.m01 * self.m10))?;
                Ok(vector![
                    (p.y - self.m12) / self.m10,
                    (p.x - self.m02) / self.m01
                ])
            }
            MatrixState::ScaleTranslate | MatrixState::Scale => {
                check_nonzero(self.m00, self.m11, self.m00 * self.m11)?;
                Ok(vector![
                    (p.x - self.m02) / self.m00,
                    (p.y - self.m12) / self.m11
                ])
            }
            MatrixState::Translate => Ok(vector![p.x - self.m02, p.y - self.m12]),
            MatrixState::Identity => Ok(p),
        }
    }
}

#[inline]
fn check_det(det: f64) -> Result<(), NoninvertibleTransform> {
    if det.abs() <= f64::EPSILON {
        Err(NoninvertibleTransform { det })
    } else {
        Ok(())
    }
}

#[inline]
fn check_nonzero(a: f64, b: f64, det: f64) -> Result<(), NoninvertibleTransform> {
    if a == 0.0 || b == 0.0 {
        Err(NoninvertibleTransform { det })
    } else {
        Ok(())
    }
}
