//! State-classified 2D affine transforms.
//!
//! Purpose
//! - Represent `x ↦ M x + t` as six scalars with a cached [`MatrixState`]
//!   that records which components are non-canonical, so composition,
//!   inversion, and application can dispatch to closed-form shortcuts.
//! - Keep a lazily computed [`Class`] describing the transform's geometric
//!   character (translation, uniform/general scale, flip, quadrant/general
//!   rotation, general transform).
//!
//! Why this design
//! - `state` is a closed 8-variant enum rather than raw bit arithmetic; the
//!   transition tables (90°-rotation, composition pairs) are explicit matches
//!   and `const` lookups so they stay auditable.
//! - `class` uses `Option` where the source of this family of kernels uses an
//!   UNKNOWN sentinel: `None` means "not yet computed". Mutators either patch
//!   the cached value (cheap paths) or clear it for lazy recomputation.
//!
//! Invariants
//! - `state` always exactly reflects the six scalars: TRANSLATE ⇔
//!   `(m02, m12) ≠ (0, 0)`; without shear, SCALE ⇔ `(m00, m11) ≠ (1, 1)`;
//!   with shear present, SCALE ⇔ `(m00, m11) ≠ (0, 0)`.
//! - A cached `class` always equals `classify()` recomputed from scratch.
//!
//! References
//! - Code cross-refs: `ops` (mutators/composition), `invert`, `apply`,
//!   `error::NoninvertibleTransform`.

mod apply;
mod invert;
mod ops;
#[cfg(test)]
mod tests;

use nalgebra::Vector2;
use std::ops::{BitOr, BitOrAssign};

/// Which components of the matrix are non-canonical. The `u8` representation
/// is `TRANSLATE = 1 | SCALE = 2 | SHEAR = 4`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixState {
    Identity = 0,
    Translate = 1,
    Scale = 2,
    ScaleTranslate = 3,
    Shear = 4,
    ShearTranslate = 5,
    ShearScale = 6,
    General = 7,
}

const STATE_FROM_BITS: [MatrixState; 8] = [
    MatrixState::Identity,
    MatrixState::Translate,
    MatrixState::Scale,
    MatrixState::ScaleTranslate,
    MatrixState::Shear,
    MatrixState::ShearTranslate,
    MatrixState::ShearScale,
    MatrixState::General,
];

impl MatrixState {
    #[inline]
    pub(crate) fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub(crate) fn from_bits(bits: u8) -> MatrixState {
        STATE_FROM_BITS[(bits & 7) as usize]
    }

    #[inline]
    pub fn has_translate(self) -> bool {
        self.bits() & 1 != 0
    }

    #[inline]
    pub fn has_scale(self) -> bool {
        self.bits() & 2 != 0
    }

    #[inline]
    pub fn has_shear(self) -> bool {
        self.bits() & 4 != 0
    }

    #[inline]
    pub(crate) fn with_translate(self, on: bool) -> MatrixState {
        MatrixState::from_bits(self.bits() & !1 | on as u8)
    }

    /// Scale and shear trade places (composition with a pure anti-diagonal).
    #[inline]
    pub(crate) fn swap_scale_shear(self) -> MatrixState {
        let b = self.bits();
        MatrixState::from_bits(b & 1 | (b & 2) << 1 | (b & 4) >> 1)
    }
}

/// OR-combinable classification of a transform's geometric character.
/// The empty set is the identity classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Class(u8);

impl Class {
    pub const IDENTITY: Class = Class(0);
    pub const TRANSLATION: Class = Class(1);
    pub const UNIFORM_SCALE: Class = Class(2);
    pub const GENERAL_SCALE: Class = Class(4);
    pub const FLIP: Class = Class(8);
    pub const QUADRANT_ROTATION: Class = Class(16);
    pub const GENERAL_ROTATION: Class = Class(32);
    pub const GENERAL_TRANSFORM: Class = Class(64);

    /// Either scale flag.
    pub const ANY_SCALE: Class = Class(2 | 4);
    /// Either rotation flag.
    pub const ANY_ROTATION: Class = Class(16 | 32);

    #[inline]
    pub fn contains(self, other: Class) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Class) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) fn insert(&mut self, other: Class) {
        self.0 |= other.0;
    }

    #[inline]
    pub(crate) fn remove(&mut self, other: Class) {
        self.0 &= !other.0;
    }
}

impl BitOr for Class {
    type Output = Class;
    #[inline]
    fn bitor(self, rhs: Class) -> Class {
        Class(self.0 | rhs.0)
    }
}

impl BitOrAssign for Class {
    #[inline]
    fn bitor_assign(&mut self, rhs: Class) {
        self.0 |= rhs.0;
    }
}

/// 2D affine transform `x ↦ M x + t`, stored as the six scalars
/// `m00, m10, m01, m11` (linear block, column-major naming) and `m02, m12`
/// (translation), with a cached state/classification.
#[derive(Clone, Copy, Debug)]
pub struct Affine2 {
    m00: f64,
    m10: f64,
    m01: f64,
    m11: f64,
    m02: f64,
    m12: f64,
    state: MatrixState,
    class: Option<Class>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Affine2 {
    fn eq(&self, other: &Self) -> bool {
        self.m00 == other.m00
            && self.m10 == other.m10
            && self.m01 == other.m01
            && self.m11 == other.m11
            && self.m02 == other.m02
            && self.m12 == other.m12
    }
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m00: 1.0,
            m10: 0.0,
            m01: 0.0,
            m11: 1.0,
            m02: 0.0,
            m12: 0.0,
            state: MatrixState::Identity,
            class: Some(Class::IDENTITY),
        }
    }

    /// Build from the six scalars; the state is computed from the values.
    pub fn new(m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) -> Self {
        let mut a = Self {
            m00,
            m10,
            m01,
            m11,
            m02,
            m12,
            state: MatrixState::Identity,
            class: None,
        };
        a.update_state();
        a
    }

    /// Internal constructor for results whose state is known closed-form.
    pub(crate) fn with_state(
        m00: f64,
        m10: f64,
        m01: f64,
        m11: f64,
        m02: f64,
        m12: f64,
        state: MatrixState,
    ) -> Self {
        Self {
            m00,
            m10,
            m01,
            m11,
            m02,
            m12,
            state,
            class: None,
        }
    }

    pub fn from_translate(tx: f64, ty: f64) -> Self {
        let mut a = Self::identity();
        a.set_translation(tx, ty);
        a
    }

    pub fn from_scale(sx: f64, sy: f64) -> Self {
        let mut a = Self::identity();
        a.set_scale(sx, sy);
        a
    }

    pub fn from_shear(shx: f64, shy: f64) -> Self {
        let mut a = Self::identity();
        a.set_shear(shx, shy);
        a
    }

    pub fn from_rotation(theta: f64) -> Self {
        let mut a = Self::identity();
        a.set_rotation(theta);
        a
    }

    pub fn from_rotation_about(theta: f64, anchor: Vector2<f64>) -> Self {
        let mut a = Self::identity();
        a.set_rotation_about(theta, anchor);
        a
    }

    /// Rotation taking the positive X axis onto the direction `(vx, vy)`.
    pub fn from_rotation_vector(vx: f64, vy: f64) -> Self {
        let mut a = Self::identity();
        a.set_rotation_vector(vx, vy);
        a
    }

    /// Exact rotation by `n` quadrants (90° steps), free of trig noise.
    pub fn from_quadrant_rotation(n: i32) -> Self {
        let mut a = Self::identity();
        a.set_quadrant_rotation(n);
        a
    }

    pub fn from_quadrant_rotation_about(n: i32, anchor: Vector2<f64>) -> Self {
        let mut a = Self::identity();
        a.set_quadrant_rotation_about(n, anchor);
        a
    }

    // --- accessors ---------------------------------------------------------

    #[inline]
    pub fn m00(&self) -> f64 {
        self.m00
    }
    #[inline]
    pub fn m10(&self) -> f64 {
        self.m10
    }
    #[inline]
    pub fn m01(&self) -> f64 {
        self.m01
    }
    #[inline]
    pub fn m11(&self) -> f64 {
        self.m11
    }
    #[inline]
    pub fn m02(&self) -> f64 {
        self.m02
    }
    #[inline]
    pub fn m12(&self) -> f64 {
        self.m12
    }

    /// The six scalars in `[m00, m10, m01, m11, m02, m12]` order.
    #[inline]
    pub fn matrix(&self) -> [f64; 6] {
        [self.m00, self.m10, self.m01, self.m11, self.m02, self.m12]
    }

    #[inline]
    pub fn state(&self) -> MatrixState {
        self.state
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.state == MatrixState::Identity
    }

    /// The geometric classification; recomputed from the scalars when no
    /// cached value is available.
    #[inline]
    pub fn class(&self) -> Class {
        self.class.unwrap_or_else(|| self.classify())
    }

    // --- state maintenance -------------------------------------------------

    pub(crate) fn recomputed_state(&self) -> MatrixState {
        let translate = (self.m02 != 0.0 || self.m12 != 0.0) as u8;
        let linear = if self.m01 == 0.0 && self.m10 == 0.0 {
            if self.m00 == 1.0 && self.m11 == 1.0 {
                0
            } else {
                2
            }
        } else if self.m00 == 0.0 && self.m11 == 0.0 {
            4
        } else {
            6
        };
        MatrixState::from_bits(linear | translate)
    }

    /// Full state recompute; the class collapses to a known value for the
    /// trivial states and is otherwise left for lazy recomputation.
    pub(crate) fn update_state(&mut self) {
        self.state = self.recomputed_state();
        self.class = match self.state {
            MatrixState::Identity => Some(Class::IDENTITY),
            MatrixState::Translate => Some(Class::TRANSLATION),
            _ => None,
        };
    }

    // --- classification ----------------------------------------------------

    /// Pure classification of the six scalars; idempotent and independent of
    /// mutation history.
    pub(crate) fn classify(&self) -> Class {
        let mut ret = Class::IDENTITY;
        match self.state {
            MatrixState::General | MatrixState::ShearScale => {
                if self.state == MatrixState::General {
                    ret = Class::TRANSLATION;
                }
                let m0 = self.m00;
                let m2 = self.m01;
                let m3 = self.m10;
                let m1 = self.m11;
                if m0 * m2 + m3 * m1 != 0.0 {
                    // Transformed unit vectors are not perpendicular.
                    return Class::GENERAL_TRANSFORM;
                }
                let sgn0 = m0 >= 0.0;
                let sgn1 = m1 >= 0.0;
                if sgn0 == sgn1 {
                    // Right-handed: sgn(m01) == -sgn(m10).
                    if m0 != m1 || m2 != -m3 {
                        ret |= Class::GENERAL_ROTATION | Class::GENERAL_SCALE;
                    } else if m0 * m1 - m2 * m3 != 1.0 {
                        ret |= Class::GENERAL_ROTATION | Class::UNIFORM_SCALE;
                    } else {
                        ret |= Class::GENERAL_ROTATION;
                    }
                } else {
                    // Left-handed: rotation plus an axis flip.
                    if m0 != -m1 || m2 != m3 {
                        ret |= Class::GENERAL_ROTATION | Class::FLIP | Class::GENERAL_SCALE;
                    } else if m0 * m1 - m2 * m3 != 1.0 {
                        ret |= Class::GENERAL_ROTATION | Class::FLIP | Class::UNIFORM_SCALE;
                    } else {
                        ret |= Class::GENERAL_ROTATION | Class::FLIP;
                    }
                }
            }
            MatrixState::ShearTranslate | MatrixState::Shear => {
                if self.state == MatrixState::ShearTranslate {
                    ret = Class::TRANSLATION;
                }
                let m0 = self.m01;
                let m1 = self.m10;
                let sgn0 = m0 >= 0.0;
                let sgn1 = m1 >= 0.0;
                if sgn0 != sgn1 {
                    // Opposite signs: a 90° rotation.
                    if m0 != -m1 {
                        ret |= Class::QUADRANT_ROTATION | Class::GENERAL_SCALE;
                    } else if m0 != 1.0 && m0 != -1.0 {
                        ret |= Class::QUADRANT_ROTATION | Class::UNIFORM_SCALE;
                    } else {
                        ret |= Class::QUADRANT_ROTATION;
                    }
                } else {
                    // Same signs: 90° rotation plus an axis flip.
                    if m0 == m1 {
                        ret |= Class::QUADRANT_ROTATION | Class::FLIP | Class::UNIFORM_SCALE;
                    } else {
                        ret |= Class::QUADRANT_ROTATION | Class::FLIP | Class::GENERAL_SCALE;
                    }
                }
            }
            MatrixState::ScaleTranslate | MatrixState::Scale => {
                if self.state == MatrixState::ScaleTranslate {
                    ret = Class::TRANSLATION;
                }
                let m0 = self.m00;
                let m1 = self.m11;
                let sgn0 = m0 >= 0.0;
                let sgn1 = m1 >= 0.0;
                if sgn0 == sgn1 {
                    if sgn0 {
                        if m0 == m1 {
                            ret |= Class::UNIFORM_SCALE;
                        } else {
                            ret |= Class::GENERAL_SCALE;
                        }
                    } else {
                        // Both negative: a 180° rotation (possibly scaled).
                        if m0 != m1 {
                            ret |= Class::QUADRANT_ROTATION | Class::GENERAL_SCALE;
                        } else if m0 != -1.0 {
                            ret |= Class::QUADRANT_ROTATION | Class::UNIFORM_SCALE;
                        } else {
                            ret |= Class::QUADRANT_ROTATION;
                        }
                    }
                } else {
                    // Signs differ: an axis flip.
                    if m0 == -m1 {
                        if m0 == 1.0 || m0 == -1.0 {
                            ret |= Class::FLIP;
                        } else {
                            ret |= Class::FLIP | Class::UNIFORM_SCALE;
                        }
                    } else {
                        ret |= Class::FLIP | Class::GENERAL_SCALE;
                    }
                }
            }
            MatrixState::Translate => ret = Class::TRANSLATION,
            MatrixState::Identity => {}
        }
        ret
    }

    /// Determinant of the linear block, per-state closed form.
    pub fn determinant(&self) -> f64 {
        match self.state {
            MatrixState::General | MatrixState::ShearScale => {
                self.m00 * self.m11 - self.m01 * self.m10
            }
            MatrixState::ShearTranslate | MatrixState::Shear => -(self.m01 * self.m10),
            MatrixState::ScaleTranslate | MatrixState::Scale => self.m00 * self.m11,
            MatrixState::Translate | MatrixState::Identity => 1.0,
        }
    }
}
