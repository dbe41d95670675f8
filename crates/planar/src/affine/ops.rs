//! In-place mutators and state-dispatched composition.
//!
//! Purpose
//! - `translate`/`scale`/`shear`/`rotate` fold an elementary transform into
//!   the matrix with a per-state `match`, patching the cached state and class
//!   where the outcome is known closed-form.
//! - `concatenate`/`pre_concatenate` dispatch on the `(argument, this)` state
//!   pair and only fall through to the general 2×3 multiply (plus a full
//!   state recompute) when both operands have two or more active components.
//!
//! References
//! - Code cross-refs: `Affine2::update_state`, `MatrixState::swap_scale_shear`.

use super::{Affine2, Class, MatrixState};
use nalgebra::Vector2;

/// State transition of the linear block under an exact 90° (or 270°)
/// rotation: scale and shear swap roles, translation is untouched.
const ROT90_STATE: [MatrixState; 8] = [
    MatrixState::Shear,          // Identity
    MatrixState::ShearTranslate, // Translate
    MatrixState::Shear,          // Scale
    MatrixState::ShearTranslate, // ScaleTranslate
    MatrixState::Scale,          // Shear
    MatrixState::ScaleTranslate, // ShearTranslate
    MatrixState::ShearScale,     // ShearScale
    MatrixState::General,        // General
];

impl Affine2 {
    // --- elementary mutators ----------------------------------------------

    /// `self := self ∘ translation(tx, ty)`.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        match self.state {
            MatrixState::General => {
                self.m02 = tx * self.m00 + ty * self.m01 + self.m02;
                self.m12 = tx * self.m10 + ty * self.m11 + self.m12;
                if self.m02 == 0.0 && self.m12 == 0.0 {
                    self.state = MatrixState::ShearScale;
                    if let Some(c) = &mut self.class {
                        c.remove(Class::TRANSLATION);
                    }
                }
            }
            MatrixState::ShearScale => {
                self.m02 = tx * self.m00 + ty * self.m01;
                self.m12 = tx * self.m10 + ty * self.m11;
                if self.m02 != 0.0 || self.m12 != 0.0 {
                    self.state = MatrixState::General;
                    if let Some(c) = &mut self.class {
                        c.insert(Class::TRANSLATION);
                    }
                }
            }
            MatrixState::ShearTranslate => {
                self.m02 = ty * self.m01 + self.m02;
                self.m12 = tx * self.m10 + self.m12;
                if self.m02 == 0.0 && self.m12 == 0.0 {
                    self.state = MatrixState::Shear;
                    if let Some(c) = &mut self.class {
                        c.remove(Class::TRANSLATION);
                    }
                }
            }
            MatrixState::Shear => {
                self.m02 = ty * self.m01;
                self.m12 = tx * self.m10;
                if self.m02 != 0.0 || self.m12 != 0.0 {
                    self.state = MatrixState::ShearTranslate;
                    if let Some(c) = &mut self.class {
                        c.insert(Class::TRANSLATION);
                    }
                }
            }
            MatrixState::ScaleTranslate => {
                self.m02 = tx * self.m00 + self.m02;
                self.m12 = ty * self.m11 + self.m12;
                if self.m02 == 0.0 && self.m12 == 0.0 {
                    self.state = MatrixState::Scale;
                    if let Some(c) = &mut self.class {
                        c.remove(Class::TRANSLATION);
                    }
                }
            }
            MatrixState::Scale => {
                self.m02 = tx * self.m00;
                self.m12 = ty * self.m11;
                if self.m02 != 0.0 || self.m12 != 0.0 {
                    self.state = MatrixState::ScaleTranslate;
                    if let Some(c) = &mut self.class {
                        c.insert(Class::TRANSLATION);
                    }
                }
            }
            MatrixState::Translate => {
                self.m02 = tx + self.m02;
                self.m12 = ty + self.m12;
                if self.m02 == 0.0 && self.m12 == 0.0 {
                    self.state = MatrixState::Identity;
                    self.class = Some(Class::IDENTITY);
                }
            }
            MatrixState::Identity => {
                self.m02 = tx;
                self.m12 = ty;
                if tx != 0.0 || ty != 0.0 {
                    self.state = MatrixState::Translate;
                    self.class = Some(Class::TRANSLATION);
                }
            }
        }
    }

    /// `self := self ∘ scaling(sx, sy)`.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        match self.state {
            MatrixState::General | MatrixState::ShearScale => {
                self.m00 *= sx;
                self.m11 *= sy;
                self.m01 *= sy;
                self.m10 *= sx;
                self.after_scale_with_shear();
            }
            MatrixState::ShearTranslate | MatrixState::Shear => {
                self.m01 *= sy;
                self.m10 *= sx;
                self.after_scale_with_shear();
            }
            MatrixState::ScaleTranslate | MatrixState::Scale => {
                self.m00 *= sx;
                self.m11 *= sy;
                if self.m00 == 1.0 && self.m11 == 1.0 {
                    let translate = self.state.has_translate();
                    self.state = MatrixState::from_bits(translate as u8);
                    self.class = Some(if translate {
                        Class::TRANSLATION
                    } else {
                        Class::IDENTITY
                    });
                } else {
                    self.class = None;
                }
            }
            MatrixState::Translate | MatrixState::Identity => {
                self.m00 = sx;
                self.m11 = sy;
                if sx != 1.0 || sy != 1.0 {
                    self.state = MatrixState::from_bits(self.state.bits() | 2);
                    self.class = None;
                }
            }
        }
    }

    /// Shared tail for scale folded into a shear-bearing matrix: the shear
    /// may have vanished, in which case the diagonal decides the new state.
    fn after_scale_with_shear(&mut self) {
        if self.m01 == 0.0 && self.m10 == 0.0 {
            let translate = self.state.has_translate();
            if self.m00 == 1.0 && self.m11 == 1.0 {
                self.state = MatrixState::from_bits(translate as u8);
                self.class = Some(if translate {
                    Class::TRANSLATION
                } else {
                    Class::IDENTITY
                });
            } else {
                self.state = MatrixState::from_bits(translate as u8 | 2);
                self.class = None;
            }
        } else {
            self.class = None;
        }
    }

    /// `self := self ∘ shearing(shx, shy)`.
    pub fn shear(&mut self, shx: f64, shy: f64) {
        match self.state {
            MatrixState::General | MatrixState::ShearScale => {
                let m0 = self.m00;
                let m1 = self.m01;
                self.m00 = m0 + m1 * shy;
                self.m01 = m0 * shx + m1;
                let m0 = self.m10;
                let m1 = self.m11;
                self.m10 = m0 + m1 * shy;
                self.m11 = m0 * shx + m1;
                self.update_state();
            }
            MatrixState::ShearTranslate | MatrixState::Shear => {
                self.m00 = self.m01 * shy;
                self.m11 = self.m10 * shx;
                if self.m00 != 0.0 || self.m11 != 0.0 {
                    self.state = MatrixState::from_bits(self.state.bits() | 2);
                }
                self.class = None;
            }
            MatrixState::ScaleTranslate | MatrixState::Scale => {
                self.m01 = self.m11 * shx;
                self.m10 = self.m00 * shy;
                if self.m01 != 0.0 || self.m10 != 0.0 {
                    self.state = MatrixState::from_bits(self.state.bits() | 4);
                }
                self.class = None;
            }
            MatrixState::Translate | MatrixState::Identity => {
                self.m01 = shx;
                self.m10 = shy;
                if shx != 0.0 || shy != 0.0 {
                    self.state = MatrixState::from_bits(self.state.bits() | 2 | 4);
                    self.class = None;
                }
            }
        }
    }

    // --- rotations ---------------------------------------------------------

    /// `self := self ∘ rotation(theta)`.
    ///
    /// When `sin(theta)` or `cos(theta)` evaluates to exactly ±1.0 (a narrow
    /// band around multiples of π/2) the rotation is applied as an exact
    /// quadrant rotation by coefficient permutation, leaving no trig residue
    /// that would stop later passes from recognizing a pure rotation.
    pub fn rotate(&mut self, theta: f64) {
        let sin = theta.sin();
        if sin == 1.0 {
            self.rotate90();
        } else if sin == -1.0 {
            self.rotate270();
        } else {
            let cos = theta.cos();
            if cos == -1.0 {
                self.rotate180();
            } else if cos != 1.0 {
                let m0 = self.m00;
                let m1 = self.m01;
                self.m00 = cos * m0 + sin * m1;
                self.m01 = -sin * m0 + cos * m1;
                let m0 = self.m10;
                let m1 = self.m11;
                self.m10 = cos * m0 + sin * m1;
                self.m11 = -sin * m0 + cos * m1;
                self.update_state();
            }
        }
    }

    /// Rotation about an anchor point.
    pub fn rotate_about(&mut self, theta: f64, anchor: Vector2<f64>) {
        self.translate(anchor.x, anchor.y);
        self.rotate(theta);
        self.translate(-anchor.x, -anchor.y);
    }

    /// `self := self ∘ R` where `R` takes the positive X axis onto `(vx, vy)`.
    pub fn rotate_to_vector(&mut self, vx: f64, vy: f64) {
        if vy == 0.0 {
            if vx < 0.0 {
                self.rotate180();
            }
        } else if vx == 0.0 {
            if vy > 0.0 {
                self.rotate90();
            } else {
                self.rotate270();
            }
        } else {
            let len = (vx * vx + vy * vy).sqrt();
            let sin = vy / len;
            let cos = vx / len;
            let m0 = self.m00;
            let m1 = self.m01;
            self.m00 = cos * m0 + sin * m1;
            self.m01 = -sin * m0 + cos * m1;
            let m0 = self.m10;
            let m1 = self.m11;
            self.m10 = cos * m0 + sin * m1;
            self.m11 = -sin * m0 + cos * m1;
            self.update_state();
        }
    }

    /// Exact rotation by `n` quadrants.
    pub fn quadrant_rotate(&mut self, n: i32) {
        match n.rem_euclid(4) {
            0 => {}
            1 => self.rotate90(),
            2 => self.rotate180(),
            _ => self.rotate270(),
        }
    }

    pub fn quadrant_rotate_about(&mut self, n: i32, anchor: Vector2<f64>) {
        self.translate(anchor.x, anchor.y);
        self.quadrant_rotate(n);
        self.translate(-anchor.x, -anchor.y);
    }

    fn rotate90(&mut self) {
        let m0 = self.m00;
        self.m00 = self.m01;
        self.m01 = -m0;
        let m0 = self.m10;
        self.m10 = self.m11;
        self.m11 = -m0;
        let mut state = ROT90_STATE[self.state.bits() as usize];
        if state.has_scale()
            && !state.has_shear()
            && self.m00 == 1.0
            && self.m11 == 1.0
        {
            state = MatrixState::from_bits(state.bits() & !2);
        }
        self.state = state;
        self.class = None;
    }

    fn rotate180(&mut self) {
        self.m00 = -self.m00;
        self.m11 = -self.m11;
        if self.state.has_shear() {
            // A shear-bearing matrix keeps its state; negate the shear too.
            self.m01 = -self.m01;
            self.m10 = -self.m10;
        } else if self.m00 == 1.0 && self.m11 == 1.0 {
            self.state = MatrixState::from_bits(self.state.bits() & !2);
        } else {
            self.state = MatrixState::from_bits(self.state.bits() | 2);
        }
        self.class = None;
    }

    fn rotate270(&mut self) {
        let m0 = self.m00;
        self.m00 = -self.m01;
        self.m01 = m0;
        let m0 = self.m10;
        self.m10 = -self.m11;
        self.m11 = m0;
        let mut state = ROT90_STATE[self.state.bits() as usize];
        if state.has_scale()
            && !state.has_shear()
            && self.m00 == 1.0
            && self.m11 == 1.0
        {
            state = MatrixState::from_bits(state.bits() & !2);
        }
        self.state = state;
        self.class = None;
    }

    // --- setters -----------------------------------------------------------

    pub fn set_identity(&mut self) {
        *self = Affine2::identity();
    }

    pub fn set_translation(&mut self, tx: f64, ty: f64) {
        self.m00 = 1.0;
        self.m10 = 0.0;
        self.m01 = 0.0;
        self.m11 = 1.0;
        self.m02 = tx;
        self.m12 = ty;
        if tx != 0.0 || ty != 0.0 {
            self.state = MatrixState::Translate;
            self.class = Some(Class::TRANSLATION);
        } else {
            self.state = MatrixState::Identity;
            self.class = Some(Class::IDENTITY);
        }
    }

    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.m00 = sx;
        self.m10 = 0.0;
        self.m01 = 0.0;
        self.m11 = sy;
        self.m02 = 0.0;
        self.m12 = 0.0;
        if sx != 1.0 || sy != 1.0 {
            self.state = MatrixState::Scale;
            self.class = None;
        } else {
            self.state = MatrixState::Identity;
            self.class = Some(Class::IDENTITY);
        }
    }

    pub fn set_shear(&mut self, shx: f64, shy: f64) {
        self.m00 = 1.0;
        self.m10 = shy;
        self.m01 = shx;
        self.m11 = 1.0;
        self.m02 = 0.0;
        self.m12 = 0.0;
        if shx != 0.0 || shy != 0.0 {
            self.state = MatrixState::ShearScale;
            self.class = None;
        } else {
            self.state = MatrixState::Identity;
            self.class = Some(Class::IDENTITY);
        }
    }

    pub fn set_rotation(&mut self, theta: f64) {
        let mut sin = theta.sin();
        let cos;
        if sin == 1.0 || sin == -1.0 {
            cos = 0.0;
        } else {
            cos = theta.cos();
            if cos == -1.0 || cos == 1.0 {
                sin = 0.0;
            }
        }
        self.set_sincos(sin, cos);
    }

    /// Rotation taking the positive X axis onto `(vx, vy)`.
    pub fn set_rotation_vector(&mut self, vx: f64, vy: f64) {
        let (sin, cos);
        if vy == 0.0 {
            sin = 0.0;
            cos = if vx < 0.0 { -1.0 } else { 1.0 };
        } else if vx == 0.0 {
            cos = 0.0;
            sin = if vy > 0.0 { 1.0 } else { -1.0 };
        } else {
            let len = (vx * vx + vy * vy).sqrt();
            cos = vx / len;
            sin = vy / len;
        }
        self.set_sincos(sin, cos);
    }

    fn set_sincos(&mut self, sin: f64, cos: f64) {
        self.m00 = cos;
        self.m10 = sin;
        self.m01 = -sin;
        self.m11 = cos;
        self.m02 = 0.0;
        self.m12 = 0.0;
        if sin != 0.0 {
            if cos != 0.0 {
                self.state = MatrixState::ShearScale;
                self.class = Some(Class::GENERAL_ROTATION);
            } else {
                self.state = MatrixState::Shear;
                self.class = Some(Class::QUADRANT_ROTATION);
            }
        } else if cos < 0.0 {
            self.state = MatrixState::Scale;
            self.class = Some(Class::QUADRANT_ROTATION);
        } else {
            self.state = MatrixState::Identity;
            self.class = Some(Class::IDENTITY);
        }
    }

    pub fn set_rotation_about(&mut self, theta: f64, anchor: Vector2<f64>) {
        self.set_rotation(theta);
        let sin = self.m10;
        let one_minus_cos = 1.0 - self.m00;
        self.m02 = anchor.x * one_minus_cos + anchor.y * sin;
        self.m12 = anchor.y * one_minus_cos - anchor.x * sin;
        if self.m02 != 0.0 || self.m12 != 0.0 {
            self.state = self.state.with_translate(true);
            if let Some(c) = &mut self.class {
                c.insert(Class::TRANSLATION);
            }
        }
    }

    pub fn set_quadrant_rotation(&mut self, n: i32) {
        match n.rem_euclid(4) {
            0 => self.set_identity(),
            1 => {
                self.m00 = 0.0;
                self.m10 = 1.0;
                self.m01 = -1.0;
                self.m11 = 0.0;
                self.m02 = 0.0;
                self.m12 = 0.0;
                self.state = MatrixState::Shear;
                self.class = Some(Class::QUADRANT_ROTATION);
            }
            2 => {
                self.m00 = -1.0;
                self.m10 = 0.0;
                self.m01 = 0.0;
                self.m11 = -1.0;
                self.m02 = 0.0;
                self.m12 = 0.0;
                self.state = MatrixState::Scale;
                self.class = Some(Class::QUADRANT_ROTATION);
            }
            _ => {
                self.m00 = 0.0;
                self.m10 = -1.0;
                self.m01 = 1.0;
                self.m11 = 0.0;
                self.m02 = 0.0;
                self.m12 = 0.0;
                self.state = MatrixState::Shear;
                self.class = Some(Class::QUADRANT_ROTATION);
            }
        }
    }

    pub fn set_quadrant_rotation_about(&mut self, n: i32, anchor: Vector2<f64>) {
        self.set_quadrant_rotation(n);
        match n.rem_euclid(4) {
            0 => return,
            1 => {
                self.m02 = anchor.x + anchor.y;
                self.m12 = anchor.y - anchor.x;
            }
            2 => {
                self.m02 = anchor.x + anchor.x;
                self.m12 = anchor.y + anchor.y;
            }
            _ => {
                self.m02 = anchor.x - anchor.y;
                self.m12 = anchor.y + anchor.x;
            }
        }
        if self.m02 != 0.0 || self.m12 != 0.0 {
            self.state = self.state.with_translate(true);
            if let Some(c) = &mut self.class {
                c.insert(Class::TRANSLATION);
            }
        }
    }

    /// Replace the six scalars; state is recomputed from the values.
    pub fn set_matrix(&mut self, m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) {
        self.m00 = m00;
        self.m10 = m10;
        self.m01 = m01;
        self.m11 = m11;
        self.m02 = m02;
        self.m12 = m12;
        self.update_state();
    }

    pub fn set_from(&mut self, other: &Affine2) {
        *self = *other;
    }

    // --- composition -------------------------------------------------------

    /// `self := self ∘ tx` (apply `tx` first).
    ///
    /// Dispatches on the `(tx.state, self.state)` pair; closed-form shortcuts
    /// cover every case where either operand is the identity or a pure
    /// translate / scale / shear. Only when both operands carry two or more
    /// active components does this fall through to the general 2×3 multiply
    /// with a full state recompute.
    pub fn concatenate(&mut self, tx: &Affine2) {
        match (tx.state, self.state) {
            (MatrixState::Identity, _) => {}
            (_, MatrixState::Identity) => *self = *tx,
            (MatrixState::Translate, _) => self.translate(tx.m02, tx.m12),
            (MatrixState::Scale, _) => self.scale(tx.m00, tx.m11),
            (MatrixState::Shear, _) => {
                // Pure anti-diagonal argument: the columns swap and pick up
                // the shear factors; scale and shear trade places. An
                // identity linear block becomes pure shear.
                let t01 = tx.m01;
                let t10 = tx.m10;
                let m0 = self.m00;
                self.m00 = self.m01 * t10;
                self.m01 = m0 * t01;
                let m0 = self.m10;
                self.m10 = self.m11 * t10;
                self.m11 = m0 * t01;
                self.state = if self.state == MatrixState::Translate {
                    MatrixState::ShearTranslate
                } else {
                    self.state.swap_scale_shear()
                };
                self.class = None;
            }
            _ => {
                let t00 = tx.m00;
                let t01 = tx.m01;
                let t02 = tx.m02;
                let t10 = tx.m10;
                let t11 = tx.m11;
                let t12 = tx.m12;
                let m0 = self.m00;
                let m1 = self.m01;
                self.m00 = t00 * m0 + t10 * m1;
                self.m01 = t01 * m0 + t11 * m1;
                self.m02 += t02 * m0 + t12 * m1;
                let m0 = self.m10;
                let m1 = self.m11;
                self.m10 = t00 * m0 + t10 * m1;
                self.m11 = t01 * m0 + t11 * m1;
                self.m12 += t02 * m0 + t12 * m1;
                self.update_state();
            }
        }
    }

    /// `self := tx ∘ self` (apply `self` first).
    pub fn pre_concatenate(&mut self, tx: &Affine2) {
        match (tx.state, self.state) {
            (MatrixState::Identity, _) => {}
            (_, MatrixState::Identity) => *self = *tx,
            (MatrixState::Translate, _) => {
                self.m02 += tx.m02;
                self.m12 += tx.m12;
                let has = self.m02 != 0.0 || self.m12 != 0.0;
                if has != self.state.has_translate() {
                    self.state = self.state.with_translate(has);
                    self.class = match self.state {
                        MatrixState::Identity => Some(Class::IDENTITY),
                        MatrixState::Translate => Some(Class::TRANSLATION),
                        _ => self.class.map(|mut c| {
                            if has {
                                c.insert(Class::TRANSLATION);
                            } else {
                                c.remove(Class::TRANSLATION);
                            }
                            c
                        }),
                    };
                }
            }
            (MatrixState::Scale, _) => {
                // Row scaling by the argument's diagonal.
                let t00 = tx.m00;
                let t11 = tx.m11;
                self.m00 *= t00;
                self.m01 *= t00;
                self.m02 *= t00;
                self.m10 *= t11;
                self.m11 *= t11;
                self.m12 *= t11;
                self.update_state();
            }
            (MatrixState::Shear, _) => {
                // Pure anti-diagonal argument: the rows swap (translation
                // included) and pick up the shear factors.
                let t01 = tx.m01;
                let t10 = tx.m10;
                let m0 = self.m00;
                self.m00 = self.m10 * t01;
                self.m10 = m0 * t10;
                let m0 = self.m01;
                self.m01 = self.m11 * t01;
                self.m11 = m0 * t10;
                let m0 = self.m02;
                self.m02 = self.m12 * t01;
                self.m12 = m0 * t10;
                self.update_state();
            }
            _ => {
                let t00 = tx.m00;
                let t01 = tx.m01;
                let t02 = tx.m02;
                let t10 = tx.m10;
                let t11 = tx.m11;
                let t12 = tx.m12;
                let m0 = self.m00;
                let m1 = self.m10;
                self.m00 = t00 * m0 + t01 * m1;
                self.m10 = t10 * m0 + t11 * m1;
                let m0 = self.m01;
                let m1 = self.m11;
                self.m01 = t00 * m0 + t01 * m1;
                self.m11 = t10 * m0 + t11 * m1;
                let m0 = self.m02;
                let m1 = self.m12;
                self.m02 = t00 * m0 + t01 * m1 + t02;
                self.m12 = t10 * m0 + t11 * m1 + t12;
                self.update_state();
            }
        }
    }
}
