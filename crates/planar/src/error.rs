//! Error types for the recoverable failure modes.
//!
//! Only two conditions are recoverable and surface as values: inverting a
//! singular transform, and validating a numeric winding-rule code at an API
//! boundary. Path usage errors (drawing before the initial MoveTo) and
//! storage exhaustion are programmer/environment failures and panic instead.

use thiserror::Error;

/// The transform has no inverse: the relevant determinant is at or below
/// machine epsilon, or a required component is exactly zero.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("non-invertible transform (determinant {det})")]
pub struct NoninvertibleTransform {
    /// The offending determinant value.
    pub det: f64,
}

/// A numeric winding-rule code outside the defined range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid winding rule code {0} (expected 0 = even-odd or 1 = non-zero)")]
pub struct InvalidWindingRule(pub u8);
