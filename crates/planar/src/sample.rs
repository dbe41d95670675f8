//! Deterministic random geometry (transforms, points, paths).
//!
//! Purpose
//! - Provide small, reproducible samplers for property tests and benchmarks.
//!   Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so any failing draw can be replayed from its token.
//!
//! References
//! - Code cross-refs: `affine::Affine2`, `path::Path`, `shape::Rect`.

use nalgebra::{vector, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::affine::{Affine2, MatrixState};
use crate::path::Path;
use crate::shape::Rect;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random-transform configuration.
#[derive(Clone, Copy, Debug)]
pub struct AffineCfg {
    /// Draw a transform of exactly this state; `None` draws any state.
    pub state: Option<MatrixState>,
    /// Translation magnitude bound.
    pub max_translate: f64,
    /// Scale magnitude bound (magnitudes are kept away from 0 and 1).
    pub max_scale: f64,
    /// Shear magnitude bound (magnitudes are kept away from 0).
    pub max_shear: f64,
}

impl Default for AffineCfg {
    fn default() -> Self {
        Self {
            state: None,
            max_translate: 10.0,
            max_scale: 3.0,
            max_shear: 2.0,
        }
    }
}

/// A magnitude in `[lo, hi)` with a random sign; keeping `lo` positive keeps
/// the drawn component away from its canonical value.
fn signed<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let v = rng.gen_range(lo..hi);
    if rng.gen::<bool>() {
        v
    } else {
        -v
    }
}

/// Draw a random transform whose [`MatrixState`] is exactly the requested
/// one. Same token, same transform.
pub fn draw_affine(cfg: AffineCfg, tok: ReplayToken) -> Affine2 {
    let mut rng = tok.to_std_rng();
    let state = cfg.state.unwrap_or_else(|| {
        MatrixState::from_bits(rng.gen_range(0..8u8))
    });
    let t = cfg.max_translate.max(0.5);
    let s = cfg.max_scale.max(1.5);
    let sh = cfg.max_shear.max(1.0);
    let mut a = Affine2::identity();
    if state.has_scale() && state.has_shear() {
        // Mixed linear block: rotate-and-scale keeps all four entries live.
        a.rotate(rng.gen_range(0.2..1.3));
        a.scale(signed(&mut rng, 1.25, s), signed(&mut rng, 1.25, s));
    } else if state.has_scale() {
        a.scale(signed(&mut rng, 1.25, s), signed(&mut rng, 1.25, s));
    } else if state.has_shear() {
        a = Affine2::new(
            0.0,
            signed(&mut rng, 0.25, sh),
            signed(&mut rng, 0.25, sh),
            0.0,
            0.0,
            0.0,
        );
    }
    if state.has_translate() {
        let mut b = Affine2::from_translate(signed(&mut rng, 0.5, t), signed(&mut rng, 0.5, t));
        b.concatenate(&a);
        a = b;
    }
    debug_assert_eq!(a.state(), state, "sampler produced the wrong state");
    a
}

/// Uniform point inside `bounds`.
pub fn draw_point<R: Rng>(bounds: &Rect, rng: &mut R) -> Vector2<f64> {
    vector![
        rng.gen_range(bounds.min.x..bounds.max.x),
        rng.gen_range(bounds.min.y..bounds.max.y)
    ]
}

/// Random-path configuration.
#[derive(Clone, Copy, Debug)]
pub struct PathCfg {
    /// Number of drawing segments after the initial MoveTo.
    pub segments: usize,
    /// Fraction of segments emitted as curves rather than lines, in [0, 1].
    pub curve_ratio: f64,
    /// Close the final subpath.
    pub closed: bool,
    /// All generated coordinates stay inside these bounds.
    pub bounds: Rect,
}

impl Default for PathCfg {
    fn default() -> Self {
        Self {
            segments: 12,
            curve_ratio: 0.4,
            closed: true,
            bounds: Rect::from_origin_size(-10.0, -10.0, 20.0, 20.0),
        }
    }
}

/// Draw a random mixed-verb path. Same token, same path.
pub fn draw_path(cfg: PathCfg, tok: ReplayToken) -> Path {
    let mut rng = tok.to_std_rng();
    let mut path = Path::with_capacity(cfg.segments + 2);
    let ratio = cfg.curve_ratio.clamp(0.0, 1.0);
    let start = draw_point(&cfg.bounds, &mut rng);
    path.move_to(start.x, start.y);
    for _ in 0..cfg.segments.max(1) {
        let p = draw_point(&cfg.bounds, &mut rng);
        if rng.gen::<f64>() < ratio {
            let c0 = draw_point(&cfg.bounds, &mut rng);
            if rng.gen::<bool>() {
                path.quad_to(c0.x, c0.y, p.x, p.y);
            } else {
                let c1 = draw_point(&cfg.bounds, &mut rng);
                path.cubic_to(c0.x, c0.y, c1.x, c1.y, p.x, p.y);
            }
        } else {
            path.line_to(p.x, p.y);
        }
    }
    if cfg.closed {
        path.close_path();
    }
    path
}
