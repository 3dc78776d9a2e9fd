// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used for every point/plane classification in the crate.
///
/// Defaults to `1e-5` regardless of precision, but can be overridden:
///  1) **Build-time**: set env var `BSPCSG_TOLERANCE` (e.g. `BSPCSG_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Default classification tolerance. Absorbs the noise accumulated by
/// instance transforms and repeated splitting.
pub const DEFAULT_TOLERANCE: Real = 1e-5;

/// Returns the current tolerance.
/// If not set yet, it tries `BSPCSG_TOLERANCE` (parsed as the active `Real`) and
/// falls back to [`DEFAULT_TOLERANCE`].
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("BSPCSG_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `bspcsg::float_types::set_tolerance(1e-6);`
///
/// Returns `false` if a tolerance was already in effect.
pub fn set_tolerance(value: Real) -> bool {
    TOLERANCE_CELL.set(value.max(Real::EPSILON)).is_ok()
}

/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;
