//! Combat resolution.
//!
//! Pure functions: the formula in [`damage`] and its application to a
//! defender in [`result`]. The turn controller decides when they run.

pub mod damage;
pub mod result;

pub use damage::{DamageParams, calculate_damage};
pub use result::{DamageResult, resolve_attack};
