//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point and integer
//! domains. They rely on debug assertions to flag unexpected overflows while
//! keeping the call-sites ergonomic.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(
        !value.is_finite() || value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        !value.is_finite() || value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Truncate toward zero and convert to `i32`, saturating at the bounds.
///
/// Non-finite input maps to zero.
///
/// # Examples
/// ```
/// use duel::numeric::truncate_to_i32;
/// assert_eq!(truncate_to_i32(-18.9), -18);
/// assert_eq!(truncate_to_i32(f64::NAN), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn truncate_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Scale a channel intensity in `[0, 1]` to a byte, clamping out-of-range
/// input.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The scaled value is clamped into the u8 domain before casting."
)]
#[must_use]
pub fn unit_to_u8(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * f64::from(u8::MAX)).trunc() as u8
}
