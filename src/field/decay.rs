/// Opacity below which a ring is neither drawn nor keeps its source alive.
pub const DEFAULT_ALPHA_THRESHOLD: f64 = 0.005;

/// Opacity of a ring of radius `radius` in a field whose rings die at `max_radius`.
///
/// `base * (1 - r/R)^2 * exp(-r / (R * decay_factor))`: a quadratic taper that reaches zero at
/// the field extent, combined with an exponential falloff (a larger `decay_factor` decays
/// slower). Returns 0 for `radius <= 0`, for `radius > max_radius`, and for any non-finite
/// result.
pub fn calc_alpha(base: f64, radius: f64, max_radius: f64, decay_factor: f64) -> f64 {
    if radius.is_nan() || radius <= 0.0 || max_radius.is_nan() || max_radius <= 0.0 {
        return 0.0;
    }
    let normalized = radius / max_radius;
    if normalized > 1.0 {
        return 0.0;
    }

    let taper = (1.0 - normalized).powi(2);
    let falloff = (-radius / (max_radius * decay_factor)).exp();
    let alpha = base * taper * falloff;
    if alpha.is_finite() { alpha } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/field/decay.rs"]
mod tests;
