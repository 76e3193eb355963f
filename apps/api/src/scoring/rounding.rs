/// Rounds half-to-even and clamps into `u32`.
pub fn round_half_even(value: f64) -> u32 {
    value.round_ties_even().clamp(0.0, f64::from(u32::MAX)) as u32
}
