pub fn km_to_mi(km: f64) -> f64 {
    0.621371 * km
}

pub fn c_to_f(c: f64) -> f64 {
    1.8 * c + 32.0
}

pub fn kts_to_mph(kts: f64) -> f64 {
    1.15078 * kts
}

/// Rounds to `places` decimals by scaling, rounding half away from zero, and scaling back.
/// The scaled value is computed in floating point first, so `round(2.345, 2)` sees
/// `234.50000000000003` and lands on `2.35`.
pub fn round(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
