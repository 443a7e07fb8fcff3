//! Heat stress estimate.
//!
//! Without a humidity sensor on the node the WBGT is an approximation built
//! on a fixed humidity, not a measured quantity.

/// Natural wet-bulb temperature in Celsius (Stull, 2011).
///
/// Valid for relative humidity 5-99 % and temperature -20-50 °C; outside that
/// range the result is still finite but less accurate.
pub fn estimate_wet_bulb(temp_c: f64, humidity_pct: f64) -> f64 {
    let rh = humidity_pct;

    temp_c * (0.151977 * (rh + 8.313659).sqrt()).atan() + (temp_c + rh).atan()
        - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}

/// Indoor WBGT approximated as `0.7 * wet_bulb + 0.3 * dry_bulb`.
pub fn compute_wbgt(temp_c: f64, humidity_pct: f64) -> f64 {
    0.7 * estimate_wet_bulb(temp_c, humidity_pct) + 0.3 * temp_c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wet_bulb_reference_point() {
        // Stull's paper: 20 °C at 50 % RH gives 13.7 °C.
        let twb = estimate_wet_bulb(20.0, 50.0);
        assert!((twb - 13.7).abs() < 0.1, "got {twb}");
    }

    #[test]
    fn test_wet_bulb_is_finite_and_below_dry_bulb() {
        let twb = estimate_wet_bulb(30.0, 60.0);

        assert!(twb.is_finite());
        assert!(twb < 30.0);
    }

    #[test]
    fn test_wbgt_blend() {
        let wbgt = compute_wbgt(33.0, 40.0);

        assert!((wbgt - (0.7 * estimate_wet_bulb(33.0, 40.0) + 9.9)).abs() < 1e-9);
        assert!(wbgt > 25.0 && wbgt < 28.0, "got {wbgt}");
    }

    #[test]
    fn test_wbgt_grows_with_humidity() {
        assert!(compute_wbgt(30.0, 80.0) > compute_wbgt(30.0, 40.0));
    }
}
