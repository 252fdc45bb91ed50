//! Conversion between cycle time (seconds per unit) and hourly capacity.
//!
//! Both directions divide 3600 by their input, so a zero input yields
//! `f64::INFINITY` and a negative input keeps its sign. Callers that need
//! strictly positive values should go through `validation` first.

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Units per hour for a cycle time in seconds.
pub fn cycle_time_to_capacity(cycle_time_s: f64) -> f64 {
    SECONDS_PER_HOUR / cycle_time_s
}

/// Seconds per unit for an hourly capacity.
pub fn capacity_to_cycle_time(capacity_per_hour: f64) -> f64 {
    SECONDS_PER_HOUR / capacity_per_hour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_cycle_time_to_capacity() {
        assert_eq!(cycle_time_to_capacity(60.0), 60.0);
        assert_eq!(cycle_time_to_capacity(30.0), 120.0);
        assert_eq!(cycle_time_to_capacity(120.0), 30.0);
        assert_eq!(cycle_time_to_capacity(45.0), 80.0);
        assert_eq!(cycle_time_to_capacity(36.0), 100.0);
        assert_eq!(cycle_time_to_capacity(1.0), 3600.0);
        assert_eq!(cycle_time_to_capacity(3600.0), 1.0);
    }

    #[test]
    fn converts_capacity_to_cycle_time() {
        assert_eq!(capacity_to_cycle_time(60.0), 60.0);
        assert_eq!(capacity_to_cycle_time(120.0), 30.0);
        assert_eq!(capacity_to_cycle_time(80.0), 45.0);
        assert_eq!(capacity_to_cycle_time(100.0), 36.0);
        assert_eq!(capacity_to_cycle_time(1.0), 3600.0);
    }

    #[test]
    fn zero_and_negative_inputs_follow_float_division() {
        assert_eq!(cycle_time_to_capacity(0.0), f64::INFINITY);
        assert_eq!(capacity_to_cycle_time(0.0), f64::INFINITY);
        assert_eq!(cycle_time_to_capacity(-60.0), -60.0);
        assert_eq!(capacity_to_cycle_time(-60.0), -60.0);
        assert!((cycle_time_to_capacity(0.001) - 3_600_000.0).abs() < 1e-6);
    }

    #[test]
    fn conversions_are_reciprocal() {
        for value in [0.5, 7.0, 45.0, 80.0, 103.0, 1234.5] {
            let back = capacity_to_cycle_time(cycle_time_to_capacity(value));
            assert!((back - value).abs() < 1e-9 * value, "{value} -> {back}");
            let back = cycle_time_to_capacity(capacity_to_cycle_time(value));
            assert!((back - value).abs() < 1e-9 * value, "{value} -> {back}");
        }
    }
}
