//! Health advice for air-quality index values.

/// Returned for any index outside 1..=5.
pub const UNKNOWN_ADVICE: &str = "Unknown";

/// Map an AQI value (1 = best, 5 = worst) to its advice text.
pub fn advice(aqi: i32) -> &'static str {
    match aqi {
        1 => "Good quality",
        2 => "Acceptable quality",
        3 => "Increased sensitivity",
        4 => "High pollution",
        5 => "Dangerous for health",
        _ => UNKNOWN_ADVICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(advice(1), "Good quality");
        assert_eq!(advice(2), "Acceptable quality");
        assert_eq!(advice(3), "Increased sensitivity");
        assert_eq!(advice(4), "High pollution");
        assert_eq!(advice(5), "Dangerous for health");
    }

    #[test]
    fn test_out_of_range_is_unknown() {
        for aqi in [0, 6, -1, i32::MAX, i32::MIN] {
            assert_eq!(advice(aqi), UNKNOWN_ADVICE);
        }
    }
}
