//! Speculative quantum crack-time adjustment and duration formatting
//!
//! The quantum transform divides the classical crack time by 2^exponent. The
//! exponent models a hypothetical speedup and has no physical grounding; it
//! is a tunable constant, not a researched parameter.

/// Default speculative speedup exponent
pub const DEFAULT_QUANTUM_EXPONENT: u32 = 40;

/// Largest-first interval table with fixed conversion constants:
/// 100 years per century, 365 days per year, 30 days per month, 7 per week.
const INTERVALS: &[(&str, u64)] = &[
    ("century", 60 * 60 * 24 * 365 * 100),
    ("year", 60 * 60 * 24 * 365),
    ("month", 60 * 60 * 24 * 30),
    ("week", 60 * 60 * 24 * 7),
    ("day", 60 * 60 * 24),
    ("hour", 60 * 60),
    ("minute", 60),
    ("second", 1),
];

/// Quantum-adjusted crack time: `classical_seconds / 2^exponent`
pub fn adjust(classical_seconds: f64, exponent: u32) -> f64 {
    classical_seconds / 2f64.powi(exponent as i32)
}

/// Decompose a seconds value into a human-readable duration.
///
/// Emits only non-zero components, pluralized past 1, joined by ", ".
/// Values below one second format as "Immediately".
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        return "Immediately".to_string();
    }

    // Saturating cast; astronomic crack times clamp rather than wrap.
    let mut remaining = seconds as u64;
    let mut parts = Vec::new();

    for (name, count) in INTERVALS {
        let value = remaining / count;
        if value > 0 {
            let plural = if value > 1 { "s" } else { "" };
            parts.push(format!("{} {}{}", value, name, plural));
        }
        remaining %= count;
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_exact() {
        let seconds = 1.0e12;
        assert_eq!(adjust(seconds, 40), seconds / 2f64.powi(40));
        assert_eq!(adjust(2f64.powi(40), 40), 1.0);
        assert_eq!(adjust(0.0, 40), 0.0);
    }

    #[test]
    fn test_default_exponent() {
        assert_eq!(DEFAULT_QUANTUM_EXPONENT, 40);
        assert_eq!(
            adjust(8.0, DEFAULT_QUANTUM_EXPONENT),
            8.0 / 1_099_511_627_776.0
        );
    }

    #[test]
    fn test_format_sub_second() {
        assert_eq!(format_duration(0.5), "Immediately");
        assert_eq!(format_duration(0.0), "Immediately");
        assert_eq!(format_duration(0.999), "Immediately");
    }

    #[test]
    fn test_format_simple() {
        assert_eq!(format_duration(1.0), "1 second");
        assert_eq!(format_duration(90.0), "1 minute, 30 seconds");
        assert_eq!(format_duration(3600.0), "1 hour");
        assert_eq!(format_duration(3661.0), "1 hour, 1 minute, 1 second");
    }

    #[test]
    fn test_format_pluralization() {
        assert_eq!(format_duration(120.0), "2 minutes");
        assert_eq!(format_duration(60.0 * 60.0 * 24.0 * 2.0), "2 days");
    }

    #[test]
    fn test_format_large_values() {
        let century = 60.0 * 60.0 * 24.0 * 365.0 * 100.0;
        assert_eq!(format_duration(century), "1 century");
        assert_eq!(format_duration(century * 3.0), "3 centuries");

        let year_and_week = 60.0 * 60.0 * 24.0 * (365.0 + 7.0);
        assert_eq!(format_duration(year_and_week), "1 year, 1 week");
    }

    #[test]
    fn test_format_skips_zero_components() {
        // One day plus one second: no hours or minutes in between.
        let value = 60.0 * 60.0 * 24.0 + 1.0;
        assert_eq!(format_duration(value), "1 day, 1 second");
    }
}
