/// Render a position or duration as `m:ss`.
///
/// Zero, negative, `NaN` and infinite values (unknown or live durations)
/// render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render `current / duration` as shown next to the progress bar.
pub fn format_progress(current: f64, duration: Option<f64>) -> String {
    format!(
        "{} / {}",
        format_time(current),
        format_time(duration.unwrap_or(f64::NAN))
    )
}

/// Fraction of the progress bar to fill, in `[0, 1]`.
///
/// `0` while the duration is unknown or zero.
pub fn progress_fraction(current: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 && current.is_finite() => (current / d).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn unknown_values_render_as_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn progress_line_uses_both_values() {
        assert_eq!(format_progress(65.0, Some(125.0)), "1:05 / 2:05");
        assert_eq!(format_progress(3.0, None), "0:03 / 0:00");
    }

    #[test]
    fn progress_fraction_is_clamped() {
        assert!((progress_fraction(30.0, Some(120.0)) - 0.25).abs() < 1e-9);
        assert_eq!(progress_fraction(200.0, Some(120.0)), 1.0);
        assert_eq!(progress_fraction(10.0, None), 0.0);
        assert_eq!(progress_fraction(10.0, Some(0.0)), 0.0);
        assert_eq!(progress_fraction(f64::NAN, Some(10.0)), 0.0);
    }
}
