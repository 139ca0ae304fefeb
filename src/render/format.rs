/// Format a balance as a whole number with thousands separators ("12,345"), or "N/A".
/// Halves round away from zero.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = format!("{:.0}", v.abs().round());
            let mut out = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
            if v < 0.0 && rounded != "0" { out.push('-') }
            for (i, digit) in rounded.chars().enumerate() {
                if i > 0 && (rounded.len() - i) % 3 == 0 { out.push(',') }
                out.push(digit);
            }
            out
        }
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_value(Some(0.0)), "0");
        assert_eq!(format_value(Some(999.4)), "999");
        assert_eq!(format_value(Some(1_000.0)), "1,000");
        assert_eq!(format_value(Some(15_234.6)), "15,235");
        assert_eq!(format_value(Some(1_234_567.0)), "1,234,567");
        assert_eq!(format_value(Some(-12_345.0)), "-12,345");
        assert_eq!(format_value(Some(-0.2)), "0");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(format_value(Some(2.5)), "3");
        assert_eq!(format_value(Some((10_000.0 + 10_001.0) / 2.0)), "10,001");
        assert_eq!(format_value(Some(999.5)), "1,000");
        assert_eq!(format_value(Some(-2.5)), "-3");
    }

    #[test]
    fn missing_is_not_available() {
        assert_eq!(format_value(None), "N/A");
        assert_eq!(format_value(Some(f64::NAN)), "N/A");
    }
}
