//! Currency rendering for user-facing messages.

/// Format an amount as whole-unit rand with thousands separators,
/// e.g. `20000.0` renders as `"R20,000"`.
pub fn format_rand(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-R{grouped}")
    } else {
        format!("R{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_rand(0.0), "R0");
        assert_eq!(format_rand(999.0), "R999");
        assert_eq!(format_rand(1_000.0), "R1,000");
        assert_eq!(format_rand(15_000.0), "R15,000");
        assert_eq!(format_rand(456_789.0), "R456,789");
        assert_eq!(format_rand(1_234_567.0), "R1,234,567");
    }

    #[test]
    fn rounds_to_whole_units() {
        assert_eq!(format_rand(20_000.4), "R20,000");
        assert_eq!(format_rand(19_999.6), "R20,000");
    }

    #[test]
    fn handles_negative_amounts() {
        assert_eq!(format_rand(-1_500.0), "-R1,500");
    }
}
