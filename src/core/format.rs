/// Whole-dollar amount with thousands separators, e.g. `$17,115`.
pub fn format_dollars(value: f64) -> String {
    let dollars = value.abs().round() as u64;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0.0 && dollars > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(999.4), "$999");
        assert_eq!(format_dollars(12_000.0), "$12,000");
        assert_eq!(format_dollars(17_115.0), "$17,115");
        assert_eq!(format_dollars(1_234_567.8), "$1,234,568");
    }

    #[test]
    fn keeps_sign_for_negative_amounts() {
        assert_eq!(format_dollars(-2_500.0), "-$2,500");
        assert_eq!(format_dollars(-0.2), "$0");
    }
}
