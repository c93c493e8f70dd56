//! Number formatting for dashboards.

/// Group digits in threes: `1234567` → `1,234,567`. Missing values show `0`.
pub fn format_number(value: Option<u64>) -> String {
    value.map_or_else(|| "0".to_string(), |n| group_digits(&n.to_string()))
}

/// Like [`format_number`] for fractional values; the fraction is kept as-is.
pub fn format_decimal(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "0".to_string();
    };
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int, frac)) => format!("{sign}{}.{frac}", group_digits(int)),
        None => format!("{sign}{}", group_digits(unsigned)),
    }
}

/// `part / total` as a percentage with one decimal; `0` when total is 0.
pub fn percentage(part: Option<f64>, total: Option<f64>) -> String {
    match (part, total) {
        (Some(part), Some(total)) if total != 0.0 => format!("{:.1}", part / total * 100.0),
        (None, Some(total)) if total != 0.0 => "0.0".to_string(),
        _ => "0".to_string(),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(Some(0)), "0");
        assert_eq!(format_number(Some(999)), "999");
        assert_eq!(format_number(Some(1000)), "1,000");
        assert_eq!(format_number(Some(1234567)), "1,234,567");
        assert_eq!(format_number(None), "0");
    }

    #[test]
    fn decimals_keep_fraction() {
        assert_eq!(format_decimal(Some(1234.5)), "1,234.5");
        assert_eq!(format_decimal(Some(-98765.0)), "-98,765");
        assert_eq!(format_decimal(None), "0");
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(percentage(Some(1.0), Some(3.0)), "33.3");
        assert_eq!(percentage(Some(50.0), Some(100.0)), "50.0");
        assert_eq!(percentage(Some(5.0), Some(0.0)), "0");
        assert_eq!(percentage(Some(5.0), None), "0");
    }
}
