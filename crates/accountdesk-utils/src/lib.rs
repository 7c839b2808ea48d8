//! Utility functions and helpers

/// Format an integer string with thousands separators
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Group the integer part of an already rounded decimal string.
///
/// `"1250.5"` with `places = 2` becomes `"1,250.50"`.
pub fn format_amount(value: &str, places: usize, separator: &str) -> String {
    let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));
    let grouped = format_number(int_part, separator);
    if places == 0 {
        return grouped;
    }

    let mut frac: String = frac_part.chars().take(places).collect();
    while frac.len() < places {
        frac.push('0');
    }
    format!("{}.{}", grouped, frac)
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0, ","), "0");
        assert_eq!(format_number(999, ","), "999");
        assert_eq!(format_number(1000, ","), "1,000");
        assert_eq!(format_number(1234567, " "), "1 234 567");
        assert_eq!(format_number(-1234, ","), "-1,234");
    }

    #[test]
    fn test_format_amount_pads_fraction() {
        assert_eq!(format_amount("1250.5", 2, ","), "1,250.50");
        assert_eq!(format_amount("100", 2, ","), "100.00");
        assert_eq!(format_amount("42.129", 2, ","), "42.12");
        assert_eq!(format_amount("3000.75", 0, ","), "3,000");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("ACC-1001", "acc-10"));
        assert!(contains_ignore_case("ACC-1001", ""));
        assert!(!contains_ignore_case("ACC-1001", "acc-2"));
        assert!(contains_ignore_case("Épargne-01", "ÉPARGNE"));
    }
}
