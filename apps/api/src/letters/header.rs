//! Header block assembly: the sender identity + date at the top of every letter.
//!
//! Pure and deterministic: the date is an input, not read from the clock.

use chrono::NaiveDate;

/// Contact fields that feed the header, in the order they are printed
/// (phone is formatted and placed after email).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderFields<'a> {
    pub full_name: &'a str,
    pub address: &'a str,
    pub city_state_zip: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

/// Formats a single US phone number as `(AAA) BBB-CCCC`.
///
/// Non-digits are stripped and a leading country code `1` on an 11-digit
/// number is dropped. Anything that does not leave exactly 10 digits is
/// returned unchanged.
pub fn format_us_phone(input: &str) -> String {
    let mut digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    if digits.len() != 10 {
        return input.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

/// Long-form date, e.g. `October 16, 2026`.
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Builds the newline-joined header block.
///
/// Empty or whitespace-only lines are dropped entirely, including the two
/// trailing spacer lines, so the block ends with the date line.
pub fn build_header_block(fields: &HeaderFields<'_>, date: NaiveDate) -> String {
    let phone = if fields.phone.is_empty() {
        String::new()
    } else {
        format_us_phone(fields.phone)
    };
    let date_line = format_letter_date(date);

    [
        fields.full_name,
        fields.address,
        fields.city_state_zip,
        fields.email,
        phone.as_str(),
        date_line.as_str(),
        "",
        "",
    ]
    .into_iter()
    .filter(|line| !line.trim().is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 6).unwrap()
    }

    #[test]
    fn test_format_us_phone_ten_digits() {
        assert_eq!(format_us_phone("1234567890"), "(123) 456-7890");
    }

    #[test]
    fn test_format_us_phone_country_code_and_punctuation() {
        assert_eq!(format_us_phone("+1 (234) 567-8901"), "(234) 567-8901");
    }

    #[test]
    fn test_format_us_phone_too_short_unchanged() {
        assert_eq!(format_us_phone("12345"), "12345");
    }

    #[test]
    fn test_format_us_phone_foreign_number_unchanged() {
        assert_eq!(format_us_phone("+44 20 7946 0958"), "+44 20 7946 0958");
    }

    #[test]
    fn test_format_us_phone_eleven_digits_without_leading_one_unchanged() {
        assert_eq!(format_us_phone("22345678901"), "22345678901");
    }

    #[test]
    fn test_format_letter_date_no_zero_padding() {
        assert_eq!(format_letter_date(date()), "October 6, 2026");
    }

    #[test]
    fn test_header_block_full_profile_in_order() {
        let fields = HeaderFields {
            full_name: "Ada Lovelace",
            address: "12 St James's Square",
            city_state_zip: "Springfield, IL 62701",
            email: "ada@example.com",
            phone: "217.555.0134",
        };
        assert_eq!(
            build_header_block(&fields, date()),
            "Ada Lovelace\n12 St James's Square\nSpringfield, IL 62701\nada@example.com\n(217) 555-0134\nOctober 6, 2026"
        );
    }

    #[test]
    fn test_header_block_omits_empty_and_whitespace_fields() {
        let fields = HeaderFields {
            full_name: "Ada Lovelace",
            address: "   ",
            city_state_zip: "",
            email: "ada@example.com",
            phone: "",
        };
        assert_eq!(
            build_header_block(&fields, date()),
            "Ada Lovelace\nada@example.com\nOctober 6, 2026"
        );
    }

    #[test]
    fn test_header_block_anonymous_is_date_only() {
        assert_eq!(
            build_header_block(&HeaderFields::default(), date()),
            "October 6, 2026"
        );
    }

    #[test]
    fn test_header_block_keeps_non_us_phone_verbatim() {
        let fields = HeaderFields {
            phone: "+44 20 7946 0958",
            ..Default::default()
        };
        assert_eq!(
            build_header_block(&fields, date()),
            "+44 20 7946 0958\nOctober 6, 2026"
        );
    }
}
