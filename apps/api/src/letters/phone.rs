//! Post-processing: rewrite US-shaped phone numbers in generated text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Optional `+1`/`1` country code, then 3-3-4 digits separated by spaces,
/// dashes or dots, with optional parentheses around the area code.
/// A match never starts inside a longer digit run, and whitespace is only
/// consumed inside the number, never in front of it.
static US_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(\+?\b1[\s\-.]?)(?:\(\s*)?|\(\s*|\b)([0-9]{3})\s*\)?[\s\-.]?\s*([0-9]{3})[\s\-.]?\s*([0-9]{4})\b",
    )
    .expect("Invalid regex")
});

/// Rewrites every match to `(AAA) BBB-CCCC`. Best effort: area codes are not
/// validated and numbers spelled out in words are left alone.
///
/// A leading `1` that directly follows another number (`"Ref 1 1 555 ..."`)
/// is kept as written, so running this on its own output changes nothing.
pub fn normalize_phones_in_text(text: &str) -> String {
    US_PHONE_RE
        .replace_all(text, |caps: &Captures| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let kept_code = match caps.get(1) {
                Some(code) if follows_digit(&text[..start]) => code.as_str(),
                _ => "",
            };
            format!("{kept_code}({}) {}-{}", &caps[2], &caps[3], &caps[4])
        })
        .into_owned()
}

/// True when `prefix` ends in a digit, ignoring trailing separators.
fn follows_digit(prefix: &str) -> bool {
    prefix
        .trim_end_matches(|c: char| c.is_whitespace() || c == '-' || c == '.')
        .ends_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_every_number_independently() {
        let text = "Call 555.123.4567 or +1 (555) 765-4321 today.";
        assert_eq!(
            normalize_phones_in_text(text),
            "Call (555) 123-4567 or (555) 765-4321 today."
        );
    }

    #[test]
    fn test_bare_digits_with_country_code() {
        assert_eq!(normalize_phones_in_text("15551234567"), "(555) 123-4567");
    }

    #[test]
    fn test_space_separated() {
        assert_eq!(
            normalize_phones_in_text("Phone: 555 123 4567"),
            "Phone: (555) 123-4567"
        );
    }

    #[test]
    fn test_non_matching_text_untouched() {
        let text = "I shipped 12345 orders in 2024 across 3 regions.";
        assert_eq!(normalize_phones_in_text(text), text);
    }

    #[test]
    fn test_numbers_in_words_untouched() {
        let text = "five five five, one two three, four five six seven";
        assert_eq!(normalize_phones_in_text(text), text);
    }

    #[test]
    fn test_multiline_letter_only_phone_changes() {
        let letter = "Ada Lovelace\nada@example.com\n+1-217-555-0134\nOctober 6, 2026\n\nDear Hiring Manager,";
        assert_eq!(
            normalize_phones_in_text(letter),
            "Ada Lovelace\nada@example.com\n(217) 555-0134\nOctober 6, 2026\n\nDear Hiring Manager,"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Call 555.123.4567 or +1 (555) 765-4321 today.",
            "(123) 456-7890",
            "Reach me: 1 234 567 8901, ext. 12",
            "Suite 201 555-123-4567",
            "Office 101 (555) 123-4567",
            "Ref 1 1 555 123 4567",
            "Ref 1 15551234567",
            "v1.555.123.4567",
            "no phones here",
        ];
        for input in inputs {
            let once = normalize_phones_in_text(input);
            let twice = normalize_phones_in_text(&once);
            assert_eq!(once, twice, "normalization not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_digits_before_number_are_preserved() {
        assert_eq!(
            normalize_phones_in_text("Suite 201 555-123-4567"),
            "Suite 201 (555) 123-4567"
        );
        assert_eq!(
            normalize_phones_in_text("Office 101 (555) 123-4567"),
            "Office 101 (555) 123-4567"
        );
    }

    #[test]
    fn test_country_code_after_word_is_dropped() {
        assert_eq!(
            normalize_phones_in_text("Ref 1 555 123 4567"),
            "Ref (555) 123-4567"
        );
    }

    #[test]
    fn test_country_code_after_number_is_kept() {
        assert_eq!(
            normalize_phones_in_text("Ref 1 1 555 123 4567"),
            "Ref 1 1 (555) 123-4567"
        );
    }

    #[test]
    fn test_no_match_inside_longer_digit_run() {
        let text = "Order 91234567890 shipped.";
        assert_eq!(normalize_phones_in_text(text), text);
    }
}
