//! Compiled extraction patterns.
//!
//! The `regex` crate has no look-around, which matches the rules here: word
//! boundaries are the only context checked around a match.

use std::sync::LazyLock;

use regex::Regex;

/// A standalone run of exactly 16 digits.
static NIK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{16}\b").expect("valid NIK pattern"));

/// Letters and spaces on the line(s) right after a 16-digit run.
static NAMA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b\d{16}\b\s*:\s*|\b\d{16}\b\s*)\s*([A-Z\s]+)\n")
        .expect("valid name pattern")
});

/// `dd-mm-yyyy` or `dd/mm/yyyy`; separators are not required to agree.
static TANGGAL_LAHIR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{2}[-/]\d{2}[-/]\d{4})\b").expect("valid birth date pattern")
});

pub(super) fn find_nik(text: &str) -> Option<String> {
    NIK_PATTERN.find(text).map(|m| m.as_str().to_owned())
}

pub(super) fn find_nama(text: &str) -> Option<String> {
    NAMA_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

pub(super) fn find_tanggal_lahir(text: &str) -> Option<String> {
    TANGGAL_LAHIR_PATTERN
        .find(text)
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nik_requires_exactly_sixteen_digits() {
        assert_eq!(find_nik("123456789012345"), None);
        assert_eq!(find_nik("12345678901234567"), None);
        assert_eq!(
            find_nik("NIK:1234567890123456;").as_deref(),
            Some("1234567890123456")
        );
    }

    #[test]
    fn nik_is_bounded_by_word_boundaries() {
        // Letters are word characters, so they glue onto the digit run.
        assert_eq!(find_nik("A1234567890123456"), None);
        assert_eq!(find_nik("1234567890123456B"), None);
        assert_eq!(
            find_nik("(1234567890123456)").as_deref(),
            Some("1234567890123456")
        );
    }

    #[test]
    fn first_nik_wins() {
        let text = "1111111111111111 2222222222222222";
        assert_eq!(find_nik(text).as_deref(), Some("1111111111111111"));
    }

    #[test]
    fn nama_follows_nik_with_optional_colon() {
        assert_eq!(
            find_nama("3201011234567890 : BUDI SANTOSO\n").as_deref(),
            Some("BUDI SANTOSO")
        );
        assert_eq!(
            find_nama("3201011234567890\n  BUDI SANTOSO  \n").as_deref(),
            Some("BUDI SANTOSO")
        );
    }

    #[test]
    fn nama_keeps_case_verbatim() {
        assert_eq!(
            find_nama("3201011234567890\nBudi Santoso\n").as_deref(),
            Some("Budi Santoso")
        );
    }

    #[test]
    fn nama_requires_trailing_line_break() {
        assert_eq!(find_nama("3201011234567890\nBUDI SANTOSO"), None);
    }

    #[test]
    fn nama_requires_preceding_nik() {
        assert_eq!(find_nama("BUDI SANTOSO\n3201011234567890\n"), None);
        assert_eq!(find_nama("320101123456789\nBUDI SANTOSO\n"), None);
    }

    #[test]
    fn nama_stops_at_non_letter_lines() {
        let text = "3201011234567890\nBUDI SANTOSO\n01-01-1990";
        assert_eq!(find_nama(text).as_deref(), Some("BUDI SANTOSO"));
    }

    #[test]
    fn tanggal_lahir_accepts_both_separators() {
        assert_eq!(
            find_tanggal_lahir("lahir 17-08-1945").as_deref(),
            Some("17-08-1945")
        );
        assert_eq!(
            find_tanggal_lahir("lahir 17/08/1945").as_deref(),
            Some("17/08/1945")
        );
        assert_eq!(
            find_tanggal_lahir("lahir 17-08/1945").as_deref(),
            Some("17-08/1945")
        );
    }

    #[test]
    fn tanggal_lahir_is_not_calendar_checked() {
        assert_eq!(
            find_tanggal_lahir("99-99-9999").as_deref(),
            Some("99-99-9999")
        );
    }

    #[test]
    fn tanggal_lahir_inside_punctuated_numbers() {
        // Separators are non-word characters, so boundaries exist around them.
        assert_eq!(
            find_tanggal_lahir("ref 1-01-02-2003-4").as_deref(),
            Some("01-02-2003")
        );
        assert_eq!(find_tanggal_lahir("001-01-19900"), None);
    }
}
