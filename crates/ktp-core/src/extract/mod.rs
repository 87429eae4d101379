//! Structured field extraction from recognized KTP text.
//!
//! Three independent pattern rules are applied to the full OCR text; each
//! contributes at most one field and a rule that does not match simply leaves
//! its field unset. Extraction is a pure function of the input text.
//!
//! # Example
//!
//! ```rust
//! use ktp_core::extract_ktp_data;
//!
//! let data = extract_ktp_data("3201011234567890\nBUDI SANTOSO\n01-01-1990");
//! assert_eq!(data.nik.as_deref(), Some("3201011234567890"));
//! assert_eq!(data.nama.as_deref(), Some("BUDI SANTOSO"));
//! assert_eq!(data.tanggal_lahir.as_deref(), Some("01-01-1990"));
//! ```

mod ktp_data;
mod patterns;

pub use ktp_data::KtpData;

use crate::TRACING_TARGET_EXTRACT;

/// Extracts NIK, name and birth date from recognized text.
///
/// Each rule takes the leftmost match only:
/// - NIK: a standalone run of exactly 16 digits.
/// - Name: the uppercase line directly after a 16-digit run (optionally via
///   a colon), matched case-insensitively and trimmed, otherwise verbatim.
/// - Birth date: `dd-mm-yyyy` / `dd/mm/yyyy`, with no calendar validation.
pub fn extract_ktp_data(text: &str) -> KtpData {
    let data = KtpData {
        nik: patterns::find_nik(text),
        nama: patterns::find_nama(text),
        tanggal_lahir: patterns::find_tanggal_lahir(text),
    };

    tracing::trace!(
        target: TRACING_TARGET_EXTRACT,
        text_len = text.len(),
        matched = data.len(),
        "extracted ktp fields"
    );

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields_from_canonical_layout() {
        let data = extract_ktp_data("3201011234567890\nBUDI SANTOSO\n01-01-1990");

        assert_eq!(
            data,
            KtpData {
                nik: Some("3201011234567890".to_owned()),
                nama: Some("BUDI SANTOSO".to_owned()),
                tanggal_lahir: Some("01-01-1990".to_owned()),
            }
        );
    }

    #[test]
    fn text_without_patterns_yields_empty_data() {
        for text in [
            "",
            "PROVINSI JAWA BARAT",
            "nik: 1234\nnama: budi",
            "tanggal 1-1-1990 dan 2020/01/01",
        ] {
            let data = extract_ktp_data(text);
            assert!(data.is_empty(), "unexpected match in {text:?}: {data:?}");
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "NIK : 3171234567890123\nJOHN DOE\nTempat/Tgl Lahir : JAKARTA, 17-08-1985";
        assert_eq!(extract_ktp_data(text), extract_ktp_data(text));
    }

    #[test]
    fn full_card_text() {
        let text = "PROVINSI DKI JAKARTA\n\
                    JAKARTA SELATAN\n\
                    NIK : 3174096112900001\n\
                    Nama : SITI AMINAH\n\
                    Tempat/Tgl Lahir : JAKARTA, 21/12/1990\n\
                    Jenis Kelamin : PEREMPUAN\n";

        let data = extract_ktp_data(text);
        assert_eq!(data.nik.as_deref(), Some("3174096112900001"));
        assert_eq!(data.tanggal_lahir.as_deref(), Some("21/12/1990"));
        // The line after the NIK starts with a label, not just letters and spaces.
        assert_eq!(data.nama, None);
    }
}
