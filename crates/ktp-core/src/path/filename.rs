use unicode_normalization::UnicodeNormalization;

/// Reserved device names that must not be used as a bare file stem.
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduces a client-supplied filename to a safe, flat ASCII name.
///
/// Characters are NFKD-decomposed first, so accented letters keep their
/// ASCII base (`ñ` becomes `n`). `/` becomes a word break, whitespace runs
/// collapse to a single `_`, and anything outside `[A-Za-z0-9_.-]` is
/// dropped, `\` included. Leading and trailing dots and underscores are
/// stripped, so the result can never climb out of a prefix (`../x` becomes
/// `x`). May return an empty string.
///
/// ```rust
/// use ktp_core::secure_filename;
///
/// assert_eq!(secure_filename("My KTP (scan).jpg"), "My_KTP_scan.jpg");
/// assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
/// ```
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');
    if is_device_name(trimmed) {
        return format!("_{trimmed}");
    }

    trimmed.to_owned()
}

fn is_device_name(filename: &str) -> bool {
    let stem = filename.split('.').next().unwrap_or_default();
    WINDOWS_DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
}
