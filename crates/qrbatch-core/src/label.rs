//! Label cleaning for artifact names and captions.
//!
//! Labels come straight from user spreadsheets, so they are reduced to a
//! character set that is safe both as an archive entry name and as caption
//! text: alphanumerics, space, hyphen and underscore.

/// Prefix used when a label has nothing left after cleaning.
pub const FALLBACK_PREFIX: &str = "qr";

/// Returns true if the character survives label cleaning.
#[inline]
pub fn is_label_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || c == '-' || c == '_'
}

/// Filter a raw label down to the safe character set and trim it.
///
/// # Example
///
/// ```
/// use qrbatch_core::label::clean_label;
///
/// assert_eq!(clean_label("  Store #1 / Main "), "Store 1  Main");
/// ```
pub fn clean_label(raw: &str) -> String {
    let filtered: String = raw.chars().filter(|&c| is_label_char(c)).collect();
    filtered.trim().to_string()
}

/// Base name for a row whose label cleans to the empty string.
///
/// `row` is the 1-based position of the row among the data rows.
pub fn fallback_name(row: usize) -> String {
    format!("{FALLBACK_PREFIX}_{row}")
}

/// Cleaned label for `raw`, or the fallback name if nothing survives.
pub fn base_name(raw: &str, row: usize) -> String {
    let cleaned = clean_label(raw);
    if cleaned.is_empty() {
        fallback_name(row)
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label_keeps_safe_chars() {
        assert_eq!(clean_label("Store A"), "Store A");
        assert_eq!(clean_label("kiosk-2_b"), "kiosk-2_b");
    }

    #[test]
    fn test_clean_label_strips_punctuation() {
        assert_eq!(clean_label("Café/Bar: #7!"), "CaféBar 7");
        assert_eq!(clean_label("a.b,c;d"), "abcd");
    }

    #[test]
    fn test_clean_label_trims_after_filtering() {
        // The slash is removed first, leaving a leading space to trim
        assert_eq!(clean_label("/ Lobby "), "Lobby");
        assert_eq!(clean_label("\tDesk\n"), "Desk");
    }

    #[test]
    fn test_clean_label_can_be_empty() {
        assert_eq!(clean_label(""), "");
        assert_eq!(clean_label("!!! ???"), "");
    }

    #[test]
    fn test_base_name_fallback() {
        assert_eq!(base_name("***", 4), "qr_4");
        assert_eq!(base_name("", 1), "qr_1");
        assert_eq!(base_name("Gate 3", 9), "Gate 3");
    }
}
