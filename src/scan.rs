// src/scan.rs

/// Number of leading characters that identify an item code. Codes shorter
/// than this are incomplete and never produce an archive entry.
pub const PREFIX_LEN: usize = 9;

/// Comparable identity of a scanned code: first `PREFIX_LEN` characters,
/// uppercased. May be shorter than `PREFIX_LEN` when the scan is incomplete.
pub fn code_prefix(raw: &str) -> String {
    let s = trim_scan(raw);
    s.chars().take(PREFIX_LEN).collect::<String>().to_uppercase()
}

/// User badge identifier: letters of the token before the first space,
/// uppercased. Badges often carry a numeric suffix after the name part;
/// only the letters matter for the archive.
pub fn user_letters(raw: &str) -> String {
    let s = trim_scan(raw);
    let token = s.split(' ').next().unwrap_or("");
    token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// Scanners tend to append CR/LF or TAB, and some prepend a BOM.
fn trim_scan(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_takes_first_nine_uppercased() {
        assert_eq!(code_prefix("abcdef123XYZ"), "ABCDEF123");
        assert_eq!(code_prefix("  ABCDEF123456  "), "ABCDEF123");
    }

    #[test]
    fn prefix_of_short_code_is_the_code_itself() {
        assert_eq!(code_prefix("abc"), "ABC");
        assert_eq!(code_prefix(""), "");
    }

    #[test]
    fn prefix_strips_scanner_control_garnish() {
        assert_eq!(code_prefix("\u{FEFF}ABCDEF123\r\n"), "ABCDEF123");
        assert_eq!(code_prefix("\tABCDEF123\t"), "ABCDEF123");
    }

    #[test]
    fn user_letters_keeps_letters_of_first_token() {
        assert_eq!(user_letters("jdoe 0042"), "JDOE");
        assert_eq!(user_letters("j.doe-7"), "JDOE");
        assert_eq!(user_letters("  anna  "), "ANNA");
    }

    #[test]
    fn user_letters_of_non_letter_input_is_empty() {
        assert_eq!(user_letters("12345"), "");
        assert_eq!(user_letters(""), "");
        assert_eq!(user_letters("   "), "");
    }
}
