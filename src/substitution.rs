use crate::scan::code_prefix;

/// Operator-declared equivalence between two code prefixes. Direction only
/// matters for display; matching treats the pair as symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPair {
    pub expected: String,
    pub substitute: String,
}

/// Example table shown on first start and restored by the reset action.
pub const DEFAULT_SUBSTITUTION_TEXT: &str = "\
# Example:
# EXPECTED,SUBSTITUTE
ABCDEF123,XYZ987654
111111111,222222222";

/// Parses the substitution textarea into pairs. Blank lines and `#` comment
/// lines are skipped, as are lines without two comma-separated fields. Each
/// side goes through the prefix extractor; a pair with an empty side is
/// dropped.
pub fn parse_pairs(text: &str) -> Vec<SubstitutionPair> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',');
        let (Some(first), Some(second)) = (fields.next(), fields.next()) else {
            continue;
        };
        let expected = code_prefix(first);
        let substitute = code_prefix(second);
        if expected.is_empty() || substitute.is_empty() {
            continue;
        }
        pairs.push(SubstitutionPair {
            expected,
            substitute,
        });
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_pairs() {
        let pairs = parse_pairs("ABCDEF123,XYZ987654\n111111111,222222222");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].expected, "ABCDEF123");
        assert_eq!(pairs[0].substitute, "XYZ987654");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# header\n\n  \nABCDEF123,XYZ987654\n# trailing";
        let pairs = parse_pairs(text);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn skips_lines_without_two_fields() {
        assert!(parse_pairs("ABCDEF123").is_empty());
        assert!(parse_pairs("ABCDEF123,").is_empty());
        assert!(parse_pairs(",XYZ987654").is_empty());
    }

    #[test]
    fn normalizes_both_sides_to_prefixes() {
        let pairs = parse_pairs(" abcdef123456 , xyz987654zzz ");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].expected, "ABCDEF123");
        assert_eq!(pairs[0].substitute, "XYZ987654");
    }

    #[test]
    fn extra_fields_beyond_the_second_are_ignored() {
        let pairs = parse_pairs("ABCDEF123,XYZ987654,note for the operator");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].substitute, "XYZ987654");
    }

    #[test]
    fn default_table_parses_to_its_two_example_pairs() {
        let pairs = parse_pairs(DEFAULT_SUBSTITUTION_TEXT);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].expected, "111111111");
        assert_eq!(pairs[1].substitute, "222222222");
    }
}
