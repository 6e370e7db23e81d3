//! The fixed binary operator tokens a receiver may be followed by.

use crate::cursor::Cursor;

/// Every operator token the grammar accepts as a message name, longest
/// first so that scanning takes the longest match (`<=>` before `<=`
/// before `<`, `===` before `==`).
pub(crate) const OPERATORS: &[&str] = &[
    "<=>", "===", // three characters
    "<<", ">>", "<=", "=>", "==", "!=", "=~", "!~", "**", // two characters
    "+", "-", "*", "/", "%", "|", "^", "&", "<", ">", // one character
];

/// Consume and return the operator token at the cursor, if any.
pub(crate) fn scan_operator(cursor: &mut Cursor) -> Option<&'static str> {
    for &op in OPERATORS {
        if cursor.eat_str(op) {
            return Some(op);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let mut cursor = Cursor::new("<=>".to_string());
        assert_eq!(scan_operator(&mut cursor), Some("<=>"));
        assert!(cursor.at_end());

        let mut cursor = Cursor::new("<= 2".to_string());
        assert_eq!(scan_operator(&mut cursor), Some("<="));

        let mut cursor = Cursor::new("** 2".to_string());
        assert_eq!(scan_operator(&mut cursor), Some("**"));

        let mut cursor = Cursor::new("=== x".to_string());
        assert_eq!(scan_operator(&mut cursor), Some("==="));
    }

    #[test]
    fn test_bare_equals_is_not_an_operator() {
        let mut cursor = Cursor::new("= 1".to_string());
        assert_eq!(scan_operator(&mut cursor), None);
        assert_eq!(cursor.pos(), 0);
    }
}
