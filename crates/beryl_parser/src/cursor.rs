//! The scanning cursor: immutable source text plus a mutable byte position.
//!
//! Every operation either matches at the current position and advances past
//! what it matched, or leaves the position untouched. "No match" is ordinary
//! control flow here, never an error; the grammar rules decide what a failed
//! match means.

/// A saved cursor position, used to undo a failed speculative parse.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    pos: usize,
}

/// The scanning cursor over source text.
pub struct Cursor {
    text: String,
    pos: usize,
}

impl Cursor {
    /// Create a cursor at the start of the given text.
    pub fn new(text: String) -> Self {
        Self { text, pos: 0 }
    }

    /// The current byte offset into the text.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the cursor has consumed all input.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The unconsumed remainder of the text.
    #[inline]
    pub fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    /// Look at the character at the current position without advancing.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Save the current position.
    #[inline]
    pub fn save(&self) -> Mark {
        Mark { pos: self.pos }
    }

    /// Restore a previously saved position.
    #[inline]
    pub fn restore(&mut self, mark: Mark) {
        self.pos = mark.pos;
    }

    /// A slice of the text between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[start..end]
    }

    /// True if the text at the current position starts with `literal`,
    /// without consuming anything.
    pub fn check_str(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consume `literal` if the text at the current position starts with it.
    pub fn eat_str(&mut self, literal: &str) -> bool {
        if self.check_str(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume the next character if it equals `expected`.
    pub fn eat_char(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consume the next character if it satisfies `pred`.
    pub fn eat_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                Some(c)
            }
            _ => None,
        }
    }

    /// Consume characters while `pred` holds and return the matched text,
    /// which may be empty.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    /// Consume characters while `pred` holds and return the number of bytes
    /// consumed.
    pub fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        self.eat_while(pred);
        self.pos - start
    }
}

/// Horizontal whitespace: spaces and tabs, plus `\r` so that Windows line
/// endings read as plain newlines.
#[inline]
pub fn is_hspace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

/// Any whitespace the grammar skips around dots, operators, and `=`.
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_does_not_consume() {
        let cursor = Cursor::new("abc".to_string());
        assert!(cursor.check_str("ab"));
        assert!(!cursor.check_str("bc"));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_eat_str_advances_only_on_match() {
        let mut cursor = Cursor::new("def foo".to_string());
        assert!(!cursor.eat_str("end"));
        assert_eq!(cursor.pos(), 0);
        assert!(cursor.eat_str("def "));
        assert_eq!(cursor.rest(), "foo");
    }

    #[test]
    fn test_eat_while_returns_matched_text() {
        let mut cursor = Cursor::new("123abc".to_string());
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "123");
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "");
        assert_eq!(cursor.rest(), "abc");
    }

    #[test]
    fn test_save_restore() {
        let mut cursor = Cursor::new("hello".to_string());
        let mark = cursor.save();
        cursor.eat_while(|c| c.is_ascii_lowercase());
        assert!(cursor.at_end());
        cursor.restore(mark);
        assert_eq!(cursor.rest(), "hello");
    }

    #[test]
    fn test_eat_char_and_eat_if() {
        let mut cursor = Cursor::new("a1".to_string());
        assert!(!cursor.eat_char('b'));
        assert!(cursor.eat_char('a'));
        assert_eq!(cursor.eat_if(|c| c.is_ascii_digit()), Some('1'));
        assert!(cursor.at_end());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_slice_and_multibyte() {
        let mut cursor = Cursor::new("'héllo'".to_string());
        assert!(cursor.eat_char('\''));
        let start = cursor.pos();
        cursor.skip_while(|c| c != '\'');
        let inner = cursor.slice(start, cursor.pos()).to_string();
        assert_eq!(inner, "héllo");
        assert!(cursor.eat_char('\''));
    }
}
