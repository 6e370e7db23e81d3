//! AST node definitions.
//!
//! Nodes are built once during parsing and never mutated afterwards. Child
//! nodes, argument slices, and interior text all live in an arena owned by
//! the caller of the parser; the `'a` lifetime ties every node to it.

/// The receiver of a message send: either an explicitly written expression
/// or the implicit `self` that a bare call targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Receiver<'a> {
    /// No written receiver; the message goes to the implicit self.
    Implicit,
    /// An explicit receiver expression.
    Expr(&'a Node<'a>),
}

/// One AST node. A node returned by any parser rule is always a complete,
/// internally consistent sub-parse; partial nodes are never exposed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// An unsigned integer literal, kept as raw digit text. The parser does
    /// no numeric conversion.
    Number { literal: &'a str },
    /// A string literal with the surrounding quote characters stripped.
    /// No escape processing is performed.
    StringLit { value: &'a str },
    /// Binding of a name to the value of an expression.
    Assign { name: &'a str, value: &'a Node<'a> },
    /// A message send: operator use, explicit dotted call, or bare-word
    /// call. Argument order is significant and preserved as written.
    Send {
        receiver: Receiver<'a>,
        message: &'a str,
        args: &'a [Node<'a>],
    },
    /// A method definition. `params` is always empty in the current
    /// grammar; the slot is reserved for a future parameter syntax.
    Def {
        name: &'a str,
        params: &'a [&'a str],
        body: &'a [Node<'a>],
    },
}

impl<'a> Node<'a> {
    /// Whether this node is a number or string literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Number { .. } | Node::StringLit { .. })
    }
}

/// A parsed program: the ordered sequence of top-level statements.
/// Statement order is execution order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'a> {
    pub statements: &'a [Node<'a>],
}

impl<'a> Program<'a> {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_literal() {
        let number = Node::Number { literal: "42" };
        let string = Node::StringLit { value: "hi" };
        let send = Node::Send {
            receiver: Receiver::Implicit,
            message: "foo",
            args: &[],
        };
        assert!(number.is_literal());
        assert!(string.is_literal());
        assert!(!send.is_literal());
    }

    #[test]
    fn test_structural_equality() {
        let one = Node::Number { literal: "1" };
        let a = Node::Assign {
            name: "x",
            value: &one,
        };
        let b = Node::Assign {
            name: "x",
            value: &Node::Number { literal: "1" },
        };
        assert_eq!(a, b);
        assert_ne!(a, Node::Number { literal: "1" });
    }
}
