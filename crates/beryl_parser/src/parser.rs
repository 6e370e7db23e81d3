//! The Beryl grammar engine.
//!
//! A single-pass, backtracking recursive descent parser operating directly
//! on source text through the scanning cursor; there is no separate token
//! stage. Each rule either succeeds with a node and an advanced cursor,
//! fails softly with the cursor restored, or raises the single fatal error
//! that aborts the whole parse. Nodes are allocated into a caller-provided
//! arena.

use bumpalo::Bump;
use beryl_ast::{Node, Program, Receiver};
use beryl_core::{LineMap, TextPos, TextSpan};
use beryl_diagnostics::{messages, DiagnosticMessage, ParseError};

use crate::cursor::{is_hspace, is_space, Cursor};
use crate::operators;

/// Maximum expression nesting before the parser bails out with a fatal
/// error instead of overflowing the stack.
const MAX_EXPR_DEPTH: u32 = 500;

/// The outcome of one rule attempt: a node, a soft "does not apply", or the
/// fatal error.
type ParseOutcome<'a> = Result<Option<Node<'a>>, ParseError>;

/// Which grammar is available to an expression parse.
///
/// The original engine kept an instance-wide "inside an explicit receiver"
/// flag; threading the context by value instead means no exit path can ever
/// leave it set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprContext {
    /// The full expression grammar.
    Free,
    /// Inside an explicit-receiver attempt: a nested attempt may only take
    /// an implicit call, a string, or a number as its receiver.
    Receiver,
}

/// Words that never parse as bare message names or assignment targets.
/// Without this the message rule, which outranks the method rule, would
/// swallow every `def`.
fn is_reserved(word: &str) -> bool {
    matches!(word, "def" | "end")
}

/// The parser produces a [`Program`] from Beryl source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    cursor: Cursor,
    line_map: LineMap,
    depth: u32,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given source. The source is trimmed and a
    /// final newline appended, so trailing content without an explicit
    /// separator still parses.
    pub fn new(arena: &'a Bump, source: &str) -> Self {
        let trimmed = source.trim();
        let text = if trimmed.is_empty() {
            String::new()
        } else {
            let mut text = String::with_capacity(trimmed.len() + 1);
            text.push_str(trimmed);
            text.push('\n');
            text
        };
        let line_map = LineMap::new(&text);
        Self {
            arena,
            cursor: Cursor::new(text),
            line_map,
            depth: 0,
        }
    }

    /// Parse the whole input into an ordered sequence of top-level
    /// statements, or fail with the first hard error.
    pub fn parse_program(mut self) -> Result<Program<'a>, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.at_end() {
            match self.parse_expr(ExprContext::Free)? {
                Some(node) => statements.push(node),
                None => return Err(self.error(&messages::EXPRESSION_EXPECTED, &[])),
            }
            self.expect_separator()?;
        }
        Ok(Program {
            statements: self.alloc_nodes(statements),
        })
    }

    // ========================================================================
    // Expression rule
    // ========================================================================

    fn parse_expr(&mut self, ctx: ExprContext) -> ParseOutcome<'a> {
        if self.depth >= MAX_EXPR_DEPTH {
            return Err(self.error(&messages::NESTING_TOO_DEEP, &[]));
        }
        self.depth += 1;
        let result = self.parse_expr_alternatives(ctx);
        self.depth -= 1;
        result
    }

    /// The alternatives in grammar priority order; the first rule that
    /// produces a node wins and later rules are never consulted. This
    /// ordering is part of the grammar's semantics.
    fn parse_expr_alternatives(&mut self, ctx: ExprContext) -> ParseOutcome<'a> {
        if let Some(node) = self.parse_assignment(ctx)? {
            return Ok(Some(node));
        }
        if let Some(node) = self.parse_message(ctx)? {
            return Ok(Some(node));
        }
        if let Some(node) = self.parse_number() {
            return Ok(Some(node));
        }
        if let Some(node) = self.parse_string() {
            return Ok(Some(node));
        }
        if let Some(node) = self.parse_method_def()? {
            return Ok(Some(node));
        }
        Ok(None)
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    /// Cheap prefix test: a lowercase-initial name, optional whitespace,
    /// then `=`. The `=` must not begin `==`, `=~`, or `=>`, so an operator
    /// send is never misread as an assignment.
    fn assignment_ahead(&self) -> bool {
        let rest = self.cursor.rest();
        match rest.chars().next() {
            Some(c) if c.is_ascii_lowercase() => {}
            _ => return false,
        }
        let after_name = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_');
        let mut tail = after_name.trim_start_matches(is_space).chars();
        matches!(tail.next(), Some('=')) && !matches!(tail.next(), Some('=' | '~' | '>'))
    }

    fn parse_assignment(&mut self, ctx: ExprContext) -> ParseOutcome<'a> {
        if !self.assignment_ahead() {
            return Ok(None);
        }
        let Some(name) = self.scan_name() else {
            return Ok(None);
        };
        self.cursor.eat_while(is_space);
        self.cursor.eat_char('=');
        self.cursor.eat_while(is_space);
        match self.parse_expr(ctx)? {
            Some(value) => Ok(Some(Node::Assign {
                name,
                value: self.arena.alloc(value),
            })),
            None => Err(self.error(&messages::EXPRESSION_EXPECTED, &[])),
        }
    }

    // ========================================================================
    // Message sends
    // ========================================================================

    fn parse_message(&mut self, ctx: ExprContext) -> ParseOutcome<'a> {
        if let Some(node) = self.parse_explicit_send(ctx)? {
            return Ok(Some(node));
        }
        self.parse_implicit_send()
    }

    /// An expression optionally followed by an operator or dotted message.
    /// A standalone receiver with no trailing message is returned unchanged,
    /// not wrapped.
    fn parse_explicit_send(&mut self, ctx: ExprContext) -> ParseOutcome<'a> {
        let mark = self.cursor.save();
        // Inside a receiver parse the grammar narrows the receiver class,
        // so "the receiver of the receiver" cannot recurse forever.
        let receiver = match ctx {
            ExprContext::Receiver => match self.parse_implicit_send()? {
                Some(node) => Some(node),
                None => self.parse_string().or_else(|| self.parse_number()),
            },
            ExprContext::Free => self.parse_expr(ExprContext::Receiver)?,
        };
        let Some(receiver) = receiver else {
            self.cursor.restore(mark);
            return Ok(None);
        };

        // (a) an optional dot, then an operator token
        let tail = self.cursor.save();
        self.cursor.eat_while(is_space);
        self.cursor.eat_char('.');
        self.cursor.eat_while(is_space);
        if let Some(op) = operators::scan_operator(&mut self.cursor) {
            let args = match self.parse_paren_args()? {
                Some(args) => args,
                None => self.parse_bare_args()?.ok_or_else(|| {
                    self.error(&messages::EXPRESSION_EXPECTED_AFTER_OPERATOR, &[op])
                })?,
            };
            return Ok(Some(self.make_send(receiver, op, args)));
        }
        self.cursor.restore(tail);

        // (b) a dot, then an identifier message
        let tail = self.cursor.save();
        self.cursor.eat_while(is_space);
        if self.cursor.eat_char('.') {
            self.cursor.eat_while(is_space);
            let message = self
                .scan_identifier()
                .ok_or_else(|| self.error(&messages::MESSAGE_EXPECTED_AFTER_DOT, &[]))?;
            let args = match self.parse_paren_args()? {
                Some(args) => args,
                None => self.parse_bare_args()?.unwrap_or_default(),
            };
            return Ok(Some(self.make_send(receiver, message, args)));
        }
        self.cursor.restore(tail);

        // (c) no trailing message: the receiver stands alone
        Ok(Some(receiver))
    }

    /// A bare identifier call whose receiver is the implicit self.
    fn parse_implicit_send(&mut self) -> ParseOutcome<'a> {
        let mark = self.cursor.save();
        let Some(id) = self.scan_identifier() else {
            return Ok(None);
        };
        if is_reserved(id) {
            self.cursor.restore(mark);
            return Ok(None);
        }
        let args = match self.parse_paren_args()? {
            Some(args) => args,
            None => self.parse_bare_args()?.unwrap_or_default(),
        };
        Ok(Some(Node::Send {
            receiver: Receiver::Implicit,
            message: id,
            args: self.alloc_nodes(args),
        }))
    }

    fn make_send(&self, receiver: Node<'a>, message: &'a str, args: Vec<Node<'a>>) -> Node<'a> {
        Node::Send {
            receiver: Receiver::Expr(self.arena.alloc(receiver)),
            message,
            args: self.alloc_nodes(args),
        }
    }

    // ========================================================================
    // Argument lists
    // ========================================================================

    /// `(expr, expr, …)`. Once the `(` is consumed the shape is committed:
    /// a missing expression or a missing `)` is fatal.
    fn parse_paren_args(&mut self) -> Result<Option<Vec<Node<'a>>>, ParseError> {
        let mark = self.cursor.save();
        self.cursor.eat_while(is_hspace);
        if !self.cursor.eat_char('(') {
            self.cursor.restore(mark);
            return Ok(None);
        }
        self.cursor.eat_while(is_space);
        let first = match self.parse_expr(ExprContext::Free)? {
            Some(node) => node,
            None => return Err(self.error(&messages::ARGUMENT_EXPRESSION_EXPECTED, &[])),
        };
        let mut args = vec![first];
        loop {
            let before_comma = self.cursor.save();
            self.cursor.eat_while(is_hspace);
            if !self.cursor.eat_char(',') {
                self.cursor.restore(before_comma);
                break;
            }
            self.cursor.eat_while(is_space);
            match self.parse_expr(ExprContext::Free)? {
                Some(node) => args.push(node),
                None => return Err(self.error(&messages::ARGUMENT_EXPRESSION_EXPECTED, &[])),
            }
        }
        self.cursor.eat_while(is_space);
        if !self.cursor.eat_char(')') {
            return Err(self.error(&messages::CLOSE_PAREN_EXPECTED, &[]));
        }
        Ok(Some(args))
    }

    /// A whitespace-led list with no terminator: `expr, expr, …`. The list
    /// ends wherever the next expression fails to match; a comma whose
    /// following expression fails is backtracked and left unconsumed.
    fn parse_bare_args(&mut self) -> Result<Option<Vec<Node<'a>>>, ParseError> {
        let mark = self.cursor.save();
        if self.cursor.eat_while(is_hspace).is_empty() {
            return Ok(None);
        }
        let first = match self.parse_expr(ExprContext::Free)? {
            Some(node) => node,
            None => {
                self.cursor.restore(mark);
                return Ok(None);
            }
        };
        let mut args = vec![first];
        loop {
            let before_comma = self.cursor.save();
            self.cursor.eat_while(is_hspace);
            if !self.cursor.eat_char(',') {
                self.cursor.restore(before_comma);
                break;
            }
            self.cursor.eat_while(is_space);
            match self.parse_expr(ExprContext::Free)? {
                Some(node) => args.push(node),
                None => {
                    self.cursor.restore(before_comma);
                    break;
                }
            }
        }
        Ok(Some(args))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn parse_number(&mut self) -> Option<Node<'a>> {
        let digits = self.cursor.eat_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return None;
        }
        Some(Node::Number {
            literal: self.arena.alloc_str(digits),
        })
    }

    /// A single- or double-quoted run with no escape handling. The interior
    /// may span lines. An unterminated quote is a soft failure.
    fn parse_string(&mut self) -> Option<Node<'a>> {
        let quote = match self.cursor.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return None,
        };
        let mark = self.cursor.save();
        self.cursor.eat_char(quote);
        let start = self.cursor.pos();
        self.cursor.skip_while(|c| c != quote);
        let end = self.cursor.pos();
        if !self.cursor.eat_char(quote) {
            self.cursor.restore(mark);
            return None;
        }
        let value = self.cursor.slice(start, end);
        Some(Node::StringLit {
            value: self.arena.alloc_str(value),
        })
    }

    // ========================================================================
    // Method definition
    // ========================================================================

    fn parse_method_def(&mut self) -> ParseOutcome<'a> {
        // `def` must be bounded by whitespace to be the keyword
        let is_def = matches!(
            self.cursor
                .rest()
                .strip_prefix("def")
                .and_then(|after| after.chars().next()),
            Some(c) if is_space(c)
        );
        if !is_def {
            return Ok(None);
        }
        self.cursor.eat_str("def");
        self.cursor.eat_while(is_space);
        let name = self
            .scan_identifier()
            .ok_or_else(|| self.error(&messages::METHOD_NAME_EXPECTED, &[]))?;
        self.skip_separators();

        let mut body = Vec::new();
        while !self.at_def_terminator() {
            if self.cursor.at_end() {
                return Err(self.error(&messages::END_EXPECTED, &[]));
            }
            match self.parse_expr(ExprContext::Free)? {
                Some(node) => body.push(node),
                // No forward progress is possible from here; bail out
                // instead of spinning on the same position.
                None => return Err(self.error(&messages::EXPRESSION_EXPECTED, &[])),
            }
            self.expect_separator()?;
        }
        self.cursor.eat_while(is_space);
        self.cursor.eat_str("end");
        Ok(Some(Node::Def {
            name,
            params: &[],
            body: self.alloc_nodes(body),
        }))
    }

    /// True if the lookahead sees `end` bounded by whitespace, `;`, or the
    /// end of input. Consumes nothing.
    fn at_def_terminator(&self) -> bool {
        let rest = self.cursor.rest().trim_start_matches(is_space);
        match rest.strip_prefix("end") {
            Some(after) => match after.chars().next() {
                Some(c) => is_space(c) || c == ';',
                None => true,
            },
            None => false,
        }
    }

    // ========================================================================
    // Separators and identifiers
    // ========================================================================

    /// Demand a statement separator: one or more `;` or newline characters.
    /// Horizontal whitespace may surround the run, but whitespace alone
    /// never separates statements.
    fn expect_separator(&mut self) -> Result<(), ParseError> {
        let mark = self.cursor.save();
        self.cursor.eat_while(is_hspace);
        if !matches!(self.cursor.peek(), Some(';' | '\n')) {
            let err = self.error(&messages::SEPARATOR_EXPECTED, &[]);
            self.cursor.restore(mark);
            return Err(err);
        }
        self.cursor.eat_while(|c| c == ';' || c == '\n' || is_hspace(c));
        Ok(())
    }

    /// Skip any run of statement separators.
    fn skip_separators(&mut self) {
        self.cursor
            .eat_while(|c| c == ';' || c == '\n' || is_hspace(c));
    }

    /// An identifier: a letter, then letters, digits, or `_`, then at most
    /// one trailing `!`, `?`, or `=`.
    fn scan_identifier(&mut self) -> Option<&'a str> {
        let start = self.cursor.pos();
        self.cursor.eat_if(|c| c.is_ascii_alphabetic())?;
        self.cursor
            .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let _ = self.cursor.eat_if(|c| matches!(c, '!' | '?' | '='));
        let text = self.cursor.slice(start, self.cursor.pos());
        Some(self.arena.alloc_str(text))
    }

    /// An assignment target: like an identifier but lowercase-initial and
    /// without the trailing sigil, which would swallow the `=`.
    fn scan_name(&mut self) -> Option<&'a str> {
        let start = self.cursor.pos();
        self.cursor.eat_if(|c| c.is_ascii_lowercase())?;
        self.cursor
            .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.cursor.slice(start, self.cursor.pos());
        Some(self.arena.alloc_str(text))
    }

    // ========================================================================
    // Support
    // ========================================================================

    fn alloc_nodes(&self, nodes: Vec<Node<'a>>) -> &'a [Node<'a>] {
        if nodes.is_empty() {
            &[]
        } else {
            self.arena.alloc_slice_fill_iter(nodes)
        }
    }

    fn error(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        let pos = self.cursor.pos() as TextPos;
        let context = self.cursor.rest().lines().next().unwrap_or("");
        ParseError::at(message, args, TextSpan::empty(pos), &self.line_map, context)
    }
}
