//! AST visitor trait for traversing the syntax tree.
//!
//! Default implementations walk into children, so an implementor only
//! overrides the node kinds it cares about. Nodes are `Copy` views into the
//! arena, so the visitor passes them by value.

use crate::node::{Node, Program, Receiver};

/// A visitor that traverses the AST in source order.
pub trait AstVisitor<'a> {
    fn visit_program(&mut self, program: &Program<'a>) {
        for node in program.statements {
            self.visit_node(node);
        }
    }

    fn visit_node(&mut self, node: &Node<'a>) {
        match *node {
            Node::Number { literal } => self.visit_number(literal),
            Node::StringLit { value } => self.visit_string(value),
            Node::Assign { name, value } => self.visit_assign(name, value),
            Node::Send {
                receiver,
                message,
                args,
            } => self.visit_send(receiver, message, args),
            Node::Def { name, params, body } => self.visit_def(name, params, body),
        }
    }

    fn visit_number(&mut self, _literal: &'a str) {}

    fn visit_string(&mut self, _value: &'a str) {}

    fn visit_assign(&mut self, _name: &'a str, value: &'a Node<'a>) {
        self.visit_node(value);
    }

    fn visit_send(&mut self, receiver: Receiver<'a>, _message: &'a str, args: &'a [Node<'a>]) {
        if let Receiver::Expr(expr) = receiver {
            self.visit_node(expr);
        }
        for arg in args {
            self.visit_node(arg);
        }
    }

    fn visit_def(&mut self, _name: &'a str, _params: &'a [&'a str], body: &'a [Node<'a>]) {
        for node in body {
            self.visit_node(node);
        }
    }
}
