//! The expression loop and every production spec.md §4.2 names.

use super::dispatch::{Left, Null, left_denotation, null_denotation};
use super::Parser;
use crate::diagnostics::Span;
use crate::syntax::ast::Node;
use crate::syntax::precedence::{Precedence, precedence_of, rhs_precedence_for_infix};
use crate::syntax::token_type::TokenType;

impl Parser {
    /// ```text
    /// parse_expression(min_prec):
    ///   skip newlines
    ///   left := null_denotation(current)(...)        -- or SyntaxError
    ///   if left is Identifier and current is not EOL/EOF and precedence(current) == LOWEST:
    ///       left := parse_call_expression_without_parens(left)
    ///   while current is valid and min_prec < precedence(current):
    ///       left := left_denotation(current)(left, ...)
    ///   return left
    /// ```
    /// (spec.md §4.2, "Expression loop")
    pub fn parse_expression(&mut self, min_prec: Precedence) -> Node {
        self.skip_newlines();

        let Some(null) = null_denotation(self.current_type()) else {
            return self.raise_unexpected("expression");
        };
        let mut left = self.parse_null(null);

        if !self.errors.is_empty() {
            return left;
        }

        // The identifier-LOWEST rule: implements paren-less method calls
        // (`puts 1, 2`) at statement position.
        if left.is_identifier()
            && !self.current().is_eol()
            && !self.current().is_eof()
            && precedence_of(&self.current_type()) == Precedence::Lowest
        {
            left = self.parse_call_expression_without_parens(left);
        }

        while self.current().is_valid() && min_prec < precedence_of(&self.current_type()) {
            if !self.errors.is_empty() {
                break;
            }
            let Some(op) = left_denotation(self.current_type()) else {
                break;
            };
            left = self.parse_left(op, left);
        }

        left
    }

    fn parse_null(&mut self, null: Null) -> Node {
        match null {
            Null::True => self.parse_bool_literal(true),
            Null::False => self.parse_bool_literal(false),
            Null::Nil => self.parse_nil_literal(),
            Null::Integer => self.parse_integer_literal(),
            Null::Float => self.parse_float_literal(),
            Null::String => self.parse_string_literal(),
            Null::Identifier => self.parse_identifier(),
            Null::Group => self.parse_group(),
            Null::Def => self.parse_def(),
            Null::If => self.parse_if(),
            Null::NegativeNumber => self.parse_negative_literal(),
        }
    }

    fn parse_left(&mut self, left: Left, lhs: Node) -> Node {
        match left {
            Left::Infix => self.parse_infix(lhs),
            Left::Assign => self.parse_assignment(lhs),
            Left::CallWithParens => self.parse_call_expression_with_parens(lhs),
            Left::Send => self.parse_send(lhs),
            Left::Ternary => self.parse_ternary(lhs),
        }
    }

    fn parse_bool_literal(&mut self, value: bool) -> Node {
        let tok = self.advance();
        if value {
            Node::True { span: tok.span() }
        } else {
            Node::False { span: tok.span() }
        }
    }

    fn parse_nil_literal(&mut self) -> Node {
        let tok = self.advance();
        Node::Nil { span: tok.span() }
    }

    fn parse_integer_literal(&mut self) -> Node {
        let tok = self.advance();
        let value = tok.literal.as_str().parse().unwrap_or(0);
        Node::IntegerLiteral { value, span: tok.span() }
    }

    fn parse_float_literal(&mut self) -> Node {
        let tok = self.advance();
        let value = tok.literal.as_str().parse().unwrap_or(0.0);
        Node::FloatLiteral { value, span: tok.span() }
    }

    /// "consume `-`; the next token must be an Int or Float literal; negate
    /// its value." A `Minus` in null-denotation position has nothing to its
    /// left to subtract from, so it can only be a sign on the numeric
    /// literal that follows — this is the only unary use of `-` the grammar
    /// admits (there is no general unary-minus over arbitrary expressions).
    fn parse_negative_literal(&mut self) -> Node {
        let minus = self.advance(); // -
        match self.current_type() {
            TokenType::Int => {
                let tok = self.advance();
                let magnitude: i64 = tok.literal.as_str().parse().unwrap_or(0);
                Node::IntegerLiteral {
                    value: -magnitude,
                    span: Span::new(minus.position, tok.end_position),
                }
            }
            TokenType::Float => {
                let tok = self.advance();
                let magnitude: f64 = tok.literal.as_str().parse().unwrap_or(0.0);
                Node::FloatLiteral {
                    value: -magnitude,
                    span: Span::new(minus.position, tok.end_position),
                }
            }
            _ => self.raise_unexpected("numeric literal"),
        }
    }

    fn parse_string_literal(&mut self) -> Node {
        let tok = self.advance();
        Node::StringLiteral {
            value: tok.literal.as_str().to_string(),
            span: tok.span(),
        }
    }

    /// All four identifier "kinds" (local, constant, global, instance-var,
    /// class-var) share the Identifier node shape (I6); `is_local` is the
    /// sole distinction a local read carries. A symbol is a local read
    /// only for the plain lowercase `Ident` kind — sigils (`@`, `@@`,
    /// `$`) and constants are never locals.
    fn parse_identifier(&mut self) -> Node {
        let tok = self.advance();
        let symbol = tok.symbol.expect("identifier-family tokens always intern a symbol");
        let is_local = tok.token_type == TokenType::Ident && self.locals.is_local(symbol);
        Node::Identifier {
            name: symbol,
            is_local,
            span: tok.span(),
        }
    }

    /// "consume `(`, parse an expression at `LOWEST`, require `)`."
    fn parse_group(&mut self) -> Node {
        self.advance(); // (
        let exp = self.parse_expression(Precedence::Lowest);
        self.expect(TokenType::RParen, ")");
        exp
    }

    /// "consume `def`; create a fresh locals scope; parse method name as
    /// an identifier; parameters either in parentheses or bare
    /// identifiers separated by commas; body via `parse_body`."
    fn parse_def(&mut self) -> Node {
        let start = self.advance().position; // `def`
        self.locals.push_scope();

        let name_tok = self.advance();
        let name = name_tok
            .symbol
            .unwrap_or_else(|| self.interner.intern(name_tok.literal.as_str()));

        let mut params = Vec::new();
        let has_parens = self.current_type() == TokenType::LParen;
        if has_parens {
            self.advance();
        }
        if self.current_type() == TokenType::Ident {
            params.push(self.parse_param());
            while self.current_type() == TokenType::Comma {
                self.advance();
                params.push(self.parse_param());
            }
        }
        if has_parens {
            self.expect(TokenType::RParen, ")");
        }

        let body = self.parse_body();
        let end = self.current().end_position;
        self.locals.pop_scope();

        Node::Def {
            name,
            params,
            body: Box::new(body),
            span: Span::new(start, end),
        }
    }

    fn parse_param(&mut self) -> crate::syntax::interner::Symbol {
        let tok = self.advance();
        let symbol = tok
            .symbol
            .unwrap_or_else(|| self.interner.intern(tok.literal.as_str()));
        self.locals.declare(symbol);
        symbol
    }

    /// "accepts expressions until `end`."
    fn parse_body(&mut self) -> Node {
        let start = self.current().position;
        self.skip_newlines();
        let mut statements = Vec::new();
        while !self.current().is_eof()
            && self.current_type() != TokenType::EndKeyword
            && self.errors.is_empty()
        {
            let exp = self.parse_expression(Precedence::Lowest);
            statements.push(exp);
            if self.errors.is_empty() {
                self.next_expression();
            }
        }
        if self.current_type() != TokenType::EndKeyword {
            self.raise_unexpected("end");
        } else {
            self.advance();
        }
        let end = self.current().position;
        Node::Block {
            statements,
            span: Span::new(start, end),
        }
    }

    fn parse_if(&mut self) -> Node {
        let start = self.advance().position; // `if`
        let condition = self.parse_expression(Precedence::Lowest);
        if self.current_type() == TokenType::Then {
            self.advance();
        } else {
            self.next_expression();
        }

        let then_start = self.current().position;
        let mut then_statements = Vec::new();
        while !self.current().is_eof()
            && !matches!(self.current_type(), TokenType::Else | TokenType::EndKeyword)
            && self.errors.is_empty()
        {
            then_statements.push(self.parse_expression(Precedence::Lowest));
            if self.errors.is_empty() {
                self.next_expression();
            }
        }
        let then_branch = Node::Block {
            statements: then_statements,
            span: Span::new(then_start, self.current().position),
        };

        let else_branch = if self.current_type() == TokenType::Else {
            self.advance();
            let else_start = self.current().position;
            self.skip_newlines();
            let mut else_statements = Vec::new();
            while !self.current().is_eof() && self.current_type() != TokenType::EndKeyword && self.errors.is_empty() {
                else_statements.push(self.parse_expression(Precedence::Lowest));
                if self.errors.is_empty() {
                    self.next_expression();
                }
            }
            Some(Box::new(Node::Block {
                statements: else_statements,
                span: Span::new(else_start, self.current().position),
            }))
        } else {
            None
        };

        let end = self.current().position;
        if self.current_type() != TokenType::EndKeyword {
            self.raise_unexpected("end");
        } else {
            self.advance();
        }

        Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
            span: Span::new(start, end),
        }
    }

    /// "if the left-hand identifier is of local kind, push its symbol
    /// onto the current locals stack *before* parsing the right-hand side
    /// (so `x = x + 1` rebinds correctly); parse RHS at `ASSIGNMENT`."
    fn parse_assignment(&mut self, target: Node) -> Node {
        self.advance(); // =
        if let Node::Identifier { name, .. } = &target {
            self.locals.declare(*name);
        }
        let value = self.parse_expression(Precedence::Assignment);
        let span = Span::new(target.span().start, value.span().end);
        Node::Assignment {
            target: Box::new(target),
            value: Box::new(value),
            span,
        }
    }

    /// "if LHS is an Identifier, synthesize a Call with a `nil` receiver;
    /// if LHS is already a Call (chained), reuse it; consume arguments
    /// separated by commas; require `)`."
    fn parse_call_expression_with_parens(&mut self, lhs: Node) -> Node {
        self.advance(); // (
        let mut args = Vec::new();
        if self.current_type() != TokenType::RParen {
            args.push(self.parse_expression(Precedence::Lowest));
            while self.current_type() == TokenType::Comma {
                self.advance();
                args.push(self.parse_expression(Precedence::Lowest));
            }
        }
        let end = self.current().end_position;
        self.expect(TokenType::RParen, ")");

        match lhs {
            Node::Identifier { name, span, .. } => Node::Call {
                receiver: None,
                method_name: name,
                args,
                span: Span::new(span.start, end),
            },
            Node::Call {
                receiver,
                method_name,
                span,
                ..
            } => Node::Call {
                receiver,
                method_name,
                args,
                span: Span::new(span.start, end),
            },
            other => other,
        }
    }

    /// "same receiver rule; arguments are parsed greedily at `LOWEST`
    /// until EOL/EOF or non-comma."
    fn parse_call_expression_without_parens(&mut self, lhs: Node) -> Node {
        let method_name = match &lhs {
            Node::Identifier { name, .. } => *name,
            _ => return lhs,
        };
        let start = lhs.span().start;

        let mut args = vec![self.parse_expression(Precedence::Lowest)];
        while self.current_type() == TokenType::Comma {
            self.advance();
            args.push(self.parse_expression(Precedence::Lowest));
        }
        let end = self.current().position;

        Node::Call {
            receiver: None,
            method_name,
            args,
            span: Span::new(start, end),
        }
    }

    /// "consume `.`; next must be Identifier; form Call with the left
    /// expression as receiver; try a paren-less argument list."
    fn parse_send(&mut self, lhs: Node) -> Node {
        self.advance(); // .
        let name_tok = self.advance();
        let method_name = name_tok
            .symbol
            .unwrap_or_else(|| self.interner.intern(name_tok.literal.as_str()));
        let start = lhs.span().start;
        let end = name_tok.end_position;

        let call = Node::Call {
            receiver: Some(Box::new(lhs)),
            method_name,
            args: Vec::new(),
            span: Span::new(start, end),
        };

        if self.current_type() == TokenType::LParen {
            return self.parse_call_expression_with_parens(call);
        }
        call
    }

    /// "consume `?`, parse true branch at `TERNARY`, consume `:`, parse
    /// false branch at `TERNARY`."
    fn parse_ternary(&mut self, condition: Node) -> Node {
        self.advance(); // ?
        let if_true = self.parse_expression(Precedence::Ternary);
        self.expect(TokenType::TernaryColon, ":");
        let if_false = self.parse_expression(Precedence::Ternary);
        let span = Span::new(condition.span().start, if_false.span().end);
        Node::Ternary {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
            span,
        }
    }

    /// "capture operator, capture its precedence, consume, recurse at the
    /// captured precedence, wrap as `Call(receiver=left, method=op_name,
    /// args=[right])`."
    ///
    /// This is why `x -1` parses as subtraction regardless of whether `x`
    /// is a local (spec.md §8 scenario 6): once `x` has already produced a
    /// `left`, the following `Minus` is reached through left-denotation
    /// (this production), never null-denotation, so `-1` is never read as
    /// a signed literal here — the RHS recurse bottoms out at a plain
    /// `Int` token. A `Minus` only reads as a sign when it is the first
    /// token of its (sub)expression; see [`Self::parse_negative_literal`].
    fn parse_infix(&mut self, left: Node) -> Node {
        let op_tok = self.advance();
        let op_name = self.interner.intern(op_tok.literal.as_str());
        let rhs_prec = rhs_precedence_for_infix(&op_tok.token_type);
        let right = self.parse_expression(rhs_prec);
        let span = Span::new(left.span().start, right.span().end);
        Node::Call {
            receiver: Some(Box::new(left)),
            method_name: op_name,
            args: vec![right],
            span,
        }
    }
}
