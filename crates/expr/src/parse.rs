use crate::{
    BinaryOp, Function, Node, ParseError,
    lex::{Token, TokenKind, tokenize},
};

/// Depth limit for the syntax tree: parentheses, signs, exponents, and
/// chained binary operators all count.
const MAX_DEPTH: usize = 256;

/// Which identifiers a parse may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbols<'a> {
    /// No identifiers at all: literals, operators, and parentheses only.
    Arithmetic,
    /// One free variable, plus the named constants and functions.
    Formula { variable: &'a str },
}

/// Recursive-descent parser over a token list.
pub(crate) struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token<'a>>,
    next: usize,
    depth: usize,
    symbols: Symbols<'a>,
}

impl<'a> Parser<'a> {
    /// Tokenizes `src` and prepares a parser for it.
    pub(crate) fn new(src: &'a str, symbols: Symbols<'a>) -> Result<Self, ParseError> {
        Ok(Self {
            src,
            tokens: tokenize(src)?,
            next: 0,
            depth: 0,
            symbols,
        })
    }

    /// Parses the whole input as a single expression.
    pub(crate) fn parse(mut self) -> Result<Node, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let node = self.expr()?;

        match self.peek() {
            None => Ok(node),
            Some(token) => Err(unexpected(token)),
        }
    }

    /// Each operator in a chain deepens the left-leaning tree by one level,
    /// so it is charged against the depth budget like a nested group.
    fn expr(&mut self) -> Result<Node, ParseError> {
        let depth = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let depth = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        self.descend()?;

        let node = match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.advance();
                Node::Neg(Box::new(self.unary()?))
            }
            Some(TokenKind::Plus) => {
                self.advance();
                self.unary()?
            }
            _ => self.power()?,
        };

        self.depth -= 1;
        Ok(node)
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if self.peek_kind() == Some(TokenKind::Caret) {
            self.advance();
            let exponent = self.unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEnd)?;

        match token.kind {
            TokenKind::Number(value) => Ok(Node::Number(value)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect_close()?;
                Ok(inner)
            }
            TokenKind::Ident(name) if self.peek_kind() == Some(TokenKind::LParen) => {
                let function = self.function(name, token.pos)?;
                self.advance();
                let arg = self.expr()?;
                self.expect_close()?;
                Ok(Node::Call {
                    function,
                    arg: Box::new(arg),
                })
            }
            TokenKind::Ident(name) => self.symbol(name, token.pos),
            _ => Err(unexpected(token)),
        }
    }

    fn function(&self, name: &str, pos: usize) -> Result<Function, ParseError> {
        let unknown = || ParseError::UnknownFunction {
            name: name.to_owned(),
            pos,
        };
        match self.symbols {
            Symbols::Arithmetic => Err(unknown()),
            Symbols::Formula { .. } => Function::from_name(name).ok_or_else(unknown),
        }
    }

    fn symbol(&self, name: &str, pos: usize) -> Result<Node, ParseError> {
        if let Symbols::Formula { variable } = self.symbols {
            if name == variable {
                return Ok(Node::Variable);
            }
            match name {
                "pi" => return Ok(Node::Number(std::f64::consts::PI)),
                "e" => return Ok(Node::Number(std::f64::consts::E)),
                _ => {}
            }
        }
        Err(ParseError::UnknownSymbol {
            name: name.to_owned(),
            pos,
        })
    }

    fn expect_close(&mut self) -> Result<(), ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(()),
            Some(token) => Err(unexpected(token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Enters one more level of the tree.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                pos: self.offset(),
            });
        }
        Ok(())
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.next).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind<'a>> {
        self.peek().map(|token| token.kind)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.next += 1;
        Some(token)
    }

    /// Byte offset of the next token, or the end of input.
    fn offset(&self) -> usize {
        self.peek().map_or(self.src.len(), |token| token.pos)
    }
}

fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Node {
    Node::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn unexpected(token: Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.text.to_owned(),
        pos: token.pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Node, ParseError> {
        Parser::new(src, Symbols::Formula { variable: "x" })?.parse()
    }

    fn num(value: f64) -> Box<Node> {
        Box::new(Node::Number(value))
    }

    #[test]
    fn respects_precedence() {
        let node = parse("1 + 2 * x").expect("should parse");
        assert_eq!(
            node,
            Node::Binary {
                op: BinaryOp::Add,
                lhs: num(1.0),
                rhs: Box::new(Node::Binary {
                    op: BinaryOp::Mul,
                    lhs: num(2.0),
                    rhs: Box::new(Node::Variable),
                }),
            }
        );
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_negation() {
        let node = parse("-2^3^2").expect("should parse");
        assert_eq!(
            node,
            Node::Neg(Box::new(Node::Binary {
                op: BinaryOp::Pow,
                lhs: num(2.0),
                rhs: Box::new(Node::Binary {
                    op: BinaryOp::Pow,
                    lhs: num(3.0),
                    rhs: num(2.0),
                }),
            }))
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        let node = parse("5 - 3 - 1").expect("should parse");
        let Node::Binary { op, lhs, rhs } = node else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(*rhs, Node::Number(1.0));
        assert!(matches!(*lhs, Node::Binary { op: BinaryOp::Sub, .. }));
    }

    #[test]
    fn resolves_constants_and_functions() {
        assert_eq!(parse("pi").unwrap(), Node::Number(std::f64::consts::PI));
        assert_eq!(
            parse("cos(x)").unwrap(),
            Node::Call {
                function: Function::Cos,
                arg: Box::new(Node::Variable),
            }
        );
    }

    #[test]
    fn variable_shadows_constants() {
        let node = Parser::new("e + 1", Symbols::Formula { variable: "e" })
            .and_then(Parser::parse)
            .expect("should parse");
        assert!(node.has_variable());
    }

    #[test]
    fn rejects_doubled_operator() {
        assert_eq!(
            parse("x^^2"),
            Err(ParseError::UnexpectedToken {
                found: "^".into(),
                pos: 2,
            })
        );
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert_eq!(
            parse("x 2"),
            Err(ParseError::UnexpectedToken {
                found: "2".into(),
                pos: 2,
            })
        );
        assert_eq!(
            parse("(x))"),
            Err(ParseError::UnexpectedToken {
                found: ")".into(),
                pos: 3,
            })
        );
    }

    #[test]
    fn rejects_incomplete_input() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("x +"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse("sin(x"), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            parse("y + 1"),
            Err(ParseError::UnknownSymbol {
                name: "y".into(),
                pos: 0,
            })
        );
        assert_eq!(
            parse("1 + foo(x)"),
            Err(ParseError::UnknownFunction {
                name: "foo".into(),
                pos: 4,
            })
        );
        assert!(matches!(parse("sin"), Err(ParseError::UnknownSymbol { .. })));
    }

    #[test]
    fn limits_nesting() {
        let deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(matches!(parse(&deep), Err(ParseError::TooDeep { .. })));

        let fine = format!("{}x{}", "(".repeat(32), ")".repeat(32));
        assert_eq!(parse(&fine), Ok(Node::Variable));
    }

    #[test]
    fn limits_operator_chains() {
        let long_sum = vec!["x"; 100_000].join(" + ");
        assert!(matches!(parse(&long_sum), Err(ParseError::TooDeep { .. })));

        let long_product = vec!["x"; 100_000].join(" * ");
        assert!(matches!(parse(&long_product), Err(ParseError::TooDeep { .. })));

        let short_sum = vec!["x"; 100].join(" + ");
        assert!(parse(&short_sum).unwrap().has_variable());
    }

    #[test]
    fn depth_is_restored_after_a_chain() {
        // Sibling groups each use the budget afresh.
        let group = format!("({})", vec!["x"; 100].join(" + "));
        let formula = vec![group.as_str(); 10].join(" * ");
        assert!(parse(&formula).is_ok());
    }
}
