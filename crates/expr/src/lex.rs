use crate::ParseError;

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TokenKind<'a> {
    Number(f64),
    Ident(&'a str),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub text: &'a str,
    pub pos: usize,
}

/// Splits a formula into tokens.
///
/// `**` is folded into [`TokenKind::Caret`]. Literals that do not parse to a
/// finite `f64` (including ones that overflow, like `1e400`) are rejected.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let byte = bytes[pos];

        let kind = match byte {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 1;
                TokenKind::Caret
            }
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                let text = &src[start..pos];
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ParseError::InvalidNumber {
                        text: text.to_owned(),
                        pos: start,
                    })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    text,
                    pos: start,
                });
                continue;
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                let text = &src[start..pos];
                tokens.push(Token {
                    kind: TokenKind::Ident(text),
                    text,
                    pos: start,
                });
                continue;
            }
            _ => {
                let ch = src[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::UnexpectedChar { ch, pos: start });
            }
        };

        pos += 1;
        tokens.push(Token {
            kind,
            text: &src[start..pos],
            pos: start,
        });
    }

    Ok(tokens)
}

/// Returns the end offset of the numeric literal starting at `pos`.
///
/// The scan is greedy and permissive; validation happens when the text is
/// parsed as `f64`.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        if end < bytes.len() && bytes[end].is_ascii_digit() {
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            pos = end;
        }
    }

    pos
}
