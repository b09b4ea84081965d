//! Tokenizer for filter fragments
//!
//! Splits a filter string into the minimal token set needed to recognize
//! type constraints. Tokenizing never fails: anything outside the known
//! vocabulary becomes an opaque [`Token::Other`] that the matcher skips.

/// A single token of a filter fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare identifier (`_type`, `in`, field names)
    Ident(String),
    /// Quoted string literal, quotes removed
    Str(String),
    /// Parameter reference, `$` removed
    Param(String),
    /// `==`
    EqEq,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `||`
    OrOr,
    /// Any character the grammar does not care about
    Other(char),
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Tokenize a filter fragment
///
/// Quoted strings support both `'` and `"` delimiters and backslash
/// escapes. An unterminated string consumes the rest of the input rather
/// than failing, matching the best-effort contract of the inference layer.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '\'' | '"' => {
                let quote = c;
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => {
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        Some(ch) if ch == quote => break,
                        Some(ch) => value.push(ch),
                        None => break,
                    }
                }
                tokens.push(Token::Str(value));
            }
            '$' => {
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if is_ident_continue(ch) {
                        name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    tokens.push(Token::Other('$'));
                } else {
                    tokens.push(Token::Param(name));
                }
            }
            '=' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::EqEq);
                } else {
                    tokens.push(Token::Other('='));
                }
            }
            '|' => {
                if chars.peek() == Some(&'|') {
                    chars.next();
                    tokens.push(Token::OrOr);
                } else {
                    tokens.push(Token::Other('|'));
                }
            }
            '[' => tokens.push(Token::LBracket),
            ']' => tokens.push(Token::RBracket),
            ',' => tokens.push(Token::Comma),
            c if is_ident_start(c) => {
                let mut ident = String::new();
                ident.push(c);
                while let Some(&ch) = chars.peek() {
                    if is_ident_continue(ch) {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => tokens.push(Token::Other(other)),
        }
    }

    tokens
}
