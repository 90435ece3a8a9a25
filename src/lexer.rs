// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! A reference lexer (C9, §4.10): a single left-to-right scan over UTF-8
//! source bytes producing exactly the token shapes §3.1 expects. Grounded
//! in the hand-rolled, line-tracking scan style of `why_lib`'s lexer
//! module (explicit cursor, explicit line counter, character-class
//! dispatch) rather than a regex- or derive-macro-driven table, since this
//! grammar's token set is small enough that a direct match reads clearer.

use crate::error::LexError;
use crate::token::{PunctKind, Token};

pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Lexer { src, pos: 0, line: 1 }
    }

    /// Lex `src` to completion. Logs the resulting token count at `debug`
    /// level (§4.13: the lexer is the one place in this crate allowed to
    /// log, since the core itself is pure).
    pub fn lex(src: &[u8]) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(src);
        let tokens = lexer.run()?;
        log::debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn run(&mut self) -> Result<Vec<Token>, LexError> {
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'%' => out.push(self.lex_comment()),
                b'"' => out.push(self.lex_string()?),
                b'<' => out.push(self.lex_angle(PunctKind::LBitBracket, b'<')?),
                b'>' => out.push(self.lex_angle(PunctKind::RBitBracket, b'>')?),
                b'(' => out.push(self.single(PunctKind::LParen)),
                b')' => out.push(self.single(PunctKind::RParen)),
                b'{' => out.push(self.single(PunctKind::LBrace)),
                b'}' => out.push(self.single(PunctKind::RBrace)),
                b'[' => out.push(self.single(PunctKind::LBracket)),
                b']' => out.push(self.single(PunctKind::RBracket)),
                b',' => out.push(self.single(PunctKind::Comma)),
                b';' => out.push(self.single(PunctKind::Semi)),
                b'.' => out.push(self.single(PunctKind::Dot)),
                b'=' => out.push(self.single(PunctKind::Eq)),
                b':' => out.push(self.single(PunctKind::Colon)),
                b'|' => out.push(self.single(PunctKind::Pipe)),
                b'?' => out.push(self.single(PunctKind::Question)),
                b'+' => out.push(self.single(PunctKind::Plus)),
                b'*' => out.push(self.single(PunctKind::Star)),
                b'/' => out.push(self.single(PunctKind::Slash)),
                b'-' => out.push(self.lex_minus()),
                b'0'..=b'9' => out.push(self.lex_integer()),
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => out.push(self.lex_ident()),
                other => {
                    let line = self.line;
                    self.bump();
                    return Err(LexError::InvalidByte { line, byte: other });
                }
            }
        }
        Ok(out)
    }

    fn single(&mut self, kind: PunctKind) -> Token {
        let line = self.line;
        self.bump();
        Token::Punct { kind, line }
    }

    /// `->` vs. a lone `-`: this grammar uses `-` both for the attribute
    /// prefix (`-module`) and for binary subtraction, so a lone `-` is an
    /// ordinary `Minus` punct rather than rejected.
    fn lex_minus(&mut self) -> Token {
        let line = self.line;
        self.bump();
        if self.peek() == Some(b'>') {
            self.bump();
            Token::Punct { kind: PunctKind::Arrow, line }
        } else {
            Token::Punct { kind: PunctKind::Minus, line }
        }
    }

    fn lex_angle(&mut self, kind: PunctKind, expect: u8) -> Result<Token, LexError> {
        let line = self.line;
        self.bump();
        if self.peek() == Some(expect) {
            self.bump();
            Ok(Token::Punct { kind, line })
        } else {
            Err(LexError::UnterminatedBitBracket { line })
        }
    }

    fn lex_comment(&mut self) -> Token {
        let line = self.line;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump();
        }
        let body = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        Token::Comment { line, body }
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedString { line }),
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(b'\\') => {
                    self.bump();
                    match self.peek() {
                        Some(b'"') => {
                            value.push('"');
                            self.bump();
                        }
                        Some(b'\\') => {
                            value.push('\\');
                            self.bump();
                        }
                        Some(_) => value.push(self.read_utf8_char(line)?),
                        None => return Err(LexError::UnterminatedString { line }),
                    }
                }
                Some(_) => value.push(self.read_utf8_char(line)?),
            }
        }
        Ok(Token::Str { line, value })
    }

    /// Decode one full UTF-8 scalar value starting at the cursor, advancing
    /// past all of its bytes. `byte as char` truncation on a multi-byte
    /// sequence would silently mis-split non-ASCII string contents, so this
    /// decodes the run `std::str::from_utf8` accepts instead of one byte at
    /// a time.
    fn read_utf8_char(&mut self, line: usize) -> Result<char, LexError> {
        let rest = &self.src[self.pos..];
        let valid = match std::str::from_utf8(rest) {
            Ok(s) => s,
            Err(e) if e.valid_up_to() > 0 => {
                std::str::from_utf8(&rest[..e.valid_up_to()]).unwrap()
            }
            Err(_) => {
                let byte = rest[0];
                self.bump();
                return Err(LexError::InvalidByte { line, byte });
            }
        };
        let ch = valid.chars().next().expect("non-empty valid UTF-8 prefix");
        for _ in 0..ch.len_utf8() {
            self.bump();
        }
        Ok(ch)
    }

    fn lex_integer(&mut self) -> Token {
        let line = self.line;
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.bump();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("0");
        let value = text.parse::<i64>().unwrap_or(0);
        Token::Integer { line, value }
    }

    fn lex_ident(&mut self) -> Token {
        let line = self.line;
        let start = self.pos;
        while matches!(self.peek(), Some(b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_')) {
            self.bump();
        }
        let name = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("").to_string();
        if name == "div" {
            return Token::Punct { kind: PunctKind::Div, line };
        }
        let leading = self.src[start];
        if leading == b'_' || leading.is_ascii_uppercase() {
            Token::Var { line, name }
        } else {
            Token::Atom { line, name }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        Lexer::lex(src.as_bytes()).unwrap()
    }

    #[test]
    fn lexes_module_attribute() {
        let toks = lex("-module(x).");
        assert_eq!(
            toks,
            vec![
                Token::Punct { kind: PunctKind::Minus, line: 1 },
                Token::Atom { line: 1, name: "module".into() },
                Token::Punct { kind: PunctKind::LParen, line: 1 },
                Token::Atom { line: 1, name: "x".into() },
                Token::Punct { kind: PunctKind::RParen, line: 1 },
                Token::Punct { kind: PunctKind::Dot, line: 1 },
            ]
        );
    }

    #[test]
    fn distinguishes_atom_and_var_by_leading_case() {
        let toks = lex("foo Bar _baz");
        assert!(matches!(&toks[0], Token::Atom { name, .. } if name == "foo"));
        assert!(matches!(&toks[1], Token::Var { name, .. } if name == "Bar"));
        assert!(matches!(&toks[2], Token::Var { name, .. } if name == "_baz"));
    }

    #[test]
    fn tracks_line_numbers_across_newlines() {
        let toks = lex("a.\nb.\n");
        assert_eq!(toks[0].line(), 1);
        assert_eq!(toks[2].line(), 2);
    }

    #[test]
    fn string_literal_recognizes_escapes() {
        let toks = lex(r#""a\"b\\c""#);
        assert_eq!(toks.len(), 1);
        assert!(matches!(&toks[0], Token::Str { value, .. } if value == "a\"b\\c"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::lex(b"\"abc").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { line: 1 });
    }

    #[test]
    fn string_literal_preserves_non_ascii_utf8_content() {
        let toks = lex("\"héllo wörld\"");
        assert_eq!(toks.len(), 1);
        assert!(matches!(&toks[0], Token::Str { value, .. } if value == "héllo wörld"));
    }

    #[test]
    fn bit_string_brackets_and_div_keyword() {
        let toks = lex("<<X/binary>> div 2");
        assert!(matches!(&toks[0], Token::Punct { kind: PunctKind::LBitBracket, .. }));
        assert!(toks.iter().any(|t| matches!(t, Token::Punct { kind: PunctKind::Div, .. })));
    }
}
