// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The structured error hierarchy (§7, §3.7-3.9 expansion): a `LexError`
//! from the reference lexer, a `ParseError` from the reference parser, the
//! safety gate's `FormatError`, and the CLI's own `CliError` wrapping all
//! three plus I/O.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },
    #[error("line {line}: unterminated bit-string bracket")]
    UnterminatedBitBracket { line: usize },
    #[error("line {line}: unrecognized byte {byte:#04x}")]
    InvalidByte { line: usize, byte: u8 },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("unbalanced bracket opened on line {line}")]
    UnbalancedBracket { line: usize },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Raised by the safety gate (C8) when formatting is refused. Carries both
/// byte sequences so a caller can diff them off-line.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{path}: failed to parse original input: {source}")]
    InputParse {
        path: String,
        #[source]
        source: ParseError,
    },
    #[error("{path}: formatter produced output that failed to parse: {source}")]
    OutputParse {
        path: String,
        #[source]
        source: ParseError,
    },
    #[error("{path}: formatter changed the meaning of the program")]
    SemanticsChanged {
        path: String,
        original_bytes: Vec<u8>,
        produced_bytes: Vec<u8>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Format(#[from] FormatError),
    #[error("{path}: not valid UTF-8")]
    NotUtf8 { path: String },
}
