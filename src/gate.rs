// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The safety gate (C8, §4.9): parse the original, format it, reparse the
//! result, and refuse to hand back output whose AST differs from the
//! original's under the caller's equivalence relation. Formatting a program
//! is presumed to have corrupted it until this check proves otherwise (§7).

use crate::error::{FormatError, ParseError};
use crate::lexer::Lexer;
use crate::parser::{self, AstNode};
use crate::structural::compile_file;
use crate::token::Token;
use crate::MAX_WIDTH;

/// The pluggable bundle of lexer + parser + AST-equivalence the gate
/// depends on (§6.3, §6.4). Callers with their own frontend can implement
/// this instead of using [`ReferenceFrontend`].
pub trait Frontend {
    fn lex(&self, src: &[u8]) -> Result<Vec<Token>, crate::error::LexError>;
    fn parse(&self, tokens: &[Token]) -> Result<Vec<AstNode>, ParseError>;
    fn ast_eq(&self, a: &[AstNode], b: &[AstNode]) -> bool;
}

/// This crate's own bundled lexer + structural parser (C9/C10), sufficient
/// to drive the gate in the CLI and test suite.
pub struct ReferenceFrontend;

impl Frontend for ReferenceFrontend {
    fn lex(&self, src: &[u8]) -> Result<Vec<Token>, crate::error::LexError> {
        Lexer::lex(src)
    }

    fn parse(&self, tokens: &[Token]) -> Result<Vec<AstNode>, ParseError> {
        parser::parse(tokens)
    }

    fn ast_eq(&self, a: &[AstNode], b: &[AstNode]) -> bool {
        parser::ast_eq(a, b)
    }
}

/// `format_code(bytes) -> ok(bytes) | err(reason)` (§6.1), using the
/// bundled [`ReferenceFrontend`] and the default width.
pub fn format_code(bytes: &[u8], frontend: &dyn Frontend) -> Result<Vec<u8>, FormatError> {
    format_code_labeled(bytes, "<input>", frontend)
}

/// `format_code(bytes, path_tag) -> ok(bytes) | err(reason)` (§6.1):
/// annotates any error with `path_tag` for off-line diffing.
pub fn format_code_labeled(
    bytes: &[u8],
    path_tag: &str,
    frontend: &dyn Frontend,
) -> Result<Vec<u8>, FormatError> {
    format_code_labeled_with_width(bytes, path_tag, frontend, MAX_WIDTH)
}

/// As [`format_code_labeled`], but with an explicit target width (used by
/// the CLI's `-w`/`--width` flag).
pub fn format_code_labeled_with_width(
    bytes: &[u8],
    path_tag: &str,
    frontend: &dyn Frontend,
    width: i32,
) -> Result<Vec<u8>, FormatError> {
    let tokens_in = frontend.lex(bytes).map_err(|e| FormatError::InputParse {
        path: path_tag.to_string(),
        source: ParseError::Lex(e),
    })?;
    let ast_in = frontend
        .parse(&tokens_in)
        .map_err(|source| FormatError::InputParse { path: path_tag.to_string(), source })?;

    let doc = compile_file(&tokens_in);
    let produced = crate::pretty(doc, width);

    let tokens_out = frontend.lex(&produced).map_err(|e| FormatError::OutputParse {
        path: path_tag.to_string(),
        source: ParseError::Lex(e),
    })?;
    let ast_out = frontend
        .parse(&tokens_out)
        .map_err(|source| FormatError::OutputParse { path: path_tag.to_string(), source })?;

    if !frontend.ast_eq(&ast_in, &ast_out) {
        log::warn!("{path_tag}: formatter output failed the equivalence check, refusing");
        return Err(FormatError::SemanticsChanged {
            path: path_tag.to_string(),
            original_bytes: bytes.to_vec(),
            produced_bytes: produced,
        });
    }

    Ok(produced)
}
