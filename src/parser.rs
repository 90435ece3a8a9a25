// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! A reference structural parser and AST equivalence relation (C10,
//! §4.11): enough of a tree to drive the safety gate (C8), not a full
//! grammar with attribute/spec/function semantics. A bracket token opens a
//! `Group` read recursively to its balanced closer; anything else becomes
//! a `Leaf` holding its canonical text; comments are dropped, since the
//! equivalence this crate's gate needs ignores comment attachment by
//! construction (§6.4).

use crate::error::ParseError;
use crate::token::{PunctKind, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Leaf(String),
    Group(PunctKind, Vec<AstNode>),
}

fn leaf_text(tok: &Token) -> String {
    match tok {
        Token::Atom { name, .. } | Token::Var { name, .. } => name.clone(),
        Token::Integer { value, .. } => value.to_string(),
        Token::Str { value, .. } => value.clone(),
        Token::Punct { kind, .. } => kind.spelling().to_string(),
        Token::Comment { .. } => unreachable!("comments are filtered before reaching leaf_text"),
    }
}

/// Parse a full token stream into a flat top-level sequence of `AstNode`s.
pub fn parse(tokens: &[Token]) -> Result<Vec<AstNode>, ParseError> {
    let mut nodes = Vec::new();
    let mut i = 0usize;
    while i < tokens.len() {
        let (node, next) = parse_one(tokens, i)?;
        nodes.push(node);
        i = next;
    }
    Ok(nodes)
}

fn parse_one(tokens: &[Token], i: usize) -> Result<(AstNode, usize), ParseError> {
    match &tokens[i] {
        Token::Comment { .. } => {
            // Skip it and parse whatever follows; callers never see an
            // `AstNode::Leaf` for a comment.
            if i + 1 >= tokens.len() {
                return Err(ParseError::UnexpectedEof);
            }
            parse_one(tokens, i + 1)
        }
        Token::Punct { kind, line } if kind.is_open() => {
            let close = kind.matching_close().expect("is_open implies a closer");
            let mut children = Vec::new();
            let mut j = i + 1;
            loop {
                if j >= tokens.len() {
                    return Err(ParseError::UnbalancedBracket { line: *line });
                }
                if tokens[j].is_punct(close) {
                    return Ok((AstNode::Group(*kind, children), j + 1));
                }
                let (child, next) = parse_one(tokens, j)?;
                children.push(child);
                j = next;
            }
        }
        other => Ok((AstNode::Leaf(leaf_text(other)), i + 1)),
    }
}

/// Structural equivalence: `Leaf` by string equality, `Group` by bracket
/// kind and recursive element equality. Line numbers and comments are
/// absent from `AstNode` by construction, so this already ignores them.
pub fn ast_eq(a: &[AstNode], b: &[AstNode]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| ast_node_eq(x, y))
}

fn ast_node_eq(a: &AstNode, b: &AstNode) -> bool {
    match (a, b) {
        (AstNode::Leaf(x), AstNode::Leaf(y)) => x == y,
        (AstNode::Group(kx, cx), AstNode::Group(ky, cy)) => kx == ky && ast_eq(cx, cy),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::PunctKind::*;

    fn atom(name: &str, line: usize) -> Token {
        Token::Atom { line, name: name.into() }
    }
    fn punct(kind: PunctKind, line: usize) -> Token {
        Token::Punct { kind, line }
    }
    fn comment(body: &str, line: usize) -> Token {
        Token::Comment { line, body: body.into() }
    }

    #[test]
    fn parses_nested_bracket_groups() {
        let toks = vec![
            atom("foo", 1),
            punct(LParen, 1),
            atom("x", 1),
            punct(Comma, 1),
            atom("y", 1),
            punct(RParen, 1),
            punct(Dot, 1),
        ];
        let nodes = parse(&toks).unwrap();
        assert_eq!(
            nodes,
            vec![
                AstNode::Leaf("foo".into()),
                AstNode::Group(
                    LParen,
                    vec![AstNode::Leaf("x".into()), AstNode::Leaf(",".into()), AstNode::Leaf("y".into())],
                ),
                AstNode::Leaf(".".into()),
            ]
        );
    }

    #[test]
    fn unbalanced_bracket_is_an_error() {
        let toks = vec![atom("foo", 1), punct(LParen, 1), atom("x", 1)];
        assert_eq!(parse(&toks).unwrap_err(), ParseError::UnbalancedBracket { line: 1 });
    }

    #[test]
    fn equivalence_ignores_comments_and_line_numbers() {
        let a = vec![atom("foo", 1), punct(Dot, 1)];
        let b = vec![comment("% hi", 1), atom("foo", 9), punct(Dot, 9)];
        let ast_a = parse(&a).unwrap();
        let ast_b = parse(&b).unwrap();
        assert!(ast_eq(&ast_a, &ast_b));
    }

    #[test]
    fn equivalence_distinguishes_other_content() {
        let a = vec![atom("foo", 1), punct(Dot, 1)];
        let b = vec![atom("bar", 1), punct(Dot, 1)];
        let ast_a = parse(&a).unwrap();
        let ast_b = parse(&b).unwrap();
        assert!(!ast_eq(&ast_a, &ast_b));
    }
}
