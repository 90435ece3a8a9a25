// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! Bracket-balanced token scanning helpers (C5, §4.5).

use crate::token::{PunctKind, Token};

/// `get_until(Start, End, toks)`: `toks` is positioned just past the
/// opening delimiter. Returns `(inside, after, end_tok)`, where `inside`
/// excludes the matched closer. Nested `Start`/`End` pairs of the *same*
/// kind are balanced by a counter; any other token (including other
/// bracket kinds) passes through untouched, since a different bracket kind
/// can never collide with this pair's counter.
pub fn get_until(open: PunctKind, close: PunctKind, toks: &[Token]) -> (Vec<Token>, Vec<Token>, Option<Token>) {
    let mut depth = 0i32;
    for (i, tok) in toks.iter().enumerate() {
        if tok.is_punct(open) {
            depth += 1;
        } else if tok.is_punct(close) {
            if depth == 0 {
                let inside = toks[..i].to_vec();
                let after = toks[i + 1..].to_vec();
                return (inside, after, Some(tok.clone()));
            }
            depth -= 1;
        }
    }
    (toks.to_vec(), Vec::new(), None)
}

/// Length, in tokens, of the balanced bracket span starting at `toks[0]`
/// (which must be an opener), including both delimiters.
fn bracket_span_len(toks: &[Token]) -> usize {
    let Token::Punct { kind: open, .. } = toks[0] else {
        return 1;
    };
    let Some(close) = open.matching_close() else {
        return 1;
    };
    let (inside, _, end_tok) = get_until(open, close, &toks[1..]);
    match end_tok {
        Some(_) => inside.len() + 2,
        // Unbalanced input: treat the rest of the stream as the span so
        // callers make forward progress instead of looping.
        None => toks.len(),
    }
}

/// `remove_matching(Start, End, toks)`: drop the first balanced
/// `Start...End` pair (both delimiters), keeping its contents in place.
/// Used to strip the parentheses wrapping a `-spec` expression.
pub fn remove_matching(open: PunctKind, close: PunctKind, toks: &[Token]) -> Vec<Token> {
    let Some(start_idx) = toks.iter().position(|t| t.is_punct(open)) else {
        return toks.to_vec();
    };
    let (inside, after, end_tok) = get_until(open, close, &toks[start_idx + 1..]);
    let mut out = toks[..start_idx].to_vec();
    out.extend(inside);
    if end_tok.is_none() {
        // Unbalanced: nothing more to append, `inside` already holds the
        // remainder of the stream.
        return out;
    }
    out.extend(after);
    out
}

/// `get_end_of_expr(toks)`: cut at the first top-level `,` `;` `.`,
/// treating any bracket span as an atomic skip, and hoisting comments per
/// the inline-comment rule (§4.5, the subtlest rule in the scanner).
pub fn get_end_of_expr(toks: &[Token]) -> (Vec<Token>, Vec<Token>) {
    if let Some(first) = toks.first() {
        if first.is_comment() {
            return (vec![first.clone()], toks[1..].to_vec());
        }
    }

    let mut expr: Vec<Token> = Vec::new();
    let mut i = 0usize;
    while i < toks.len() {
        let tok = &toks[i];

        if tok.is_comment() {
            let prev_line = expr.last().map(|t| t.line());
            if prev_line == Some(tok.line()) {
                // Inline comment: emit it alone, pushing the expression
                // accumulated so far back in front of the remaining tokens.
                let mut rest = expr;
                rest.extend(toks[i + 1..].iter().cloned());
                return (vec![tok.clone()], rest);
            }
            // A comment on a later line terminates the expression without
            // consuming the comment.
            return (expr, toks[i..].to_vec());
        }

        if let Token::Punct { kind, .. } = tok {
            if kind.is_open() {
                let span = bracket_span_len(&toks[i..]);
                expr.extend(toks[i..i + span].iter().cloned());
                i += span;
                continue;
            }
        }

        if tok.is_terminator() {
            expr.push(tok.clone());
            // A terminator followed on the same line by a comment keeps
            // both on the terminator's line.
            if let Some(next) = toks.get(i + 1) {
                if next.is_comment() && next.line() == tok.line() {
                    expr.push(next.clone());
                    return (expr, toks[i + 2..].to_vec());
                }
            }
            return (expr, toks[i + 1..].to_vec());
        }

        expr.push(tok.clone());
        i += 1;
    }

    (expr, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::PunctKind::*;

    fn atom(name: &str, line: usize) -> Token {
        Token::Atom { line, name: name.into() }
    }
    fn punct(kind: crate::token::PunctKind, line: usize) -> Token {
        Token::Punct { kind, line }
    }
    fn comment(body: &str, line: usize) -> Token {
        Token::Comment { line, body: body.into() }
    }

    #[test]
    fn get_until_balances_nested_pairs() {
        let toks = vec![
            atom("a", 1),
            punct(LParen, 1),
            atom("b", 1),
            punct(RParen, 1),
            atom("c", 1),
            punct(RParen, 1),
            atom("tail", 2),
        ];
        let (inside, after, end) = get_until(LParen, RParen, &toks);
        assert_eq!(inside.len(), 5);
        assert!(end.is_some());
        assert_eq!(after, vec![atom("tail", 2)]);
    }

    #[test]
    fn get_end_of_expr_stops_at_top_level_terminator() {
        let toks = vec![atom("a", 1), punct(Comma, 1), atom("b", 1), punct(Dot, 1)];
        let (expr, rest) = get_end_of_expr(&toks);
        assert_eq!(expr, vec![atom("a", 1), punct(Comma, 1)]);
        assert_eq!(rest, vec![atom("b", 1), punct(Dot, 1)]);
    }

    #[test]
    fn get_end_of_expr_skips_bracket_span_atomically() {
        let toks = vec![
            atom("f", 1),
            punct(LParen, 1),
            atom("x", 1),
            punct(Comma, 1),
            atom("y", 1),
            punct(RParen, 1),
            punct(Dot, 1),
        ];
        let (expr, rest) = get_end_of_expr(&toks);
        assert_eq!(expr.len(), 7);
        assert!(rest.is_empty());
    }

    #[test]
    fn inline_comment_is_hoisted_before_the_expression() {
        let toks = vec![atom("a", 1), comment("% note", 1), punct(Dot, 2)];
        let (expr, rest) = get_end_of_expr(&toks);
        assert_eq!(expr, vec![comment("% note", 1)]);
        assert_eq!(rest, vec![atom("a", 1), punct(Dot, 2)]);
    }

    #[test]
    fn later_line_comment_terminates_without_consuming() {
        let toks = vec![atom("a", 1), comment("% note", 2), punct(Dot, 3)];
        let (expr, rest) = get_end_of_expr(&toks);
        assert_eq!(expr, vec![atom("a", 1)]);
        assert_eq!(rest, vec![comment("% note", 2), punct(Dot, 3)]);
    }

    #[test]
    fn terminator_keeps_same_line_comment() {
        let toks = vec![atom("a", 1), punct(Comma, 1), comment("% c", 1), atom("b", 2)];
        let (expr, rest) = get_end_of_expr(&toks);
        assert_eq!(expr, vec![atom("a", 1), punct(Comma, 1), comment("% c", 1)]);
        assert_eq!(rest, vec![atom("b", 2)]);
    }

    #[test]
    fn remove_matching_strips_first_balanced_pair() {
        let toks = vec![
            punct(LParen, 1),
            atom("x", 1),
            punct(Comma, 1),
            atom("y", 1),
            punct(RParen, 1),
            punct(Dot, 1),
        ];
        let stripped = remove_matching(LParen, RParen, &toks);
        assert_eq!(
            stripped,
            vec![atom("x", 1), punct(Comma, 1), atom("y", 1), punct(Dot, 1)]
        );
    }
}
