// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The expression compiler (C6, §4.6): maps one expression's worth of
//! tokens to a `Doc`, recognizing operator, function-call, equation,
//! binary-match, arity, macro, and pipe rules in a fixed precedence order.

use crate::doc::Doc;
use crate::list::list_group;
use crate::scanner::get_end_of_expr;
use crate::token::{PunctKind, Token};
use crate::INDENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTag {
    Dot,
    Semi,
    Comma,
    Comment,
    Empty,
}

fn terminator_tag(tok: &Token) -> EndTag {
    match tok {
        Token::Punct { kind: PunctKind::Dot, .. } => EndTag::Dot,
        Token::Punct { kind: PunctKind::Semi, .. } => EndTag::Semi,
        Token::Punct { kind: PunctKind::Comma, .. } => EndTag::Comma,
        _ => unreachable!("terminator_tag called on a non-terminator token"),
    }
}

fn is_binop_kind(kind: PunctKind) -> bool {
    matches!(
        kind,
        PunctKind::Plus | PunctKind::Minus | PunctKind::Star | PunctKind::Slash | PunctKind::Div
    )
}

fn requote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Compile one expression's *body* (no trailing terminator) to a `Doc`,
/// dispatching on the forms of §4.6 in the documented order. Returns the
/// compiled `Doc` and whether a descendant forced a break.
fn compile_body(body: &[Token]) -> (Doc, bool) {
    if body.is_empty() {
        return (Doc::nil(), false);
    }

    // 1. `?` then sub-expression — macro invocation.
    if body[0].is_punct(PunctKind::Question) {
        let (rest_doc, fb) = compile_body(&body[1..]);
        return (Doc::cons(Doc::text("?"), rest_doc), fb);
    }

    // 2. `atom '(' …` on the same line — function call.
    if let [Token::Atom { name, line }, Token::Punct { kind, line: line2 }, rest @ ..] = body {
        if kind.is_open() && line2 == line {
            return compile_call(name, *kind, rest);
        }
    }

    // 3. Any opening bracket — delegate to bracket group.
    if let Token::Punct { kind, .. } = &body[0] {
        if kind.is_open() {
            let close = kind.matching_close().expect("is_open implies a closer");
            let (inside, after, _end) = crate::scanner::get_until(*kind, close, &body[1..]);
            let (group_doc, fb_group) = list_group(*kind, &inside);
            if after.is_empty() {
                return (group_doc, fb_group);
            }
            let (rest_doc, fb_rest) = compile_body(&after);
            return (Doc::space(group_doc, rest_doc), fb_group || fb_rest);
        }
    }

    // 4. `var '=' …` — equation.
    if let [Token::Var { name, .. }, Token::Punct { kind: PunctKind::Eq, .. }, rest @ ..] = body {
        let lhs = Doc::group(Doc::space(Doc::text(name.clone()), Doc::text("=")));
        let (rhs_doc, fb) = compile_body(rest);
        let rhs = Doc::group(rhs_doc);
        let doc = Doc::group(Doc::nest(INDENT, Doc::space(lhs, rhs)));
        return (doc, fb);
    }

    // 5. `atom '/' integer` — arity reference.
    if let [Token::Atom { name, .. }, Token::Punct { kind: PunctKind::Slash, .. }, Token::Integer { value, .. }] =
        body
    {
        let d = Doc::cons(
            Doc::cons(Doc::text(name.clone()), Doc::text("/")),
            Doc::text(value.to_string()),
        );
        return (d, false);
    }

    // 6. `var '/' atom` — bit-string type tag (e.g. `X/binary`).
    if let [Token::Var { name, .. }, Token::Punct { kind: PunctKind::Slash, .. }, Token::Atom { name: ty, .. }] =
        body
    {
        let d = Doc::cons(
            Doc::cons(Doc::text(name.clone()), Doc::text("/")),
            Doc::text(ty.clone()),
        );
        return (d, false);
    }

    // 7. `var ':' integer '/' atom` — sized bit-string tag (e.g. `X:8/integer`).
    if let [Token::Var { name, .. }, Token::Punct { kind: PunctKind::Colon, .. }, Token::Integer { value, .. }, Token::Punct { kind: PunctKind::Slash, .. }, Token::Atom { name: ty, .. }] =
        body
    {
        let d = Doc::text(format!("{}:{}/{}", name, value, ty));
        return (d, false);
    }

    // 8. `var op` / `integer op` where `op` is a binary operator.
    //
    // Checked after 6/7 so the fixed bit-string shapes win first; longer or
    // more general bit-string tag lists fall through to this generic
    // operator path rather than being silently misread, per the documented
    // open question in §9 (resolved in DESIGN.md).
    if let [first @ (Token::Var { .. } | Token::Integer { .. }), Token::Punct { kind, .. }, rest @ ..] =
        body
    {
        if is_binop_kind(*kind) {
            let lhs = terminal_text(first);
            let (rhs_doc, fb) = compile_body(rest);
            let joined = Doc::space(Doc::text(kind.spelling()), rhs_doc);
            let d = Doc::space(Doc::text(lhs), joined);
            return (d, fb);
        }
    }

    // 9. `|` — alternative separator: hanging-pipe continuation.
    if body[0].is_punct(PunctKind::Pipe) {
        let (rest_doc, fb) = compile_body(&body[1..]);
        let d = Doc::group(Doc::nest(INDENT, Doc::space(Doc::text("|"), rest_doc)));
        return (d, fb);
    }

    // 10. Terminal tokens.
    if body.len() == 1 {
        if let Some(text) = terminal_text_opt(&body[0]) {
            return (Doc::text(text), false);
        }
    }

    // Defensive fallback: never silently drop tokens. Emit the head token
    // literally and keep compiling the remainder, space-separated.
    let head_text = terminal_text(&body[0]);
    let (rest_doc, fb) = compile_body(&body[1..]);
    (Doc::space(Doc::text(head_text), rest_doc), fb)
}

fn compile_call(name: &str, open: PunctKind, rest: &[Token]) -> (Doc, bool) {
    let close = open.matching_close().expect("is_open implies a closer");
    let (inside, after, _end) = crate::scanner::get_until(open, close, rest);
    let (args_doc, fb_args) = list_group(open, &inside);
    let call = Doc::cons(Doc::text(name.to_string()), args_doc);
    if after.is_empty() {
        return (call, fb_args);
    }
    let (rest_doc, fb_rest) = compile_body(&after);
    (Doc::space(call, rest_doc), fb_args || fb_rest)
}

fn terminal_text_opt(tok: &Token) -> Option<String> {
    match tok {
        Token::Var { name, .. } | Token::Atom { name, .. } => Some(name.clone()),
        Token::Integer { value, .. } => Some(value.to_string()),
        Token::Str { value, .. } => Some(requote(value)),
        _ => None,
    }
}

fn terminal_text(tok: &Token) -> String {
    terminal_text_opt(tok).unwrap_or_else(|| match tok {
        Token::Punct { kind, .. } => kind.spelling().to_string(),
        Token::Comment { body, .. } => body.clone(),
        _ => unreachable!(),
    })
}

/// `expr(toks, force_break)` (§4.6): compile one expression, bounded by the
/// scanner's terminator/comment rules, returning the tag that ended it, a
/// force-break flag, the compiled `Doc`, and the remaining tokens.
pub fn expr(toks: &[Token]) -> (EndTag, bool, Doc, Vec<Token>) {
    let (slice, rest) = get_end_of_expr(toks);

    if slice.is_empty() {
        return (EndTag::Empty, false, Doc::nil(), rest);
    }

    if slice.len() == 1 && slice[0].is_comment() {
        let Token::Comment { body, .. } = &slice[0] else {
            unreachable!()
        };
        let doc = Doc::force_break(true, Doc::text(body.clone()));
        return (EndTag::Comment, true, doc, rest);
    }

    let mut body: &[Token] = &slice;
    let mut trailing = String::new();
    let mut end_tag = EndTag::Empty;

    if let Some(last) = body.last() {
        if last.is_comment() && body.len() >= 2 && body[body.len() - 2].is_terminator() {
            let Token::Comment { body: comment_body, .. } = last else {
                unreachable!()
            };
            let term = &body[body.len() - 2];
            end_tag = terminator_tag(term);
            trailing = format!("{} {}", terminal_text(term), comment_body);
            body = &body[..body.len() - 2];
        } else if last.is_terminator() {
            end_tag = terminator_tag(last);
            trailing = terminal_text(last);
            body = &body[..body.len() - 1];
        }
    }

    let (mut doc, fb) = compile_body(body);
    if !trailing.is_empty() {
        doc = Doc::cons(doc, Doc::text(trailing));
    }
    (end_tag, fb, doc, rest)
}

/// Shared accumulation loop behind `split_exprs` and `clause_body`: repeatedly
/// call `expr`, continuing while the end tag is `,` or a hoisted comment, and
/// reporting the tag that finally stopped the run.
fn split_exprs_inner(toks: &[Token]) -> (Vec<Doc>, bool, EndTag, Vec<Token>) {
    let mut docs = Vec::new();
    let mut force_break = false;
    let mut cur = toks.to_vec();
    let mut last_tag = EndTag::Empty;

    loop {
        if cur.is_empty() {
            break;
        }
        let (tag, fb, doc, rest) = expr(&cur);
        force_break |= fb;
        docs.push(doc);
        cur = rest;
        last_tag = tag;
        if !matches!(tag, EndTag::Comma | EndTag::Comment) {
            break;
        }
    }

    (docs, force_break, last_tag, cur)
}

/// Repeatedly call `expr`, accumulating while the end tag is `,` or a
/// hoisted comment; stop otherwise. Returns the compiled elements, the
/// OR-combined force-break flag, and whatever tokens remain unconsumed.
pub fn split_exprs(toks: &[Token]) -> (Vec<Doc>, bool, Vec<Token>) {
    let (docs, force_break, _tag, rest) = split_exprs_inner(toks);
    (docs, force_break, rest)
}

/// Compose `exprs` into the clause-body doc (§4.6): more than one element
/// always renders multi-line.
pub fn exprs_to_doc(docs: Vec<Doc>, extra_force: bool) -> (Doc, bool) {
    if docs.is_empty() {
        return (Doc::nil(), false);
    }
    let force = extra_force || docs.len() > 1;
    let joined = Doc::space_all(docs);
    let body = Doc::force_break(force, joined);
    (Doc::group(body), force)
}

/// A function/`-spec` clause's body: the `exprs` of §4.6 composed to a
/// `Doc`, plus the terminator (`;` continues to another clause, `.` ends
/// the function) that the structural compiler needs to know which.
pub fn clause_body(toks: &[Token]) -> (Doc, bool, EndTag, Vec<Token>) {
    let (docs, force_break, tag, rest) = split_exprs_inner(toks);
    let (doc, force) = exprs_to_doc(docs, force_break);
    (doc, force, tag, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::PunctKind::*;

    fn atom(name: &str, line: usize) -> Token {
        Token::Atom { line, name: name.into() }
    }
    fn var(name: &str, line: usize) -> Token {
        Token::Var { line, name: name.into() }
    }
    fn int(value: i64, line: usize) -> Token {
        Token::Integer { line, value }
    }
    fn punct(kind: PunctKind, line: usize) -> Token {
        Token::Punct { kind, line }
    }

    fn render(d: Doc, width: i32) -> String {
        String::from_utf8(crate::pretty(d, width)).unwrap()
    }

    #[test]
    fn binary_operator_joins_with_space_breaks() {
        let toks = vec![var("A", 1), punct(Plus, 1), var("B", 1), punct(Dot, 1)];
        let (tag, _, doc, rest) = expr(&toks);
        assert_eq!(tag, EndTag::Dot);
        assert!(rest.is_empty());
        assert_eq!(render(doc, 80), "A + B.\n");
    }

    #[test]
    fn arity_reference_has_no_spaces() {
        let toks = vec![atom("foo", 1), punct(Slash, 1), int(2, 1), punct(Dot, 1)];
        let (_, _, doc, _) = expr(&toks);
        assert_eq!(render(doc, 80), "foo/2.\n");
    }

    #[test]
    fn bitstring_tag_takes_priority_over_division() {
        let toks = vec![var("X", 1), punct(Slash, 1), atom("binary", 1), punct(Dot, 1)];
        let (_, _, doc, _) = expr(&toks);
        assert_eq!(render(doc, 80), "X/binary.\n");
    }

    #[test]
    fn sized_bitstring_tag() {
        let toks = vec![
            var("X", 1),
            punct(Colon, 1),
            int(8, 1),
            punct(Slash, 1),
            atom("integer", 1),
            punct(Dot, 1),
        ];
        let (_, _, doc, _) = expr(&toks);
        assert_eq!(render(doc, 80), "X:8/integer.\n");
    }

    #[test]
    fn function_call_attaches_name_without_space() {
        let toks = vec![
            atom("foo", 1),
            punct(LParen, 1),
            var("X", 1),
            punct(RParen, 1),
            punct(Dot, 1),
        ];
        let (_, _, doc, _) = expr(&toks);
        assert_eq!(render(doc, 80), "foo(X).\n");
    }

    #[test]
    fn macro_invocation_is_adjacent() {
        let toks = vec![punct(Question, 1), atom("m", 1), punct(Dot, 1)];
        let (_, _, doc, _) = expr(&toks);
        assert_eq!(render(doc, 80), "?m.\n");
    }

    #[test]
    fn multi_expression_clause_is_always_multiline() {
        let toks = vec![
            var("A", 1),
            punct(Comma, 1),
            var("B", 1),
            punct(Dot, 2),
        ];
        let (docs, fb, rest) = split_exprs(&toks);
        assert!(rest.is_empty());
        assert_eq!(docs.len(), 2);
        let (doc, force) = exprs_to_doc(docs, fb);
        assert!(force);
        assert_eq!(render(doc, 100), "A,\nB.\n");
    }
}
