// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The top-level driver (C7, §4.8): dispatches on the head of the token
//! stream to recognise `-spec` forms, module attributes, functions,
//! top-level bracket terms, and comments, threading the previous-term tag
//! of §3.5 to decide blank-line separation between them.

use crate::doc::Doc;
use crate::expr::{clause_body, expr, EndTag};
use crate::list::list_group;
use crate::scanner::{get_until, remove_matching};
use crate::token::{PunctKind, Token};
use crate::INDENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrevTerm {
    NewFile,
    Attribute,
    Spec,
    List,
    Function,
    Comment,
}

/// Compile an entire token stream (one source file) into a single `Doc`.
pub fn compile_file(tokens: &[Token]) -> Doc {
    let mut acc = Doc::nil();
    let mut prev = PrevTerm::NewFile;
    let mut cur = tokens;

    while !cur.is_empty() {
        let (tag, doc, rest) = compile_top_level_form(cur);
        acc = Doc::cons(acc, Doc::cons(separator(prev, tag), doc));
        prev = tag;
        cur = rest;
    }

    acc
}

/// Blank-line policy between top-level forms (§4.8, §3.5). Every separator
/// doubles as a literal newline in flat mode too, since `newline_break`'s
/// and `blank_break`'s flat payloads already are the newline characters we
/// want unconditionally between structural top-level forms.
fn separator(prev: PrevTerm, this: PrevTerm) -> Doc {
    if prev == PrevTerm::NewFile {
        return Doc::nil();
    }
    match this {
        PrevTerm::Comment => {
            if prev == PrevTerm::Comment {
                Doc::newline_break()
            } else {
                Doc::blank_break()
            }
        }
        PrevTerm::Function => {
            if matches!(prev, PrevTerm::Spec | PrevTerm::Comment) {
                Doc::newline_break()
            } else {
                Doc::blank_break()
            }
        }
        _ => Doc::blank_break(),
    }
}

fn starts_call(tokens: &[Token]) -> bool {
    matches!(tokens, [Token::Atom { .. }, Token::Punct { kind, .. }, ..] if kind.is_open())
}

fn compile_top_level_form(tokens: &[Token]) -> (PrevTerm, Doc, Vec<Token>) {
    if let Token::Comment { body, .. } = &tokens[0] {
        let doc = Doc::force_break(true, Doc::text(body.clone()));
        return (PrevTerm::Comment, doc, tokens[1..].to_vec());
    }

    if tokens[0].is_punct(PunctKind::Minus) {
        if let [_, Token::Atom { name, .. }, Token::Punct { kind, .. }, ..] = tokens {
            if name == "spec" && kind.is_open() {
                return compile_spec(tokens);
            }
        }
        if let [_, Token::Atom { name, .. }, ..] = tokens {
            return compile_attribute(name, &tokens[2..]);
        }
    }

    if starts_call(tokens) {
        return compile_function(tokens);
    }

    if let Token::Punct { kind, .. } = &tokens[0] {
        if kind.is_open() {
            let (_, _, doc, rest) = expr(tokens);
            return (PrevTerm::List, doc, rest);
        }
    }

    // Defensive fallback: an unrecognised head would otherwise stall the
    // driver forever. Emit one expression's worth of tokens literally and
    // keep going, rather than panicking on malformed input (§7 leaves this
    // case to the lexer/expression matcher, not a user-facing error).
    let (_, _, doc, rest) = expr(tokens);
    (PrevTerm::List, doc, rest)
}

/// `-spec name(Args) -> Type.` — strip the wrapping parens and compile the
/// remainder as a function-style head+body, per §4.8.
fn compile_spec(tokens: &[Token]) -> (PrevTerm, Doc, Vec<Token>) {
    let Token::Punct { kind: open, .. } = tokens[2] else {
        unreachable!("compile_spec called without a verified opening bracket")
    };
    let close = open.matching_close().expect("is_open implies a closer");
    let stripped = remove_matching(open, close, &tokens[2..]);
    let (clauses, rest) = compile_clauses(&stripped);
    let doc = Doc::cons(Doc::text("-spec "), clauses);
    (PrevTerm::Spec, doc, rest)
}

/// `-Att Expr.` — a module attribute: the attribute name glued directly to
/// `-`, followed by whatever expression (typically a bracket group) and
/// terminator follow.
fn compile_attribute(name: &str, rest: &[Token]) -> (PrevTerm, Doc, Vec<Token>) {
    let (_, _, expr_doc, rest) = expr(rest);
    let doc = Doc::cons(Doc::text(format!("-{name}")), expr_doc);
    (PrevTerm::Attribute, doc, rest)
}

/// `atom(Args) -> Body` repeated, `;`-separated, `.`-terminated.
fn compile_function(tokens: &[Token]) -> (PrevTerm, Doc, Vec<Token>) {
    let (doc, rest) = compile_clauses(tokens);
    (PrevTerm::Function, doc, rest)
}

/// Shared by `-spec` and plain functions: one or more `Name(Args) -> Body`
/// clauses, separated by a single hard newline, continuing while the
/// clause's terminator is `;` and stopping at `.`.
fn compile_clauses(tokens: &[Token]) -> (Doc, Vec<Token>) {
    let mut clauses = Vec::new();
    let mut cur = tokens;
    loop {
        let (clause_doc, tag, rest) = compile_clause(cur);
        clauses.push(clause_doc);
        cur = rest;
        if !matches!(tag, EndTag::Semi) || cur.is_empty() {
            break;
        }
    }
    (Doc::newline_all(clauses), cur.to_vec())
}

/// One `Name(Args) -> Body` clause. The body is nested at `INDENT` beneath
/// a `space` break from the head, and the whole clause is force-broken
/// whenever its body is (a multi-expression body, or one containing a
/// hoisted comment) so the arrow and body move onto separate lines
/// together rather than splitting mid-body.
fn compile_clause(tokens: &[Token]) -> (Doc, EndTag, Vec<Token>) {
    let Token::Atom { name, .. } = &tokens[0] else {
        // Defensive: malformed clause head. Emit what we can and bail out
        // of the function rather than looping.
        let (_, _, doc, rest) = expr(tokens);
        return (doc, EndTag::Dot, rest);
    };
    let Token::Punct { kind: open, .. } = tokens[1] else {
        let (_, _, doc, rest) = expr(tokens);
        return (doc, EndTag::Dot, rest);
    };
    let close = open.matching_close().expect("is_open implies a closer");
    let (inside, after, _end) = get_until(open, close, &tokens[2..]);
    let (args_doc, fb_args) = list_group(open, &inside);

    let after_arrow: &[Token] = match after.first() {
        Some(t) if t.is_punct(PunctKind::Arrow) => &after[1..],
        _ => &after,
    };
    let (body_doc, fb_body, tag, rest) = clause_body(after_arrow);

    let head = Doc::cons(Doc::cons(Doc::text(name.clone()), args_doc), Doc::text(" ->"));
    let inner = Doc::nest(INDENT, Doc::space(head, body_doc));
    let clause = Doc::group(Doc::force_break(fb_args || fb_body, inner));

    (clause, tag, rest)
}
