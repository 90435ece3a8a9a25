// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! Bracket groups (§4.7): `list_group`, `list_elements`. Shared by the
//! expression compiler (function-call arguments, bracket literals) and the
//! structural compiler (attribute arguments, top-level configuration terms).

use crate::doc::Doc;
use crate::expr::split_exprs;
use crate::token::{PunctKind, Token};
use crate::INDENT;

/// Split the contents of a balanced bracket pair into its elements, each
/// compiled via the expression compiler (which itself recurses into nested
/// bracket groups via rule 3 of §4.6). Force-break propagates upward: if
/// any element is itself a multi-line construct, so is the caller's group.
pub fn list_elements(inside: &[Token]) -> (Vec<Doc>, bool) {
    let (docs, force_break, _rest) = split_exprs(inside);
    (docs, force_break)
}

/// `list_group(open, inside)` (§4.7): compile the contents of a balanced
/// bracket pair into its bracket-group `Doc`. Empty brackets render as
/// `open ++ close` with no interior whitespace and no break.
pub fn list_group(open: PunctKind, inside: &[Token]) -> (Doc, bool) {
    let close = open.matching_close().expect("list_group needs an opening bracket kind");

    if inside.is_empty() {
        let d = Doc::text(format!("{}{}", open.open_text(), close.spelling()));
        return (d, false);
    }

    let (elements, force_break) = list_elements(inside);
    let joined = Doc::space_all(elements);
    // `stick(nest(INDENT, stick(text(open), space(elements))), text(close))`
    // (§4.7): the opener gets its own break too, so a broken layout puts it
    // alone on its own line — `[\n    a,\n    b,\n...` — with each element
    // indented beneath it and the closer back at the base indent.
    let opened = Doc::stick(Doc::text(open.open_text()), joined);
    let nested = Doc::nest(INDENT, opened);
    let body = Doc::stick(nested, Doc::text(close.spelling()));
    let doc = Doc::group(Doc::force_break(force_break, body));
    (doc, force_break)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::PunctKind::*;
    use crate::token::Token;

    fn atom(name: &str, line: usize) -> Token {
        Token::Atom { line, name: name.into() }
    }
    fn punct(kind: PunctKind, line: usize) -> Token {
        Token::Punct { kind, line }
    }

    fn render(d: Doc, width: i32) -> String {
        String::from_utf8(crate::pretty(d, width)).unwrap()
    }

    #[test]
    fn empty_brackets_have_no_interior_whitespace() {
        for (open, expected) in [
            (LParen, "()"),
            (LBracket, "[]"),
            (LBrace, "{}"),
            (LBitBracket, "<<>>"),
        ] {
            let (d, fb) = list_group(open, &[]);
            assert!(!fb);
            assert_eq!(render(d, 100), format!("{expected}\n"));
        }
    }

    #[test]
    fn list_fits_flat_when_narrow_enough() {
        let toks = vec![
            atom("a", 1),
            punct(Comma, 1),
            atom("b", 1),
            punct(Comma, 1),
            atom("c", 1),
        ];
        let (d, _) = list_group(LBracket, &toks);
        assert_eq!(render(d, 100), "[a, b, c]\n");
    }

    #[test]
    fn list_breaks_one_element_per_line_when_narrow() {
        let toks = vec![
            atom("a", 1),
            punct(Comma, 1),
            atom("b", 1),
            punct(Comma, 1),
            atom("c", 1),
        ];
        let (d, _) = list_group(LBracket, &toks);
        assert_eq!(render(d, 5), "[\n    a,\n    b,\n    c\n]\n");
    }
}
