// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The layout-primitive tree (C1): a tiny algebra of documents that the
//! layout engine (`engine`) reduces to a string under a width target.
//!
//! This is Lindig's "Strictly Pretty" formulation rather than Wadler's: a
//! `Group` is a single decision point that the layout engine commits to
//! flat or broken by consulting the fit oracle, and `ForceBreak` is an
//! explicit primitive that compels its content into break mode regardless
//! of that decision.

use std::rc::Rc;

use once_cell::unsync::Lazy;

/// A two-newline `break` payload is a blank-line separator rather than an
/// ordinary line break; the layout engine special-cases it (see `engine`).
pub(crate) const BLANK_LINE_SENTINEL: &str = "\n\n";

#[derive(Clone)]
pub struct Doc(pub(crate) Rc<DocData>);

pub(crate) enum DocData {
    Nil,
    Text(Rc<str>),
    Cons(Doc, Doc),
    Nest(i32, Doc),
    Break(Rc<str>),
    Group(Doc, GroupKind),
    ForceBreak(Doc),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum GroupKind {
    SelfDeciding,
    Inherit,
}

thread_local! {
    static NIL: Lazy<Rc<DocData>> = Lazy::new(|| Rc::new(DocData::Nil));
    static SPACE_BREAK: Lazy<Rc<DocData>> = Lazy::new(|| Rc::new(DocData::Break(Rc::from(" "))));
    static NEWLINE_BREAK: Lazy<Rc<DocData>> = Lazy::new(|| Rc::new(DocData::Break(Rc::from("\n"))));
    static BLANK_BREAK: Lazy<Rc<DocData>> =
        Lazy::new(|| Rc::new(DocData::Break(Rc::from(BLANK_LINE_SENTINEL))));
    static STICK_BREAK: Lazy<Rc<DocData>> = Lazy::new(|| Rc::new(DocData::Break(Rc::from(""))));
}

impl Doc {
    // ---------------------------------------------------------------
    // Core constructors (§4.1)
    // ---------------------------------------------------------------

    /// The empty document; identity element for `cons`.
    pub fn nil() -> Doc {
        NIL.with(|d| Doc(Rc::clone(&d)))
    }

    /// Concatenation. Collapses `cons(nil, x)` and `cons(x, nil)` to `x`.
    pub fn cons(a: Doc, b: Doc) -> Doc {
        match (&*a.0, &*b.0) {
            (DocData::Nil, _) => b,
            (_, DocData::Nil) => a,
            _ => Doc(Rc::new(DocData::Cons(a, b))),
        }
    }

    /// Literal text; consumes `s.len()` columns when printed.
    pub fn text<S: Into<String>>(s: S) -> Doc {
        let s = s.into();
        if s.is_empty() {
            Doc::nil()
        } else {
            Doc(Rc::new(DocData::Text(Rc::from(s))))
        }
    }

    /// Increase indentation by `n` within `d`.
    pub fn nest(n: i32, d: Doc) -> Doc {
        if n == 0 {
            d
        } else {
            Doc(Rc::new(DocData::Nest(n, d)))
        }
    }

    /// A conditional separator: `s` in flat mode, newline+indent in break
    /// mode. `s == "\n\n"` is the blank-line sentinel (see `engine`).
    pub fn break_sep<S: Into<String>>(s: S) -> Doc {
        Doc(Rc::new(DocData::Break(Rc::from(s.into()))))
    }

    /// A group: the layout engine decides flat vs. broken for all of `d` by
    /// consulting the fit oracle.
    pub fn group(d: Doc) -> Doc {
        Doc(Rc::new(DocData::Group(d, GroupKind::SelfDeciding)))
    }

    /// A group that unconditionally adopts the enclosing frame's mode
    /// instead of making its own fit decision.
    pub fn group_inherit(d: Doc) -> Doc {
        Doc(Rc::new(DocData::Group(d, GroupKind::Inherit)))
    }

    /// Compel `d` into break mode when `flag`; collapses to `d` unchanged
    /// when `!flag` (so `force_break(false, x) == x`).
    pub fn force_break(flag: bool, d: Doc) -> Doc {
        if flag {
            Doc(Rc::new(DocData::ForceBreak(d)))
        } else {
            d
        }
    }

    // ---------------------------------------------------------------
    // Derived helpers (§4.1): `x <sep> y` pairwise, and fold-right variadics
    // ---------------------------------------------------------------

    pub fn space_break() -> Doc {
        SPACE_BREAK.with(|d| Doc(Rc::clone(&d)))
    }

    pub fn newline_break() -> Doc {
        NEWLINE_BREAK.with(|d| Doc(Rc::clone(&d)))
    }

    pub fn blank_break() -> Doc {
        BLANK_BREAK.with(|d| Doc(Rc::clone(&d)))
    }

    pub fn stick_break() -> Doc {
        STICK_BREAK.with(|d| Doc(Rc::clone(&d)))
    }

    /// `space(x, y) = cons(x, cons(break(" "), y))`
    pub fn space(x: Doc, y: Doc) -> Doc {
        Doc::cons(x, Doc::cons(Doc::space_break(), y))
    }

    /// `newline(x, y) = cons(x, cons(break("\n"), y))`
    pub fn newline(x: Doc, y: Doc) -> Doc {
        Doc::cons(x, Doc::cons(Doc::newline_break(), y))
    }

    /// `newlines(x, y) = cons(x, cons(break("\n\n"), y))`
    pub fn newlines(x: Doc, y: Doc) -> Doc {
        Doc::cons(x, Doc::cons(Doc::blank_break(), y))
    }

    /// `stick(x, y) = cons(x, cons(break(""), y))`
    pub fn stick(x: Doc, y: Doc) -> Doc {
        Doc::cons(x, Doc::cons(Doc::stick_break(), y))
    }

    fn fold_right(docs: Vec<Doc>, join: impl Fn(Doc, Doc) -> Doc) -> Doc {
        let mut iter = docs.into_iter().rev();
        let Some(mut acc) = iter.next() else {
            return Doc::nil();
        };
        for d in iter {
            acc = join(d, acc);
        }
        acc
    }

    /// Variadic `space`, folded right.
    pub fn space_all(docs: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::fold_right(docs.into_iter().collect(), Doc::space)
    }

    /// Variadic `newline`, folded right.
    pub fn newline_all(docs: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::fold_right(docs.into_iter().collect(), Doc::newline)
    }

    /// Variadic `newlines`, folded right.
    pub fn newlines_all(docs: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::fold_right(docs.into_iter().collect(), Doc::newlines)
    }

    /// Variadic `stick`, folded right.
    pub fn stick_all(docs: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::fold_right(docs.into_iter().collect(), Doc::stick)
    }

    // ---------------------------------------------------------------
    // Surround helpers used by the bracket compiler
    // ---------------------------------------------------------------

    pub fn surround(open: &str, inner: Doc, close: &str) -> Doc {
        Doc::stick(
            Doc::stick(Doc::text(open), inner),
            Doc::text(close),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cons_collapses_nil_identities() {
        let t = Doc::text("x");
        assert!(matches!(&*Doc::cons(Doc::nil(), t.clone()).0, DocData::Text(s) if &**s == "x"));
        assert!(matches!(&*Doc::cons(t, Doc::nil()).0, DocData::Text(s) if &**s == "x"));
    }

    #[test]
    fn force_break_false_collapses() {
        let t = Doc::text("x");
        assert!(matches!(&*Doc::force_break(false, t).0, DocData::Text(_)));
    }

    #[test]
    fn force_break_true_wraps() {
        let t = Doc::text("x");
        assert!(matches!(&*Doc::force_break(true, t).0, DocData::ForceBreak(_)));
    }

    #[test]
    fn empty_text_is_nil() {
        assert!(matches!(&*Doc::text("").0, DocData::Nil));
    }
}
