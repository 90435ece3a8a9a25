// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The fit oracle (C2) and layout engine (C3): a tail-iterative reduction of
//! a `Doc` to an `SDoc` under a width target, using an explicit `Vec`-backed
//! stack of `(indent, mode, doc)` frames rather than host recursion, so the
//! depth is bounded only by heap, not call-stack size (§5, §9).

use crate::doc::{Doc, DocData, GroupKind, BLANK_LINE_SENTINEL};
use crate::sdoc::{SDoc, SEvent};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Mode {
    Flat,
    Break,
}

/// `(indent, mode, doc)`, §3.4. Frames are pushed right-child-first so that
/// the left child of a `cons` is processed first.
type Frame = (i32, Mode, Doc);

fn push_children(stack: &mut Vec<Frame>, indent: i32, mode: Mode, doc: &Doc) -> bool {
    match &*doc.0 {
        DocData::Nil => true,
        DocData::Cons(a, b) => {
            stack.push((indent, mode, b.clone()));
            stack.push((indent, mode, a.clone()));
            true
        }
        DocData::Nest(n, d) => {
            stack.push((indent + n, mode, d.clone()));
            true
        }
        DocData::Group(d, GroupKind::Inherit) => {
            stack.push((indent, mode, d.clone()));
            true
        }
        _ => false,
    }
}

/// `fits(w, stack)` (§4.2): does the prefix described by `stack` fit in `w`
/// columns? Consumes its own (cloned) stack; never mutates the caller's.
pub(crate) fn fits(mut w: i32, mut stack: Vec<Frame>) -> bool {
    loop {
        if w < 0 {
            return false;
        }
        let Some((indent, mode, doc)) = stack.pop() else {
            return true;
        };
        if push_children(&mut stack, indent, mode, &doc) {
            continue;
        }
        match &*doc.0 {
            DocData::Text(s) => {
                w -= s.len() as i32;
            }
            DocData::Break(s) => match mode {
                Mode::Flat => w -= s.len() as i32,
                // The line ends here in break mode, so the prefix up to
                // this point fits regardless of what remains.
                Mode::Break => return true,
            },
            DocData::Group(d, GroupKind::SelfDeciding) => {
                stack.push((indent, Mode::Flat, d.clone()));
            }
            // It will be broken anyway once the engine actually reaches it,
            // so there is no fit constraint to apply here.
            DocData::ForceBreak(_) => return true,
            DocData::Nil | DocData::Cons(..) | DocData::Nest(..) | DocData::Group(_, GroupKind::Inherit) => {
                unreachable!("handled by push_children")
            }
        }
    }
}

/// `format(w, stack)` (§4.3): reduce to an SDoc.
pub(crate) fn format(w: i32, mut stack: Vec<Frame>) -> SDoc {
    let mut out: SDoc = Vec::new();
    let mut k: i32 = 0;

    while let Some((indent, mode, doc)) = stack.pop() {
        if push_children(&mut stack, indent, mode, &doc) {
            continue;
        }
        match &*doc.0 {
            DocData::Text(s) => {
                k += s.len() as i32;
                out.push(SEvent::Text(s.clone()));
            }
            DocData::Break(s) => match mode {
                Mode::Flat => {
                    k += s.len() as i32;
                    out.push(SEvent::Text(s.clone()));
                }
                Mode::Break => {
                    if &**s == BLANK_LINE_SENTINEL {
                        out.push(SEvent::Line(0));
                    }
                    out.push(SEvent::Line(indent));
                    k = indent;
                }
            },
            DocData::ForceBreak(d) => {
                stack.push((indent, Mode::Break, d.clone()));
            }
            DocData::Group(d, GroupKind::SelfDeciding) => {
                let candidate = vec![(indent, Mode::Flat, d.clone())];
                if fits(w - k, candidate) {
                    stack.push((indent, Mode::Flat, d.clone()));
                } else {
                    stack.push((indent, Mode::Break, d.clone()));
                }
            }
            DocData::Nil | DocData::Cons(..) | DocData::Nest(..) | DocData::Group(_, GroupKind::Inherit) => {
                unreachable!("handled by push_children")
            }
        }
    }

    out
}

/// Layout engine entry point (for tests and the public `pretty` surface):
/// lay out `doc` at `width`, wrapping the root in its own self-deciding
/// group so the root is itself a decision point (§4.3).
pub(crate) fn layout(doc: Doc, width: i32) -> SDoc {
    let root = Doc::group(doc);
    format(width, vec![(0, Mode::Flat, root)])
}
