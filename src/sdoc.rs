// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The string-event sequence (SDoc, §3.3) and its emitter (C4).
//!
//! The spec models SDoc as a cons list of `s_text`/`s_line` events
//! terminated by `s_nil`; we carry the same two event shapes in a `Vec`
//! (produced in emission order by the layout engine's explicit stack) since
//! a linear buffer is the natural representation for a single forward pass.

use std::rc::Rc;

#[derive(Debug, Clone)]
pub(crate) enum SEvent {
    Text(Rc<str>),
    /// A newline followed by `indent` spaces.
    Line(i32),
}

pub(crate) type SDoc = Vec<SEvent>;

/// Serialize an SDoc to bytes, expanding indentation, and append a
/// terminating newline (§4.4).
pub(crate) fn emit(events: &SDoc) -> Vec<u8> {
    let mut out = String::new();
    for ev in events {
        match ev {
            SEvent::Text(s) => out.push_str(s),
            SEvent::Line(indent) => {
                out.push('\n');
                let indent = indent.max(0) as usize;
                out.extend(std::iter::repeat(' ').take(indent));
            }
        }
    }
    out.push('\n');
    out.into_bytes()
}
