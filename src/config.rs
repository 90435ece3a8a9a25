// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The crate's only configuration surface (§3.9 expansion). `width` is the
//! single knob a caller can turn; indent size, brace style, and every other
//! layout rule are fixed by the structural and expression compilers
//! themselves (style reconfiguration is an explicit Non-goal).

use crate::MAX_WIDTH;

/// Formatting options threaded from the CLI (or a library caller) down to
/// the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub width: i32,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions { width: MAX_WIDTH }
    }
}
