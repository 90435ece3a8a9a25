// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! Cross-module integration coverage, organized one file per concern.

mod seed_scenarios;
