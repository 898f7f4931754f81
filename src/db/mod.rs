// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer for live positions and timelines.

pub mod location;

pub use location::LocationDb;
