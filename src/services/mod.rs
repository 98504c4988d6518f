// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod intra;
pub mod profile;

pub use intra::IntraClient;
pub use profile::{ProfileResolver, ResolveError};
