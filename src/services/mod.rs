// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ai;
pub mod normalize;
pub mod nutrition;
pub mod password;
pub mod prompts;

pub use ai::AiService;
