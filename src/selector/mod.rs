// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Label selector parsing, in-memory evaluation and query compilation.

mod compiler;
pub(crate) mod parser;
mod requirement;

pub use compiler::Predicate;
pub use parser::parse;
pub use requirement::{Operator, Requirement, Selector};
