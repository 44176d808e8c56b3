// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Cost Numeric Trait
//!
//! Unified numeric bounds for the search engine. `CostNumeric` collects
//! the integer capabilities the uniform-cost expansion relies on into a
//! single alias, simplifying generic signatures.
//!
//! Accumulated costs are compared, ordered, and added with saturating
//! semantics (`PrimInt` brings `Saturating` along), so the frontier
//! never wraps around on pathological inputs. `Send + Sync` keeps
//! independent solve invocations free to run concurrently.
//!
//! These bounds are satisfied by the signed primitive integer types
//! `i8`, `i16`, `i32`, `i64`, and `isize`.

use num_traits::{PrimInt, Signed};

/// A trait alias for numeric types that can be used as costs by the
/// search engine.
pub trait CostNumeric:
    PrimInt + Signed + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> CostNumeric for T where
    T: PrimInt + Signed + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
