// ABOUTME: Re-exports the unified error types from verbum-core
// ABOUTME: Lets server modules and tools import errors from one crate path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use verbum_core::errors::*;
