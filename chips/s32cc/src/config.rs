// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Data structure for storing compile-time configuration options in the
//! clock engine.
//!
//! The engine is configured through Cargo features on this crate. Rather than
//! sprinkling `#[cfg(feature = "...")]` through the code, each option is turned
//! into a `bool` here so that regular `if` statements can be used:
//!
//! ```rust,ignore
//! if config::CONFIG.trace_register_writes {
//!     trace!("{:#010x} <- {:#010x}", addr, value);
//! }
//! ```
//!
//! The compiler removes the dead branch, so a disabled option costs nothing,
//! while both branches are still type checked on every build.

/// Compile-time options for the clock engine.
#[derive(Clone, Copy)]
pub(crate) struct Config {
    /// Emit a `trace!` record for every register write issued while
    /// programming the clock tree.
    ///
    /// Enabled with the `trace_clocks` feature.
    pub(crate) trace_register_writes: bool,
}

/// The configuration for this build.
pub(crate) const CONFIG: Config = Config {
    trace_register_writes: cfg!(feature = "trace_clocks"),
};
