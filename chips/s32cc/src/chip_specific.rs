// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Per-SoC parameters of the clock engine.
//!
//! Members of the S32CC family share the clock IP but differ in the rounding
//! policy they are built with and in how long each hardware acknowledgement
//! may take. SoC crates describe this with a zero-sized type implementing
//! [`ChipSpecs`].

/// How inexact frequency requests are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RatePolicy {
    /// Fail with `FrequencyUnachievable` unless the target is hit exactly.
    Exact,
    /// Program the closest achievable frequency and log a warning.
    Nearest,
}

/// Bounded busy-wait parameters for one kind of hardware acknowledgement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    /// `spin_loop` hints issued between two register reads
    pub spin_delay: u32,
    /// Maximum number of register reads
    pub max_iterations: u32,
}

impl Budget {
    pub const fn new(spin_delay: u32, max_iterations: u32) -> Self {
        Budget {
            spin_delay,
            max_iterations,
        }
    }
}

/// Budgets for every handshake the engine performs.
#[derive(Clone, Copy, Debug)]
pub struct Handshakes {
    /// FXOSC stable after power-on
    pub fxosc: Budget,
    /// PLL lock after PLLPD is cleared
    pub pll_lock: Budget,
    /// CGM mux switch (CLK_SW auto-clear and SWIP)
    pub mux_switch: Budget,
    /// CGM divider update pending
    pub div_update: Budget,
    /// DFS port reset and lock
    pub dfs_port: Budget,
    /// MC_ME partition, RDC and RGM acknowledgements
    pub partition: Budget,
}

pub trait ChipSpecs {
    const RATE_POLICY: RatePolicy;
    const HANDSHAKES: Handshakes;
}
