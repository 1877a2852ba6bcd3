// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clock tree engine for the NXP S32CC family (S32G2, S32R45).
//!
//! The clocking IP is the same across the family: FXOSC and the internal RC
//! oscillators feed four PLLDIG instances, two DFS blocks hang off the ARM
//! and peripheral PLLs, and MC_CGM selectors and dividers distribute the
//! result. Peripherals are additionally gated by MC_ME partitions.
//!
//! This crate holds the engine and the clocks shared by every SoC. The SoC
//! crates add their own clocks, base addresses and [`ChipSpecs`].

#![crate_name = "s32cc"]
#![crate_type = "rlib"]
#![no_std]

#[cfg(any(test, feature = "fake_bus"))]
extern crate std;

mod cgm;
mod config;
mod dfs;
mod enable;
mod fxosc;
mod partition;
mod pll;
mod rate;

pub mod bus;
pub mod chip_specific;
pub mod clocks;
pub mod early;
pub mod errorcode;
pub mod freq;
pub mod node;
pub mod registers;
pub mod scmi;
pub mod tree;

#[cfg(any(test, feature = "fake_bus"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use crate::bus::{poll_until, MmioBus, RegisterBus};
pub use crate::chip_specific::{Budget, ChipSpecs, Handshakes, RatePolicy};
pub use crate::clocks::{BaseAddresses, Clocks};
pub use crate::early::{lookup_grade, Assignment, EarlyFrequencies, FreqGrade};
pub use crate::errorcode::ClockError;
pub use crate::node::{ClockId, ClockState, ClockTree};
pub use crate::scmi::{ScmiClock, ScmiClocks, ScmiId, ScmiTable};
pub use crate::tree::ids;
