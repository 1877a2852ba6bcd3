// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Boot-time clock setup.
//!
//! Before anything else runs, the A53 cores, the interconnect, the console
//! UART and the DDR controller have to be clocked from the PLLs instead of
//! the internal RC oscillator. Each of these is a short list of
//! [`Assignment`]s, the same shape boards use for their own clock tables.

use log::{debug, error};

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::node::ClockId;
use crate::registers::{siul2, SIUL2_MIDR2};
use crate::tree::ids;

/// One step of a clock configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// Select the second clock as source of the first, which must be a mux.
    Parent(ClockId, ClockId),
    Rate(ClockId, u64),
    Enable(ClockId),
}

/// Frequencies programmed by [`Clocks::enable_early_clocks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EarlyFrequencies {
    /// Crystal on the board
    pub fxosc: u64,
    pub a53: u64,
    pub arm_pll_vco: u64,
    pub xbar_2x: u64,
    pub periph_pll_vco: u64,
    /// Console LINFLEXD, twice the UART module clock
    pub lin_baud: u64,
    pub ddr_pll_vco: u64,
    pub ddr: u64,
}

impl EarlyFrequencies {
    /// These frequencies with the limits of a part's speed grade applied.
    pub const fn graded(self, grade: &FreqGrade) -> Self {
        EarlyFrequencies {
            a53: grade.a53,
            arm_pll_vco: grade.arm_pll_vco,
            xbar_2x: grade.xbar_2x,
            ..self
        }
    }
}

/// Speed grade of a part, identified by SIUL2 MIDR2.FREQ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreqGrade {
    pub midr2_freq: u32,
    pub a53: u64,
    pub arm_pll_vco: u64,
    pub xbar_2x: u64,
}

pub fn lookup_grade(table: &[FreqGrade], midr2_freq: u32) -> Option<&FreqGrade> {
    table.iter().find(|grade| grade.midr2_freq == midr2_freq)
}

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    /// Apply `table` in order, stopping at the first failing step.
    pub fn apply_assignments(&self, table: &[Assignment]) -> Result<(), ClockError> {
        for (step, assignment) in table.iter().enumerate() {
            let result = match *assignment {
                Assignment::Parent(clock, parent) => self.set_parent(clock, parent),
                Assignment::Rate(clock, hz) => self.set_rate(clock, hz).map(|_| ()),
                Assignment::Enable(clock) => self.enable(clock),
            };
            if let Err(err) = result {
                error!("clock assignment {} ({:?}) failed: {}", step, assignment, err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Move the boot-critical clocks off FIRC.
    pub fn enable_early_clocks(&self, freqs: &EarlyFrequencies) -> Result<(), ClockError> {
        debug!("enabling early clocks");

        self.apply_assignments(&[
            Assignment::Parent(ids::ARM_PLL_MUX, ids::FXOSC),
            Assignment::Parent(ids::CGM1_MUX0, ids::ARM_PLL_PHI0),
            Assignment::Rate(ids::FXOSC, freqs.fxosc),
            Assignment::Rate(ids::ARM_PLL_VCO, freqs.arm_pll_vco),
            Assignment::Rate(ids::A53_CORE, freqs.a53),
            Assignment::Enable(ids::A53_CORE),
        ])?;

        self.apply_assignments(&[
            Assignment::Parent(ids::CGM0_MUX0, ids::ARM_PLL_DFS1),
            Assignment::Rate(ids::XBAR_2X, freqs.xbar_2x),
            Assignment::Enable(ids::XBAR_2X),
        ])?;

        self.apply_assignments(&[
            Assignment::Parent(ids::PERIPH_PLL_MUX, ids::FXOSC),
            Assignment::Parent(ids::CGM0_MUX8, ids::PERIPH_PLL_PHI3),
            Assignment::Rate(ids::PERIPH_PLL_VCO, freqs.periph_pll_vco),
            Assignment::Rate(ids::LIN_BAUD, freqs.lin_baud),
            Assignment::Enable(ids::LIN_BAUD),
        ])?;

        self.apply_assignments(&[
            Assignment::Parent(ids::DDR_PLL_MUX, ids::FXOSC),
            Assignment::Parent(ids::CGM5_MUX0, ids::DDR_PLL_PHI0),
            Assignment::Rate(ids::DDR_PLL_VCO, freqs.ddr_pll_vco),
            Assignment::Rate(ids::DDR, freqs.ddr),
            Assignment::Enable(ids::DDR),
        ])
    }

    /// Speed grade of the running part, `None` if `table` does not list it.
    pub fn read_freq_grade<'t>(
        &self,
        table: &'t [FreqGrade],
    ) -> Result<Option<&'t FreqGrade>, ClockError> {
        let base = self.bases.siul2()?;
        let freq = self
            .read::<SIUL2_MIDR2::Register>(siul2::midr2(base))
            .read(SIUL2_MIDR2::FREQ);
        Ok(lookup_grade(table, freq))
    }
}
