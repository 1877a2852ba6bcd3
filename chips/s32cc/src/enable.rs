// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Dependency resolution.
//!
//! `enable` walks from the requested clock up to its oscillator and programs
//! blocks on the way back down, ancestors first. There is no visited set:
//! every block starts by reading its live configuration and returns early
//! when it already matches, so shared ancestors are programmed once no matter
//! how many consumers enable them.

use log::warn;

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::node::{ClockId, ClockKind, Module, OscKind};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    /// Bring `id` and everything it depends on into a running state.
    pub fn enable(&self, id: ClockId) -> Result<(), ClockError> {
        let (index, clock) = self.lookup(id)?;

        match clock.kind {
            ClockKind::Child(parent) => self.enable(parent)?,
            ClockKind::Module(ref module) => self.enable_module(index, module)?,
        }

        if let Some(range) = clock.range {
            if let Ok(hz) = self.rate_of(id) {
                if !range.contains(hz) {
                    warn!(
                        "{} runs at {} Hz, outside [{}, {}]",
                        clock.name, hz, range.min, range.max
                    );
                }
            }
        }
        Ok(())
    }

    fn enable_module(&self, index: usize, module: &Module) -> Result<(), ClockError> {
        match module {
            Module::Osc(osc) => match osc.kind {
                OscKind::Firc | OscKind::Sirc => Ok(()),
                OscKind::Fxosc => self.enable_fxosc(),
            },
            Module::Fixed(_) => Ok(()),
            Module::Pll(pll) => self.enable_pll(index, pll),
            Module::PllDiv(div) => self.enable_pll_div(index, div),
            Module::Dfs(dfs) => self.enable(dfs.source),
            Module::DfsDiv(div) => self.enable_dfs_div(index, div),
            Module::Mux(mux) | Module::SharedMux(mux) => self.enable_mux(index, mux),
            Module::CgmDiv(div) => self.enable_cgm_div(index, div),
            Module::FixedDiv(div) => self.enable(div.parent),
            Module::PartBlock(block) => {
                self.enable(block.parent)?;
                self.enable_part_block(block)
            }
        }
    }
}
