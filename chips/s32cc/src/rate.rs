// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Rate queries and requests.
//!
//! `get_rate` reports what the hardware produces, reading live registers
//! where a block is programmable. `set_rate` and `set_parent` only record
//! targets; nothing is written until the clock is enabled.

use core::fmt;

use log::{error, warn};

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::freq;
use crate::node::{ClockId, ClockKind, Module, Mux, MuxBlock};
use crate::registers::{cgm, dfs, plldig, CGM_CSS, CGM_DC, DFS_CTL, DFS_DVPORT, PLLCLKMUX};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    /// Frequency `id` currently runs at, 0 if it is gated or powered down.
    pub fn get_rate(&self, id: ClockId) -> Result<u64, ClockError> {
        let hz = self.rate_of(id)?;
        let (_, clock) = self.lookup(id)?;
        if let Some(range) = clock.range {
            if hz != 0 && !range.contains(hz) {
                warn!(
                    "{} reports {} Hz, outside [{}, {}]",
                    clock.name, hz, range.min, range.max
                );
            }
        }
        Ok(hz)
    }

    /// Write one `name : rate Hz` line per clock of the tree. Clocks
    /// whose rate cannot be determined are listed at 0 Hz.
    pub fn dump_rates<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for clock in self.tree.iter() {
            let hz = self.rate_of(clock.id).unwrap_or(0);
            writeln!(out, "{:<30} : {} Hz", clock.name, hz)?;
        }
        Ok(())
    }

    pub(crate) fn rate_of(&self, id: ClockId) -> Result<u64, ClockError> {
        let (index, clock) = self.lookup(id)?;
        match clock.kind {
            ClockKind::Child(parent) => self.rate_of(parent),
            ClockKind::Module(ref module) => self.module_rate(index, module),
        }
    }

    fn module_rate(&self, index: usize, module: &Module) -> Result<u64, ClockError> {
        match module {
            Module::Osc(osc) => self.fixed_rate(index, osc.freq),
            Module::Fixed(fixed) => self.fixed_rate(index, fixed.freq),
            Module::Pll(pll) => self.pll_vco(pll),
            Module::PllDiv(div) => self.pll_div_rate(div),
            Module::Dfs(dfs) => {
                let base = self.bases.dfs(dfs.instance)?;
                if self.read::<DFS_CTL::Register>(dfs::ctl(base)).is_set(DFS_CTL::RESET) {
                    return Ok(0);
                }
                self.rate_of(dfs.source)
            }
            Module::DfsDiv(div) => {
                let (_, dfs) = self.dfs_of(div.dfs)?;
                let base = self.bases.dfs(dfs.instance)?;
                let dvport = self.read::<DFS_DVPORT::Register>(dfs::dvport(base, div.index));
                let (mfi, mfn) = (dvport.read(DFS_DVPORT::MFI), dvport.read(DFS_DVPORT::MFN));
                if mfi == 0 && mfn == 0 {
                    return Ok(0);
                }
                Ok(freq::dfs_rate(self.rate_of(div.dfs)?, mfi, mfn))
            }
            Module::Mux(mux) | Module::SharedMux(mux) => {
                let source = self.mux_source(index, mux)?;
                self.rate_of(source)
            }
            Module::CgmDiv(div) => {
                let (mux, base) = self.cgm_mux_of(div.mux)?;
                let dc = self.read::<CGM_DC::Register>(cgm::dc(base, mux.index, div.index));
                if !dc.is_set(CGM_DC::DE) {
                    return Ok(0);
                }
                Ok(freq::div_rate(self.rate_of(div.mux)?, dc.read(CGM_DC::DIV) + 1))
            }
            Module::FixedDiv(div) => Ok(freq::div_rate(self.rate_of(div.parent)?, div.div)),
            Module::PartBlock(block) => self.rate_of(block.parent),
        }
    }

    fn fixed_rate(&self, index: usize, default: u64) -> Result<u64, ClockError> {
        match (self.state(index).rate(), default) {
            (0, 0) => Err(ClockError::Unconfigured),
            (0, hz) => Ok(hz),
            (hz, _) => Ok(hz),
        }
    }

    /// Source of a mux: the recorded one, else whatever the hardware selects.
    pub(crate) fn mux_source(&self, index: usize, mux: &Mux) -> Result<ClockId, ClockError> {
        if let Some(parent) = self.state(index).parent() {
            return Ok(parent);
        }

        let sel = match mux.block {
            MuxBlock::Pll(instance) => {
                let base = self.bases.pll(instance)?;
                self.read::<PLLCLKMUX::Register>(plldig::pllclkmux(base))
                    .read(PLLCLKMUX::REFCLKSEL)
            }
            MuxBlock::Cgm(instance) => {
                let base = self.bases.cgm(instance)?;
                self.read::<CGM_CSS::Register>(cgm::css(base, mux.index))
                    .read(CGM_CSS::SELSTAT)
            }
        };
        mux.source_by_sel(sel)
            .map(|source| source.clock)
            .ok_or(ClockError::Unconfigured)
    }

    /// Record the target rate of `id`. Returns the rate stored on the
    /// programmable block `id` resolves to.
    pub fn set_rate(&self, id: ClockId, hz: u64) -> Result<u64, ClockError> {
        let (index, clock) = self.lookup(id)?;

        if let Some(range) = clock.range {
            if !range.contains(hz) {
                error!(
                    "{}: {} Hz outside [{}, {}]",
                    clock.name, hz, range.min, range.max
                );
                return Err(ClockError::OutOfRange);
            }
        }

        match clock.kind {
            ClockKind::Child(parent) => self.set_rate(parent, hz),
            ClockKind::Module(ref module) => self.set_module_rate(index, module, hz),
        }
    }

    fn set_module_rate(&self, index: usize, module: &Module, hz: u64) -> Result<u64, ClockError> {
        match module {
            Module::Osc(osc) => self.store_rate(index, osc.freq, hz),
            Module::Fixed(fixed) => self.store_rate(index, fixed.freq, hz),
            Module::Pll(_) | Module::PllDiv(_) | Module::DfsDiv(_) => {
                self.store_rate(index, 0, hz)
            }
            Module::CgmDiv(_) => {
                self.state(index).set_rate(hz);
                Ok(hz)
            }
            Module::FixedDiv(div) => {
                let parent = hz
                    .checked_mul(u64::from(div.div))
                    .ok_or(ClockError::FrequencyUnachievable)?;
                let stored = self.set_rate(div.parent, parent)?;
                Ok(freq::div_rate(stored, div.div))
            }
            Module::Mux(_) | Module::SharedMux(_) => match self.state(index).parent() {
                Some(source) => self.set_rate(source, hz),
                None => {
                    error!("{}: no source selected", self.name_of(index));
                    Err(ClockError::Unconfigured)
                }
            },
            Module::PartBlock(block) => self.set_rate(block.parent, hz),
            Module::Dfs(_) => Err(ClockError::InvalidParent),
        }
    }

    /// Store a rate that may only be set once. `default` is the rate the
    /// clock has when nothing was requested.
    fn store_rate(&self, index: usize, default: u64, hz: u64) -> Result<u64, ClockError> {
        let state = self.state(index);
        let current = match state.rate() {
            0 => default,
            rate => rate,
        };
        if current != 0 && current != hz {
            error!(
                "{}: already set to {} Hz, {} Hz requested",
                self.name_of(index),
                current,
                hz
            );
            return Err(ClockError::ConflictingConfiguration);
        }
        state.set_rate(hz);
        Ok(hz)
    }

    /// Select `parent` as the source of mux `id`.
    pub fn set_parent(&self, id: ClockId, parent: ClockId) -> Result<(), ClockError> {
        let (index, clock) = self.lookup(id)?;
        self.lookup(parent)?;

        let (mux, shared) = clock.mux().ok_or_else(|| {
            error!("{} is not a mux", clock.name);
            ClockError::InvalidParent
        })?;
        if mux.source(parent).is_none() {
            error!("{} cannot select clock {}", clock.name, parent.0);
            return Err(ClockError::InvalidParent);
        }

        let state = self.state(index);
        match state.parent() {
            Some(current) if shared && current != parent => {
                error!(
                    "{} is shared and already selects clock {}",
                    clock.name, current.0
                );
                Err(ClockError::ConflictingConfiguration)
            }
            _ => {
                state.set_parent(parent);
                Ok(())
            }
        }
    }
}
