// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! The clock engine.
//!
//! [`Clocks`] ties a register bus, the SoC base addresses, a static clock
//! tree and its state slice together. It is created once during early boot
//! and borrowed by board initialization:
//!
//! ```rust,ignore
//! let state = s32g274a::tree::clock_state();
//! let bus = unsafe { MmioBus::new() };
//! let clocks: Clocks<_, S32g274aSpecs> =
//!     Clocks::new(&bus, &s32g274a::BASES, &s32g274a::tree::TREE, &state)?;
//! clocks.enable_early_clocks(&s32g274a::EARLY)?;
//! let uart_hz = clocks.get_rate(ids::LINFLEXD)?;
//! ```
//!
//! The operations live in sibling modules, one per kind of hardware block.

use core::marker::PhantomData;

use log::error;
use tock_registers::fields::FieldValue;
use tock_registers::{LocalRegisterCopy, RegisterLongName};

use crate::bus::{self, RegisterBus};
use crate::chip_specific::{Budget, ChipSpecs};
use crate::errorcode::ClockError;
use crate::node::{CgmInstance, Clock, ClockId, ClockState, ClockTree, DfsInstance, PllInstance};

/// Base addresses of the clocking blocks. Blocks absent on a SoC are `None`.
#[derive(Clone, Copy, Debug)]
pub struct BaseAddresses {
    pub fxosc: Option<usize>,
    pub arm_pll: Option<usize>,
    pub periph_pll: Option<usize>,
    pub accel_pll: Option<usize>,
    pub ddr_pll: Option<usize>,
    pub arm_dfs: Option<usize>,
    pub periph_dfs: Option<usize>,
    pub cgm0: Option<usize>,
    pub cgm1: Option<usize>,
    pub cgm2: Option<usize>,
    pub cgm5: Option<usize>,
    pub mc_me: Option<usize>,
    pub rdc: Option<usize>,
    pub rgm: Option<usize>,
    pub siul2: Option<usize>,
}

fn present(base: Option<usize>, block: &str) -> Result<usize, ClockError> {
    base.ok_or_else(|| {
        error!("no base address for {}", block);
        ClockError::InvalidParent
    })
}

impl BaseAddresses {
    pub(crate) fn pll(&self, instance: PllInstance) -> Result<usize, ClockError> {
        match instance {
            PllInstance::Arm => present(self.arm_pll, "ARM_PLL"),
            PllInstance::Periph => present(self.periph_pll, "PERIPH_PLL"),
            PllInstance::Accel => present(self.accel_pll, "ACCEL_PLL"),
            PllInstance::Ddr => present(self.ddr_pll, "DDR_PLL"),
        }
    }

    pub(crate) fn dfs(&self, instance: DfsInstance) -> Result<usize, ClockError> {
        match instance {
            DfsInstance::Arm => present(self.arm_dfs, "ARM_DFS"),
            DfsInstance::Periph => present(self.periph_dfs, "PERIPH_DFS"),
        }
    }

    pub(crate) fn cgm(&self, instance: CgmInstance) -> Result<usize, ClockError> {
        match instance {
            CgmInstance::Cgm0 => present(self.cgm0, "MC_CGM0"),
            CgmInstance::Cgm1 => present(self.cgm1, "MC_CGM1"),
            CgmInstance::Cgm2 => present(self.cgm2, "MC_CGM2"),
            CgmInstance::Cgm5 => present(self.cgm5, "MC_CGM5"),
        }
    }

    pub(crate) fn fxosc(&self) -> Result<usize, ClockError> {
        present(self.fxosc, "FXOSC")
    }

    pub(crate) fn mc_me(&self) -> Result<usize, ClockError> {
        present(self.mc_me, "MC_ME")
    }

    pub(crate) fn rdc(&self) -> Result<usize, ClockError> {
        present(self.rdc, "RDC")
    }

    pub(crate) fn rgm(&self) -> Result<usize, ClockError> {
        present(self.rgm, "MC_RGM")
    }

    pub(crate) fn siul2(&self) -> Result<usize, ClockError> {
        present(self.siul2, "SIUL2")
    }
}

pub struct Clocks<'a, B: RegisterBus, C: ChipSpecs> {
    pub(crate) bus: &'a B,
    pub(crate) bases: &'a BaseAddresses,
    pub(crate) tree: &'a ClockTree,
    state: &'a [ClockState],
    _chip: PhantomData<C>,
}

impl<'a, B: RegisterBus, C: ChipSpecs> Clocks<'a, B, C> {
    /// Bind a tree to its state slice. The tree is validated once here so
    /// later lookups can rely on its shape.
    pub fn new(
        bus: &'a B,
        bases: &'a BaseAddresses,
        tree: &'a ClockTree,
        state: &'a [ClockState],
    ) -> Result<Self, ClockError> {
        if state.len() != tree.len() {
            error!(
                "clock state has {} entries, tree has {}",
                state.len(),
                tree.len()
            );
            return Err(ClockError::InvalidParent);
        }
        tree.validate()?;
        Ok(Clocks {
            bus,
            bases,
            tree,
            state,
            _chip: PhantomData,
        })
    }

    pub(crate) fn lookup(&self, id: ClockId) -> Result<(usize, &'static Clock), ClockError> {
        self.tree.get(id).map_err(|err| {
            error!("unknown clock {}", id.0);
            err
        })
    }

    pub(crate) fn name_of(&self, index: usize) -> &'static str {
        self.tree.clock(index).map_or("?", |clock| clock.name)
    }

    pub(crate) fn state(&self, index: usize) -> &ClockState {
        &self.state[index]
    }

    /// Requested rate of the clock at `index`, `Unconfigured` if unset.
    pub(crate) fn requested_rate(&self, index: usize) -> Result<u64, ClockError> {
        match self.state[index].rate() {
            0 => {
                error!("rate of {} is not set", self.name_of(index));
                Err(ClockError::Unconfigured)
            }
            hz => Ok(hz),
        }
    }

    pub(crate) fn read<R: RegisterLongName>(&self, addr: usize) -> LocalRegisterCopy<u32, R> {
        bus::read_copy(self.bus, addr)
    }

    pub(crate) fn read_raw(&self, addr: usize) -> u32 {
        self.bus.read(addr)
    }

    pub(crate) fn write(&self, addr: usize, value: u32) {
        bus::write(self.bus, addr, value);
    }

    pub(crate) fn modify<R: RegisterLongName>(&self, addr: usize, field: FieldValue<u32, R>) {
        bus::modify(self.bus, addr, field);
    }

    pub(crate) fn wait<R: RegisterLongName>(
        &self,
        addr: usize,
        field: FieldValue<u32, R>,
        budget: Budget,
    ) -> Result<(), ClockError> {
        bus::wait_for(self.bus, addr, field, budget)
    }

    pub(crate) fn wait_mask(
        &self,
        addr: usize,
        mask: u32,
        expected: u32,
        budget: Budget,
    ) -> Result<(), ClockError> {
        bus::wait_mask(self.bus, addr, mask, expected, budget)
    }
}
