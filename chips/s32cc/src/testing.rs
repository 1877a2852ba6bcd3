// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A simulated register bus for tests.
//!
//! [`FakeBus`] keeps a sparse map of register values and acknowledges the
//! handshakes the engine waits for: PLLs lock when powered up, CGM muxes
//! switch, DFS ports come out of reset, FXOSC stabilizes and MC_ME applies
//! partition updates when the key sequence is written. Fault flags make the
//! simulated hardware misbehave in one specific way.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::vec::Vec;

use crate::bus::RegisterBus;
use crate::chip_specific::{Budget, ChipSpecs, Handshakes, RatePolicy};
use crate::clocks::BaseAddresses;
use crate::registers::{
    cgm, dfs, fxosc, mc_me, plldig, rdc, rgm, CGM_CSC, CGM_CSS, FXOSC_CTRL, FXOSC_STAT,
    MC_ME_CTL_KEY, MC_ME_PCONF, MC_ME_STAT, PLLCR, PLLSR, RDC_CTRL, RDC_STATUS, RGM_PRST,
    RGM_PSTAT,
};

/// Base addresses shared by the S32G2 and S32R45.
pub const BASES: BaseAddresses = BaseAddresses {
    fxosc: Some(0x4005_0000),
    arm_pll: Some(0x4003_8000),
    periph_pll: Some(0x4003_c000),
    accel_pll: Some(0x4004_0000),
    ddr_pll: Some(0x4004_4000),
    arm_dfs: Some(0x4005_4000),
    periph_dfs: Some(0x4005_8000),
    cgm0: Some(0x4003_0000),
    cgm1: Some(0x4003_4000),
    cgm2: Some(0x4401_8000),
    cgm5: Some(0x4006_8000),
    mc_me: Some(0x4008_8000),
    rdc: Some(0x4008_0000),
    rgm: Some(0x4007_8000),
    siul2: Some(0x4009_c000),
};

const TEST_BUDGET: Budget = Budget::new(0, 16);

const TEST_HANDSHAKES: Handshakes = Handshakes {
    fxosc: TEST_BUDGET,
    pll_lock: TEST_BUDGET,
    mux_switch: TEST_BUDGET,
    div_update: TEST_BUDGET,
    dfs_port: TEST_BUDGET,
    partition: TEST_BUDGET,
};

/// Exact rates, short budgets.
pub struct StrictSpecs;

impl ChipSpecs for StrictSpecs {
    const RATE_POLICY: RatePolicy = RatePolicy::Exact;
    const HANDSHAKES: Handshakes = TEST_HANDSHAKES;
}

/// Nearest rates, short budgets.
pub struct NearestSpecs;

impl ChipSpecs for NearestSpecs {
    const RATE_POLICY: RatePolicy = RatePolicy::Nearest;
    const HANDSHAKES: Handshakes = TEST_HANDSHAKES;
}

const CGM_MUXES: u32 = 64;
const PARTITIONS: u32 = 8;

pub struct FakeBus {
    bases: BaseAddresses,
    memory: RefCell<HashMap<usize, u32>>,
    log: RefCell<Vec<(usize, u32)>>,
    reads: Cell<usize>,
    pll_locks: Cell<usize>,
    /// CGM switches complete but leave the previous source selected
    pub mux_wrong_source: Cell<bool>,
    /// DFS ports report loss of lock when released from reset
    pub dfs_lose_lock: Cell<bool>,
    /// PLLs never lock
    pub pll_stuck: Cell<bool>,
    /// FXOSC never reports stable
    pub fxosc_stuck: Cell<bool>,
}

impl FakeBus {
    pub fn new(bases: &BaseAddresses) -> Self {
        FakeBus {
            bases: *bases,
            memory: RefCell::new(HashMap::new()),
            log: RefCell::new(Vec::new()),
            reads: Cell::new(0),
            pll_locks: Cell::new(0),
            mux_wrong_source: Cell::new(false),
            dfs_lose_lock: Cell::new(false),
            pll_stuck: Cell::new(false),
            fxosc_stuck: Cell::new(false),
        }
    }

    /// Set a register without simulating any side effect.
    pub fn poke(&self, addr: usize, value: u32) {
        self.memory.borrow_mut().insert(addr, value);
    }

    /// Read a register without counting the access.
    pub fn peek(&self, addr: usize) -> u32 {
        self.memory.borrow().get(&addr).copied().unwrap_or(0)
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of register writes so far.
    pub fn writes(&self) -> usize {
        self.log.borrow().len()
    }

    /// Every write so far, oldest first.
    pub fn write_log(&self) -> Vec<(usize, u32)> {
        self.log.borrow().clone()
    }

    /// Values written to `addr`, oldest first.
    pub fn writes_to(&self, addr: usize) -> Vec<u32> {
        self.log
            .borrow()
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Number of times a PLL was powered up and locked.
    pub fn pll_locks(&self) -> usize {
        self.pll_locks.get()
    }

    fn simulate(&self, addr: usize, value: u32, old: u32) {
        let b = &self.bases;

        for base in [b.arm_pll, b.periph_pll, b.accel_pll, b.ddr_pll].into_iter().flatten() {
            if addr == plldig::pllcr(base) {
                let sr = plldig::pllsr(base);
                if value & PLLCR::PLLPD::SET.value != 0 {
                    self.poke(sr, self.peek(sr) & !PLLSR::LOCK::SET.value);
                } else if !self.pll_stuck.get() {
                    self.poke(sr, self.peek(sr) | PLLSR::LOCK::SET.value);
                    self.pll_locks.set(self.pll_locks.get() + 1);
                }
                return;
            }
        }

        for base in [b.cgm0, b.cgm1, b.cgm2, b.cgm5].into_iter().flatten() {
            for index in 0..CGM_MUXES {
                if addr == cgm::csc(base, index) && value & CGM_CSC::CLK_SW::SET.value != 0 {
                    self.switch(base, index, value);
                    return;
                }
            }
        }

        for base in [b.arm_dfs, b.periph_dfs].into_iter().flatten() {
            if addr == dfs::portreset(base) {
                let released = !value & 0x3f;
                self.poke(dfs::portsr(base), released);
                if self.dfs_lose_lock.get() {
                    let olsr = dfs::portolsr(base);
                    self.poke(olsr, self.peek(olsr) | released);
                }
                return;
            }
            if addr == dfs::portolsr(base) {
                // Write one to clear.
                self.poke(addr, old & !value);
                return;
            }
        }

        if let Some(base) = b.fxosc {
            if addr == fxosc::ctrl(base)
                && value & FXOSC_CTRL::OSCON::SET.value != 0
                && !self.fxosc_stuck.get()
            {
                self.poke(fxosc::stat(base), FXOSC_STAT::OSC_STAT::SET.value);
                return;
            }
        }

        if let Some(base) = b.mc_me {
            if addr == mc_me::ctl_key(base) && value == MC_ME_CTL_KEY::KEY::InvertedKey.value {
                self.apply_partitions(base);
                return;
            }
        }

        if let Some(base) = b.rdc {
            for n in 0..PARTITIONS {
                if addr == rdc::ctrl(base, n) {
                    let disabled = value & RDC_CTRL::INTERCONNECT_DISABLE::SET.value != 0;
                    let status = if disabled {
                        RDC_STATUS::INTERCONNECT_DISABLE_STAT::SET.value
                    } else {
                        0
                    };
                    self.poke(rdc::status(base, n), status);
                    return;
                }
            }
        }

        if let Some(base) = b.rgm {
            for n in 0..PARTITIONS {
                if addr == rgm::prst(base, n) {
                    let held = value & RGM_PRST::PERIPH_RST::SET.value != 0;
                    let status = if held {
                        RGM_PSTAT::PERIPH_STAT::SET.value
                    } else {
                        0
                    };
                    self.poke(rgm::pstat(base, n), status);
                    return;
                }
            }
        }
    }

    fn switch(&self, base: usize, index: u32, value: u32) {
        let csc = cgm::csc(base, index);
        let css = cgm::css(base, index);
        self.poke(csc, value & !CGM_CSC::CLK_SW::SET.value);

        let requested = CGM_CSC::SELCTL.read(value);
        let previous = CGM_CSS::SELSTAT.read(self.peek(css));
        let selected = if self.mux_wrong_source.get() {
            previous
        } else {
            requested
        };
        self.poke(
            css,
            (CGM_CSS::SELSTAT.val(selected) + CGM_CSS::SWTRG::Success).value,
        );
    }

    /// MC_ME applies PCONF of every partition with a pending update.
    fn apply_partitions(&self, base: usize) {
        for n in 0..PARTITIONS {
            let pconf = self.peek(mc_me::pconf(base, n));
            let mut stat = 0;
            if pconf & MC_ME_PCONF::PCE::SET.value != 0 {
                stat |= MC_ME_STAT::PCS::SET.value;
            }
            if pconf & MC_ME_PCONF::OSSE::SET.value != 0 {
                stat |= MC_ME_STAT::OSSS::SET.value;
            }
            self.poke(mc_me::stat(base, n), stat);
            self.poke(mc_me::pupd(base, n), 0);
            self.poke(
                mc_me::cofb0_stat(base, n),
                self.peek(mc_me::cofb0_clken(base, n)),
            );
        }
    }
}

impl RegisterBus for FakeBus {
    fn read(&self, addr: usize) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.peek(addr)
    }

    fn write(&self, addr: usize, value: u32) {
        self.log.borrow_mut().push((addr, value));
        let old = self.peek(addr);
        self.poke(addr, value);
        self.simulate(addr, value, old);
    }
}
