// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Engine tests against the simulated bus.

use std::format;
use std::string::String;
use std::vec::Vec;

use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::early::{Assignment, EarlyFrequencies, FreqGrade};
use crate::errorcode::ClockError;
use crate::freq::MHZ;
use crate::node::{Clock, ClockId, ClockState, ClockTree, Module, PartBlock};
use crate::registers::{cgm, dfs, fxosc, mc_me, plldig, rdc, rgm, siul2};
use crate::scmi::{self, ScmiClock, ScmiClocks, ScmiId, ScmiTable};
use crate::testing::{FakeBus, NearestSpecs, StrictSpecs, BASES};
use crate::tree::{ids, COMMON, COMMON_COUNT};

static XBAR_2X: Clock = Clock::module_in(
    ids::XBAR_2X,
    "xbar_2x",
    Module::PartBlock(PartBlock::new(ids::CGM0_MUX0, 3, 0, false)),
    48 * MHZ,
    800 * MHZ,
);
static PER: Clock = Clock::child_in(ids::PER, "per", ids::PER_DIV, 0, 80 * MHZ);
static CAN_PE: Clock = Clock::child_in(ids::CAN_PE, "can_pe", ids::CGM0_MUX7, 40 * MHZ, 80 * MHZ);

static SOC: [&Clock; 3] = [&XBAR_2X, &PER, &CAN_PE];
static SEGMENTS: [&[&Clock]; 2] = [&COMMON, &SOC];
static TREE: ClockTree = ClockTree::new(&SEGMENTS);

static SCMI_PLATFORM: [ScmiClock; 1] = [ScmiClock::Clock(ids::XBAR_2X)];
static SCMI: ScmiTable = ScmiTable::new(&scmi::COMMON, &SCMI_PLATFORM);

const COUNT: usize = COMMON_COUNT + 3;

const FXOSC: usize = 0x4005_0000;
const ARM_PLL: usize = 0x4003_8000;
const PERIPH_PLL: usize = 0x4003_c000;
const ARM_DFS: usize = 0x4005_4000;
const CGM0: usize = 0x4003_0000;
const MC_ME: usize = 0x4008_8000;
const RDC: usize = 0x4008_0000;
const RGM: usize = 0x4007_8000;
const SIUL2: usize = 0x4009_c000;

const EARLY: EarlyFrequencies = EarlyFrequencies {
    fxosc: 40 * MHZ,
    a53: 1000 * MHZ,
    arm_pll_vco: 2000 * MHZ,
    xbar_2x: 800 * MHZ,
    periph_pll_vco: 2000 * MHZ,
    lin_baud: 133_333_333,
    ddr_pll_vco: 1600 * MHZ,
    ddr: 800 * MHZ,
};

fn state() -> [ClockState; COUNT] {
    core::array::from_fn(|_| ClockState::new())
}

fn engine<'a, C: ChipSpecs>(bus: &'a FakeBus, state: &'a [ClockState]) -> Clocks<'a, FakeBus, C> {
    Clocks::new(bus, &BASES, &TREE, state).unwrap()
}

/// PERIPH PLL from a 40 MHz crystal at `vco`.
fn periph_pll<C: ChipSpecs>(clocks: &Clocks<'_, FakeBus, C>, vco: u64) {
    clocks.set_parent(ids::PERIPH_PLL_MUX, ids::FXOSC).unwrap();
    clocks.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    clocks.set_rate(ids::PERIPH_PLL_VCO, vco).unwrap();
}

fn arm_pll<C: ChipSpecs>(clocks: &Clocks<'_, FakeBus, C>) {
    clocks.set_parent(ids::ARM_PLL_MUX, ids::FXOSC).unwrap();
    clocks.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    clocks.set_rate(ids::ARM_PLL_VCO, 2000 * MHZ).unwrap();
}

#[test]
fn tree_validates() {
    assert_eq!(TREE.len(), COUNT);
    assert_eq!(TREE.validate(), Ok(()));
    assert!(TREE.find(ids::LINFLEXD).is_some());
    assert_eq!(TREE.get(ClockId(999)).err(), Some(ClockError::UnknownClockId));
}

#[test]
fn cgm_selectors_are_ids() {
    for clock in TREE.iter() {
        if let Some((mux, _)) = clock.mux() {
            if let crate::node::MuxBlock::Cgm(_) = mux.block {
                assert!(mux.sources.iter().all(|s| s.sel == s.clock.0), "{}", clock.name);
            }
        }
    }
}

#[test]
fn state_must_match_tree() {
    let bus = FakeBus::new(&BASES);
    let short: [ClockState; 3] = core::array::from_fn(|_| ClockState::new());
    let result: Result<Clocks<'_, FakeBus, StrictSpecs>, _> =
        Clocks::new(&bus, &BASES, &TREE, &short);
    assert_eq!(result.err(), Some(ClockError::InvalidParent));
}

#[test]
fn unknown_ids() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(clocks.enable(ClockId(999)), Err(ClockError::UnknownClockId));
    assert_eq!(clocks.get_rate(ClockId(999)), Err(ClockError::UnknownClockId));
    assert_eq!(clocks.set_rate(ClockId(999), MHZ), Err(ClockError::UnknownClockId));
    assert_eq!(
        clocks.set_parent(ids::CGM0_MUX3, ClockId(999)),
        Err(ClockError::UnknownClockId)
    );
    assert_eq!(bus.writes(), 0);
}

#[test]
fn pll_phi_from_crystal() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    periph_pll(&clocks, 1300 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 100 * MHZ).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI7).unwrap();

    // 1300 MHz = 40 MHz * (32 + 9216 / 18432)
    assert_eq!(bus.peek(plldig::plldv(PERIPH_PLL)), (1 << 12) | 32);
    assert_eq!(bus.peek(plldig::pllfd(PERIPH_PLL)), (1 << 30) | 9216);
    assert_eq!(bus.peek(plldig::pllclkmux(PERIPH_PLL)), 1);
    assert_eq!(bus.peek(plldig::pllodiv(PERIPH_PLL, 7)), (1 << 31) | (12 << 16));
    assert_eq!(bus.pll_locks(), 1);

    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_VCO), Ok(1300 * MHZ));
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI7), Ok(100 * MHZ));
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI1), Ok(0));
}

#[test]
fn peripheral_clock_from_crystal() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_parent(ids::CGM0_MUX16, ids::PERIPH_PLL_PHI7).unwrap();
    periph_pll(&clocks, 1300 * MHZ);
    assert_eq!(clocks.set_rate(ids::SPI, 100 * MHZ), Ok(100 * MHZ));
    clocks.enable(ids::SPI).unwrap();

    assert_eq!(bus.peek(fxosc::ctrl(FXOSC)) & 1, 1);
    assert_eq!(bus.peek(plldig::plldv(PERIPH_PLL)), (1 << 12) | 32);
    assert_eq!(bus.peek(plldig::pllfd(PERIPH_PLL)), (1 << 30) | 9216);
    assert_eq!(bus.peek(plldig::pllodiv(PERIPH_PLL, 7)), (1 << 31) | (12 << 16));
    assert_eq!((bus.peek(cgm::csc(CGM0, 16)) >> 24) & 0x3f, ids::PERIPH_PLL_PHI7.0);
    assert_eq!((bus.peek(cgm::css(CGM0, 16)) >> 24) & 0x3f, ids::PERIPH_PLL_PHI7.0);

    // Read back from the registers rather than the requested rates.
    let fresh = self::state();
    let reader = engine::<StrictSpecs>(&bus, &fresh);
    reader.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    assert_eq!(reader.get_rate(ids::SPI), Ok(100 * MHZ));
    assert_eq!(clocks.get_rate(ids::SPI), Ok(100 * MHZ));
}

#[test]
fn fxosc_startup_sequence() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    clocks.enable(ids::FXOSC).unwrap();
    assert_eq!(
        bus.writes_to(fxosc::ctrl(FXOSC)),
        [0x0101_0070, 0x0101_0071]
    );
    assert_eq!(clocks.get_rate(ids::FXOSC), Ok(40 * MHZ));

    let writes = bus.writes();
    clocks.enable(ids::FXOSC).unwrap();
    assert_eq!(bus.writes(), writes);
}

#[test]
fn crystal_rate_is_bounded() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(
        clocks.set_rate(ids::FXOSC, 1_000_000_000_000_000),
        Err(ClockError::OutOfRange)
    );
    assert_eq!(clocks.set_rate(ids::FXOSC, 4 * MHZ), Err(ClockError::OutOfRange));
    assert_eq!(clocks.get_rate(ids::FXOSC), Err(ClockError::Unconfigured));
    assert_eq!(clocks.set_rate(ids::FXOSC, 40 * MHZ), Ok(40 * MHZ));
}

#[test]
fn fxosc_timeout_is_bounded() {
    let bus = FakeBus::new(&BASES);
    bus.fxosc_stuck.set(true);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    let reads = bus.reads();
    let err = clocks.enable(ids::FXOSC).unwrap_err();
    assert_eq!(err, ClockError::HardwareTimeout);
    assert!(err.is_recoverable());
    // One OSCON check, one read-modify-write, then the poll budget.
    assert_eq!(bus.reads() - reads, 2 + 16);
}

#[test]
fn second_enable_writes_nothing() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    periph_pll(&clocks, 2000 * MHZ);
    clocks.set_parent(ids::CGM0_MUX8, ids::PERIPH_PLL_PHI3).unwrap();
    clocks.set_rate(ids::LIN_BAUD, 133_333_333).unwrap();
    clocks.enable(ids::LIN_BAUD).unwrap();
    assert_eq!(clocks.get_rate(ids::LINFLEXD), Ok(66_666_666));

    let writes = bus.writes();
    clocks.enable(ids::LIN_BAUD).unwrap();
    clocks.enable(ids::LINFLEXD).unwrap();
    assert_eq!(bus.writes(), writes);
}

#[test]
fn shared_pll_locks_once() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    periph_pll(&clocks, 2000 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI1, 80 * MHZ).unwrap();
    clocks.set_rate(ids::PERIPH_PLL_PHI2, 80 * MHZ).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI1).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI2).unwrap();

    assert_eq!(bus.pll_locks(), 1);
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI1), Ok(80 * MHZ));
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI2), Ok(80 * MHZ));
}

#[test]
fn relock_keeps_running_phis() {
    let bus = FakeBus::new(&BASES);

    // An earlier stage left the PLL at 1300 MHz with PHI7 at 100 MHz.
    let boot = state();
    let clocks = engine::<StrictSpecs>(&bus, &boot);
    periph_pll(&clocks, 1300 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 100 * MHZ).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI7).unwrap();

    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);
    periph_pll(&clocks, 2000 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI2, 80 * MHZ).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI2).unwrap();

    assert_eq!(bus.pll_locks(), 2);
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_VCO), Ok(2000 * MHZ));
    assert_eq!(bus.peek(plldig::pllodiv(PERIPH_PLL, 7)), (1 << 31) | (19 << 16));
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI7), Ok(100 * MHZ));

    // The rescaled divider is reused as is.
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 100 * MHZ).unwrap();
    let writes = bus.writes();
    clocks.enable(ids::PERIPH_PLL_PHI7).unwrap();
    assert_eq!(bus.writes(), writes);
}

#[test]
fn gated_phi_keeps_its_divider() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    periph_pll(&clocks, 1300 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 100 * MHZ).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI7).unwrap();

    let odiv = plldig::pllodiv(PERIPH_PLL, 7);
    bus.poke(odiv, 12 << 16);
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI7), Ok(0));

    let before = bus.writes_to(odiv).len();
    clocks.enable(ids::PERIPH_PLL_PHI7).unwrap();
    let after = bus.writes_to(odiv);
    assert_eq!(after[before..], [(1 << 31) | (12 << 16)]);
}

#[test]
fn inexact_rate_depends_on_policy() {
    let bus = FakeBus::new(&BASES);
    let strict = state();
    let clocks = engine::<StrictSpecs>(&bus, &strict);
    periph_pll(&clocks, 1300 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 99 * MHZ).unwrap();
    assert_eq!(
        clocks.enable(ids::PERIPH_PLL_PHI7),
        Err(ClockError::FrequencyUnachievable)
    );

    let bus = FakeBus::new(&BASES);
    let nearest = state();
    let clocks = engine::<NearestSpecs>(&bus, &nearest);
    periph_pll(&clocks, 1300 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 99 * MHZ).unwrap();
    clocks.enable(ids::PERIPH_PLL_PHI7).unwrap();
    assert_eq!(clocks.get_rate(ids::PERIPH_PLL_PHI7), Ok(100 * MHZ));
}

#[test]
fn pll_timeout_propagates() {
    let bus = FakeBus::new(&BASES);
    bus.pll_stuck.set(true);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    periph_pll(&clocks, 1300 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI7, 100 * MHZ).unwrap();
    assert_eq!(
        clocks.enable(ids::PERIPH_PLL_PHI7),
        Err(ClockError::HardwareTimeout)
    );
    // The PHI is never enabled on an unlocked PLL.
    assert_eq!(bus.peek(plldig::pllodiv(PERIPH_PLL, 7)) & (1 << 31), 0);
}

#[test]
fn cgm_divider() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_parent(ids::CGM0_MUX4, ids::FIRC).unwrap();
    clocks.set_rate(ids::FTM0_REF, 24 * MHZ).unwrap();
    clocks.enable(ids::FTM0_REF).unwrap();
    assert_eq!(bus.peek(cgm::dc(CGM0, 4, 0)), (1 << 31) | (1 << 16));
    assert_eq!(clocks.get_rate(ids::FTM0_REF), Ok(24 * MHZ));

    let writes = bus.writes();
    clocks.enable(ids::FTM0_REF).unwrap();
    assert_eq!(bus.writes(), writes);

    // Divider rates may be changed.
    assert_eq!(clocks.set_rate(ids::FTM0_REF, 12 * MHZ), Ok(12 * MHZ));
    clocks.enable(ids::FTM0_REF).unwrap();
    assert_eq!(bus.peek(cgm::dc(CGM0, 4, 0)), (1 << 31) | (3 << 16));
    assert_eq!(clocks.get_rate(ids::FTM0_REF), Ok(12 * MHZ));
}

#[test]
fn cgm_divider_is_three_bits() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<NearestSpecs>(&bus, &state);

    clocks.set_parent(ids::CGM0_MUX4, ids::FIRC).unwrap();
    clocks.set_rate(ids::FTM0_REF, 6 * MHZ).unwrap();
    clocks.enable(ids::FTM0_REF).unwrap();
    assert_eq!(bus.peek(cgm::dc(CGM0, 4, 0)), (1 << 31) | (7 << 16));

    // 48 MHz / 12 does not fit the field.
    let dc = cgm::dc(CGM0, 4, 0);
    let before = bus.writes_to(dc).len();
    clocks.set_rate(ids::FTM0_REF, 4 * MHZ).unwrap();
    assert_eq!(
        clocks.enable(ids::FTM0_REF),
        Err(ClockError::FrequencyUnachievable)
    );
    assert_eq!(bus.writes_to(dc).len(), before);
    assert_eq!(clocks.get_rate(ids::FTM0_REF), Ok(6 * MHZ));
}

#[test]
fn mux_switch_is_verified() {
    let bus = FakeBus::new(&BASES);
    bus.mux_wrong_source.set(true);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    clocks.set_parent(ids::CGM0_MUX8, ids::FXOSC).unwrap();
    let err = clocks.enable(ids::LIN_BAUD).unwrap_err();
    assert_eq!(err, ClockError::SwitchFailed);
    assert!(err.is_recoverable());
}

#[test]
fn mux_reports_live_source() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(clocks.get_rate(ids::LIN_BAUD), Ok(48 * MHZ));

    // SELSTAT = FXOSC, crystal frequency unknown.
    bus.poke(cgm::css(CGM0, 8), (2 << 24) | (1 << 17));
    assert_eq!(clocks.get_rate(ids::LIN_BAUD), Err(ClockError::Unconfigured));
}

#[test]
fn shared_mux_conflicts() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_parent(ids::CGM0_MUX0, ids::ARM_PLL_DFS1).unwrap();
    clocks.set_parent(ids::CGM0_MUX0, ids::ARM_PLL_DFS1).unwrap();
    assert_eq!(
        clocks.set_parent(ids::CGM0_MUX0, ids::FIRC),
        Err(ClockError::ConflictingConfiguration)
    );

    // A plain mux takes the latest selection.
    clocks.set_parent(ids::CGM0_MUX3, ids::FIRC).unwrap();
    clocks.set_parent(ids::CGM0_MUX3, ids::PERIPH_PLL_PHI1).unwrap();
    let (index, _) = TREE.find(ids::CGM0_MUX3).unwrap();
    assert_eq!(state[index].parent(), Some(ids::PERIPH_PLL_PHI1));
}

#[test]
fn invalid_parents() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(
        clocks.set_parent(ids::CGM0_MUX3, ids::ARM_PLL_PHI0),
        Err(ClockError::InvalidParent)
    );
    assert_eq!(
        clocks.set_parent(ids::XBAR, ids::FIRC),
        Err(ClockError::InvalidParent)
    );
    assert_eq!(
        clocks.set_rate(ids::ARM_DFS, 800 * MHZ),
        Err(ClockError::InvalidParent)
    );
}

#[test]
fn rate_requests() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(clocks.set_rate(ids::XBAR, 500 * MHZ), Err(ClockError::OutOfRange));
    assert_eq!(
        clocks.set_rate(ids::CGM0_MUX3, MHZ),
        Err(ClockError::Unconfigured)
    );

    assert_eq!(clocks.set_rate(ids::FXOSC, 40 * MHZ), Ok(40 * MHZ));
    assert_eq!(clocks.set_rate(ids::FXOSC, 40 * MHZ), Ok(40 * MHZ));
    assert_eq!(
        clocks.set_rate(ids::FXOSC, 24 * MHZ),
        Err(ClockError::ConflictingConfiguration)
    );
    assert_eq!(
        clocks.set_rate(ids::FIRC, 40 * MHZ),
        Err(ClockError::ConflictingConfiguration)
    );

    // Fixed dividers forward the scaled rate to the mux source.
    clocks.set_parent(ids::CGM0_MUX0, ids::ARM_PLL_DFS1).unwrap();
    assert_eq!(clocks.set_rate(ids::XBAR, 400 * MHZ), Ok(400 * MHZ));
    assert_eq!(clocks.set_rate(ids::ARM_PLL_DFS1, 800 * MHZ), Ok(800 * MHZ));
    assert_eq!(
        clocks.set_rate(ids::ARM_PLL_DFS1, 600 * MHZ),
        Err(ClockError::ConflictingConfiguration)
    );
    assert_eq!(bus.writes(), 0);
}

#[test]
fn enable_needs_configuration() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(clocks.enable(ids::CGM0_MUX3), Err(ClockError::Unconfigured));
    assert_eq!(clocks.enable(ids::PERIPH_PLL_PHI0), Err(ClockError::Unconfigured));
    assert_eq!(clocks.get_rate(ids::FXOSC), Err(ClockError::Unconfigured));
}

#[test]
fn dfs_first_use_resets_the_block() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    arm_pll(&clocks);
    clocks.set_rate(ids::ARM_PLL_DFS1, 800 * MHZ).unwrap();
    clocks.enable(ids::ARM_PLL_DFS1).unwrap();

    assert_eq!(bus.writes_to(dfs::portreset(ARM_DFS)), [0x3f, 0x3e]);
    assert_eq!(bus.writes_to(dfs::ctl(ARM_DFS)), [1 << 1, 0]);
    assert_eq!(bus.peek(dfs::dvport(ARM_DFS, 0)), (1 << 8) | 9);
    assert_eq!(clocks.get_rate(ids::ARM_PLL_DFS1), Ok(800 * MHZ));
}

#[test]
fn dfs_running_resets_one_port() {
    let bus = FakeBus::new(&BASES);
    // Port 0 was brought up by an earlier stage.
    bus.poke(dfs::portsr(ARM_DFS), 0x1);
    bus.poke(dfs::portreset(ARM_DFS), 0x3e);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    arm_pll(&clocks);
    clocks.set_rate(ids::ARM_PLL_DFS2, 800 * MHZ).unwrap();
    clocks.enable(ids::ARM_PLL_DFS2).unwrap();

    assert_eq!(bus.writes_to(dfs::portreset(ARM_DFS)), [0x3e, 0x3c]);
    assert!(bus.writes_to(dfs::ctl(ARM_DFS)).is_empty());
    assert_eq!(bus.peek(dfs::portsr(ARM_DFS)), 0x3);
}

#[test]
fn dfs_loss_of_lock() {
    let bus = FakeBus::new(&BASES);
    bus.dfs_lose_lock.set(true);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    arm_pll(&clocks);
    clocks.set_rate(ids::ARM_PLL_DFS1, 800 * MHZ).unwrap();
    assert_eq!(clocks.enable(ids::ARM_PLL_DFS1), Err(ClockError::LockLost));
}

#[test]
fn partition_power_up() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_parent(ids::CGM0_MUX0, ids::FIRC).unwrap();
    clocks.enable(ids::XBAR_2X).unwrap();

    let log = bus.write_log();
    let first = |addr: usize| log.iter().position(|(a, _)| *a == addr).unwrap();
    assert!(first(mc_me::pconf(MC_ME, 3)) < first(rdc::ctrl(RDC, 3)));
    assert!(first(rdc::ctrl(RDC, 3)) < first(rgm::prst(RGM, 3)));

    let keys: Vec<u32> = bus.writes_to(mc_me::ctl_key(MC_ME));
    assert_eq!(keys, [0x5af0, 0xa50f, 0x5af0, 0xa50f, 0x5af0, 0xa50f]);
    assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 3)), 1);
    assert_eq!(bus.peek(mc_me::stat(MC_ME, 3)) & 1, 1);
    assert_eq!(bus.peek(rdc::ctrl(RDC, 3)), 0);
    assert_eq!(bus.peek(rgm::prst(RGM, 3)), 0);
    assert_eq!(clocks.get_rate(ids::XBAR_2X), Ok(48 * MHZ));

    let writes = bus.writes();
    clocks.enable(ids::XBAR_2X).unwrap();
    assert_eq!(bus.writes(), writes);
}

#[test]
fn early_clocks() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.enable_early_clocks(&EARLY).unwrap();

    assert_eq!(clocks.get_rate(ids::A53_CORE), Ok(1000 * MHZ));
    assert_eq!(clocks.get_rate(ids::A53_CORE_DIV2), Ok(500 * MHZ));
    assert_eq!(clocks.get_rate(ids::XBAR_2X), Ok(800 * MHZ));
    assert_eq!(clocks.get_rate(ids::XBAR), Ok(400 * MHZ));
    assert_eq!(clocks.get_rate(ids::LIN_BAUD), Ok(133_333_333));
    assert_eq!(clocks.get_rate(ids::DDR), Ok(800 * MHZ));
    assert_eq!(bus.pll_locks(), 3);

    let writes = bus.writes();
    clocks.enable_early_clocks(&EARLY).unwrap();
    assert_eq!(bus.writes(), writes);
}

#[test]
fn assignments_stop_at_first_error() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    let table = [
        Assignment::Rate(ids::FXOSC, 40 * MHZ),
        Assignment::Rate(ids::XBAR, MHZ),
        Assignment::Enable(ids::FXOSC),
    ];
    assert_eq!(clocks.apply_assignments(&table), Err(ClockError::OutOfRange));
    assert_eq!(bus.writes(), 0);
    assert_eq!(clocks.get_rate(ids::FXOSC), Ok(40 * MHZ));
}

#[test]
fn freq_grade_from_siul2() {
    const GRADES: [FreqGrade; 1] = [FreqGrade {
        midr2_freq: 0xa,
        a53: 800 * MHZ,
        arm_pll_vco: 1600 * MHZ,
        xbar_2x: 800 * MHZ,
    }];

    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    assert_eq!(clocks.read_freq_grade(&GRADES), Ok(None));
    bus.poke(siul2::midr2(SIUL2), 0xa << 16);
    let grade = clocks.read_freq_grade(&GRADES).unwrap().unwrap();
    assert_eq!(grade.a53, 800 * MHZ);

    let graded = EARLY.graded(grade);
    assert_eq!(graded.arm_pll_vco, 1600 * MHZ);
    assert_eq!(graded.ddr, EARLY.ddr);
}

#[test]
fn missing_block_is_reported() {
    let mut bases = BASES;
    bases.ddr_pll = None;
    let bus = FakeBus::new(&bases);
    let state = state();
    let clocks: Clocks<'_, FakeBus, StrictSpecs> =
        Clocks::new(&bus, &bases, &TREE, &state).unwrap();

    clocks.set_parent(ids::DDR_PLL_MUX, ids::FXOSC).unwrap();
    clocks.set_rate(ids::FXOSC, 40 * MHZ).unwrap();
    clocks.set_rate(ids::DDR_PLL_VCO, 1600 * MHZ).unwrap();
    assert_eq!(clocks.enable(ids::DDR_PLL_VCO), Err(ClockError::InvalidParent));
}

#[test]
fn rate_dump_lists_every_clock() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);

    clocks.set_parent(ids::CGM0_MUX4, ids::FIRC).unwrap();
    clocks.set_rate(ids::FTM0_REF, 24 * MHZ).unwrap();
    clocks.enable(ids::FTM0_REF).unwrap();

    let mut dump = String::new();
    clocks.dump_rates(&mut dump).unwrap();
    assert_eq!(dump.lines().count(), COUNT);
    assert!(dump.lines().any(|line| line == format!("{:<30} : 48000000 Hz", "firc")));
    assert!(dump.lines().any(|line| line == format!("{:<30} : 24000000 Hz", "ftm0_ref")));
    // Rates nobody configured are listed as zero.
    assert!(dump.lines().any(|line| line == format!("{:<30} : 0 Hz", "fxosc")));
}

#[test]
fn scmi_ids_resolve_to_tree_clocks() {
    assert_eq!(SCMI.validate(&TREE), Ok(()));
    assert_eq!(
        SCMI.resolve(scmi::ids::A53),
        Some(ScmiClock::Clock(ids::A53_CORE))
    );
    assert_eq!(
        SCMI.resolve(scmi::ids::FCCU_SAFE),
        Some(ScmiClock::Clock(ids::FIRC))
    );
    assert_eq!(
        SCMI.resolve(ScmiId(scmi::PLATFORM_BASE)),
        Some(ScmiClock::Clock(ids::XBAR_2X))
    );
    assert_eq!(SCMI.resolve(ScmiId(scmi::PLATFORM_BASE + 1)), None);

    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);
    let agent = ScmiClocks::new(&clocks, &SCMI).unwrap();

    clocks.set_parent(ids::CGM0_MUX4, ids::FIRC).unwrap();
    assert_eq!(agent.set_rate(scmi::ids::FTM0_EXT, 24 * MHZ), Ok(24 * MHZ));
    agent.enable(scmi::ids::FTM0_EXT).unwrap();
    assert_eq!(bus.peek(cgm::dc(CGM0, 4, 0)), (1 << 31) | (1 << 16));
    assert_eq!(agent.get_rate(scmi::ids::FTM0_EXT), Ok(24 * MHZ));
    assert_eq!(agent.get_rate(scmi::ids::RTC_FIRC), Ok(48 * MHZ));
}

#[test]
fn scmi_compound_clock_selects_its_source() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);
    let agent = ScmiClocks::new(&clocks, &SCMI).unwrap();

    periph_pll(&clocks, 2000 * MHZ);
    clocks.set_rate(ids::PERIPH_PLL_PHI5, 125 * MHZ).unwrap();
    assert_eq!(agent.set_rate(scmi::ids::GMAC0_TX_RGMII, 125 * MHZ), Ok(125 * MHZ));
    agent.enable(scmi::ids::GMAC0_TX_RGMII).unwrap();

    assert_eq!((bus.peek(cgm::csc(CGM0, 10)) >> 24) & 0x3f, ids::PERIPH_PLL_PHI5.0);
    assert_eq!(bus.peek(plldig::pllodiv(PERIPH_PLL, 5)), (1 << 31) | (15 << 16));
    assert_eq!(bus.peek(cgm::dc(CGM0, 10, 0)), 1 << 31);
    assert_eq!(agent.get_rate(scmi::ids::GMAC0_TX_RGMII), Ok(125 * MHZ));
    assert_eq!(agent.get_rate(scmi::ids::GMAC0_TX_SGMII), Ok(125 * MHZ));

    // The SGMII variant of the same MAC rewires the mux.
    clocks.set_rate(ids::SERDES0_LANE0_TX, 125 * MHZ).unwrap();
    agent.enable(scmi::ids::GMAC0_TX_SGMII).unwrap();
    assert_eq!((bus.peek(cgm::csc(CGM0, 10)) >> 24) & 0x3f, ids::SERDES0_LANE0_TX.0);
    assert_eq!(agent.get_rate(scmi::ids::GMAC0_TX_SGMII), Ok(125 * MHZ));
}

#[test]
fn scmi_rejects_parents_and_unknown_ids() {
    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);
    let agent = ScmiClocks::new(&clocks, &SCMI).unwrap();

    assert_eq!(
        agent.set_parent(scmi::ids::SPI_MODULE, scmi::ids::RTC_FIRC),
        Err(ClockError::InvalidParent)
    );
    assert_eq!(agent.enable(ScmiId(200)), Err(ClockError::UnknownClockId));
    assert_eq!(agent.get_rate(ScmiId(200)), Err(ClockError::UnknownClockId));
    assert_eq!(agent.set_rate(ScmiId(200), MHZ), Err(ClockError::UnknownClockId));
    assert_eq!(bus.writes(), 0);
}

#[test]
fn scmi_table_must_match_tree() {
    static BROKEN: [ScmiClock; 1] = [ScmiClock::Compound {
        clock: ids::GMAC0_RX,
        mux: ids::CGM0_MUX11,
        source: ids::PERIPH_PLL_PHI5,
    }];
    static TABLE: ScmiTable = ScmiTable::new(&scmi::COMMON, &BROKEN);

    let bus = FakeBus::new(&BASES);
    let state = state();
    let clocks = engine::<StrictSpecs>(&bus, &state);
    assert_eq!(
        ScmiClocks::new(&clocks, &TABLE).err(),
        Some(ClockError::InvalidParent)
    );

    static MISSING: [ScmiClock; 1] = [ScmiClock::Clock(ClockId(999))];
    static SHORT: ScmiTable = ScmiTable::new(&scmi::COMMON, &MISSING);
    assert_eq!(SHORT.validate(&TREE), Err(ClockError::UnknownClockId));
}
