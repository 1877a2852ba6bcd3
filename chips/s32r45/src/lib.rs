// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clock tree of the NXP S32R45.

#![crate_name = "s32r45"]
#![crate_type = "rlib"]
#![no_std]

pub mod chip_specs;
pub mod scmi;
pub mod tree;

use log::{debug, error, warn};
use s32cc::{ClockError, Clocks, FreqGrade, RegisterBus};

pub use crate::chip_specs::{S32r45Specs, BASES, EARLY, GRADES};
pub use crate::scmi::SCMI;
pub use crate::tree::{clock_state, ids, CLOCK_COUNT, TREE};

pub type S32r45Clocks<'a, B> = Clocks<'a, B, S32r45Specs>;

/// Clock the cores, interconnect, console and DDR from the PLLs, within
/// the limits of the part's speed grade.
pub fn enable_early_clocks<B: RegisterBus>(
    clocks: &S32r45Clocks<'_, B>,
) -> Result<(), ClockError> {
    enable_graded_clocks(clocks, &GRADES)
}

/// [`enable_early_clocks`] with the speed grades looked up in `grades`.
pub fn enable_graded_clocks<B: RegisterBus>(
    clocks: &S32r45Clocks<'_, B>,
    grades: &[FreqGrade],
) -> Result<(), ClockError> {
    let freqs = match clocks.read_freq_grade(grades)? {
        Some(grade) => EARLY.graded(grade),
        None => {
            warn!("s32r45: unknown speed grade, using default frequencies");
            EARLY
        }
    };

    clocks.enable_early_clocks(&freqs).map_err(|err| {
        error!("s32r45: early clock setup failed: {}", err);
        err
    })?;
    debug!(
        "s32r45: A53 at {} Hz",
        clocks.get_rate(s32cc::ids::A53_CORE)?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use s32cc::freq::MHZ;
    use s32cc::registers::{cgm, mc_me, siul2};
    use s32cc::testing::FakeBus;
    use s32cc::ScmiClocks;

    const CGM2: usize = 0x4401_8000;
    const MC_ME: usize = 0x4008_8000;
    const SIUL2: usize = 0x4009_c000;

    #[test]
    fn early_clocks_open_the_xbar_chain() {
        let bus = FakeBus::new(&BASES);
        bus.poke(siul2::midr2(SIUL2), 0xa << 16);
        let state = clock_state();
        let clocks = S32r45Clocks::new(&bus, &BASES, &TREE, &state).unwrap();

        enable_early_clocks(&clocks).unwrap();

        assert_eq!(clocks.get_rate(s32cc::ids::A53_CORE), Ok(800 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::XBAR_2X), Ok(800 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::DDR), Ok(800 * MHZ));

        let blocks = (1 << 2) | (1 << 3);
        assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 3)) & blocks, blocks);
        let blocks = 0x1f << 5;
        assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 0)) & blocks, blocks);
    }

    #[test]
    fn grade_limits_the_a53_chain() {
        const SLOW: [FreqGrade; 2] = [
            FreqGrade {
                midr2_freq: 0xa,
                a53: 800 * MHZ,
                arm_pll_vco: 1600 * MHZ,
                xbar_2x: 800 * MHZ,
            },
            FreqGrade {
                midr2_freq: 0x3,
                a53: 900 * MHZ,
                arm_pll_vco: 1800 * MHZ,
                xbar_2x: 600 * MHZ,
            },
        ];

        let bus = FakeBus::new(&BASES);
        bus.poke(siul2::midr2(SIUL2), 0x3 << 16);
        let state = clock_state();
        let clocks = S32r45Clocks::new(&bus, &BASES, &TREE, &state).unwrap();

        enable_graded_clocks(&clocks, &SLOW).unwrap();

        assert_eq!(clocks.get_rate(s32cc::ids::ARM_PLL_VCO), Ok(1800 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::A53_CORE), Ok(900 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::XBAR_2X), Ok(600 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::XBAR), Ok(300 * MHZ));
        // Ungraded frequencies keep their defaults.
        assert_eq!(clocks.get_rate(s32cc::ids::DDR), Ok(EARLY.ddr));
        assert_eq!(
            clocks.get_rate(s32cc::ids::LINFLEXD),
            Ok(66_666_666)
        );
    }

    #[test]
    fn unknown_grade_keeps_defaults() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32r45Clocks::new(&bus, &BASES, &TREE, &state).unwrap();

        assert_eq!(clocks.read_freq_grade(&GRADES), Ok(None));
        enable_early_clocks(&clocks).unwrap();
        assert_eq!(clocks.get_rate(s32cc::ids::A53_CORE), Ok(EARLY.a53));
    }

    #[test]
    fn lax_from_arm_dfs4() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32r45Clocks::new(&bus, &BASES, &TREE, &state).unwrap();

        clocks
            .set_parent(s32cc::ids::ARM_PLL_MUX, s32cc::ids::FXOSC)
            .unwrap();
        clocks.set_rate(s32cc::ids::FXOSC, 40 * MHZ).unwrap();
        clocks.set_rate(s32cc::ids::ARM_PLL_VCO, 1600 * MHZ).unwrap();
        clocks.set_rate(ids::ARM_PLL_DFS4_2, 400 * MHZ).unwrap();
        clocks.set_parent(ids::CGM2_MUX1, ids::ARM_PLL_DFS4_2).unwrap();
        clocks.set_rate(ids::ACCEL4, 400 * MHZ).unwrap();
        clocks.enable(ids::ACCEL4).unwrap();

        assert_eq!(clocks.get_rate(s32cc::ids::ARM_PLL_DFS4), Ok(400 * MHZ));
        assert_eq!(clocks.get_rate(ids::ACCEL4), Ok(400 * MHZ));
        assert_eq!(bus.peek(cgm::dc(CGM2, 1, 0)), 1 << 31);
        assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 2)), 0b11);
    }

    #[test]
    fn lax_over_scmi() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32r45Clocks::new(&bus, &BASES, &TREE, &state).unwrap();
        let agent = ScmiClocks::new(&clocks, &SCMI).unwrap();

        assert_eq!(
            agent.set_rate(scmi::ids::LAX_MODULE, 500 * MHZ),
            Err(ClockError::OutOfRange)
        );

        clocks
            .set_parent(s32cc::ids::ARM_PLL_MUX, s32cc::ids::FXOSC)
            .unwrap();
        clocks.set_rate(s32cc::ids::FXOSC, 40 * MHZ).unwrap();
        clocks.set_rate(s32cc::ids::ARM_PLL_VCO, 1600 * MHZ).unwrap();
        clocks.set_rate(ids::ARM_PLL_DFS4_2, 400 * MHZ).unwrap();
        clocks.set_parent(ids::CGM2_MUX1, ids::ARM_PLL_DFS4_2).unwrap();
        assert_eq!(
            agent.set_rate(scmi::ids::LAX_MODULE, 400 * MHZ),
            Ok(400 * MHZ)
        );
        agent.enable(scmi::ids::LAX_MODULE).unwrap();
        assert_eq!(agent.get_rate(scmi::ids::LAX_MODULE), Ok(400 * MHZ));
        assert_eq!(
            agent.set_parent(scmi::ids::SPT_MODULE, scmi::ids::SPT_AXI),
            Err(ClockError::InvalidParent)
        );
        assert_eq!(
            SCMI.resolve(scmi::ids::SPT_MODULE).map(|c| c.clock()),
            Some(ids::ACCEL3_DIV3)
        );
    }

    #[test]
    fn accel4_rate_is_bounded() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32r45Clocks::new(&bus, &BASES, &TREE, &state).unwrap();

        assert_eq!(
            clocks.set_rate(ids::ACCEL4, 500 * MHZ),
            Err(ClockError::OutOfRange)
        );
        assert_eq!(bus.writes(), 0);
    }
}
