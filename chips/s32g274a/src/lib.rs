// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clock tree of the NXP S32G274A.

#![crate_name = "s32g274a"]
#![crate_type = "rlib"]
#![no_std]

pub mod chip_specs;
pub mod scmi;
pub mod tree;

use log::{debug, error};
use s32cc::{ClockError, Clocks, RegisterBus};

pub use crate::chip_specs::{S32g274aSpecs, BASES, EARLY};
pub use crate::scmi::SCMI;
pub use crate::tree::{clock_state, ids, CLOCK_COUNT, TREE};

pub type S32g274aClocks<'a, B> = Clocks<'a, B, S32g274aSpecs>;

/// Clock the cores, interconnect, console and DDR from the PLLs.
pub fn enable_early_clocks<B: RegisterBus>(
    clocks: &S32g274aClocks<'_, B>,
) -> Result<(), ClockError> {
    clocks.enable_early_clocks(&EARLY).map_err(|err| {
        error!("s32g274a: early clock setup failed: {}", err);
        err
    })?;
    debug!(
        "s32g274a: A53 at {} Hz",
        clocks.get_rate(s32cc::ids::A53_CORE)?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use s32cc::freq::MHZ;
    use s32cc::registers::{cgm, mc_me};
    use s32cc::testing::FakeBus;
    use s32cc::ScmiClocks;

    const CGM2: usize = 0x4401_8000;
    const MC_ME: usize = 0x4008_8000;

    #[test]
    fn early_clocks() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32g274aClocks::new(&bus, &BASES, &TREE, &state).unwrap();

        enable_early_clocks(&clocks).unwrap();

        assert_eq!(clocks.get_rate(s32cc::ids::A53_CORE), Ok(1000 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::XBAR_2X), Ok(800 * MHZ));
        assert_eq!(clocks.get_rate(s32cc::ids::LINFLEXD), Ok(66_666_666));
        assert_eq!(clocks.get_rate(s32cc::ids::DDR), Ok(800 * MHZ));
    }

    #[test]
    fn pfe_engine() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32g274aClocks::new(&bus, &BASES, &TREE, &state).unwrap();

        clocks.set_parent(ids::CGM2_MUX0, s32cc::ids::FIRC).unwrap();
        assert_eq!(clocks.set_rate(ids::PFE_PE, 24 * MHZ), Ok(24 * MHZ));
        clocks.enable(ids::PFE_SYS).unwrap();

        assert_eq!(bus.peek(cgm::dc(CGM2, 0, 0)), (1 << 31) | (1 << 16));
        assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 2)), 1 << 3);
        assert_eq!(bus.peek(mc_me::stat(MC_ME, 2)) & 1, 1);
        assert_eq!(clocks.get_rate(ids::PFE_PE), Ok(24 * MHZ));
        assert_eq!(clocks.get_rate(ids::PFE_SYS), Ok(12 * MHZ));
    }

    #[test]
    fn pfe_mac_from_external_clock() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32g274aClocks::new(&bus, &BASES, &TREE, &state).unwrap();

        clocks
            .set_parent(ids::CGM2_MUX1, ids::PFE_MAC0_EXT_TX)
            .unwrap();
        assert_eq!(
            clocks.enable(ids::PFE_MAC0_TX),
            Err(ClockError::Unconfigured)
        );

        clocks.set_rate(ids::PFE_MAC0_EXT_TX, 125 * MHZ).unwrap();
        clocks.set_rate(ids::PFE_MAC0_TX, 125 * MHZ).unwrap();
        clocks.enable(ids::PFE_MAC0_TX).unwrap();

        assert_eq!(
            (bus.peek(cgm::csc(CGM2, 1)) >> 24) & 0x3f,
            ids::PFE_MAC0_EXT_TX.0
        );
        assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 2)), 1);
        assert_eq!(clocks.get_rate(ids::PFE_MAC0_TX), Ok(125 * MHZ));
    }

    #[test]
    fn pfe_mac_over_scmi() {
        let bus = FakeBus::new(&BASES);
        let state = clock_state();
        let clocks = S32g274aClocks::new(&bus, &BASES, &TREE, &state).unwrap();
        let agent = ScmiClocks::new(&clocks, &SCMI).unwrap();

        clocks.set_rate(ids::SERDES1_LANE0_TX, 125 * MHZ).unwrap();
        assert_eq!(
            agent.set_rate(scmi::ids::PFE0_TX_SGMII, 125 * MHZ),
            Ok(125 * MHZ)
        );
        agent.enable(scmi::ids::PFE0_TX_SGMII).unwrap();

        assert_eq!(
            (bus.peek(cgm::csc(CGM2, 1)) >> 24) & 0x3f,
            ids::SERDES1_LANE0_TX.0
        );
        assert_eq!(bus.peek(mc_me::cofb0_clken(MC_ME, 2)), 1);
        assert_eq!(agent.get_rate(scmi::ids::PFE0_TX_RGMII), Ok(125 * MHZ));
        assert_eq!(
            agent.set_parent(scmi::ids::PFE0_TX_SGMII, scmi::ids::PFE_TS),
            Err(ClockError::InvalidParent)
        );
    }
}
