// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! SCMI clock ids of the S32G274A: USB and the PFE.
//!
//! Each PFE MAC has an SGMII and an RGMII variant of its RX and TX clocks.

use s32cc::node::ClockId;
use s32cc::scmi::{ScmiClock, ScmiTable, COMMON};
use s32cc::tree::ids as common;

use crate::tree::ids as clk;

pub mod ids {
    use s32cc::scmi::{ScmiId, PLATFORM_BASE};

    pub const USB_MEM: ScmiId = ScmiId(PLATFORM_BASE);
    pub const USB_LOW: ScmiId = ScmiId(PLATFORM_BASE + 1);
    pub const PFE_AXI: ScmiId = ScmiId(PLATFORM_BASE + 2);
    pub const PFE_APB: ScmiId = ScmiId(PLATFORM_BASE + 3);
    pub const PFE_TS: ScmiId = ScmiId(PLATFORM_BASE + 4);
    pub const PFE0_RX_SGMII: ScmiId = ScmiId(PLATFORM_BASE + 5);
    pub const PFE0_TX_SGMII: ScmiId = ScmiId(PLATFORM_BASE + 6);
    pub const PFE0_RX_RGMII: ScmiId = ScmiId(PLATFORM_BASE + 7);
    pub const PFE0_TX_RGMII: ScmiId = ScmiId(PLATFORM_BASE + 8);
    pub const PFE1_RX_SGMII: ScmiId = ScmiId(PLATFORM_BASE + 9);
    pub const PFE1_TX_SGMII: ScmiId = ScmiId(PLATFORM_BASE + 10);
    pub const PFE1_RX_RGMII: ScmiId = ScmiId(PLATFORM_BASE + 11);
    pub const PFE1_TX_RGMII: ScmiId = ScmiId(PLATFORM_BASE + 12);
    pub const PFE2_RX_SGMII: ScmiId = ScmiId(PLATFORM_BASE + 13);
    pub const PFE2_TX_SGMII: ScmiId = ScmiId(PLATFORM_BASE + 14);
    pub const PFE2_RX_RGMII: ScmiId = ScmiId(PLATFORM_BASE + 15);
    pub const PFE2_TX_RGMII: ScmiId = ScmiId(PLATFORM_BASE + 16);
}

const fn mac(clock: ClockId, mux: ClockId, source: ClockId) -> ScmiClock {
    ScmiClock::Compound { clock, mux, source }
}

static PLATFORM: [ScmiClock; 17] = [
    ScmiClock::Clock(common::XBAR_DIV4),
    ScmiClock::Clock(common::SIRC),
    ScmiClock::Clock(clk::PFE_SYS),
    ScmiClock::Clock(clk::PFE_SYS),
    ScmiClock::Clock(common::GMAC0_TS),
    mac(clk::PFE_MAC0_RX, clk::CGM2_MUX4, clk::SERDES1_LANE0_CDR),
    mac(clk::PFE_MAC0_TX, clk::CGM2_MUX1, clk::SERDES1_LANE0_TX),
    mac(clk::PFE_MAC0_RX, clk::CGM2_MUX4, clk::PFE_MAC0_EXT_RX),
    mac(clk::PFE_MAC0_TX, clk::CGM2_MUX1, common::PERIPH_PLL_PHI5),
    mac(clk::PFE_MAC1_RX, clk::CGM2_MUX5, clk::SERDES1_LANE1_CDR),
    mac(clk::PFE_MAC1_TX, clk::CGM2_MUX2, clk::SERDES1_LANE1_TX),
    mac(clk::PFE_MAC1_RX, clk::CGM2_MUX5, clk::PFE_MAC1_EXT_RX),
    mac(clk::PFE_MAC1_TX, clk::CGM2_MUX2, common::PERIPH_PLL_PHI5),
    mac(clk::PFE_MAC2_RX, clk::CGM2_MUX6, clk::SERDES0_LANE1_CDR),
    mac(clk::PFE_MAC2_TX, clk::CGM2_MUX3, clk::SERDES0_LANE1_TX),
    mac(clk::PFE_MAC2_RX, clk::CGM2_MUX6, clk::PFE_MAC2_EXT_RX),
    mac(clk::PFE_MAC2_TX, clk::CGM2_MUX3, common::PERIPH_PLL_PHI5),
];

pub static SCMI: ScmiTable = ScmiTable::new(&COMMON, &PLATFORM);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TREE;

    #[test]
    fn table_matches_tree() {
        assert_eq!(SCMI.validate(&TREE), Ok(()));
        assert_eq!(
            SCMI.resolve(ids::PFE_APB),
            Some(ScmiClock::Clock(clk::PFE_SYS))
        );
        assert_eq!(SCMI.resolve(ids::PFE2_TX_RGMII).map(|c| c.clock()), Some(clk::PFE_MAC2_TX));
        assert_eq!(SCMI.resolve(s32cc::scmi::ScmiId(ids::PFE2_TX_RGMII.0 + 1)), None);
    }
}
