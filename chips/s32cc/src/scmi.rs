// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clocks as seen by SCMI agents.
//!
//! An agent names a clock by its SCMI id, not by its id in the tree. Ids
//! below [`PLATFORM_BASE`] are shared by the family and resolve through
//! [`COMMON`]; the rest are defined by each SoC. Some ids describe one
//! wiring of a clock, for example a MAC fed from its SGMII lane rather than
//! from an RGMII pin. Those are [`ScmiClock::Compound`] and select their
//! source before the clock is touched.
//!
//! Parents are owned by the table, so agents cannot reparent a clock.

use log::error;

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::node::{ClockId, ClockTree};
use crate::tree::ids as clk;

/// First SoC-specific SCMI id.
pub const PLATFORM_BASE: u32 = 53;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScmiId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScmiClock {
    Clock(ClockId),
    /// `clock`, once `mux` selects `source`
    Compound {
        clock: ClockId,
        mux: ClockId,
        source: ClockId,
    },
}

impl ScmiClock {
    /// The tree clock behind this id.
    pub fn clock(&self) -> ClockId {
        match *self {
            ScmiClock::Clock(clock) | ScmiClock::Compound { clock, .. } => clock,
        }
    }
}

/// SCMI id to tree clock translation for one SoC.
pub struct ScmiTable {
    common: &'static [ScmiClock],
    platform: &'static [ScmiClock],
}

impl ScmiTable {
    pub const fn new(common: &'static [ScmiClock], platform: &'static [ScmiClock]) -> Self {
        ScmiTable { common, platform }
    }

    pub fn resolve(&self, id: ScmiId) -> Option<ScmiClock> {
        match id.0.checked_sub(PLATFORM_BASE) {
            None => self.common.get(id.0 as usize).copied(),
            Some(index) => self.platform.get(index as usize).copied(),
        }
    }

    /// Check that every entry names a clock of `tree`, and that compound
    /// entries name a mux able to select their source.
    pub fn validate(&self, tree: &ClockTree) -> Result<(), ClockError> {
        for (index, entry) in self.common.iter().chain(self.platform.iter()).enumerate() {
            let (_, clock) = tree.get(entry.clock()).map_err(|err| {
                error!("scmi entry {}: clock {} not in tree", index, entry.clock().0);
                err
            })?;
            if let ScmiClock::Compound { mux, source, .. } = *entry {
                let (_, mux_clock) = tree.get(mux)?;
                let selectable = mux_clock
                    .mux()
                    .is_some_and(|(mux, _)| mux.source(source).is_some());
                if !selectable {
                    error!(
                        "scmi entry {} ({}): {} cannot select clock {}",
                        index, clock.name, mux_clock.name, source.0
                    );
                    return Err(ClockError::InvalidParent);
                }
            }
        }
        Ok(())
    }
}

/// Family-wide SCMI ids.
pub mod ids {
    use super::ScmiId;

    pub const A53: ScmiId = ScmiId(0);
    pub const SERDES_AXI: ScmiId = ScmiId(1);
    pub const SERDES_AUX: ScmiId = ScmiId(2);
    pub const SERDES_APB: ScmiId = ScmiId(3);
    pub const SERDES_REF: ScmiId = ScmiId(4);
    pub const FTM0_SYS: ScmiId = ScmiId(5);
    pub const FTM0_EXT: ScmiId = ScmiId(6);
    pub const FTM1_SYS: ScmiId = ScmiId(7);
    pub const FTM1_EXT: ScmiId = ScmiId(8);
    pub const FLEXCAN_REG: ScmiId = ScmiId(9);
    pub const FLEXCAN_SYS: ScmiId = ScmiId(10);
    pub const FLEXCAN_CAN: ScmiId = ScmiId(11);
    pub const FLEXCAN_TS: ScmiId = ScmiId(12);
    pub const LINFLEX_XBAR: ScmiId = ScmiId(13);
    pub const LINFLEX_LIN: ScmiId = ScmiId(14);
    pub const GMAC0_RX_SGMII: ScmiId = ScmiId(15);
    pub const GMAC0_TX_SGMII: ScmiId = ScmiId(16);
    pub const GMAC0_RX_RGMII: ScmiId = ScmiId(17);
    pub const GMAC0_TX_RGMII: ScmiId = ScmiId(18);
    pub const GMAC0_TS: ScmiId = ScmiId(19);
    pub const GMAC0_AXI: ScmiId = ScmiId(20);
    pub const SPI_REG: ScmiId = ScmiId(21);
    pub const SPI_MODULE: ScmiId = ScmiId(22);
    pub const QSPI_REG: ScmiId = ScmiId(23);
    pub const QSPI_AHB: ScmiId = ScmiId(24);
    pub const QSPI_FLASH2X: ScmiId = ScmiId(25);
    pub const QSPI_FLASH1X: ScmiId = ScmiId(26);
    pub const USDHC_AHB: ScmiId = ScmiId(27);
    pub const USDHC_MODULE: ScmiId = ScmiId(28);
    pub const USDHC_CORE: ScmiId = ScmiId(29);
    pub const USDHC_MOD32K: ScmiId = ScmiId(30);
    pub const DDR_REG: ScmiId = ScmiId(31);
    pub const DDR_PLL_REF: ScmiId = ScmiId(32);
    pub const DDR_AXI: ScmiId = ScmiId(33);
    pub const SRAM_AXI: ScmiId = ScmiId(34);
    pub const SRAM_REG: ScmiId = ScmiId(35);
    pub const I2C_REG: ScmiId = ScmiId(36);
    pub const I2C_MODULE: ScmiId = ScmiId(37);
    pub const RTC_REG: ScmiId = ScmiId(38);
    pub const RTC_SIRC: ScmiId = ScmiId(39);
    pub const RTC_FIRC: ScmiId = ScmiId(40);
    pub const SIUL2_REG: ScmiId = ScmiId(41);
    pub const SIUL2_FILTER: ScmiId = ScmiId(42);
    pub const CRC_REG: ScmiId = ScmiId(43);
    pub const CRC_MODULE: ScmiId = ScmiId(44);
    pub const EIM0_REG: ScmiId = ScmiId(45);
    pub const EIM0_MODULE: ScmiId = ScmiId(46);
    pub const EIM123_REG: ScmiId = ScmiId(47);
    pub const EIM123_MODULE: ScmiId = ScmiId(48);
    pub const EIM_REG: ScmiId = ScmiId(49);
    pub const EIM_MODULE: ScmiId = ScmiId(50);
    pub const FCCU_MODULE: ScmiId = ScmiId(51);
    pub const FCCU_SAFE: ScmiId = ScmiId(52);
}

const fn plain(clock: ClockId) -> ScmiClock {
    ScmiClock::Clock(clock)
}

const fn compound(clock: ClockId, mux: ClockId, source: ClockId) -> ScmiClock {
    ScmiClock::Compound { clock, mux, source }
}

/// Indexed by the ids of [`ids`].
pub static COMMON: [ScmiClock; PLATFORM_BASE as usize] = [
    plain(clk::A53_CORE),
    plain(clk::XBAR),
    plain(clk::FIRC),
    plain(clk::XBAR_DIV3),
    plain(clk::SERDES_REF),
    plain(clk::PER),
    plain(clk::FTM0_REF),
    plain(clk::PER),
    plain(clk::FTM1_REF),
    plain(clk::XBAR_DIV3),
    plain(clk::XBAR_DIV3),
    plain(clk::CAN_PE),
    plain(clk::XBAR_DIV2),
    plain(clk::LINFLEXD),
    plain(clk::LIN_BAUD),
    compound(clk::GMAC0_RX, clk::CGM0_MUX11, clk::SERDES0_LANE0_CDR),
    compound(clk::GMAC0_TX, clk::CGM0_MUX10, clk::SERDES0_LANE0_TX),
    compound(clk::GMAC0_RX, clk::CGM0_MUX11, clk::GMAC0_EXT_RX),
    compound(clk::GMAC0_TX, clk::CGM0_MUX10, clk::PERIPH_PLL_PHI5),
    compound(clk::GMAC0_TS, clk::CGM0_MUX9, clk::PERIPH_PLL_PHI4),
    plain(clk::XBAR),
    plain(clk::SPI),
    plain(clk::SPI),
    plain(clk::XBAR_DIV3),
    plain(clk::XBAR_DIV3),
    plain(clk::QSPI_2X),
    plain(clk::QSPI),
    plain(clk::XBAR),
    plain(clk::XBAR_DIV3),
    plain(clk::SDHC),
    plain(clk::SIRC),
    plain(clk::XBAR_DIV3),
    plain(clk::DDR),
    plain(clk::DDR),
    plain(clk::XBAR),
    plain(clk::XBAR_DIV3),
    plain(clk::XBAR_DIV3),
    plain(clk::XBAR_DIV3),
    plain(clk::XBAR_DIV6),
    plain(clk::SIRC),
    plain(clk::FIRC),
    plain(clk::XBAR_DIV6),
    plain(clk::FIRC),
    plain(clk::XBAR_DIV3),
    plain(clk::XBAR_DIV3),
    plain(clk::A53_CORE_DIV10),
    plain(clk::A53_CORE_DIV10),
    plain(clk::XBAR_DIV6),
    plain(clk::XBAR_DIV6),
    plain(clk::XBAR_DIV6),
    plain(clk::XBAR_DIV6),
    plain(clk::XBAR_DIV6),
    plain(clk::FIRC),
];

/// SCMI front end of a clock engine.
pub struct ScmiClocks<'c, 'a, B: RegisterBus, C: ChipSpecs> {
    clocks: &'c Clocks<'a, B, C>,
    table: &'c ScmiTable,
}

impl<'c, 'a, B: RegisterBus, C: ChipSpecs> ScmiClocks<'c, 'a, B, C> {
    pub fn new(clocks: &'c Clocks<'a, B, C>, table: &'c ScmiTable) -> Result<Self, ClockError> {
        table.validate(clocks.tree)?;
        Ok(ScmiClocks { clocks, table })
    }

    fn resolve(&self, id: ScmiId) -> Result<ScmiClock, ClockError> {
        self.table.resolve(id).ok_or_else(|| {
            error!("scmi clock {} is not handled", id.0);
            ClockError::UnknownClockId
        })
    }

    /// Tree clock behind `id`, with a compound clock's source selected.
    fn route(&self, id: ScmiId) -> Result<ClockId, ClockError> {
        match self.resolve(id)? {
            ScmiClock::Clock(clock) => Ok(clock),
            ScmiClock::Compound { clock, mux, source } => {
                self.clocks.set_parent(mux, source)?;
                Ok(clock)
            }
        }
    }

    pub fn enable(&self, id: ScmiId) -> Result<(), ClockError> {
        let clock = self.route(id)?;
        self.clocks.enable(clock)
    }

    pub fn set_rate(&self, id: ScmiId, hz: u64) -> Result<u64, ClockError> {
        let clock = self.route(id)?;
        self.clocks.set_rate(clock, hz)
    }

    /// Rate of the clock behind `id`. Compound ids report the clock as it
    /// is currently wired, whichever variant selected its source.
    pub fn get_rate(&self, id: ScmiId) -> Result<u64, ClockError> {
        let clock = self.resolve(id)?.clock();
        self.clocks.get_rate(clock)
    }

    pub fn set_parent(&self, id: ScmiId, parent: ScmiId) -> Result<(), ClockError> {
        self.resolve(id)?;
        error!("scmi clock {}: cannot select {}, parents are fixed", id.0, parent.0);
        Err(ClockError::InvalidParent)
    }
}
