// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clocks shared by every S32CC SoC.
//!
//! [`COMMON`] is the first segment of each SoC clock tree. SoC crates append
//! a second segment with the clocks only they have, and define the three
//! clocks of [`ids`] whose gating differs between SoCs (`XBAR_2X`, `PER`
//! and `CAN_PE`).

use crate::freq::MHZ;
use crate::node::{
    cgm_src, src, CgmDiv, CgmInstance, Clock, Dfs, DfsDiv, DfsInstance, FixedClock, FixedDiv,
    Module, Mux, MuxBlock, MuxSource, OscKind, Oscillator, PartBlock, Pll, PllDiv, PllInstance,
};

/// Clock identifiers.
///
/// Clocks that can feed a MC_CGM mux have ids below 64 and the id doubles
/// as the selector value. Internal clocks start at 64. Ids from 46 to 63
/// and from 128 upwards are left to SoC crates.
pub mod ids {
    use crate::node::ClockId;

    pub const FIRC: ClockId = ClockId(0);
    pub const SIRC: ClockId = ClockId(1);
    pub const FXOSC: ClockId = ClockId(2);
    pub const ARM_PLL_PHI0: ClockId = ClockId(4);
    pub const ARM_PLL_DFS1: ClockId = ClockId(12);
    pub const ARM_PLL_DFS2: ClockId = ClockId(13);
    pub const ARM_PLL_DFS3: ClockId = ClockId(14);
    pub const ARM_PLL_DFS4: ClockId = ClockId(15);
    pub const ARM_PLL_DFS5: ClockId = ClockId(16);
    pub const ARM_PLL_DFS6: ClockId = ClockId(17);
    pub const PERIPH_PLL_PHI0: ClockId = ClockId(18);
    pub const PERIPH_PLL_PHI1: ClockId = ClockId(19);
    pub const PERIPH_PLL_PHI2: ClockId = ClockId(20);
    pub const PERIPH_PLL_PHI3: ClockId = ClockId(21);
    pub const PERIPH_PLL_PHI4: ClockId = ClockId(22);
    pub const PERIPH_PLL_PHI5: ClockId = ClockId(23);
    pub const PERIPH_PLL_PHI6: ClockId = ClockId(24);
    pub const PERIPH_PLL_PHI7: ClockId = ClockId(25);
    pub const PERIPH_PLL_DFS1: ClockId = ClockId(26);
    pub const PERIPH_PLL_DFS2: ClockId = ClockId(27);
    pub const PERIPH_PLL_DFS3: ClockId = ClockId(28);
    pub const PERIPH_PLL_DFS4: ClockId = ClockId(29);
    pub const PERIPH_PLL_DFS5: ClockId = ClockId(30);
    pub const PERIPH_PLL_DFS6: ClockId = ClockId(31);
    pub const ACCEL_PLL_PHI0: ClockId = ClockId(32);
    pub const ACCEL_PLL_PHI1: ClockId = ClockId(33);
    pub const FTM0_EXT_REF: ClockId = ClockId(34);
    pub const FTM1_EXT_REF: ClockId = ClockId(35);
    pub const DDR_PLL_PHI0: ClockId = ClockId(36);
    pub const GMAC0_EXT_TX: ClockId = ClockId(37);
    pub const GMAC0_EXT_RX: ClockId = ClockId(38);
    pub const GMAC0_EXT_REF: ClockId = ClockId(39);
    pub const SERDES0_LANE0_TX: ClockId = ClockId(40);
    pub const SERDES0_LANE0_CDR: ClockId = ClockId(41);
    pub const GMAC0_EXT_TS: ClockId = ClockId(44);
    pub const GMAC0_REF_DIV: ClockId = ClockId(45);

    pub const ARM_PLL_MUX: ClockId = ClockId(64);
    pub const ARM_PLL_VCO: ClockId = ClockId(65);
    pub const ARM_DFS: ClockId = ClockId(66);
    pub const CGM1_MUX0: ClockId = ClockId(67);
    pub const A53_CORE: ClockId = ClockId(68);
    pub const A53_CORE_DIV2: ClockId = ClockId(69);
    pub const A53_CORE_DIV10: ClockId = ClockId(70);
    pub const CGM0_MUX0: ClockId = ClockId(71);
    /// Defined by the SoC crate.
    pub const XBAR_2X: ClockId = ClockId(72);
    pub const XBAR: ClockId = ClockId(73);
    pub const XBAR_DIV2: ClockId = ClockId(74);
    pub const XBAR_DIV3: ClockId = ClockId(75);
    pub const XBAR_DIV4: ClockId = ClockId(76);
    pub const XBAR_DIV6: ClockId = ClockId(77);
    pub const PERIPH_PLL_MUX: ClockId = ClockId(78);
    pub const PERIPH_PLL_VCO: ClockId = ClockId(79);
    pub const PERIPH_DFS: ClockId = ClockId(80);
    pub const SERDES_REF: ClockId = ClockId(81);
    pub const CGM0_MUX3: ClockId = ClockId(82);
    pub const PER_DIV: ClockId = ClockId(83);
    /// Defined by the SoC crate.
    pub const PER: ClockId = ClockId(84);
    pub const CGM0_MUX4: ClockId = ClockId(85);
    pub const FTM0_REF: ClockId = ClockId(86);
    pub const CGM0_MUX5: ClockId = ClockId(87);
    pub const FTM1_REF: ClockId = ClockId(88);
    pub const CGM0_MUX6: ClockId = ClockId(89);
    pub const FLEXRAY_PE: ClockId = ClockId(90);
    pub const CGM0_MUX7: ClockId = ClockId(91);
    /// Defined by the SoC crate.
    pub const CAN_PE: ClockId = ClockId(92);
    pub const CGM0_MUX8: ClockId = ClockId(93);
    pub const LIN_BAUD: ClockId = ClockId(94);
    pub const LINFLEXD: ClockId = ClockId(95);
    pub const CGM0_MUX16: ClockId = ClockId(96);
    pub const SPI: ClockId = ClockId(97);
    pub const CGM0_MUX12: ClockId = ClockId(98);
    pub const QSPI_2X: ClockId = ClockId(99);
    pub const QSPI: ClockId = ClockId(100);
    pub const CGM0_MUX14: ClockId = ClockId(101);
    pub const SDHC_DIV: ClockId = ClockId(102);
    pub const SDHC: ClockId = ClockId(103);
    pub const DDR_PLL_MUX: ClockId = ClockId(104);
    pub const DDR_PLL_VCO: ClockId = ClockId(105);
    pub const CGM5_MUX0: ClockId = ClockId(106);
    pub const DDR: ClockId = ClockId(107);
    pub const ACCEL_PLL_MUX: ClockId = ClockId(108);
    pub const ACCEL_PLL_VCO: ClockId = ClockId(109);
    pub const CGM0_MUX1: ClockId = ClockId(110);
    pub const CLKOUT0: ClockId = ClockId(111);
    pub const CGM0_MUX2: ClockId = ClockId(112);
    pub const CLKOUT1: ClockId = ClockId(113);
    pub const CGM0_MUX9: ClockId = ClockId(114);
    pub const GMAC0_TS: ClockId = ClockId(115);
    pub const CGM0_MUX10: ClockId = ClockId(116);
    pub const GMAC0_TX: ClockId = ClockId(117);
    pub const CGM0_MUX11: ClockId = ClockId(118);
    pub const GMAC0_RX: ClockId = ClockId(119);
    pub const CGM0_MUX15: ClockId = ClockId(120);
    pub const GMAC0_REF: ClockId = ClockId(121);
}

const fn osc(kind: OscKind, freq: u64) -> Module {
    Module::Osc(Oscillator { kind, freq })
}

const fn external() -> Module {
    Module::Fixed(FixedClock { freq: 0 })
}

const fn cgm0(index: u32, sources: &'static [MuxSource]) -> Mux {
    Mux::new(MuxBlock::Cgm(CgmInstance::Cgm0), index, sources)
}

/// PLLCLKMUX inputs, the same on every PLL.
const PLL_REFERENCES: [MuxSource; 2] = [src(ids::FIRC, 0), src(ids::FXOSC, 1)];

const fn pll_mux(instance: PllInstance) -> Module {
    Module::Mux(Mux::new(MuxBlock::Pll(instance), 0, &PLL_REFERENCES))
}

// Oscillators

pub static FIRC: Clock = Clock::module(ids::FIRC, "firc", osc(OscKind::Firc, 48 * MHZ));
pub static SIRC: Clock = Clock::module(ids::SIRC, "sirc", osc(OscKind::Sirc, 32_000));
pub static FXOSC: Clock = Clock::module_in(
    ids::FXOSC,
    "fxosc",
    osc(OscKind::Fxosc, 0),
    8 * MHZ,
    40 * MHZ,
);

// ARM PLL, its DFS and the clusters it feeds

pub static ARM_PLL_MUX: Clock =
    Clock::module(ids::ARM_PLL_MUX, "arm_pll_mux", pll_mux(PllInstance::Arm));
pub static ARM_PLL_VCO: Clock = Clock::module_in(
    ids::ARM_PLL_VCO,
    "arm_pll_vco",
    Module::Pll(Pll {
        instance: PllInstance::Arm,
        source: ids::ARM_PLL_MUX,
        ndividers: 2,
    }),
    1300 * MHZ,
    2000 * MHZ,
);
pub static ARM_PLL_PHI0: Clock = Clock::module_in(
    ids::ARM_PLL_PHI0,
    "arm_pll_phi0",
    Module::PllDiv(PllDiv::new(ids::ARM_PLL_VCO, 0)),
    0,
    1000 * MHZ,
);
pub static ARM_DFS: Clock = Clock::module(
    ids::ARM_DFS,
    "arm_dfs",
    Module::Dfs(Dfs {
        instance: DfsInstance::Arm,
        source: ids::ARM_PLL_VCO,
    }),
);
pub static ARM_PLL_DFS1: Clock = Clock::module_in(
    ids::ARM_PLL_DFS1,
    "arm_pll_dfs1",
    Module::DfsDiv(DfsDiv::new(ids::ARM_DFS, 0)),
    0,
    800 * MHZ,
);
pub static ARM_PLL_DFS2: Clock = Clock::module_in(
    ids::ARM_PLL_DFS2,
    "arm_pll_dfs2",
    Module::DfsDiv(DfsDiv::new(ids::ARM_DFS, 1)),
    0,
    800 * MHZ,
);

pub static CGM1_MUX0: Clock = Clock::module(
    ids::CGM1_MUX0,
    "cgm1_mux0",
    Module::SharedMux(Mux::new(
        MuxBlock::Cgm(CgmInstance::Cgm1),
        0,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::ARM_PLL_PHI0),
            cgm_src(ids::ARM_PLL_DFS2),
        ],
    )),
);
pub static A53_CORE: Clock =
    Clock::child_in(ids::A53_CORE, "a53_core", ids::CGM1_MUX0, 0, 1000 * MHZ);
pub static A53_CORE_DIV2: Clock = Clock::module_in(
    ids::A53_CORE_DIV2,
    "a53_core_div2",
    Module::FixedDiv(FixedDiv::new(ids::CGM1_MUX0, 2)),
    0,
    500 * MHZ,
);
pub static A53_CORE_DIV10: Clock = Clock::module_in(
    ids::A53_CORE_DIV10,
    "a53_core_div10",
    Module::FixedDiv(FixedDiv::new(ids::CGM1_MUX0, 10)),
    0,
    100 * MHZ,
);

pub static CGM0_MUX0: Clock = Clock::module(
    ids::CGM0_MUX0,
    "cgm0_mux0",
    Module::SharedMux(cgm0(0, &[cgm_src(ids::FIRC), cgm_src(ids::ARM_PLL_DFS1)])),
);
pub static XBAR: Clock = Clock::module_in(
    ids::XBAR,
    "xbar",
    Module::FixedDiv(FixedDiv::new(ids::CGM0_MUX0, 2)),
    24 * MHZ,
    400 * MHZ,
);
pub static XBAR_DIV2: Clock = Clock::module_in(
    ids::XBAR_DIV2,
    "xbar_div2",
    Module::FixedDiv(FixedDiv::new(ids::CGM0_MUX0, 4)),
    12 * MHZ,
    200 * MHZ,
);
pub static XBAR_DIV3: Clock = Clock::module_in(
    ids::XBAR_DIV3,
    "xbar_div3",
    Module::FixedDiv(FixedDiv::new(ids::CGM0_MUX0, 6)),
    8 * MHZ,
    133_333_333,
);
pub static XBAR_DIV4: Clock = Clock::module_in(
    ids::XBAR_DIV4,
    "xbar_div4",
    Module::FixedDiv(FixedDiv::new(ids::CGM0_MUX0, 8)),
    6 * MHZ,
    100 * MHZ,
);
pub static XBAR_DIV6: Clock = Clock::module_in(
    ids::XBAR_DIV6,
    "xbar_div6",
    Module::FixedDiv(FixedDiv::new(ids::CGM0_MUX0, 12)),
    4 * MHZ,
    66_666_666,
);

// Peripheral PLL and DFS

pub static PERIPH_PLL_MUX: Clock = Clock::module(
    ids::PERIPH_PLL_MUX,
    "periph_pll_mux",
    pll_mux(PllInstance::Periph),
);
pub static PERIPH_PLL_VCO: Clock = Clock::module_in(
    ids::PERIPH_PLL_VCO,
    "periph_pll_vco",
    Module::Pll(Pll {
        instance: PllInstance::Periph,
        source: ids::PERIPH_PLL_MUX,
        ndividers: 8,
    }),
    1300 * MHZ,
    2000 * MHZ,
);

const fn periph_phi(index: u32) -> Module {
    Module::PllDiv(PllDiv::new(ids::PERIPH_PLL_VCO, index))
}

pub static PERIPH_PLL_PHI0: Clock =
    Clock::module_in(ids::PERIPH_PLL_PHI0, "periph_pll_phi0", periph_phi(0), 0, 125 * MHZ);
pub static PERIPH_PLL_PHI1: Clock =
    Clock::module_in(ids::PERIPH_PLL_PHI1, "periph_pll_phi1", periph_phi(1), 0, 80 * MHZ);
pub static PERIPH_PLL_PHI2: Clock =
    Clock::module_in(ids::PERIPH_PLL_PHI2, "periph_pll_phi2", periph_phi(2), 0, 80 * MHZ);
pub static PERIPH_PLL_PHI3: Clock = Clock::module_in(
    ids::PERIPH_PLL_PHI3,
    "periph_pll_phi3",
    periph_phi(3),
    0,
    133_333_333,
);
pub static PERIPH_PLL_PHI4: Clock =
    Clock::module_in(ids::PERIPH_PLL_PHI4, "periph_pll_phi4", periph_phi(4), 0, 200 * MHZ);
pub static PERIPH_PLL_PHI5: Clock =
    Clock::module_in(ids::PERIPH_PLL_PHI5, "periph_pll_phi5", periph_phi(5), 0, 500 * MHZ);
pub static PERIPH_PLL_PHI7: Clock =
    Clock::module_in(ids::PERIPH_PLL_PHI7, "periph_pll_phi7", periph_phi(7), 0, 100 * MHZ);

pub static PERIPH_DFS: Clock = Clock::module(
    ids::PERIPH_DFS,
    "periph_dfs",
    Module::Dfs(Dfs {
        instance: DfsInstance::Periph,
        source: ids::PERIPH_PLL_VCO,
    }),
);

const fn periph_dfs_port(index: u32) -> Module {
    Module::DfsDiv(DfsDiv::new(ids::PERIPH_DFS, index))
}

pub static PERIPH_PLL_DFS1: Clock = Clock::module_in(
    ids::PERIPH_PLL_DFS1,
    "periph_pll_dfs1",
    periph_dfs_port(0),
    532 * MHZ,
    800 * MHZ,
);
pub static PERIPH_PLL_DFS2: Clock = Clock::module_in(
    ids::PERIPH_PLL_DFS2,
    "periph_pll_dfs2",
    periph_dfs_port(1),
    0,
    800 * MHZ,
);
pub static PERIPH_PLL_DFS3: Clock = Clock::module_in(
    ids::PERIPH_PLL_DFS3,
    "periph_pll_dfs3",
    periph_dfs_port(2),
    416 * MHZ,
    800 * MHZ,
);
pub static PERIPH_PLL_DFS5: Clock = Clock::module_in(
    ids::PERIPH_PLL_DFS5,
    "periph_pll_dfs5",
    periph_dfs_port(4),
    0,
    800 * MHZ,
);

pub static SERDES_REF: Clock = Clock::child_in(
    ids::SERDES_REF,
    "serdes_ref",
    ids::PERIPH_PLL_PHI0,
    100 * MHZ,
    125 * MHZ,
);

// Peripheral clock domains of MC_CGM0

pub static FTM0_EXT_REF: Clock = Clock::module(ids::FTM0_EXT_REF, "ftm0_ext_ref", external());
pub static FTM1_EXT_REF: Clock = Clock::module(ids::FTM1_EXT_REF, "ftm1_ext_ref", external());

pub static CGM0_MUX3: Clock = Clock::module(
    ids::CGM0_MUX3,
    "cgm0_mux3",
    Module::Mux(cgm0(3, &[cgm_src(ids::FIRC), cgm_src(ids::PERIPH_PLL_PHI1)])),
);
pub static PER_DIV: Clock = Clock::module(
    ids::PER_DIV,
    "per_div",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX3, 0)),
);

pub static CGM0_MUX4: Clock = Clock::module(
    ids::CGM0_MUX4,
    "cgm0_mux4",
    Module::Mux(cgm0(
        4,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI1),
            cgm_src(ids::FTM0_EXT_REF),
        ],
    )),
);
pub static FTM0_REF: Clock = Clock::module_in(
    ids::FTM0_REF,
    "ftm0_ref",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX4, 0)),
    0,
    40 * MHZ,
);

pub static CGM0_MUX5: Clock = Clock::module(
    ids::CGM0_MUX5,
    "cgm0_mux5",
    Module::Mux(cgm0(
        5,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI1),
            cgm_src(ids::FTM1_EXT_REF),
        ],
    )),
);
pub static FTM1_REF: Clock = Clock::module_in(
    ids::FTM1_REF,
    "ftm1_ref",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX5, 0)),
    0,
    40 * MHZ,
);

pub static CGM0_MUX6: Clock = Clock::module(
    ids::CGM0_MUX6,
    "cgm0_mux6",
    Module::Mux(cgm0(
        6,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI1),
            cgm_src(ids::FXOSC),
        ],
    )),
);
pub static FLEXRAY_PE: Clock = Clock::module_in(
    ids::FLEXRAY_PE,
    "flexray_pe",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX6, 0)),
    0,
    40 * MHZ,
);

pub static CGM0_MUX7: Clock = Clock::module(
    ids::CGM0_MUX7,
    "cgm0_mux7",
    Module::Mux(cgm0(
        7,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI2),
            cgm_src(ids::FXOSC),
        ],
    )),
);

pub static CGM0_MUX8: Clock = Clock::module(
    ids::CGM0_MUX8,
    "cgm0_mux8",
    Module::Mux(cgm0(
        8,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI3),
            cgm_src(ids::FXOSC),
        ],
    )),
);
pub static LIN_BAUD: Clock =
    Clock::child_in(ids::LIN_BAUD, "lin_baud", ids::CGM0_MUX8, 0, 133_333_333);
pub static LINFLEXD: Clock = Clock::module_in(
    ids::LINFLEXD,
    "linflexd",
    Module::FixedDiv(FixedDiv::new(ids::CGM0_MUX8, 2)),
    0,
    66_666_666,
);

pub static SERDES0_LANE0_TX: Clock =
    Clock::module(ids::SERDES0_LANE0_TX, "serdes0_lane0_tx", external());
pub static SERDES0_LANE0_CDR: Clock =
    Clock::module(ids::SERDES0_LANE0_CDR, "serdes0_lane0_cdr", external());

pub static CGM0_MUX16: Clock = Clock::module(
    ids::CGM0_MUX16,
    "cgm0_mux16",
    Module::Mux(cgm0(16, &[cgm_src(ids::FIRC), cgm_src(ids::PERIPH_PLL_PHI7)])),
);
pub static SPI: Clock = Clock::child_in(ids::SPI, "spi", ids::CGM0_MUX16, 10 * MHZ, 100 * MHZ);

pub static CGM0_MUX12: Clock = Clock::module(
    ids::CGM0_MUX12,
    "cgm0_mux12",
    Module::SharedMux(cgm0(12, &[cgm_src(ids::FIRC), cgm_src(ids::PERIPH_PLL_DFS1)])),
);
pub static QSPI_2X: Clock = Clock::module_in(
    ids::QSPI_2X,
    "qspi_2x",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX12, 0)),
    0,
    400 * MHZ,
);
pub static QSPI: Clock = Clock::module_in(
    ids::QSPI,
    "qspi",
    Module::FixedDiv(FixedDiv::new(ids::QSPI_2X, 2)),
    0,
    200 * MHZ,
);

pub static CGM0_MUX14: Clock = Clock::module(
    ids::CGM0_MUX14,
    "cgm0_mux14",
    Module::Mux(cgm0(14, &[cgm_src(ids::FIRC), cgm_src(ids::PERIPH_PLL_DFS3)])),
);
pub static SDHC_DIV: Clock = Clock::module(
    ids::SDHC_DIV,
    "sdhc_div",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX14, 0)),
);
pub static SDHC: Clock = Clock::module_in(
    ids::SDHC,
    "sdhc",
    Module::PartBlock(PartBlock::new(ids::SDHC_DIV, 0, 0, true)),
    0,
    400 * MHZ,
);

// DDR

pub static DDR_PLL_MUX: Clock =
    Clock::module(ids::DDR_PLL_MUX, "ddr_pll_mux", pll_mux(PllInstance::Ddr));
pub static DDR_PLL_VCO: Clock = Clock::module_in(
    ids::DDR_PLL_VCO,
    "ddr_pll_vco",
    Module::Pll(Pll {
        instance: PllInstance::Ddr,
        source: ids::DDR_PLL_MUX,
        ndividers: 1,
    }),
    1300 * MHZ,
    1600 * MHZ,
);
pub static DDR_PLL_PHI0: Clock = Clock::module_in(
    ids::DDR_PLL_PHI0,
    "ddr_pll_phi0",
    Module::PllDiv(PllDiv::new(ids::DDR_PLL_VCO, 0)),
    0,
    800 * MHZ,
);
pub static CGM5_MUX0: Clock = Clock::module(
    ids::CGM5_MUX0,
    "cgm5_mux0",
    Module::Mux(Mux::new(
        MuxBlock::Cgm(CgmInstance::Cgm5),
        0,
        &[cgm_src(ids::FIRC), cgm_src(ids::DDR_PLL_PHI0)],
    )),
);
pub static DDR: Clock = Clock::module_in(
    ids::DDR,
    "ddr",
    Module::PartBlock(PartBlock::new(ids::CGM5_MUX0, 0, 1, true)),
    0,
    800 * MHZ,
);

// Accelerator PLL

pub static ACCEL_PLL_MUX: Clock = Clock::module(
    ids::ACCEL_PLL_MUX,
    "accel_pll_mux",
    pll_mux(PllInstance::Accel),
);
pub static ACCEL_PLL_VCO: Clock = Clock::module_in(
    ids::ACCEL_PLL_VCO,
    "accel_pll_vco",
    Module::Pll(Pll {
        instance: PllInstance::Accel,
        source: ids::ACCEL_PLL_MUX,
        ndividers: 2,
    }),
    1300 * MHZ,
    2400 * MHZ,
);
pub static ACCEL_PLL_PHI0: Clock = Clock::module_in(
    ids::ACCEL_PLL_PHI0,
    "accel_pll_phi0",
    Module::PllDiv(PllDiv::new(ids::ACCEL_PLL_VCO, 0)),
    0,
    600 * MHZ,
);
pub static ACCEL_PLL_PHI1: Clock = Clock::module_in(
    ids::ACCEL_PLL_PHI1,
    "accel_pll_phi1",
    Module::PllDiv(PllDiv::new(ids::ACCEL_PLL_VCO, 1)),
    0,
    600 * MHZ,
);

// Clock outputs

pub static CGM0_MUX1: Clock = Clock::module(
    ids::CGM0_MUX1,
    "cgm0_mux1",
    Module::Mux(cgm0(
        1,
        &[
            cgm_src(ids::FXOSC),
            cgm_src(ids::PERIPH_PLL_PHI0),
            cgm_src(ids::PERIPH_PLL_DFS2),
            cgm_src(ids::PERIPH_PLL_DFS5),
        ],
    )),
);
pub static CLKOUT0: Clock = Clock::module(
    ids::CLKOUT0,
    "clkout0",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX1, 0)),
);
pub static CGM0_MUX2: Clock = Clock::module(
    ids::CGM0_MUX2,
    "cgm0_mux2",
    Module::Mux(cgm0(
        2,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI0),
            cgm_src(ids::PERIPH_PLL_DFS2),
            cgm_src(ids::PERIPH_PLL_DFS5),
        ],
    )),
);
pub static CLKOUT1: Clock = Clock::module(
    ids::CLKOUT1,
    "clkout1",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX2, 0)),
);

// GMAC0

pub static GMAC0_EXT_TS: Clock = Clock::module(ids::GMAC0_EXT_TS, "gmac0_ext_ts", external());
pub static GMAC0_EXT_TX: Clock = Clock::module(ids::GMAC0_EXT_TX, "gmac0_ext_tx", external());
pub static GMAC0_EXT_RX: Clock = Clock::module(ids::GMAC0_EXT_RX, "gmac0_ext_rx", external());
pub static GMAC0_EXT_REF: Clock = Clock::module(ids::GMAC0_EXT_REF, "gmac0_ext_ref", external());

pub static CGM0_MUX9: Clock = Clock::module(
    ids::CGM0_MUX9,
    "cgm0_mux9",
    Module::Mux(cgm0(
        9,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI4),
            cgm_src(ids::GMAC0_EXT_TS),
        ],
    )),
);
pub static GMAC0_TS: Clock = Clock::module_in(
    ids::GMAC0_TS,
    "gmac0_ts",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX9, 0)),
    5 * MHZ,
    200 * MHZ,
);

pub static CGM0_MUX10: Clock = Clock::module(
    ids::CGM0_MUX10,
    "cgm0_mux10",
    Module::Mux(cgm0(
        10,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::PERIPH_PLL_PHI5),
            cgm_src(ids::SERDES0_LANE0_TX),
            cgm_src(ids::GMAC0_EXT_TX),
            cgm_src(ids::GMAC0_EXT_REF),
        ],
    )),
);
pub static GMAC0_TX: Clock = Clock::module_in(
    ids::GMAC0_TX,
    "gmac0_tx",
    Module::CgmDiv(CgmDiv::new(ids::CGM0_MUX10, 0)),
    2_500_000,
    125 * MHZ,
);

pub static CGM0_MUX11: Clock = Clock::module(
    ids::CGM0_MUX11,
    "cgm0_mux11",
    Module::Mux(cgm0(
        11,
        &[
            cgm_src(ids::FIRC),
            cgm_src(ids::GMAC0_REF_DIV),
            cgm_src(ids::GMAC0_EXT_RX),
            cgm_src(ids::SERDES0_LANE0_CDR),
        ],
    )),
);
pub static GMAC0_RX: Clock =
    Clock::child_in(ids::GMAC0_RX, "gmac0_rx", ids::CGM0_MUX11, 2_500_000, 125 * MHZ);

pub static CGM0_MUX15: Clock = Clock::module(
    ids::CGM0_MUX15,
    "cgm0_mux15",
    Module::SharedMux(cgm0(15, &[cgm_src(ids::FIRC), cgm_src(ids::GMAC0_EXT_REF)])),
);
pub static GMAC0_REF_DIV: Clock =
    Clock::child_in(ids::GMAC0_REF_DIV, "gmac0_ref_div", ids::CGM0_MUX15, 0, 50 * MHZ);
pub static GMAC0_REF: Clock =
    Clock::child_in(ids::GMAC0_REF, "gmac0_ref", ids::CGM0_MUX15, 0, 50 * MHZ);

pub const COMMON_COUNT: usize = 84;

/// Family-wide clocks, the first segment of every SoC tree.
pub static COMMON: [&Clock; COMMON_COUNT] = [
    &FIRC,
    &SIRC,
    &FXOSC,
    &ARM_PLL_MUX,
    &ARM_PLL_VCO,
    &ARM_PLL_PHI0,
    &ARM_DFS,
    &ARM_PLL_DFS1,
    &ARM_PLL_DFS2,
    &CGM1_MUX0,
    &A53_CORE,
    &A53_CORE_DIV2,
    &A53_CORE_DIV10,
    &CGM0_MUX0,
    &XBAR,
    &XBAR_DIV2,
    &XBAR_DIV3,
    &XBAR_DIV4,
    &XBAR_DIV6,
    &PERIPH_PLL_MUX,
    &PERIPH_PLL_VCO,
    &PERIPH_PLL_PHI0,
    &PERIPH_PLL_PHI1,
    &PERIPH_PLL_PHI2,
    &PERIPH_PLL_PHI3,
    &PERIPH_PLL_PHI4,
    &PERIPH_PLL_PHI5,
    &PERIPH_PLL_PHI7,
    &PERIPH_DFS,
    &PERIPH_PLL_DFS1,
    &PERIPH_PLL_DFS2,
    &PERIPH_PLL_DFS3,
    &PERIPH_PLL_DFS5,
    &SERDES_REF,
    &FTM0_EXT_REF,
    &FTM1_EXT_REF,
    &CGM0_MUX3,
    &PER_DIV,
    &CGM0_MUX4,
    &FTM0_REF,
    &CGM0_MUX5,
    &FTM1_REF,
    &CGM0_MUX6,
    &FLEXRAY_PE,
    &CGM0_MUX7,
    &CGM0_MUX8,
    &LIN_BAUD,
    &LINFLEXD,
    &SERDES0_LANE0_TX,
    &SERDES0_LANE0_CDR,
    &CGM0_MUX16,
    &SPI,
    &CGM0_MUX12,
    &QSPI_2X,
    &QSPI,
    &CGM0_MUX14,
    &SDHC_DIV,
    &SDHC,
    &DDR_PLL_MUX,
    &DDR_PLL_VCO,
    &DDR_PLL_PHI0,
    &CGM5_MUX0,
    &DDR,
    &ACCEL_PLL_MUX,
    &ACCEL_PLL_VCO,
    &ACCEL_PLL_PHI0,
    &ACCEL_PLL_PHI1,
    &CGM0_MUX1,
    &CLKOUT0,
    &CGM0_MUX2,
    &CLKOUT1,
    &GMAC0_EXT_TS,
    &GMAC0_EXT_TX,
    &GMAC0_EXT_RX,
    &GMAC0_EXT_REF,
    &CGM0_MUX9,
    &GMAC0_TS,
    &CGM0_MUX10,
    &GMAC0_TX,
    &CGM0_MUX11,
    &GMAC0_RX,
    &CGM0_MUX15,
    &GMAC0_REF_DIV,
    &GMAC0_REF,
];
