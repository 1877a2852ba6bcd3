// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! S32R45 clock tree: the S32CC clocks plus the radar accelerators and a
//! second GMAC.
//!
//! Most interconnect consumers on this part sit behind chains of COFB
//! blocks, so XBAR_2X and CAN_PE only run once every block on the way has
//! its clock enabled.

use s32cc::freq::MHZ;
use s32cc::node::{
    cgm_src, CgmDiv, CgmInstance, Clock, ClockId, ClockState, ClockTree, DfsDiv, FixedClock,
    FixedDiv, Module, Mux, MuxBlock, MuxSource, PartBlock,
};
use s32cc::tree::{ids as common, COMMON, COMMON_COUNT};

/// S32R45-only clock identifiers. Family-wide ids are in
/// [`s32cc::tree::ids`].
pub mod ids {
    use s32cc::node::ClockId;

    pub const ARM_PLL_DFS4_2: ClockId = ClockId(46);
    pub const GMAC1_EXT_TX: ClockId = ClockId(47);
    pub const GMAC1_EXT_RX: ClockId = ClockId(48);
    pub const GMAC1_EXT_REF: ClockId = ClockId(49);
    pub const SERDES1_LANE0_TX: ClockId = ClockId(50);
    pub const SERDES1_LANE0_CDR: ClockId = ClockId(51);
    pub const GMAC1_REF_DIV: ClockId = ClockId(52);

    pub const XBAR_DIV3_GATE: ClockId = ClockId(128);
    pub const EIM_GATE: ClockId = ClockId(129);
    pub const MIPI20_GATE: ClockId = ClockId(130);
    pub const MIPI21_GATE: ClockId = ClockId(131);
    pub const MIPI22_GATE: ClockId = ClockId(132);
    pub const MIPI23_GATE: ClockId = ClockId(133);
    pub const CAN4_GATE: ClockId = ClockId(134);
    pub const CAN5_GATE: ClockId = ClockId(135);
    pub const CAN6_GATE: ClockId = ClockId(136);
    pub const CGM2_MUX0: ClockId = ClockId(137);
    pub const ACCEL3_DIV: ClockId = ClockId(138);
    pub const BBE32EP_GATE: ClockId = ClockId(139);
    pub const ACCEL3: ClockId = ClockId(140);
    pub const ACCEL3_DIV3: ClockId = ClockId(141);
    pub const CGM2_MUX1: ClockId = ClockId(142);
    pub const ACCEL4_DIV: ClockId = ClockId(143);
    pub const LAX0_GATE: ClockId = ClockId(144);
    pub const ACCEL4: ClockId = ClockId(145);
    pub const CGM2_MUX2: ClockId = ClockId(146);
    pub const GMAC1_TX: ClockId = ClockId(147);
    pub const CGM2_MUX3: ClockId = ClockId(148);
    pub const CGM2_MUX4: ClockId = ClockId(149);
    pub const GMAC1_RX: ClockId = ClockId(150);
}

const fn external() -> Module {
    Module::Fixed(FixedClock { freq: 0 })
}

const fn cgm2(index: u32, sources: &'static [MuxSource]) -> Module {
    Module::Mux(Mux::new(MuxBlock::Cgm(CgmInstance::Cgm2), index, sources))
}

const fn gate(parent: ClockId, partition: u32, block: u32) -> Module {
    Module::PartBlock(PartBlock::new(parent, partition, block, true))
}

// XBAR_2X behind the eDMA, MIPI-CSI2 and EIM blocks

static XBAR_DIV3_GATE: Clock = Clock::module(
    ids::XBAR_DIV3_GATE,
    "xbar_div3_gate",
    gate(common::CGM0_MUX0, 3, 2),
);
static EIM_GATE: Clock = Clock::module(ids::EIM_GATE, "eim_gate", gate(ids::XBAR_DIV3_GATE, 3, 3));
static MIPI20_GATE: Clock =
    Clock::module(ids::MIPI20_GATE, "mipi20_gate", gate(ids::EIM_GATE, 0, 5));
static MIPI21_GATE: Clock =
    Clock::module(ids::MIPI21_GATE, "mipi21_gate", gate(ids::MIPI20_GATE, 0, 6));
static MIPI22_GATE: Clock =
    Clock::module(ids::MIPI22_GATE, "mipi22_gate", gate(ids::MIPI21_GATE, 0, 7));
static MIPI23_GATE: Clock =
    Clock::module(ids::MIPI23_GATE, "mipi23_gate", gate(ids::MIPI22_GATE, 0, 8));
static XBAR_2X: Clock = Clock::module_in(
    common::XBAR_2X,
    "xbar_2x",
    gate(ids::MIPI23_GATE, 0, 9),
    48 * MHZ,
    800 * MHZ,
);

static PER: Clock = Clock::module_in(
    common::PER,
    "per",
    Module::PartBlock(PartBlock::new(common::PER_DIV, 3, 1, false)),
    0,
    80 * MHZ,
);

// CAN_PE behind the four FlexCAN instances of partition 0

static CAN4_GATE: Clock =
    Clock::module(ids::CAN4_GATE, "can4_gate", gate(common::CGM0_MUX7, 0, 11));
static CAN5_GATE: Clock = Clock::module(ids::CAN5_GATE, "can5_gate", gate(ids::CAN4_GATE, 0, 12));
static CAN6_GATE: Clock = Clock::module(ids::CAN6_GATE, "can6_gate", gate(ids::CAN5_GATE, 0, 13));
static CAN_PE: Clock = Clock::module_in(
    common::CAN_PE,
    "can_pe",
    gate(ids::CAN6_GATE, 0, 14),
    40 * MHZ,
    80 * MHZ,
);

// Fourth ARM DFS port, feeding the LAX

static ARM_PLL_DFS4: Clock = Clock::module_in(
    common::ARM_PLL_DFS4,
    "arm_pll_dfs4",
    Module::DfsDiv(DfsDiv::new(common::ARM_DFS, 3)),
    0,
    400 * MHZ,
);
static ARM_PLL_DFS4_2: Clock = Clock::child_in(
    ids::ARM_PLL_DFS4_2,
    "arm_pll_dfs4_2",
    common::ARM_PLL_DFS4,
    0,
    400 * MHZ,
);

// ACCEL3, the SPT

static CGM2_MUX0: Clock = Clock::module(
    ids::CGM2_MUX0,
    "cgm2_mux0",
    cgm2(0, &[cgm_src(common::FIRC), cgm_src(common::ACCEL_PLL_PHI0)]),
);
static ACCEL3_DIV: Clock = Clock::module(
    ids::ACCEL3_DIV,
    "accel3_div",
    Module::CgmDiv(CgmDiv::new(ids::CGM2_MUX0, 0)),
);
static BBE32EP_GATE: Clock =
    Clock::module(ids::BBE32EP_GATE, "bbe32ep_gate", gate(ids::ACCEL3_DIV, 3, 4));
static ACCEL3: Clock = Clock::module_in(
    ids::ACCEL3,
    "accel3",
    gate(ids::BBE32EP_GATE, 3, 5),
    0,
    600 * MHZ,
);
static ACCEL3_DIV3: Clock = Clock::module_in(
    ids::ACCEL3_DIV3,
    "accel3_div3",
    Module::FixedDiv(FixedDiv::new(ids::ACCEL3, 2)),
    0,
    200 * MHZ,
);

// ACCEL4, the LAX

static CGM2_MUX1: Clock = Clock::module(
    ids::CGM2_MUX1,
    "cgm2_mux1",
    cgm2(1, &[cgm_src(common::FIRC), cgm_src(ids::ARM_PLL_DFS4_2)]),
);
static ACCEL4_DIV: Clock = Clock::module(
    ids::ACCEL4_DIV,
    "accel4_div",
    Module::CgmDiv(CgmDiv::new(ids::CGM2_MUX1, 0)),
);
static LAX0_GATE: Clock = Clock::module(ids::LAX0_GATE, "lax0_gate", gate(ids::ACCEL4_DIV, 2, 0));
static ACCEL4: Clock = Clock::module_in(
    ids::ACCEL4,
    "accel4",
    gate(ids::LAX0_GATE, 2, 1),
    0,
    400 * MHZ,
);

// GMAC1

static GMAC1_EXT_TX: Clock = Clock::module(ids::GMAC1_EXT_TX, "gmac1_ext_tx", external());
static GMAC1_EXT_RX: Clock = Clock::module(ids::GMAC1_EXT_RX, "gmac1_ext_rx", external());
static GMAC1_EXT_REF: Clock = Clock::module(ids::GMAC1_EXT_REF, "gmac1_ext_ref", external());
static SERDES1_LANE0_TX: Clock =
    Clock::module(ids::SERDES1_LANE0_TX, "serdes1_lane0_tx", external());
static SERDES1_LANE0_CDR: Clock =
    Clock::module(ids::SERDES1_LANE0_CDR, "serdes1_lane0_cdr", external());

static CGM2_MUX2: Clock = Clock::module(
    ids::CGM2_MUX2,
    "cgm2_mux2",
    cgm2(
        2,
        &[
            cgm_src(common::FIRC),
            cgm_src(common::PERIPH_PLL_PHI5),
            cgm_src(ids::GMAC1_EXT_TX),
            cgm_src(ids::GMAC1_EXT_REF),
            cgm_src(ids::SERDES1_LANE0_TX),
        ],
    ),
);
static GMAC1_TX: Clock = Clock::module_in(
    ids::GMAC1_TX,
    "gmac1_tx",
    Module::CgmDiv(CgmDiv::new(ids::CGM2_MUX2, 0)),
    2_500_000,
    125 * MHZ,
);

static CGM2_MUX3: Clock = Clock::module(
    ids::CGM2_MUX3,
    "cgm2_mux3",
    cgm2(3, &[cgm_src(common::FIRC), cgm_src(ids::GMAC1_EXT_REF)]),
);
static GMAC1_REF_DIV: Clock = Clock::module_in(
    ids::GMAC1_REF_DIV,
    "gmac1_ref_div",
    Module::CgmDiv(CgmDiv::new(ids::CGM2_MUX3, 0)),
    0,
    50 * MHZ,
);

static CGM2_MUX4: Clock = Clock::module(
    ids::CGM2_MUX4,
    "cgm2_mux4",
    cgm2(
        4,
        &[
            cgm_src(common::FIRC),
            cgm_src(ids::GMAC1_REF_DIV),
            cgm_src(ids::GMAC1_EXT_RX),
            cgm_src(ids::SERDES1_LANE0_CDR),
        ],
    ),
);
static GMAC1_RX: Clock =
    Clock::child_in(ids::GMAC1_RX, "gmac1_rx", ids::CGM2_MUX4, 2_500_000, 125 * MHZ);

const SOC_COUNT: usize = 34;

static SOC: [&Clock; SOC_COUNT] = [
    &XBAR_DIV3_GATE,
    &EIM_GATE,
    &MIPI20_GATE,
    &MIPI21_GATE,
    &MIPI22_GATE,
    &MIPI23_GATE,
    &XBAR_2X,
    &PER,
    &CAN4_GATE,
    &CAN5_GATE,
    &CAN6_GATE,
    &CAN_PE,
    &ARM_PLL_DFS4,
    &ARM_PLL_DFS4_2,
    &CGM2_MUX0,
    &ACCEL3_DIV,
    &BBE32EP_GATE,
    &ACCEL3,
    &ACCEL3_DIV3,
    &CGM2_MUX1,
    &ACCEL4_DIV,
    &LAX0_GATE,
    &ACCEL4,
    &GMAC1_EXT_TX,
    &GMAC1_EXT_RX,
    &GMAC1_EXT_REF,
    &SERDES1_LANE0_TX,
    &SERDES1_LANE0_CDR,
    &CGM2_MUX2,
    &GMAC1_TX,
    &CGM2_MUX3,
    &GMAC1_REF_DIV,
    &CGM2_MUX4,
    &GMAC1_RX,
];

static SEGMENTS: [&[&Clock]; 2] = [&COMMON, &SOC];

pub static TREE: ClockTree = ClockTree::new(&SEGMENTS);

pub const CLOCK_COUNT: usize = COMMON_COUNT + SOC_COUNT;

/// Fresh run-time state for [`TREE`].
pub fn clock_state() -> [ClockState; CLOCK_COUNT] {
    core::array::from_fn(|_| ClockState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_is_consistent() {
        assert_eq!(TREE.len(), CLOCK_COUNT);
        assert_eq!(TREE.validate(), Ok(()));
    }

    #[test]
    fn xbar_needs_every_gate() {
        let mut id = common::XBAR_2X;
        let mut gates = 0;
        while let Some(Module::PartBlock(block)) = TREE.get(id).unwrap().1.module_ref() {
            assert!(block.status);
            gates += 1;
            id = block.parent;
        }
        assert_eq!(gates, 7);
        assert_eq!(id, common::CGM0_MUX0);
    }
}
