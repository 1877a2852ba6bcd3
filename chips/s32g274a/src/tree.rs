// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! S32G274A clock tree: the S32CC clocks plus the PFE.
//!
//! The Packet Forwarding Engine lives in partition 2. Each of its three MACs
//! has TX, RX and reference clock selectors on MC_CGM2, all gated by the
//! MAC's COFB block.

use s32cc::freq::MHZ;
use s32cc::node::{
    cgm_src, CgmDiv, CgmInstance, Clock, ClockState, ClockTree, FixedClock, FixedDiv, Module, Mux,
    MuxBlock, MuxSource, PartBlock,
};
use s32cc::tree::{ids as common, COMMON, COMMON_COUNT};

/// S32G274A-only clock identifiers. Family-wide ids are in
/// [`s32cc::tree::ids`].
pub mod ids {
    use s32cc::node::ClockId;

    pub const PFE_MAC0_EXT_TX: ClockId = ClockId(46);
    pub const PFE_MAC0_EXT_RX: ClockId = ClockId(47);
    pub const PFE_MAC0_EXT_REF: ClockId = ClockId(48);
    pub const PFE_MAC1_EXT_TX: ClockId = ClockId(49);
    pub const PFE_MAC1_EXT_RX: ClockId = ClockId(50);
    pub const PFE_MAC1_EXT_REF: ClockId = ClockId(51);
    pub const PFE_MAC2_EXT_TX: ClockId = ClockId(52);
    pub const PFE_MAC2_EXT_RX: ClockId = ClockId(53);
    pub const PFE_MAC2_EXT_REF: ClockId = ClockId(54);
    pub const SERDES1_LANE0_TX: ClockId = ClockId(55);
    pub const SERDES1_LANE0_CDR: ClockId = ClockId(56);
    pub const SERDES0_LANE1_TX: ClockId = ClockId(57);
    pub const SERDES0_LANE1_CDR: ClockId = ClockId(58);
    pub const SERDES1_LANE1_TX: ClockId = ClockId(59);
    pub const SERDES1_LANE1_CDR: ClockId = ClockId(60);
    pub const PFE_MAC0_REF_DIV: ClockId = ClockId(61);
    pub const PFE_MAC1_REF_DIV: ClockId = ClockId(62);
    pub const PFE_MAC2_REF_DIV: ClockId = ClockId(63);

    pub const CGM2_MUX0: ClockId = ClockId(128);
    pub const PFE_PE_DIV: ClockId = ClockId(129);
    pub const PFE_PE: ClockId = ClockId(130);
    pub const PFE_SYS: ClockId = ClockId(131);
    pub const CGM2_MUX1: ClockId = ClockId(132);
    pub const PFE_MAC0_TX_CGM: ClockId = ClockId(133);
    pub const PFE_MAC0_TX: ClockId = ClockId(134);
    pub const CGM2_MUX2: ClockId = ClockId(135);
    pub const PFE_MAC1_TX_CGM: ClockId = ClockId(136);
    pub const PFE_MAC1_TX: ClockId = ClockId(137);
    pub const CGM2_MUX3: ClockId = ClockId(138);
    pub const PFE_MAC2_TX_CGM: ClockId = ClockId(139);
    pub const PFE_MAC2_TX: ClockId = ClockId(140);
    pub const CGM2_MUX4: ClockId = ClockId(141);
    pub const PFE_MAC0_RX: ClockId = ClockId(142);
    pub const CGM2_MUX5: ClockId = ClockId(143);
    pub const PFE_MAC1_RX: ClockId = ClockId(144);
    pub const CGM2_MUX6: ClockId = ClockId(145);
    pub const PFE_MAC2_RX: ClockId = ClockId(146);
    pub const CGM2_MUX7: ClockId = ClockId(147);
    pub const PFE_MAC0_REF_CGM: ClockId = ClockId(148);
    pub const CGM2_MUX8: ClockId = ClockId(149);
    pub const PFE_MAC1_REF_CGM: ClockId = ClockId(150);
    pub const CGM2_MUX9: ClockId = ClockId(151);
    pub const PFE_MAC2_REF_CGM: ClockId = ClockId(152);
}

/// PFE partition.
const PFE: u32 = 2;

const fn external() -> Module {
    Module::Fixed(FixedClock { freq: 0 })
}

const fn cgm2(index: u32, sources: &'static [MuxSource]) -> Module {
    Module::Mux(Mux::new(MuxBlock::Cgm(CgmInstance::Cgm2), index, sources))
}

const fn cgm2_div(mux: s32cc::ClockId) -> Module {
    Module::CgmDiv(CgmDiv::new(mux, 0))
}

const fn pfe_block(parent: s32cc::ClockId, block: u32) -> Module {
    Module::PartBlock(PartBlock::new(parent, PFE, block, false))
}

// Clocks whose gating differs between S32CC parts

static XBAR_2X: Clock = Clock::module_in(
    common::XBAR_2X,
    "xbar_2x",
    Module::PartBlock(PartBlock::new(common::CGM0_MUX0, 3, 0, false)),
    48 * MHZ,
    800 * MHZ,
);
static PER: Clock = Clock::child_in(common::PER, "per", common::PER_DIV, 0, 80 * MHZ);
static CAN_PE: Clock =
    Clock::child_in(common::CAN_PE, "can_pe", common::CGM0_MUX7, 40 * MHZ, 80 * MHZ);

// External inputs

static PFE_MAC0_EXT_TX: Clock = Clock::module(ids::PFE_MAC0_EXT_TX, "pfe_mac0_ext_tx", external());
static PFE_MAC0_EXT_RX: Clock = Clock::module(ids::PFE_MAC0_EXT_RX, "pfe_mac0_ext_rx", external());
static PFE_MAC0_EXT_REF: Clock =
    Clock::module(ids::PFE_MAC0_EXT_REF, "pfe_mac0_ext_ref", external());
static PFE_MAC1_EXT_TX: Clock = Clock::module(ids::PFE_MAC1_EXT_TX, "pfe_mac1_ext_tx", external());
static PFE_MAC1_EXT_RX: Clock = Clock::module(ids::PFE_MAC1_EXT_RX, "pfe_mac1_ext_rx", external());
static PFE_MAC1_EXT_REF: Clock =
    Clock::module(ids::PFE_MAC1_EXT_REF, "pfe_mac1_ext_ref", external());
static PFE_MAC2_EXT_TX: Clock = Clock::module(ids::PFE_MAC2_EXT_TX, "pfe_mac2_ext_tx", external());
static PFE_MAC2_EXT_RX: Clock = Clock::module(ids::PFE_MAC2_EXT_RX, "pfe_mac2_ext_rx", external());
static PFE_MAC2_EXT_REF: Clock =
    Clock::module(ids::PFE_MAC2_EXT_REF, "pfe_mac2_ext_ref", external());
static SERDES1_LANE0_TX: Clock =
    Clock::module(ids::SERDES1_LANE0_TX, "serdes1_lane0_tx", external());
static SERDES1_LANE0_CDR: Clock =
    Clock::module(ids::SERDES1_LANE0_CDR, "serdes1_lane0_cdr", external());
static SERDES0_LANE1_TX: Clock =
    Clock::module(ids::SERDES0_LANE1_TX, "serdes0_lane1_tx", external());
static SERDES0_LANE1_CDR: Clock =
    Clock::module(ids::SERDES0_LANE1_CDR, "serdes0_lane1_cdr", external());
static SERDES1_LANE1_TX: Clock =
    Clock::module(ids::SERDES1_LANE1_TX, "serdes1_lane1_tx", external());
static SERDES1_LANE1_CDR: Clock =
    Clock::module(ids::SERDES1_LANE1_CDR, "serdes1_lane1_cdr", external());

// PFE engine

static CGM2_MUX0: Clock = Clock::module(
    ids::CGM2_MUX0,
    "cgm2_mux0",
    cgm2(0, &[cgm_src(common::FIRC), cgm_src(common::ACCEL_PLL_PHI1)]),
);
static PFE_PE_DIV: Clock = Clock::module(ids::PFE_PE_DIV, "pfe_pe_div", cgm2_div(ids::CGM2_MUX0));
static PFE_PE: Clock = Clock::module_in(
    ids::PFE_PE,
    "pfe_pe",
    pfe_block(ids::PFE_PE_DIV, 3),
    0,
    600 * MHZ,
);
static PFE_SYS: Clock = Clock::module_in(
    ids::PFE_SYS,
    "pfe_sys",
    Module::FixedDiv(FixedDiv::new(ids::PFE_PE, 2)),
    0,
    300 * MHZ,
);

// PFE MAC transmit clocks

static CGM2_MUX1: Clock = Clock::module(
    ids::CGM2_MUX1,
    "cgm2_mux1",
    cgm2(
        1,
        &[
            cgm_src(common::FIRC),
            cgm_src(common::PERIPH_PLL_PHI5),
            cgm_src(ids::PFE_MAC0_EXT_TX),
            cgm_src(ids::PFE_MAC0_EXT_REF),
            cgm_src(ids::SERDES1_LANE0_TX),
        ],
    ),
);
static PFE_MAC0_TX_CGM: Clock = Clock::module(
    ids::PFE_MAC0_TX_CGM,
    "pfe_mac0_tx_cgm",
    cgm2_div(ids::CGM2_MUX1),
);
static PFE_MAC0_TX: Clock = Clock::module_in(
    ids::PFE_MAC0_TX,
    "pfe_mac0_tx",
    pfe_block(ids::PFE_MAC0_TX_CGM, 0),
    2_500_000,
    312_500_000,
);

static CGM2_MUX2: Clock = Clock::module(
    ids::CGM2_MUX2,
    "cgm2_mux2",
    cgm2(
        2,
        &[
            cgm_src(common::FIRC),
            cgm_src(common::PERIPH_PLL_PHI5),
            cgm_src(ids::PFE_MAC1_EXT_TX),
            cgm_src(ids::PFE_MAC1_EXT_REF),
            cgm_src(ids::SERDES1_LANE1_TX),
        ],
    ),
);
static PFE_MAC1_TX_CGM: Clock = Clock::module(
    ids::PFE_MAC1_TX_CGM,
    "pfe_mac1_tx_cgm",
    cgm2_div(ids::CGM2_MUX2),
);
static PFE_MAC1_TX: Clock = Clock::module_in(
    ids::PFE_MAC1_TX,
    "pfe_mac1_tx",
    pfe_block(ids::PFE_MAC1_TX_CGM, 1),
    2_500_000,
    125 * MHZ,
);

static CGM2_MUX3: Clock = Clock::module(
    ids::CGM2_MUX3,
    "cgm2_mux3",
    cgm2(
        3,
        &[
            cgm_src(common::FIRC),
            cgm_src(common::PERIPH_PLL_PHI5),
            cgm_src(ids::PFE_MAC2_EXT_TX),
            cgm_src(ids::PFE_MAC2_EXT_REF),
            cgm_src(ids::SERDES0_LANE1_TX),
        ],
    ),
);
static PFE_MAC2_TX_CGM: Clock = Clock::module(
    ids::PFE_MAC2_TX_CGM,
    "pfe_mac2_tx_cgm",
    cgm2_div(ids::CGM2_MUX3),
);
static PFE_MAC2_TX: Clock = Clock::module_in(
    ids::PFE_MAC2_TX,
    "pfe_mac2_tx",
    pfe_block(ids::PFE_MAC2_TX_CGM, 2),
    2_500_000,
    125 * MHZ,
);

// PFE MAC receive clocks

static CGM2_MUX4: Clock = Clock::module(
    ids::CGM2_MUX4,
    "cgm2_mux4",
    cgm2(
        4,
        &[
            cgm_src(common::FIRC),
            cgm_src(ids::PFE_MAC0_EXT_RX),
            cgm_src(ids::SERDES1_LANE0_CDR),
            cgm_src(ids::PFE_MAC0_REF_DIV),
        ],
    ),
);
static PFE_MAC0_RX: Clock = Clock::module_in(
    ids::PFE_MAC0_RX,
    "pfe_mac0_rx",
    pfe_block(ids::CGM2_MUX4, 0),
    2_500_000,
    312_500_000,
);

static CGM2_MUX5: Clock = Clock::module(
    ids::CGM2_MUX5,
    "cgm2_mux5",
    cgm2(
        5,
        &[
            cgm_src(common::FIRC),
            cgm_src(ids::PFE_MAC1_EXT_RX),
            cgm_src(ids::PFE_MAC1_REF_DIV),
            cgm_src(ids::SERDES1_LANE1_CDR),
        ],
    ),
);
static PFE_MAC1_RX: Clock = Clock::module_in(
    ids::PFE_MAC1_RX,
    "pfe_mac1_rx",
    pfe_block(ids::CGM2_MUX5, 1),
    2_500_000,
    125 * MHZ,
);

static CGM2_MUX6: Clock = Clock::module(
    ids::CGM2_MUX6,
    "cgm2_mux6",
    cgm2(
        6,
        &[
            cgm_src(common::FIRC),
            cgm_src(ids::PFE_MAC2_EXT_RX),
            cgm_src(ids::PFE_MAC2_REF_DIV),
            cgm_src(ids::SERDES0_LANE1_CDR),
        ],
    ),
);
static PFE_MAC2_RX: Clock = Clock::module_in(
    ids::PFE_MAC2_RX,
    "pfe_mac2_rx",
    pfe_block(ids::CGM2_MUX6, 2),
    2_500_000,
    125 * MHZ,
);

// PFE MAC reference clocks

static CGM2_MUX7: Clock = Clock::module(
    ids::CGM2_MUX7,
    "cgm2_mux7",
    cgm2(7, &[cgm_src(common::FIRC), cgm_src(ids::PFE_MAC0_EXT_REF)]),
);
static PFE_MAC0_REF_CGM: Clock = Clock::module(
    ids::PFE_MAC0_REF_CGM,
    "pfe_mac0_ref_cgm",
    cgm2_div(ids::CGM2_MUX7),
);
static PFE_MAC0_REF_DIV: Clock = Clock::module_in(
    ids::PFE_MAC0_REF_DIV,
    "pfe_mac0_ref_div",
    pfe_block(ids::PFE_MAC0_REF_CGM, 0),
    0,
    50 * MHZ,
);

static CGM2_MUX8: Clock = Clock::module(
    ids::CGM2_MUX8,
    "cgm2_mux8",
    cgm2(8, &[cgm_src(common::FIRC), cgm_src(ids::PFE_MAC1_EXT_REF)]),
);
static PFE_MAC1_REF_CGM: Clock = Clock::module(
    ids::PFE_MAC1_REF_CGM,
    "pfe_mac1_ref_cgm",
    cgm2_div(ids::CGM2_MUX8),
);
static PFE_MAC1_REF_DIV: Clock = Clock::module_in(
    ids::PFE_MAC1_REF_DIV,
    "pfe_mac1_ref_div",
    pfe_block(ids::PFE_MAC1_REF_CGM, 1),
    0,
    50 * MHZ,
);

static CGM2_MUX9: Clock = Clock::module(
    ids::CGM2_MUX9,
    "cgm2_mux9",
    cgm2(9, &[cgm_src(common::FIRC), cgm_src(ids::PFE_MAC2_EXT_REF)]),
);
static PFE_MAC2_REF_CGM: Clock = Clock::module(
    ids::PFE_MAC2_REF_CGM,
    "pfe_mac2_ref_cgm",
    cgm2_div(ids::CGM2_MUX9),
);
static PFE_MAC2_REF_DIV: Clock = Clock::module_in(
    ids::PFE_MAC2_REF_DIV,
    "pfe_mac2_ref_div",
    pfe_block(ids::PFE_MAC2_REF_CGM, 2),
    0,
    50 * MHZ,
);

const SOC_COUNT: usize = 46;

static SOC: [&Clock; SOC_COUNT] = [
    &XBAR_2X,
    &PER,
    &CAN_PE,
    &PFE_MAC0_EXT_TX,
    &PFE_MAC0_EXT_RX,
    &PFE_MAC0_EXT_REF,
    &PFE_MAC1_EXT_TX,
    &PFE_MAC1_EXT_RX,
    &PFE_MAC1_EXT_REF,
    &PFE_MAC2_EXT_TX,
    &PFE_MAC2_EXT_RX,
    &PFE_MAC2_EXT_REF,
    &SERDES1_LANE0_TX,
    &SERDES1_LANE0_CDR,
    &SERDES0_LANE1_TX,
    &SERDES0_LANE1_CDR,
    &SERDES1_LANE1_TX,
    &SERDES1_LANE1_CDR,
    &CGM2_MUX0,
    &PFE_PE_DIV,
    &PFE_PE,
    &PFE_SYS,
    &CGM2_MUX1,
    &PFE_MAC0_TX_CGM,
    &PFE_MAC0_TX,
    &CGM2_MUX2,
    &PFE_MAC1_TX_CGM,
    &PFE_MAC1_TX,
    &CGM2_MUX3,
    &PFE_MAC2_TX_CGM,
    &PFE_MAC2_TX,
    &CGM2_MUX4,
    &PFE_MAC0_RX,
    &CGM2_MUX5,
    &PFE_MAC1_RX,
    &CGM2_MUX6,
    &PFE_MAC2_RX,
    &CGM2_MUX7,
    &PFE_MAC0_REF_CGM,
    &PFE_MAC0_REF_DIV,
    &CGM2_MUX8,
    &PFE_MAC1_REF_CGM,
    &PFE_MAC1_REF_DIV,
    &CGM2_MUX9,
    &PFE_MAC2_REF_CGM,
    &PFE_MAC2_REF_DIV,
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
    fn soc_selectors_fit_the_cgm() {
        for clock in SOC.iter() {
            if clock.id.0 < 64 {
                assert!(clock.id.0 >= 46, "{} collides with a family id", clock.name);
            }
        }
    }

    #[test]
    fn pfe_clocks_are_gated_by_partition_2() {
        for id in [ids::PFE_PE, ids::PFE_MAC0_RX, ids::PFE_MAC1_TX, ids::PFE_MAC2_REF_DIV] {
            let (_, clock) = TREE.find(id).unwrap();
            match clock.module_ref() {
                Some(Module::PartBlock(block)) => {
                    assert_eq!(block.partition, PFE);
                    assert!(!block.status);
                }
                _ => panic!("{} is not a partition block", clock.name),
            }
        }
    }
}
