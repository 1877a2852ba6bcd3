// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! MC_ME partitions and their COFB clock-enable blocks.
//!
//! Powering a partition touches three IPs in a fixed order: MC_ME turns the
//! partition clock on, the RDC opens its interconnect port, and MC_RGM
//! releases the reset. MC_ME only applies new PCONF/PUPD settings after the
//! control key sequence has been written.

use log::debug;
use tock_registers::fields::FieldValue;

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::node::PartBlock;
use crate::registers::{
    mc_me, rdc, rgm, MC_ME_CTL_KEY, MC_ME_PCONF, MC_ME_PUPD, MC_ME_STAT, RDC_CTRL, RDC_STATUS,
    RGM_PRST, RGM_PSTAT,
};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    /// Request a PUPD update and wait until MC_ME has applied it.
    fn partition_update(
        &self,
        base: usize,
        partition: u32,
        update: FieldValue<u32, MC_ME_PUPD::Register>,
    ) -> Result<(), ClockError> {
        let pupd = mc_me::pupd(base, partition);
        self.modify(pupd, update);
        self.write(mc_me::ctl_key(base), MC_ME_CTL_KEY::KEY::Key.value);
        self.write(mc_me::ctl_key(base), MC_ME_CTL_KEY::KEY::InvertedKey.value);
        self.wait_mask(pupd, update.mask(), 0, C::HANDSHAKES.partition)
    }

    fn enable_partition(&self, partition: u32) -> Result<(), ClockError> {
        let me = self.bases.mc_me()?;
        let rdc = self.bases.rdc()?;
        let rgm = self.bases.rgm()?;
        let budget = C::HANDSHAKES.partition;

        debug!("powering up partition {}", partition);

        self.modify(mc_me::pconf(me, partition), MC_ME_PCONF::PCE::SET);
        self.partition_update(me, partition, MC_ME_PUPD::PCUD::SET)?;
        self.wait(mc_me::stat(me, partition), MC_ME_STAT::PCS::SET, budget)?;

        self.modify(rdc::ctrl(rdc, partition), RDC_CTRL::UNLOCK::SET);
        self.modify(
            rdc::ctrl(rdc, partition),
            RDC_CTRL::INTERCONNECT_DISABLE::CLEAR,
        );
        self.wait(
            rdc::status(rdc, partition),
            RDC_STATUS::INTERCONNECT_DISABLE_STAT::CLEAR,
            budget,
        )?;

        self.modify(rgm::prst(rgm, partition), RGM_PRST::PERIPH_RST::CLEAR);

        self.modify(mc_me::pconf(me, partition), MC_ME_PCONF::OSSE::CLEAR);
        self.partition_update(me, partition, MC_ME_PUPD::OSSUD::SET)?;
        self.wait(mc_me::stat(me, partition), MC_ME_STAT::OSSS::CLEAR, budget)?;
        self.wait(
            rgm::pstat(rgm, partition),
            RGM_PSTAT::PERIPH_STAT::CLEAR,
            budget,
        )?;

        self.modify(rdc::ctrl(rdc, partition), RDC_CTRL::UNLOCK::CLEAR);
        Ok(())
    }

    pub(crate) fn enable_part_block(&self, block: &PartBlock) -> Result<(), ClockError> {
        let me = self.bases.mc_me()?;
        let partition = block.partition;

        if !self
            .read::<MC_ME_STAT::Register>(mc_me::stat(me, partition))
            .is_set(MC_ME_STAT::PCS)
        {
            self.enable_partition(partition)?;
        }

        let bit = 1 << block.block;
        let clken_addr = mc_me::cofb0_clken(me, partition);
        let stat_addr = mc_me::cofb0_stat(me, partition);

        let clken = self.read_raw(clken_addr);
        if clken & bit != 0 && (!block.status || self.read_raw(stat_addr) & bit != 0) {
            return Ok(());
        }

        self.write(clken_addr, clken | bit);
        self.modify(mc_me::pconf(me, partition), MC_ME_PCONF::PCE::SET);
        self.partition_update(me, partition, MC_ME_PUPD::PCUD::SET)?;

        if block.status {
            self.wait_mask(stat_addr, bit, bit, C::HANDSHAKES.partition)?;
        }
        Ok(())
    }
}
