// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Digital frequency synthesizers.
//!
//! A DFS that never ran reports no locked port at all (PORTSR == 0). Its
//! first port is brought up with a reset of the whole block; later ports of
//! an already running DFS only reset themselves. Which path is taken depends
//! on what earlier boot stages left behind.

use log::{debug, error};

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::freq::{self, DfsSolution};
use crate::node::{ClockId, Dfs, DfsDiv, Module};
use crate::registers::{dfs, DFS_CTL, DFS_DVPORT, DFS_PORTS};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    pub(crate) fn dfs_of(&self, id: ClockId) -> Result<(usize, &'static Dfs), ClockError> {
        let (index, clock) = self.lookup(id)?;
        match clock.module_ref() {
            Some(Module::Dfs(dfs)) => Ok((index, dfs)),
            _ => Err(ClockError::InvalidParent),
        }
    }

    pub(crate) fn enable_dfs_div(&self, index: usize, div: &DfsDiv) -> Result<(), ClockError> {
        let target = self.requested_rate(index)?;

        self.enable(div.dfs)?;

        let (_, dfs) = self.dfs_of(div.dfs)?;
        let base = self.bases.dfs(dfs.instance)?;

        let running = !self
            .read::<DFS_CTL::Register>(dfs::ctl(base))
            .is_set(DFS_CTL::RESET);
        let input = if running {
            self.rate_of(div.dfs)?
        } else {
            self.rate_of(dfs.source)?
        };
        if input == 0 {
            return Err(ClockError::Unconfigured);
        }

        let solution = freq::solve_dfs(target, input, C::RATE_POLICY)?;
        self.init_dfs_port(base, div.index, solution)
    }

    fn init_dfs_port(
        &self,
        base: usize,
        port: u32,
        solution: DfsSolution,
    ) -> Result<(), ClockError> {
        let bit = 1 << port;
        let budget = C::HANDSHAKES.dfs_port;

        let dvport = self.read::<DFS_DVPORT::Register>(dfs::dvport(base, port));
        let portsr = self.read_raw(dfs::portsr(base));
        let portolsr = self.read_raw(dfs::portolsr(base));

        if portsr & bit != 0
            && portolsr & bit == 0
            && dvport.read(DFS_DVPORT::MFI) == solution.mfi
            && dvport.read(DFS_DVPORT::MFN) == solution.mfn
        {
            return Ok(());
        }

        let first_use = portsr == 0;
        let mask = if first_use {
            DFS_PORTS::PORT::All.value
        } else {
            bit
        };
        debug!(
            "dfs@{:#x} port {}: mfi {} mfn {}{}",
            base,
            port,
            solution.mfi,
            solution.mfn,
            if first_use { " (full reset)" } else { "" }
        );

        self.write(dfs::portolsr(base), mask);
        // Ports other than this one keep their reset state.
        let held = self.read_raw(dfs::portreset(base));
        self.write(dfs::portreset(base), held | mask);
        self.wait_mask(dfs::portsr(base), mask, 0, budget)?;

        if first_use {
            self.write(dfs::ctl(base), DFS_CTL::RESET::SET.value);
        }
        self.write(
            dfs::dvport(base, port),
            (DFS_DVPORT::MFI.val(solution.mfi) + DFS_DVPORT::MFN.val(solution.mfn)).value,
        );
        if first_use {
            self.write(dfs::ctl(base), DFS_CTL::RESET::CLEAR.value);
        }

        let reset = self.read_raw(dfs::portreset(base)) & !bit;
        self.write(dfs::portreset(base), reset);
        self.wait_mask(dfs::portsr(base), bit, bit, budget)?;

        if self.read_raw(dfs::portolsr(base)) & bit != 0 {
            error!("dfs@{:#x} port {}: loss of lock", base, port);
            return Err(ClockError::LockLost);
        }
        Ok(())
    }
}
