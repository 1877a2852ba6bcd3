// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! MC_CGM clock selectors and their dividers.

use log::{debug, error};

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::freq::{self, CGM_DIV_MAX};
use crate::node::{CgmDiv, ClockId, Mux, MuxBlock};
use crate::registers::{cgm, CGM_CSC, CGM_CSS, CGM_DC, CGM_DIV_UPD_STAT};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    pub(crate) fn enable_mux(&self, index: usize, mux: &Mux) -> Result<(), ClockError> {
        let name = self.name_of(index);
        let source = self.state(index).parent().ok_or_else(|| {
            error!("{}: no source selected", name);
            ClockError::Unconfigured
        })?;
        let sel = mux.source(source).ok_or(ClockError::InvalidParent)?.sel;

        self.enable(source)?;

        match mux.block {
            // PLLCLKMUX is programmed together with the PLL.
            MuxBlock::Pll(_) => Ok(()),
            MuxBlock::Cgm(instance) => {
                let base = self.bases.cgm(instance)?;
                self.switch_mux(base, mux.index, sel)
            }
        }
    }

    fn switch_mux(&self, base: usize, index: u32, sel: u32) -> Result<(), ClockError> {
        let css_addr = cgm::css(base, index);
        let csc_addr = cgm::csc(base, index);
        let budget = C::HANDSHAKES.mux_switch;

        let css = self.read::<CGM_CSS::Register>(css_addr);
        if css.read(CGM_CSS::SELSTAT) == sel
            && css.matches_all(CGM_CSS::SWTRG::Success)
            && !css.is_set(CGM_CSS::SWIP)
        {
            return Ok(());
        }

        debug!("cgm@{:#x} mux {}: switching to {}", base, index, sel);

        self.wait(css_addr, CGM_CSS::SWIP::CLEAR, budget)?;

        let mut csc = self.read::<CGM_CSC::Register>(csc_addr);
        csc.modify(CGM_CSC::SELCTL.val(sel) + CGM_CSC::CLK_SW::SET);
        self.write(csc_addr, csc.get());

        self.wait(csc_addr, CGM_CSC::CLK_SW::CLEAR, budget)?;
        self.wait(css_addr, CGM_CSS::SWIP::CLEAR, budget)?;

        let css = self.read::<CGM_CSS::Register>(css_addr);
        if css.matches_all(CGM_CSS::SWTRG::Success) && css.read(CGM_CSS::SELSTAT) == sel {
            return Ok(());
        }

        error!(
            "cgm@{:#x} mux {}: switch to {} ended on {} (trigger {})",
            base,
            index,
            sel,
            css.read(CGM_CSS::SELSTAT),
            css.read(CGM_CSS::SWTRG)
        );
        Err(ClockError::SwitchFailed)
    }

    /// The MC_CGM mux wrapped by clock `id` and its CGM base address.
    pub(crate) fn cgm_mux_of(&self, id: ClockId) -> Result<(&'static Mux, usize), ClockError> {
        let (_, clock) = self.lookup(id)?;
        match clock.mux() {
            Some((mux, _)) => match mux.block {
                MuxBlock::Cgm(instance) => Ok((mux, self.bases.cgm(instance)?)),
                MuxBlock::Pll(_) => Err(ClockError::InvalidParent),
            },
            None => Err(ClockError::InvalidParent),
        }
    }

    pub(crate) fn enable_cgm_div(&self, index: usize, div: &CgmDiv) -> Result<(), ClockError> {
        let target = self.requested_rate(index)?;

        self.enable(div.mux)?;

        let parent = self.rate_of(div.mux)?;
        if parent == 0 {
            return Err(ClockError::Unconfigured);
        }
        let solution = freq::solve_div(parent, target, CGM_DIV_MAX, C::RATE_POLICY)?;

        let (mux, base) = self.cgm_mux_of(div.mux)?;
        let addr = cgm::dc(base, mux.index, div.index);
        let field = solution.divisor - 1;

        let dc = self.read::<CGM_DC::Register>(addr);
        if dc.is_set(CGM_DC::DE) && dc.read(CGM_DC::DIV) == field {
            return Ok(());
        }

        self.write(addr, (CGM_DC::DE::SET + CGM_DC::DIV.val(field)).value);
        self.wait(
            cgm::div_upd_stat(base, mux.index),
            CGM_DIV_UPD_STAT::DIVSTAT::CLEAR,
            C::HANDSHAKES.div_update,
        )
    }
}
