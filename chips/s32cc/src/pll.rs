// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! PLLDIG: fractional PLLs and their PHI output dividers.

use log::{debug, error, warn};

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::freq::{self, PllSolution, DIV_MAX};
use crate::node::{ClockId, Module, Mux, MuxBlock, Pll, PllDiv};
use crate::registers::{plldig, PLLCLKMUX, PLLCR, PLLDV, PLLFD, PLLODIV, PLLSR};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    /// Reference mux of `pll`, which must belong to the same instance.
    fn pll_mux(&self, pll: &Pll) -> Result<(usize, &'static Mux), ClockError> {
        let (index, clock) = self.lookup(pll.source)?;
        match clock.mux() {
            Some((mux, _)) if mux.block == MuxBlock::Pll(pll.instance) => Ok((index, mux)),
            _ => {
                error!("{} is not the reference mux of {:?} PLL", clock.name, pll.instance);
                Err(ClockError::InvalidParent)
            }
        }
    }

    pub(crate) fn pll_of(&self, id: ClockId) -> Result<&'static Pll, ClockError> {
        let (_, clock) = self.lookup(id)?;
        match clock.module_ref() {
            Some(Module::Pll(pll)) => Ok(pll),
            _ => Err(ClockError::InvalidParent),
        }
    }

    fn pll_running(&self, base: usize) -> bool {
        let cr = self.read::<PLLCR::Register>(plldig::pllcr(base));
        let sr = self.read::<PLLSR::Register>(plldig::pllsr(base));
        !cr.is_set(PLLCR::PLLPD) && sr.is_set(PLLSR::LOCK)
    }

    /// VCO frequency read back from the hardware.
    pub(crate) fn pll_vco(&self, pll: &Pll) -> Result<u64, ClockError> {
        let base = self.bases.pll(pll.instance)?;
        if self
            .read::<PLLCR::Register>(plldig::pllcr(base))
            .is_set(PLLCR::PLLPD)
        {
            return Ok(0);
        }

        let (_, mux) = self.pll_mux(pll)?;
        let sel = self
            .read::<PLLCLKMUX::Register>(plldig::pllclkmux(base))
            .read(PLLCLKMUX::REFCLKSEL);
        let source = mux.source_by_sel(sel).ok_or(ClockError::InvalidParent)?;
        let reference = self.rate_of(source.clock)?;

        let dv = self.read::<PLLDV::Register>(plldig::plldv(base));
        let fd = self.read::<PLLFD::Register>(plldig::pllfd(base));
        Ok(freq::pll_rate(
            reference,
            dv.read(PLLDV::RDIV),
            dv.read(PLLDV::MFI),
            fd.read(PLLFD::MFN),
        ))
    }

    pub(crate) fn enable_pll(&self, index: usize, pll: &Pll) -> Result<(), ClockError> {
        let (mux_index, mux) = self.pll_mux(pll)?;

        self.enable(pll.source)?;

        let target = self.requested_rate(index)?;
        let source = self
            .state(mux_index)
            .parent()
            .ok_or(ClockError::Unconfigured)?;
        let sel = mux.source(source).ok_or(ClockError::InvalidParent)?.sel;
        let reference = self.rate_of(source)?;
        let solution = freq::solve_pll(target, reference, C::RATE_POLICY)?;

        let base = self.bases.pll(pll.instance)?;
        let current_sel = self
            .read::<PLLCLKMUX::Register>(plldig::pllclkmux(base))
            .read(PLLCLKMUX::REFCLKSEL);
        if current_sel == sel && self.pll_running(base) && self.pll_vco(pll)? == solution.achieved
        {
            return Ok(());
        }

        self.program_pll(base, pll, sel, solution)
    }

    fn enabled_odivs(&self, base: usize, ndividers: u32) -> u32 {
        (0..ndividers)
            .filter(|&i| {
                self.read::<PLLODIV::Register>(plldig::pllodiv(base, i))
                    .is_set(PLLODIV::DE)
            })
            .fold(0, |mask, i| mask | (1 << i))
    }

    fn program_pll(
        &self,
        base: usize,
        pll: &Pll,
        sel: u32,
        solution: PllSolution,
    ) -> Result<(), ClockError> {
        debug!(
            "{:?} PLL: relock at {} Hz (mfi {}, mfn {})",
            pll.instance, solution.achieved, solution.mfi, solution.mfn
        );

        let odivs = self.enabled_odivs(base, pll.ndividers);
        let old_vco = self.pll_vco(pll)?;

        for i in (0..pll.ndividers).filter(|i| odivs & (1 << i) != 0) {
            self.modify(plldig::pllodiv(base, i), PLLODIV::DE::CLEAR);
        }

        self.write(plldig::pllcr(base), PLLCR::PLLPD::SET.value);
        self.write(
            plldig::pllclkmux(base),
            PLLCLKMUX::REFCLKSEL.val(sel).value,
        );
        self.write(
            plldig::plldv(base),
            (PLLDV::RDIV.val(1) + PLLDV::MFI.val(solution.mfi)).value,
        );
        self.write(
            plldig::pllfd(base),
            (PLLFD::MFN.val(solution.mfn) + PLLFD::SMDEN::SET).value,
        );

        self.rescale_odivs(base, pll, odivs, old_vco, solution.achieved);

        self.write(plldig::pllcr(base), 0);
        self.wait(
            plldig::pllsr(base),
            PLLSR::LOCK::SET,
            C::HANDSHAKES.pll_lock,
        )?;

        for i in (0..pll.ndividers).filter(|i| odivs & (1 << i) != 0) {
            self.modify(plldig::pllodiv(base, i), PLLODIV::DE::SET);
        }
        Ok(())
    }

    /// Keep the PHIs that were running at their previous output frequency.
    fn rescale_odivs(&self, base: usize, pll: &Pll, odivs: u32, old_vco: u64, new_vco: u64) {
        if old_vco == 0 {
            return;
        }

        for i in (0..pll.ndividers).filter(|i| odivs & (1 << i) != 0) {
            let addr = plldig::pllodiv(base, i);
            let odiv = self.read::<PLLODIV::Register>(addr);
            let old_rate = freq::div_rate(old_vco, odiv.read(PLLODIV::DIV) + 1);
            if old_rate == 0 {
                continue;
            }

            let divisor = (new_vco / old_rate).clamp(1, u64::from(DIV_MAX)) as u32;
            let new_rate = freq::div_rate(new_vco, divisor);
            if new_rate != old_rate {
                warn!(
                    "{:?} PLL: PHI{} moves from {} Hz to {} Hz",
                    pll.instance, i, old_rate, new_rate
                );
            }
            self.write(addr, PLLODIV::DIV.val(divisor - 1).value);
        }
    }

    pub(crate) fn pll_div_rate(&self, div: &PllDiv) -> Result<u64, ClockError> {
        let pll = self.pll_of(div.pll)?;
        let base = self.bases.pll(pll.instance)?;
        let odiv = self.read::<PLLODIV::Register>(plldig::pllodiv(base, div.index));
        if !odiv.is_set(PLLODIV::DE) {
            return Ok(0);
        }
        Ok(freq::div_rate(
            self.rate_of(div.pll)?,
            odiv.read(PLLODIV::DIV) + 1,
        ))
    }

    pub(crate) fn enable_pll_div(&self, index: usize, div: &PllDiv) -> Result<(), ClockError> {
        let target = self.requested_rate(index)?;

        self.enable(div.pll)?;

        let pll = self.pll_of(div.pll)?;
        let vco = self.rate_of(div.pll)?;
        if vco == 0 {
            return Err(ClockError::Unconfigured);
        }
        let solution = freq::solve_div(vco, target, DIV_MAX, C::RATE_POLICY)?;

        let base = self.bases.pll(pll.instance)?;
        let addr = plldig::pllodiv(base, div.index);
        let odiv = self.read::<PLLODIV::Register>(addr);

        // The divider field survives while DE is cleared. Reuse it when it
        // still produces the resolved rate.
        let persisted = odiv.read(PLLODIV::DIV) + 1;
        if freq::div_rate(vco, persisted) == solution.achieved {
            if !odiv.is_set(PLLODIV::DE) {
                self.modify(addr, PLLODIV::DE::SET);
            }
            return Ok(());
        }

        if odiv.is_set(PLLODIV::DE) {
            self.modify(addr, PLLODIV::DE::CLEAR);
        }
        let field = PLLODIV::DIV.val(solution.divisor - 1);
        self.write(addr, field.value);
        self.write(addr, (field + PLLODIV::DE::SET).value);
        Ok(())
    }
}
