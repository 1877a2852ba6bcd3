// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

use log::debug;

use crate::bus::RegisterBus;
use crate::chip_specific::ChipSpecs;
use crate::clocks::Clocks;
use crate::errorcode::ClockError;
use crate::registers::{fxosc, FXOSC_CTRL, FXOSC_STAT};

impl<B: RegisterBus, C: ChipSpecs> Clocks<'_, B, C> {
    /// Start the crystal oscillator unless an earlier stage already did.
    ///
    /// The analog inputs must not change while the oscillator is on, so a
    /// running FXOSC is left untouched.
    pub(crate) fn enable_fxosc(&self) -> Result<(), ClockError> {
        let base = self.bases.fxosc()?;
        let ctrl_addr = fxosc::ctrl(base);

        if self
            .read::<FXOSC_CTRL::Register>(ctrl_addr)
            .is_set(FXOSC_CTRL::OSCON)
        {
            return Ok(());
        }

        debug!("starting FXOSC");
        self.write(
            ctrl_addr,
            (FXOSC_CTRL::COMP_EN::SET
                + FXOSC_CTRL::OSC_BYP::CLEAR
                + FXOSC_CTRL::EOCV.val(1)
                + FXOSC_CTRL::GM_SEL.val(7))
            .value,
        );
        self.modify(ctrl_addr, FXOSC_CTRL::OSCON::SET);

        self.wait(
            fxosc::stat(base),
            FXOSC_STAT::OSC_STAT::SET,
            C::HANDSHAKES.fxosc,
        )
    }
}
