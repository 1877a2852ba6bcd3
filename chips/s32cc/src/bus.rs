// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Register access and the handshake primitive.
//!
//! All hardware traffic of the clock engine goes through [`RegisterBus`].
//! On the SoC this is [`MmioBus`], which turns addresses into volatile
//! accesses. Tests substitute a simulated bus that records writes and
//! emulates the acknowledgement bits.
//!
//! Every write with a hardware-acknowledged side effect is followed by
//! [`poll_until`]. It reads at most `max_iterations` times and never blocks
//! forever:
//!
//! ```rust,ignore
//! wait_for(bus, plldig::pllsr(base), PLLSR::LOCK::SET, budget)?;
//! ```

use log::{error, trace};
use tock_registers::fields::FieldValue;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::{LocalRegisterCopy, RegisterLongName};

use crate::chip_specific::Budget;
use crate::config::CONFIG;
use crate::errorcode::ClockError;

/// 32-bit register access by physical address.
pub trait RegisterBus {
    fn read(&self, addr: usize) -> u32;
    fn write(&self, addr: usize, value: u32);
}

/// Memory-mapped register access.
pub struct MmioBus {
    _private: (),
}

impl MmioBus {
    /// # Safety
    ///
    /// Every address the engine derives from its `BaseAddresses` must be a
    /// mapped, 4-byte aligned clocking register, and nothing else may access
    /// those registers while the engine runs.
    pub const unsafe fn new() -> Self {
        MmioBus { _private: () }
    }

    fn register(&self, addr: usize) -> &ReadWrite<u32> {
        // Safety: guaranteed by the contract of `MmioBus::new`.
        unsafe { &*(addr as *const ReadWrite<u32>) }
    }
}

impl RegisterBus for MmioBus {
    fn read(&self, addr: usize) -> u32 {
        self.register(addr).get()
    }

    fn write(&self, addr: usize, value: u32) {
        self.register(addr).set(value);
    }
}

pub(crate) fn read_copy<B: RegisterBus, R: RegisterLongName>(
    bus: &B,
    addr: usize,
) -> LocalRegisterCopy<u32, R> {
    LocalRegisterCopy::new(bus.read(addr))
}

pub(crate) fn write<B: RegisterBus>(bus: &B, addr: usize, value: u32) {
    if CONFIG.trace_register_writes {
        trace!("{:#010x} <- {:#010x}", addr, value);
    }
    bus.write(addr, value);
}

/// Read-modify-write of the fields in `field`.
pub(crate) fn modify<B: RegisterBus, R: RegisterLongName>(
    bus: &B,
    addr: usize,
    field: FieldValue<u32, R>,
) {
    let mut reg: LocalRegisterCopy<u32, R> = read_copy(bus, addr);
    reg.modify(field);
    write(bus, addr, reg.get());
}

/// Busy-wait until `read(addr) & mask == expected`.
///
/// The register is read at most `max_iterations` times, with `spin_delay`
/// spin-loop hints in between. A budget of zero iterations times out
/// without touching the register.
pub fn poll_until<B: RegisterBus>(
    bus: &B,
    addr: usize,
    mask: u32,
    expected: u32,
    spin_delay: u32,
    max_iterations: u32,
) -> Result<(), ClockError> {
    for _ in 0..max_iterations {
        if bus.read(addr) & mask == expected {
            return Ok(());
        }
        for _ in 0..spin_delay {
            core::hint::spin_loop();
        }
    }
    Err(ClockError::HardwareTimeout)
}

/// Wait for the register at `addr` to match `field`.
pub(crate) fn wait_for<B: RegisterBus, R: RegisterLongName>(
    bus: &B,
    addr: usize,
    field: FieldValue<u32, R>,
    budget: Budget,
) -> Result<(), ClockError> {
    wait_mask(bus, addr, field.mask(), field.value, budget)
}

pub(crate) fn wait_mask<B: RegisterBus>(
    bus: &B,
    addr: usize,
    mask: u32,
    expected: u32,
    budget: Budget,
) -> Result<(), ClockError> {
    poll_until(
        bus,
        addr,
        mask,
        expected,
        budget.spin_delay,
        budget.max_iterations,
    )
    .map_err(|err| {
        error!(
            "timeout at {:#010x}: mask {:#010x} expected {:#010x}",
            addr, mask, expected
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, BASES};

    #[test]
    fn zero_iterations_never_reads() {
        let bus = FakeBus::new(&BASES);
        bus.poke(0x100, 1);
        assert_eq!(
            poll_until(&bus, 0x100, 1, 1, 10, 0),
            Err(ClockError::HardwareTimeout)
        );
        assert_eq!(bus.reads(), 0);
    }

    #[test]
    fn reads_bounded_by_budget() {
        let bus = FakeBus::new(&BASES);
        assert_eq!(
            poll_until(&bus, 0x100, 1, 1, 0, 5),
            Err(ClockError::HardwareTimeout)
        );
        assert_eq!(bus.reads(), 5);
    }

    #[test]
    fn first_match_returns() {
        let bus = FakeBus::new(&BASES);
        bus.poke(0x100, 0x8000_0001);
        assert_eq!(poll_until(&bus, 0x100, 0x8000_0000, 0x8000_0000, 0, 5), Ok(()));
        assert_eq!(bus.reads(), 1);
    }

    #[test]
    fn modify_keeps_other_fields() {
        use crate::registers::PLLODIV;

        let bus = FakeBus::new(&BASES);
        bus.poke(0x80, PLLODIV::DIV.val(12).value);
        modify(&bus, 0x80, PLLODIV::DE::SET);
        let reg: LocalRegisterCopy<u32, PLLODIV::Register> = read_copy(&bus, 0x80);
        assert!(reg.is_set(PLLODIV::DE));
        assert_eq!(reg.read(PLLODIV::DIV), 12);
    }
}
