// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Error enum returned by every clock operation.

use core::fmt;

/// Failures reported by the clock engine.
///
/// Graph-shape errors (`UnknownClockId`, `InvalidParent`) point at a broken
/// clock table and should be treated as fatal. Hardware and arithmetic
/// failures are left to the caller, see [`ClockError::is_recoverable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ClockError {
    /// The handle is not present in the loaded tree
    UnknownClockId = 0,
    /// A declared dependency is missing or of the wrong kind
    InvalidParent = 1,
    /// The requested frequency cannot be produced exactly
    FrequencyUnachievable = 2,
    /// Two consumers disagree on a shared mux or rate
    ConflictingConfiguration = 3,
    /// A hardware acknowledgement never arrived
    HardwareTimeout = 4,
    /// A mux switch completed but not onto the requested source
    SwitchFailed = 5,
    /// A DFS port reported loss of lock
    LockLost = 6,
    /// A rate or parent the operation depends on was never set
    Unconfigured = 7,
    /// The requested rate is outside the clock's validity band
    OutOfRange = 8,
}

impl ClockError {
    /// Whether boot may continue with a degraded clock after this error.
    pub fn is_recoverable(self) -> bool {
        match self {
            ClockError::HardwareTimeout
            | ClockError::FrequencyUnachievable
            | ClockError::SwitchFailed
            | ClockError::LockLost => true,
            ClockError::UnknownClockId
            | ClockError::InvalidParent
            | ClockError::ConflictingConfiguration
            | ClockError::Unconfigured
            | ClockError::OutOfRange => false,
        }
    }
}

impl From<ClockError> for usize {
    fn from(err: ClockError) -> usize {
        err as usize
    }
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ClockError::UnknownClockId => "unknown clock id",
            ClockError::InvalidParent => "invalid clock parent",
            ClockError::FrequencyUnachievable => "frequency unachievable",
            ClockError::ConflictingConfiguration => "conflicting clock configuration",
            ClockError::HardwareTimeout => "hardware handshake timed out",
            ClockError::SwitchFailed => "clock switch failed",
            ClockError::LockLost => "loss of lock",
            ClockError::Unconfigured => "clock not configured",
            ClockError::OutOfRange => "rate out of range",
        };
        f.write_str(msg)
    }
}
