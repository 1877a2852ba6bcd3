// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Register layouts of the S32CC clocking IP.
//!
//! The engine reaches hardware through [`RegisterBus`](crate::bus::RegisterBus)
//! with plain addresses, so each block gets a set of address helpers next to
//! its field definitions instead of a `#[repr(C)]` register struct. The blocks
//! are sparse (CGM muxes sit 0x40 apart, MC_ME partitions 0x200 apart) and
//! only a handful of registers per block are ever touched.

use tock_registers::register_bitfields;

register_bitfields![u32,
    pub FXOSC_CTRL [
        /// Bypass the crystal with an external square wave
        OSC_BYP OFFSET(31) NUMBITS(1) [],
        /// Comparator enable
        COMP_EN OFFSET(24) NUMBITS(1) [],
        /// End of count value for the stabilization counter
        EOCV OFFSET(16) NUMBITS(8) [],
        /// Transconductance selection
        GM_SEL OFFSET(4) NUMBITS(4) [],
        OSCON OFFSET(0) NUMBITS(1) []
    ],
    pub FXOSC_STAT [
        OSC_STAT OFFSET(31) NUMBITS(1) []
    ],
    pub CGM_CSC [
        SELCTL OFFSET(24) NUMBITS(6) [],
        /// Trigger a clock switch, auto-clears
        CLK_SW OFFSET(2) NUMBITS(1) []
    ],
    pub CGM_CSS [
        SELSTAT OFFSET(24) NUMBITS(6) [],
        /// Cause of the last switch
        SWTRG OFFSET(17) NUMBITS(3) [
            Success = 1,
            Pending = 2,
            SourceInactive = 4
        ],
        /// Switch in progress
        SWIP OFFSET(16) NUMBITS(1) []
    ],
    pub CGM_DC [
        DE OFFSET(31) NUMBITS(1) [],
        DIV OFFSET(16) NUMBITS(3) []
    ],
    pub CGM_DIV_UPD_STAT [
        DIVSTAT OFFSET(0) NUMBITS(1) []
    ],
    pub PLLCR [
        /// Power down
        PLLPD OFFSET(31) NUMBITS(1) []
    ],
    pub PLLSR [
        LOCK OFFSET(2) NUMBITS(1) []
    ],
    pub PLLDV [
        RDIV OFFSET(12) NUMBITS(3) [],
        MFI OFFSET(0) NUMBITS(8) []
    ],
    pub PLLFD [
        /// Sigma-delta modulation enable
        SMDEN OFFSET(30) NUMBITS(1) [],
        MFN OFFSET(0) NUMBITS(15) []
    ],
    pub PLLCLKMUX [
        REFCLKSEL OFFSET(0) NUMBITS(2) [
            Firc = 0,
            Fxosc = 1
        ]
    ],
    pub PLLODIV [
        DE OFFSET(31) NUMBITS(1) [],
        DIV OFFSET(16) NUMBITS(8) []
    ],
    pub DFS_PORTS [
        /// One bit per port, used by PORTSR, PORTOLSR and PORTRESET
        PORT OFFSET(0) NUMBITS(6) [
            All = 0x3f
        ]
    ],
    pub DFS_CTL [
        RESET OFFSET(1) NUMBITS(1) []
    ],
    pub DFS_DVPORT [
        MFI OFFSET(8) NUMBITS(8) [],
        MFN OFFSET(0) NUMBITS(8) []
    ],
    pub MC_ME_CTL_KEY [
        KEY OFFSET(0) NUMBITS(16) [
            Key = 0x5af0,
            InvertedKey = 0xa50f
        ]
    ],
    pub MC_ME_PCONF [
        /// Output safe stage enable
        OSSE OFFSET(2) NUMBITS(1) [],
        /// Partition clock enable
        PCE OFFSET(0) NUMBITS(1) []
    ],
    pub MC_ME_PUPD [
        OSSUD OFFSET(2) NUMBITS(1) [],
        PCUD OFFSET(0) NUMBITS(1) []
    ],
    pub MC_ME_STAT [
        OSSS OFFSET(2) NUMBITS(1) [],
        PCS OFFSET(0) NUMBITS(1) []
    ],
    pub RDC_CTRL [
        UNLOCK OFFSET(31) NUMBITS(1) [],
        INTERCONNECT_DISABLE OFFSET(3) NUMBITS(1) []
    ],
    pub RDC_STATUS [
        INTERCONNECT_DISABLE_STAT OFFSET(4) NUMBITS(1) []
    ],
    pub RGM_PRST [
        PERIPH_RST OFFSET(0) NUMBITS(1) []
    ],
    pub RGM_PSTAT [
        PERIPH_STAT OFFSET(0) NUMBITS(1) []
    ],
    pub SIUL2_MIDR2 [
        FREQ OFFSET(16) NUMBITS(4) []
    ]
];

pub mod fxosc {
    pub const fn ctrl(base: usize) -> usize {
        base
    }

    pub const fn stat(base: usize) -> usize {
        base + 0x4
    }
}

/// MC_CGM. Every mux owns a 0x40 wide window starting at 0x300.
pub mod cgm {
    const fn mux(base: usize, mux: u32) -> usize {
        base + 0x300 + mux as usize * 0x40
    }

    pub const fn csc(base: usize, index: u32) -> usize {
        mux(base, index)
    }

    pub const fn css(base: usize, index: u32) -> usize {
        mux(base, index) + 0x4
    }

    pub const fn dc(base: usize, index: u32, div: u32) -> usize {
        mux(base, index) + 0x8 + div as usize * 0x4
    }

    pub const fn div_upd_stat(base: usize, index: u32) -> usize {
        mux(base, index) + 0x3c
    }
}

pub mod plldig {
    pub const fn pllcr(base: usize) -> usize {
        base
    }

    pub const fn pllsr(base: usize) -> usize {
        base + 0x4
    }

    pub const fn plldv(base: usize) -> usize {
        base + 0x8
    }

    pub const fn pllfd(base: usize) -> usize {
        base + 0x10
    }

    pub const fn pllclkmux(base: usize) -> usize {
        base + 0x20
    }

    pub const fn pllodiv(base: usize, n: u32) -> usize {
        base + 0x80 + n as usize * 0x4
    }
}

pub mod dfs {
    pub const fn portsr(base: usize) -> usize {
        base + 0xc
    }

    pub const fn portolsr(base: usize) -> usize {
        base + 0x10
    }

    pub const fn portreset(base: usize) -> usize {
        base + 0x14
    }

    pub const fn ctl(base: usize) -> usize {
        base + 0x18
    }

    pub const fn dvport(base: usize, port: u32) -> usize {
        base + 0x1c + port as usize * 0x4
    }
}

/// MC_ME. Partition `n` registers start at 0x100 + n * 0x200.
pub mod mc_me {
    const fn prtn(base: usize, n: u32) -> usize {
        base + 0x100 + n as usize * 0x200
    }

    pub const fn ctl_key(base: usize) -> usize {
        base
    }

    pub const fn pconf(base: usize, n: u32) -> usize {
        prtn(base, n)
    }

    pub const fn pupd(base: usize, n: u32) -> usize {
        prtn(base, n) + 0x4
    }

    pub const fn stat(base: usize, n: u32) -> usize {
        prtn(base, n) + 0x8
    }

    pub const fn cofb0_stat(base: usize, n: u32) -> usize {
        prtn(base, n) + 0x10
    }

    pub const fn cofb0_clken(base: usize, n: u32) -> usize {
        prtn(base, n) + 0x30
    }
}

pub mod rdc {
    pub const fn ctrl(base: usize, n: u32) -> usize {
        base + n as usize * 0x4
    }

    pub const fn status(base: usize, n: u32) -> usize {
        base + 0x80 + n as usize * 0x4
    }
}

pub mod rgm {
    pub const fn prst(base: usize, n: u32) -> usize {
        base + 0x40 + n as usize * 0x8
    }

    pub const fn pstat(base: usize, n: u32) -> usize {
        base + 0x140 + n as usize * 0x8
    }
}

pub mod siul2 {
    pub const fn midr2(base: usize) -> usize {
        base + 0x8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cgm_windows() {
        assert_eq!(cgm::csc(0x4003_0000, 0), 0x4003_0300);
        assert_eq!(cgm::css(0x4003_0000, 8), 0x4003_0504);
        assert_eq!(cgm::dc(0x4003_0000, 1, 0), 0x4003_0348);
        assert_eq!(cgm::div_upd_stat(0x4003_0000, 0), 0x4003_033c);
    }

    #[test]
    fn partition_windows() {
        assert_eq!(mc_me::pconf(0x4008_8000, 1), 0x4008_8300);
        assert_eq!(mc_me::cofb0_clken(0x4008_8000, 0), 0x4008_8130);
    }
}
