// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! SCMI clock ids of the S32R45 accelerators.

use s32cc::scmi::{ScmiClock, ScmiTable, COMMON};

use crate::tree::ids as clk;

pub mod ids {
    use s32cc::scmi::{ScmiId, PLATFORM_BASE};

    /// LAX
    pub const LAX_MODULE: ScmiId = ScmiId(PLATFORM_BASE);
    /// SPT
    pub const SPT_SPT: ScmiId = ScmiId(PLATFORM_BASE + 1);
    pub const SPT_AXI: ScmiId = ScmiId(PLATFORM_BASE + 2);
    pub const SPT_MODULE: ScmiId = ScmiId(PLATFORM_BASE + 3);
}

static PLATFORM: [ScmiClock; 4] = [
    ScmiClock::Clock(clk::ACCEL4),
    ScmiClock::Clock(clk::ACCEL3),
    ScmiClock::Clock(clk::ACCEL3),
    ScmiClock::Clock(clk::ACCEL3_DIV3),
];

pub static SCMI: ScmiTable = ScmiTable::new(&COMMON, &PLATFORM);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TREE;

    #[test]
    fn table_matches_tree() {
        assert_eq!(SCMI.validate(&TREE), Ok(()));
        assert_eq!(SCMI.resolve(ids::SPT_AXI), Some(ScmiClock::Clock(clk::ACCEL3)));
        assert_eq!(
            SCMI.resolve(s32cc::scmi::ids::A53),
            Some(ScmiClock::Clock(s32cc::ids::A53_CORE))
        );
    }
}
