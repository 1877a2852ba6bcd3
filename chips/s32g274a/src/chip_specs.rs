// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! S32G274A parameters of the clock engine.

use s32cc::freq::MHZ;
use s32cc::{BaseAddresses, Budget, ChipSpecs, EarlyFrequencies, Handshakes, RatePolicy};

pub struct S32g274aSpecs;

impl ChipSpecs for S32g274aSpecs {
    const RATE_POLICY: RatePolicy = if cfg!(feature = "nearest_freq") {
        RatePolicy::Nearest
    } else {
        RatePolicy::Exact
    };

    const HANDSHAKES: Handshakes = Handshakes {
        fxosc: Budget::new(100, 100_000),
        pll_lock: Budget::new(10, 100_000),
        mux_switch: Budget::new(0, 10_000),
        div_update: Budget::new(0, 10_000),
        dfs_port: Budget::new(10, 100_000),
        partition: Budget::new(10, 100_000),
    };
}

pub const BASES: BaseAddresses = BaseAddresses {
    fxosc: Some(0x4005_0000),
    arm_pll: Some(0x4003_8000),
    periph_pll: Some(0x4003_c000),
    accel_pll: Some(0x4004_0000),
    ddr_pll: Some(0x4004_4000),
    arm_dfs: Some(0x4005_4000),
    periph_dfs: Some(0x4005_8000),
    cgm0: Some(0x4003_0000),
    cgm1: Some(0x4003_4000),
    cgm2: Some(0x4401_8000),
    cgm5: Some(0x4006_8000),
    mc_me: Some(0x4008_8000),
    rdc: Some(0x4008_0000),
    rgm: Some(0x4007_8000),
    siul2: Some(0x4009_c000),
};

/// Boot frequencies for a board with a 40 MHz crystal.
pub const EARLY: EarlyFrequencies = EarlyFrequencies {
    fxosc: 40 * MHZ,
    a53: 1000 * MHZ,
    arm_pll_vco: 2000 * MHZ,
    xbar_2x: 800 * MHZ,
    periph_pll_vco: 2000 * MHZ,
    lin_baud: 133_333_333,
    ddr_pll_vco: 1600 * MHZ,
    ddr: 800 * MHZ,
};
