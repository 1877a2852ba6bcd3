// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Frequency arithmetic for PLLs, DFS ports and integer dividers.
//!
//! Every function here is pure. The solvers pick register field values for a
//! target frequency and report the frequency those fields really produce;
//! the `*_rate` helpers go the other way and are shared with `get_rate`, so
//! a solved configuration and a later register read-back always agree.
//!
//! The rate policy is only consulted here. Under [`RatePolicy::Exact`] a
//! solution that misses the target is an error, under
//! [`RatePolicy::Nearest`] it is returned with a warning.

use log::warn;

use crate::chip_specific::RatePolicy;
use crate::errorcode::ClockError;

pub const MHZ: u64 = 1_000_000;

/// Denominator of the PLL fractional multiplier (PLLFD.MFN).
pub const PLL_MFN_DENOMINATOR: u64 = 18432;
/// Denominator of the DFS fractional divider (DVPORT.MFN).
pub const DFS_MFN_DENOMINATOR: u64 = 36;

/// Hard limits of the PLLDIG VCO.
pub const PLL_VCO_MIN: u64 = 1300 * MHZ;
pub const PLL_VCO_MAX: u64 = 5000 * MHZ;

/// Width limits of the multiplier and divider fields.
pub const PLL_MFI_MAX: u32 = 0xff;
pub const DFS_MFI_MAX: u32 = 0xff;
pub const DIV_MAX: u32 = 0x100;
/// MC_CGM dividers only carry three bits.
pub const CGM_DIV_MAX: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllSolution {
    pub mfi: u32,
    pub mfn: u32,
    pub achieved: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DfsSolution {
    pub mfi: u32,
    pub mfn: u32,
    pub achieved: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivSolution {
    pub divisor: u32,
    pub achieved: u64,
}

fn accept(policy: RatePolicy, what: &str, target: u64, achieved: u64) -> Result<u64, ClockError> {
    if achieved == target {
        return Ok(achieved);
    }
    match policy {
        RatePolicy::Exact => Err(ClockError::FrequencyUnachievable),
        RatePolicy::Nearest => {
            warn!(
                "{}: cannot reach {} Hz, using nearest {} Hz",
                what, target, achieved
            );
            Ok(achieved)
        }
    }
}

/// VCO produced by a PLL fed with `reference`.
///
/// A zero RDIV behaves like a divide-by-one.
pub fn pll_rate(reference: u64, rdiv: u32, mfi: u32, mfn: u32) -> u64 {
    let rdiv = u128::from(rdiv.max(1));
    let numerator = u128::from(mfi) * u128::from(PLL_MFN_DENOMINATOR) + u128::from(mfn);
    let vco = u128::from(reference) * numerator / u128::from(PLL_MFN_DENOMINATOR) / rdiv;
    u64::try_from(vco).unwrap_or(u64::MAX)
}

/// Multiplier fields giving `target_vco` from `reference` with RDIV = 1.
pub fn solve_pll(
    target_vco: u64,
    reference: u64,
    policy: RatePolicy,
) -> Result<PllSolution, ClockError> {
    if reference == 0 || target_vco < PLL_VCO_MIN || target_vco > PLL_VCO_MAX {
        return Err(ClockError::FrequencyUnachievable);
    }

    let mut mfi = target_vco / reference;
    let remainder = target_vco % reference;
    let mut mfn = (remainder * PLL_MFN_DENOMINATOR + reference / 2) / reference;
    if mfn == PLL_MFN_DENOMINATOR {
        mfi += 1;
        mfn = 0;
    }
    if mfi > u64::from(PLL_MFI_MAX) {
        return Err(ClockError::FrequencyUnachievable);
    }

    let (mfi, mfn) = (mfi as u32, mfn as u32);
    let achieved = accept(policy, "pll", target_vco, pll_rate(reference, 1, mfi, mfn))?;
    Ok(PllSolution { mfi, mfn, achieved })
}

/// Output of a DFS port; a port with both fields cleared is off.
pub fn dfs_rate(input: u64, mfi: u32, mfn: u32) -> u64 {
    let steps = u64::from(mfi) * DFS_MFN_DENOMINATOR + u64::from(mfn);
    if steps == 0 {
        return 0;
    }
    input * DFS_MFN_DENOMINATOR / (2 * steps)
}

/// Divider fields giving `target` out of a DFS port fed with `input`.
pub fn solve_dfs(target: u64, input: u64, policy: RatePolicy) -> Result<DfsSolution, ClockError> {
    if target == 0 || input == 0 {
        return Err(ClockError::FrequencyUnachievable);
    }

    let period = 2 * target;
    let mut mfi = input / period;
    let remainder = input % period;
    let mut mfn = (remainder * DFS_MFN_DENOMINATOR + period / 2) / period;
    if mfn == DFS_MFN_DENOMINATOR {
        mfi += 1;
        mfn = 0;
    }
    if mfi == 0 || mfi > u64::from(DFS_MFI_MAX) {
        return Err(ClockError::FrequencyUnachievable);
    }

    let (mfi, mfn) = (mfi as u32, mfn as u32);
    let achieved = accept(policy, "dfs", target, dfs_rate(input, mfi, mfn))?;
    Ok(DfsSolution { mfi, mfn, achieved })
}

pub fn div_rate(parent: u64, divisor: u32) -> u64 {
    if divisor == 0 {
        return 0;
    }
    parent / u64::from(divisor)
}

/// Integer divisor closest to `parent / target`.
pub fn solve_div(
    parent: u64,
    target: u64,
    max_divisor: u32,
    policy: RatePolicy,
) -> Result<DivSolution, ClockError> {
    if parent == 0 || target == 0 {
        return Err(ClockError::FrequencyUnachievable);
    }

    let divisor = ((parent + target / 2) / target).max(1);
    if divisor > u64::from(max_divisor) {
        return Err(ClockError::FrequencyUnachievable);
    }

    let divisor = divisor as u32;
    let achieved = accept(policy, "div", target, div_rate(parent, divisor))?;
    Ok(DivSolution { divisor, achieved })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip_specific::RatePolicy::{Exact, Nearest};

    #[test]
    fn pll_from_40mhz_to_1300mhz() {
        let s = solve_pll(1300 * MHZ, 40 * MHZ, Exact).unwrap();
        assert_eq!(s.mfi, 32);
        assert_eq!(s.mfn, 9216);
        assert_eq!(s.achieved, 1300 * MHZ);
    }

    #[test]
    fn pll_exact_targets_reconstruct() {
        for reference in [24 * MHZ, 40 * MHZ, 48 * MHZ] {
            for mfi in [33, 40, 50, 80] {
                for mfn in [0, 3600, 9216, 18000] {
                    // Only fractions that land on a whole hertz are exact.
                    if (reference * mfn) % PLL_MFN_DENOMINATOR != 0 {
                        continue;
                    }
                    let target = reference * mfi + reference * mfn / PLL_MFN_DENOMINATOR;
                    if target < PLL_VCO_MIN || target > PLL_VCO_MAX {
                        continue;
                    }
                    let s = solve_pll(target, reference, Exact).unwrap();
                    assert_eq!((u64::from(s.mfi), u64::from(s.mfn)), (mfi, mfn));
                    assert_eq!(pll_rate(reference, 1, s.mfi, s.mfn), target);
                }
            }
        }
    }

    #[test]
    fn pll_nearest_is_closest() {
        let reference = 40 * MHZ;
        for target in [1_333_333_333u64, 1_999_999_000, 1_487_654_321] {
            let s = solve_pll(target, reference, Nearest).unwrap();
            let chosen = u64::from(s.mfi) * PLL_MFN_DENOMINATOR + u64::from(s.mfn);
            let best = s.achieved.abs_diff(target);
            for k in chosen - 4..=chosen + 4 {
                let mfi = (k / PLL_MFN_DENOMINATOR) as u32;
                let mfn = (k % PLL_MFN_DENOMINATOR) as u32;
                assert!(pll_rate(reference, 1, mfi, mfn).abs_diff(target) >= best);
            }
        }
    }

    #[test]
    fn pll_inexact_is_rejected_when_strict() {
        assert_eq!(
            solve_pll(1_333_333_000, 40 * MHZ, Exact),
            Err(ClockError::FrequencyUnachievable)
        );
    }

    #[test]
    fn pll_outside_band() {
        assert_eq!(
            solve_pll(1000 * MHZ, 40 * MHZ, Nearest),
            Err(ClockError::FrequencyUnachievable)
        );
        assert_eq!(
            solve_pll(5200 * MHZ, 40 * MHZ, Nearest),
            Err(ClockError::FrequencyUnachievable)
        );
    }

    #[test]
    fn pll_rdiv_zero_is_one() {
        assert_eq!(pll_rate(40 * MHZ, 0, 50, 0), pll_rate(40 * MHZ, 1, 50, 0));
    }

    #[test]
    fn pll_rate_saturates() {
        assert_eq!(pll_rate(u64::MAX, 1, PLL_MFI_MAX, 0), u64::MAX);
        assert_eq!(pll_rate(u64::MAX / 0xff, 1, 0xff, 0), u64::MAX / 0xff * 0xff);
    }

    #[test]
    fn dfs_xbar() {
        let s = solve_dfs(800 * MHZ, 2000 * MHZ, Exact).unwrap();
        assert_eq!((s.mfi, s.mfn), (1, 9));
        assert_eq!(s.achieved, 800 * MHZ);
    }

    #[test]
    fn dfs_rounds_fraction() {
        // 2000 / (2 * 333.33) = 3.0000003, rounds back to mfn 0
        let s = solve_dfs(333_333_333, 2000 * MHZ, Nearest).unwrap();
        assert_eq!((s.mfi, s.mfn), (3, 0));
        assert_eq!(s.achieved, 333_333_333);
    }

    #[test]
    fn dfs_too_fast() {
        assert_eq!(
            solve_dfs(1500 * MHZ, 2000 * MHZ, Nearest),
            Err(ClockError::FrequencyUnachievable)
        );
    }

    #[test]
    fn dfs_off() {
        assert_eq!(dfs_rate(2000 * MHZ, 0, 0), 0);
    }

    #[test]
    fn div_rounds_to_nearest() {
        let s = solve_div(1300 * MHZ, 100 * MHZ, DIV_MAX, Exact).unwrap();
        assert_eq!(s.divisor, 13);
        assert_eq!(s.achieved, 100 * MHZ);

        let s = solve_div(2000 * MHZ, 133_333_333, DIV_MAX, Nearest).unwrap();
        assert_eq!(s.divisor, 15);
        assert_eq!(s.achieved, 133_333_333);

        let s = solve_div(1000 * MHZ, 300 * MHZ, DIV_MAX, Nearest).unwrap();
        assert_eq!(s.divisor, 3);
        assert_eq!(
            solve_div(1000 * MHZ, 300 * MHZ, DIV_MAX, Exact),
            Err(ClockError::FrequencyUnachievable)
        );
    }

    #[test]
    fn div_field_width() {
        assert_eq!(
            solve_div(2000 * MHZ, 1 * MHZ, DIV_MAX, Nearest),
            Err(ClockError::FrequencyUnachievable)
        );
        assert_eq!(solve_div(10, 1000, DIV_MAX, Nearest).unwrap().divisor, 1);

        assert_eq!(solve_div(48 * MHZ, 6 * MHZ, CGM_DIV_MAX, Exact).unwrap().divisor, 8);
        assert_eq!(
            solve_div(48 * MHZ, 4 * MHZ, CGM_DIV_MAX, Nearest),
            Err(ClockError::FrequencyUnachievable)
        );
    }
}
