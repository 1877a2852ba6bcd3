// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clock graph vocabulary.
//!
//! A clock tree is a static table of [`Clock`]s. Callers name clocks by
//! [`ClockId`]. Each clock either wraps a hardware [`Module`] or aliases
//! another clock. Modules refer to their upstream clocks by id, so a tree
//! is plain `'static` data that can be built in `const` context:
//!
//! ```rust,ignore
//! pub static PERIPH_PLL_PHI3: Clock = Clock::module_in(
//!     ids::PERIPH_PLL_PHI3,
//!     "periph_pll_phi3",
//!     Module::PllDiv(PllDiv::new(ids::PERIPH_PLL_VCO, 3)),
//!     0,
//!     133_333_333,
//! );
//! ```
//!
//! The only run-time state is the [`ClockState`] slice kept next to the
//! tree: requested rates and selected mux sources.

use core::cell::Cell;

use log::error;

use crate::errorcode::ClockError;

/// Opaque clock handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockId(pub u32);

/// Inclusive validity band of a logical clock, in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreqRange {
    pub min: u64,
    pub max: u64,
}

impl FreqRange {
    pub const fn new(min: u64, max: u64) -> Self {
        FreqRange { min, max }
    }

    pub fn contains(&self, hz: u64) -> bool {
        hz >= self.min && hz <= self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OscKind {
    /// Fast internal RC, always running
    Firc,
    /// Slow internal RC, always running
    Sirc,
    /// External crystal
    Fxosc,
}

#[derive(Clone, Copy, Debug)]
pub struct Oscillator {
    pub kind: OscKind,
    /// Default frequency, 0 if the board has to supply it
    pub freq: u64,
}

/// A clock driven from outside the clocking IP.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    pub freq: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PllInstance {
    Arm,
    Periph,
    Accel,
    Ddr,
}

#[derive(Clone, Copy, Debug)]
pub struct Pll {
    pub instance: PllInstance,
    /// Clock wrapping the reference mux of this PLL
    pub source: ClockId,
    /// Number of PHI output dividers
    pub ndividers: u32,
}

/// One PHI output of a PLL.
#[derive(Clone, Copy, Debug)]
pub struct PllDiv {
    pub pll: ClockId,
    pub index: u32,
}

impl PllDiv {
    pub const fn new(pll: ClockId, index: u32) -> Self {
        PllDiv { pll, index }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DfsInstance {
    Arm,
    Periph,
}

#[derive(Clone, Copy, Debug)]
pub struct Dfs {
    pub instance: DfsInstance,
    /// VCO clock of the PLL feeding this DFS
    pub source: ClockId,
}

/// One port of a DFS.
#[derive(Clone, Copy, Debug)]
pub struct DfsDiv {
    pub dfs: ClockId,
    pub index: u32,
}

impl DfsDiv {
    pub const fn new(dfs: ClockId, index: u32) -> Self {
        DfsDiv { dfs, index }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CgmInstance {
    Cgm0,
    Cgm1,
    Cgm2,
    Cgm5,
}

/// Hardware block a mux lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuxBlock {
    /// PLLCLKMUX of a PLL
    Pll(PllInstance),
    /// A MC_CGM clock selector
    Cgm(CgmInstance),
}

/// An allowed mux input and the selector value that picks it.
#[derive(Clone, Copy, Debug)]
pub struct MuxSource {
    pub clock: ClockId,
    pub sel: u32,
}

pub const fn src(clock: ClockId, sel: u32) -> MuxSource {
    MuxSource { clock, sel }
}

/// A MC_CGM source. Selector values of MC_CGM inputs are the clock ids.
pub const fn cgm_src(clock: ClockId) -> MuxSource {
    MuxSource {
        clock,
        sel: clock.0,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Mux {
    pub block: MuxBlock,
    pub index: u32,
    pub sources: &'static [MuxSource],
}

impl Mux {
    pub const fn new(block: MuxBlock, index: u32, sources: &'static [MuxSource]) -> Self {
        Mux {
            block,
            index,
            sources,
        }
    }

    pub fn source(&self, clock: ClockId) -> Option<&MuxSource> {
        self.sources.iter().find(|s| s.clock == clock)
    }

    pub fn source_by_sel(&self, sel: u32) -> Option<&MuxSource> {
        self.sources.iter().find(|s| s.sel == sel)
    }
}

/// Integer divider `index` behind a MC_CGM mux.
#[derive(Clone, Copy, Debug)]
pub struct CgmDiv {
    pub mux: ClockId,
    pub index: u32,
}

impl CgmDiv {
    pub const fn new(mux: ClockId, index: u32) -> Self {
        CgmDiv { mux, index }
    }
}

/// Divide-by-constant without a register.
#[derive(Clone, Copy, Debug)]
pub struct FixedDiv {
    pub parent: ClockId,
    pub div: u32,
}

impl FixedDiv {
    pub const fn new(parent: ClockId, div: u32) -> Self {
        FixedDiv { parent, div }
    }
}

/// A COFB clock-enable bit of a MC_ME partition.
#[derive(Clone, Copy, Debug)]
pub struct PartBlock {
    pub parent: ClockId,
    pub partition: u32,
    pub block: u32,
    /// Wait for the block's COFB status bit after enabling it
    pub status: bool,
}

impl PartBlock {
    pub const fn new(parent: ClockId, partition: u32, block: u32, status: bool) -> Self {
        PartBlock {
            parent,
            partition,
            block,
            status,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Module {
    Osc(Oscillator),
    Fixed(FixedClock),
    Pll(Pll),
    PllDiv(PllDiv),
    Dfs(Dfs),
    DfsDiv(DfsDiv),
    Mux(Mux),
    /// A mux referenced by several consumers that must agree on its source
    SharedMux(Mux),
    CgmDiv(CgmDiv),
    FixedDiv(FixedDiv),
    PartBlock(PartBlock),
}

#[derive(Clone, Copy, Debug)]
pub enum ClockKind {
    Module(Module),
    /// Alias of another logical clock
    Child(ClockId),
}

/// A logical clock, the unit callers name.
#[derive(Debug)]
pub struct Clock {
    pub id: ClockId,
    pub name: &'static str,
    pub kind: ClockKind,
    /// Diagnostic band, enforced only by `set_rate`
    pub range: Option<FreqRange>,
}

impl Clock {
    pub const fn module(id: ClockId, name: &'static str, module: Module) -> Self {
        Clock {
            id,
            name,
            kind: ClockKind::Module(module),
            range: None,
        }
    }

    pub const fn module_in(
        id: ClockId,
        name: &'static str,
        module: Module,
        min: u64,
        max: u64,
    ) -> Self {
        Clock {
            id,
            name,
            kind: ClockKind::Module(module),
            range: Some(FreqRange::new(min, max)),
        }
    }

    pub const fn child(id: ClockId, name: &'static str, parent: ClockId) -> Self {
        Clock {
            id,
            name,
            kind: ClockKind::Child(parent),
            range: None,
        }
    }

    pub const fn child_in(
        id: ClockId,
        name: &'static str,
        parent: ClockId,
        min: u64,
        max: u64,
    ) -> Self {
        Clock {
            id,
            name,
            kind: ClockKind::Child(parent),
            range: Some(FreqRange::new(min, max)),
        }
    }

    pub fn module_ref(&self) -> Option<&Module> {
        match self.kind {
            ClockKind::Module(ref module) => Some(module),
            ClockKind::Child(_) => None,
        }
    }

    /// The mux wrapped by this clock, and whether it is shared.
    pub fn mux(&self) -> Option<(&Mux, bool)> {
        match self.module_ref()? {
            Module::Mux(mux) => Some((mux, false)),
            Module::SharedMux(mux) => Some((mux, true)),
            _ => None,
        }
    }
}

/// Per-clock run-time state, kept in a slice parallel to the tree.
pub struct ClockState {
    rate: Cell<u64>,
    parent: Cell<Option<ClockId>>,
}

impl ClockState {
    pub const fn new() -> Self {
        ClockState {
            rate: Cell::new(0),
            parent: Cell::new(None),
        }
    }

    /// Requested rate, 0 if never set.
    pub fn rate(&self) -> u64 {
        self.rate.get()
    }

    /// Selected mux source.
    pub fn parent(&self) -> Option<ClockId> {
        self.parent.get()
    }

    pub(crate) fn set_rate(&self, hz: u64) {
        self.rate.set(hz);
    }

    pub(crate) fn set_parent(&self, parent: ClockId) {
        self.parent.set(Some(parent));
    }
}

const DFS_PORTS: u32 = 6;
const COFB_BLOCKS: u32 = 32;
const CGM_SELECTORS: u32 = 64;

/// A static clock table, possibly split in several segments so a SoC can
/// append its own clocks to the family-wide ones. Clocks are indexed in
/// segment order.
pub struct ClockTree {
    segments: &'static [&'static [&'static Clock]],
}

impl ClockTree {
    pub const fn new(segments: &'static [&'static [&'static Clock]]) -> Self {
        ClockTree { segments }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Clock> {
        self.segments
            .iter()
            .flat_map(|segment| segment.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }

    pub fn clock(&self, index: usize) -> Option<&'static Clock> {
        self.iter().nth(index)
    }

    pub fn find(&self, id: ClockId) -> Option<(usize, &'static Clock)> {
        self.iter().enumerate().find(|(_, clock)| clock.id == id)
    }

    pub fn get(&self, id: ClockId) -> Result<(usize, &'static Clock), ClockError> {
        self.find(id).ok_or(ClockError::UnknownClockId)
    }

    fn module_of(&self, id: ClockId) -> Option<&'static Module> {
        self.find(id).and_then(|(_, clock)| clock.module_ref())
    }

    /// Check that ids are unique and every reference resolves to a clock of
    /// the expected kind.
    pub fn validate(&self) -> Result<(), ClockError> {
        for (index, clock) in self.iter().enumerate() {
            if self.iter().take(index).any(|c| c.id == clock.id) {
                error!("clock {} ({}): duplicate id", clock.name, clock.id.0);
                return Err(ClockError::InvalidParent);
            }
            if let Some(range) = clock.range {
                if range.min > range.max {
                    error!("clock {}: empty range", clock.name);
                    return Err(ClockError::InvalidParent);
                }
            }
            if !self.references_valid(clock) {
                error!("clock {} ({}): invalid reference", clock.name, clock.id.0);
                return Err(ClockError::InvalidParent);
            }
        }
        Ok(())
    }

    fn references_valid(&self, clock: &Clock) -> bool {
        let module = match clock.kind {
            ClockKind::Child(parent) => return self.find(parent).is_some(),
            ClockKind::Module(ref module) => module,
        };

        match module {
            Module::Osc(_) | Module::Fixed(_) => true,
            Module::Pll(pll) => match self.module_of(pll.source) {
                Some(Module::Mux(mux)) | Some(Module::SharedMux(mux)) => {
                    mux.block == MuxBlock::Pll(pll.instance)
                }
                _ => false,
            },
            Module::PllDiv(div) => match self.module_of(div.pll) {
                Some(Module::Pll(pll)) => div.index < pll.ndividers,
                _ => false,
            },
            Module::Dfs(dfs) => matches!(self.module_of(dfs.source), Some(Module::Pll(_))),
            Module::DfsDiv(div) => {
                div.index < DFS_PORTS && matches!(self.module_of(div.dfs), Some(Module::Dfs(_)))
            }
            Module::Mux(mux) | Module::SharedMux(mux) => mux.sources.iter().all(|s| {
                let sel_ok = match mux.block {
                    MuxBlock::Pll(_) => s.sel <= 1,
                    MuxBlock::Cgm(_) => s.sel < CGM_SELECTORS,
                };
                sel_ok && self.find(s.clock).is_some()
            }),
            Module::CgmDiv(div) => match self.module_of(div.mux) {
                Some(Module::Mux(mux)) | Some(Module::SharedMux(mux)) => {
                    matches!(mux.block, MuxBlock::Cgm(_))
                }
                _ => false,
            },
            Module::FixedDiv(div) => div.div != 0 && self.find(div.parent).is_some(),
            Module::PartBlock(block) => {
                block.block < COFB_BLOCKS && self.find(block.parent).is_some()
            }
        }
    }
}
