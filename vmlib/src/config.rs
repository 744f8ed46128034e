use serde::Deserialize;

use crate::replacement_policies::ReplacementPolicy;

/// The default number of physical frames in the pool
pub const DEFAULT_FRAMES: usize = 128;

/// The default number of TLB slots
pub const DEFAULT_TLB_ENTRIES: usize = 16;

/// The memory geometry for a simulation run
///
/// The page table always has one entry slot per frame - an entry is only ever
/// valid while its page is backed by a frame, so a larger table could never
/// fill. Shrinking the counts is how the tests force eviction quickly
#[derive(Debug, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default = "default_tlb_entries")]
    pub tlb_entries: usize,
    #[serde(default = "ReplacementPolicy::default")]
    pub replacement_policy: ReplacementPolicy,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            tlb_entries: DEFAULT_TLB_ENTRIES,
            replacement_policy: ReplacementPolicy::default(),
        }
    }
}

fn default_frames() -> usize {
    DEFAULT_FRAMES
}

fn default_tlb_entries() -> usize {
    DEFAULT_TLB_ENTRIES
}
