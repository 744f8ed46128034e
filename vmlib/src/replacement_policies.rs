use clap::ValueEnum;
use serde::Deserialize;

use crate::frames::Frame;

/// The eviction policy for the frame pool and page table - fifo or lru.
/// Defaults to fifo.
///
/// The TLB is not governed by this choice: its insertions always rotate
/// through the slots in FIFO order, the simulated hardware keeps that tier
/// deliberately cheap to manage
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, ValueEnum)]
pub enum ReplacementPolicy {
    /// Evicts the frame filled earliest, independent of access frequency
    #[serde(alias = "fifo")]
    Fifo,
    /// Evicts the frame whose most recent access is oldest
    #[serde(alias = "lru")]
    Lru,
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        ReplacementPolicy::Fifo
    }
}

/// The rotation point for FIFO eviction
///
/// A single index shared across the whole pool, advancing once per eviction
/// and never on hits. Frames fill in slot order, so once the pool is full the
/// cursor always points at the frame filled longest ago
#[derive(Debug, Default)]
pub(crate) struct FifoCursor {
    next: usize,
}

impl FifoCursor {
    pub(crate) fn advance(&mut self, frame_count: usize) -> usize {
        let victim = self.next;
        self.next = (self.next + 1) % frame_count;
        victim
    }
}

/// Selects the frame with the smallest access tick
///
/// `min_by_key` keeps the first minimum it sees, so ties break towards the
/// lowest frame number
pub(crate) fn lru_victim(frames: &[Frame]) -> usize {
    frames
        .iter()
        .enumerate()
        .min_by_key(|(_, frame)| frame.last_access_tick)
        .map(|(frame_number, _)| frame_number)
        .unwrap_or(0)
}
