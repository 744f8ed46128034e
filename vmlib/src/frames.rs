use crate::replacement_policies::{self, FifoCursor, ReplacementPolicy};

/// One physical frame
///
/// Frames are never destroyed; eviction overwrites them in place
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    pub resident_page: u16,
    pub occupied: bool,
    pub last_access_tick: u64,
}

/// A frame reclaimed from the page it was resident for
pub struct Eviction {
    pub frame_number: usize,
    pub evicted_page: u16,
}

/// The pool of physical frames
///
/// Owns occupancy and recency for every frame. Free-slot search and victim
/// search are linear scans; the pool is small enough that anything cleverer
/// would obscure the eviction order the policies are defined by
pub struct FrameAllocator {
    frames: Vec<Frame>,
    fifo_cursor: FifoCursor,
    policy: ReplacementPolicy,
}

impl FrameAllocator {
    pub fn new(frame_count: usize, policy: ReplacementPolicy) -> Self {
        Self {
            frames: vec![
                Frame {
                    resident_page: 0,
                    occupied: false,
                    last_access_tick: 0,
                };
                frame_count
            ],
            fifo_cursor: FifoCursor::default(),
            policy,
        }
    }

    /// Finds the first unoccupied frame, or `None` when the pool is full
    pub fn find_free(&self) -> Option<usize> {
        self.frames.iter().position(|frame| !frame.occupied)
    }

    /// Selects a victim frame per the active policy
    ///
    /// Only meaningful when the pool is full; the caller re-occupies the
    /// frame with `allocate` once the other tiers have been told
    pub fn evict(&mut self) -> Eviction {
        let frame_number = match self.policy {
            ReplacementPolicy::Fifo => self.fifo_cursor.advance(self.frames.len()),
            ReplacementPolicy::Lru => replacement_policies::lru_victim(&self.frames),
        };
        Eviction {
            frame_number,
            evicted_page: self.frames[frame_number].resident_page,
        }
    }

    /// Makes a frame resident for a page and touches it
    pub fn allocate(&mut self, frame_number: usize, page_number: u16) {
        let tick = self.next_tick();
        let frame = &mut self.frames[frame_number];
        frame.resident_page = page_number;
        frame.occupied = true;
        frame.last_access_tick = tick;
    }

    /// Refreshes a frame's recency
    ///
    /// Called on every access that resolves to the frame, whichever tier
    /// resolved it and whichever policy is active
    pub fn touch(&mut self, frame_number: usize) {
        let tick = self.next_tick();
        self.frames[frame_number].last_access_tick = tick;
    }

    /// The logical clock: one past the most recent access tick anywhere in
    /// the pool. Time advances only on access events, never on wall-clock
    /// time, which keeps eviction order deterministic
    fn next_tick(&self) -> u64 {
        1 + self
            .frames
            .iter()
            .map(|frame| frame.last_access_tick)
            .max()
            .unwrap_or(0)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Gets the number of occupied frames. Useful for analysing warm-up
    /// behaviour or debugging
    pub fn occupied_count(&self) -> usize {
        self.frames.iter().filter(|frame| frame.occupied).count()
    }
}
