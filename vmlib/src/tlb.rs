#[derive(Debug, Copy, Clone)]
struct TlbEntry {
    page_number: u16,
    frame_number: usize,
    occupied: bool,
}

/// The translation lookaside buffer
///
/// A small fully-associative cache of page to frame mappings, a shortcut over
/// the page table. Insertion fills the first free slot, and once the cache is
/// full it overwrites slots in circular FIFO order - under both replacement
/// policies. The insertion cursor advances once per full-cache insertion and
/// never on hits
pub struct TranslationCache {
    entries: Vec<TlbEntry>,
    fifo_cursor: usize,
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![
                TlbEntry {
                    page_number: 0,
                    frame_number: 0,
                    occupied: false,
                };
                capacity
            ],
            fifo_cursor: 0,
        }
    }

    /// Tries to resolve a page, returning the slot index and frame number on
    /// a hit
    ///
    /// The pipeline owns the hit counter and the recency refresh, the cache
    /// only answers the lookup
    pub fn lookup(&self, page_number: u16) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .position(|entry| entry.occupied && entry.page_number == page_number)
            .map(|slot| (slot, self.entries[slot].frame_number))
    }

    /// Inserts a resolved mapping, returning the slot it landed in
    ///
    /// Never fails: it either fills a free slot or overwrites the slot at the
    /// circular cursor
    pub fn insert(&mut self, page_number: u16, frame_number: usize) -> usize {
        let entry = TlbEntry {
            page_number,
            frame_number,
            occupied: true,
        };
        if let Some(slot) = self.entries.iter().position(|e| !e.occupied) {
            self.entries[slot] = entry;
            slot
        } else {
            let slot = self.fifo_cursor;
            self.entries[slot] = entry;
            self.fifo_cursor = (self.fifo_cursor + 1) % self.entries.len();
            slot
        }
    }

    /// Drops the mapping for a page whose frame was reclaimed, so the cache
    /// never resolves a page to a frame that now holds different contents
    pub fn invalidate(&mut self, page_number: u16) {
        for entry in &mut self.entries {
            if entry.occupied && entry.page_number == page_number {
                entry.occupied = false;
            }
        }
    }

    /// Gets the number of occupied slots. Useful for analysing warm-up
    /// behaviour or debugging
    pub fn occupied_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.occupied).count()
    }
}
