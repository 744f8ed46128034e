use crate::frames::Eviction;
use crate::replacement_policies::ReplacementPolicy;

#[derive(Debug, Copy, Clone)]
struct PageTableEntry {
    page_number: u16,
    frame_number: usize,
    valid: bool,
}

/// The page table, the source of truth for which pages are resident
///
/// Capacity equals the frame count: an entry is only ever valid while its
/// page is backed by a frame, so the table and the pool fill and evict in
/// lockstep. Under FIFO the table behaves as an ordered list - the oldest
/// entry is shifted out and the new mapping written at the tail. Under LRU
/// the entry whose underlying frame was reclaimed is overwritten in place
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![
                PageTableEntry {
                    page_number: 0,
                    frame_number: 0,
                    valid: false,
                };
                capacity
            ],
        }
    }

    /// Looks up the frame a page is resident in, scanning valid entries
    pub fn lookup(&self, page_number: u16) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.valid && entry.page_number == page_number)
            .map(|entry| entry.frame_number)
    }

    /// Records a mapping in the first invalid slot
    ///
    /// A slot always exists when the frame pool had a free frame - the table
    /// never holds more valid entries than there are occupied frames
    pub fn insert(&mut self, page_number: u16, frame_number: usize) {
        if let Some(slot) = self.entries.iter().position(|entry| !entry.valid) {
            self.entries[slot] = PageTableEntry {
                page_number,
                frame_number,
                valid: true,
            };
        }
    }

    /// Evicts the entry for a reclaimed frame and records the new mapping,
    /// mirroring the frame pool's policy
    pub fn replace(&mut self, eviction: &Eviction, page_number: u16, policy: ReplacementPolicy) {
        let entry = PageTableEntry {
            page_number,
            frame_number: eviction.frame_number,
            valid: true,
        };
        match policy {
            ReplacementPolicy::Fifo => {
                // The head is the oldest entry; it maps the frame the FIFO
                // cursor just reclaimed
                self.entries.rotate_left(1);
                let tail = self.entries.len() - 1;
                self.entries[tail] = entry;
            }
            ReplacementPolicy::Lru => {
                match self
                    .entries
                    .iter()
                    .position(|e| e.valid && e.frame_number == eviction.frame_number)
                {
                    Some(slot) => self.entries[slot] = entry,
                    None => self.insert(page_number, eviction.frame_number),
                }
            }
        }
    }

    /// Gets the number of valid entries. Useful for analysing warm-up
    /// behaviour or debugging
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.valid).count()
    }
}
