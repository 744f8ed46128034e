use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::address::{VirtualAddress, FRAME_SIZE};
use crate::backing_store::BackingStore;
use crate::config::MemoryConfig;
use crate::frames::FrameAllocator;
use crate::page_table::PageTable;
use crate::replacement_policies::ReplacementPolicy;
use crate::tlb::TranslationCache;

/// The translation pipeline
///
/// Resolves one virtual address at a time: TLB lookup, page table lookup on a
/// miss, page-fault servicing on a second miss, and always a TLB refill before
/// the result is emitted. All three tiers are fields of the one pipeline, so
/// independent simulation runs never share state
///
/// The resolution of each address completes before the next begins. The
/// replacement policies are defined in terms of that sequence, not wall-clock
/// time
pub struct Simulator {
    tlb: TranslationCache,
    page_table: PageTable,
    frames: FrameAllocator,
    store: BackingStore,
    policy: ReplacementPolicy,
    summary: SimulationSummary,
    simulation_time: Duration,
}

/// The outcome of resolving a single virtual address. Never mutated after
/// creation. Can be serialised, and diffed structurally in tests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResult {
    pub virtual_address: u16,
    pub page_number: u16,
    pub offset: u16,
    pub frame_number: usize,
    pub tlb_index: Option<usize>,
    pub physical_address: usize,
    pub byte_value: i8,
    pub tlb_hit: bool,
    pub page_fault: bool,
}

/// Aggregate counters for a run. Incremented monotonically during
/// translation, read for the final report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationSummary {
    pub translated_addresses: u64,
    pub tlb_hits: u64,
    pub page_faults: u64,
}

impl SimulationSummary {
    pub fn hit_rate(&self) -> f64 {
        if self.translated_addresses == 0 {
            0.0
        } else {
            self.tlb_hits as f64 / self.translated_addresses as f64
        }
    }

    pub fn fault_rate(&self) -> f64 {
        if self.translated_addresses == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.translated_addresses as f64
        }
    }
}

impl Simulator {
    /// Creates a new simulator for a given memory geometry and backing store
    ///
    /// # Arguments
    ///
    /// * `config`: The memory geometry, usually resulting from parsing JSON
    /// * `store`: The opened backing store
    ///
    /// returns: Simulator
    pub fn new(config: &MemoryConfig, store: BackingStore) -> Self {
        Self {
            tlb: TranslationCache::new(config.tlb_entries),
            // One page table slot per frame
            page_table: PageTable::new(config.frames),
            frames: FrameAllocator::new(config.frames, config.replacement_policy),
            store,
            policy: config.replacement_policy,
            summary: SimulationSummary::default(),
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Resolves one virtual address through the tiers
    ///
    /// Exactly one of three paths is taken: a TLB hit, a page table hit that
    /// refills the TLB, or a page fault that allocates a frame and refills
    /// both the page table and the TLB. Whichever path resolves the frame,
    /// the frame's recency is refreshed
    pub fn translate(&mut self, address: VirtualAddress) -> TranslationResult {
        let page_number = address.page_number();
        let offset = address.offset();
        // Fetched at decode time: the byte depends only on the logical page,
        // never on the tier that resolves the frame
        let byte_value = self.store.read(page_number, offset);
        self.summary.translated_addresses += 1;

        let (frame_number, tlb_index, tlb_hit, page_fault) = match self.tlb.lookup(page_number) {
            Some((slot, frame_number)) => {
                self.summary.tlb_hits += 1;
                self.frames.touch(frame_number);
                (frame_number, Some(slot), true, false)
            }
            None => match self.page_table.lookup(page_number) {
                // A fault avoided, but still a TLB miss: refill the TLB
                Some(frame_number) => {
                    self.frames.touch(frame_number);
                    let slot = self.tlb.insert(page_number, frame_number);
                    (frame_number, Some(slot), false, false)
                }
                None => {
                    let frame_number = self.service_fault(page_number);
                    let slot = self.tlb.insert(page_number, frame_number);
                    (frame_number, Some(slot), false, true)
                }
            },
        };

        TranslationResult {
            virtual_address: address.raw(),
            page_number,
            offset,
            frame_number,
            tlb_index,
            physical_address: frame_number * FRAME_SIZE + offset as usize,
            byte_value,
            tlb_hit,
            page_fault,
        }
    }

    /// Services a page fault, leaving the page resident and the page table
    /// valid for it
    ///
    /// When the pool is full the victim's page loses its page table entry and
    /// any TLB entry in the same step, so no tier ever maps a page to a frame
    /// that has been handed to another page
    fn service_fault(&mut self, page_number: u16) -> usize {
        self.summary.page_faults += 1;
        match self.frames.find_free() {
            Some(frame_number) => {
                self.frames.allocate(frame_number, page_number);
                self.page_table.insert(page_number, frame_number);
                frame_number
            }
            None => {
                let eviction = self.frames.evict();
                self.tlb.invalidate(eviction.evicted_page);
                self.page_table.replace(&eviction, page_number, self.policy);
                self.frames.allocate(eviction.frame_number, page_number);
                eviction.frame_number
            }
        }
    }

    /// Runs a whole trace in order, collecting one result per address
    ///
    /// It supports being called multiple times, and will update the time
    /// taken to simulate and the counters accordingly
    pub fn simulate(&mut self, trace: &[VirtualAddress]) -> Vec<TranslationResult> {
        let start = Instant::now();
        let results = trace.iter().map(|&address| self.translate(address)).collect();
        self.simulation_time += start.elapsed();
        results
    }

    pub fn summary(&self) -> &SimulationSummary {
        &self.summary
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of occupied frames
    pub fn occupied_frame_count(&self) -> usize {
        self.frames.occupied_count()
    }

    /// Gets the number of valid page table entries
    pub fn valid_page_table_count(&self) -> usize {
        self.page_table.valid_count()
    }

    /// Gets the number of occupied TLB slots
    pub fn occupied_tlb_count(&self) -> usize {
        self.tlb.occupied_count()
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tlb_index = self.tlb_index.map(|slot| slot as i64).unwrap_or(-1);
        write!(
            f,
            "Virtual address: {} TLB: {} Physical address: {} Value: {}",
            self.virtual_address, tlb_index, self.physical_address, self.byte_value
        )
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Number of Translated Addresses = {}",
            self.translated_addresses
        )?;
        writeln!(f, "Page Faults = {}", self.page_faults)?;
        writeln!(f, "Page Fault Rate = {:.3}", self.fault_rate())?;
        writeln!(f, "TLB Hits = {}", self.tlb_hits)?;
        writeln!(f, "TLB Hit Rate = {:.3}", self.hit_rate())
    }
}
