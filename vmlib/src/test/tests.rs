use crate::address::VirtualAddress;
use crate::backing_store::{BackingStore, STORE_SIZE};
use crate::config::{MemoryConfig, DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES};
use crate::io::{parse_trace, read_trace};
use crate::replacement_policies::ReplacementPolicy;
use crate::simulator::Simulator;
use crate::util::{
    hot_set_trace, page_trace, patterned_byte, patterned_store_bytes, scrambled_trace,
};

const BOTH_POLICIES: [ReplacementPolicy; 2] = [ReplacementPolicy::Fifo, ReplacementPolicy::Lru];

fn simulator(frames: usize, tlb_entries: usize, policy: ReplacementPolicy) -> Simulator {
    let config = MemoryConfig {
        frames,
        tlb_entries,
        replacement_policy: policy,
    };
    let store = BackingStore::from_bytes(patterned_store_bytes()).unwrap();
    Simulator::new(&config, store)
}

#[test]
fn decode_round_trip_covers_the_address_space() {
    for raw in 0..=u16::MAX {
        let address = VirtualAddress::new(raw);
        assert_eq!(
            address.page_number() * 256 + address.offset(),
            raw,
            "decode of {raw} doesn't recompose"
        );
    }
}

#[test]
fn every_address_takes_exactly_one_counter_path() {
    for policy in BOTH_POLICIES {
        let mut simulator = simulator(DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES, policy);
        let trace = hot_set_trace(2000, 200);
        let results = simulator.simulate(&trace);

        let mut hits = 0u64;
        let mut faults = 0u64;
        let mut table_resolved = 0u64;
        for result in &results {
            assert!(
                !(result.tlb_hit && result.page_fault),
                "an address can't both hit the TLB and fault"
            );
            match (result.tlb_hit, result.page_fault) {
                (true, false) => hits += 1,
                (false, true) => faults += 1,
                (false, false) => table_resolved += 1,
                (true, true) => unreachable!(),
            }
        }

        let summary = simulator.summary();
        assert_eq!(summary.translated_addresses, trace.len() as u64);
        assert_eq!(summary.tlb_hits, hits);
        assert_eq!(summary.page_faults, faults);
        assert_eq!(
            hits + faults + table_resolved,
            summary.translated_addresses,
            "{policy:?}: every address must increment exactly one counter path"
        );
    }
}

#[test]
fn unique_pages_always_fault() {
    // More distinct pages than frames, no repeats: caching can't help
    let pages: Vec<u16> = (0..200).collect();
    for policy in BOTH_POLICIES {
        let mut simulator = simulator(DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES, policy);
        let results = simulator.simulate(&page_trace(&pages));
        assert!(results.iter().all(|result| result.page_fault));
        assert_eq!(simulator.summary().page_faults, pages.len() as u64);
        assert_eq!(simulator.summary().tlb_hits, 0);
    }
}

#[test]
fn fifo_evicts_in_insertion_order() {
    let mut simulator = simulator(2, 2, ReplacementPolicy::Fifo);
    // Page 3 evicts page 1, the oldest insertion, so the second 1 faults again
    let results = simulator.simulate(&page_trace(&[1, 2, 3, 1]));
    assert!(results.iter().all(|result| result.page_fault));
    assert_eq!(simulator.summary().page_faults, 4);
}

#[test]
fn lru_keeps_the_recently_used_page() {
    let mut simulator = simulator(2, 2, ReplacementPolicy::Lru);
    // The second 1 refreshes its recency, so 3 evicts 2, and 2 faults again
    // while 1 keeps hitting
    let results = simulator.simulate(&page_trace(&[1, 2, 1, 3, 1, 2]));
    let faulted: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, result)| result.page_fault)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(faulted, vec![0, 1, 3, 5]);
    assert!(results[2].tlb_hit);
    assert!(results[4].tlb_hit, "page 1 must never be the LRU victim here");
}

#[test]
fn repeated_address_hits_the_tlb() {
    for policy in BOTH_POLICIES {
        let mut simulator = simulator(DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES, policy);
        let address = VirtualAddress::new(16916);
        let first = simulator.translate(address);
        let second = simulator.translate(address);
        assert!(first.page_fault);
        assert!(second.tlb_hit, "{policy:?}: immediate re-resolution must hit");
        assert_eq!(first.physical_address, second.physical_address);
    }
}

#[test]
fn page_table_hit_refills_the_tlb() {
    // One TLB slot: page 2 pushes page 1 out of the TLB while 1 stays resident
    let mut simulator = simulator(4, 1, ReplacementPolicy::Fifo);
    let results = simulator.simulate(&page_trace(&[1, 2, 1, 1]));
    assert!(!results[2].tlb_hit);
    assert!(!results[2].page_fault, "page 1 is still resident");
    assert_eq!(results[2].tlb_index, Some(0), "the table hit must refill the TLB");
    assert!(results[3].tlb_hit);
    assert_eq!(simulator.summary().page_faults, 2);
}

#[test]
fn eviction_invalidates_stale_tlb_entries() {
    // TLB roomier than the frame pool: FIFO reclaims page 1's frame while the
    // TLB still caches it. The next access to 1 must fault, not resolve
    // through a mapping whose frame now holds page 3
    let mut simulator = simulator(2, 4, ReplacementPolicy::Fifo);
    let results = simulator.simulate(&page_trace(&[1, 2, 1, 3, 1]));
    assert!(results[2].tlb_hit);
    assert!(results[3].page_fault);
    assert!(results[4].page_fault, "the stale TLB entry for page 1 must be gone");
    assert_eq!(simulator.summary().page_faults, 4);
}

#[test]
fn tlb_insertions_rotate_in_fifo_order() {
    // Two TLB slots over a pool big enough that nothing is ever evicted
    let mut simulator = simulator(8, 2, ReplacementPolicy::Fifo);
    let results = simulator.simulate(&page_trace(&[1, 2, 3, 2, 1]));
    assert_eq!(results[2].tlb_index, Some(0), "3 overwrites the oldest slot");
    assert!(results[3].tlb_hit, "2 is still cached in slot 1");
    assert_eq!(results[3].tlb_index, Some(1));
    assert!(!results[4].tlb_hit);
    assert!(!results[4].page_fault, "1 is still resident in its frame");
}

#[test]
fn bytes_come_from_the_backing_store() {
    for policy in BOTH_POLICIES {
        let mut simulator = simulator(DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES, policy);
        for result in simulator.simulate(&scrambled_trace(512)) {
            assert_eq!(
                result.byte_value,
                patterned_byte(result.page_number, result.offset),
                "the reported byte must match the store, whatever path resolved it"
            );
            assert_eq!(
                result.physical_address,
                result.frame_number * 256 + result.offset as usize
            );
            assert_eq!(
                result.virtual_address,
                result.page_number * 256 + result.offset
            );
        }
    }
}

#[test]
fn store_length_is_validated() {
    assert!(BackingStore::from_bytes(vec![0; 100]).is_err());
    assert!(BackingStore::from_bytes(vec![0; STORE_SIZE + 1]).is_err());
    assert!(BackingStore::from_bytes(vec![0; STORE_SIZE]).is_ok());
    assert!(BackingStore::open("no-such-store.bin").is_err());
}

#[test]
fn summary_serialises_round_trip() {
    let mut simulator = simulator(DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES, ReplacementPolicy::Lru);
    simulator.simulate(&hot_set_trace(300, 50));
    let summary = simulator.summary();
    let json = serde_json::to_string(summary).unwrap();
    let parsed: crate::simulator::SimulationSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(*summary, parsed);
}

#[test]
fn trace_parsing_stops_at_the_first_bad_token() {
    assert_eq!(parse_trace("16916 62493 30198").len(), 3);
    assert_eq!(parse_trace("1 2 three 4").len(), 2);
    // Out of 16-bit range is as terminal as non-numeric
    assert_eq!(parse_trace("70000 1").len(), 0);
    assert_eq!(parse_trace("").len(), 0);
    assert!(read_trace("no-such-trace.txt").is_err());
}

#[test]
fn config_parses_with_defaults_and_aliases() {
    let config: MemoryConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.frames, DEFAULT_FRAMES);
    assert_eq!(config.tlb_entries, DEFAULT_TLB_ENTRIES);
    assert_eq!(config.replacement_policy, ReplacementPolicy::Fifo);

    let config: MemoryConfig =
        serde_json::from_str(r#"{"frames": 2, "replacement_policy": "lru"}"#).unwrap();
    assert_eq!(config.frames, 2);
    assert_eq!(config.tlb_entries, DEFAULT_TLB_ENTRIES);
    assert_eq!(config.replacement_policy, ReplacementPolicy::Lru);
}

#[test]
fn output_lines_match_the_report_format() {
    let mut simulator = simulator(DEFAULT_FRAMES, DEFAULT_TLB_ENTRIES, ReplacementPolicy::Fifo);
    let result = simulator.translate(VirtualAddress::new(16916));
    assert_eq!(
        result.to_string(),
        format!(
            "Virtual address: 16916 TLB: {} Physical address: {} Value: {}",
            result.tlb_index.unwrap(),
            result.physical_address,
            result.byte_value
        )
    );
    let summary = simulator.summary().to_string();
    assert!(summary.starts_with("Number of Translated Addresses = 1\n"));
    assert!(summary.contains("Page Fault Rate = 1.000\n"));
    assert!(summary.contains("TLB Hit Rate = 0.000\n"));
}
