use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use clap::Parser;
use vmlib::backing_store::BackingStore;
use vmlib::config::MemoryConfig;
use vmlib::io::read_trace;
use vmlib::replacement_policies::ReplacementPolicy;
use vmlib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Virtual memory address translation simulator"))]
struct Args {
    /// Text file of whitespace-separated decimal 16-bit virtual addresses
    trace: String,

    /// Replacement policy for the frame pool and page table
    #[arg(value_enum)]
    policy: ReplacementPolicy,

    /// 65536-byte binary store holding every page's contents
    #[arg(short, long, default_value = "BACKING_STORE.bin")]
    backing_store: String,

    /// Optional JSON memory geometry (frame and TLB slot counts)
    #[arg(short, long)]
    config: Option<String>,

    /// Emit the summary as JSON instead of the text report
    #[arg(short, long)]
    json: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => {
            let config_file = File::open(path)
                .map_err(|e| format!("Couldn't open the config file at path {path}: {e}"))?;
            serde_json::from_reader(BufReader::new(config_file))
                .map_err(|e| format!("Couldn't parse the config file: {e}"))?
        }
        None => MemoryConfig::default(),
    };
    // The positional policy always wins over the config file's
    config.replacement_policy = args.policy;
    let store = BackingStore::open(&args.backing_store)?;
    let trace = read_trace(&args.trace)?;
    let mut simulator = Simulator::new(&config, store);
    let results = simulator.simulate(&trace);
    for result in &results {
        println!("{result}");
    }
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(simulator.summary())
                .map_err(|e| format!("Couldn't serialise the output {e}"))?
        );
    } else {
        print!("{}", simulator.summary());
    }
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!(
            "Total execution time (includes initial parsing, configuration, and output): {}s",
            total_time.as_nanos() as f64 / 1e9
        )
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!(
            "Effective configuration: policy {:?}, {} frames, {} TLB slots",
            config.replacement_policy, config.frames, config.tlb_entries
        );
        println!(
            "Occupied frames: {}, valid page table entries: {}, occupied TLB slots: {}",
            simulator.occupied_frame_count(),
            simulator.valid_page_table_count(),
            simulator.occupied_tlb_count()
        )
    }
    Ok(())
}
