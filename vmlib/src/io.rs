use std::fs;
use std::path::Path;

use crate::address::VirtualAddress;

/// Reads an address trace from a text file
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<VirtualAddress>, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Couldn't open the trace file at path {}: {e}", path.display()))?;
    Ok(parse_trace(&content))
}

/// Parses whitespace-separated decimal addresses
///
/// Consumption stops at the first token that doesn't parse as a 16-bit
/// address, which is treated as the end of the trace rather than an error
///
/// # Examples
///
/// ```
/// use vmlib::io::parse_trace;
/// let trace = parse_trace("16916 62493 end-of-trace 30198");
/// assert_eq!(trace.len(), 2);
/// ```
pub fn parse_trace(content: &str) -> Vec<VirtualAddress> {
    content
        .split_ascii_whitespace()
        .map_while(|token| token.parse::<u16>().ok())
        .map(VirtualAddress::new)
        .collect()
}
