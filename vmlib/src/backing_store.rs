use std::fs::File;
use std::path::Path;

use crate::address::{PAGE_COUNT, PAGE_SIZE};

/// The exact size of the backing store in bytes, one slot for every byte of
/// every addressable page
pub const STORE_SIZE: usize = PAGE_SIZE * PAGE_COUNT;

/// The fixed read-only byte store that holds the contents of every page
///
/// The store is foundational to every translation, so a file that cannot be
/// opened, mapped, or that has the wrong length is reported as an error at
/// construction and never afterwards; `read` is infallible once the store
/// exists
pub struct BackingStore {
    bytes: StoreBytes,
}

enum StoreBytes {
    #[cfg(unix)]
    Mapped(memmap2::Mmap),
    Owned(Vec<u8>),
}

impl BackingStore {
    /// Opens a backing store file and validates its length
    ///
    /// # Arguments
    ///
    /// * `path`: The path of the 65536-byte binary store
    ///
    /// returns: Result<BackingStore, String>
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Couldn't open the backing store at path {}: {e}", path.display()))?;
        // Memory map the store on unix systems, lookups are random access
        #[cfg(unix)]
        {
            use memmap2::{Advice, Mmap};
            let map = unsafe {
                Mmap::map(&file).map_err(|e| format!("Couldn't memory map the backing store: {e}"))?
            };
            map.advise(Advice::Random)
                .map_err(|e| format!("Failed to provide access advice to the OS, {e}"))?;
            let len = map.len();
            Self::validated(StoreBytes::Mapped(map), len)
        }
        // Compatibility on other systems
        #[cfg(not(unix))]
        {
            use std::io::Read;
            let mut file = file;
            let mut bytes = Vec::with_capacity(STORE_SIZE);
            file.read_to_end(&mut bytes)
                .map_err(|e| format!("Couldn't read the backing store: {e}"))?;
            let len = bytes.len();
            Self::validated(StoreBytes::Owned(bytes), len)
        }
    }

    /// Builds an in-memory store, used by tests and benchmarks
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        let len = bytes.len();
        Self::validated(StoreBytes::Owned(bytes), len)
    }

    fn validated(bytes: StoreBytes, len: usize) -> Result<Self, String> {
        if len != STORE_SIZE {
            return Err(format!(
                "The backing store must be exactly {STORE_SIZE} bytes, found {len}"
            ));
        }
        Ok(Self { bytes })
    }

    /// Reads the byte stored for a page and offset
    ///
    /// The value depends only on the logical page, never on which frame the
    /// page is resident in. The byte is reported signed, matching the
    /// simulated system's view of page contents
    pub fn read(&self, page_number: u16, offset: u16) -> i8 {
        self.as_slice()[page_number as usize * PAGE_SIZE + offset as usize] as i8
    }

    fn as_slice(&self) -> &[u8] {
        match &self.bytes {
            #[cfg(unix)]
            StoreBytes::Mapped(map) => map,
            StoreBytes::Owned(bytes) => bytes,
        }
    }
}
