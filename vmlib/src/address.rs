/// The number of bytes in one virtual page
pub const PAGE_SIZE: usize = 256;

/// The number of bytes in one physical frame. Pages map onto frames one to one
pub const FRAME_SIZE: usize = 256;

/// The number of distinct pages addressable by the 8-bit page field
pub const PAGE_COUNT: usize = 256;

/// A 16-bit virtual address
///
/// The high byte selects the page, the low byte the offset within it. The
/// split is exact: `page_number * 256 + offset` recomposes the raw address
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VirtualAddress(u16);

impl VirtualAddress {
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Gets the raw 16-bit value
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Gets the page number, the high byte of the address
    ///
    /// # Examples
    ///
    /// ```
    /// use vmlib::address::VirtualAddress;
    /// let address = VirtualAddress::new(0x1A2B);
    /// assert_eq!(address.page_number(), 0x1A);
    /// ```
    pub fn page_number(self) -> u16 {
        self.0 >> 8
    }

    /// Gets the offset within the page, the low byte of the address
    ///
    /// # Examples
    ///
    /// ```
    /// use vmlib::address::VirtualAddress;
    /// let address = VirtualAddress::new(0x1A2B);
    /// assert_eq!(address.offset(), 0x2B);
    /// ```
    pub fn offset(self) -> u16 {
        self.0 & 0xFF
    }
}

impl From<u16> for VirtualAddress {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
