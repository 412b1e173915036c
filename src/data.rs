//! Data memory: the stack-protected half of the Harvard pair.

use crate::address_space::{Access, AddressSpace, WritePolicy};
use crate::dump::Dump;
use crate::error::Result;

/// Word-addressable data memory with a protected stack region.
///
/// Addresses in `[STACK_BASE, 0xFFFF]` are reserved for the stack: ordinary
/// stores there are rejected, and only accesses flagged as stack-originated
/// (an execution engine's push/pop) may land in that range. Everything else
/// behaves like the underlying [`AddressSpace`], including the one-shot
/// write-enable gate.
///
/// ```
/// use harv16_mem::{DataMemory, STACK_BASE};
///
/// let mut mem = DataMemory::new();
/// mem.set_write_enable(true);
/// assert!(mem.write(u32::from(STACK_BASE), 0xAA, false).is_err());
/// assert!(mem.write(u32::from(STACK_BASE), 0xAA, true).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DataMemory {
    space: AddressSpace,
}

impl Default for DataMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DataMemory {
    /// Creates empty data memory reading 0 for never-written cells.
    pub fn new() -> Self {
        DataMemory {
            space: AddressSpace::with_policy(WritePolicy::StackProtected),
        }
    }

    /// Creates empty data memory with a configured default-read value.
    pub fn with_default(default: u16) -> Self {
        DataMemory {
            space: AddressSpace::with_policy_and_default(WritePolicy::StackProtected, default),
        }
    }

    /// Arms or clears the write-enable gate.
    pub fn set_write_enable(&mut self, enabled: bool) {
        self.space.set_write_enable(enabled);
    }

    /// Whether the write-enable gate is currently armed.
    pub fn write_enabled(&self) -> bool {
        self.space.write_enabled()
    }

    /// Reads the word at `addr`.
    pub fn read(&self, addr: u32) -> Result<u16> {
        self.space.read(addr)
    }

    /// Writes a word, rejecting non-stack writes into the stack region.
    ///
    /// The region check runs before anything else, so an ordinary store
    /// aimed at the stack fails without consuming the gate. Stack-flagged
    /// writes delegate to the gated write path unchanged.
    pub fn write(&mut self, addr: u32, value: u32, from_stack: bool) -> Result<()> {
        self.space.write_with(
            addr,
            value,
            Access {
                from_stack,
                loading: false,
            },
        )
    }

    /// Number of distinct addresses ever written.
    pub fn len(&self) -> usize {
        self.space.len()
    }

    /// Whether no address has ever been written.
    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }

    /// Whether `addr` has ever been written.
    pub fn contains(&self, addr: u32) -> bool {
        self.space.contains(addr)
    }

    /// Lazy hexdump; see [`AddressSpace::dump`].
    pub fn dump(&self, start: u32, stop: Option<u32>, width: usize) -> Dump<'_> {
        self.space.dump(start, stop, width)
    }
}
