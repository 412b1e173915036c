//! Instruction memory: load once, read-only thereafter.

use crate::address_space::{Access, AddressSpace, WritePolicy};
use crate::dump::Dump;
use crate::error::Result;

/// Word-addressable instruction memory.
///
/// Outside of [`InstructionMemory::load_program`] every write is rejected;
/// the loader is the only sanctioned way to populate this space. During a
/// load, words are written to strictly consecutive addresses in order, one
/// gate arm per word, and both the loading flag and the write-enable gate
/// are guaranteed to be clear once the call returns, whether or not the
/// load succeeded.
///
/// ```
/// use harv16_mem::InstructionMemory;
///
/// let mut imem = InstructionMemory::new();
/// imem.load_program(&[0xF000, 0xF001], 0x0000).unwrap();
/// assert_eq!(imem.read(0x0001).unwrap(), 0xF001);
/// // Direct writes are rejected once the load is over.
/// assert!(imem.write(0x0002, 0xF002).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct InstructionMemory {
    space: AddressSpace,
    loading: bool,
}

impl Default for InstructionMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionMemory {
    /// Creates empty instruction memory reading 0 for never-written cells.
    pub fn new() -> Self {
        InstructionMemory {
            space: AddressSpace::with_policy(WritePolicy::LoadGated),
            loading: false,
        }
    }

    /// Creates empty instruction memory with a configured default-read value.
    pub fn with_default(default: u16) -> Self {
        InstructionMemory {
            space: AddressSpace::with_policy_and_default(WritePolicy::LoadGated, default),
            loading: false,
        }
    }

    /// Whether a bulk load is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reads the word at `addr`.
    pub fn read(&self, addr: u32) -> Result<u16> {
        self.space.read(addr)
    }

    /// Writes a single word. Only valid while a program load is in
    /// progress; rejected with [`MemoryError::ReadOnly`] otherwise.
    ///
    /// [`MemoryError::ReadOnly`]: crate::MemoryError::ReadOnly
    pub fn write(&mut self, addr: u32, value: u32) -> Result<()> {
        self.space.write_with(
            addr,
            value,
            Access {
                from_stack: false,
                loading: self.loading,
            },
        )
    }

    /// Loads a program image into consecutive cells starting at
    /// `start_addr`.
    ///
    /// Words are written in strictly increasing address order, arming the
    /// write-enable gate once per word. An image running past the end of
    /// the address space fails with `OutOfRange` after the in-range prefix
    /// has been stored. On every exit path, success or failure, load mode
    /// and the gate end up clear.
    pub fn load_program(&mut self, words: &[u16], start_addr: u16) -> Result<()> {
        self.loading = true;
        let result = self.load_words(words, start_addr);
        // Cleanup must also run when a mid-load write failed, so neither
        // flag can ever be left stuck by a bad image.
        self.loading = false;
        self.space.set_write_enable(false);
        if result.is_ok() {
            tracing::debug!("loaded {} words at {:04X}", words.len(), start_addr);
        }
        result
    }

    fn load_words(&mut self, words: &[u16], start_addr: u16) -> Result<()> {
        for (offset, &word) in words.iter().enumerate() {
            let addr = u32::from(start_addr) + offset as u32;
            self.space.set_write_enable(true);
            self.space.write_with(
                addr,
                u32::from(word),
                Access {
                    from_stack: false,
                    loading: true,
                },
            )?;
        }
        Ok(())
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
