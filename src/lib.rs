//! # harv16-mem
//!
//! The addressable memory of a 16-bit Harvard-architecture teaching
//! processor: two disjoint word-addressable spaces, one for instructions
//! and one for data.
//!
//! ## Features
//!
//! - **Sparse storage**: only written cells occupy space; never-written
//!   addresses read back as a configurable default (0 by default)
//! - **One-shot write gate**: every store must be preceded by
//!   `set_write_enable(true)`; the gate clears itself after one write
//! - **Protected stack region**: `[STACK_BASE, 0xFFFF]` of data memory
//!   accepts only stack-flagged writes
//! - **Load-once instruction memory**: writable only through
//!   [`InstructionMemory::load_program`], read-only thereafter
//! - **Hexdump**: lazy, formatted row iterator over any address range
//!
//! ## Example
//!
//! ```rust
//! use harv16_mem::{DataMemory, InstructionMemory, DUMP_WIDTH};
//!
//! // A loader populates instruction memory exactly once.
//! let mut imem = InstructionMemory::new();
//! imem.load_program(&[0x1234, 0x5678], 0x0000).unwrap();
//! assert_eq!(imem.read(0x0000).unwrap(), 0x1234);
//!
//! // An execution engine arms the gate before every data store.
//! let mut dmem = DataMemory::new();
//! dmem.set_write_enable(true);
//! dmem.write(0x0000, 0xBEEF, false).unwrap();
//!
//! for row in dmem.dump(0, None, DUMP_WIDTH) {
//!     println!("{row}");
//! }
//! ```

pub mod address_space;
pub mod data;
pub mod dump;
pub mod error;
pub mod instruction;

pub use address_space::{Access, AddressSpace, WritePolicy};
pub use data::DataMemory;
pub use dump::Dump;
pub use error::{MemoryError, Result};
pub use instruction::InstructionMemory;

/// First address of the protected stack region in data memory.
pub const STACK_BASE: u16 = 0xFF00;

/// Bits per word.
pub const WORD_SIZE: u32 = 16;

/// Mask applied to every stored value.
pub const WORD_MASK: u32 = 0xFFFF;

/// Highest valid address in either space.
pub const ADDR_MAX: u32 = 0xFFFF;

/// Conventional number of words per hexdump row.
pub const DUMP_WIDTH: usize = 8;
