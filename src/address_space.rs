//! Core address space: sparse word storage behind a one-shot write gate.

use std::collections::HashMap;

use crate::dump::Dump;
use crate::error::{MemoryError, Result};
use crate::{ADDR_MAX, STACK_BASE, WORD_MASK};

/// Write policy enforced by an [`AddressSpace`].
///
/// Policies are checked before anything else on the write path, so a
/// rejected write leaves the gate and the cells untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Any address may be written (gate permitting).
    #[default]
    Unrestricted,

    /// Addresses at or above [`STACK_BASE`] require a stack-flagged access.
    StackProtected,

    /// All writes require a loading-flagged access.
    LoadGated,
}

/// Context behind a single write access.
///
/// The default access is an ordinary CPU store: not stack-originated, not
/// part of a program load.
#[derive(Debug, Clone, Copy, Default)]
pub struct Access {
    /// Whether this write originates from a stack push/pop.
    pub from_stack: bool,
    /// Whether this write is part of a bulk program load.
    pub loading: bool,
}

/// A 16-bit word-addressable address space.
///
/// Storage is sparse: only addresses that have been written occupy space,
/// and never-written addresses read back as the configured default value
/// (0 for [`AddressSpace::new`]).
///
/// Writes are gated: [`AddressSpace::set_write_enable`] arms a one-shot
/// gate, and every successful write clears it again. This models a hardware
/// write-enable line that the execution engine must raise before each store.
///
/// ```
/// use harv16_mem::AddressSpace;
///
/// let mut mem = AddressSpace::new();
/// mem.set_write_enable(true);
/// mem.write(0x0000, 0x1234).unwrap();
/// assert_eq!(mem.read(0x0000).unwrap(), 0x1234);
/// // The gate cleared itself; a second write needs re-arming.
/// assert!(mem.write(0x0001, 0x5678).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AddressSpace {
    cells: HashMap<u16, u16>,
    default: u16,
    write_enable: bool,
    policy: WritePolicy,
}

impl AddressSpace {
    /// Creates an empty, unrestricted address space reading 0 for
    /// never-written cells.
    pub fn new() -> Self {
        Self::with_policy_and_default(WritePolicy::Unrestricted, 0)
    }

    /// Creates an empty, unrestricted address space with a configured
    /// default-read value.
    pub fn with_default(default: u16) -> Self {
        Self::with_policy_and_default(WritePolicy::Unrestricted, default)
    }

    /// Creates an empty address space with the given write policy.
    pub fn with_policy(policy: WritePolicy) -> Self {
        Self::with_policy_and_default(policy, 0)
    }

    /// Creates an empty address space with the given policy and default.
    pub fn with_policy_and_default(policy: WritePolicy, default: u16) -> Self {
        AddressSpace {
            cells: HashMap::new(),
            default,
            write_enable: false,
            policy,
        }
    }

    /// Validates an address against the 16-bit boundary.
    ///
    /// The address width is fixed at 16 bits; this is a hard boundary, not
    /// a configuration knob.
    pub fn check_address(&self, addr: u32) -> Result<u16> {
        if addr > ADDR_MAX {
            return Err(MemoryError::OutOfRange { address: addr });
        }
        Ok(addr as u16)
    }

    /// Arms or clears the write-enable gate.
    pub fn set_write_enable(&mut self, enabled: bool) {
        self.write_enable = enabled;
    }

    /// Whether the write-enable gate is currently armed.
    pub fn write_enabled(&self) -> bool {
        self.write_enable
    }

    /// The write policy this space enforces.
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// The value returned for never-written addresses.
    pub fn default_value(&self) -> u16 {
        self.default
    }

    /// Reads the word at `addr`, or the default value if never written.
    ///
    /// Reading never consumes the write-enable gate.
    pub fn read(&self, addr: u32) -> Result<u16> {
        let addr = self.check_address(addr)?;
        Ok(self.cell(addr))
    }

    /// Writes a word with an ordinary (non-stack, non-loading) access.
    ///
    /// See [`AddressSpace::write_with`].
    pub fn write(&mut self, addr: u32, value: u32) -> Result<()> {
        self.write_with(addr, value, Access::default())
    }

    /// Writes a word, masking `value` to 16 bits before storing.
    ///
    /// Check order: policy, then gate, then address. An out-of-range
    /// failure leaves the gate armed; a successful write always clears it.
    pub fn write_with(&mut self, addr: u32, value: u32, access: Access) -> Result<()> {
        match self.policy {
            WritePolicy::Unrestricted => {}
            WritePolicy::StackProtected => {
                if addr >= u32::from(STACK_BASE) && !access.from_stack {
                    tracing::trace!("rejected non-stack write to {:#06x}", addr);
                    return Err(MemoryError::StackProtected { address: addr });
                }
            }
            WritePolicy::LoadGated => {
                if !access.loading {
                    tracing::trace!("rejected write to {:#06x} outside load", addr);
                    return Err(MemoryError::ReadOnly { address: addr });
                }
            }
        }
        if !self.write_enable {
            return Err(MemoryError::WriteDisabled { address: addr });
        }
        let addr = self.check_address(addr)?;
        self.cells.insert(addr, (value & WORD_MASK) as u16);
        self.write_enable = false;
        Ok(())
    }

    /// Number of distinct addresses ever written.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no address has ever been written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `addr` has ever been written.
    pub fn contains(&self, addr: u32) -> bool {
        addr <= ADDR_MAX && self.cells.contains_key(&(addr as u16))
    }

    /// Highest address ever written, if any.
    pub fn highest_written(&self) -> Option<u16> {
        self.cells.keys().copied().max()
    }

    /// Produces a lazy hexdump over `[start, end)` where `end` is
    /// `min(stop, highest_written + 1)` if `stop` is given, else
    /// `highest_written + 1`. Empty spaces dump no rows at all.
    ///
    /// The iterator borrows the space; re-invoke after mutations for a
    /// fresh view. [`DUMP_WIDTH`](crate::DUMP_WIDTH) is the conventional
    /// row width.
    pub fn dump(&self, start: u32, stop: Option<u32>, width: usize) -> Dump<'_> {
        Dump::new(self, start, stop, width)
    }

    pub(crate) fn cell(&self, addr: u16) -> u16 {
        self.cells.get(&addr).copied().unwrap_or(self.default)
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_zero() {
        let mem = AddressSpace::new();
        assert_eq!(mem.read(0x0000).unwrap(), 0);
        assert_eq!(mem.read(0xFFFF).unwrap(), 0);
    }

    #[test]
    fn test_configured_default_honored() {
        let mem = AddressSpace::with_default(0xBEEF);
        assert_eq!(mem.read(0x0100).unwrap(), 0xBEEF);
    }

    #[test]
    fn test_write_then_read() {
        let mut mem = AddressSpace::new();
        mem.set_write_enable(true);
        mem.write(0x0042, 0x1234).unwrap();
        assert_eq!(mem.read(0x0042).unwrap(), 0x1234);
    }

    #[test]
    fn test_write_masks_to_16_bits() {
        let mut mem = AddressSpace::new();
        mem.set_write_enable(true);
        mem.write(0x0000, 0x1_ABCD).unwrap();
        assert_eq!(mem.read(0x0000).unwrap(), 0xABCD);
    }

    #[test]
    fn test_write_without_gate_fails() {
        let mut mem = AddressSpace::new();
        assert_eq!(
            mem.write(0x0000, 1),
            Err(MemoryError::WriteDisabled { address: 0x0000 })
        );
        // Target cell unchanged.
        assert_eq!(mem.read(0x0000).unwrap(), 0);
        assert!(mem.is_empty());
    }

    #[test]
    fn test_gate_is_single_use() {
        let mut mem = AddressSpace::new();
        mem.set_write_enable(true);
        mem.write(0x0000, 1).unwrap();
        assert!(!mem.write_enabled());
        assert_eq!(
            mem.write(0x0001, 2),
            Err(MemoryError::WriteDisabled { address: 0x0001 })
        );
    }

    #[test]
    fn test_gate_can_be_cleared_manually() {
        let mut mem = AddressSpace::new();
        mem.set_write_enable(true);
        mem.set_write_enable(false);
        assert!(mem.write(0x0000, 1).is_err());
    }

    #[test]
    fn test_read_out_of_range() {
        let mem = AddressSpace::new();
        assert_eq!(
            mem.read(0x10000),
            Err(MemoryError::OutOfRange { address: 0x10000 })
        );
    }

    #[test]
    fn test_write_out_of_range_leaves_gate_armed() {
        let mut mem = AddressSpace::new();
        mem.set_write_enable(true);
        assert_eq!(
            mem.write(0x10000, 1),
            Err(MemoryError::OutOfRange { address: 0x10000 })
        );
        // The gate check precedes the address check; a failed address
        // check does not consume the gate.
        assert!(mem.write_enabled());
        mem.write(0x0000, 1).unwrap();
    }

    #[test]
    fn test_read_does_not_consume_gate() {
        let mut mem = AddressSpace::new();
        mem.set_write_enable(true);
        let _ = mem.read(0x0000).unwrap();
        assert!(mem.write_enabled());
    }

    #[test]
    fn test_len_and_contains() {
        let mut mem = AddressSpace::new();
        assert_eq!(mem.len(), 0);
        assert!(!mem.contains(0x0010));

        mem.set_write_enable(true);
        mem.write(0x0010, 7).unwrap();
        assert_eq!(mem.len(), 1);
        assert!(mem.contains(0x0010));
        assert!(!mem.contains(0x0011));
        assert!(!mem.contains(0x10000));

        // Rewriting the same address does not grow the space.
        mem.set_write_enable(true);
        mem.write(0x0010, 8).unwrap();
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn test_highest_written() {
        let mut mem = AddressSpace::new();
        assert_eq!(mem.highest_written(), None);
        mem.set_write_enable(true);
        mem.write(0x0100, 1).unwrap();
        mem.set_write_enable(true);
        mem.write(0x0005, 2).unwrap();
        assert_eq!(mem.highest_written(), Some(0x0100));
    }

    #[test]
    fn test_constructor_accessors() {
        let mem = AddressSpace::with_policy_and_default(WritePolicy::StackProtected, 0x00FF);
        assert_eq!(mem.policy(), WritePolicy::StackProtected);
        assert_eq!(mem.default_value(), 0x00FF);
        assert!(!mem.write_enabled());
    }

    #[test]
    fn test_writing_zero_still_counts_as_written() {
        let mut mem = AddressSpace::with_default(0xFFFF);
        mem.set_write_enable(true);
        mem.write(0x0000, 0).unwrap();
        assert!(mem.contains(0x0000));
        assert_eq!(mem.read(0x0000).unwrap(), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_addr() -> impl Strategy<Value = u32> {
        0u32..=ADDR_MAX
    }

    proptest! {
        #[test]
        fn test_write_read_roundtrip_masks(addr in arb_addr(), value in any::<u32>()) {
            let mut mem = AddressSpace::new();
            mem.set_write_enable(true);
            mem.write(addr, value).unwrap();
            prop_assert_eq!(mem.read(addr).unwrap(), (value & WORD_MASK) as u16);
        }

        #[test]
        fn test_unwritten_always_reads_zero(addr in arb_addr()) {
            let mem = AddressSpace::new();
            prop_assert_eq!(mem.read(addr).unwrap(), 0);
        }

        #[test]
        fn test_out_of_range_rejected(addr in (ADDR_MAX + 1)..) {
            let mut mem = AddressSpace::new();
            prop_assert_eq!(mem.read(addr), Err(MemoryError::OutOfRange { address: addr }));
            mem.set_write_enable(true);
            prop_assert_eq!(mem.write(addr, 0), Err(MemoryError::OutOfRange { address: addr }));
        }

        #[test]
        fn test_second_write_needs_rearm(addr in arb_addr(), value in any::<u32>()) {
            let mut mem = AddressSpace::new();
            mem.set_write_enable(true);
            mem.write(addr, value).unwrap();
            prop_assert_eq!(
                mem.write(addr, value),
                Err(MemoryError::WriteDisabled { address: addr })
            );
        }
    }
}
