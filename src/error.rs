//! Error types for the memory subsystem.

use thiserror::Error;

/// Errors raised by memory operations.
///
/// Every variant signals caller misuse, not a transient condition: the core
/// never retries or recovers, it surfaces the error to the immediate caller
/// and leaves deciding what to do to the surrounding driver.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// Address outside the 16-bit address space
    #[error("address out of range: {address:#06x}")]
    OutOfRange { address: u32 },

    /// Write attempted without arming the write-enable gate
    #[error("write to {address:#06x} while write-enable is clear")]
    WriteDisabled { address: u32 },

    /// Non-stack write targeting the protected stack region
    #[error("write to stack region {address:#06x} disallowed")]
    StackProtected { address: u32 },

    /// Write to instruction memory outside a program load
    #[error("instruction memory at {address:#06x} is read-only outside a load")]
    ReadOnly { address: u32 },
}

/// Result type for memory operations
pub type Result<T> = std::result::Result<T, MemoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = MemoryError::OutOfRange { address: 0x10000 };
        assert_eq!(err.to_string(), "address out of range: 0x10000");
    }

    #[test]
    fn test_write_disabled_display() {
        let err = MemoryError::WriteDisabled { address: 0x0042 };
        assert_eq!(
            err.to_string(),
            "write to 0x0042 while write-enable is clear"
        );
    }

    #[test]
    fn test_stack_protected_display() {
        let err = MemoryError::StackProtected { address: 0xFF00 };
        assert_eq!(err.to_string(), "write to stack region 0xff00 disallowed");
    }

    #[test]
    fn test_read_only_display() {
        let err = MemoryError::ReadOnly { address: 0x0010 };
        assert_eq!(
            err.to_string(),
            "instruction memory at 0x0010 is read-only outside a load"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<MemoryError>();
        assert_sync::<MemoryError>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = MemoryError::OutOfRange { address: 0x100 };
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("OutOfRange"));
    }
}
