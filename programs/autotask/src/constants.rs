/// Domain tag prepended to every task receipt before hashing.
pub const TASK_RECEIPT_DOMAIN: &[u8] = b"AUTOTASK_RECEIPT";
/// Domain tag prepended to every task spec before hashing.
pub const TASK_SPEC_DOMAIN: &[u8] = b"AUTOTASK_TASK_SPEC";

/// Success sentinel every module check result must start with.
pub const OK: &str = "OK";

/// Stored for a task spec provided with a zero gas price ceiling.
pub const NO_CEIL: u64 = u64::MAX;

/// Selector prefixing revert return data that carries a reason string.
pub const REVERT_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

// Gas schedule for engine-internal work
pub const GAS_STORAGE_READ: u64 = 800;
pub const GAS_STORAGE_WRITE: u64 = 20_000;
pub const GAS_STORAGE_CLEAR: u64 = 5_000;
pub const GAS_CALL: u64 = 700;
pub const GAS_LOG: u64 = 1_500;
pub const GAS_HASH_BASE: u64 = 30;
pub const GAS_HASH_WORD: u64 = 6;

// Config defaults
pub const DEFAULT_MAX_GAS: u64 = 7_000_000;
pub const DEFAULT_INTERNAL_GAS_REQUIREMENT: u64 = 100_000;
pub const DEFAULT_EXEC_TX_OVERHEAD: u64 = 55_000;
pub const DEFAULT_MIN_EXECUTOR_STAKE: u64 = 1_000_000_000;
pub const DEFAULT_EXECUTOR_SUCCESS_SHARE: u64 = 50;
pub const DEFAULT_SYS_ADMIN_SUCCESS_SHARE: u64 = 20;
