use anchor_lang::prelude::Pubkey;
use autotask::TaskReceipt;
use sha2::Digest;

// Engine parameters
pub const GAS_PRICE: u64 = 10;
pub const MAX_GAS: u64 = 7_000_000;
pub const INTERNAL_GAS_REQUIREMENT: u64 = 100_000;
pub const MIN_EXECUTOR_STAKE: u64 = 1_000_000_000;
pub const NOW: i64 = 1_700_000_000;

// Balances
pub const DEFAULT_PROVIDER_FUNDS: u64 = 1_000_000_000;
pub const SELF_PROVIDER_GAS_LIMIT: u64 = 500_000;

// Parties
pub const EXECUTOR: Pubkey = Pubkey::new_from_array([1; 32]);
pub const PROVIDER: Pubkey = Pubkey::new_from_array([2; 32]);
pub const USER_PROXY: Pubkey = Pubkey::new_from_array([3; 32]);
pub const STRANGER: Pubkey = Pubkey::new_from_array([4; 32]);
/// A user proxy that provides for its own tasks.
pub const SELF_PROVIDER: Pubkey = Pubkey::new_from_array([5; 32]);

// Deployed modules
pub const PROVIDER_MODULE: Pubkey = Pubkey::new_from_array([10; 32]);
pub const CHECKED_PROVIDER_MODULE: Pubkey = Pubkey::new_from_array([11; 32]);
pub const REJECTING_PROVIDER_MODULE: Pubkey = Pubkey::new_from_array([12; 32]);
pub const GAS_HUNGRY_PROVIDER_MODULE: Pubkey = Pubkey::new_from_array([13; 32]);
pub const CONDITION: Pubkey = Pubkey::new_from_array([20; 32]);
pub const OTHER_CONDITION: Pubkey = Pubkey::new_from_array([21; 32]);
pub const UNDEPLOYED_CONDITION: Pubkey = Pubkey::new_from_array([22; 32]);
pub const ACTION: Pubkey = Pubkey::new_from_array([30; 32]);
pub const ACTION_TERMS_NOT_OK: Pubkey = Pubkey::new_from_array([31; 32]);
pub const ACTION_TERMS_REVERT: Pubkey = Pubkey::new_from_array([32; 32]);
pub const ACTION_TERMS_REVERT_UNLABELED: Pubkey = Pubkey::new_from_array([33; 32]);
pub const ACTION_TERMS_OUT_OF_GAS: Pubkey = Pubkey::new_from_array([34; 32]);

// Storage touched by the mock user proxy
pub const COUNTER_CONTRACT: Pubkey = Pubkey::new_from_array([40; 32]);
pub const COUNTER_KEY: &[u8] = b"count";

pub const REJECTION_REASON: &str = "ProxyNotWhitelisted";
pub const ACTION_TERMS_REASON: &str = "InsufficientAllowance";
pub const ACTION_REVERT_REASON: &str = "Paused";

pub fn compute_task_receipt_hash(receipt: &TaskReceipt) -> [u8; 32] {
    let mut hasher = sha2::Sha256::new();
    hasher.update(b"AUTOTASK_RECEIPT");
    hasher.update(anchor_lang::prelude::borsh::to_vec(receipt).unwrap());
    hasher.finalize().into()
}
