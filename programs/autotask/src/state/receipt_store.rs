use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::errors::ErrorCode;

/// Commitment hashes of live task receipts, keyed by receipt id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiptStore {
    current_task_receipt_id: u64,
    hashes: BTreeMap<u64, [u8; 32]>,
}

impl ReceiptStore {
    pub fn current_task_receipt_id(&self) -> u64 {
        self.current_task_receipt_id
    }

    pub fn next_task_receipt_id(&mut self) -> Result<u64> {
        self.current_task_receipt_id = self
            .current_task_receipt_id
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(self.current_task_receipt_id)
    }

    pub fn get(&self, id: u64) -> Option<[u8; 32]> {
        self.hashes.get(&id).copied()
    }

    pub fn insert(&mut self, id: u64, hash: [u8; 32]) {
        self.hashes.insert(id, hash);
    }

    pub fn remove(&mut self, id: u64) -> Option<[u8; 32]> {
        self.hashes.remove(&id)
    }

    pub fn matches(&self, id: u64, hash: &[u8; 32]) -> bool {
        self.hashes.get(&id) == Some(hash)
    }
}
