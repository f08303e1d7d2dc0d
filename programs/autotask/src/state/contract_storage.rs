use anchor_lang::prelude::*;
use std::collections::BTreeMap;

/// World state owned by third-party contracts, addressed by
/// `(contract, key)`. Snapshotted together with the engine's own state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractStorage {
    slots: BTreeMap<(Pubkey, Vec<u8>), Vec<u8>>,
}

impl ContractStorage {
    pub fn get(&self, contract: &Pubkey, key: &[u8]) -> Option<&[u8]> {
        self.slots
            .get(&(*contract, key.to_vec()))
            .map(|value| value.as_slice())
    }

    pub fn set(&mut self, contract: &Pubkey, key: &[u8], value: Vec<u8>) -> Option<Vec<u8>> {
        self.slots.insert((*contract, key.to_vec()), value)
    }

    pub fn remove(&mut self, contract: &Pubkey, key: &[u8]) -> Option<Vec<u8>> {
        self.slots.remove(&(*contract, key.to_vec()))
    }

    pub fn get_u64(&self, contract: &Pubkey, key: &[u8]) -> u64 {
        self.get(contract, key)
            .and_then(|value| <[u8; 8]>::try_from(value).ok())
            .map(u64::from_le_bytes)
            .unwrap_or_default()
    }

    pub fn set_u64(&mut self, contract: &Pubkey, key: &[u8], value: u64) {
        self.set(contract, key, value.to_le_bytes().to_vec());
    }
}
