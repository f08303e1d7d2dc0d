use anchor_lang::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Per-provider assignments: executor, whitelisted provider modules and the
/// gas price ceiling of each whitelisted task spec.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderRegistry {
    executor_by_provider: BTreeMap<Pubkey, Pubkey>,
    provider_modules: BTreeMap<Pubkey, BTreeSet<Pubkey>>,
    task_spec_gas_price_ceil: BTreeMap<(Pubkey, [u8; 32]), u64>,
}

impl ProviderRegistry {
    pub fn executor_by_provider(&self, provider: &Pubkey) -> Option<Pubkey> {
        self.executor_by_provider.get(provider).copied()
    }

    pub fn assign_executor(&mut self, provider: &Pubkey, executor: &Pubkey) -> Option<Pubkey> {
        self.executor_by_provider.insert(*provider, *executor)
    }

    pub fn is_module_provided(&self, provider: &Pubkey, module: &Pubkey) -> bool {
        self.provider_modules
            .get(provider)
            .is_some_and(|modules| modules.contains(module))
    }

    /// Returns false if the module was already provided.
    pub fn add_module(&mut self, provider: &Pubkey, module: &Pubkey) -> bool {
        self.provider_modules
            .entry(*provider)
            .or_default()
            .insert(*module)
    }

    pub fn remove_module(&mut self, provider: &Pubkey, module: &Pubkey) -> bool {
        self.provider_modules
            .get_mut(provider)
            .is_some_and(|modules| modules.remove(module))
    }

    /// Zero means the task spec is not provided.
    pub fn task_spec_gas_price_ceil(&self, provider: &Pubkey, spec_hash: &[u8; 32]) -> u64 {
        self.task_spec_gas_price_ceil
            .get(&(*provider, *spec_hash))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_task_spec_gas_price_ceil(
        &mut self,
        provider: &Pubkey,
        spec_hash: [u8; 32],
        gas_price_ceil: u64,
    ) -> Option<u64> {
        self.task_spec_gas_price_ceil
            .insert((*provider, spec_hash), gas_price_ceil)
    }

    pub fn remove_task_spec(&mut self, provider: &Pubkey, spec_hash: &[u8; 32]) -> Option<u64> {
        self.task_spec_gas_price_ceil.remove(&(*provider, *spec_hash))
    }
}
