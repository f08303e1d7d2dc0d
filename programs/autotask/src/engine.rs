use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::EngineEvent;
use crate::interfaces::*;
use crate::state::*;

/// Caller, clock and gas terms of one top-level call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxContext {
    pub sender: Pubkey,
    pub timestamp: i64,
    pub gas_limit: u64,
    pub gas_price: u64,
}

impl TxContext {
    pub fn new(sender: Pubkey, timestamp: i64) -> Self {
        Self {
            sender,
            timestamp,
            gas_limit: u64::MAX,
            gas_price: 0,
        }
    }

    pub fn with_gas(mut self, gas_limit: u64, gas_price: u64) -> Self {
        self.gas_limit = gas_limit;
        self.gas_price = gas_price;
        self
    }
}

pub struct TaskEngine {
    pub(crate) config: EngineConfig,
    pub(crate) state: EngineState,
    pub(crate) modules: ModuleRegistry,
    pub(crate) gas_price_oracle: Box<dyn GasPriceOracle>,
}

impl TaskEngine {
    pub fn initialize(
        config: EngineConfig,
        gas_price_oracle: Box<dyn GasPriceOracle>,
    ) -> Result<Self> {
        config.validate()?;
        msg!(
            "Engine initialized: max_gas {}, internal_gas_requirement {}",
            config.max_gas,
            config.internal_gas_requirement
        );
        Ok(Self {
            config,
            state: EngineState::default(),
            modules: ModuleRegistry::default(),
            gas_price_oracle,
        })
    }

    /// Runs `op` atomically: any error restores the state it started from.
    pub(crate) fn transact<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.state.clone();
        let result = op(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    pub(crate) fn emit_event(&mut self, event: EngineEvent) {
        self.state.events.push(event);
    }

    pub(crate) fn reference_gas_price(&self) -> Result<u64> {
        self.gas_price_oracle
            .gas_price()
            .map_err(|_| error!(ErrorCode::GasPriceOracleFailure))
    }

    pub fn deploy_condition(&mut self, addr: Pubkey, condition: Box<dyn ConditionCheck>) {
        self.modules.deploy_condition(addr, condition);
    }

    pub fn deploy_action(&mut self, addr: Pubkey, action: Box<dyn ActionTerms>) {
        self.modules.deploy_action(addr, action);
    }

    pub fn deploy_provider_module(&mut self, addr: Pubkey, module: Box<dyn ProviderModule>) {
        self.modules.deploy_provider_module(addr, module);
    }

    pub fn deploy_user_proxy(&mut self, addr: Pubkey, proxy: Box<dyn UserProxy>) {
        self.modules.deploy_user_proxy(addr, proxy);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_task_receipt_id(&self) -> u64 {
        self.state.receipts.current_task_receipt_id()
    }

    pub fn task_receipt_hash(&self, id: u64) -> Option<[u8; 32]> {
        self.state.receipts.get(id)
    }

    pub fn hash_task_receipt(&self, receipt: &TaskReceipt) -> Result<[u8; 32]> {
        receipt.hash()
    }

    pub fn provider_funds(&self, provider: &Pubkey) -> u64 {
        self.state.ledger.provider_funds(provider)
    }

    pub fn executor_stake(&self, executor: &Pubkey) -> u64 {
        self.state.ledger.executor_stake(executor)
    }

    pub fn sys_admin_funds(&self) -> u64 {
        self.state.ledger.sys_admin_funds()
    }

    pub fn executor_by_provider(&self, provider: &Pubkey) -> Option<Pubkey> {
        self.state.providers.executor_by_provider(provider)
    }

    pub fn is_module_provided(&self, provider: &Pubkey, module: &Pubkey) -> bool {
        self.state.providers.is_module_provided(provider, module)
    }

    pub fn task_spec_gas_price_ceil(&self, provider: &Pubkey, spec: &TaskSpec) -> Result<u64> {
        Ok(self
            .state
            .providers
            .task_spec_gas_price_ceil(provider, &spec.hash()?))
    }

    pub fn is_executor_min_staked(&self, executor: Option<&Pubkey>) -> bool {
        executor.is_some_and(|executor| {
            self.state.ledger.executor_stake(executor) >= self.config.min_executor_stake
        })
    }

    pub fn is_provider_liquid(&self, provider: &Pubkey, gas_limit: u64, gas_price: u64) -> bool {
        self.config
            .min_exec_provider_funds(gas_limit, gas_price)
            .is_ok_and(|required| self.state.ledger.provider_funds(provider) >= required)
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.state.events
    }

    pub fn storage(&self) -> &ContractStorage {
        &self.state.storage
    }
}
