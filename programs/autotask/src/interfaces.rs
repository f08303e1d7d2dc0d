use anchor_lang::prelude::*;
use std::collections::HashMap;

use crate::state::{Action, ContractStorage, Provider, Task};
use crate::utils::{GasMeter, OutOfGas};

/// How a call into third-party code failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Revert {
    Reason(String),
    Unlabeled,
    OutOfGas,
}

impl From<OutOfGas> for Revert {
    fn from(_: OutOfGas) -> Self {
        Revert::OutOfGas
    }
}

pub type CallResult<T> = std::result::Result<T, Revert>;

/// Read-only view handed to conditions, actions and provider modules.
pub struct CallEnv<'a> {
    pub task_receipt_id: u64,
    pub user_proxy: Pubkey,
    pub cycle_id: u64,
    pub gas_price: u64,
    pub timestamp: i64,
    pub storage: &'a ContractStorage,
}

pub trait ConditionCheck {
    /// Returns a string starting with `OK` when the condition holds.
    fn ok(&self, env: &CallEnv<'_>, data: &[u8], gas: &mut GasMeter) -> CallResult<String>;
}

pub trait ActionTerms {
    /// Returns a string starting with `OK` when `action` may run for `env.user_proxy`.
    fn terms_ok(&self, env: &CallEnv<'_>, action: &Action, gas: &mut GasMeter)
        -> CallResult<String>;
}

pub struct ExecPayload {
    pub payload: Vec<u8>,
    /// Set when the proxy reports inner reverts in its return data instead of
    /// failing the call.
    pub check_return_data: bool,
}

pub trait ProviderModule {
    fn is_provided(
        &self,
        env: &CallEnv<'_>,
        provider: &Provider,
        task: &Task,
        gas: &mut GasMeter,
    ) -> CallResult<String>;

    fn exec_payload(
        &self,
        env: &CallEnv<'_>,
        provider: &Provider,
        task: &Task,
        gas: &mut GasMeter,
    ) -> CallResult<ExecPayload>;

    /// Fails if `return_data` carries an embedded failure.
    fn exec_revert_check(&self, return_data: &[u8], gas: &mut GasMeter) -> CallResult<()>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProxyResult {
    pub success: bool,
    pub return_data: Vec<u8>,
}

impl ProxyResult {
    pub fn success(return_data: Vec<u8>) -> Self {
        Self {
            success: true,
            return_data,
        }
    }

    pub fn failure(return_data: Vec<u8>) -> Self {
        Self {
            success: false,
            return_data,
        }
    }
}

pub trait UserProxy {
    fn execute(
        &self,
        payload: &[u8],
        storage: &mut ContractStorage,
        gas: &mut GasMeter,
    ) -> ProxyResult;
}

pub trait GasPriceOracle {
    fn gas_price(&self) -> CallResult<u64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedGasPriceOracle(pub u64);

impl GasPriceOracle for FixedGasPriceOracle {
    fn gas_price(&self) -> CallResult<u64> {
        Ok(self.0)
    }
}

/// Code deployed at each address the engine may call into.
#[derive(Default)]
pub struct ModuleRegistry {
    conditions: HashMap<Pubkey, Box<dyn ConditionCheck>>,
    actions: HashMap<Pubkey, Box<dyn ActionTerms>>,
    provider_modules: HashMap<Pubkey, Box<dyn ProviderModule>>,
    user_proxies: HashMap<Pubkey, Box<dyn UserProxy>>,
}

impl ModuleRegistry {
    pub fn deploy_condition(&mut self, addr: Pubkey, condition: Box<dyn ConditionCheck>) {
        self.conditions.insert(addr, condition);
    }

    pub fn deploy_action(&mut self, addr: Pubkey, action: Box<dyn ActionTerms>) {
        self.actions.insert(addr, action);
    }

    pub fn deploy_provider_module(&mut self, addr: Pubkey, module: Box<dyn ProviderModule>) {
        self.provider_modules.insert(addr, module);
    }

    pub fn deploy_user_proxy(&mut self, addr: Pubkey, proxy: Box<dyn UserProxy>) {
        self.user_proxies.insert(addr, proxy);
    }

    pub fn condition(&self, addr: &Pubkey) -> Option<&dyn ConditionCheck> {
        self.conditions.get(addr).map(|c| c.as_ref())
    }

    pub fn action(&self, addr: &Pubkey) -> Option<&dyn ActionTerms> {
        self.actions.get(addr).map(|a| a.as_ref())
    }

    pub fn provider_module(&self, addr: &Pubkey) -> Option<&dyn ProviderModule> {
        self.provider_modules.get(addr).map(|m| m.as_ref())
    }

    pub fn user_proxy(&self, addr: &Pubkey) -> Option<&dyn UserProxy> {
        self.user_proxies.get(addr).map(|p| p.as_ref())
    }

    pub fn is_user_proxy(&self, addr: &Pubkey) -> bool {
        self.user_proxies.contains_key(addr)
    }
}

/// Calls into third-party code, charging the call cost up front.
pub(crate) fn call_external<T>(
    gas: &mut GasMeter,
    call: impl FnOnce(&mut GasMeter) -> CallResult<T>,
) -> CallResult<T> {
    gas.charge(crate::constants::GAS_CALL)?;
    call(gas)
}
