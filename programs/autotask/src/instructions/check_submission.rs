use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::interfaces::{call_external, CallEnv, Revert};
use crate::state::{Provider, Task, TaskReceipt, TaskSpec};
use crate::utils::{starts_with_ok, GasMeter};

pub const UNDEFINED: &str = "undefined";
pub const OUT_OF_GAS: &str = "OutOfGas";

#[derive(Clone, Debug, PartialEq, Eq, ::thiserror::Error)]
pub enum SubmissionFailure {
    #[error("ExecutorNotMinStaked")]
    ExecutorNotMinStaked,
    #[error("ExpiryInPast")]
    ExpiryInPast,
    #[error("SelfProviderGasLimitTooLow")]
    SelfProviderGasLimitTooLow,
    #[error("NotProvided:{0}")]
    NotProvided(String),
}

impl SubmissionFailure {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ExecutorNotMinStaked => ErrorCode::ExecutorNotMinStaked,
            Self::ExpiryInPast => ErrorCode::ExpiryInPast,
            Self::SelfProviderGasLimitTooLow => ErrorCode::SelfProviderGasLimitTooLow,
            Self::NotProvided(_) => ErrorCode::NotProvided,
        }
    }
}

impl TaskEngine {
    /// Whether `user_proxy` may currently submit `task` under `provider`.
    pub fn check_submission(
        &self,
        ctx: &TxContext,
        user_proxy: &Pubkey,
        provider: &Provider,
        task: &Task,
        expiry_date: i64,
    ) -> std::result::Result<(), SubmissionFailure> {
        let mut gas = GasMeter::new(ctx.gas_limit);
        let env = CallEnv {
            task_receipt_id: 0,
            user_proxy: *user_proxy,
            cycle_id: 0,
            gas_price: ctx.gas_price,
            timestamp: ctx.timestamp,
            storage: &self.state.storage,
        };
        self.check_submission_metered(&env, provider, task, expiry_date, &mut gas)
    }

    pub(crate) fn check_submission_metered(
        &self,
        env: &CallEnv<'_>,
        provider: &Provider,
        task: &Task,
        expiry_date: i64,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), SubmissionFailure> {
        let executor = self.state.providers.executor_by_provider(&provider.addr);
        if !self.is_executor_min_staked(executor.as_ref()) {
            return Err(SubmissionFailure::ExecutorNotMinStaked);
        }

        if expiry_date != 0 && expiry_date < env.timestamp {
            return Err(SubmissionFailure::ExpiryInPast);
        }

        let provided = if env.user_proxy == provider.addr {
            if task.self_provider_gas_limit < self.config.internal_gas_requirement {
                return Err(SubmissionFailure::SelfProviderGasLimitTooLow);
            }
            self.provider_module_checks(env, provider, task, gas)
        } else {
            self.is_task_provided(env, provider, task, gas)
        };
        provided.map_err(SubmissionFailure::NotProvided)
    }

    /// Delegated provision: the provider whitelisted the task's shape and
    /// its module accepts the proxy.
    pub(crate) fn is_task_provided(
        &self,
        env: &CallEnv<'_>,
        provider: &Provider,
        task: &Task,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), String> {
        if self.delegated_gas_price_ceil(provider, task) == 0 {
            return Err("TaskSpecNotProvided".to_string());
        }
        self.provider_module_checks(env, provider, task, gas)
    }

    /// Eligibility-time provision check, gas price ceilings included.
    pub(crate) fn provider_can_exec(
        &self,
        env: &CallEnv<'_>,
        receipt: &TaskReceipt,
        task: &Task,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), String> {
        if receipt.is_self_provided() {
            let ceil = task.self_provider_gas_price_ceil;
            if ceil != 0 && env.gas_price > ceil {
                return Err("SelfProviderGasPriceCeil".to_string());
            }
            return Ok(());
        }

        match self.delegated_gas_price_ceil(&receipt.provider, task) {
            0 => Err("TaskSpecNotProvided".to_string()),
            ceil if ceil < env.gas_price => Err("TaskSpecGasPriceCeil".to_string()),
            _ => self.provider_module_checks(env, &receipt.provider, task, gas),
        }
    }

    pub(crate) fn provider_module_checks(
        &self,
        env: &CallEnv<'_>,
        provider: &Provider,
        task: &Task,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), String> {
        if !self
            .state
            .providers
            .is_module_provided(&provider.addr, &provider.module)
        {
            return Err("InvalidProviderModule".to_string());
        }

        let result = match self.modules.provider_module(&provider.module) {
            Some(module) => call_external(gas, |gas| module.is_provided(env, provider, task, gas)),
            None => Err(Revert::Unlabeled),
        };

        match result {
            Ok(res) if starts_with_ok(&res) => Ok(()),
            Ok(res) => Err(res),
            Err(Revert::Reason(reason)) => Err(format!("ProviderModuleReverted:{reason}")),
            Err(Revert::Unlabeled) => Err(format!("ProviderModuleReverted:{UNDEFINED}")),
            Err(Revert::OutOfGas) => Err(format!("ProviderModuleReverted:{OUT_OF_GAS}")),
        }
    }

    fn delegated_gas_price_ceil(&self, provider: &Provider, task: &Task) -> u64 {
        TaskSpec::from_task(task, 0)
            .hash()
            .map(|spec_hash| {
                self.state
                    .providers
                    .task_spec_gas_price_ceil(&provider.addr, &spec_hash)
            })
            .unwrap_or_default()
    }
}
