use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::instructions::check_submission::{SubmissionFailure, OUT_OF_GAS, UNDEFINED};
use crate::interfaces::{call_external, CallEnv, Revert};
use crate::state::{Action, Condition, TaskReceipt};
use crate::utils::{starts_with_ok, GasMeter};

#[derive(Clone, Debug, PartialEq, Eq, ::thiserror::Error)]
pub enum CanExecFailure {
    #[error("ExecutorNotMinStaked")]
    ExecutorNotMinStaked,
    #[error("ProviderIlliquidity")]
    ProviderIlliquidity,
    #[error("NotProvided:{0}")]
    NotProvided(String),
    #[error("InvalidTaskReceiptHash")]
    InvalidTaskReceiptHash,
    #[error("TaskReceiptExpired")]
    TaskReceiptExpired,
    #[error("ConditionNotOk:{0}")]
    ConditionNotOk(String),
    #[error("ConditionReverted:{0}")]
    ConditionReverted(String),
    #[error("ActionTermsNotOk:{0}")]
    ActionTermsNotOk(String),
    #[error("ActionReverted:{0}")]
    ActionReverted(String),
    #[error("ActionRevertedNoMessage")]
    ActionRevertedNoMessage,
    #[error("NextTaskNotSubmittable:{0}")]
    NextTaskNotSubmittable(SubmissionFailure),
    #[error("InvalidExecutor")]
    InvalidExecutor,
}

impl TaskEngine {
    /// Read-only eligibility check of `receipt` for execution by
    /// `ctx.sender`, assuming `gas_limit` gas at `gas_price`.
    pub fn can_exec(
        &self,
        ctx: &TxContext,
        receipt: &TaskReceipt,
        gas_limit: u64,
        gas_price: u64,
    ) -> std::result::Result<(), CanExecFailure> {
        let mut gas = GasMeter::new(ctx.gas_limit);
        self.check_can_exec(
            &ctx.sender,
            receipt,
            gas_limit,
            gas_price,
            ctx.timestamp,
            &mut gas,
        )
    }

    pub(crate) fn check_can_exec(
        &self,
        sender: &Pubkey,
        receipt: &TaskReceipt,
        gas_limit: u64,
        gas_price: u64,
        now: i64,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), CanExecFailure> {
        let provider = &receipt.provider;
        let executor = self.state.providers.executor_by_provider(&provider.addr);

        if !self.is_executor_min_staked(executor.as_ref()) {
            return Err(CanExecFailure::ExecutorNotMinStaked);
        }

        if !self.is_provider_liquid(&provider.addr, gas_limit, gas_price) {
            return Err(CanExecFailure::ProviderIlliquidity);
        }

        // An index outside the task list can never match a stored hash
        let task = receipt
            .task()
            .ok_or(CanExecFailure::InvalidTaskReceiptHash)?;

        let env = CallEnv {
            task_receipt_id: receipt.id,
            user_proxy: receipt.user_proxy,
            cycle_id: receipt.cycle_id,
            gas_price,
            timestamp: now,
            storage: &self.state.storage,
        };

        self.provider_can_exec(&env, receipt, task, gas)
            .map_err(CanExecFailure::NotProvided)?;

        let hash_matches = receipt
            .hash()
            .is_ok_and(|hash| self.state.receipts.matches(receipt.id, &hash));
        if !hash_matches {
            return Err(CanExecFailure::InvalidTaskReceiptHash);
        }

        if receipt.is_expired(now) {
            return Err(CanExecFailure::TaskReceiptExpired);
        }

        for condition in &task.conditions {
            self.check_condition(&env, condition, gas)?;
        }

        for action in task.actions.iter().filter(|action| action.terms_ok_check) {
            self.check_action_terms(&env, action, gas)?;
        }

        if receipt.submissions_left != 1 {
            let next_task = receipt
                .next_task()
                .ok_or(CanExecFailure::InvalidTaskReceiptHash)?;
            self.check_submission_metered(&env, provider, next_task, receipt.expiry_date, gas)
                .map_err(CanExecFailure::NextTaskNotSubmittable)?;
        }

        if *sender == crate::ID || Some(*sender) == executor {
            Ok(())
        } else {
            Err(CanExecFailure::InvalidExecutor)
        }
    }

    fn check_condition(
        &self,
        env: &CallEnv<'_>,
        condition: &Condition,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), CanExecFailure> {
        let result = match self.modules.condition(&condition.inst) {
            Some(module) => call_external(gas, |gas| module.ok(env, &condition.data, gas)),
            None => Err(Revert::Unlabeled),
        };

        match result {
            Ok(res) if starts_with_ok(&res) => Ok(()),
            Ok(res) => Err(CanExecFailure::ConditionNotOk(res)),
            Err(Revert::Reason(reason)) => Err(CanExecFailure::ConditionReverted(reason)),
            Err(Revert::Unlabeled) => Err(CanExecFailure::ConditionReverted(UNDEFINED.to_string())),
            Err(Revert::OutOfGas) => Err(CanExecFailure::ConditionReverted(OUT_OF_GAS.to_string())),
        }
    }

    fn check_action_terms(
        &self,
        env: &CallEnv<'_>,
        action: &Action,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), CanExecFailure> {
        let result = match self.modules.action(&action.addr) {
            Some(module) => call_external(gas, |gas| module.terms_ok(env, action, gas)),
            None => Err(Revert::Unlabeled),
        };

        match result {
            Ok(res) if starts_with_ok(&res) => Ok(()),
            Ok(res) => Err(CanExecFailure::ActionTermsNotOk(res)),
            Err(Revert::Reason(reason)) => Err(CanExecFailure::ActionReverted(reason)),
            Err(Revert::Unlabeled) => Err(CanExecFailure::ActionRevertedNoMessage),
            Err(Revert::OutOfGas) => Err(CanExecFailure::ActionReverted(OUT_OF_GAS.to_string())),
        }
    }
}
