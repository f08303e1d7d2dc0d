use anchor_lang::prelude::*;

use crate::constants::{GAS_CALL, GAS_LOG, GAS_STORAGE_CLEAR, GAS_STORAGE_READ};
use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::events::{CanExecFailed, EngineEvent, ExecReverted, ExecSuccess};
use crate::instructions::check_submission::UNDEFINED;
use crate::instructions::process_payout::{ExecutorPay, GasTerms};
use crate::instructions::submit_task::{CycleAssignment, ReceiptDraft};
use crate::interfaces::{call_external, CallEnv, ProxyResult, Revert};
use crate::state::TaskReceipt;
use crate::utils::{decode_revert_reason, hash_gas, GasMeter, OutOfGas};

/// Reason reported when the guarded step ran out of gas or failed without
/// a classifiable cause.
pub const EXECUTION_WRAPPER_UNDEFINED: &str = "ExecutionWrapper:undefined";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    ExecSuccess {
        executor_success_fee: u64,
        sys_admin_success_fee: u64,
    },
    CanExecFailed {
        reason: String,
    },
    ExecRevert {
        executor_refund: u64,
        reason: String,
    },
}

enum WrapperOutcome {
    Success,
    CanExecFailed(String),
}

fn revert_reason(origin: &str, revert: Revert) -> String {
    match revert {
        Revert::Reason(reason) => format!("{origin}:{reason}"),
        Revert::Unlabeled => format!("{origin}:{UNDEFINED}"),
        Revert::OutOfGas => EXECUTION_WRAPPER_UNDEFINED.to_string(),
    }
}

impl TaskEngine {
    /// Executes `receipt` on behalf of its provider's assigned executor.
    ///
    /// Fails outright, with no effect, if `ctx.gas_limit` does not exceed the
    /// internal gas requirement, if `ctx.gas_price` is below the reference
    /// gas price or if the sender is not the assigned executor. Otherwise
    /// every outcome is reported through [`ExecutionResult`] and an event.
    pub fn exec(&mut self, ctx: &TxContext, receipt: &TaskReceipt) -> Result<ExecutionResult> {
        self.transact(|engine| engine.process_exec(ctx, receipt))
    }

    fn process_exec(&mut self, ctx: &TxContext, receipt: &TaskReceipt) -> Result<ExecutionResult> {
        let start_gas = ctx.gas_limit;
        require!(
            start_gas > self.config.internal_gas_requirement,
            ErrorCode::InsufficientGas
        );
        let mut gas = GasMeter::new(start_gas);

        let gas_price = self.reference_gas_price()?;
        require!(ctx.gas_price >= gas_price, ErrorCode::GasPriceTooLow);

        let executor = self
            .state
            .providers
            .executor_by_provider(&receipt.provider.addr);
        require!(executor == Some(ctx.sender), ErrorCode::InvalidExecutor);
        gas.charge(2 * GAS_STORAGE_READ)?;

        let terms = GasTerms {
            start_gas,
            gas_limit: self.exec_gas_limit(receipt),
            gas_price,
        };

        let stipend = gas
            .remaining()
            .saturating_sub(self.config.internal_gas_requirement);
        let mut wrapper_gas = gas.sub_meter(stipend);
        let snapshot = self.state.clone();
        let outcome = self.execution_wrapper(receipt, &terms, ctx.timestamp, &mut wrapper_gas);
        gas.absorb(&wrapper_gas);

        match outcome {
            Ok(WrapperOutcome::Success) => {
                // The wrapper already consumed the receipt's commitment
                let (executor_success_fee, sys_admin_success_fee) = self
                    .process_provider_payables(
                        &ctx.sender,
                        &receipt.provider.addr,
                        ExecutorPay::Reward,
                        &terms,
                        &gas,
                    )?;

                gas.charge(GAS_LOG)?;
                msg!(
                    "Task receipt {} executed: executor fee {}, sys admin fee {}",
                    receipt.id,
                    executor_success_fee,
                    sys_admin_success_fee
                );
                self.emit_event(EngineEvent::ExecSuccess(ExecSuccess {
                    executor: ctx.sender,
                    task_receipt_id: receipt.id,
                    executor_success_fee,
                    sys_admin_success_fee,
                }));

                Ok(ExecutionResult::ExecSuccess {
                    executor_success_fee,
                    sys_admin_success_fee,
                })
            }
            Ok(WrapperOutcome::CanExecFailed(reason)) => {
                gas.charge(GAS_LOG)?;
                msg!("Task receipt {} can exec failed: {}", receipt.id, reason);
                self.emit_event(EngineEvent::CanExecFailed(CanExecFailed {
                    executor: ctx.sender,
                    task_receipt_id: receipt.id,
                    reason: reason.clone(),
                }));

                Ok(ExecutionResult::CanExecFailed { reason })
            }
            Err(reason) => {
                self.state = snapshot;

                // Only a receipt that was offered the full gas limit is voided
                // and refunded
                let executor_refund = if terms.start_gas < terms.gas_limit
                    || !self.is_live(receipt)
                {
                    0
                } else {
                    gas.charge(GAS_STORAGE_CLEAR)?;
                    self.state.receipts.remove(receipt.id);
                    let (refund, _) = self.process_provider_payables(
                        &ctx.sender,
                        &receipt.provider.addr,
                        ExecutorPay::Refund,
                        &terms,
                        &gas,
                    )?;
                    refund
                };

                gas.charge(GAS_LOG)?;
                msg!(
                    "Task receipt {} execution reverted: {}, refund {}",
                    receipt.id,
                    reason,
                    executor_refund
                );
                self.emit_event(EngineEvent::ExecReverted(ExecReverted {
                    executor: ctx.sender,
                    task_receipt_id: receipt.id,
                    executor_refund,
                    reason: reason.clone(),
                }));

                Ok(ExecutionResult::ExecRevert {
                    executor_refund,
                    reason,
                })
            }
        }
    }

    /// Gas the executor must offer: the task's own limit for self-provided
    /// receipts, the engine-wide maximum otherwise.
    pub fn exec_gas_limit(&self, receipt: &TaskReceipt) -> u64 {
        match receipt.task() {
            Some(task) if receipt.is_self_provided() => task.self_provider_gas_limit,
            _ => self.config.max_gas,
        }
    }

    fn is_live(&self, receipt: &TaskReceipt) -> bool {
        receipt
            .hash()
            .is_ok_and(|hash| self.state.receipts.matches(receipt.id, &hash))
    }

    /// Guarded inner step. An `Err` means every change it made must be
    /// rolled back by the caller.
    fn execution_wrapper(
        &mut self,
        receipt: &TaskReceipt,
        terms: &GasTerms,
        now: i64,
        gas: &mut GasMeter,
    ) -> std::result::Result<WrapperOutcome, String> {
        gas.charge(hash_gas(receipt.encoded_len()) + GAS_STORAGE_READ)
            .map_err(|_| EXECUTION_WRAPPER_UNDEFINED.to_string())?;

        if let Err(failure) =
            self.check_can_exec(&crate::ID, receipt, terms.gas_limit, terms.gas_price, now, gas)
        {
            return Ok(WrapperOutcome::CanExecFailed(failure.to_string()));
        }

        self.perform_exec(receipt, terms.gas_price, now, gas)?;
        Ok(WrapperOutcome::Success)
    }

    fn perform_exec(
        &mut self,
        receipt: &TaskReceipt,
        gas_price: u64,
        now: i64,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), String> {
        let out_of_gas = |_: OutOfGas| EXECUTION_WRAPPER_UNDEFINED.to_string();
        let task = receipt
            .task()
            .ok_or_else(|| EXECUTION_WRAPPER_UNDEFINED.to_string())?;
        let provider = &receipt.provider;
        let module = self.modules.provider_module(&provider.module);

        let env = CallEnv {
            task_receipt_id: receipt.id,
            user_proxy: receipt.user_proxy,
            cycle_id: receipt.cycle_id,
            gas_price,
            timestamp: now,
            storage: &self.state.storage,
        };
        let exec_payload = match module {
            Some(module) => call_external(gas, |gas| module.exec_payload(&env, provider, task, gas)),
            None => Err(Revert::Unlabeled),
        }
        .map_err(|revert| revert_reason("ExecPayload", revert))?;

        // Consumed before calling out so the proxy cannot re-execute it
        gas.charge(GAS_STORAGE_CLEAR).map_err(out_of_gas)?;
        self.state.receipts.remove(receipt.id);

        let proxy_result = match self.modules.user_proxy(&receipt.user_proxy) {
            Some(proxy) => {
                gas.charge(GAS_CALL).map_err(out_of_gas)?;
                proxy.execute(&exec_payload.payload, &mut self.state.storage, gas)
            }
            None => ProxyResult::failure(Vec::new()),
        };
        if gas.ran_out_of_gas() {
            return Err(EXECUTION_WRAPPER_UNDEFINED.to_string());
        }

        if !proxy_result.success {
            return Err(match decode_revert_reason(&proxy_result.return_data) {
                Some(reason) => format!("UserProxy:{reason}"),
                None => format!("UserProxy:{UNDEFINED}"),
            });
        }

        if exec_payload.check_return_data {
            let checked = match module {
                Some(module) => call_external(gas, |gas| {
                    module.exec_revert_check(&proxy_result.return_data, gas)
                }),
                None => Err(Revert::Unlabeled),
            };
            checked.map_err(|revert| revert_reason("ExecRevertCheck", revert))?;
        }

        if receipt.submissions_left != 1 {
            self.resubmit(receipt, gas_price, now, gas)?;
        }

        Ok(())
    }

    /// Stores the successor of a cyclic or chained receipt.
    fn resubmit(
        &mut self,
        receipt: &TaskReceipt,
        gas_price: u64,
        now: i64,
        gas: &mut GasMeter,
    ) -> std::result::Result<(), String> {
        let next_task = receipt
            .next_task()
            .ok_or_else(|| EXECUTION_WRAPPER_UNDEFINED.to_string())?;
        let env = CallEnv {
            task_receipt_id: receipt.id,
            user_proxy: receipt.user_proxy,
            cycle_id: receipt.cycle_id,
            gas_price,
            timestamp: now,
            storage: &self.state.storage,
        };
        self.check_submission_metered(&env, &receipt.provider, next_task, receipt.expiry_date, gas)
            .map_err(|failure| format!("NextTaskNotSubmittable:{failure}"))?;

        self.store_task_receipt(
            ReceiptDraft {
                user_proxy: receipt.user_proxy,
                provider: receipt.provider,
                index: receipt.next_index(),
                tasks: receipt.tasks.clone(),
                expiry_date: receipt.expiry_date,
                cycle: CycleAssignment::Continue(receipt.cycle_id),
                // zero stays unlimited
                submissions_left: receipt.submissions_left.saturating_sub(1),
            },
            gas,
        )
        .map_err(|_| EXECUTION_WRAPPER_UNDEFINED.to_string())?;

        Ok(())
    }
}
