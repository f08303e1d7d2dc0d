use anchor_lang::prelude::*;

use crate::constants::{GAS_LOG, GAS_STORAGE_WRITE};
use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::events::{EngineEvent, TaskSubmitted};
use crate::interfaces::CallEnv;
use crate::state::{Provider, Task, TaskReceipt};
use crate::utils::{hash_gas, GasMeter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CycleAssignment {
    Single,
    NewCycle,
    Continue(u64),
}

pub(crate) struct ReceiptDraft {
    pub user_proxy: Pubkey,
    pub provider: Provider,
    pub index: u64,
    pub tasks: Vec<Task>,
    pub expiry_date: i64,
    pub cycle: CycleAssignment,
    pub submissions_left: u64,
}

impl TaskEngine {
    /// Submits a single task for the calling user proxy.
    pub fn submit_task(
        &mut self,
        ctx: &TxContext,
        provider: Provider,
        task: Task,
        expiry_date: i64,
    ) -> Result<TaskReceipt> {
        self.transact(|engine| {
            engine.submit(ctx, provider, vec![task], expiry_date, CycleAssignment::Single, 1)
        })
    }

    /// Submits `tasks` to be executed in order, `cycles` times round.
    /// Zero cycles repeats forever.
    pub fn submit_task_cycle(
        &mut self,
        ctx: &TxContext,
        provider: Provider,
        tasks: Vec<Task>,
        expiry_date: i64,
        cycles: u64,
    ) -> Result<TaskReceipt> {
        self.transact(|engine| {
            let submissions_left = cycles
                .checked_mul(tasks.len() as u64)
                .ok_or(ErrorCode::Overflow)?;
            engine.submit(
                ctx,
                provider,
                tasks,
                expiry_date,
                CycleAssignment::NewCycle,
                submissions_left,
            )
        })
    }

    /// Submits `tasks` for `total_submits` executions in total, zero for no
    /// limit. A bounded chain must run through every task at least once.
    pub fn submit_task_chain(
        &mut self,
        ctx: &TxContext,
        provider: Provider,
        tasks: Vec<Task>,
        expiry_date: i64,
        total_submits: u64,
    ) -> Result<TaskReceipt> {
        self.transact(|engine| {
            if total_submits != 0 {
                require!(
                    total_submits >= tasks.len() as u64,
                    ErrorCode::InsufficientChainLength
                );
            }
            engine.submit(
                ctx,
                provider,
                tasks,
                expiry_date,
                CycleAssignment::NewCycle,
                total_submits,
            )
        })
    }

    fn submit(
        &mut self,
        ctx: &TxContext,
        provider: Provider,
        tasks: Vec<Task>,
        expiry_date: i64,
        cycle: CycleAssignment,
        submissions_left: u64,
    ) -> Result<TaskReceipt> {
        require!(!tasks.is_empty(), ErrorCode::NeedAtLeastOneTask);
        require!(
            self.modules.is_user_proxy(&ctx.sender),
            ErrorCode::SenderNotUserProxy
        );

        let mut gas = GasMeter::new(ctx.gas_limit);
        let env = CallEnv {
            task_receipt_id: 0,
            user_proxy: ctx.sender,
            cycle_id: 0,
            gas_price: ctx.gas_price,
            timestamp: ctx.timestamp,
            storage: &self.state.storage,
        };
        if let Err(failure) =
            self.check_submission_metered(&env, &provider, &tasks[0], expiry_date, &mut gas)
        {
            msg!("Submission rejected: {}", failure);
            return Err(error!(failure.error_code()));
        }

        self.store_task_receipt(
            ReceiptDraft {
                user_proxy: ctx.sender,
                provider,
                index: 0,
                tasks,
                expiry_date,
                cycle,
                submissions_left,
            },
            &mut gas,
        )
    }

    /// Assigns the next id and commits the receipt's hash. Callers must have
    /// checked submittability first.
    pub(crate) fn store_task_receipt(
        &mut self,
        draft: ReceiptDraft,
        gas: &mut GasMeter,
    ) -> Result<TaskReceipt> {
        let id = self.state.receipts.next_task_receipt_id()?;
        let cycle_id = match draft.cycle {
            CycleAssignment::Single => 0,
            CycleAssignment::NewCycle => id,
            CycleAssignment::Continue(cycle_id) => cycle_id,
        };

        let task_receipt = TaskReceipt {
            id,
            user_proxy: draft.user_proxy,
            provider: draft.provider,
            index: draft.index,
            tasks: draft.tasks,
            expiry_date: draft.expiry_date,
            cycle_id,
            submissions_left: draft.submissions_left,
        };

        gas.charge(hash_gas(task_receipt.encoded_len()))?;
        let task_receipt_hash = task_receipt.hash()?;

        gas.charge(GAS_STORAGE_WRITE)?;
        self.state.receipts.insert(id, task_receipt_hash);

        gas.charge(GAS_LOG)?;
        msg!(
            "Task receipt {} submitted, index {}, submissions left {}",
            id,
            task_receipt.index,
            task_receipt.submissions_left
        );
        self.emit_event(EngineEvent::TaskSubmitted(TaskSubmitted {
            task_receipt_id: id,
            task_receipt_hash,
            task_receipt: task_receipt.clone(),
        }));

        Ok(task_receipt)
    }
}
