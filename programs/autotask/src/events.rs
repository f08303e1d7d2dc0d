use anchor_lang::prelude::*;
use anchor_lang::Event;

use crate::state::TaskReceipt;

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSubmitted {
    pub task_receipt_id: u64,
    pub task_receipt_hash: [u8; 32],
    pub task_receipt: TaskReceipt,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ExecSuccess {
    pub executor: Pubkey,
    pub task_receipt_id: u64,
    pub executor_success_fee: u64,
    pub sys_admin_success_fee: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct CanExecFailed {
    pub executor: Pubkey,
    pub task_receipt_id: u64,
    pub reason: String,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ExecReverted {
    pub executor: Pubkey,
    pub task_receipt_id: u64,
    pub executor_refund: u64,
    pub reason: String,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskCancelled {
    pub task_receipt_id: u64,
    pub cancellor: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct FundsProvided {
    pub provider: Pubkey,
    pub amount: u64,
    pub new_provider_funds: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct FundsUnprovided {
    pub provider: Pubkey,
    pub amount: u64,
    pub new_provider_funds: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutorStaked {
    pub executor: Pubkey,
    pub amount: u64,
    pub new_stake: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutorAssigned {
    pub provider: Pubkey,
    pub old_executor: Option<Pubkey>,
    pub new_executor: Pubkey,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    TaskSubmitted(TaskSubmitted),
    ExecSuccess(ExecSuccess),
    CanExecFailed(CanExecFailed),
    ExecReverted(ExecReverted),
    TaskCancelled(TaskCancelled),
    FundsProvided(FundsProvided),
    FundsUnprovided(FundsUnprovided),
    ExecutorStaked(ExecutorStaked),
    ExecutorAssigned(ExecutorAssigned),
}

impl EngineEvent {
    /// Discriminator-prefixed borsh encoding, as consumed by indexers.
    pub fn data(&self) -> Vec<u8> {
        match self {
            Self::TaskSubmitted(event) => event.data(),
            Self::ExecSuccess(event) => event.data(),
            Self::CanExecFailed(event) => event.data(),
            Self::ExecReverted(event) => event.data(),
            Self::TaskCancelled(event) => event.data(),
            Self::FundsProvided(event) => event.data(),
            Self::FundsUnprovided(event) => event.data(),
            Self::ExecutorStaked(event) => event.data(),
            Self::ExecutorAssigned(event) => event.data(),
        }
    }

    pub fn task_receipt_id(&self) -> Option<u64> {
        match self {
            Self::TaskSubmitted(event) => Some(event.task_receipt_id),
            Self::ExecSuccess(event) => Some(event.task_receipt_id),
            Self::CanExecFailed(event) => Some(event.task_receipt_id),
            Self::ExecReverted(event) => Some(event.task_receipt_id),
            Self::TaskCancelled(event) => Some(event.task_receipt_id),
            _ => None,
        }
    }
}
