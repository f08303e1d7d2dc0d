use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::constants::{TASK_RECEIPT_DOMAIN, TASK_SPEC_DOMAIN};
use crate::errors::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Call,
    Delegatecall,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFlow {
    None,
    In,
    Out,
    InAndOut,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub inst: Pubkey,
    pub data: Vec<u8>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub addr: Pubkey,
    pub data: Vec<u8>,
    pub operation: Operation,
    pub data_flow: DataFlow,
    pub value: u64,
    pub terms_ok_check: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    pub self_provider_gas_limit: u64,
    pub self_provider_gas_price_ceil: u64, // 0 = no ceiling
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Provider {
    pub addr: Pubkey,
    pub module: Pubkey,
}

/// A submitted unit of work. Only its commitment hash is kept by the engine,
/// executors and users hold on to the full struct from the submission event.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskReceipt {
    pub id: u64,
    pub user_proxy: Pubkey,
    pub provider: Provider,
    pub index: u64,
    pub tasks: Vec<Task>,
    pub expiry_date: i64, // 0 = never
    pub cycle_id: u64,
    pub submissions_left: u64, // 0 = unlimited, 1 = final
}

impl TaskReceipt {
    pub fn task(&self) -> Option<&Task> {
        usize::try_from(self.index)
            .ok()
            .and_then(|index| self.tasks.get(index))
    }

    pub fn next_index(&self) -> u64 {
        let next = self.index.saturating_add(1);
        if next >= self.tasks.len() as u64 {
            0
        } else {
            next
        }
    }

    pub fn next_task(&self) -> Option<&Task> {
        self.tasks.get(self.next_index() as usize)
    }

    pub fn is_self_provided(&self) -> bool {
        self.user_proxy == self.provider.addr
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expiry_date != 0 && self.expiry_date <= now
    }

    pub fn encoded_len(&self) -> usize {
        let mut data = Vec::new();
        self.serialize(&mut data)
            .map(|_| data.len())
            .unwrap_or_default()
    }

    pub fn hash(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        hasher.update(TASK_RECEIPT_DOMAIN);
        self.serialize(&mut hasher)
            .map_err(|_| ErrorCode::SerializationFailed)?;
        Ok(hasher.finalize().into())
    }
}

/// The data-free shape of an action, as whitelisted by a provider.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub addr: Pubkey,
    pub operation: Operation,
    pub data_flow: DataFlow,
    pub value: u64,
    pub terms_ok_check: bool,
}

impl From<&Action> for ActionSpec {
    fn from(action: &Action) -> Self {
        Self {
            addr: action.addr,
            operation: action.operation,
            data_flow: action.data_flow,
            value: action.value,
            terms_ok_check: action.terms_ok_check,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskSpec {
    pub conditions: Vec<Pubkey>,
    pub actions: Vec<ActionSpec>,
    pub gas_price_ceil: u64,
}

impl TaskSpec {
    pub fn from_task(task: &Task, gas_price_ceil: u64) -> Self {
        Self {
            conditions: task.conditions.iter().map(|c| c.inst).collect(),
            actions: task.actions.iter().map(ActionSpec::from).collect(),
            gas_price_ceil,
        }
    }

    /// Hash over conditions and actions only, the ceiling is not part of the
    /// identity of a spec.
    pub fn hash(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        hasher.update(TASK_SPEC_DOMAIN);
        self.conditions
            .serialize(&mut hasher)
            .map_err(|_| ErrorCode::SerializationFailed)?;
        self.actions
            .serialize(&mut hasher)
            .map_err(|_| ErrorCode::SerializationFailed)?;
        Ok(hasher.finalize().into())
    }
}
