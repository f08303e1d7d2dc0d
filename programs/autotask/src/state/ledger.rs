use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::errors::ErrorCode;

/// Balances moved by settlement: provider funds, executor stake and the
/// system admin pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    provider_funds: BTreeMap<Pubkey, u64>,
    executor_stake: BTreeMap<Pubkey, u64>,
    sys_admin_funds: u64,
}

impl Ledger {
    pub fn provider_funds(&self, provider: &Pubkey) -> u64 {
        self.provider_funds.get(provider).copied().unwrap_or_default()
    }

    pub fn executor_stake(&self, executor: &Pubkey) -> u64 {
        self.executor_stake.get(executor).copied().unwrap_or_default()
    }

    pub fn sys_admin_funds(&self) -> u64 {
        self.sys_admin_funds
    }

    pub fn credit_provider(&mut self, provider: &Pubkey, amount: u64) -> Result<u64> {
        let funds = self.provider_funds.entry(*provider).or_default();
        *funds = funds.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        Ok(*funds)
    }

    pub fn debit_provider(&mut self, provider: &Pubkey, amount: u64) -> Result<u64> {
        let funds = self.provider_funds.entry(*provider).or_default();
        *funds = funds
            .checked_sub(amount)
            .ok_or(ErrorCode::ProviderFundsUnderflow)?;
        Ok(*funds)
    }

    pub fn credit_executor(&mut self, executor: &Pubkey, amount: u64) -> Result<u64> {
        let stake = self.executor_stake.entry(*executor).or_default();
        *stake = stake.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        Ok(*stake)
    }

    pub fn credit_sys_admin(&mut self, amount: u64) -> Result<u64> {
        self.sys_admin_funds = self
            .sys_admin_funds
            .checked_add(amount)
            .ok_or(ErrorCode::Overflow)?;
        Ok(self.sys_admin_funds)
    }
}
