use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Gas every delegated execution must be offered to qualify for a refund.
    pub max_gas: u64,
    /// Gas withheld from the guarded inner step for settlement and events.
    pub internal_gas_requirement: u64,
    /// Estimated gas spent outside the metered region of an execution.
    pub exec_tx_overhead: u64,
    pub min_executor_stake: u64,
    /// Percent of gas cost paid to the executor on top of the cost itself.
    pub executor_success_share: u64,
    /// Percent of gas cost paid to the system admin pool.
    pub sys_admin_success_share: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_gas: DEFAULT_MAX_GAS,
            internal_gas_requirement: DEFAULT_INTERNAL_GAS_REQUIREMENT,
            exec_tx_overhead: DEFAULT_EXEC_TX_OVERHEAD,
            min_executor_stake: DEFAULT_MIN_EXECUTOR_STAKE,
            executor_success_share: DEFAULT_EXECUTOR_SUCCESS_SHARE,
            sys_admin_success_share: DEFAULT_SYS_ADMIN_SUCCESS_SHARE,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.internal_gas_requirement < self.max_gas,
            ErrorCode::InvalidConfig
        );
        require!(self.executor_success_share <= 100, ErrorCode::InvalidConfig);
        require!(self.sys_admin_success_share <= 100, ErrorCode::InvalidConfig);
        Ok(())
    }

    pub fn total_success_share(&self) -> u64 {
        self.executor_success_share
            .saturating_add(self.sys_admin_success_share)
    }

    pub fn executor_success_fee(&self, gas: u64, gas_price: u64) -> Result<u64> {
        let cost = gas_cost(gas, gas_price)?;
        cost.checked_add(share_of(cost, self.executor_success_share)?)
            .ok_or(ErrorCode::Overflow.into())
    }

    pub fn sys_admin_success_fee(&self, gas: u64, gas_price: u64) -> Result<u64> {
        share_of(gas_cost(gas, gas_price)?, self.sys_admin_success_share)
    }

    /// Worst-case amount a provider must hold for one execution.
    pub fn min_exec_provider_funds(&self, gas_limit: u64, gas_price: u64) -> Result<u64> {
        let cost = gas_cost(gas_limit, gas_price)?;
        cost.checked_add(share_of(cost, self.total_success_share())?)
            .ok_or(ErrorCode::Overflow.into())
    }
}

pub fn gas_cost(gas: u64, gas_price: u64) -> Result<u64> {
    gas.checked_mul(gas_price).ok_or(ErrorCode::Overflow.into())
}

fn share_of(amount: u64, percent: u64) -> Result<u64> {
    let share = (amount as u128)
        .checked_mul(percent as u128)
        .ok_or(ErrorCode::Overflow)?
        / 100;
    u64::try_from(share).map_err(|_| ErrorCode::Overflow.into())
}
