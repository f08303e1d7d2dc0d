use anchor_lang::prelude::*;

use crate::engine::TaskEngine;
use crate::errors::ErrorCode;
use crate::state::gas_cost;
use crate::utils::GasMeter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutorPay {
    Reward,
    Refund,
}

/// Gas figures an execution is settled against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasTerms {
    pub start_gas: u64,
    pub gas_limit: u64,
    pub gas_price: u64,
}

impl GasTerms {
    /// Gas consumed so far plus the fixed transaction overhead, counting at
    /// most `gas_limit` of the gas supplied.
    pub fn estimated_gas_used(&self, overhead: u64, remaining: u64) -> Result<u64> {
        self.start_gas
            .min(self.gas_limit)
            .checked_add(overhead)
            .ok_or(ErrorCode::Overflow)?
            .checked_sub(remaining)
            .ok_or(ErrorCode::GasAccountingUnderflow.into())
    }
}

impl TaskEngine {
    /// Debits `provider` and pays `executor` (plus the sys admin pool on a
    /// reward). Returns `(executor_amount, sys_admin_amount)`.
    pub(crate) fn process_provider_payables(
        &mut self,
        executor: &Pubkey,
        provider: &Pubkey,
        pay: ExecutorPay,
        terms: &GasTerms,
        gas: &GasMeter,
    ) -> Result<(u64, u64)> {
        let estimated_gas =
            terms.estimated_gas_used(self.config.exec_tx_overhead, gas.remaining())?;

        let (executor_amount, sys_admin_amount) = match pay {
            ExecutorPay::Reward => (
                self.config
                    .executor_success_fee(estimated_gas, terms.gas_price)?,
                self.config
                    .sys_admin_success_fee(estimated_gas, terms.gas_price)?,
            ),
            ExecutorPay::Refund => (gas_cost(estimated_gas, terms.gas_price)?, 0),
        };

        let total = executor_amount
            .checked_add(sys_admin_amount)
            .ok_or(ErrorCode::Overflow)?;
        self.state.ledger.debit_provider(provider, total)?;
        self.state.ledger.credit_executor(executor, executor_amount)?;
        if sys_admin_amount > 0 {
            self.state.ledger.credit_sys_admin(sys_admin_amount)?;
        }

        Ok((executor_amount, sys_admin_amount))
    }
}
