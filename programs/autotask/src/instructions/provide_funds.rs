use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::events::{EngineEvent, FundsProvided, FundsUnprovided};

impl TaskEngine {
    /// Deposits `amount` into the balance `provider` pays executions from.
    pub fn provide_funds(&mut self, provider: &Pubkey, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::ZeroAmount);

        self.transact(|engine| {
            let new_provider_funds = engine.state.ledger.credit_provider(provider, amount)?;

            engine.emit_event(EngineEvent::FundsProvided(FundsProvided {
                provider: *provider,
                amount,
                new_provider_funds,
            }));

            Ok(new_provider_funds)
        })
    }

    /// Withdraws up to `amount` of the sender's provider funds and returns what
    /// was actually withdrawn.
    pub fn unprovide_funds(&mut self, ctx: &TxContext, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::ZeroAmount);

        self.transact(|engine| {
            let provider = ctx.sender;
            let withdrawn = amount.min(engine.state.ledger.provider_funds(&provider));
            let new_provider_funds = engine.state.ledger.debit_provider(&provider, withdrawn)?;

            msg!(
                "Provider {} withdrew {}, {} left",
                provider,
                withdrawn,
                new_provider_funds
            );
            engine.emit_event(EngineEvent::FundsUnprovided(FundsUnprovided {
                provider,
                amount: withdrawn,
                new_provider_funds,
            }));

            Ok(withdrawn)
        })
    }
}
