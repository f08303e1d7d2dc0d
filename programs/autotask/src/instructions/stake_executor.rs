use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::events::{EngineEvent, ExecutorStaked};

impl TaskEngine {
    pub fn stake_executor(&mut self, ctx: &TxContext, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::ZeroAmount);

        self.transact(|engine| {
            let executor = ctx.sender;
            let new_stake = engine.state.ledger.credit_executor(&executor, amount)?;

            engine.emit_event(EngineEvent::ExecutorStaked(ExecutorStaked {
                executor,
                amount,
                new_stake,
            }));

            Ok(new_stake)
        })
    }
}
