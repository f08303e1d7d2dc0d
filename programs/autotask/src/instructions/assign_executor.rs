use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::events::{EngineEvent, ExecutorAssigned};

impl TaskEngine {
    /// Points the sender's provisions at `executor`, who must be min-staked.
    pub fn assign_executor(&mut self, ctx: &TxContext, executor: &Pubkey) -> Result<()> {
        require!(
            self.is_executor_min_staked(Some(executor)),
            ErrorCode::ExecutorNotMinStaked
        );

        self.transact(|engine| {
            let provider = ctx.sender;
            let old_executor = engine.state.providers.assign_executor(&provider, executor);

            msg!("Provider {} assigned executor {}", provider, executor);
            engine.emit_event(EngineEvent::ExecutorAssigned(ExecutorAssigned {
                provider,
                old_executor,
                new_executor: *executor,
            }));

            Ok(())
        })
    }
}
