use anchor_lang::prelude::*;

use crate::constants::NO_CEIL;
use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::state::TaskSpec;

impl TaskEngine {
    /// Whitelists task shapes users may submit under the sender. A zero
    /// ceiling is stored as no ceiling.
    pub fn provide_task_specs(&mut self, ctx: &TxContext, specs: &[TaskSpec]) -> Result<()> {
        self.transact(|engine| {
            for spec in specs {
                let spec_hash = spec.hash()?;
                require!(
                    engine
                        .state
                        .providers
                        .task_spec_gas_price_ceil(&ctx.sender, &spec_hash)
                        == 0,
                    ErrorCode::TaskSpecAlreadyProvided
                );

                let gas_price_ceil = match spec.gas_price_ceil {
                    0 => NO_CEIL,
                    ceil => ceil,
                };
                engine
                    .state
                    .providers
                    .set_task_spec_gas_price_ceil(&ctx.sender, spec_hash, gas_price_ceil);
            }
            Ok(())
        })
    }

    pub fn unprovide_task_specs(&mut self, ctx: &TxContext, specs: &[TaskSpec]) -> Result<()> {
        self.transact(|engine| {
            for spec in specs {
                let spec_hash = spec.hash()?;
                require!(
                    engine
                        .state
                        .providers
                        .remove_task_spec(&ctx.sender, &spec_hash)
                        .is_some(),
                    ErrorCode::TaskSpecNotProvided
                );
            }
            Ok(())
        })
    }
}
