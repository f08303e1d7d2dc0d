use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;

impl TaskEngine {
    /// Whitelists `modules` for the sender's provisions.
    pub fn add_provider_modules(&mut self, ctx: &TxContext, modules: &[Pubkey]) -> Result<()> {
        self.transact(|engine| {
            for module in modules {
                require!(
                    engine.modules.provider_module(module).is_some(),
                    ErrorCode::ModuleNotDeployed
                );
                require!(
                    engine.state.providers.add_module(&ctx.sender, module),
                    ErrorCode::ModuleAlreadyProvided
                );
                msg!("Provider {} added module {}", ctx.sender, module);
            }
            Ok(())
        })
    }

    pub fn remove_provider_modules(&mut self, ctx: &TxContext, modules: &[Pubkey]) -> Result<()> {
        self.transact(|engine| {
            for module in modules {
                require!(
                    engine.state.providers.remove_module(&ctx.sender, module),
                    ErrorCode::ModuleNotProvided
                );
            }
            Ok(())
        })
    }
}
