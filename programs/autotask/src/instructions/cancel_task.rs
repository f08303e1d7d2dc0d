use anchor_lang::prelude::*;

use crate::engine::{TaskEngine, TxContext};
use crate::errors::ErrorCode;
use crate::events::{EngineEvent, TaskCancelled};
use crate::state::TaskReceipt;

impl TaskEngine {
    /// Voids a live receipt. Only its user proxy or provider may do so.
    pub fn cancel_task(&mut self, ctx: &TxContext, receipt: &TaskReceipt) -> Result<()> {
        self.transact(|engine| engine.cancel(ctx, receipt))
    }

    /// Cancels every receipt in `receipts` or none of them.
    pub fn multi_cancel_tasks(&mut self, ctx: &TxContext, receipts: &[TaskReceipt]) -> Result<()> {
        self.transact(|engine| {
            receipts
                .iter()
                .try_for_each(|receipt| engine.cancel(ctx, receipt))
        })
    }

    fn cancel(&mut self, ctx: &TxContext, receipt: &TaskReceipt) -> Result<()> {
        require!(
            ctx.sender == receipt.user_proxy || ctx.sender == receipt.provider.addr,
            ErrorCode::InvalidCancelSender
        );

        let hash = receipt.hash()?;
        require!(
            self.state.receipts.matches(receipt.id, &hash),
            ErrorCode::InvalidTaskReceiptHash
        );

        self.state.receipts.remove(receipt.id);

        msg!("Task receipt {} cancelled by {}", receipt.id, ctx.sender);
        self.emit_event(EngineEvent::TaskCancelled(TaskCancelled {
            task_receipt_id: receipt.id,
            cancellor: ctx.sender,
        }));

        Ok(())
    }
}
