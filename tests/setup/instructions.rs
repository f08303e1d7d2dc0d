use anchor_lang::prelude::{Pubkey, Result};
use autotask::{CanExecFailure, ExecutionResult, Task, TaskReceipt, TxContext};

use crate::setup::fixture::task_spec_for;
use crate::setup::test_data::*;
use crate::setup::TestFixture;

pub trait Instructions {
    fn stake_executor(&mut self, amount: u64) -> Result<u64>;

    fn provide_funds(&mut self, provider: &Pubkey, amount: u64) -> Result<u64>;

    fn unprovide_funds(&mut self, provider: &Pubkey, amount: u64) -> Result<u64>;

    fn assign_executor(&mut self, provider: &Pubkey, executor: &Pubkey) -> Result<()>;

    fn add_provider_modules(&mut self, provider: &Pubkey, modules: &[Pubkey]) -> Result<()>;

    fn provide_task_spec_for(&mut self, task: &Task) -> Result<()>;

    fn submit_task(&mut self, task: Task) -> Result<TaskReceipt>;

    fn submit_task_with_expiry(&mut self, task: Task, expiry_date: i64) -> Result<TaskReceipt>;

    fn submit_task_cycle(&mut self, tasks: Vec<Task>, cycles: u64) -> Result<TaskReceipt>;

    fn submit_task_chain(&mut self, tasks: Vec<Task>, total_submits: u64) -> Result<TaskReceipt>;

    fn submit_self_provided_task(&mut self, task: Task) -> Result<TaskReceipt>;

    fn can_exec(
        &self,
        sender: &Pubkey,
        receipt: &TaskReceipt,
    ) -> std::result::Result<(), CanExecFailure>;

    fn exec(&mut self, receipt: &TaskReceipt) -> Result<ExecutionResult>;

    fn exec_with_gas(
        &mut self,
        receipt: &TaskReceipt,
        gas_limit: u64,
        gas_price: u64,
    ) -> Result<ExecutionResult>;

    fn cancel_task(&mut self, sender: &Pubkey, receipt: &TaskReceipt) -> Result<()>;

    fn multi_cancel_tasks(&mut self, sender: &Pubkey, receipts: &[TaskReceipt]) -> Result<()>;
}

impl Instructions for TestFixture {
    fn stake_executor(&mut self, amount: u64) -> Result<u64> {
        let ctx = self.ctx(EXECUTOR);
        self.engine.stake_executor(&ctx, amount)
    }

    fn provide_funds(&mut self, provider: &Pubkey, amount: u64) -> Result<u64> {
        self.engine.provide_funds(provider, amount)
    }

    fn unprovide_funds(&mut self, provider: &Pubkey, amount: u64) -> Result<u64> {
        let ctx = self.ctx(*provider);
        self.engine.unprovide_funds(&ctx, amount)
    }

    fn assign_executor(&mut self, provider: &Pubkey, executor: &Pubkey) -> Result<()> {
        let ctx = self.ctx(*provider);
        self.engine.assign_executor(&ctx, executor)
    }

    fn add_provider_modules(&mut self, provider: &Pubkey, modules: &[Pubkey]) -> Result<()> {
        let ctx = self.ctx(*provider);
        self.engine.add_provider_modules(&ctx, modules)
    }

    fn provide_task_spec_for(&mut self, task: &Task) -> Result<()> {
        let ctx = self.ctx(self.provider.addr);
        self.engine.provide_task_specs(&ctx, &[task_spec_for(task)])
    }

    fn submit_task(&mut self, task: Task) -> Result<TaskReceipt> {
        self.submit_task_with_expiry(task, 0)
    }

    fn submit_task_with_expiry(&mut self, task: Task, expiry_date: i64) -> Result<TaskReceipt> {
        let ctx = self.ctx(USER_PROXY);
        self.engine.submit_task(&ctx, self.provider, task, expiry_date)
    }

    fn submit_task_cycle(&mut self, tasks: Vec<Task>, cycles: u64) -> Result<TaskReceipt> {
        let ctx = self.ctx(USER_PROXY);
        self.engine
            .submit_task_cycle(&ctx, self.provider, tasks, 0, cycles)
    }

    fn submit_task_chain(&mut self, tasks: Vec<Task>, total_submits: u64) -> Result<TaskReceipt> {
        let ctx = self.ctx(USER_PROXY);
        self.engine
            .submit_task_chain(&ctx, self.provider, tasks, 0, total_submits)
    }

    fn submit_self_provided_task(&mut self, task: Task) -> Result<TaskReceipt> {
        let ctx = self.ctx(SELF_PROVIDER);
        let provider = self.self_provider();
        self.engine.submit_task(&ctx, provider, task, 0)
    }

    fn can_exec(
        &self,
        sender: &Pubkey,
        receipt: &TaskReceipt,
    ) -> std::result::Result<(), CanExecFailure> {
        let ctx = self.ctx(*sender);
        let gas_limit = self.engine.exec_gas_limit(receipt);
        self.engine.can_exec(&ctx, receipt, gas_limit, GAS_PRICE)
    }

    fn exec(&mut self, receipt: &TaskReceipt) -> Result<ExecutionResult> {
        let gas_limit = self.engine.exec_gas_limit(receipt);
        self.exec_with_gas(receipt, gas_limit, GAS_PRICE)
    }

    fn exec_with_gas(
        &mut self,
        receipt: &TaskReceipt,
        gas_limit: u64,
        gas_price: u64,
    ) -> Result<ExecutionResult> {
        let ctx = TxContext::new(EXECUTOR, self.now).with_gas(gas_limit, gas_price);
        self.engine.exec(&ctx, receipt)
    }

    fn cancel_task(&mut self, sender: &Pubkey, receipt: &TaskReceipt) -> Result<()> {
        let ctx = self.ctx(*sender);
        self.engine.cancel_task(&ctx, receipt)
    }

    fn multi_cancel_tasks(&mut self, sender: &Pubkey, receipts: &[TaskReceipt]) -> Result<()> {
        let ctx = self.ctx(*sender);
        self.engine.multi_cancel_tasks(&ctx, receipts)
    }
}
