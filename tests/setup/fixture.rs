use anchor_lang::prelude::Pubkey;
use autotask::{
    Action, Condition, DataFlow, EngineConfig, FixedGasPriceOracle, Operation, Provider, Task,
    TaskEngine, TaskSpec, TxContext,
};

use crate::setup::modules::*;
use crate::setup::test_data::*;
use crate::setup::Instructions;

pub struct TestFixture {
    pub engine: TaskEngine,
    pub now: i64,
    pub provider: Provider,
}

impl TestFixture {
    pub fn new() -> Self {
        let engine = TaskEngine::initialize(
            EngineConfig::default(),
            Box::new(FixedGasPriceOracle(GAS_PRICE)),
        )
        .expect("Failed to initialize engine");

        let mut fixt = Self {
            engine,
            now: NOW,
            provider: Provider {
                addr: PROVIDER,
                module: PROVIDER_MODULE,
            },
        };
        fixt.deploy_modules();
        fixt
    }

    fn deploy_modules(&mut self) {
        let engine = &mut self.engine;
        for condition in [CONDITION, OTHER_CONDITION] {
            engine.deploy_condition(
                condition,
                Box::new(MockCondition {
                    counter: COUNTER_CONTRACT,
                    key: COUNTER_KEY.to_vec(),
                }),
            );
        }

        engine.deploy_action(ACTION, Box::new(MockActionTerms(TermsScript::Ok)));
        engine.deploy_action(
            ACTION_TERMS_NOT_OK,
            Box::new(MockActionTerms(TermsScript::NotOk(
                ACTION_TERMS_REASON.to_string(),
            ))),
        );
        engine.deploy_action(
            ACTION_TERMS_REVERT,
            Box::new(MockActionTerms(TermsScript::Revert(
                ACTION_REVERT_REASON.to_string(),
            ))),
        );
        engine.deploy_action(
            ACTION_TERMS_REVERT_UNLABELED,
            Box::new(MockActionTerms(TermsScript::RevertUnlabeled)),
        );
        engine.deploy_action(
            ACTION_TERMS_OUT_OF_GAS,
            Box::new(MockActionTerms(TermsScript::BurnGas)),
        );

        engine.deploy_provider_module(PROVIDER_MODULE, Box::new(MockProviderModule::new()));
        engine.deploy_provider_module(
            CHECKED_PROVIDER_MODULE,
            Box::new(MockProviderModule::checked()),
        );
        engine.deploy_provider_module(
            REJECTING_PROVIDER_MODULE,
            Box::new(MockProviderModule::rejecting(REJECTION_REASON)),
        );
        engine.deploy_provider_module(
            GAS_HUNGRY_PROVIDER_MODULE,
            Box::new(MockProviderModule::gas_hungry()),
        );

        for proxy in [USER_PROXY, SELF_PROVIDER] {
            engine.deploy_user_proxy(
                proxy,
                Box::new(MockUserProxy {
                    counter: COUNTER_CONTRACT,
                    key: COUNTER_KEY.to_vec(),
                }),
            );
        }
    }

    /// Staked executor assigned to a funded provider that whitelisted its
    /// modules and the default task.
    pub fn with_default_setup(mut self) -> Self {
        self.setup_provider(PROVIDER);
        let result = self.provide_task_spec_for(&default_task());
        assert!(result.is_ok(), "Failed to provide default task spec");
        self
    }

    /// Lets [`SELF_PROVIDER`] pay for and submit its own tasks.
    pub fn with_self_provider(mut self) -> Self {
        self.setup_provider(SELF_PROVIDER);
        self
    }

    fn setup_provider(&mut self, provider: Pubkey) {
        if self.engine.executor_stake(&EXECUTOR) < MIN_EXECUTOR_STAKE {
            let result = self.stake_executor(MIN_EXECUTOR_STAKE);
            assert!(result.is_ok(), "Failed to stake executor");
        }

        let result = self.provide_funds(&provider, DEFAULT_PROVIDER_FUNDS);
        assert!(result.is_ok(), "Failed to provide funds");

        let result = self.assign_executor(&provider, &EXECUTOR);
        assert!(result.is_ok(), "Failed to assign executor");

        let result = self.add_provider_modules(
            &provider,
            &[
                PROVIDER_MODULE,
                CHECKED_PROVIDER_MODULE,
                REJECTING_PROVIDER_MODULE,
                GAS_HUNGRY_PROVIDER_MODULE,
            ],
        );
        assert!(result.is_ok(), "Failed to add provider modules");
    }

    pub fn ctx(&self, sender: Pubkey) -> TxContext {
        TxContext::new(sender, self.now).with_gas(MAX_GAS, GAS_PRICE)
    }

    pub fn counter(&self) -> u64 {
        self.engine.storage().get_u64(&COUNTER_CONTRACT, COUNTER_KEY)
    }

    pub fn self_provider(&self) -> Provider {
        Provider {
            addr: SELF_PROVIDER,
            module: PROVIDER_MODULE,
        }
    }
}

pub fn task_with(conditions: Vec<Condition>, actions: Vec<Action>) -> Task {
    Task {
        conditions,
        actions,
        self_provider_gas_limit: 0,
        self_provider_gas_price_ceil: 0,
    }
}

pub fn condition(script: ConditionScript) -> Condition {
    Condition {
        inst: CONDITION,
        data: script.data(),
    }
}

pub fn action(addr: Pubkey, command: ProxyCommand) -> Action {
    Action {
        addr,
        data: command.data(),
        operation: Operation::Call,
        data_flow: DataFlow::None,
        value: 0,
        terms_ok_check: true,
    }
}

/// One passing condition and one counter increment.
pub fn default_task() -> Task {
    task_with(
        vec![condition(ConditionScript::Ok)],
        vec![action(ACTION, ProxyCommand::Increment)],
    )
}

/// Default task shape whose proxy call runs `command`.
pub fn task_running(command: ProxyCommand) -> Task {
    task_with(
        vec![condition(ConditionScript::Ok)],
        vec![action(ACTION, command)],
    )
}

pub fn task_spec_for(task: &Task) -> TaskSpec {
    TaskSpec::from_task(task, 0)
}
