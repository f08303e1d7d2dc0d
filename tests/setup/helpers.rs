use anchor_lang::error::Error;
use autotask::errors::ErrorCode;
use autotask::events::EngineEvent;
use autotask::TaskReceipt;

use crate::setup::TestFixture;

pub trait Helpers {
    /// Receipt carried by the most recent submission event.
    fn last_submitted_receipt(&self) -> Option<TaskReceipt>;

    fn submitted_count(&self) -> usize;

    fn last_event(&self) -> Option<&EngineEvent>;

    fn is_live(&self, receipt: &TaskReceipt) -> bool;
}

impl Helpers for TestFixture {
    fn last_submitted_receipt(&self) -> Option<TaskReceipt> {
        self.engine.events().iter().rev().find_map(|event| match event {
            EngineEvent::TaskSubmitted(submitted) => Some(submitted.task_receipt.clone()),
            _ => None,
        })
    }

    fn submitted_count(&self) -> usize {
        self.engine
            .events()
            .iter()
            .filter(|event| matches!(event, EngineEvent::TaskSubmitted(_)))
            .count()
    }

    fn last_event(&self) -> Option<&EngineEvent> {
        self.engine.events().last()
    }

    fn is_live(&self, receipt: &TaskReceipt) -> bool {
        let hash = self.engine.hash_task_receipt(receipt).unwrap();
        self.engine.task_receipt_hash(receipt.id) == Some(hash)
    }
}

pub fn assert_error<T: std::fmt::Debug>(result: anchor_lang::Result<T>, code: ErrorCode) {
    let expected: Error = code.into();
    match result {
        Ok(value) => panic!("Expected {:?}, got Ok({:?})", code, value),
        Err(e) => assert_eq!(e, expected),
    }
}
