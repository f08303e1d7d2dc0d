pub mod contract_storage;
pub mod engine_config;
pub mod ledger;
pub mod provider_registry;
pub mod receipt_store;
pub mod task;

pub use contract_storage::*;
pub use engine_config::*;
pub use ledger::*;
pub use provider_registry::*;
pub use receipt_store::*;
pub use task::*;

use crate::events::EngineEvent;

/// Everything a top-level operation may mutate. Cloned to take a snapshot and
/// restored wholesale on rollback.
#[derive(Clone, Debug, Default)]
pub struct EngineState {
    pub receipts: ReceiptStore,
    pub ledger: Ledger,
    pub providers: ProviderRegistry,
    pub storage: ContractStorage,
    pub events: Vec<EngineEvent>,
}
