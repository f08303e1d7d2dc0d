pub mod assign_executor;
pub mod can_exec;
pub mod cancel_task;
pub mod check_submission;
pub mod exec;
pub mod process_payout;
pub mod provide_funds;
pub mod provider_modules;
pub mod stake_executor;
pub mod submit_task;
pub mod task_specs;

pub use can_exec::*;
pub use check_submission::*;
pub use exec::*;
pub use process_payout::*;
