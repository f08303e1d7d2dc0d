use anchor_lang::prelude::*;

declare_id!("AutoTask11111111111111111111111111111111111");

pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod interfaces;
pub mod state;
pub mod utils;

pub use engine::*;
pub use instructions::*;
pub use interfaces::*;
pub use state::*;
