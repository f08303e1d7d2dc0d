#![allow(dead_code)]
pub mod fixture;
pub mod helpers;
pub mod instructions;
pub mod test_data;

pub use fixture::*;
pub use helpers::*;
pub use instructions::*;
