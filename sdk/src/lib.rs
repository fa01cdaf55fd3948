pub mod chain;
pub mod constants;
pub mod jupiter;
pub mod types;
pub mod utils;
pub mod wallet;

pub use chain::*;
pub use types::*;
pub use wallet::*;
