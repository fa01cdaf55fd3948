pub mod bot;
pub mod config;
pub mod confirmation;
pub mod decision;
pub mod error;
pub mod executor;
pub mod price_feed;
pub mod reconciler;
pub mod risk;
pub mod types;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;
