use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey, pubkey::Pubkey};

/// Wrapped SOL mint, used by the router for the native leg
pub const SOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

pub const SOL_DECIMALS: u8 = 9;

pub const USDC_DECIMALS: u8 = 6;

/// 1 SOL in lamports
pub const SOL_PRECISION: u64 = LAMPORTS_PER_SOL;

/// 1 USDC in its smallest unit
pub const USDC_PRECISION: u64 = 1_000_000;

pub const JUPITER_API_URL: &str = "https://quote-api.jup.ag";
