//! DexScreener Adapter
//!
//! Pair listings per token address. Used for metadata fallback, the
//! jeeter venue set and the current USD price.

mod client;
pub mod types;

pub use client::{DexScreenerClient, DEXSCREENER_API};
