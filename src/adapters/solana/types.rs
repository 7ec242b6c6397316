//! Solana JSON-RPC response types
//!
//! Only the fields the analyzers read are modelled; everything else in the
//! `jsonParsed` payloads is ignored.

use serde::Deserialize;

/// JSON-RPC 2.0 envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RpcEnvelope<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

/// Results wrapped in `{ context, value }`
#[derive(Debug, Clone, Deserialize)]
pub struct WithContext<T> {
    pub value: T,
}

/// `getAccountInfo` value
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfoValue {
    pub data: AccountData,
    pub lamports: u64,
    pub owner: String,
}

/// Account data, parsed when the RPC knows the owning program
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccountData {
    Parsed(ParsedAccountData),
    Raw(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccountData {
    pub parsed: ParsedInfo,
    /// "spl-token" or "spl-token-2022"
    pub program: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedInfo {
    pub info: serde_json::Value,
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Parsed SPL mint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintInfo {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub supply: String,
    pub decimals: u8,
    pub is_initialized: bool,
}

/// `getTokenLargestAccounts` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountBalance {
    pub address: String,
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub ui_amount: Option<f64>,
}

/// `getSignaturesForAddress` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    pub slot: u64,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub block_time: Option<i64>,
}

/// `getTransaction` with `jsonParsed` encoding
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedTransaction {
    pub slot: u64,
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub pre_token_balances: Option<Vec<TokenBalance>>,
    #[serde(default)]
    pub post_token_balances: Option<Vec<TokenBalance>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub account_index: u32,
    pub mint: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub ui_token_amount: UiTokenAmount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    pub amount: String,
    pub decimals: u8,
}

impl UiTokenAmount {
    pub fn as_f64(&self) -> f64 {
        let raw = self.amount.parse::<f64>().unwrap_or(0.0);
        raw / 10f64.powi(i32::from(self.decimals))
    }
}
