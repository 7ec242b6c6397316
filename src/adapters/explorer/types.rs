//! Etherscan-family response types

use serde::Deserialize;

/// Every Etherscan-style endpoint wraps its payload the same way. On
/// failure `result` is a plain string ("Invalid API Key", ...), so it is
/// kept as raw JSON and decoded by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl ExplorerResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    pub fn error_text(&self) -> String {
        match self.result.as_str() {
            Some(detail) if !detail.is_empty() => format!("{}: {}", self.message, detail),
            _ => self.message.clone(),
        }
    }
}

/// `module=contract&action=getsourcecode`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceCodeEntry {
    #[serde(default)]
    pub source_code: String,
    #[serde(default)]
    pub contract_name: String,
    #[serde(default)]
    pub proxy: Option<String>,
}

impl SourceCodeEntry {
    pub fn is_verified(&self) -> bool {
        !self.source_code.trim().is_empty()
    }
}

/// `module=contract&action=getcontractcreation`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCreation {
    pub contract_address: String,
    pub contract_creator: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verified_source() {
        let json = r#"{
            "status": "1",
            "message": "OK",
            "result": [{"SourceCode": "pragma solidity ^0.8.0;", "ContractName": "Token", "Proxy": "0"}]
        }"#;
        let resp: ExplorerResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_ok());
        let entries: Vec<SourceCodeEntry> = serde_json::from_value(resp.result).unwrap();
        assert!(entries[0].is_verified());
        assert_eq!(entries[0].contract_name, "Token");
    }

    #[test]
    fn test_parse_unverified_source() {
        let json = r#"{"status":"1","message":"OK","result":[{"SourceCode":"","ContractName":""}]}"#;
        let resp: ExplorerResponse = serde_json::from_str(json).unwrap();
        let entries: Vec<SourceCodeEntry> = serde_json::from_value(resp.result).unwrap();
        assert!(!entries[0].is_verified());
    }

    #[test]
    fn test_error_response_keeps_detail() {
        let json = r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#;
        let resp: ExplorerResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.is_ok());
        assert_eq!(resp.error_text(), "NOTOK: Invalid API Key");
    }

    #[test]
    fn test_parse_contract_creation() {
        let json = r#"[{"contractAddress":"0xabc","contractCreator":"0xdef","txHash":"0x123"}]"#;
        let creations: Vec<ContractCreation> = serde_json::from_str(json).unwrap();
        assert_eq!(creations[0].contract_creator, "0xdef");
    }
}
