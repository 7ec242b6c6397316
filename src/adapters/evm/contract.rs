//! ERC-20 contract plumbing shared by the EVM adapters

use std::sync::Arc;

use ethers::abi::{Abi, Detokenize, Tokenize};
use ethers::contract::Contract;
use ethers::providers::{Http, Provider};
use ethers::types::{Address, U256};

use crate::ports::CollaboratorError;

pub const ERC20_ABI: &str = r#"[
    {"constant":true,"inputs":[{"name":"_owner","type":"address"}],"name":"balanceOf","outputs":[{"name":"balance","type":"uint256"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"decimals","outputs":[{"name":"","type":"uint8"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"symbol","outputs":[{"name":"","type":"string"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"name","outputs":[{"name":"","type":"string"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"totalSupply","outputs":[{"name":"","type":"uint256"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"owner","outputs":[{"name":"","type":"address"}],"type":"function"}
]"#;

/// Conventional burn address owners are renounced to
pub const DEAD_ADDRESS: &str = "0x000000000000000000000000000000000000dead";

pub type Erc20 = Contract<Provider<Http>>;

pub fn provider(rpc_endpoint: &str) -> Result<Provider<Http>, CollaboratorError> {
    Provider::<Http>::try_from(rpc_endpoint)
        .map_err(|e| CollaboratorError::Rpc(format!("Invalid RPC endpoint {}: {}", rpc_endpoint, e)))
}

pub fn parse_address(address: &str) -> Result<Address, CollaboratorError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|_| CollaboratorError::InvalidAddress(address.to_string()))
}

/// Full lower-case 0x form. `Display` on `Address` abbreviates, so this
/// goes through `Debug`.
pub fn hex_address(address: &Address) -> String {
    format!("{:?}", address)
}

pub fn is_renounced(owner: &Address) -> bool {
    owner.is_zero() || hex_address(owner) == DEAD_ADDRESS
}

pub fn erc20(address: Address, provider: Provider<Http>) -> Result<Erc20, CollaboratorError> {
    let abi: Abi =
        serde_json::from_str(ERC20_ABI).map_err(|e| CollaboratorError::Parse(e.to_string()))?;
    Ok(Contract::new(address, abi, Arc::new(provider)))
}

/// Call a view function and decode its single return value
pub async fn call_view<A, D>(contract: &Erc20, method: &str, args: A) -> Result<D, CollaboratorError>
where
    A: Tokenize,
    D: Detokenize,
{
    contract
        .method::<A, D>(method, args)
        .map_err(|e| CollaboratorError::Rpc(format!("{}: {}", method, e)))?
        .call()
        .await
        .map_err(|e| CollaboratorError::Rpc(format!("{}(): {}", method, e)))
}

/// Base units to a display amount. Precision loss past f64 is accepted;
/// the amounts only feed graphs and percentages.
pub fn to_units(value: U256, decimals: u8) -> f64 {
    ethers::utils::format_units(value, u32::from(decimals))
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// `part / whole * 100` with four decimals of precision, capped at 100
pub fn share_pct(part: U256, whole: U256) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    let scale = U256::from(1_000_000u64);
    let ratio = part.saturating_mul(scale) / whole;
    ratio.min(scale).as_u64() as f64 / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_abi_parses() {
        let abi: Abi = serde_json::from_str(ERC20_ABI).unwrap();
        for name in ["balanceOf", "decimals", "symbol", "name", "totalSupply", "owner"] {
            assert!(abi.function(name).is_ok(), "missing {}", name);
        }
    }

    #[test]
    fn test_hex_address_is_full_lowercase() {
        let addr = parse_address("0x000000000000000000000000000000000000dEaD").unwrap();
        assert_eq!(hex_address(&addr), DEAD_ADDRESS);
    }

    #[test]
    fn test_renounced_owners() {
        assert!(is_renounced(&Address::zero()));
        assert!(is_renounced(&parse_address(DEAD_ADDRESS).unwrap()));
        assert!(!is_renounced(
            &parse_address("0x1111111111111111111111111111111111111111").unwrap()
        ));
    }

    #[test]
    fn test_invalid_address() {
        assert_eq!(
            parse_address("0xnothex"),
            Err(CollaboratorError::InvalidAddress("0xnothex".to_string()))
        );
    }

    #[test]
    fn test_to_units() {
        let value = U256::from(1_500_000_000_000_000_000u64);
        assert_relative_eq!(to_units(value, 18), 1.5);
        assert_relative_eq!(to_units(U256::from(42u64), 0), 42.0);
    }

    #[test]
    fn test_share_pct() {
        assert_relative_eq!(share_pct(U256::from(25u64), U256::from(100u64)), 25.0);
        assert_relative_eq!(share_pct(U256::from(1u64), U256::from(3u64)), 33.3333);
        assert_relative_eq!(share_pct(U256::from(500u64), U256::from(100u64)), 100.0);
        assert_relative_eq!(share_pct(U256::from(5u64), U256::zero()), 0.0);
    }
}
