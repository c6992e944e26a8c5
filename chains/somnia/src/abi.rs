//! Minimal ABIs for the contracts the workflow touches.

pub const TEST_TOKEN_ABI: &str = r#"[
    {"inputs":[{"internalType":"address","name":"to","type":"address"},{"internalType":"uint256","name":"amount","type":"uint256"}],"name":"mint","outputs":[],"stateMutability":"payable","type":"function"},
    {"inputs":[{"internalType":"address","name":"owner","type":"address"}],"name":"balanceOf","outputs":[{"internalType":"uint256","name":"","type":"uint256"}],"stateMutability":"view","type":"function"}
]"#;

pub const SWAP_ROUTER_ABI: &str = r#"[
    {
        "inputs": [
            {
                "components": [
                    {"internalType":"address","name":"tokenIn","type":"address"},
                    {"internalType":"address","name":"tokenOut","type":"address"},
                    {"internalType":"uint24","name":"fee","type":"uint24"},
                    {"internalType":"address","name":"recipient","type":"address"},
                    {"internalType":"uint256","name":"amountIn","type":"uint256"},
                    {"internalType":"uint256","name":"amountOutMinimum","type":"uint256"},
                    {"internalType":"uint160","name":"sqrtPriceLimitX96","type":"uint160"}
                ],
                "internalType": "struct ExactInputSingleParams",
                "name": "params",
                "type": "tuple"
            }
        ],
        "name": "exactInputSingle",
        "outputs": [{"internalType":"uint256","name":"amountOut","type":"uint256"}],
        "stateMutability": "payable",
        "type": "function"
    }
]"#;

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::Abi;

    #[test]
    fn abis_parse() {
        let token: Abi = serde_json::from_str(TEST_TOKEN_ABI).unwrap();
        assert!(token.function("mint").is_ok());
        assert!(token.function("balanceOf").is_ok());

        let router: Abi = serde_json::from_str(SWAP_ROUTER_ABI).unwrap();
        let swap = router.function("exactInputSingle").unwrap();
        assert_eq!(swap.inputs.len(), 1);
    }
}
