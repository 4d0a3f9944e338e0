use crate::error::MarketError;
use anyhow::Result;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{TransactionReceipt, H256},
};
use std::sync::Arc;

pub struct EthereumService {
    provider: Arc<Provider<Http>>,
}

impl EthereumService {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = Arc::new(Provider::<Http>::try_from(rpc_url)?);
        Ok(Self { provider })
    }

    /// One `eth_getTransactionReceipt` per call, no polling. An absent
    /// receipt is a rejection, not a pending state: the buyer resubmits once
    /// the transaction is actually mined.
    pub async fn get_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt, MarketError> {
        self.provider
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or(MarketError::NotMined)
    }

    /// Startup and health probe.
    pub async fn block_number(&self) -> Result<u64, MarketError> {
        Ok(self.provider.get_block_number().await?.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const HASH: &str = "0xa3f1c2d4e5b6978811223344556677889900aabbccddeeff0011223344556677";

    fn rpc_result(result: &str) -> String {
        format!(r#"{{"jsonrpc":"2.0","id":1,"result":{}}}"#, result)
    }

    #[tokio::test]
    async fn null_result_is_not_mined() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"method":"eth_getTransactionReceipt"}"#.to_string(),
            ))
            .with_header("content-type", "application/json")
            .with_body(rpc_result("null"))
            .create_async()
            .await;

        let service = EthereumService::new(&server.url()).unwrap();
        let err = service
            .get_receipt(H256::from_str(HASH).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::NotMined));
    }

    #[tokio::test]
    async fn mined_receipt_is_returned() {
        let receipt_json = format!(
            r#"{{
                "transactionHash": "{HASH}",
                "transactionIndex": "0x0",
                "blockHash": "0x{}",
                "blockNumber": "0x1",
                "from": "0x1111111111111111111111111111111111111111",
                "to": "0xcac4904e1db1589aa17a2ec742f5a6bcf4c4d037",
                "cumulativeGasUsed": "0x0",
                "gasUsed": "0x0",
                "contractAddress": null,
                "logs": [],
                "status": "0x1",
                "logsBloom": "0x{}"
            }}"#,
            "22".repeat(32),
            "00".repeat(256)
        );

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_header("content-type", "application/json")
            .with_body(rpc_result(&receipt_json))
            .create_async()
            .await;

        let service = EthereumService::new(&server.url()).unwrap();
        let receipt = service
            .get_receipt(H256::from_str(HASH).unwrap())
            .await
            .unwrap();
        assert!(receipt.logs.is_empty());
        assert_eq!(receipt.transaction_hash, H256::from_str(HASH).unwrap());
    }
}
