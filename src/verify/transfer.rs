use ethers::types::{Address, Log, TransactionReceipt, H256, U256};
use std::str::FromStr;

/// keccak256("Transfer(address,address,uint256)"), topic0 of an ERC-20
/// transfer event.
pub const TRANSFER_TOPIC: &str =
    "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

/// A log that passed the contract and signature screens, with its indexed
/// recipient and non-indexed amount decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMatch {
    pub recipient: Address,
    pub amount: U256,
}

/// Decides whether a receipt pays the community address through the
/// configured token contract. Addresses are held in binary form, so every
/// comparison is case-insensitive by construction.
#[derive(Debug, Clone)]
pub struct TransferVerifier {
    token: Address,
    community: Address,
    transfer_topic: H256,
}

impl TransferVerifier {
    pub fn new(token: Address, community: Address) -> Self {
        Self {
            token,
            community,
            transfer_topic: H256::from_str(TRANSFER_TOPIC).unwrap(),
        }
    }

    /// Screens one log. `None` means "not our transfer", never an error:
    /// receipts routinely carry unrelated or oddly-shaped logs and those
    /// simply don't count.
    pub fn match_transfer(&self, log: &Log) -> Option<TransferMatch> {
        if log.address != self.token {
            return None;
        }
        if log.topics.first() != Some(&self.transfer_topic) {
            return None;
        }
        if log.topics.len() < 3 {
            return None;
        }
        if log.data.len() > 32 {
            return None;
        }
        Some(TransferMatch {
            // Indexed addresses are left-padded to 32 bytes; the address
            // itself is the low-order 20.
            recipient: Address::from(log.topics[2]),
            amount: U256::from_big_endian(&log.data),
        })
    }

    /// Scans receipt logs in order and answers true as soon as one transfer
    /// pays the community address the exact expected amount. Split transfers
    /// do not aggregate; a near-miss amount is a miss.
    pub fn verify(&self, receipt: &TransactionReceipt, expected: U256) -> bool {
        receipt
            .logs
            .iter()
            .filter_map(|log| self.match_transfer(log))
            .any(|m| m.recipient == self.community && m.amount == expected)
    }
}
