use crate::{
    error::MarketError,
    models::{PurchaseRecord, PurchaseRequest, VerificationOutcome},
    services::{EthereumService, SupabaseStore},
    verify::{extract_tx_hash, to_base_units, TransferVerifier},
};
use ethers::types::Address;
use std::sync::Arc;

/// Sequences a purchase attempt: hash extraction, price lookup, receipt
/// fetch, transfer scan, insert. Every step short-circuits except the
/// verdict itself: an unverified purchase is still written, so failed
/// payment attempts leave an audit trail.
pub struct PurchaseService {
    store: Arc<SupabaseStore>,
    ethereum: Arc<EthereumService>,
    verifier: TransferVerifier,
    decimals: u32,
}

impl PurchaseService {
    pub fn new(
        store: Arc<SupabaseStore>,
        ethereum: Arc<EthereumService>,
        token_contract: Address,
        community_address: Address,
        decimals: u32,
    ) -> Self {
        Self {
            store,
            ethereum,
            verifier: TransferVerifier::new(token_contract, community_address),
            decimals,
        }
    }

    pub async fn process(&self, request: PurchaseRequest) -> Result<PurchaseRecord, MarketError> {
        if request.booster.is_empty() || request.target.is_empty() || request.tx_link.is_empty() {
            return Err(MarketError::InvalidInput(
                "booster, target and txLink are required".to_string(),
            ));
        }

        // Purely syntactic, so it runs before anything touches the network:
        // a link with no hash in it costs no upstream round trip.
        let tx_hash = extract_tx_hash(&request.tx_link)?;

        let booster = self.store.booster(&request.booster).await?;
        let receipt = self.ethereum.get_receipt(tx_hash).await?;

        let expected = to_base_units(booster.price, self.decimals);
        let verified = self.verifier.verify(&receipt, expected);

        let record = PurchaseRecord {
            booster_id: booster.id,
            target_wallet: request.target.to_lowercase(),
            tx_link: request.tx_link,
            price: booster.price,
            outcome: if verified {
                VerificationOutcome::auto_verified()
            } else {
                VerificationOutcome::unverified()
            },
        };

        let created = self.store.insert_purchase(&record).await?;

        if !verified {
            tracing::warn!(
                tx_hash = ?tx_hash,
                booster = %created.booster_id,
                "No matching transfer in receipt"
            );
            return Err(MarketError::VerificationFailed {
                record: Box::new(created),
            });
        }

        tracing::info!(
            tx_hash = ?tx_hash,
            booster = %created.booster_id,
            price = created.price,
            "Purchase verified"
        );
        Ok(created)
    }
}
