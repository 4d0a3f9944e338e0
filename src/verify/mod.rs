pub mod hash;
pub mod transfer;

pub use hash::extract_tx_hash;
pub use transfer::{TransferMatch, TransferVerifier, TRANSFER_TOPIC};

use ethers::types::U256;

/// Converts a display-unit price into the token's smallest unit
/// (`price * 10^decimals`), entirely in 256-bit integer arithmetic.
pub fn to_base_units(price: u64, decimals: u32) -> U256 {
    U256::from(price) * U256::exp10(decimals as usize)
}
