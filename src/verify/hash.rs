use crate::error::MarketError;
use ethers::types::H256;
use std::str::FromStr;

/// Pulls the first `0x` + 64-hex-character substring out of free-form text,
/// typically a block-explorer URL pasted by the buyer. Purely syntactic;
/// whether the hash exists on chain is the receipt resolver's problem.
pub fn extract_tx_hash(text: &str) -> Result<H256, MarketError> {
    let bytes = text.as_bytes();
    for (start, _) in text.match_indices("0x") {
        let rest = &bytes[start + 2..];
        if rest.len() >= 64 && rest[..64].iter().all(|b| b.is_ascii_hexdigit()) {
            // All 64 bytes are ASCII hex, so the slice is valid UTF-8.
            return H256::from_str(&text[start + 2..start + 66])
                .map_err(|_| MarketError::NoHashFound);
        }
    }
    Err(MarketError::NoHashFound)
}
