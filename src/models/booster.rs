use serde::{Deserialize, Serialize};

/// Read-only reference row. `price` is in whole display units and is the
/// only authority on what a booster costs; client input never overrides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booster {
    pub id: String,
    pub price: u64,
}
