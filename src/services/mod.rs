pub mod ethereum;
pub mod holders;
pub mod purchase;
pub mod store;

pub use ethereum::EthereumService;
pub use holders::HoldersService;
pub use purchase::PurchaseService;
pub use store::SupabaseStore;
