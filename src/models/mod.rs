pub mod booster;
pub mod purchase;
pub mod response;

pub use booster::*;
pub use purchase::*;
pub use response::*;
