pub mod health;
pub mod holders;
pub mod purchase;

pub use health::*;
pub use holders::*;
pub use purchase::*;
