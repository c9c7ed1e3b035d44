pub mod cart;
pub mod context;
pub mod site;
pub mod transaction;

pub use cart::*;
pub use context::*;
pub use site::*;
pub use transaction::*;
