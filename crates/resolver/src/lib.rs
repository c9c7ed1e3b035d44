pub mod features;
pub mod products;
pub mod receipt;
pub mod resolver;
pub mod traits;

pub use features::*;
pub use receipt::*;
pub use resolver::*;
pub use traits::*;
