pub mod category;
pub mod common;
pub mod criteria;
pub mod favorites;
pub mod product;

pub use category::*;
pub use common::*;
pub use criteria::*;
pub use favorites::*;
pub use product::*;
