pub mod category_tree;
pub mod color_match;
pub mod favorites_sync;
pub mod filter;
pub mod paginate;
pub mod state;

pub use category_tree::*;
pub use color_match::*;
pub use favorites_sync::*;
pub use filter::*;
pub use paginate::*;
pub use state::*;
