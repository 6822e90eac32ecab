pub mod constants;
pub mod kind;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use kind::{TileKind, TileProperties};
pub use types::GridPos;
