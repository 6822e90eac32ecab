pub mod generator;
pub mod map;
pub mod render;
pub mod serialization;

// Re-export commonly used items
pub use generator::generate;
pub use map::{MapStats, TileMap};
pub use render::{pixel_to_world, RenderedTiles};
pub use serialization::{SaveData, SaveError};
