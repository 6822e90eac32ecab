use crate::tiles::GridPos;
use bevy::prelude::*;

/// Emitted on every completed move, whatever the destination held.
/// The buildings dispatcher drains these once per tick.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMoved {
    pub pos: GridPos,
}

/// Emitted when a mineable tile is removed on arrival. The render sync
/// despawns the matching sprite so store and screen never disagree.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDestroyed {
    pub pos: GridPos,
    pub kind: crate::tiles::TileKind,
}

/// Emitted after generation or a loaded game replaces the world; the
/// render layer rebuilds every tile sprite from the store.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct WorldRebuilt;
