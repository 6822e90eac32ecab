use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every tile type in the world. Terrain kinds are mineable; station
/// kinds are interactable and never removed from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Coal,
    Shop,
    SaveStation,
    SellingPost,
    FuelStation,
    Teleporter,
}

/// Static per-kind properties. `thickness` is mining resistance as a
/// percentage: mining speed scales by `thickness / 100`. `value` is the
/// sale price credited per unit at the selling post.
#[derive(Debug, Clone, Copy)]
pub struct TileProperties {
    pub name: &'static str,
    pub thickness: f32,
    pub value: i64,
    pub interactable: bool,
    pub color: Color,
}

const GRASS: TileProperties = TileProperties {
    name: "Grass",
    thickness: 65.0,
    value: 0,
    interactable: false,
    color: Color::srgb(0.30, 0.60, 0.25),
};

const DIRT: TileProperties = TileProperties {
    name: "Dirt",
    thickness: 50.0,
    value: 2,
    interactable: false,
    color: Color::srgb(0.45, 0.31, 0.18),
};

const COAL: TileProperties = TileProperties {
    name: "Coal",
    thickness: 35.0,
    value: 30,
    interactable: false,
    color: Color::srgb(0.16, 0.16, 0.18),
};

const SHOP: TileProperties = TileProperties {
    name: "Shop",
    thickness: 0.0,
    value: 0,
    interactable: true,
    color: Color::srgb(0.75, 0.55, 0.15),
};

const SAVE_STATION: TileProperties = TileProperties {
    name: "Save Station",
    thickness: 0.0,
    value: 0,
    interactable: true,
    color: Color::srgb(0.25, 0.55, 0.75),
};

const SELLING_POST: TileProperties = TileProperties {
    name: "Selling Post",
    thickness: 0.0,
    value: 0,
    interactable: true,
    color: Color::srgb(0.70, 0.25, 0.60),
};

const FUEL_STATION: TileProperties = TileProperties {
    name: "Fuel Station",
    thickness: 0.0,
    value: 0,
    interactable: true,
    color: Color::srgb(0.80, 0.20, 0.15),
};

const TELEPORTER: TileProperties = TileProperties {
    name: "Teleporter",
    thickness: 0.0,
    value: 0,
    interactable: true,
    color: Color::srgb(0.40, 0.25, 0.75),
};

impl TileKind {
    /// All kinds, terrain first, in a stable order
    pub const ALL: [TileKind; 8] = [
        TileKind::Grass,
        TileKind::Dirt,
        TileKind::Coal,
        TileKind::Shop,
        TileKind::SaveStation,
        TileKind::SellingPost,
        TileKind::FuelStation,
        TileKind::Teleporter,
    ];

    /// Static property lookup; total over all variants
    pub const fn properties(self) -> &'static TileProperties {
        match self {
            TileKind::Grass => &GRASS,
            TileKind::Dirt => &DIRT,
            TileKind::Coal => &COAL,
            TileKind::Shop => &SHOP,
            TileKind::SaveStation => &SAVE_STATION,
            TileKind::SellingPost => &SELLING_POST,
            TileKind::FuelStation => &FUEL_STATION,
            TileKind::Teleporter => &TELEPORTER,
        }
    }

    /// Mineable tiles can be removed and carried as cargo
    pub const fn is_mineable(self) -> bool {
        !self.properties().interactable
    }

    pub const fn is_interactable(self) -> bool {
        self.properties().interactable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_total() {
        for kind in TileKind::ALL {
            // Lookup never fails and names are filled in
            assert!(!kind.properties().name.is_empty());
        }
    }

    #[test]
    fn test_stations_never_mineable() {
        for kind in TileKind::ALL {
            assert_eq!(kind.is_mineable(), !kind.is_interactable());
        }
        assert!(TileKind::Dirt.is_mineable());
        assert!(TileKind::Coal.is_mineable());
        assert!(!TileKind::Shop.is_mineable());
        assert!(!TileKind::Teleporter.is_mineable());
    }

    #[test]
    fn test_thickness_drives_mining_speed() {
        // Dirt at thickness 50 halves mining speed
        assert_eq!(TileKind::Dirt.properties().thickness, 50.0);
        // Stations are thickness 0 but bypass thickness scaling entirely
        for kind in TileKind::ALL {
            if kind.is_interactable() {
                assert_eq!(kind.properties().thickness, 0.0);
            } else {
                assert!(kind.properties().thickness > 0.0);
            }
        }
    }
}
