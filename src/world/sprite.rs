use glam::{Vec2, vec2};

/// What stands at a sprite's world position. Selects the billboard
/// texture and how tall the billboard is relative to a full wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    GreenLight,
    Barrel,
    Pillar,
    Tree,
    Vase,
    Bush,
}

impl SpriteKind {
    /// Name the loader registered this kind's texture under.
    pub fn texture_name(self) -> &'static str {
        match self {
            SpriteKind::GreenLight => "GREENLIGHT",
            SpriteKind::Barrel => "BARREL",
            SpriteKind::Pillar => "PILLAR",
            SpriteKind::Tree => "TREE",
            SpriteKind::Vase => "VASE",
            SpriteKind::Bush => "BUSH",
        }
    }

    /// Billboard height as a fraction of a full wall column.
    pub fn height_scale(self) -> f32 {
        match self {
            SpriteKind::GreenLight => 0.6,
            SpriteKind::Barrel => 0.6,
            SpriteKind::Pillar => 0.9,
            SpriteKind::Tree => 1.0,
            SpriteKind::Vase => 0.7,
            SpriteKind::Bush => 0.4,
        }
    }
}

/// A static billboarded object in the world.
#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub pos: Vec2,
    pub kind: SpriteKind,
}

impl Sprite {
    pub fn new(x: f32, y: f32, kind: SpriteKind) -> Self {
        Self {
            pos: vec2(x, y),
            kind,
        }
    }
}

/// The level's sprite list. Static for a frame; the sprite caster
/// re-sorts a copy by distance every frame.
#[derive(Clone, Debug, Default)]
pub struct SpriteMap {
    pub sprites: Vec<Sprite>,
}

impl SpriteMap {
    /// Demo layout: lights in the rooms, a fisheye-test pillar row in
    /// front of a flat wall, barrels scattered near the spawn.
    pub fn demo() -> Self {
        use SpriteKind::*;
        let sprites = vec![
            Sprite::new(20.5, 11.5, GreenLight),
            Sprite::new(18.5, 4.5, GreenLight),
            Sprite::new(10.0, 4.5, GreenLight),
            Sprite::new(10.0, 12.5, GreenLight),
            Sprite::new(3.5, 6.5, GreenLight),
            Sprite::new(3.5, 20.5, GreenLight),
            Sprite::new(3.5, 14.5, GreenLight),
            Sprite::new(14.5, 20.5, GreenLight),
            // row of pillars in front of a wall: fisheye test
            Sprite::new(18.5, 10.5, Pillar),
            Sprite::new(18.5, 11.5, Pillar),
            Sprite::new(18.5, 12.5, Pillar),
            // some barrels around the map
            Sprite::new(21.5, 1.5, Barrel),
            Sprite::new(15.5, 1.5, Barrel),
            Sprite::new(16.0, 1.8, Barrel),
            Sprite::new(16.2, 1.2, Barrel),
            Sprite::new(3.5, 2.5, Barrel),
            Sprite::new(9.5, 15.5, Barrel),
            Sprite::new(10.0, 15.1, Barrel),
            Sprite::new(10.5, 15.8, Barrel),
            // greenery
            Sprite::new(24.5, 21.5, Tree),
            Sprite::new(26.5, 24.5, Vase),
            Sprite::new(25.0, 27.5, Bush),
        ];
        Self { sprites }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_table_entry() {
        use SpriteKind::*;
        for kind in [GreenLight, Barrel, Pillar, Tree, Vase, Bush] {
            assert!(!kind.texture_name().is_empty());
            let s = kind.height_scale();
            assert!(s > 0.0 && s <= 1.0);
        }
    }

    #[test]
    fn demo_map_is_nonempty() {
        assert!(!SpriteMap::demo().sprites.is_empty());
    }
}
