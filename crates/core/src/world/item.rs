//! Pickups and the effects they apply to the player.

use crate::mapgen::ItemSpec;
use crate::types::ItemKind;

use super::collision::Rect;
use super::player::Player;

pub const PICKUP_SCORE: u32 = 50;

impl ItemKind {
    pub fn effect_value(self) -> i32 {
        match self {
            ItemKind::Health => 25,
            ItemKind::Speed => 50,
            ItemKind::Damage => 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub rect: Rect,
    pub collected: bool,
}

impl Item {
    /// The pickup box spans twice the spec size, one full tile for default specs.
    pub fn from_spec(spec: &ItemSpec, tile_size: u32) -> Self {
        let (x, y) = spec.pos.to_pixel(tile_size);
        let side = (spec.size * 2) as f32;
        Self { kind: spec.kind, rect: Rect::new(x as f32, y as f32, side, side), collected: false }
    }

    /// Applies the effect once; later calls are no-ops.
    pub fn collect(&mut self, player: &mut Player) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        let value = self.kind.effect_value();
        match self.kind {
            ItemKind::Health => player.health = (player.health + value).min(player.max_health),
            ItemKind::Speed => player.speed += value as f32,
            ItemKind::Damage => player.attack_power += value,
        }
        player.inventory.push(self.kind);
        player.score += PICKUP_SCORE;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    fn item(kind: ItemKind) -> Item {
        Item::from_spec(&ItemSpec { kind, pos: Pos { y: 2, x: 3 }, size: 16 }, 32)
    }

    #[test]
    fn pickup_box_covers_one_tile() {
        let health = item(ItemKind::Health);
        assert_eq!(health.rect, Rect::new(96.0, 64.0, 32.0, 32.0));
    }

    #[test]
    fn health_is_capped_at_max() {
        let mut player = Player::new((0, 0), 32);
        player.health = 90;
        assert!(item(ItemKind::Health).collect(&mut player));
        assert_eq!(player.health, player.max_health);
        assert_eq!(player.score, PICKUP_SCORE);
    }

    #[test]
    fn speed_and_damage_stack() {
        let mut player = Player::new((0, 0), 32);
        item(ItemKind::Speed).collect(&mut player);
        item(ItemKind::Damage).collect(&mut player);
        assert_eq!(player.speed, 250.0);
        assert_eq!(player.attack_power, 30);
        assert_eq!(player.inventory, vec![ItemKind::Speed, ItemKind::Damage]);
    }

    #[test]
    fn collecting_twice_applies_once() {
        let mut player = Player::new((0, 0), 32);
        let mut damage = item(ItemKind::Damage);
        assert!(damage.collect(&mut player));
        assert!(!damage.collect(&mut player));
        assert_eq!(player.attack_power, 30);
    }
}
