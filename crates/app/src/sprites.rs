//! How each enemy and item kind looks on screen.

use delve_core::{EnemyKind, ItemKind};
use macroquad::color::{Color, GOLD, LIME, MAROON, ORANGE, RED, SKYBLUE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Diamond,
    Triangle,
}

pub trait Sprite {
    fn shape(&self) -> Shape;
    fn color(&self) -> Color;

    /// Fraction of the entity rect the shape fills.
    fn fill(&self) -> f32 {
        0.8
    }
}

const GHOST_WHITE: Color = Color::new(0.85, 0.9, 1.0, 0.6);

impl Sprite for EnemyKind {
    fn shape(&self) -> Shape {
        match self {
            EnemyKind::Slime | EnemyKind::Ghost => Shape::Circle,
            EnemyKind::Spider => Shape::Triangle,
        }
    }

    fn color(&self) -> Color {
        match self {
            EnemyKind::Slime => LIME,
            EnemyKind::Ghost => GHOST_WHITE,
            EnemyKind::Spider => MAROON,
        }
    }

    fn fill(&self) -> f32 {
        match self {
            EnemyKind::Slime => 0.7,
            EnemyKind::Ghost | EnemyKind::Spider => 0.9,
        }
    }
}

impl Sprite for ItemKind {
    fn shape(&self) -> Shape {
        match self {
            ItemKind::Health => Shape::Square,
            ItemKind::Speed => Shape::Diamond,
            ItemKind::Damage => Shape::Triangle,
        }
    }

    fn color(&self) -> Color {
        match self {
            ItemKind::Health => RED,
            ItemKind::Speed => SKYBLUE,
            ItemKind::Damage => ORANGE,
        }
    }

    fn fill(&self) -> f32 {
        0.5
    }
}

/// The player is drawn as a gold square.
pub struct PlayerSprite;

impl Sprite for PlayerSprite {
    fn shape(&self) -> Shape {
        Shape::Square
    }

    fn color(&self) -> Color {
        GOLD
    }
}
