//! Sparks: short bright streaks that shrink as they slow down

use glam::Vec2;

use crate::renderer::DrawList;
use crate::renderer::shapes::{colors, direction, spark_diamond};

/// Speed lost per frame
const SPARK_DECAY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    /// Heading in radians
    pub angle: f32,
    /// Doubles as the size scalar; the spark dies at zero
    pub speed: f32,
}

impl Spark {
    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self { pos, angle, speed }
    }

    /// Returns true when the spark has burnt out
    pub fn update(&mut self) -> bool {
        self.pos += direction(self.angle) * self.speed;
        self.speed = (self.speed - SPARK_DECAY).max(0.0);
        self.speed <= 0.0
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        out.polygon(spark_diamond(self.pos - offset, self.angle, self.speed), colors::SPARK);
    }
}
