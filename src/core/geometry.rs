//! Punkt- und Rechteck-Typen im JSON-Format des Dokuments (`{x, y}` statt `[x, y]`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Punkt in Canvas-Koordinaten
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X-Koordinate
    pub x: f32,
    /// Y-Koordinate
    pub y: f32,
}

impl Point {
    /// Erstellt einen neuen Punkt
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Verschiebt den Punkt um einen Offset
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Achsenparalleles Rechteck (Position der linken oberen Ecke + Größe)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    /// Erstellt ein neues Rechteck
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Linke obere Ecke
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Setzt die linke obere Ecke, die Größe bleibt erhalten
    pub fn with_position(self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Rechte untere Ecke
    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}
