//! 2D-Kamera für Pan, Zoom und Zentrieren auf den Diagramminhalt.

use super::Rectangle;
use glam::Vec2;

/// 2D-Kamera mit Pan und Zoom
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Canvas-Position, die in der Viewport-Mitte liegt
    pub position: Vec2,
    /// Zoom-Level (1.0 = ein Canvas-Pixel pro Screen-Pixel)
    pub zoom: f32,
}

impl Camera2D {
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 10.0;

    /// Erstellt eine neue Kamera
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Zentriert die Kamera auf einen Punkt
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Verschiebt die Kamera (Pan) um ein Delta in Screen-Pixeln
    pub fn pan(&mut self, delta_screen: Vec2) {
        self.position -= delta_screen / self.zoom;
    }

    /// Ändert den Zoom-Level innerhalb der Grenzen
    pub fn zoom_by(&mut self, factor: f32, min: f32, max: f32) {
        self.zoom = (self.zoom * factor).clamp(min, max);
    }

    /// Zoomt so, dass der Canvas-Punkt `focus` an derselben Screen-Position bleibt
    pub fn zoom_towards(&mut self, factor: f32, focus: Vec2, min: f32, max: f32) {
        let before = self.zoom;
        self.zoom_by(factor, min, max);
        let ratio = before / self.zoom;
        self.position = focus + (self.position - focus) * ratio;
    }

    /// Konvertiert Screen-Koordinaten (Ursprung links oben) zu Canvas-Koordinaten.
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> Vec2 {
        (screen_pos - screen_size * 0.5) / self.zoom + self.position
    }

    /// Konvertiert Canvas-Koordinaten zu Screen-Koordinaten.
    pub fn world_to_screen(&self, world_pos: Vec2, screen_size: Vec2) -> Vec2 {
        (world_pos - self.position) * self.zoom + screen_size * 0.5
    }

    /// Passt Position und Zoom so an, dass `content` mit Rand in den Viewport passt.
    pub fn center_on(
        &mut self,
        content: Rectangle,
        screen_size: Vec2,
        padding: f32,
        min: f32,
        max: f32,
    ) {
        let min_corner = Vec2::new(content.x, content.y);
        let size = Vec2::new(content.width, content.height);
        self.position = min_corner + size * 0.5;

        let available = (screen_size - Vec2::splat(2.0 * padding)).max(Vec2::ONE);
        if size.x > 0.0 && size.y > 0.0 {
            let fit = (available / size).min_element();
            self.zoom = fit.clamp(min, max);
        } else {
            self.zoom = 1.0_f32.clamp(min, max);
        }
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}
