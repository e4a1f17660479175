use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Resting background color.
    pub const BACKGROUND: Color = Color::new(0.3, 0.3, 0.3, 1.);

    /// Background color while hovered.
    pub const HOVER: Color = Color::new(0.4, 0.4, 0.4, 1.);

    /// Background color while pressed.
    pub const CLICK: Color = Color::new(1., 0.4, 0.4, 1.);

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
