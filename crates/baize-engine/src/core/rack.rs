//! Ball colors and the opening triangle.

use glam::Vec2;

use crate::renderer::color::Color;

/// Hues for balls 1..=8; 9..=15 reuse 1..=7.
const PALETTE: [Color; 8] = [
    Color::rgb(1.0, 0.84, 0.0),   // 1 yellow
    Color::rgb(0.0, 0.0, 0.7),    // 2 blue
    Color::rgb(0.86, 0.0, 0.0),   // 3 red
    Color::rgb(0.39, 0.0, 0.55),  // 4 purple
    Color::rgb(1.0, 0.39, 0.0),   // 5 orange
    Color::rgb(0.0, 0.47, 0.0),   // 6 green
    Color::rgb(0.51, 0.12, 0.12), // 7 maroon
    Color::rgb(0.04, 0.04, 0.04), // 8 black
];

/// Display color of an object ball. Out-of-range numbers get white.
pub fn ball_color(number: u8) -> Color {
    match number {
        1..=8 => PALETTE[(number - 1) as usize],
        9..=15 => PALETTE[(number - 9) as usize],
        _ => Color::WHITE,
    }
}

/// Placement of each numbered ball: (number, row, offset from the row
/// center in ball spacings). Rows grow away from the cue ball.
///
/// ```text
///  1
///  9  2
///  3  8 10
/// 11  4  5 12
///  6 13 14  7 15
/// ```
const LAYOUT: [(u8, usize, f32); 15] = [
    (1, 0, 0.0),
    (9, 1, -0.5), (2, 1, 0.5),
    (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
    (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
    (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
];

/// Triangle of 15 balls with its apex at `apex`, opening toward +x.
/// Row `k` sits `k * spacing` behind the apex. Returns `(number, position)`
/// in rack order, apex first.
pub fn rack(apex: Vec2, spacing: f32) -> [(u8, Vec2); 15] {
    LAYOUT.map(|(number, row, offset)| {
        let pos = Vec2::new(apex.x + row as f32 * spacing, apex.y + offset * spacing);
        (number, pos)
    })
}
