use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::color::Color;
use super::traits::Surface;

/// One recorded drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearRect { origin: Vec2, width: f32, height: f32 },
    FillRect { origin: Vec2, width: f32, height: f32, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeLine { from: Vec2, to: Vec2, width: f32, color: Color },
}

/// Opcodes written into [`DrawRecord::op`].
pub mod op {
    pub const CLEAR_RECT: f32 = 0.0;
    pub const FILL_RECT: f32 = 1.0;
    pub const FILL_CIRCLE: f32 = 2.0;
    pub const STROKE_LINE: f32 = 3.0;
}

/// Flat wire form of a [`DrawCommand`] read by the JS canvas painter.
/// 10 floats = 40 bytes stride.
///
/// | op | x, y | w, h | line | r, g, b, a |
/// |---|---|---|---|---|
/// | clear / fill rect | origin | size | 0 | color |
/// | fill circle | center | radius, 0 | 0 | color |
/// | stroke line | from | to.x, to.y | width | color |
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawRecord {
    pub op: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub line: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DrawRecord {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&DrawCommand> for DrawRecord {
    fn from(cmd: &DrawCommand) -> Self {
        let paint = |op: f32, color: Color| DrawRecord {
            op,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
            ..DrawRecord::default()
        };
        match *cmd {
            DrawCommand::ClearRect { origin, width, height } => DrawRecord {
                x: origin.x,
                y: origin.y,
                w: width,
                h: height,
                ..paint(op::CLEAR_RECT, Color::new(0.0, 0.0, 0.0, 0.0))
            },
            DrawCommand::FillRect { origin, width, height, color } => DrawRecord {
                x: origin.x,
                y: origin.y,
                w: width,
                h: height,
                ..paint(op::FILL_RECT, color)
            },
            DrawCommand::FillCircle { center, radius, color } => DrawRecord {
                x: center.x,
                y: center.y,
                w: radius,
                ..paint(op::FILL_CIRCLE, color)
            },
            DrawCommand::StrokeLine { from, to, width, color } => DrawRecord {
                x: from.x,
                y: from.y,
                w: to.x,
                h: to.y,
                line: width,
                ..paint(op::STROKE_LINE, color)
            },
        }
    }
}

/// Commands recorded during one tick.
///
/// Cleared at the start of every tick and filled in paint order, so replaying
/// it front to back reproduces the frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    records: Vec<DrawRecord>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            records: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.records.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Paint the recorded frame onto `surface`. With no surface available
    /// the frame is skipped.
    pub fn replay<S: Surface>(&self, surface: Option<&mut S>) {
        let Some(surface) = surface else {
            return;
        };
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::ClearRect { origin, width, height } => {
                    surface.clear_rect(origin, width, height)
                }
                DrawCommand::FillRect { origin, width, height, color } => {
                    surface.fill_rect(origin, width, height, color)
                }
                DrawCommand::FillCircle { center, radius, color } => {
                    surface.fill_circle(center, radius, color)
                }
                DrawCommand::StrokeLine { from, to, width, color } => {
                    surface.stroke_line(from, to, width, color)
                }
            }
        }
    }

    /// Rebuild the flat record buffer from the recorded commands.
    pub fn rebuild_records(&mut self) {
        self.records.clear();
        self.records.extend(self.commands.iter().map(DrawRecord::from));
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Records viewed as a flat float slice, [`DrawRecord::FLOATS`] per command.
    pub fn record_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.records)
    }

    /// Raw pointer to the record buffer for linear-memory reads.
    pub fn records_ptr(&self) -> *const f32 {
        self.records.as_ptr() as *const f32
    }
}

impl Surface for DrawList {
    fn clear_rect(&mut self, origin: Vec2, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { origin, width, height });
    }

    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, width, height, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_record_is_10_floats() {
        assert_eq!(std::mem::size_of::<DrawRecord>(), DrawRecord::STRIDE_BYTES);
    }

    #[test]
    fn records_follow_paint_order() {
        let mut list = DrawList::new();
        list.clear_rect(Vec2::ZERO, 820.0, 420.0);
        list.fill_circle(Vec2::new(5.0, 6.0), 10.0, Color::WHITE);
        list.stroke_line(Vec2::ZERO, Vec2::new(3.0, 4.0), 4.0, Color::CUE_STICK);
        list.rebuild_records();

        let ops: Vec<f32> = list.records().iter().map(|r| r.op).collect();
        assert_eq!(ops, vec![op::CLEAR_RECT, op::FILL_CIRCLE, op::STROKE_LINE]);

        let line = list.records()[2];
        assert_eq!((line.w, line.h, line.line), (3.0, 4.0, 4.0));
        assert_eq!(list.record_floats().len(), 3 * DrawRecord::FLOATS);
    }

    #[test]
    fn degenerate_circle_is_not_recorded() {
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        assert!(list.is_empty());
    }

    #[test]
    fn replay_without_surface_is_noop() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::ZERO, 1.0, 1.0, Color::FELT);
        list.replay::<DrawList>(None);

        let mut copy = DrawList::new();
        list.replay(Some(&mut copy));
        assert_eq!(copy.commands(), list.commands());
    }
}
