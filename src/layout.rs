//! Per-shape layout constants.
//!
//! The face runs on two panel shapes; which one is in use is a runtime
//! parameter, so every positioning constant lives in a `Layout` value instead
//! of behind conditional compilation.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{Point, RgbColor, Size},
    primitives::Rectangle,
};

/// Side length of the football sprite in pixels.
pub const BALL_SIDE: u32 = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayShape {
    /// 240x240 round panel (GC9A01). Shows date and weekday.
    Round,
    /// 240x320 rectangular panel. Minimal clock-plus-crest face.
    Rectangular,
}

/// Geometry and background for one panel shape.
#[derive(Copy, Clone, Debug)]
pub struct Layout {
    pub shape: DisplayShape,
    pub size: Size,
    pub background: Rgb565,
    /// Center of the time readout (text is center-aligned on this point).
    pub time_pos: Point,
    /// Region the crest is centered in.
    pub logo_rect: Rectangle,
    /// Center of the day-of-month readout, round shape only.
    pub date_pos: Option<Point>,
    /// Left edge of the weekday readout, round shape only.
    pub weekday_pos: Option<Point>,
    /// Off-screen resting frame of the ball.
    pub ball_start: Rectangle,
    /// Frame the ball rises to, docked under the clock.
    pub ball_dock: Rectangle,
    /// Y the ball falls to (bottom edge of the panel).
    pub ground_y: i32,
    /// Horizontal nudge applied when the fall starts.
    pub drop_shift_x: i32,
}

fn ball_frame(x: i32, y: i32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(BALL_SIDE, BALL_SIDE))
}

impl Layout {
    pub fn for_shape(shape: DisplayShape) -> Self {
        match shape {
            DisplayShape::Round => Layout {
                shape,
                size: Size::new(240, 240),
                // Slate blue behind the crest on round panels.
                background: Rgb565::new(19, 42, 22),
                time_pos: Point::new(120, 31),
                logo_rect: Rectangle::new(Point::zero(), Size::new(240, 240)),
                date_pos: Some(Point::new(171, 103)),
                weekday_pos: Some(Point::new(29, 127)),
                ball_start: ball_frame(-20, 193),
                ball_dock: ball_frame(104, 80),
                ground_y: 240,
                drop_shift_x: 5,
            },
            DisplayShape::Rectangular => Layout {
                shape,
                size: Size::new(240, 320),
                background: Rgb565::WHITE,
                time_pos: Point::new(120, 32),
                logo_rect: Rectangle::new(Point::zero(), Size::new(240, 320)),
                date_pos: None,
                weekday_pos: None,
                ball_start: ball_frame(-58, 273),
                ball_dock: ball_frame(104, 80),
                ground_y: 320,
                drop_shift_x: 5,
            },
        }
    }

    /// True when this shape carries the date and weekday readouts.
    pub fn has_date(&self) -> bool {
        self.date_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_carries_date_readouts() {
        let layout = Layout::for_shape(DisplayShape::Round);
        assert!(layout.has_date());
        assert!(layout.weekday_pos.is_some());
    }

    #[test]
    fn rectangular_is_minimal() {
        let layout = Layout::for_shape(DisplayShape::Rectangular);
        assert!(!layout.has_date());
        assert!(layout.weekday_pos.is_none());
    }

    #[test]
    fn ball_rests_off_screen_and_docks_on_screen() {
        for shape in [DisplayShape::Round, DisplayShape::Rectangular] {
            let layout = Layout::for_shape(shape);
            assert!(layout.ball_start.top_left.x < 0);
            assert!(layout.ball_start.top_left.y < layout.ground_y);
            let dock = layout.ball_dock.top_left;
            assert!(dock.x >= 0 && dock.y >= 0);
            assert!(dock.y + BALL_SIDE as i32 <= layout.ground_y);
            assert_eq!(layout.ground_y, layout.size.height as i32);
        }
    }
}
