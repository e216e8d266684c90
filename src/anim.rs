//! Football animation sequencer.
//!
//! The minute-tick animation is an explicit state machine instead of chained
//! completion callbacks: `BallSequencer` owns the sprite frame and angle,
//! `transition` is the single table of phase-completion rules, and the main
//! loop advances it by timestamp. Each phase is a fixed-duration `Tween` of
//! the frame rectangle.

use embedded_graphics::{prelude::Point, primitives::Rectangle};

use crate::layout::Layout;

/// Duration of each animation phase.
pub const PHASE_DURATION_MS: u32 = 750;
/// Sprite rotation while resting and rising.
pub const UPWARDS_ANGLE_DEG: f32 = 135.0;
/// Sprite rotation while dropping to the ground.
pub const DROPPING_ANGLE_DEG: f32 = 90.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseIn,
}

impl Curve {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
        }
    }
}

fn lerp(a: i32, b: i32, k: f32) -> i32 {
    a + ((b - a) as f32 * k) as i32
}

/// Fixed-duration interpolation of a frame rectangle, sampled by timestamp.
#[derive(Copy, Clone, Debug)]
pub struct Tween {
    from: Rectangle,
    to: Rectangle,
    duration_ms: u32,
    curve: Curve,
    started_at_ms: u64,
}

impl Tween {
    pub fn new(from: Rectangle, to: Rectangle, duration_ms: u32, curve: Curve, now_ms: u64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            curve,
            started_at_ms: now_ms,
        }
    }

    pub fn sample(&self, now_ms: u64) -> Rectangle {
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        let t = if self.duration_ms == 0 {
            1.0
        } else {
            (elapsed as f32 / self.duration_ms as f32).min(1.0)
        };
        let k = self.curve.apply(t);
        Rectangle::new(
            Point::new(
                lerp(self.from.top_left.x, self.to.top_left.x, k),
                lerp(self.from.top_left.y, self.to.top_left.y, k),
            ),
            self.from.size,
        )
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.duration_ms as u64
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BallPhase {
    AtRest,
    Rising,
    Falling,
}

/// Phase-completion notifications the caller acts on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequencerEvent {
    /// The ball docked under the clock; refresh the displayed time now.
    ReachedClock,
    /// The ball left the screen; the cycle is over.
    ReachedGround,
}

// Completion rules: the phase that just finished -> (next phase, event).
fn transition(finished: BallPhase) -> (BallPhase, Option<SequencerEvent>) {
    match finished {
        BallPhase::AtRest => (BallPhase::AtRest, None),
        BallPhase::Rising => (BallPhase::Falling, Some(SequencerEvent::ReachedClock)),
        BallPhase::Falling => (BallPhase::AtRest, Some(SequencerEvent::ReachedGround)),
    }
}

/// The football's animation state: frame, angle and current phase.
pub struct BallSequencer {
    phase: BallPhase,
    frame: Rectangle,
    angle_deg: f32,
    start: Rectangle,
    dock: Rectangle,
    ground_y: i32,
    drop_shift_x: i32,
    tween: Option<Tween>,
}

impl BallSequencer {
    pub fn new(layout: &Layout) -> Self {
        Self {
            phase: BallPhase::AtRest,
            frame: layout.ball_start,
            angle_deg: UPWARDS_ANGLE_DEG,
            start: layout.ball_start,
            dock: layout.ball_dock,
            ground_y: layout.ground_y,
            drop_shift_x: layout.drop_shift_x,
            tween: None,
        }
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn is_animating(&self) -> bool {
        self.phase != BallPhase::AtRest
    }

    /// Minute tick with animations enabled. A tick while a cycle is still in
    /// flight is ignored; a new cycle starts only from rest.
    pub fn kick_off(&mut self, now_ms: u64) -> bool {
        if self.phase != BallPhase::AtRest {
            return false;
        }
        self.enter(BallPhase::Rising, now_ms);
        true
    }

    /// Advance the animation to `now_ms`. At most one phase completes per
    /// call; the returned event tells the caller what just happened.
    pub fn step(&mut self, now_ms: u64) -> Option<SequencerEvent> {
        let tween = self.tween?;
        self.frame = tween.sample(now_ms);
        if !tween.is_finished(now_ms) {
            return None;
        }
        let (next, event) = transition(self.phase);
        self.enter(next, now_ms);
        event
    }

    // Entry actions for each phase.
    fn enter(&mut self, phase: BallPhase, now_ms: u64) {
        self.phase = phase;
        match phase {
            BallPhase::Rising => {
                self.tween = Some(Tween::new(
                    self.frame,
                    self.dock,
                    PHASE_DURATION_MS,
                    Curve::EaseIn,
                    now_ms,
                ));
            }
            BallPhase::Falling => {
                // Re-rotate to the dropping angle and nudge sideways, then
                // fall straight past the bottom edge.
                self.angle_deg = DROPPING_ANGLE_DEG;
                self.frame.top_left.x += self.drop_shift_x;
                let target = Rectangle::new(
                    Point::new(self.frame.top_left.x, self.ground_y),
                    self.frame.size,
                );
                self.tween = Some(Tween::new(
                    self.frame,
                    target,
                    PHASE_DURATION_MS,
                    Curve::Linear,
                    now_ms,
                ));
            }
            BallPhase::AtRest => {
                self.tween = None;
                self.frame = self.start;
                self.angle_deg = UPWARDS_ANGLE_DEG;
            }
        }
    }
}
