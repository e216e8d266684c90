//! Application state and lifecycle glue.
//!
//! `App` owns everything the face needs: layout, preferences, settings and
//! their store, the inflated assets, the ball sequencer and the text
//! widgets. The front ends (firmware, simulator) feed it minute ticks,
//! inbound messages and frame timestamps, and ask it to draw.

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

use crate::{
    anim::{BallSequencer, SequencerEvent},
    assets::{AssetCache, AssetError, AssetId},
    channel::ConfigMessage,
    clock::{ClockPrefs, DateTime},
    face::Face,
    layout::{DisplayShape, Layout},
    settings::{Settings, SettingsStore},
};

/// Snapshot of the asset accounting, returned by `unload`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AssetStats {
    pub acquires: u32,
    pub releases: u32,
    pub outstanding: usize,
}

pub struct App<S: SettingsStore> {
    layout: Layout,
    prefs: ClockPrefs,
    settings: Settings,
    store: S,
    assets: AssetCache,
    ball: BallSequencer,
    face: Face,
    needs_redraw: bool,
}

impl<S: SettingsStore> App<S> {
    /// Window load: inflate both assets, load persisted settings and force
    /// an immediate time update so the face is correct from the start.
    pub fn new(
        shape: DisplayShape,
        prefs: ClockPrefs,
        mut store: S,
        now: &DateTime,
    ) -> Result<Self, AssetError> {
        let layout = Layout::for_shape(shape);
        let mut assets = AssetCache::new();
        assets.acquire(AssetId::Logo)?;
        assets.acquire(AssetId::Football)?;

        let settings = Settings::load(&mut store);
        let ball = BallSequencer::new(&layout);
        let mut face = Face::new();
        face.update_time_and_date(now, &prefs);

        Ok(Self {
            layout,
            prefs,
            settings,
            store,
            assets,
            ball,
            face,
            needs_redraw: true,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn face(&self) -> &Face {
        &self.face
    }

    pub fn ball(&self) -> &BallSequencer {
        &self.ball
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// One wall-clock minute elapsed. With animations on this starts the
    /// ball cycle (the time refresh happens when the ball docks); with them
    /// off the readouts update immediately.
    pub fn handle_minute_tick(&mut self, now_ms: u64, now: &DateTime) {
        if self.settings.animations {
            self.ball.kick_off(now_ms);
        } else {
            self.face.update_time_and_date(now, &self.prefs);
            self.needs_redraw = true;
        }
    }

    /// Inbound configuration message: apply and persist.
    pub fn handle_message(&mut self, msg: &ConfigMessage) {
        self.settings.apply(&mut self.store, msg);
    }

    /// Advance the animation to `now_ms`; returns true when the frame needs
    /// to be redrawn.
    pub fn tick_frame(&mut self, now_ms: u64, now: &DateTime) -> bool {
        if self.ball.is_animating() {
            if self.ball.step(now_ms) == Some(SequencerEvent::ReachedClock) {
                self.face.update_time_and_date(now, &self.prefs);
            }
            self.needs_redraw = true;
        }
        core::mem::take(&mut self.needs_redraw)
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.face.draw(target, &self.layout, &self.assets, &self.ball)
    }

    /// Window unload: release every asset and hand the store back so a
    /// restart can reload the persisted settings.
    pub fn unload(mut self) -> (S, AssetStats) {
        self.assets.release_all();
        let stats = AssetStats {
            acquires: self.assets.acquires(),
            releases: self.assets.releases(),
            outstanding: self.assets.outstanding(),
        };
        (self.store, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::BallPhase;
    use crate::channel::ConfigMessage;
    use crate::settings::MemStore;
    use embedded_graphics::{
        framebuffer::{buffer_size, Framebuffer},
        pixelcolor::raw::{LittleEndian, RawU16},
    };

    type Frame = Framebuffer<
        Rgb565,
        RawU16,
        LittleEndian,
        240,
        240,
        { buffer_size::<Rgb565>(240, 240) },
    >;

    fn dt(hour: u8, minute: u8) -> DateTime {
        DateTime {
            year: 2026,
            month: 8,
            day: 7,
            hour,
            minute,
            second: 0,
        }
    }

    fn new_app(store: MemStore) -> App<MemStore> {
        App::new(
            DisplayShape::Round,
            ClockPrefs::default(),
            store,
            &dt(10, 7),
        )
        .unwrap()
    }

    #[test]
    fn load_forces_initial_readouts() {
        let app = new_app(MemStore::default());
        assert_eq!(app.face().time_text(), "10:07");
        assert_eq!(app.face().date_text(), "07");
        assert_eq!(app.face().weekday_text(), "Friday");
        assert!(app.settings().animations);
        assert_eq!(app.assets().outstanding(), 2);
    }

    #[test]
    fn animated_tick_updates_time_when_the_ball_docks() {
        let mut app = new_app(MemStore::default());
        app.tick_frame(0, &dt(10, 7)); // drain the initial redraw

        app.handle_minute_tick(1_000, &dt(10, 8));
        // Tick time: the readout must NOT change yet.
        assert_eq!(app.face().time_text(), "10:07");
        assert_eq!(app.ball().phase(), BallPhase::Rising);

        assert!(app.tick_frame(1_100, &dt(10, 8)));
        assert_eq!(app.face().time_text(), "10:07");

        // Rising completes: readout refreshes at the dock, fall begins.
        assert!(app.tick_frame(1_750, &dt(10, 8)));
        assert_eq!(app.face().time_text(), "10:08");
        assert_eq!(app.ball().phase(), BallPhase::Falling);

        // Falling completes: back to rest, one last redraw for the reset.
        assert!(app.tick_frame(2_500, &dt(10, 8)));
        assert_eq!(app.ball().phase(), BallPhase::AtRest);
        assert!(!app.tick_frame(2_600, &dt(10, 8)));
    }

    #[test]
    fn disabled_tick_updates_immediately() {
        let mut app = new_app(MemStore::default());
        app.tick_frame(0, &dt(10, 7));

        app.handle_message(&ConfigMessage {
            animations: Some(0),
        });
        app.handle_minute_tick(1_000, &dt(10, 8));
        assert_eq!(app.face().time_text(), "10:08");
        assert_eq!(app.ball().phase(), BallPhase::AtRest);
        assert!(app.tick_frame(1_050, &dt(10, 8)));
    }

    #[test]
    fn settings_survive_a_restart() {
        let mut app = new_app(MemStore::default());
        app.handle_message(&ConfigMessage {
            animations: Some(0),
        });
        let (store, stats) = app.unload();
        assert_eq!(stats.acquires, stats.releases);
        assert_eq!(stats.outstanding, 0);

        let app = new_app(store);
        assert!(!app.settings().animations);
    }

    #[test]
    fn draw_renders_background_and_crest() {
        let app = new_app(MemStore::default());
        let mut frame = Frame::new();
        app.draw(&mut frame).unwrap();

        let data = frame.data();
        let px = |x: usize, y: usize| {
            let i = (y * 240 + x) * 2;
            u16::from_le_bytes([data[i], data[i + 1]])
        };
        // Slate background outside the crest; a crest stripe at the center.
        let background: u16 = 0x9D56; // Rgb565::new(19, 42, 22)
        assert_eq!(px(5, 120), background);
        assert_ne!(px(120, 120), background);
    }

    #[test]
    fn mid_flight_minute_tick_is_ignored() {
        let mut app = new_app(MemStore::default());
        app.tick_frame(0, &dt(10, 7));

        app.handle_minute_tick(0, &dt(10, 8));
        app.tick_frame(400, &dt(10, 8));
        assert_eq!(app.ball().phase(), BallPhase::Rising);

        // A second tick mid-flight neither restarts nor queues a cycle.
        app.handle_minute_tick(500, &dt(10, 9));
        app.tick_frame(750, &dt(10, 9));
        assert_eq!(app.ball().phase(), BallPhase::Falling);
        app.tick_frame(1_500, &dt(10, 9));
        assert_eq!(app.ball().phase(), BallPhase::AtRest);
    }
}
