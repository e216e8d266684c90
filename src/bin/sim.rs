//! Desktop simulator for the watch face.
//!
//! Runs the real application against `embedded-graphics-simulator` with an
//! in-memory settings store and the host wall clock.
//!
//! Keys:
//! - `a` injects a config frame toggling the animation setting (through the
//!   same inbox the firmware feeds from UART bytes)
//! - `t` forces a minute tick without waiting for one
//!
//! `--rect` selects the rectangular layout instead of the round one.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};

use matchday::{
    app::App,
    channel::{encode_animations, Inbox},
    clock::{ClockPrefs, MinuteTicker, SoftClock},
    layout::DisplayShape,
    settings::MemStore,
};

fn main() {
    let shape = if std::env::args().any(|a| a == "--rect") {
        DisplayShape::Rectangular
    } else {
        DisplayShape::Round
    };
    let prefs = ClockPrefs {
        use_24h: !std::env::args().any(|a| a == "--12h"),
    };

    let start = Instant::now();
    let epoch_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before 1970")
        .as_secs() as u32;
    let clock = SoftClock::new(epoch_secs, 0);

    let mut app = App::new(shape, prefs, MemStore::default(), &clock.now_datetime(0))
        .expect("packaged assets failed to decode");

    let mut display = SimulatorDisplay::<Rgb565>::new(app.layout().size);
    let output_settings = OutputSettingsBuilder::new().build();
    let mut window = Window::new("matchday", &output_settings);

    app.draw(&mut display).unwrap();
    window.update(&display);

    let mut ticker = MinuteTicker::new();
    let mut inbox = Inbox::new();

    'running: loop {
        let now_ms = start.elapsed().as_millis() as u64;
        let secs = clock.now_secs(now_ms);
        let now = clock.now_datetime(now_ms);

        if ticker.poll(secs) {
            app.handle_minute_tick(now_ms, &now);
        }

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::A => {
                        let value = if app.settings().animations { 0 } else { 1 };
                        inbox.push_slice(&encode_animations(value));
                    }
                    Keycode::T => app.handle_minute_tick(now_ms, &now),
                    _ => {}
                },
                _ => {}
            }
        }

        while let Some(msg) = inbox.poll() {
            app.handle_message(&msg);
            println!("animations -> {}", app.settings().animations);
        }

        if app.tick_frame(now_ms, &now) {
            app.draw(&mut display).unwrap();
            window.update(&display);
        }

        std::thread::sleep(Duration::from_millis(15));
    }
}
