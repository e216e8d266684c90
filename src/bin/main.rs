//! Matchday watch face firmware.
//!
//! Boot seeds the soft clock from the PCF85063, the face and its assets are
//! built once, then the poll loop feeds minute ticks, companion config
//! frames and animation frames into the application and redraws on demand.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Application descriptor consumed by the bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

use matchday::{
    app::App,
    channel::Inbox,
    clock::{datetime_is_valid, datetime_to_unix, ClockPrefs, MinuteTicker, SoftClock},
    display::setup_display,
    layout::DisplayShape,
    rtc_pcf85063::Pcf85063,
    wiring::{init_board_pins, BoardPins},
};

use esp_backtrace as _;
use esp_println::println;

use esp_hal::{
    i2c::master::{Config as I2cConfig, I2c},
    main, psram,
    time::Rate,
    timer::systimer::{SystemTimer, Unit},
    uart::{Config as UartConfig, Uart},
    Config,
};

extern crate alloc;
use alloc::vec;
use alloc::boxed::Box;

// The panel is round; flip this for a 240x320 rectangular build.
const SHAPE: DisplayShape = DisplayShape::Round;
const USE_24H: bool = true;

fn now_ms() -> u64 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    t.saturating_mul(1000) / SystemTimer::ticks_per_second()
}

#[main]
fn main() -> ! {
    // Initialize peripherals and put the asset cache in PSRAM.
    let peripherals = esp_hal::init(Config::default());
    esp_alloc::psram_allocator!(&peripherals.PSRAM, psram);

    let BoardPins { display, rtc, link } = init_board_pins(peripherals);

    let display_buf: &'static mut [u8] = Box::leak(vec![0u8; 1024].into_boxed_slice());
    let mut panel = setup_display(display, display_buf);

    // The RTC seeds the soft clock and doubles as the settings store.
    let i2c = I2c::new(
        rtc.i2c0,
        I2cConfig::default().with_frequency(Rate::from_khz(400)),
    )
    .unwrap()
    .with_sda(rtc.sda)
    .with_scl(rtc.scl);
    let mut rtc_dev = Pcf85063::new(i2c);

    let boot_ms = now_ms();
    let boot_secs = match rtc_dev.read_datetime() {
        Ok((dt, false)) if datetime_is_valid(&dt) => datetime_to_unix(&dt),
        Ok((_, true)) => {
            println!("RTC lost power, clock starts at epoch");
            0
        }
        _ => {
            println!("RTC read failed, clock starts at epoch");
            0
        }
    };
    let clock = SoftClock::new(boot_secs, boot_ms);

    // Companion link: RX only, the outbound budget is zero.
    let mut uart = Uart::new(link.uart1, UartConfig::default())
        .unwrap()
        .with_rx(link.rx);
    let mut inbox = Inbox::new();

    let prefs = ClockPrefs { use_24h: USE_24H };
    let boot_now = clock.now_datetime(boot_ms);
    let mut app = App::new(SHAPE, prefs, rtc_dev, &boot_now).unwrap();
    let mut ticker = MinuteTicker::new();

    println!("matchday face up ({:?})", SHAPE);

    loop {
        let now_ms = now_ms();
        let secs = clock.now_secs(now_ms);
        let now = clock.now_datetime(now_ms);

        if ticker.poll(secs) {
            app.handle_minute_tick(now_ms, &now);
        }

        // Drain companion bytes, then apply any complete config frames.
        let mut rx = [0u8; 16];
        if let Ok(n) = uart.read_buffered(&mut rx) {
            inbox.push_slice(&rx[..n]);
        }
        while let Some(msg) = inbox.poll() {
            app.handle_message(&msg);
        }

        if app.tick_frame(now_ms, &now) {
            app.draw(&mut panel).ok();
        }
    }
}
