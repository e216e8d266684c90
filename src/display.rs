//! Display setup and initialization for the GC9A01 round panel.
//
// - SPI @ 40 MHz through embedded-hal-bus ExclusiveDevice.
// - mipidsi drives the panel; the interface needs a scratch buffer.

use esp_backtrace as _;

use esp_hal::{
    gpio::Output,
    spi::{
        master::{Config as SpiConfig, Spi},
        Mode,
    },
    time::Rate,
    Blocking,
};

use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder, Display,
};

use crate::wiring::DisplayPins;

// A tiny busy-wait delay that satisfies embedded-hal 1.0 DelayNs.
struct SpinDelay;
impl embedded_hal::delay::DelayNs for SpinDelay {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        let mut n = ns / 50 + 1;
        while n != 0 {
            core::hint::spin_loop();
            n -= 1;
        }
    }
    #[inline]
    fn delay_us(&mut self, us: u32) {
        for _ in 0..us {
            self.delay_ns(1_000);
        }
    }
    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

pub type DisplayType<'a> = Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

pub fn setup_display<'a>(display_pins: DisplayPins<'a>, display_buf: &'a mut [u8]) -> DisplayType<'a> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        mut lcd_rst,
        mut lcd_bl,
    } = display_pins;

    // Hardware reset & backlight
    lcd_rst.set_low();
    for _ in 0..10000 {
        core::hint::spin_loop();
    }
    lcd_rst.set_high();
    lcd_bl.set_high();

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_hz(40_000_000))
        .with_mode(Mode::_0);

    let spi = Spi::new(spi2, spi_cfg)
        .unwrap()
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);

    // SPI device + DisplayInterface (needs D/C and a buffer)
    let spi_dev = ExclusiveDevice::new(spi, lcd_cs, NoDelay).unwrap();
    let di = SpiInterface::new(spi_dev, lcd_dc, display_buf);
    let mut delay = SpinDelay;

    DisplayBuilder::new(GC9A01, di)
        .display_size(240, 240)
        .display_offset(0, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut delay)
        .unwrap()
}
