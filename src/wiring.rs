// Board-specific pin roles and initialization for the watch build.
//
//! The following wiring is assumed (Waveshare ESP32-S3 1.28" round LCD):
//! - LCD SCK  => GPIO10
//! - LCD MOSI => GPIO11
//! - LCD CS   => GPIO9
//! - LCD D/C  => GPIO8
//! - LCD RST  => GPIO14
//! - LCD BL   => GPIO2
//! - RTC SDA  => GPIO17 (PCF85063 on I2C0)
//! - RTC SCL  => GPIO18
//! - Companion UART RX => GPIO16 (config frames from the phone bridge)

use esp_backtrace as _;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{Peripherals, GPIO10, GPIO11, GPIO16, GPIO17, GPIO18, I2C0, SPI2, UART1};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct RtcPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO17<'a>,
    pub scl: GPIO18<'a>,
}

pub struct LinkPins<'a> {
    pub uart1: UART1<'a>,
    pub rx: GPIO16<'a>,
}

pub struct BoardPins<'a> {
    pub display: DisplayPins<'a>,
    pub rtc: RtcPins<'a>,
    pub link: LinkPins<'a>,
}

pub fn init_board_pins<'a>(p: Peripherals) -> BoardPins<'a> {
    // LCD control pins — do NOT touch GPIO10/11 here (SPI SCK/MOSI)
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    let lcd_bl = Output::new(p.GPIO2, Level::High, OutputConfig::default());

    BoardPins {
        display: DisplayPins {
            spi2: p.SPI2,
            spi_sck: p.GPIO10,
            spi_mosi: p.GPIO11,
            lcd_cs,
            lcd_dc,
            lcd_rst,
            lcd_bl,
        },
        rtc: RtcPins {
            i2c0: p.I2C0,
            sda: p.GPIO17,
            scl: p.GPIO18,
        },
        link: LinkPins {
            uart1: p.UART1,
            rx: p.GPIO16,
        },
    }
}
