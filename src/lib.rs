#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod anim;
pub mod app;
pub mod assets;
pub mod channel;
pub mod clock;
pub mod face;
pub mod layout;
pub mod rtc_pcf85063;
pub mod settings;
pub mod sprite;

cfg_if::cfg_if! {
    if #[cfg(feature = "esp32s3-watch")] {
        pub mod display;
        pub mod wiring;
    }
}
