//! Static display assembly: the widgets that make up the face and the
//! fixed-order redraw.
//!
//! `Face` owns the text buffers; the strings are recomputed in place from a
//! `DateTime` sample and nothing else is cached between frames. Draw order
//! is background, crest, ball, time, then (round shapes) date and weekday.

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyleBuilder,
    },
    pixelcolor::Rgb565,
    prelude::{Point, RgbColor},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use heapless::String;
use profont::PROFONT_24_POINT;

use crate::{
    anim::BallSequencer,
    assets::{AssetCache, AssetId},
    clock::{self, ClockPrefs, DateTime},
    layout::Layout,
    sprite,
};

// Date readout accent, a melon tint against the slate background.
const DATE_COLOR: Rgb565 = Rgb565::new(31, 42, 21);

pub struct Face {
    time: String<8>,
    date: String<4>,
    weekday: &'static str,
}

impl Default for Face {
    fn default() -> Self {
        Self::new()
    }
}

impl Face {
    /// Placeholder readouts; the caller forces a real update right after.
    pub fn new() -> Self {
        let mut time = String::new();
        let _ = time.push_str("00:00");
        let mut date = String::new();
        let _ = date.push_str("00");
        Self {
            time,
            date,
            weekday: "Wednesday",
        }
    }

    /// Recompute every readout from the sampled time.
    pub fn update_time_and_date(&mut self, now: &DateTime, prefs: &ClockPrefs) {
        self.time = clock::format_clock(now, prefs);
        self.date = clock::format_day_of_month(now);
        self.weekday = clock::weekday_name(now);
    }

    pub fn time_text(&self) -> &str {
        &self.time
    }

    pub fn date_text(&self) -> &str {
        &self.date
    }

    pub fn weekday_text(&self) -> &str {
        self.weekday
    }

    pub fn draw<D>(
        &self,
        target: &mut D,
        layout: &Layout,
        assets: &AssetCache,
        ball: &BallSequencer,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(layout.background)?;

        if let Some(logo) = assets.get(AssetId::Logo) {
            let rect = layout.logo_rect;
            let origin = rect.top_left
                + Point::new(
                    (rect.size.width.saturating_sub(logo.width()) / 2) as i32,
                    (rect.size.height.saturating_sub(logo.height()) / 2) as i32,
                );
            sprite::draw(target, logo, origin)?;
        }

        if let Some(art) = assets.get(AssetId::Football) {
            sprite::draw_rotated(target, art, ball.frame().top_left, ball.angle_deg())?;
        }

        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();

        let time_style = MonoTextStyleBuilder::new()
            .font(&PROFONT_24_POINT)
            .text_color(Rgb565::BLACK)
            .build();
        Text::with_text_style(&self.time, layout.time_pos, time_style, centered).draw(target)?;

        if let Some(pos) = layout.date_pos {
            let date_style = MonoTextStyleBuilder::new()
                .font(&FONT_10X20)
                .text_color(DATE_COLOR)
                .build();
            Text::with_text_style(&self.date, pos, date_style, centered).draw(target)?;
        }

        if let Some(pos) = layout.weekday_pos {
            let weekday_style = MonoTextStyleBuilder::new()
                .font(&FONT_6X10)
                .text_color(Rgb565::BLACK)
                .build();
            Text::with_baseline(self.weekday, pos, weekday_style, Baseline::Top).draw(target)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DateTime {
        DateTime {
            year: 2026,
            month: 8,
            day: 7,
            hour: 13,
            minute: 5,
            second: 0,
        }
    }

    #[test]
    fn readouts_follow_the_sampled_time() {
        let mut face = Face::new();
        face.update_time_and_date(&sample(), &ClockPrefs { use_24h: true });
        assert_eq!(face.time_text(), "13:05");
        assert_eq!(face.date_text(), "07");
        assert_eq!(face.weekday_text(), "Friday");

        face.update_time_and_date(&sample(), &ClockPrefs { use_24h: false });
        assert_eq!(face.time_text(), "01:05");
    }
}
