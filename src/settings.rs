//! The persisted user settings: one boolean, animations on or off.
//!
//! The flag lives behind the `SettingsStore` trait so the same application
//! code persists to the RTC scratch register on hardware and to `MemStore`
//! in the simulator and tests. Absence and store failures both fall back to
//! the default (animations enabled).

use crate::channel::ConfigMessage;

/// Message value meaning "animations enabled"; anything else disables.
pub const ANIMATIONS_ON: i32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub animations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { animations: true }
    }
}

pub trait SettingsStore {
    type Error;

    /// Read the persisted flag; `Ok(None)` when nothing was ever written.
    fn read_animations(&mut self) -> Result<Option<bool>, Self::Error>;

    fn write_animations(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

impl Settings {
    /// Load persisted settings. Absence or a store failure yields defaults.
    pub fn load<S: SettingsStore>(store: &mut S) -> Self {
        match store.read_animations() {
            Ok(Some(animations)) => Self { animations },
            _ => Self::default(),
        }
    }

    /// Apply an inbound configuration message and persist the result
    /// immediately. A message without the field leaves the flag unchanged
    /// but still writes the current value back.
    pub fn apply<S: SettingsStore>(&mut self, store: &mut S, msg: &ConfigMessage) {
        if let Some(value) = msg.animations {
            self.animations = value == ANIMATIONS_ON;
        }
        let _ = store.write_animations(self.animations);
    }
}

/// In-memory store for the simulator and tests.
#[derive(Default, Debug)]
pub struct MemStore {
    value: Option<bool>,
}

impl SettingsStore for MemStore {
    type Error = core::convert::Infallible;

    fn read_animations(&mut self) -> Result<Option<bool>, Self::Error> {
        Ok(self.value)
    }

    fn write_animations(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.value = Some(enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(animations: Option<i32>) -> ConfigMessage {
        ConfigMessage { animations }
    }

    #[test]
    fn defaults_to_enabled_when_unset() {
        let mut store = MemStore::default();
        assert!(Settings::load(&mut store).animations);
    }

    #[test]
    fn message_sets_and_persists_flag() {
        let mut store = MemStore::default();
        let mut settings = Settings::load(&mut store);

        settings.apply(&mut store, &msg(Some(0)));
        assert!(!settings.animations);
        // A "restart" reloads the persisted value.
        assert!(!Settings::load(&mut store).animations);

        settings.apply(&mut store, &msg(Some(1)));
        assert!(settings.animations);
        assert!(Settings::load(&mut store).animations);
    }

    #[test]
    fn only_the_sentinel_enables() {
        let mut store = MemStore::default();
        let mut settings = Settings::default();
        settings.apply(&mut store, &msg(Some(2)));
        assert!(!settings.animations);
        settings.apply(&mut store, &msg(Some(-1)));
        assert!(!settings.animations);
    }

    #[test]
    fn missing_field_persists_current_value() {
        let mut store = MemStore::default();
        let mut settings = Settings::default();
        settings.apply(&mut store, &msg(None));
        assert!(settings.animations);
        assert!(Settings::load(&mut store).animations);
    }
}
