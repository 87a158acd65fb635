//! Timer settings and the provider interface that supplies them.
//!
//! Settings are expressed in minutes, the unit users edit, and converted to
//! [`Durations`] in seconds for the timer. Storage is left to the embedding
//! application: it implements [`SettingsProvider`] over whatever store it
//! owns. [`StaticSettings`] keeps a value in memory.

mod error;

pub use error::SettingsError;

use serde::{Deserialize, Serialize};

use crate::types::Durations;

/// Accepted range for every interval length, in minutes.
pub const DURATION_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=500;
/// Accepted range for the target pomodoro count.
pub const TARGET_RANGE: std::ops::RangeInclusive<u32> = 1..=99;
/// Accepted range for the long-break cadence.
pub const CADENCE_RANGE: std::ops::RangeInclusive<u32> = 1..=99;

// ============================================================================
// TimerSettings
// ============================================================================

/// User-editable configuration for a Pomodoro session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerSettings {
    /// Pomodoro length in minutes (1-500)
    pub pomodoro_minutes: u32,
    /// Short break length in minutes (1-500)
    pub short_break_minutes: u32,
    /// Long break length in minutes (1-500)
    pub long_break_minutes: u32,
    /// Pomodoros to complete before the cycle starts over (1-99)
    pub target_pomodoros: u32,
    /// A long break follows every this many pomodoros (1-99)
    pub long_break_cadence: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            pomodoro_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            target_pomodoros: 8,
            long_break_cadence: 4,
        }
    }
}

impl TimerSettings {
    /// Sets the pomodoro length.
    pub fn with_pomodoro_minutes(mut self, minutes: u32) -> Self {
        self.pomodoro_minutes = minutes;
        self
    }

    /// Sets the short break length.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    /// Sets the long break length.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Sets the target pomodoro count.
    pub fn with_target_pomodoros(mut self, target: u32) -> Self {
        self.target_pomodoros = target;
        self
    }

    /// Sets the long-break cadence.
    pub fn with_long_break_cadence(mut self, cadence: u32) -> Self {
        self.long_break_cadence = cadence;
        self
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns the first field found out of range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !DURATION_MINUTES_RANGE.contains(&self.pomodoro_minutes) {
            return Err(SettingsError::PomodoroDuration(self.pomodoro_minutes));
        }
        if !DURATION_MINUTES_RANGE.contains(&self.short_break_minutes) {
            return Err(SettingsError::ShortBreakDuration(self.short_break_minutes));
        }
        if !DURATION_MINUTES_RANGE.contains(&self.long_break_minutes) {
            return Err(SettingsError::LongBreakDuration(self.long_break_minutes));
        }
        if !TARGET_RANGE.contains(&self.target_pomodoros) {
            return Err(SettingsError::TargetPomodoros(self.target_pomodoros));
        }
        if !CADENCE_RANGE.contains(&self.long_break_cadence) {
            return Err(SettingsError::LongBreakCadence(self.long_break_cadence));
        }
        Ok(())
    }

    /// Converts the interval lengths to seconds.
    pub fn durations(&self) -> Durations {
        Durations::new(
            self.pomodoro_minutes * 60,
            self.short_break_minutes * 60,
            self.long_break_minutes * 60,
        )
    }
}

// ============================================================================
// SettingsProvider
// ============================================================================

/// Source of timer settings, implemented by the embedding application.
pub trait SettingsProvider {
    /// Returns the current settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored settings are out of range.
    fn load(&self) -> Result<TimerSettings, SettingsError>;
}

/// In-memory settings provider.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    settings: TimerSettings,
}

impl StaticSettings {
    /// Wraps a fixed settings value.
    pub fn new(settings: TimerSettings) -> Self {
        Self { settings }
    }

    /// Replaces the held value, as a preferences form would on save.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range settings and keeps the previous value.
    pub fn store(&mut self, settings: TimerSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }
}

impl SettingsProvider for StaticSettings {
    fn load(&self) -> Result<TimerSettings, SettingsError> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod timer_settings_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let settings = TimerSettings::default();
            assert_eq!(settings.pomodoro_minutes, 25);
            assert_eq!(settings.short_break_minutes, 5);
            assert_eq!(settings.long_break_minutes, 15);
            assert_eq!(settings.target_pomodoros, 8);
            assert_eq!(settings.long_break_cadence, 4);
            assert!(settings.validate().is_ok());
        }

        #[test]
        fn test_builder_pattern() {
            let settings = TimerSettings::default()
                .with_pomodoro_minutes(50)
                .with_short_break_minutes(10)
                .with_long_break_minutes(30)
                .with_target_pomodoros(4)
                .with_long_break_cadence(2);

            assert_eq!(settings.pomodoro_minutes, 50);
            assert_eq!(settings.short_break_minutes, 10);
            assert_eq!(settings.long_break_minutes, 30);
            assert_eq!(settings.target_pomodoros, 4);
            assert_eq!(settings.long_break_cadence, 2);
        }

        #[test]
        fn test_validate_boundary_values() {
            let min = TimerSettings {
                pomodoro_minutes: 1,
                short_break_minutes: 1,
                long_break_minutes: 1,
                target_pomodoros: 1,
                long_break_cadence: 1,
            };
            assert!(min.validate().is_ok());

            let max = TimerSettings {
                pomodoro_minutes: 500,
                short_break_minutes: 500,
                long_break_minutes: 500,
                target_pomodoros: 99,
                long_break_cadence: 99,
            };
            assert!(max.validate().is_ok());
        }

        #[test]
        fn test_validate_rejects_each_field() {
            let base = TimerSettings::default();

            assert_eq!(
                base.with_pomodoro_minutes(0).validate(),
                Err(SettingsError::PomodoroDuration(0))
            );
            assert_eq!(
                base.with_short_break_minutes(501).validate(),
                Err(SettingsError::ShortBreakDuration(501))
            );
            assert_eq!(
                base.with_long_break_minutes(0).validate(),
                Err(SettingsError::LongBreakDuration(0))
            );
            assert_eq!(
                base.with_target_pomodoros(100).validate(),
                Err(SettingsError::TargetPomodoros(100))
            );
            assert_eq!(
                base.with_long_break_cadence(0).validate(),
                Err(SettingsError::LongBreakCadence(0))
            );
        }

        #[test]
        fn test_durations_in_seconds() {
            let durations = TimerSettings::default().durations();
            assert_eq!(durations, Durations::new(1500, 300, 900));
        }

        #[test]
        fn test_deserialize_fills_missing_fields() {
            let json = r#"{"pomodoroMinutes":50,"longBreakCadence":2}"#;
            let settings: TimerSettings = serde_json::from_str(json).unwrap();

            assert_eq!(settings.pomodoro_minutes, 50);
            assert_eq!(settings.long_break_cadence, 2);
            assert_eq!(settings.short_break_minutes, 5);
            assert_eq!(settings.target_pomodoros, 8);
        }
    }

    mod provider_tests {
        use super::*;

        #[test]
        fn test_static_settings_load() {
            let provider = StaticSettings::new(TimerSettings::default().with_target_pomodoros(3));
            assert_eq!(provider.load().unwrap().target_pomodoros, 3);
        }

        #[test]
        fn test_static_settings_load_rejects_invalid() {
            let provider = StaticSettings::new(TimerSettings::default().with_pomodoro_minutes(0));
            assert!(provider.load().is_err());
        }

        #[test]
        fn test_store_keeps_previous_on_error() {
            let mut provider = StaticSettings::default();

            let result = provider.store(TimerSettings::default().with_target_pomodoros(0));

            assert!(result.is_err());
            assert_eq!(provider.load().unwrap(), TimerSettings::default());
        }
    }
}
