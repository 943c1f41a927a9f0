use crate::error::StorageError;
use crate::storage::Storage;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme '{0}', expected 'light' or 'dark'")]
pub struct UnknownTheme(pub String);

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Reads the saved preference, falling back to [`Theme::Light`] when
    /// nothing usable is stored.
    pub fn load(storage: &impl Storage) -> Result<Self, StorageError> {
        let Some(value) = storage.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        Ok(value.parse().unwrap_or_else(|err: UnknownTheme| {
            warn!("{}, using the default", err);
            Theme::default()
        }))
    }

    pub fn save(self, storage: &mut impl Storage) -> Result<(), StorageError> {
        storage.set(THEME_KEY, self.as_str())
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}
