//! Theme Preference Domain Model
//!
//! Defines the light/dark display mode and the colour token tables the
//! styling layer swaps between.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Key under which the preference is persisted.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Theme mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light mode theme (default when no signal is available).
    #[default]
    Light,
    /// Dark mode theme.
    Dark,
}

impl ThemePreference {
    /// Builds a preference from a `prefers-color-scheme: dark` match.
    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Returns true for the dark preference.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns the opposite preference.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The value written to durable storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Colour tokens for this preference.
    #[must_use]
    pub const fn tokens(self) -> &'static ThemeTokens {
        match self {
            Self::Light => &ThemeTokens::LIGHT,
            Self::Dark => &ThemeTokens::DARK,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(DomainError::UnknownTheme(other.to_string())),
        }
    }
}

/// Colour tokens consumed by the styling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    /// Accent colour for links and highlights.
    pub primary: &'static str,
    /// Secondary accent, used in gradients.
    pub secondary: &'static str,
    /// Page background.
    pub background_primary: &'static str,
    /// Card and toggle background.
    pub background_secondary: &'static str,
    /// Body text.
    pub text_primary: &'static str,
    /// Muted text.
    pub text_secondary: &'static str,
    /// Placeholder and disabled text.
    pub text_tertiary: &'static str,
    /// Success banner colour.
    pub success: &'static str,
    /// Warning colour.
    pub warning: &'static str,
    /// Error banner colour.
    pub error: &'static str,
}

impl ThemeTokens {
    /// Light palette.
    pub const LIGHT: Self = Self {
        primary: "#007AFF",
        secondary: "#5856D6",
        background_primary: "#FFFFFF",
        background_secondary: "#F2F2F7",
        text_primary: "#000000",
        text_secondary: "#8E8E93",
        text_tertiary: "#C7C7CC",
        success: "#34C759",
        warning: "#FF9500",
        error: "#FF3B30",
    };

    /// Dark palette.
    pub const DARK: Self = Self {
        primary: "#0A84FF",
        secondary: "#5E5CE6",
        background_primary: "#000000",
        background_secondary: "#1C1C1E",
        text_primary: "#FFFFFF",
        text_secondary: "#EBEBF5",
        text_tertiary: "#8E8E93",
        success: "#30D158",
        warning: "#FF9F0A",
        error: "#FF453A",
    };
}
