//! # Theme Error Types
//!
//! This module provides the error types for the theming engine, replacing
//! generic error types with specific, context-rich error messages.

use thiserror::Error;

use crate::palette::PaletteRole;

/// Errors that can occur in the theming engine.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A palette definition is missing one or more required roles.
    #[error("palette for mode '{mode}' is missing required roles: {missing:?}")]
    IncompletePalette {
        /// The mode the palette was being defined for.
        mode: String,
        /// The required roles that were absent.
        missing: Vec<PaletteRole>,
    },

    /// A color value could not be parsed.
    #[error("invalid color value '{value}': {details}")]
    InvalidColor {
        /// The raw value that failed to parse.
        value: String,
        /// Details about what was wrong with it.
        details: String,
    },

    /// The requested mode was never registered.
    #[error("unknown theme mode '{mode}'")]
    UnknownMode {
        /// The mode that was requested.
        mode: String,
    },

    /// A style class template references a role absent from the active palette.
    /// This is a catalog authoring error and fails the whole resolution.
    #[error("class '{class}' attribute '{attr}' references unknown palette role '{role}'")]
    UnknownRole {
        /// The widget class whose template is at fault.
        class: String,
        /// The attribute carrying the bad reference.
        attr: String,
        /// The role that is not present in the palette.
        role: String,
    },

    /// The host style registry refused an operation.
    #[error(transparent)]
    Registry(#[from] RegistryRejection),

    /// Generic I/O error (configuration file loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a theme configuration file.
    #[error("failed to parse theme configuration: {details}")]
    ConfigParse {
        /// Details about the parse error.
        details: String,
    },
}

/// The host style registry refused a class, attribute, or theme namespace.
///
/// Rejections are isolated per class: the applicator logs them and continues
/// with the rest of the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("style registry rejected class '{class}': {details}")]
pub struct RegistryRejection {
    /// The widget class (or theme namespace) the registry refused.
    pub class: String,
    /// The registry's reason.
    pub details: String,
}

impl RegistryRejection {
    /// Create a new rejection for a class with the registry's reason.
    pub fn new(class: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            details: details.into(),
        }
    }
}

/// Result type alias for theming operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create an incomplete palette error.
    pub fn incomplete_palette(mode: impl Into<String>, missing: Vec<PaletteRole>) -> Self {
        Self::IncompletePalette {
            mode: mode.into(),
            missing,
        }
    }

    /// Create an invalid color error.
    pub fn invalid_color(value: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            details: details.into(),
        }
    }

    /// Create an unknown mode error.
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        Self::UnknownMode { mode: mode.into() }
    }

    /// Create an unknown role error.
    pub fn unknown_role(
        class: impl Into<String>,
        attr: impl Into<String>,
        role: PaletteRole,
    ) -> Self {
        Self::UnknownRole {
            class: class.into(),
            attr: attr.into(),
            role: role.as_str().to_string(),
        }
    }

    /// Create a configuration parse error.
    pub fn config_parse(details: impl Into<String>) -> Self {
        Self::ConfigParse {
            details: details.into(),
        }
    }
}
