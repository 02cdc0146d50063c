//! # Palette Store
//!
//! A palette binds the fixed set of semantic color roles to concrete colors
//! for one visual mode (e.g. `"light"`, `"dark"`). Palettes are closed
//! records: every required role must be present, validated at definition
//! time. The [PaletteStore] holds one palette per mode and is only ever
//! looked up after startup.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::Color;
use crate::error::{ThemeError, ThemeResult};

/// A semantic color role a widget template can reference.
///
/// The ten named variants are required in every palette. [PaletteRole::Custom]
/// allows catalogs and palettes to agree on extension roles beyond the
/// required set; referencing a custom role a palette does not carry fails
/// resolution with [ThemeError::UnknownRole].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteRole {
    /// Default widget background.
    Background,
    /// Default text/foreground color.
    Foreground,
    /// Border and separator color.
    Border,
    /// Accent color for primary actions and focus rings.
    Accent,
    /// Text color drawn on top of the accent color.
    AccentForeground,
    /// Background of selected content.
    SelectionBackground,
    /// Foreground of selected content.
    SelectionForeground,
    /// Foreground of disabled widgets.
    DisabledForeground,
    /// Background of disabled or inactive surfaces.
    DisabledBackground,
    /// Color for destructive actions and error states.
    Danger,
    /// An extension role beyond the required set.
    Custom(&'static str),
}

impl PaletteRole {
    /// The roles every palette must define.
    pub const REQUIRED: [PaletteRole; 10] = [
        PaletteRole::Background,
        PaletteRole::Foreground,
        PaletteRole::Border,
        PaletteRole::Accent,
        PaletteRole::AccentForeground,
        PaletteRole::SelectionBackground,
        PaletteRole::SelectionForeground,
        PaletteRole::DisabledForeground,
        PaletteRole::DisabledBackground,
        PaletteRole::Danger,
    ];

    /// Get the string representation of this role.
    pub fn as_str(&self) -> &str {
        match self {
            PaletteRole::Background => "background",
            PaletteRole::Foreground => "foreground",
            PaletteRole::Border => "border",
            PaletteRole::Accent => "accent",
            PaletteRole::AccentForeground => "accent-foreground",
            PaletteRole::SelectionBackground => "selection-background",
            PaletteRole::SelectionForeground => "selection-foreground",
            PaletteRole::DisabledForeground => "disabled-foreground",
            PaletteRole::DisabledBackground => "disabled-background",
            PaletteRole::Danger => "danger",
            PaletteRole::Custom(name) => name,
        }
    }

    /// Look up a role by its string name. Unrecognized names become
    /// [PaletteRole::Custom] roles; their names are interned for the life
    /// of the process.
    pub fn from_name(name: &str) -> Self {
        for role in PaletteRole::REQUIRED {
            if role.as_str() == name {
                return role;
            }
        }
        PaletteRole::Custom(Box::leak(name.to_string().into_boxed_str()))
    }
}

impl Display for PaletteRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PaletteRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaletteRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(PaletteRole::from_name(&name))
    }
}

/// A validated, complete role-to-color mapping for one mode.
///
/// Immutable once defined: created at startup, only looked up afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    roles: IndexMap<PaletteRole, Color>,
}

impl Palette {
    /// Look up the color bound to a role.
    pub fn get(&self, role: PaletteRole) -> Option<Color> {
        self.roles.get(&role).copied()
    }

    /// All role bindings, in definition order.
    pub fn roles(&self) -> &IndexMap<PaletteRole, Color> {
        &self.roles
    }

    /// The built-in light palette.
    pub fn light() -> Self {
        use PaletteRole::*;
        Self {
            roles: IndexMap::from([
                (Background, Color::rgb8(0xff, 0xff, 0xff)),
                (Foreground, Color::rgb8(0x32, 0x31, 0x30)),
                (Border, Color::rgb8(0xe1, 0xdf, 0xdd)),
                (Accent, Color::rgb8(0x00, 0x78, 0xd4)),
                (AccentForeground, Color::rgb8(0xff, 0xff, 0xff)),
                (SelectionBackground, Color::rgb8(0x00, 0x78, 0xd4)),
                (SelectionForeground, Color::rgb8(0xff, 0xff, 0xff)),
                (DisabledForeground, Color::rgb8(0xa1, 0x9f, 0x9d)),
                (DisabledBackground, Color::rgb8(0xf0, 0xf0, 0xf0)),
                (Danger, Color::rgb8(0xd1, 0x34, 0x38)),
            ]),
        }
    }

    /// The built-in dark palette.
    pub fn dark() -> Self {
        use PaletteRole::*;
        Self {
            roles: IndexMap::from([
                (Background, Color::rgb8(0x23, 0x23, 0x23)),
                (Foreground, Color::rgb8(0xff, 0xff, 0xff)),
                (Border, Color::rgb8(0x44, 0x44, 0x44)),
                (Accent, Color::rgb8(0x00, 0x78, 0xd4)),
                (AccentForeground, Color::rgb8(0xff, 0xff, 0xff)),
                (SelectionBackground, Color::rgb8(0x00, 0x78, 0xd4)),
                (SelectionForeground, Color::rgb8(0xff, 0xff, 0xff)),
                (DisabledForeground, Color::rgb8(0x6e, 0x6e, 0x6e)),
                (DisabledBackground, Color::rgb8(0x2a, 0x2a, 0x2a)),
                (Danger, Color::rgb8(0xf4, 0x87, 0x71)),
            ]),
        }
    }
}

impl Serialize for Palette {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.roles.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let roles = IndexMap::<PaletteRole, Color>::deserialize(deserializer)?;
        let missing: Vec<PaletteRole> = PaletteRole::REQUIRED
            .iter()
            .filter(|role| !roles.contains_key(*role))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(D::Error::custom(format!(
                "palette is missing required roles: {missing:?}"
            )));
        }
        Ok(Palette { roles })
    }
}

/// Holds one palette per mode, keyed by exact mode string.
#[derive(Debug, Clone, Default)]
pub struct PaletteStore {
    palettes: IndexMap<String, Palette>,
}

impl PaletteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with the built-in light and dark palettes.
    pub fn with_builtins() -> Self {
        let mut store = Self::new();
        store.insert("light", Palette::light());
        store.insert("dark", Palette::dark());
        store
    }

    /// Define a palette for a mode from raw color strings.
    ///
    /// Fails with [ThemeError::InvalidColor] if any value is not a
    /// well-formed color, or [ThemeError::IncompletePalette] if any of the
    /// required roles is missing. On failure the mode is not registered.
    /// Redefining an existing mode replaces its palette.
    pub fn define<I, S>(&mut self, mode: impl Into<String>, entries: I) -> ThemeResult<()>
    where
        I: IntoIterator<Item = (PaletteRole, S)>,
        S: AsRef<str>,
    {
        let mode = mode.into();
        let mut roles = IndexMap::new();
        for (role, value) in entries {
            roles.insert(role, value.as_ref().parse::<Color>()?);
        }
        let missing: Vec<PaletteRole> = PaletteRole::REQUIRED
            .iter()
            .filter(|role| !roles.contains_key(*role))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ThemeError::incomplete_palette(mode, missing));
        }
        self.palettes.insert(mode, Palette { roles });
        Ok(())
    }

    /// Insert a pre-built palette for a mode.
    pub fn insert(&mut self, mode: impl Into<String>, palette: Palette) {
        self.palettes.insert(mode.into(), palette);
    }

    /// Look up the palette for a mode by exact key match.
    pub fn get(&self, mode: &str) -> ThemeResult<&Palette> {
        self.palettes
            .get(mode)
            .ok_or_else(|| ThemeError::unknown_mode(mode))
    }

    /// Whether a mode has a palette defined.
    pub fn contains(&self, mode: &str) -> bool {
        self.palettes.contains_key(mode)
    }

    /// The registered mode keys, in definition order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }
}
