//! # Style Class Templates
//!
//! A [StyleClassTemplate] describes how one widget class derives its visual
//! attributes from palette roles: a base attribute map plus an ordered list
//! of state-conditional overrides. Templates are declarative data — they are
//! authored once in the catalog and never consult the host toolkit.
//!
//! State overrides are **first-match-wins**: each override carries an
//! ordered list of (predicate, value) entries, and when several predicates
//! match a widget's state simultaneously the earliest entry applies. The
//! entry order is therefore semantic and is preserved through resolution
//! and application.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;

use crate::palette::PaletteRole;

/// A template attribute value: either a palette-role reference substituted
/// at resolution time, or a literal passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Reference to a palette role, replaced by the mode's concrete color.
    Role(PaletteRole),
    /// A literal value (padding, border width, font spec, fixed color).
    Literal(String),
}

impl AttrValue {
    /// Create a literal attribute value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }
}

impl From<PaletteRole> for AttrValue {
    fn from(role: PaletteRole) -> Self {
        Self::Role(role)
    }
}

/// An interaction-state flag a style override can be conditioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFlag {
    /// Pointer is over the widget.
    Active,
    /// Widget is being pressed.
    Pressed,
    /// Widget does not accept interaction.
    Disabled,
    /// Widget (tab, row, toggle) is selected.
    Selected,
    /// Widget has keyboard focus.
    Focus,
    /// Widget content cannot be edited.
    Readonly,
}

impl StateFlag {
    /// Get the string representation of this flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateFlag::Active => "active",
            StateFlag::Pressed => "pressed",
            StateFlag::Disabled => "disabled",
            StateFlag::Selected => "selected",
            StateFlag::Focus => "focus",
            StateFlag::Readonly => "readonly",
        }
    }
}

impl Display for StateFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The current interaction state of a widget instance: the set of flags
/// that are on. Used to evaluate predicates when looking up the active
/// value of a resolved attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    flags: Vec<StateFlag>,
}

impl WidgetState {
    /// A widget with no state flags set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag to the state.
    pub fn with(mut self, flag: StateFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Whether a flag is set.
    pub fn contains(&self, flag: StateFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// A condition on widget state: the AND of one or more flags, each possibly
/// negated (`pressed` and `!disabled` in the same predicate both have to
/// hold for the predicate to match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePredicate {
    terms: Vec<(StateFlag, bool)>,
}

impl StatePredicate {
    /// A predicate requiring one flag to be set.
    pub fn is(flag: StateFlag) -> Self {
        Self {
            terms: vec![(flag, true)],
        }
    }

    /// A predicate requiring one flag to be clear.
    pub fn not(flag: StateFlag) -> Self {
        Self {
            terms: vec![(flag, false)],
        }
    }

    /// Require an additional flag to be set.
    pub fn and(mut self, flag: StateFlag) -> Self {
        self.terms.push((flag, true));
        self
    }

    /// Require an additional flag to be clear.
    pub fn and_not(mut self, flag: StateFlag) -> Self {
        self.terms.push((flag, false));
        self
    }

    /// Whether every term of the predicate holds for the given state.
    pub fn matches(&self, state: &WidgetState) -> bool {
        self.terms
            .iter()
            .all(|(flag, expected)| state.contains(*flag) == *expected)
    }

    /// The (flag, expected) terms of this predicate, in authored order.
    pub fn terms(&self) -> &[(StateFlag, bool)] {
        &self.terms
    }
}

impl Display for StatePredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (flag, expected)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if !expected {
                write!(f, "!")?;
            }
            write!(f, "{flag}")?;
        }
        Ok(())
    }
}

/// A state-conditional override for one attribute: an ordered,
/// first-match-wins list of (predicate, value) entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateOverride {
    attr: String,
    entries: Vec<(StatePredicate, AttrValue)>,
}

impl StateOverride {
    /// Create an override for an attribute with its ordered entries.
    pub fn new(
        attr: impl Into<String>,
        entries: impl IntoIterator<Item = (StatePredicate, AttrValue)>,
    ) -> Self {
        Self {
            attr: attr.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// The attribute this override applies to.
    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// The ordered (predicate, value) entries.
    pub fn entries(&self) -> &[(StatePredicate, AttrValue)] {
        &self.entries
    }
}

/// The style template of one widget class: base attribute map plus ordered
/// state overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleClassTemplate {
    base: IndexMap<String, AttrValue>,
    overrides: Vec<StateOverride>,
}

impl StyleClassTemplate {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a base attribute to a palette-role reference.
    pub fn role(mut self, attr: impl Into<String>, role: PaletteRole) -> Self {
        self.base.insert(attr.into(), AttrValue::Role(role));
        self
    }

    /// Set a base attribute to a literal value.
    pub fn literal(mut self, attr: impl Into<String>, value: impl Into<String>) -> Self {
        self.base.insert(attr.into(), AttrValue::literal(value));
        self
    }

    /// Add a state override for an attribute. Entry order is kept exactly
    /// as given.
    pub fn map(
        mut self,
        attr: impl Into<String>,
        entries: impl IntoIterator<Item = (StatePredicate, AttrValue)>,
    ) -> Self {
        self.overrides.push(StateOverride::new(attr, entries));
        self
    }

    /// The base attribute map, in authored order.
    pub fn base(&self) -> &IndexMap<String, AttrValue> {
        &self.base
    }

    /// The state overrides, in authored order.
    pub fn overrides(&self) -> &[StateOverride] {
        &self.overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_matching() {
        let pressed = StatePredicate::is(StateFlag::Pressed);
        let state = WidgetState::new().with(StateFlag::Pressed);
        assert!(pressed.matches(&state));
        assert!(!pressed.matches(&WidgetState::new()));
    }

    #[test]
    fn test_negated_predicate() {
        let editable_focus = StatePredicate::is(StateFlag::Focus).and_not(StateFlag::Readonly);
        assert!(editable_focus.matches(&WidgetState::new().with(StateFlag::Focus)));
        assert!(!editable_focus.matches(
            &WidgetState::new()
                .with(StateFlag::Focus)
                .with(StateFlag::Readonly)
        ));
    }

    #[test]
    fn test_predicate_display() {
        let predicate = StatePredicate::is(StateFlag::Pressed).and_not(StateFlag::Disabled);
        assert_eq!(predicate.to_string(), "pressed !disabled");
    }

    #[test]
    fn test_template_keeps_entry_order() {
        let template = StyleClassTemplate::new().map(
            "background",
            [
                (
                    StatePredicate::is(StateFlag::Pressed),
                    AttrValue::Role(PaletteRole::Accent),
                ),
                (
                    StatePredicate::is(StateFlag::Active),
                    AttrValue::Role(PaletteRole::Border),
                ),
            ],
        );
        let entries = template.overrides()[0].entries();
        assert_eq!(entries[0].0, StatePredicate::is(StateFlag::Pressed));
        assert_eq!(entries[1].0, StatePredicate::is(StateFlag::Active));
    }
}
