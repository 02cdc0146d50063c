//! # Style Resolver
//!
//! Resolution substitutes a mode's palette into the catalog's templates and
//! produces one [ResolvedStyle] per widget class. It is pure: no registry
//! access, no side effects, so it can be tested without a live toolkit.
//! Application is a separate step (see [crate::registry::apply]).
//!
//! Resolution is all-or-nothing: any unknown role reference aborts the whole
//! pass so a mode switch can never leave the UI half-themed.

use indexmap::IndexMap;

use crate::catalog::Catalog;
use crate::error::ThemeResult;
use crate::palette::Palette;
use crate::template::{AttrValue, StatePredicate, WidgetState};

/// A resolved state map for one attribute: the ordered (predicate, value)
/// entries with role references replaced by concrete colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMap {
    attr: String,
    entries: Vec<(StatePredicate, String)>,
}

impl StateMap {
    /// The attribute this map applies to.
    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// The ordered (predicate, value) entries.
    pub fn entries(&self) -> &[(StatePredicate, String)] {
        &self.entries
    }
}

/// The concrete style of one widget class under one mode: the substituted
/// base attribute map plus the substituted state maps, in template order.
///
/// Transient — recomputed on every mode switch, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    base: IndexMap<String, String>,
    state_maps: Vec<StateMap>,
}

impl ResolvedStyle {
    /// The base attribute values.
    pub fn base(&self) -> &IndexMap<String, String> {
        &self.base
    }

    /// The state maps, one per state-mapped attribute.
    pub fn state_maps(&self) -> &[StateMap] {
        &self.state_maps
    }

    /// The value of an attribute for a widget in the given state: the first
    /// matching override entry, falling back to the base value.
    pub fn lookup(&self, attr: &str, state: &WidgetState) -> Option<&str> {
        if let Some(map) = self.state_maps.iter().find(|m| m.attr == attr) {
            for (predicate, value) in &map.entries {
                if predicate.matches(state) {
                    return Some(value);
                }
            }
        }
        self.base.get(attr).map(String::as_str)
    }
}

/// Resolve every template in the catalog against a palette.
///
/// Produces exactly one entry per catalog class, in catalog order. Fails
/// with [crate::error::ThemeError::UnknownRole] if any template references
/// a role the palette does not carry; nothing is returned in that case.
pub fn resolve(
    palette: &Palette,
    catalog: &Catalog,
) -> ThemeResult<IndexMap<String, ResolvedStyle>> {
    let mut resolved = IndexMap::with_capacity(catalog.len());
    for (class, template) in catalog {
        let mut base = IndexMap::with_capacity(template.base().len());
        for (attr, value) in template.base() {
            base.insert(attr.clone(), substitute(palette, class, attr, value)?);
        }

        let mut state_maps = Vec::with_capacity(template.overrides().len());
        for override_ in template.overrides() {
            let mut entries = Vec::with_capacity(override_.entries().len());
            for (predicate, value) in override_.entries() {
                entries.push((
                    predicate.clone(),
                    substitute(palette, class, override_.attr(), value)?,
                ));
            }
            state_maps.push(StateMap {
                attr: override_.attr().to_string(),
                entries,
            });
        }

        resolved.insert(class.clone(), ResolvedStyle { base, state_maps });
    }
    Ok(resolved)
}

fn substitute(palette: &Palette, class: &str, attr: &str, value: &AttrValue) -> ThemeResult<String> {
    match value {
        AttrValue::Role(role) => palette
            .get(*role)
            .map(|color| color.to_hex())
            .ok_or_else(|| crate::error::ThemeError::unknown_role(class, attr, *role)),
        AttrValue::Literal(literal) => Ok(literal.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::palette::{PaletteRole, PaletteStore};
    use crate::template::{StateFlag, StyleClassTemplate};

    #[test]
    fn test_one_entry_per_class_and_no_role_leaks() {
        let catalog = builtin_catalog();
        let resolved = resolve(&Palette::light(), &catalog).unwrap();
        assert_eq!(resolved.len(), catalog.len());
        for (class, style) in &resolved {
            assert!(catalog.contains_key(class));
            for value in style.base().values() {
                assert!(!value.contains("role("), "role leaked into {class}");
            }
        }
    }

    #[test]
    fn test_light_button_scenario() {
        // accent = #0078d4; Button base background is the background role,
        // the active override pulls the disabled-background role.
        let resolved = resolve(&Palette::light(), &builtin_catalog()).unwrap();
        let button = &resolved["Button"];
        assert_eq!(button.base()["background"], "#ffffff");

        let background = button
            .state_maps()
            .iter()
            .find(|m| m.attr() == "background")
            .unwrap();
        let active = background
            .entries()
            .iter()
            .find(|(p, _)| p == &StatePredicate::is(StateFlag::Active))
            .unwrap();
        assert_eq!(active.1, "#f0f0f0");
        assert_eq!(
            Palette::light().get(PaletteRole::Accent).unwrap().to_hex(),
            "#0078d4"
        );
    }

    #[test]
    fn test_first_match_wins_lookup() {
        let resolved = resolve(&Palette::light(), &builtin_catalog()).unwrap();
        let button = &resolved["Button"];
        // pressed is listed before active, so a widget in both states gets
        // the pressed value.
        let both = WidgetState::new()
            .with(StateFlag::Pressed)
            .with(StateFlag::Active);
        assert_eq!(button.lookup("background", &both), Some("#0078d4"));
        assert_eq!(
            button.lookup("background", &WidgetState::new().with(StateFlag::Active)),
            Some("#f0f0f0")
        );
        // No override matches: base value applies.
        assert_eq!(
            button.lookup("background", &WidgetState::new()),
            Some("#ffffff")
        );
    }

    #[test]
    fn test_literals_pass_through() {
        let resolved = resolve(&Palette::light(), &builtin_catalog()).unwrap();
        assert_eq!(resolved["Button"].base()["padding"], "8 4");
    }

    #[test]
    fn test_unknown_custom_role_fails_whole_resolution() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Frame".into(),
            StyleClassTemplate::new().role("background", PaletteRole::Background),
        );
        catalog.insert(
            "Chart".into(),
            StyleClassTemplate::new().role("gridcolor", PaletteRole::Custom("chart-grid")),
        );
        let err = resolve(&Palette::light(), &catalog).unwrap_err();
        match err {
            crate::error::ThemeError::UnknownRole { class, attr, role } => {
                assert_eq!(class, "Chart");
                assert_eq!(attr, "gridcolor");
                assert_eq!(role, "chart-grid");
            }
            other => panic!("expected UnknownRole, got {other}"),
        }

        // The same catalog resolves once the palette carries the role.
        let mut store = PaletteStore::new();
        let mut entries: Vec<(PaletteRole, String)> = Palette::light()
            .roles()
            .iter()
            .map(|(role, color)| (*role, color.to_hex()))
            .collect();
        entries.push((PaletteRole::Custom("chart-grid"), "#cccccc".into()));
        store.define("light", entries).unwrap();
        let resolved = resolve(store.get("light").unwrap(), &catalog).unwrap();
        assert_eq!(resolved["Chart"].base()["gridcolor"], "#cccccc");
    }
}
