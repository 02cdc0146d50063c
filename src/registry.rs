//! # Host Style Registry
//!
//! The host toolkit's process-wide style table is consumed as an injected
//! dependency behind the [StyleRegistry] trait, never as a hidden global.
//! The engine only needs four operations from it: configure a class's base
//! attributes, configure one attribute's ordered state map, and check/create
//! theme namespaces (a namespace inherits unset attributes from its parent).
//!
//! [apply] is the applicator: it pushes a resolved style set into the
//! registry, class by class, in catalog order. A rejection from the host is
//! logged and reported but does not stop the remaining classes — theming one
//! widget class must not block theming the others.
//!
//! [MemoryRegistry] is a complete in-memory implementation, used by the
//! tests and by headless hosts.

use indexmap::IndexMap;

use crate::error::RegistryRejection;
use crate::resolver::ResolvedStyle;
use crate::template::StatePredicate;

/// The contract the host toolkit's style registry must fulfil.
pub trait StyleRegistry {
    /// Configure the base attributes of a widget class.
    fn configure_base(
        &mut self,
        class: &str,
        attrs: &IndexMap<String, String>,
    ) -> Result<(), RegistryRejection>;

    /// Configure the ordered state map of one attribute of a widget class.
    /// The entry order encodes first-match-wins precedence and must be
    /// stored as given.
    fn configure_state_map(
        &mut self,
        class: &str,
        attr: &str,
        entries: &[(StatePredicate, String)],
    ) -> Result<(), RegistryRejection>;

    /// Whether a theme namespace exists in the registry.
    fn theme_exists(&self, name: &str) -> bool;

    /// Create a theme namespace, optionally inheriting unset attributes
    /// from a parent namespace.
    fn create_theme(&mut self, name: &str, parent: Option<&str>)
        -> Result<(), RegistryRejection>;
}

/// Push a resolved style set into the registry.
///
/// For each class, the base map is configured first, then one state map per
/// state-mapped attribute, in catalog order. Rejections are logged at `warn`
/// and collected; application continues with the remaining classes.
/// Re-applying an identical resolved set leaves the registry unchanged.
pub fn apply<R: StyleRegistry + ?Sized>(
    registry: &mut R,
    resolved: &IndexMap<String, ResolvedStyle>,
) -> Vec<RegistryRejection> {
    let mut rejections = Vec::new();
    for (class, style) in resolved {
        if let Err(rejection) = registry.configure_base(class, style.base()) {
            log::warn!("skipping class '{class}': {rejection}");
            rejections.push(rejection);
            continue;
        }
        for map in style.state_maps() {
            if let Err(rejection) = registry.configure_state_map(class, map.attr(), map.entries())
            {
                log::warn!("state map '{}' rejected for '{class}': {rejection}", map.attr());
                rejections.push(rejection);
            }
        }
    }
    rejections
}

/// The style rules the [MemoryRegistry] holds for one widget class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredStyle {
    /// Base attribute values. `configure_base` merges into this map, the
    /// way toolkit registries update the options they are given.
    pub base: IndexMap<String, String>,
    /// Per-attribute state maps; each `configure_state_map` call replaces
    /// the attribute's entry list wholesale. Predicates are stored in their
    /// string form (e.g. `"pressed !disabled"`).
    pub maps: IndexMap<String, Vec<(String, String)>>,
}

/// An in-memory [StyleRegistry].
///
/// Accepts every class by default; [MemoryRegistry::with_known_classes]
/// restricts it to a fixed class set, which makes it reject unknown classes
/// the way a real toolkit registry would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRegistry {
    themes: IndexMap<String, Option<String>>,
    styles: IndexMap<String, StoredStyle>,
    known_classes: Option<Vec<String>>,
}

impl MemoryRegistry {
    /// Create a registry accepting every class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that rejects classes outside the given set.
    pub fn with_known_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_classes: Some(classes.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// The stored style of a class, if any rules were applied for it.
    pub fn style(&self, class: &str) -> Option<&StoredStyle> {
        self.styles.get(class)
    }

    /// All stored styles, in application order.
    pub fn styles(&self) -> &IndexMap<String, StoredStyle> {
        &self.styles
    }

    /// The created theme namespaces and their parents.
    pub fn themes(&self) -> &IndexMap<String, Option<String>> {
        &self.themes
    }

    fn check_class(&self, class: &str) -> Result<(), RegistryRejection> {
        match &self.known_classes {
            Some(known) if !known.iter().any(|k| k == class) => Err(RegistryRejection::new(
                class,
                "class is not known to the registry",
            )),
            _ => Ok(()),
        }
    }
}

impl StyleRegistry for MemoryRegistry {
    fn configure_base(
        &mut self,
        class: &str,
        attrs: &IndexMap<String, String>,
    ) -> Result<(), RegistryRejection> {
        self.check_class(class)?;
        let stored = self.styles.entry(class.to_string()).or_default();
        for (attr, value) in attrs {
            stored.base.insert(attr.clone(), value.clone());
        }
        Ok(())
    }

    fn configure_state_map(
        &mut self,
        class: &str,
        attr: &str,
        entries: &[(StatePredicate, String)],
    ) -> Result<(), RegistryRejection> {
        self.check_class(class)?;
        let stored = self.styles.entry(class.to_string()).or_default();
        stored.maps.insert(
            attr.to_string(),
            entries
                .iter()
                .map(|(predicate, value)| (predicate.to_string(), value.clone()))
                .collect(),
        );
        Ok(())
    }

    fn theme_exists(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    fn create_theme(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<(), RegistryRejection> {
        if let Some(parent) = parent {
            if !self.theme_exists(parent) {
                // Parent namespaces are created on demand.
                self.themes.insert(parent.to_string(), None);
            }
        }
        self.themes
            .insert(name.to_string(), parent.map(str::to_string));
        Ok(())
    }
}
