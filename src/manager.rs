//! # Theme Manager
//!
//! The [ThemeManager] owns the injected host registry, the palette store,
//! the theme-node table, and the single mutable piece of process-wide state:
//! the current mode. It exposes the switch protocol — [ThemeManager::activate]
//! resolves a mode's effective catalog against its palette and pushes the
//! result into the host registry, atomically: on resolver failure the
//! transition does not occur and the old theme stays active.
//!
//! Theme nodes form a small inheritance tree. The abstract `base` node holds
//! the widget-class catalog; the concrete `light` and `dark` children each
//! bind one palette and may override per-class templates. A child's
//! effective catalog is its parent chain merged root-first with its own
//! overrides.
//!
//! The manager holds no global state; multiple independent UIs in one
//! process can each own their own manager and registry.

use indexmap::IndexMap;

use crate::catalog::{builtin_catalog, merge_catalogs, Catalog};
use crate::error::{ThemeError, ThemeResult};
use crate::palette::{Palette, PaletteRole, PaletteStore};
use crate::registry::{apply, StyleRegistry};
use crate::resolver::resolve;
use crate::template::StyleClassTemplate;

/// The name of the abstract root node holding the built-in catalog.
pub const BASE_NODE: &str = "base";
/// The built-in light mode.
pub const LIGHT_MODE: &str = "light";
/// The built-in dark mode.
pub const DARK_MODE: &str = "dark";

/// A named theme node: optional parent to inherit the catalog from,
/// optional palette binding, and per-class template overrides.
///
/// A node without a palette binding is abstract — it contributes catalog
/// entries to its children but cannot be activated itself.
#[derive(Debug, Clone)]
pub struct ThemeNode {
    name: String,
    parent: Option<String>,
    palette: Option<String>,
    overrides: Catalog,
}

impl ThemeNode {
    /// Create an abstract node with no parent, palette, or overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            palette: None,
            overrides: Catalog::new(),
        }
    }

    /// Inherit the catalog from a parent node.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Bind the node to a palette mode in the store.
    pub fn with_palette(mut self, mode: impl Into<String>) -> Self {
        self.palette = Some(mode.into());
        self
    }

    /// Override (or add) a class template on top of the inherited catalog.
    pub fn with_template(
        mut self,
        class: impl Into<String>,
        template: StyleClassTemplate,
    ) -> Self {
        self.overrides.insert(class.into(), template);
        self
    }

    /// The node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent node name, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// The bound palette mode, if any.
    pub fn palette(&self) -> Option<&str> {
        self.palette.as_deref()
    }
}

/// Handle identifying a registered theme-change callback, used to
/// unregister it with [ThemeManager::remove_theme_callback].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(usize);

/// Runtime theme switching over an injected host registry.
pub struct ThemeManager<R: StyleRegistry> {
    registry: R,
    store: PaletteStore,
    nodes: IndexMap<String, ThemeNode>,
    current: Option<String>,
    callbacks: Vec<(CallbackId, Box<dyn Fn(&str)>)>,
    next_callback_id: usize,
}

impl<R: StyleRegistry> ThemeManager<R> {
    /// Create a manager with the built-in palettes and the default node
    /// tree: abstract `base` holding the built-in catalog, and concrete
    /// `light`/`dark` children. No mode is active until the first
    /// [ThemeManager::activate] call.
    pub fn new(registry: R) -> Self {
        let mut manager = Self {
            registry,
            store: PaletteStore::with_builtins(),
            nodes: IndexMap::new(),
            current: None,
            callbacks: Vec::new(),
            next_callback_id: 0,
        };

        let mut base = ThemeNode::new(BASE_NODE);
        base.overrides = builtin_catalog();
        manager.add_node(base);
        manager.add_node(
            ThemeNode::new(LIGHT_MODE)
                .with_parent(BASE_NODE)
                .with_palette(LIGHT_MODE),
        );
        manager.add_node(
            ThemeNode::new(DARK_MODE)
                .with_parent(BASE_NODE)
                .with_palette(DARK_MODE),
        );

        manager
    }

    /// Register a theme node. Replaces an existing node with the same name.
    pub fn add_node(&mut self, node: ThemeNode) {
        self.nodes.insert(node.name.clone(), node);
    }

    /// Define a palette for a new mode (see [PaletteStore::define]).
    pub fn define_palette<I, S>(&mut self, mode: impl Into<String>, entries: I) -> ThemeResult<()>
    where
        I: IntoIterator<Item = (PaletteRole, S)>,
        S: AsRef<str>,
    {
        self.store.define(mode, entries)
    }

    /// Insert a pre-built palette for a mode.
    pub fn insert_palette(&mut self, mode: impl Into<String>, palette: Palette) {
        self.store.insert(mode, palette);
    }

    /// The currently active mode, or `None` before the first activation.
    pub fn current_mode(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The injected host registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Register a callback invoked with the new mode name after every
    /// successful activation. Returns a handle for
    /// [ThemeManager::remove_theme_callback].
    pub fn on_theme_change(&mut self, callback: impl Fn(&str) + 'static) -> CallbackId {
        let id = CallbackId(self.next_callback_id);
        self.next_callback_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Unregister a theme-change callback. Returns whether the handle was
    /// still registered.
    pub fn remove_theme_callback(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(callback_id, _)| *callback_id != id);
        self.callbacks.len() != before
    }

    /// Activate a mode: resolve its effective catalog against its palette
    /// and push every class's rules into the host registry, replacing the
    /// previously active rules.
    ///
    /// Fails with [ThemeError::UnknownMode] if `mode` is not a registered
    /// concrete node, and propagates resolver failures; in both cases the
    /// previously active theme (if any) stays in place. Per-class registry
    /// rejections are logged and do not fail the switch.
    pub fn activate(&mut self, mode: &str) -> ThemeResult<()> {
        let node = self
            .nodes
            .get(mode)
            .ok_or_else(|| ThemeError::unknown_mode(mode))?;
        let palette_mode = node
            .palette()
            .ok_or_else(|| ThemeError::unknown_mode(mode))?
            .to_string();
        let parent = node.parent.clone();

        let palette = self.store.get(&palette_mode)?;
        let catalog = self.effective_catalog(mode)?;
        let resolved = resolve(palette, &catalog)?;
        log::debug!("activating mode '{mode}' ({} classes)", resolved.len());

        if !self.registry.theme_exists(mode) {
            if let Err(rejection) = self.registry.create_theme(mode, parent.as_deref()) {
                log::warn!("could not create theme namespace '{mode}': {rejection}");
            }
        }
        let rejections = apply(&mut self.registry, &resolved);
        if !rejections.is_empty() {
            log::debug!(
                "mode '{mode}' active with {} rejected classes",
                rejections.len()
            );
        }

        self.current = Some(mode.to_string());
        for (_, callback) in &self.callbacks {
            callback(mode);
        }
        Ok(())
    }

    /// Switch between the light and dark modes: activates dark when the
    /// current mode is light or unset, light otherwise. Returns the mode
    /// that was activated.
    pub fn toggle(&mut self) -> ThemeResult<&'static str> {
        let next = if self.current.as_deref() == Some(DARK_MODE) {
            LIGHT_MODE
        } else {
            DARK_MODE
        };
        self.activate(next)?;
        Ok(next)
    }

    /// The node's catalog with its parent chain merged in, root-first.
    fn effective_catalog(&self, name: &str) -> ThemeResult<Catalog> {
        let mut chain = Vec::new();
        let mut cursor = Some(name);
        while let Some(node_name) = cursor {
            if chain.iter().any(|n: &&ThemeNode| n.name == node_name) {
                break;
            }
            let node = self
                .nodes
                .get(node_name)
                .ok_or_else(|| ThemeError::unknown_mode(node_name))?;
            chain.push(node);
            cursor = node.parent();
        }

        let mut catalog = Catalog::new();
        for node in chain.iter().rev() {
            catalog = merge_catalogs(&catalog, &node.overrides);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::palette::PaletteRole;
    use crate::registry::MemoryRegistry;

    #[test]
    fn test_no_mode_until_first_activation() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        assert_eq!(manager.current_mode(), None);
        manager.activate(LIGHT_MODE).unwrap();
        assert_eq!(manager.current_mode(), Some("light"));
    }

    #[test]
    fn test_unknown_mode_leaves_current_unchanged() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        manager.activate(LIGHT_MODE).unwrap();

        let err = manager.activate("bogus").unwrap_err();
        assert!(matches!(err, ThemeError::UnknownMode { .. }));
        assert_eq!(manager.current_mode(), Some("light"));
    }

    #[test]
    fn test_abstract_node_cannot_be_activated() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        assert!(matches!(
            manager.activate(BASE_NODE),
            Err(ThemeError::UnknownMode { .. })
        ));
        assert_eq!(manager.current_mode(), None);
    }

    #[test]
    fn test_resolver_failure_is_atomic() {
        // A dark-only node referencing a custom role its palette lacks.
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        manager.add_node(
            ThemeNode::new("dark-accented")
                .with_parent(BASE_NODE)
                .with_palette(DARK_MODE)
                .with_template(
                    "Gauge",
                    StyleClassTemplate::new().role("needle", PaletteRole::Custom("gauge-needle")),
                ),
        );
        manager.activate(LIGHT_MODE).unwrap();
        let before = manager.registry().clone();

        let err = manager.activate("dark-accented").unwrap_err();
        assert!(matches!(err, ThemeError::UnknownRole { .. }));
        assert_eq!(manager.current_mode(), Some("light"));
        assert_eq!(manager.registry(), &before);
    }

    #[test]
    fn test_round_trip_matches_clean_activation() {
        let mut round_trip = ThemeManager::new(MemoryRegistry::new());
        round_trip.activate(LIGHT_MODE).unwrap();
        round_trip.activate(DARK_MODE).unwrap();
        round_trip.activate(LIGHT_MODE).unwrap();

        let mut clean = ThemeManager::new(MemoryRegistry::new());
        clean.activate(LIGHT_MODE).unwrap();

        assert_eq!(round_trip.registry().styles(), clean.registry().styles());
        // Namespace creation in the host is additive: the detour through
        // dark leaves its namespace behind, on top of the clean set.
        assert!(round_trip.registry().theme_exists("light"));
        assert!(round_trip.registry().theme_exists("dark"));
        assert!(!clean.registry().theme_exists("dark"));
    }

    #[test]
    fn test_switch_replaces_rules() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        manager.activate(LIGHT_MODE).unwrap();
        assert_eq!(
            manager.registry().style("Frame").unwrap().base["background"],
            "#ffffff"
        );
        manager.activate(DARK_MODE).unwrap();
        assert_eq!(
            manager.registry().style("Frame").unwrap().base["background"],
            "#232323"
        );
    }

    #[test]
    fn test_toggle_alternates() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        assert_eq!(manager.toggle().unwrap(), "dark");
        assert_eq!(manager.toggle().unwrap(), "light");
        assert_eq!(manager.toggle().unwrap(), "dark");
        assert_eq!(manager.current_mode(), Some("dark"));
    }

    #[test]
    fn test_callbacks_fire_on_success_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut manager = ThemeManager::new(MemoryRegistry::new());
        manager.on_theme_change(move |mode| sink.borrow_mut().push(mode.to_string()));

        manager.activate(LIGHT_MODE).unwrap();
        let _ = manager.activate("bogus");
        manager.activate(DARK_MODE).unwrap();

        assert_eq!(*seen.borrow(), vec!["light".to_string(), "dark".into()]);
    }

    #[test]
    fn test_removed_callback_no_longer_fires() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut manager = ThemeManager::new(MemoryRegistry::new());
        let id = manager.on_theme_change(move |mode| sink.borrow_mut().push(mode.to_string()));

        manager.activate(LIGHT_MODE).unwrap();
        assert!(manager.remove_theme_callback(id));
        manager.activate(DARK_MODE).unwrap();

        assert_eq!(*seen.borrow(), vec!["light".to_string()]);
        // A stale handle is a no-op.
        assert!(!manager.remove_theme_callback(id));
    }

    #[test]
    fn test_child_template_override_shadows_parent() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        manager.add_node(
            ThemeNode::new("dark-flat")
                .with_parent(DARK_MODE)
                .with_palette(DARK_MODE)
                .with_template(
                    "Button",
                    StyleClassTemplate::new()
                        .role("background", PaletteRole::DisabledBackground)
                        .role("foreground", PaletteRole::Foreground),
                ),
        );
        manager.activate("dark-flat").unwrap();

        let button = manager.registry().style("Button").unwrap();
        assert_eq!(button.base["background"], "#2a2a2a");
        // The rest of the catalog is inherited from the base node.
        assert!(manager.registry().style("Entry").is_some());
    }

    #[test]
    fn test_host_namespace_created_with_parent() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        manager.activate(DARK_MODE).unwrap();
        assert_eq!(
            manager.registry().themes()["dark"],
            Some("base".to_string())
        );
    }

    #[test]
    fn test_custom_mode_with_defined_palette() {
        let mut manager = ThemeManager::new(MemoryRegistry::new());
        let entries: Vec<(PaletteRole, String)> = Palette::dark()
            .roles()
            .iter()
            .map(|(role, color)| {
                if *role == PaletteRole::Accent {
                    (*role, "#c50ed2".to_string())
                } else {
                    (*role, color.to_hex())
                }
            })
            .collect();
        manager.define_palette("midnight", entries).unwrap();
        manager.add_node(
            ThemeNode::new("midnight")
                .with_parent(BASE_NODE)
                .with_palette("midnight"),
        );

        manager.activate("midnight").unwrap();
        assert_eq!(manager.current_mode(), Some("midnight"));
        assert_eq!(
            manager.registry().style("Accent.Button").unwrap().base["background"],
            "#c50ed2"
        );
    }
}
