#![warn(missing_docs)]

//! # themekit
//!
//! A palette-driven theming engine for widget toolkits: given a palette
//! (named colors for a mode such as light/dark) and a catalog of widget
//! style classes, it resolves a consistent set of visual rules — base
//! appearance plus state-dependent variants (pressed, active, disabled,
//! selected, focused, read-only) — and applies them to the host toolkit's
//! style registry. Switching modes re-derives every class's appearance
//! atomically, without restarting the application.
//!
//! ## Overview
//!
//! The engine is built from a few small layers, leaves first:
//!
//! - **[Palette Store](palette)**: validated role→color mappings, one per
//!   mode. Ten required semantic roles; partial palettes are rejected at
//!   definition time.
//! - **[Templates](template) and the [Catalog](catalog)**: declarative
//!   per-class attribute tables. Each attribute is a palette-role reference
//!   or a literal; state overrides are ordered first-match-wins lists.
//! - **[Resolver](resolver)**: pure substitution of a palette into the
//!   catalog, producing one [resolver::ResolvedStyle] per class. No
//!   registry access, so resolution is testable without a live toolkit.
//! - **[Registry](registry)**: the host toolkit's style table behind the
//!   injected [registry::StyleRegistry] trait, and the applicator that
//!   pushes resolved styles into it, tolerating per-class rejections.
//! - **[Manager](manager)**: theme nodes (a base node holding the catalog,
//!   concrete light/dark children bound to palettes) and the atomic
//!   `activate(mode)` switch protocol.
//!
//! ## Quick Start
//!
//! ```rust
//! use themekit::manager::{ThemeManager, DARK_MODE};
//! use themekit::registry::MemoryRegistry;
//!
//! let mut manager = ThemeManager::new(MemoryRegistry::new());
//! manager.activate(DARK_MODE).unwrap();
//!
//! let button = manager.registry().style("Button").unwrap();
//! assert_eq!(button.base["background"], "#232323");
//! ```
//!
//! ## Theme Switching
//!
//! `activate` is atomic: it resolves the whole catalog before touching the
//! registry, so a failed switch leaves the previous theme fully in place.
//!
//! ```rust
//! use themekit::manager::ThemeManager;
//! use themekit::registry::MemoryRegistry;
//!
//! let mut manager = ThemeManager::new(MemoryRegistry::new());
//! manager.activate("light").unwrap();
//! assert!(manager.activate("bogus").is_err());
//! assert_eq!(manager.current_mode(), Some("light"));
//! ```
//!
//! ## Concurrency
//!
//! The engine is single-threaded and synchronous: `activate` runs to
//! completion before returning and performs no locking. A multi-threaded
//! host must serialize its `activate` calls.

/// Contains the [catalog::Catalog] of widget-class templates.
pub mod catalog;
/// Contains the [color::Color] value type.
pub mod color;
/// Contains the [config::ThemeConfig] struct for initial-mode configuration.
pub mod config;
/// Contains the [error::ThemeError] type for all engine errors.
pub mod error;
/// Contains the [manager::ThemeManager] and the theme switch protocol.
pub mod manager;
/// Contains the [palette::Palette] and [palette::PaletteStore] types.
pub mod palette;
/// Contains the [registry::StyleRegistry] host contract and the applicator.
pub mod registry;
/// Contains the pure style [resolver::resolve] step.
pub mod resolver;
/// Contains styling templates and state predicates.
pub mod template;
