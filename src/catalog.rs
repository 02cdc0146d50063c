//! # Widget Class Catalog
//!
//! The catalog maps widget-class names to their [StyleClassTemplate]s. It is
//! the declarative heart of the engine: each entry encodes which palette
//! roles feed which attributes, and the exact precedence of the
//! state-conditional overrides (first entry wins when several states hold
//! at once — `pressed` is listed before `active` for exactly that reason).
//!
//! The catalog is defined once at startup and read-only at resolution time.
//! Attribute names are trusted to be ones the host toolkit recognizes for
//! the class; the engine does not validate them.

use indexmap::IndexMap;

use crate::palette::PaletteRole::*;
use crate::template::StateFlag::*;
use crate::template::{AttrValue, StatePredicate, StyleClassTemplate};

/// A catalog of widget-class templates, in application order.
pub type Catalog = IndexMap<String, StyleClassTemplate>;

/// Merge a child's per-class template overrides into a parent catalog.
///
/// The child's effective catalog is the parent's catalog with the child's
/// entries replacing same-named classes and new classes appended. This is
/// the composition behind theme-node inheritance.
pub fn merge_catalogs(parent: &Catalog, child: &Catalog) -> Catalog {
    let mut merged = parent.clone();
    for (class, template) in child {
        merged.insert(class.clone(), template.clone());
    }
    merged
}

/// The built-in widget-class catalog.
///
/// Covers the classes of the host UI: containers, labels, the three button
/// flavors, text entry, combobox, check/radio buttons, the notebook and its
/// tabs, scrollbars, and the treeview.
pub fn builtin_catalog() -> Catalog {
    let on = StatePredicate::is;
    let role = AttrValue::Role;

    let mut catalog = Catalog::new();

    catalog.insert(
        "Frame".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .role("bordercolor", Border),
    );

    catalog.insert(
        "Label".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .role("foreground", Foreground)
            .map("foreground", [(on(Disabled), role(DisabledForeground))]),
    );

    catalog.insert(
        "Button".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .role("foreground", Foreground)
            .role("bordercolor", Border)
            .role("focuscolor", Accent)
            .literal("padding", "8 4")
            .map(
                "background",
                [
                    (on(Pressed), role(Accent)),
                    (on(Active), role(DisabledBackground)),
                    (on(Disabled), role(DisabledBackground)),
                ],
            )
            .map(
                "foreground",
                [
                    (on(Pressed), role(AccentForeground)),
                    (on(Disabled), role(DisabledForeground)),
                ],
            ),
    );

    catalog.insert(
        "Accent.Button".into(),
        StyleClassTemplate::new()
            .role("background", Accent)
            .role("foreground", AccentForeground)
            .role("focuscolor", Accent)
            .literal("padding", "8 4")
            .map(
                "background",
                [
                    (on(Pressed), role(SelectionBackground)),
                    (on(Disabled), role(DisabledBackground)),
                ],
            )
            .map("foreground", [(on(Disabled), role(DisabledForeground))]),
    );

    catalog.insert(
        "Danger.Button".into(),
        StyleClassTemplate::new()
            .role("background", Danger)
            .role("foreground", AccentForeground)
            .literal("padding", "8 4")
            .map(
                "background",
                [
                    (on(Pressed), role(Danger)),
                    (on(Disabled), role(DisabledBackground)),
                ],
            )
            .map("foreground", [(on(Disabled), role(DisabledForeground))]),
    );

    catalog.insert(
        "Entry".into(),
        StyleClassTemplate::new()
            .role("fieldbackground", Background)
            .role("foreground", Foreground)
            .role("insertcolor", Foreground)
            .role("bordercolor", Border)
            .map(
                "fieldbackground",
                [
                    (on(Readonly), role(DisabledBackground)),
                    (on(Disabled), role(DisabledBackground)),
                ],
            )
            .map(
                "foreground",
                [
                    (on(Disabled), role(DisabledForeground)),
                    (on(Readonly), role(Foreground)),
                ],
            )
            .map("bordercolor", [(on(Focus), role(Accent))]),
    );

    catalog.insert(
        "Combobox".into(),
        StyleClassTemplate::new()
            .role("fieldbackground", Background)
            .role("foreground", Foreground)
            .role("selectbackground", SelectionBackground)
            .role("selectforeground", SelectionForeground)
            .role("bordercolor", Border)
            .map("fieldbackground", [(on(Readonly), role(Background))])
            .map("foreground", [(on(Disabled), role(DisabledForeground))])
            .map("bordercolor", [(on(Focus), role(Accent))]),
    );

    catalog.insert(
        "Checkbutton".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .role("foreground", Foreground)
            .role("indicatorcolor", Background)
            .map(
                "indicatorcolor",
                [
                    (on(Selected), role(Accent)),
                    (on(Disabled), role(DisabledBackground)),
                ],
            )
            .map("foreground", [(on(Disabled), role(DisabledForeground))]),
    );

    catalog.insert(
        "Radiobutton".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .role("foreground", Foreground)
            .role("indicatorcolor", Background)
            .map(
                "indicatorcolor",
                [
                    (on(Selected), role(Accent)),
                    (on(Disabled), role(DisabledBackground)),
                ],
            )
            .map("foreground", [(on(Disabled), role(DisabledForeground))]),
    );

    catalog.insert(
        "Notebook".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .literal("borderwidth", "0"),
    );

    catalog.insert(
        "Notebook.Tab".into(),
        StyleClassTemplate::new()
            .role("background", DisabledBackground)
            .role("foreground", Foreground)
            .literal("padding", "20 10")
            .map(
                "background",
                [
                    (on(Selected), role(Background)),
                    (on(Active), role(Background)),
                ],
            )
            .map(
                "foreground",
                [
                    (on(Selected), role(Foreground)),
                    (on(Disabled), role(DisabledForeground)),
                ],
            ),
    );

    catalog.insert(
        "Scrollbar".into(),
        StyleClassTemplate::new()
            .role("background", DisabledBackground)
            .role("troughcolor", Background)
            .role("bordercolor", Background)
            .role("arrowcolor", Border)
            .map(
                "background",
                [(on(Pressed), role(Accent)), (on(Active), role(Border))],
            ),
    );

    catalog.insert(
        "Treeview".into(),
        StyleClassTemplate::new()
            .role("background", Background)
            .role("fieldbackground", Background)
            .role("foreground", Foreground)
            .role("bordercolor", Border)
            .map("background", [(on(Selected), role(SelectionBackground))])
            .map(
                "foreground",
                [
                    (on(Selected), role(SelectionForeground)),
                    (on(Disabled), role(DisabledForeground)),
                ],
            ),
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_listed_before_active() {
        // The button background override encodes pressed-beats-active via
        // entry order; reordering it would change visible behavior.
        let catalog = builtin_catalog();
        let button = &catalog["Button"];
        let background = button
            .overrides()
            .iter()
            .find(|o| o.attr() == "background")
            .unwrap();
        assert_eq!(background.entries()[0].0, on_pressed());
        assert_eq!(background.entries()[1].0, StatePredicate::is(Active));
    }

    fn on_pressed() -> StatePredicate {
        StatePredicate::is(Pressed)
    }

    #[test]
    fn test_merge_replaces_and_appends() {
        let parent = builtin_catalog();
        let mut child = Catalog::new();
        child.insert(
            "Button".into(),
            StyleClassTemplate::new().role("background", Danger),
        );
        child.insert(
            "Sidebar".into(),
            StyleClassTemplate::new().role("background", Background),
        );

        let merged = merge_catalogs(&parent, &child);
        assert_eq!(merged.len(), parent.len() + 1);
        assert_eq!(
            merged["Button"].base().get("background"),
            Some(&AttrValue::Role(Danger))
        );
        assert!(merged.contains_key("Sidebar"));
        // Untouched parent entries survive.
        assert_eq!(merged["Entry"], parent["Entry"]);
    }
}
