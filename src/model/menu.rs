//! Navigation menu model.
//!
//! Menu entries are either a plain link or a labelled group of links.
//! The submenu variant carries its children directly, so there is no
//! "has submenu" flag to keep in sync with an optional child list.

use super::route::{Destination, NavigationIntent, Route};
use serde::{Deserialize, Serialize};

/// A labelled navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Text shown in the menu.
    pub label: String,
    /// Where the link goes.
    pub destination: Destination,
}

impl NavLink {
    /// Link labelled `label` pointing at `destination`.
    pub fn new(label: impl Into<String>, destination: impl Into<Destination>) -> Self {
        Self {
            label: label.into(),
            destination: destination.into(),
        }
    }

    /// The intent produced when this link is clicked.
    pub fn intent(&self) -> NavigationIntent {
        NavigationIntent::new(self.destination.clone())
    }
}

/// One top-level menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuItem {
    /// A plain link.
    Leaf(NavLink),
    /// A group that expands to reveal its children.
    Submenu {
        /// Group label.
        label: String,
        /// Links revealed when expanded.
        children: Vec<NavLink>,
    },
}

impl MenuItem {
    /// Label shown for this entry.
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(link) => &link.label,
            Self::Submenu { label, .. } => label,
        }
    }

    /// Whether this entry expands into children.
    pub fn is_submenu(&self) -> bool {
        matches!(self, Self::Submenu { .. })
    }
}

/// Ordered top-level menu plus the call-to-action link shown after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Top-level entries in display order.
    pub items: Vec<MenuItem>,
    /// Call-to-action link drawn after the items.
    pub cta: NavLink,
}

impl Menu {
    /// Flatten the menu into the entries a drawer shows, honoring submenu expansion.
    ///
    /// Submenu headers are always listed; their children only when `expanded`.
    /// The CTA is always last.
    pub fn visible_entries(&self, expanded: bool) -> Vec<MenuEntry<'_>> {
        let mut entries = Vec::new();
        for item in &self.items {
            match item {
                MenuItem::Leaf(link) => entries.push(MenuEntry::Link { link, depth: 0 }),
                MenuItem::Submenu { label, children } => {
                    entries.push(MenuEntry::SubmenuHeader {
                        label,
                        expanded,
                    });
                    if expanded {
                        entries.extend(children.iter().map(|link| MenuEntry::Link { link, depth: 1 }));
                    }
                }
            }
        }
        entries.push(MenuEntry::Cta(&self.cta));
        entries
    }

    /// First submenu group, if any. The desktop dropdown shows this one.
    pub fn first_submenu(&self) -> Option<(&str, &[NavLink])> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Submenu { label, children } => Some((label.as_str(), children.as_slice())),
            MenuItem::Leaf(_) => None,
        })
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            items: vec![
                MenuItem::Leaf(NavLink::new("HOME", Route::Home)),
                MenuItem::Submenu {
                    label: "회사소개".to_string(),
                    children: vec![
                        NavLink::new("회사소개", Route::About),
                        NavLink::new("오시는 길", Route::Location),
                    ],
                },
                MenuItem::Leaf(NavLink::new("업무영역", Route::Services)),
                MenuItem::Leaf(NavLink::new("블로그", "https://blog.naver.com/dream1403")),
            ],
            cta: NavLink::new("상담 신청하기", "https://open.kakao.com/o/sfMApAbi"),
        }
    }
}

/// A row of a flattened menu, borrowed from the [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry<'a> {
    /// A link.
    Link {
        /// The link itself.
        link: &'a NavLink,
        /// 0 at top level, 1 inside a submenu.
        depth: u8,
    },
    /// The label row of a submenu group.
    SubmenuHeader {
        /// Group label.
        label: &'a str,
        /// Whether the children follow this row.
        expanded: bool,
    },
    /// The call-to-action link.
    Cta(&'a NavLink),
}

impl MenuEntry<'_> {
    /// Display text of the row.
    pub fn label(&self) -> &str {
        match self {
            Self::Link { link, .. } | Self::Cta(link) => &link.label,
            Self::SubmenuHeader { label, .. } => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_menu_has_one_submenu_with_two_children() {
        let menu = Menu::default();
        let submenus: Vec<_> = menu.items.iter().filter(|i| i.is_submenu()).collect();
        assert_eq!(submenus.len(), 1);
        let (label, children) = menu.first_submenu().unwrap();
        assert_eq!(label, "회사소개");
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].destination.route(), Some(Route::Location));
    }

    #[test]
    fn collapsed_entries_hide_submenu_children() {
        let menu = Menu::default();
        let entries = menu.visible_entries(false);
        // HOME, submenu header, services, blog, CTA
        assert_eq!(entries.len(), 5);
        assert!(matches!(
            entries[1],
            MenuEntry::SubmenuHeader { expanded: false, .. }
        ));
        assert!(matches!(entries.last(), Some(MenuEntry::Cta(_))));
    }

    #[test]
    fn expanded_entries_list_children_after_header() {
        let menu = Menu::default();
        let entries = menu.visible_entries(true);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[2].label(), "회사소개");
        assert!(matches!(entries[2], MenuEntry::Link { depth: 1, .. }));
        assert_eq!(entries[3].label(), "오시는 길");
    }

    #[test]
    fn menu_item_deserializes_from_tagged_toml() {
        let raw = r#"
kind = "submenu"
label = "About"
children = [{ label = "Us", destination = "/about" }]
"#;
        let item: MenuItem = toml::from_str(raw).unwrap();
        assert!(item.is_submenu());
        assert_eq!(item.label(), "About");
    }
}
