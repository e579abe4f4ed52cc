//! Site navigation tree
//!
//! The menu is static data declared once and held read-only for the life
//! of the process. Leaf urls are cross-checked against the collection
//! registry and the site's fixed pages.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::registry::CollectionRegistry;

/// A terminal menu link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLeaf {
    pub label: &'static str,
    pub url: &'static str,
}

/// A top-level menu node: either a direct link or a labeled group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavLink {
    Group {
        label: &'static str,
        children: Vec<NavLeaf>,
    },
    Leaf {
        label: &'static str,
        url: &'static str,
    },
}

impl NavLink {
    /// The node's display label
    pub fn label(&self) -> &'static str {
        match self {
            NavLink::Group { label, .. } => label,
            NavLink::Leaf { label, .. } => label,
        }
    }
}

/// Fixed pages served outside any collection
pub const PAGE_ROUTES: &[&str] = &[
    "/a-propos/biographie",
    "/a-propos/cv",
    "/ecrits/bibliographie",
    "/recherche/memoire",
    "/recherche/projet-de-these",
];

lazy_static! {
    /// The site's top-level menu
    pub static ref NAV_LINKS: Vec<NavLink> = vec![
        NavLink::Group {
            label: "À propos",
            children: vec![
                NavLeaf { label: "Biographie", url: "/a-propos/biographie" },
                NavLeaf { label: "Cv", url: "/a-propos/cv" },
            ],
        },
        NavLink::Leaf {
            label: "Hommages",
            url: "/hommages",
        },
        NavLink::Leaf {
            label: "Expositions",
            url: "/expositions",
        },
        NavLink::Group {
            label: "Écrits",
            children: vec![
                NavLeaf { label: "Articles", url: "/ecrits/articles" },
                NavLeaf { label: "Ouvrages", url: "/ecrits/ouvrages" },
                NavLeaf { label: "Bibliographie", url: "/ecrits/bibliographie" },
            ],
        },
        NavLink::Group {
            label: "Recherche",
            children: vec![
                NavLeaf { label: "Colloques", url: "/recherche/colloques" },
                NavLeaf { label: "Mémoire", url: "/recherche/memoire" },
                NavLeaf { label: "Projet de thèse", url: "/recherche/projet-de-these" },
            ],
        },
    ];
}

/// Iterate every terminal link of a menu
pub fn leaves(links: &[NavLink]) -> Vec<NavLeaf> {
    let mut out = Vec::new();
    for link in links {
        match link {
            NavLink::Leaf { label, url } => out.push(NavLeaf {
                label: *label,
                url: *url,
            }),
            NavLink::Group { children, .. } => out.extend(children.iter().cloned()),
        }
    }
    out
}

/// Check that every leaf url resolves to a collection route or fixed page
///
/// All unresolved links are returned at once, each with its label, rather
/// than stopping at the first.
pub fn verify_routes(links: &[NavLink], registry: &CollectionRegistry) -> Result<(), Vec<NavLeaf>> {
    let unresolved: Vec<NavLeaf> = leaves(links)
        .into_iter()
        .filter(|leaf| !registry.contains_route(leaf.url) && !PAGE_ROUTES.contains(&leaf.url))
        .collect();

    if unresolved.is_empty() {
        Ok(())
    } else {
        Err(unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_menu_resolves() {
        let registry = CollectionRegistry::site_default();
        assert_eq!(verify_routes(&NAV_LINKS, &registry), Ok(()));
    }

    #[test]
    fn test_unknown_url_reported_with_label() {
        let registry = CollectionRegistry::site_default();
        let links = vec![
            NavLink::Leaf {
                label: "Hommages",
                url: "/hommages",
            },
            NavLink::Leaf {
                label: "Archives",
                url: "/archives",
            },
        ];

        let unresolved = verify_routes(&links, &registry).unwrap_err();
        assert_eq!(
            unresolved,
            vec![NavLeaf {
                label: "Archives",
                url: "/archives"
            }]
        );
    }

    #[test]
    fn test_group_children_checked() {
        let registry = CollectionRegistry::site_default();
        let links = vec![NavLink::Group {
            label: "Écrits",
            children: vec![
                NavLeaf {
                    label: "Articles",
                    url: "/ecrits/articles",
                },
                NavLeaf {
                    label: "Brouillons",
                    url: "/ecrits/brouillons",
                },
            ],
        }];

        let unresolved = verify_routes(&links, &registry).unwrap_err();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].label, "Brouillons");
    }

    #[test]
    fn test_leaves_flattens_groups() {
        let flat = leaves(&NAV_LINKS);
        assert_eq!(flat.len(), 10);
        assert!(flat.iter().any(|l| l.url == "/recherche/projet-de-these"));
    }
}
