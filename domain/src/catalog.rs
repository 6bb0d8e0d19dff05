use crate::models::MenuItem;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Menu grouped by category, in the order the server listed the categories.
///
/// Wire form is a JSON object `{ "bebida": [..], "entrada": [..] }`; it is
/// decoded entry by entry so the server's key order survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sections: Vec<(String, Vec<MenuItem>)>,
}

impl Catalog {
    pub fn new(sections: Vec<(String, Vec<MenuItem>)>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    pub fn sections(&self) -> &[(String, Vec<MenuItem>)] {
        &self.sections
    }

    /// Looks an item up across every category.
    pub fn find(&self, item_id: i64) -> Option<&MenuItem> {
        self.sections
            .iter()
            .flat_map(|(_, items)| items.iter())
            .find(|item| item.id == item_id)
    }

    /// Sections visible under `filter`, catalog order and item order untouched.
    pub fn visible<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = (&'a str, &'a [MenuItem])> + 'a {
        self.sections
            .iter()
            .filter(move |(name, _)| filter.admits(name))
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to menu items")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Catalog, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sections = Vec::with_capacity(map.size_hint().unwrap_or(4));
                while let Some((name, items)) = map.next_entry::<String, Vec<MenuItem>>()? {
                    sections.push((name, items));
                }
                Ok(Catalog { sections })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Which categories the menu screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"todas"` is the "all categories" selector; anything else names one.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("todas") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }

    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => name == category,
        }
    }
}

/// Human label for a category key.
pub fn category_label(category: &str) -> &str {
    match category {
        "entrada" => "Entradas",
        "prato_principal" => "Pratos Principais",
        "bebida" => "Bebidas",
        "sobremesa" => "Sobremesas",
        other => other,
    }
}
