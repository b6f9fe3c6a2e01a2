//! Palette of draggable resource templates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource category of a template or node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Network,
    #[serde(rename = "IAM")]
    Iam,
    Compute,
    Storage,
}

impl Category {
    /// All categories in palette display order.
    pub const ALL: [Category; 4] = [
        Category::Network,
        Category::Iam,
        Category::Compute,
        Category::Storage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Network => "Network",
            Category::Iam => "IAM",
            Category::Compute => "Compute",
            Category::Storage => "Storage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable palette entry.
///
/// Field names on the wire are `category`, `label` and `iconKey`; the older
/// `type` and `iconName` spellings are accepted when parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(alias = "type")]
    pub category: Category,
    pub label: String,
    #[serde(alias = "iconName")]
    pub icon_key: String,
}

impl Template {
    pub fn new(category: Category, label: impl Into<String>, icon_key: impl Into<String>) -> Self {
        Self {
            category,
            label: label.into(),
            icon_key: icon_key.into(),
        }
    }
}

/// Templates of one category, in catalog order.
#[derive(Debug)]
pub struct PaletteGroup<'a> {
    pub category: Category,
    pub templates: Vec<&'a Template>,
}

/// Read-only template catalog.
#[derive(Clone, Debug)]
pub struct Palette {
    templates: Vec<Template>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(vec![
            Template::new(Category::Network, "Firewall Rule", "ShieldCheck"),
            Template::new(Category::Network, "VPC Network", "Network"),
            Template::new(Category::Iam, "Service Account", "Key"),
            Template::new(Category::Compute, "VM Instance", "Cpu"),
            Template::new(Category::Storage, "Cloud Bucket", "HardDrive"),
        ])
    }
}

impl Palette {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Look up a template by its label.
    pub fn find(&self, label: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.label == label)
    }

    /// Templates grouped by category, in [`Category::ALL`] order.
    ///
    /// Categories without templates are left out.
    pub fn groups(&self) -> Vec<PaletteGroup<'_>> {
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let templates: Vec<&Template> = self
                    .templates
                    .iter()
                    .filter(|t| t.category == category)
                    .collect();
                if templates.is_empty() {
                    None
                } else {
                    Some(PaletteGroup { category, templates })
                }
            })
            .collect()
    }
}
