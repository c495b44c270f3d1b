//! Core document entities
//!
//! A `TextPack` is loaded once per document and is read-only for the layout
//! engine. Annotations and links reference each other and their legends by id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `[begin, end)` range of character offsets into a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Check if this span covers no characters
    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    /// Number of characters covered (0 for malformed spans)
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Clamp into `0..=text_len`, collapsing `begin > end` onto `end`
    pub fn clamped(&self, text_len: usize) -> Span {
        let end = self.end.min(text_len);
        let begin = self.begin.min(end);
        Span { begin, end }
    }

    /// Check if `other` lies fully inside this span
    pub fn contains_span(&self, other: &Span) -> bool {
        other.begin >= self.begin && other.end <= self.end
    }
}

/// A highlighted span of text tied to a legend category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    pub span: Span,
    pub legend_id: String,

    /// Free-form attribute values, rendered in the label when selected
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Annotation {
    pub fn new(id: impl Into<String>, span: Span, legend_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            span,
            legend_id: legend_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Label text built from the attributes whose id is selected
    ///
    /// Attribute ids have the form `{legend_id}_{attribute_name}`.
    pub fn label<S: AsRef<str>>(&self, selected_attribute_ids: &[S]) -> String {
        self.attributes
            .iter()
            .filter(|(name, _)| {
                let attribute_id = attribute_id(&self.legend_id, name);
                selected_attribute_ids.iter().any(|id| id.as_ref() == attribute_id)
            })
            .map(|(_, value)| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Build the selection id for a legend attribute
pub fn attribute_id(legend_id: &str, attribute_name: &str) -> String {
    format!("{}_{}", legend_id, attribute_name)
}

/// A categorical type definition for annotations or links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub id: String,
    pub display_name: String,

    /// Assigned by the external coloring step, absent until then
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub attributes: Vec<String>,
}

/// A directed relation between two annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub from_entry_id: String,
    pub to_entry_id: String,
    pub legend_id: String,
}

impl Link {
    pub fn new(
        id: impl Into<String>,
        from_entry_id: impl Into<String>,
        to_entry_id: impl Into<String>,
        legend_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_entry_id: from_entry_id.into(),
            to_entry_id: to_entry_id.into(),
            legend_id: legend_id.into(),
        }
    }
}

/// Legend definitions, grouped by what they categorize
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Legends {
    pub annotations: Vec<Legend>,

    #[serde(default)]
    pub links: Vec<Legend>,
}

/// Input document consumed by the layout engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextPack {
    pub text: String,
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub legends: Legends,
}

impl TextPack {
    /// Check if a legend id is defined for annotations
    pub fn has_annotation_legend(&self, legend_id: &str) -> bool {
        self.legends.annotations.iter().any(|legend| legend.id == legend_id)
    }
}
