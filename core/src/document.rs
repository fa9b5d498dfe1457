use serde::{Deserialize, Serialize};

pub type DocId = u32;

/// One recipe as it appears in the source collection.
///
/// Field order here is the serialized key order of stored documents. Keys the
/// model does not know about are kept in `extra` and written after the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(rename = "desc", alias = "description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Recipe {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            directions: None,
            categories: None,
            ingredients: None,
            calories: None,
            protein: None,
            sodium: None,
            fat: None,
            date: None,
            rating: None,
            allergens: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Text of the fields that feed the category group.
    pub fn category_text(&self) -> String {
        self.categories.as_deref().map(|c| c.join(" ")).unwrap_or_default()
    }

    /// Text of the fields that feed the tag group: description, directions, ingredients.
    pub fn tag_text(&self) -> String {
        let directions = self.directions.as_deref().map(|d| d.join(" ")).unwrap_or_default();
        let ingredients = self.ingredients.as_deref().map(|i| i.join(" ")).unwrap_or_default();
        [self.description.as_deref().unwrap_or(""), directions.as_str(), ingredients.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A recipe with its positional id, as held by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    #[serde(flatten)]
    pub recipe: Recipe,
}

impl Document {
    /// Any `id` carried by the source record is dropped; the position decides.
    pub fn new(id: DocId, mut recipe: Recipe) -> Self {
        recipe.extra.remove("id");
        Self { id, recipe }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizedDocument {
    pub id: DocId,
    pub title_tokens: Vec<String>,
    pub category_tokens: Vec<String>,
    pub tag_tokens: Vec<String>,
}

impl TokenizedDocument {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id,
            title_tokens: crate::tokenizer::tokenize(&doc.recipe.title),
            category_tokens: crate::tokenizer::tokenize(&doc.recipe.category_text()),
            tag_tokens: crate::tokenizer::tokenize(&doc.recipe.tag_text()),
        }
    }
}
