//! Listing record and the closed vocabularies it is built from.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// A string did not name any value of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct ParseVocabularyError {
    /// Vocabulary that was being parsed (e.g. "category").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseVocabularyError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Normalize free-form input for vocabulary lookups.
///
/// Accepts kebab-case names, display labels and snake/space separated forms:
/// `"Fine Tuning"`, `"fine_tuning"` and `"fine-tuning"` all normalize the same.
fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter_map(|c| match c {
            ' ' | '_' | '-' => None,
            c => Some(c.to_ascii_lowercase()),
        })
        .collect()
}

// ============================================================================
// Category
// ============================================================================

/// What kind of task a listed model performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Text,
    Image,
    Audio,
    Video,
    Analysis,
    Translation,
}

impl Category {
    /// Every category, in facet display order.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Image,
        Self::Audio,
        Self::Video,
        Self::Analysis,
        Self::Translation,
    ];

    /// Wire name (matches the serde representation).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Analysis => "analysis",
            Self::Translation => "translation",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text Generation",
            Self::Image => "Image Generation",
            Self::Audio => "Audio Processing",
            Self::Video => "Video Generation",
            Self::Analysis => "Data Analysis",
            Self::Translation => "Translation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|c| normalize_token(c.as_str()) == wanted || normalize_token(c.label()) == wanted)
            .ok_or_else(|| ParseVocabularyError::new("category", s))
    }
}

// ============================================================================
// Model type
// ============================================================================

/// Architecture family of a listed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
    Transformer,
    Diffusion,
    Gan,
    Cnn,
    Rnn,
    Hybrid,
}

impl ModelType {
    /// Every model type, in facet display order.
    pub const ALL: [Self; 6] = [
        Self::Transformer,
        Self::Diffusion,
        Self::Gan,
        Self::Cnn,
        Self::Rnn,
        Self::Hybrid,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transformer => "transformer",
            Self::Diffusion => "diffusion",
            Self::Gan => "gan",
            Self::Cnn => "cnn",
            Self::Rnn => "rnn",
            Self::Hybrid => "hybrid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Transformer => "Transformer",
            Self::Diffusion => "Diffusion",
            Self::Gan => "GAN",
            Self::Cnn => "CNN",
            Self::Rnn => "RNN",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelType {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|m| normalize_token(m.as_str()) == wanted)
            .ok_or_else(|| ParseVocabularyError::new("model type", s))
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Publisher of a listed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Stability,
    Meta,
    Google,
    #[serde(rename = "huggingface")]
    HuggingFace,
    Community,
}

impl Provider {
    /// Every provider, in facet display order.
    pub const ALL: [Self; 6] = [
        Self::OpenAi,
        Self::Stability,
        Self::Meta,
        Self::Google,
        Self::HuggingFace,
        Self::Community,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Stability => "stability",
            Self::Meta => "meta",
            Self::Google => "google",
            Self::HuggingFace => "huggingface",
            Self::Community => "community",
        }
    }

    /// Display label. Free-text search matches against this string.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Stability => "Stability AI",
            Self::Meta => "Meta",
            Self::Google => "Google",
            Self::HuggingFace => "Hugging Face",
            Self::Community => "Community",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Provider {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize_token(p.as_str()) == wanted || normalize_token(p.label()) == wanted)
            .ok_or_else(|| ParseVocabularyError::new("provider", s))
    }
}

// ============================================================================
// Feature tags
// ============================================================================

/// Capability tag attached to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    ApiAccess,
    FineTuning,
    OpenSource,
    Multilingual,
    RealTime,
    OnChainVerified,
}

impl Feature {
    /// Every feature tag, in facet display order.
    pub const ALL: [Self; 6] = [
        Self::ApiAccess,
        Self::FineTuning,
        Self::OpenSource,
        Self::Multilingual,
        Self::RealTime,
        Self::OnChainVerified,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiAccess => "api-access",
            Self::FineTuning => "fine-tuning",
            Self::OpenSource => "open-source",
            Self::Multilingual => "multilingual",
            Self::RealTime => "real-time",
            Self::OnChainVerified => "on-chain-verified",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ApiAccess => "API Access",
            Self::FineTuning => "Fine-tuning",
            Self::OpenSource => "Open Source",
            Self::Multilingual => "Multilingual",
            Self::RealTime => "Real-time",
            Self::OnChainVerified => "On-chain Verified",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Feature {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|t| normalize_token(t.as_str()) == wanted || normalize_token(t.label()) == wanted)
            .ok_or_else(|| ParseVocabularyError::new("feature", s))
    }
}

// ============================================================================
// Listing record
// ============================================================================

/// Reason a listing record failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingValidationError {
    #[error("Listing id cannot be empty")]
    EmptyId,

    #[error("Listing '{id}' has invalid price {price} (must be finite and >= 0)")]
    InvalidPrice { id: String, price: f64 },

    #[error("Listing '{id}' has invalid rating {rating} (must be within 0..=5)")]
    InvalidRating { id: String, rating: f64 },
}

/// One marketplace item.
///
/// `id` is assigned by the data source and never changes. `is_new` and
/// `is_hot` are advisory display flags; only `is_new` takes part in ordering
/// (the `newest` sort key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub model_type: ModelType,
    pub provider: Provider,
    /// Non-negative, currency-agnostic unit.
    pub price: f64,
    /// Within `0.0..=5.0`.
    pub rating: f64,
    pub reviews: u64,
    pub downloads: u64,
    #[serde(default)]
    pub features: BTreeSet<Feature>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_hot: bool,
    /// Publication time, when the source knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListingRecord {
    /// Check the numeric and identity invariants of a record.
    pub fn validate(&self) -> Result<(), ListingValidationError> {
        if self.id.trim().is_empty() {
            return Err(ListingValidationError::EmptyId);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ListingValidationError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ListingValidationError::InvalidRating {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        Ok(())
    }

    /// Whether the record carries at least one of the given feature tags.
    pub fn has_any_feature(&self, wanted: &BTreeSet<Feature>) -> bool {
        !self.features.is_disjoint(wanted)
    }
}
