//! Static customer-support reference content.
//!
//! The content is a single YAML document compiled into the binary. Deployments
//! can replace it at startup with `PARCEL_DESK_CONTENT_PATH`; it is parsed once
//! and read-only afterwards. Sections whose inner shape is only ever echoed back
//! to the caller stay as JSON values, everything the lookups compute on is
//! typed so a malformed override fails at startup instead of mid-conversation.

mod lookup;

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

pub use lookup::{
    AccountHelpArgs, ContactInfoArgs, LoyaltyInfoArgs, PaymentInfoArgs, ProductCareArgs,
    ReturnPolicyArgs, ShippingInfoArgs, SizeGuideArgs, SupportInfoArgs, WarrantyInfoArgs,
};

/// The content shipped with the binary.
const EMBEDDED: &str = include_str!("support.yaml");

/// Errors loading support content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read support content from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid support content: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid support content: {0}")]
    Invalid(String),
}

/// A JSON object echoed back verbatim.
pub(crate) type Section = Map<String, Value>;

/// All reference content served by the information tools.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportContent {
    pub(crate) support_topics: SupportTopics,
    pub(crate) return_policy: ReturnPolicyContent,
    pub(crate) shipping: ShippingContent,
    pub(crate) contact: ContactContent,
    pub(crate) size_guide: SizeGuideContent,
    pub(crate) warranty: WarrantyContent,
    pub(crate) payment: LayeredContent,
    pub(crate) account_help: LayeredContent,
    pub(crate) loyalty: LayeredContent,
    pub(crate) product_care: ProductCareContent,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SupportTopics {
    pub general: Topic,
    #[serde(flatten)]
    pub others: BTreeMap<String, Topic>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Topic {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReturnPolicyContent {
    pub general_policy: Section,
    pub helpful_tips: Vec<String>,
    pub escalation_triggers: Vec<String>,
    pub categories: BTreeMap<String, Section>,
    /// Notes containing a `{category}` placeholder.
    pub customer_service_notes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ShippingContent {
    pub domestic_options: Section,
    pub processing_time: String,
    pub cutoff_times: Section,
    pub shipping_restrictions: Vec<String>,
    pub domestic_countries: Vec<String>,
    #[serde(default)]
    pub country_aliases: BTreeMap<String, String>,
    pub international: BTreeMap<String, Section>,
    pub international_unavailable: String,
    pub international_notes: Vec<String>,
    /// Read from `domestic_options.free_shipping.threshold` after parsing.
    #[serde(skip)]
    pub free_shipping_threshold: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContactContent {
    pub general_contact: Section,
    pub self_service_options: Vec<String>,
    pub customer_service_tips: Vec<String>,
    pub departments: BTreeMap<String, Department>,
    pub urgency: BTreeMap<String, Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Department {
    pub department: String,
    pub phone: String,
    pub email: String,
    pub hours: String,
    #[serde(flatten)]
    pub extra: Section,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SizeGuideContent {
    pub measuring_instructions: Section,
    pub fitting_tips: Vec<String>,
    pub exchange_policy: String,
    pub charts: BTreeMap<String, Section>,
    #[serde(default)]
    pub product_notes: BTreeMap<String, Vec<String>>,
    /// Note with a `{brand}` placeholder.
    pub brand_note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WarrantyContent {
    pub categories: BTreeMap<String, WarrantyTerms>,
    pub default_duration_days: i64,
    pub claim_process: Vec<String>,
    pub satisfaction_guarantee: String,
    pub customer_service_notes: Vec<String>,
    pub date_error: String,
    pub future_date_error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WarrantyTerms {
    pub standard_warranty: String,
    pub duration_days: i64,
    pub coverage: Vec<String>,
    pub exclusions: Vec<String>,
    #[serde(flatten)]
    pub extra: Section,
}

/// Base sections plus inquiry-specific sections merged on top.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LayeredContent {
    pub base: Section,
    #[serde(default)]
    pub variants: BTreeMap<String, Section>,
    /// Inquiries answered by repeating a base section under a new key.
    #[serde(default)]
    pub mirrors: BTreeMap<String, Mirror>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Mirror {
    pub section: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductCareContent {
    pub base: Section,
    /// Category, then material, then care instructions.
    pub categories: BTreeMap<String, Section>,
}

impl SupportContent {
    /// The content compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded document is malformed.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_yaml(EMBEDDED)
    }

    /// Load the override at `path`, or the embedded content when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the
    /// expected structure.
    pub fn load(path: Option<&Path>) -> Result<Self, ContentError> {
        let Some(path) = path else {
            return Self::embedded();
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let content = Self::from_yaml(&raw)?;
        info!(path = %path.display(), "Loaded support content override");
        Ok(content)
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the expected structure.
    pub fn from_yaml(raw: &str) -> Result<Self, ContentError> {
        let mut content: Self = serde_yaml::from_str(raw)?;
        content.shipping.free_shipping_threshold = content.read_free_shipping_threshold()?;
        Ok(content)
    }

    fn read_free_shipping_threshold(&self) -> Result<Decimal, ContentError> {
        let threshold = self
            .shipping
            .domestic_options
            .get("free_shipping")
            .and_then(|free| free.get("threshold"))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                ContentError::Invalid(
                    "shipping.domestic_options.free_shipping.threshold must be a number".into(),
                )
            })?;

        Decimal::try_from(threshold).map_err(|e| {
            ContentError::Invalid(format!("free shipping threshold {threshold}: {e}"))
        })
    }
}

/// Lower-case a caller-supplied key and join words with underscores.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let content = SupportContent::embedded().unwrap();
        assert_eq!(content.support_topics.general.title, "How can I help you?");
        assert_eq!(content.shipping.free_shipping_threshold, Decimal::from(75));
        assert_eq!(content.return_policy.helpful_tips.len(), 4);
        assert_eq!(content.return_policy.escalation_triggers.len(), 3);
    }

    #[test]
    fn test_missing_threshold_rejected() {
        let raw = EMBEDDED.replace("      threshold: 75.00\n", "");
        let err = SupportContent::from_yaml(&raw).unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = SupportContent::from_yaml("support_topics: [").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SupportContent::load(Some(Path::new("/nonexistent/support.yaml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/support.yaml"));
    }

    #[test]
    fn test_load_defaults_to_embedded() {
        let content = SupportContent::load(None).unwrap();
        assert!(content.contact.departments.contains_key("billing"));
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  United Kingdom "), "united_kingdom");
        assert_eq!(normalize_key("custom-items"), "custom_items");
        assert_eq!(normalize_key("UK"), "uk");
        assert_eq!(normalize_key(""), "");
    }
}
