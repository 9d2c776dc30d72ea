//! The ten information lookups.
//!
//! Each lookup always returns its base sections and adds sections that depend
//! on the arguments. Unknown categories, topics and inquiry types are not
//! errors: the caller just gets the general answer.

use chrono::{NaiveDate, TimeDelta};
use parcel_desk_core::{CurrencyCode, Price, SupportError};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{LayeredContent, Section, SupportContent, normalize_key};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DURATION_ERROR: &str =
    "Warranty coverage could not be calculated for this product. Please contact support.";

// =============================================================================
// Arguments
// =============================================================================

/// Arguments for `get_support_info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportInfoArgs {
    #[serde(default)]
    pub topic: Option<String>,
}

/// Arguments for `get_return_policy`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnPolicyArgs {
    #[serde(default)]
    pub category: Option<String>,
}

/// Arguments for `get_shipping_info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingInfoArgs {
    #[serde(default)]
    pub order_value: Option<Decimal>,
    #[serde(default)]
    pub destination_country: Option<String>,
}

/// Arguments for `get_contact_information`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInfoArgs {
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

/// Arguments for `get_size_guide`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SizeGuideArgs {
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Arguments for `get_warranty_information`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarrantyInfoArgs {
    #[serde(default)]
    pub product_category: String,
    #[serde(default)]
    pub purchase_date: Option<String>,
}

/// Arguments for `get_product_care_info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductCareArgs {
    #[serde(default)]
    pub product_category: String,
    #[serde(default)]
    pub material: Option<String>,
}

/// Arguments for `get_payment_information`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentInfoArgs {
    #[serde(default)]
    pub inquiry_type: Option<String>,
}

/// Arguments for `get_account_help`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountHelpArgs {
    #[serde(default)]
    pub issue_type: String,
}

/// Arguments for `get_loyalty_program_info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoyaltyInfoArgs {
    #[serde(default)]
    pub inquiry_type: Option<String>,
}

// =============================================================================
// Lookups
// =============================================================================

impl SupportContent {
    /// Overview of a help topic; unknown topics get the general overview.
    #[must_use]
    pub fn support_info(&self, args: &SupportInfoArgs) -> Value {
        let key = optional_key(args.topic.as_deref()).unwrap_or_default();
        let topics = &self.support_topics;
        let (topic, entry) = match topics.others.get(&key) {
            Some(entry) => (key.as_str(), entry),
            None => ("general", &topics.general),
        };

        json!({
            "topic": topic,
            "title": entry.title,
            "content": entry.content,
        })
    }

    /// Return policy, with category rules when the category is known.
    #[must_use]
    pub fn return_policy(&self, args: &ReturnPolicyArgs) -> Value {
        let policy = &self.return_policy;
        let mut out = Map::new();
        out.insert("general_policy".into(), Value::Object(policy.general_policy.clone()));
        out.insert("helpful_tips".into(), json!(policy.helpful_tips));
        out.insert("escalation_triggers".into(), json!(policy.escalation_triggers));

        if let Some(category) = optional_key(args.category.as_deref())
            && let Some(rules) = policy.categories.get(&category)
        {
            let notes: Vec<String> = policy
                .customer_service_notes
                .iter()
                .map(|note| note.replace("{category}", &category))
                .collect();
            out.insert("category_specific".into(), Value::Object(rules.clone()));
            out.insert("customer_service_notes".into(), json!(notes));
        }

        Value::Object(out)
    }

    /// Shipping options, free-shipping eligibility and international rates.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`] for a negative order value.
    pub fn shipping_info(&self, args: &ShippingInfoArgs) -> Result<Value, SupportError> {
        let shipping = &self.shipping;
        let mut out = Map::new();
        out.insert("domestic_options".into(), Value::Object(shipping.domestic_options.clone()));
        out.insert("processing_time".into(), json!(shipping.processing_time));
        out.insert("cutoff_times".into(), Value::Object(shipping.cutoff_times.clone()));
        out.insert("shipping_restrictions".into(), json!(shipping.shipping_restrictions));

        if let Some(order_value) = args.order_value {
            if order_value.is_sign_negative() {
                return Err(SupportError::invalid("order_value must not be negative"));
            }
            let threshold = shipping.free_shipping_threshold;
            let eligible = order_value >= threshold;
            let guidance = if eligible {
                format!(
                    "Great news! This order of {} qualifies for free shipping.",
                    usd(order_value)
                )
            } else {
                format!(
                    "Add {} more to qualify for free shipping.",
                    usd(threshold - order_value)
                )
            };
            out.insert("free_shipping_eligible".into(), json!(eligible));
            out.insert("customer_guidance".into(), json!(guidance));
        }

        if let Some(country) = optional_key(args.destination_country.as_deref()) {
            let country = shipping
                .country_aliases
                .get(&country)
                .cloned()
                .unwrap_or(country);
            if !shipping.domestic_countries.contains(&country) {
                let rates = shipping.international.get(&country).map_or_else(
                    || json!(shipping.international_unavailable),
                    |rates| Value::Object(rates.clone()),
                );
                out.insert("international_shipping".into(), rates);
                out.insert("international_notes".into(), json!(shipping.international_notes));
            }
        }

        Ok(Value::Object(out))
    }

    /// Contact channels, routed by issue type and urgency when given.
    #[must_use]
    pub fn contact_information(&self, args: &ContactInfoArgs) -> Value {
        let contact = &self.contact;
        let mut out = Map::new();
        out.insert("general_contact".into(), Value::Object(contact.general_contact.clone()));
        out.insert("self_service_options".into(), json!(contact.self_service_options));
        out.insert("customer_service_tips".into(), json!(contact.customer_service_tips));

        if let Some(issue) = optional_key(args.issue_type.as_deref())
            && let Some(department) = contact.departments.get(&issue)
        {
            let advice = format!(
                "For {} issues, contact {} at {} or {} ({}).",
                issue.replace('_', " "),
                department.department,
                department.phone,
                department.email,
                department.hours
            );
            out.insert("specialized_contact".into(), json!(department));
            out.insert("routing_advice".into(), json!(advice));
        }

        if let Some(urgency) = optional_key(args.urgency.as_deref())
            && let Some(guidance) = contact.urgency.get(&urgency)
        {
            out.insert("urgency_guidance".into(), Value::Object(guidance.clone()));
        }

        Value::Object(out)
    }

    /// Measuring help and, for known product types, the size chart.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`] when `product_type` is blank.
    pub fn size_guide(&self, args: &SizeGuideArgs) -> Result<Value, SupportError> {
        let product = required_key("product_type", &args.product_type)?;
        let guide = &self.size_guide;
        let mut out = Map::new();
        out.insert(
            "measuring_instructions".into(),
            Value::Object(guide.measuring_instructions.clone()),
        );
        out.insert("fitting_tips".into(), json!(guide.fitting_tips));
        out.insert("exchange_policy".into(), json!(guide.exchange_policy));

        // "shirt" and "shirts" both resolve to the shirts chart.
        let plural = format!("{product}s");
        let chart_key = [product.as_str(), plural.as_str()]
            .into_iter()
            .find(|key| guide.charts.contains_key(*key));
        if let Some(key) = chart_key
            && let Some(chart) = guide.charts.get(key)
        {
            let notes = guide.product_notes.get(key).cloned().unwrap_or_default();
            out.insert("size_chart".into(), Value::Object(chart.clone()));
            out.insert("product_specific_notes".into(), json!(notes));
        }

        if let Some(brand) = args.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            out.insert("brand_note".into(), json!(guide.brand_note.replace("{brand}", brand)));
        }

        Ok(Value::Object(out))
    }

    /// Warranty terms and, given a purchase date, the remaining coverage.
    ///
    /// `today` is the date coverage is measured against.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`] when `product_category` is
    /// blank. A malformed purchase date is reported inside the result.
    pub fn warranty_information(
        &self,
        args: &WarrantyInfoArgs,
        today: NaiveDate,
    ) -> Result<Value, SupportError> {
        let category = required_key("product_category", &args.product_category)?;
        let warranty = &self.warranty;
        let terms = warranty.categories.get(&category);

        let mut out = Map::new();
        if let Some(terms) = terms {
            out.insert("warranty_terms".into(), json!(terms));
        }
        out.insert("claim_process".into(), json!(warranty.claim_process));
        out.insert("satisfaction_guarantee".into(), json!(warranty.satisfaction_guarantee));
        out.insert("customer_service_notes".into(), json!(warranty.customer_service_notes));

        if let Some(raw) = args.purchase_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(purchased) if purchased > today => {
                    out.insert("date_error".into(), json!(warranty.future_date_error));
                }
                Ok(purchased) => {
                    let duration = terms.map_or(warranty.default_duration_days, |t| t.duration_days);
                    match warranty_status(purchased, duration, today) {
                        Some(status) => {
                            out.insert("warranty_status".into(), status);
                        }
                        None => {
                            out.insert("date_error".into(), json!(DURATION_ERROR));
                        }
                    }
                }
                Err(_) => {
                    out.insert("date_error".into(), json!(warranty.date_error));
                }
            }
        }

        Ok(Value::Object(out))
    }

    /// Care guidance for a product category and, optionally, a material.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`] when `product_category` is
    /// blank.
    pub fn product_care(&self, args: &ProductCareArgs) -> Result<Value, SupportError> {
        let category = required_key("product_category", &args.product_category)?;
        let care = &self.product_care;
        let mut out = care.base.clone();

        if let Some(materials) = care.categories.get(&category) {
            let specific = optional_key(args.material.as_deref())
                .and_then(|material| materials.get(&material));
            match specific {
                Some(instructions) => {
                    out.insert("specific_care".into(), instructions.clone());
                }
                None => {
                    out.insert("care_options".into(), Value::Object(materials.clone()));
                }
            }
        }

        Ok(Value::Object(out))
    }

    /// Payment methods and billing, plus the requested inquiry's details.
    #[must_use]
    pub fn payment_information(&self, args: &PaymentInfoArgs) -> Value {
        layered(&self.payment, optional_key(args.inquiry_type.as_deref()))
    }

    /// Account troubleshooting for an issue type.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`] when `issue_type` is blank.
    pub fn account_help(&self, args: &AccountHelpArgs) -> Result<Value, SupportError> {
        let issue = required_key("issue_type", &args.issue_type)?;
        Ok(layered(&self.account_help, Some(issue)))
    }

    /// Loyalty program overview, plus the requested inquiry's details.
    #[must_use]
    pub fn loyalty_program_info(&self, args: &LoyaltyInfoArgs) -> Value {
        layered(&self.loyalty, optional_key(args.inquiry_type.as_deref()))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn optional_key(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_key).filter(|key| !key.is_empty())
}

fn required_key(field: &str, raw: &str) -> Result<String, SupportError> {
    optional_key(Some(raw)).ok_or_else(|| SupportError::invalid(format!("{field} is required")))
}

fn usd(amount: Decimal) -> Price {
    Price::new(amount, CurrencyCode::USD)
}

fn layered(content: &LayeredContent, inquiry: Option<String>) -> Value {
    let mut out: Section = content.base.clone();
    let Some(inquiry) = inquiry else {
        return Value::Object(out);
    };

    if let Some(variant) = content.variants.get(&inquiry) {
        out.extend(variant.clone());
    }
    if let Some(mirror) = content.mirrors.get(&inquiry)
        && let Some(section) = content.base.get(&mirror.source)
    {
        out.insert(mirror.section.clone(), section.clone());
    }
    Value::Object(out)
}

/// `None` when the coverage period does not fit the calendar.
fn warranty_status(purchased: NaiveDate, duration_days: i64, today: NaiveDate) -> Option<Value> {
    let days_since = (today - purchased).num_days();
    let days_remaining = duration_days.saturating_sub(days_since).max(0);
    let expires = purchased.checked_add_signed(TimeDelta::try_days(duration_days)?)?;
    let status = if days_remaining > 0 { "active" } else { "expired" };

    Some(json!({
        "days_since_purchase": days_since,
        "days_remaining": days_remaining,
        "status": status,
        "expiration_date": expires.format(DATE_FORMAT).to_string(),
    }))
}
