//! Support-information tools.
//!
//! All of these are read-only lookups over the static support content.

use serde_json::{Value, json};

use super::{SUPPORT_DOMAIN, Tool, ToolAnnotations};

fn support_tool(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
        annotations: ToolAnnotations::READ_ONLY,
        domain: Some(SUPPORT_DOMAIN.to_string()),
    }
}

/// Get all support-information tools.
#[must_use]
pub fn support_tools() -> Vec<Tool> {
    vec![
        support_tool(
            "get_support_info",
            "Get an overview of a help topic. Use this first when unsure what the customer needs.",
            json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "enum": ["general", "returns", "shipping", "contact"],
                        "description": "Help topic (default 'general')"
                    }
                }
            }),
        ),
        support_tool(
            "get_return_policy",
            "Get the return policy: return windows, item conditions, refund timing, tips and \
             when to escalate. Category rules are added for known categories.",
            json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Product category (electronics, clothing, books, custom_items)"
                    }
                }
            }),
        ),
        support_tool(
            "get_shipping_info",
            "Get shipping options, costs, processing and cutoff times. Checks free-shipping \
             eligibility for an order value and gives international rates for a destination.",
            json!({
                "type": "object",
                "properties": {
                    "order_value": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Order subtotal in USD"
                    },
                    "destination_country": {
                        "type": "string",
                        "description": "Destination country (e.g., 'canada', 'UK')"
                    }
                }
            }),
        ),
        support_tool(
            "get_contact_information",
            "Get contact channels and hours. Routes to a specialist department for an issue \
             type and recommends a channel for an urgency level.",
            json!({
                "type": "object",
                "properties": {
                    "issue_type": {
                        "type": "string",
                        "description": "Kind of issue (billing, technical, returns, shipping)"
                    },
                    "urgency": {
                        "type": "string",
                        "enum": ["low", "medium", "high", "emergency"],
                        "description": "How urgent the issue is"
                    }
                }
            }),
        ),
        support_tool(
            "get_size_guide",
            "Get measuring instructions, fitting tips and, for known product types, the size \
             chart.",
            json!({
                "type": "object",
                "properties": {
                    "product_type": {
                        "type": "string",
                        "description": "Product type (shirts, pants, shoes, dresses)"
                    },
                    "brand": {
                        "type": "string",
                        "description": "Brand name, if the customer mentioned one"
                    }
                },
                "required": ["product_type"]
            }),
        ),
        support_tool(
            "get_warranty_information",
            "Get warranty coverage, exclusions and the claim process. With a purchase date, \
             reports whether the warranty is still active and when it expires.",
            json!({
                "type": "object",
                "properties": {
                    "product_category": {
                        "type": "string",
                        "description": "Product category (electronics, appliances, furniture, clothing)"
                    },
                    "purchase_date": {
                        "type": "string",
                        "format": "date",
                        "description": "Purchase date as YYYY-MM-DD"
                    }
                },
                "required": ["product_category"]
            }),
        ),
        support_tool(
            "get_product_care_info",
            "Get care and cleaning instructions for a product category, or for one material \
             within it.",
            json!({
                "type": "object",
                "properties": {
                    "product_category": {
                        "type": "string",
                        "description": "Product category (clothing, electronics, furniture, shoes)"
                    },
                    "material": {
                        "type": "string",
                        "description": "Material or product kind (e.g., 'cotton', 'silk', 'laptops', 'wood')"
                    }
                },
                "required": ["product_category"]
            }),
        ),
        support_tool(
            "get_payment_information",
            "Get accepted payment methods and billing details, plus security or \
             troubleshooting information when asked.",
            json!({
                "type": "object",
                "properties": {
                    "inquiry_type": {
                        "type": "string",
                        "enum": ["methods", "billing", "security", "issues"],
                        "description": "What the customer wants to know"
                    }
                }
            }),
        ),
        support_tool(
            "get_account_help",
            "Get help with account problems: sign-in, passwords, registration, profile, \
             security settings and order history.",
            json!({
                "type": "object",
                "properties": {
                    "issue_type": {
                        "type": "string",
                        "description": "Kind of account issue (login, password, registration, profile, security, orders)"
                    }
                },
                "required": ["issue_type"]
            }),
        ),
        support_tool(
            "get_loyalty_program_info",
            "Get VIP Rewards Program details: how points are earned and redeemed, enrollment, \
             benefits and tiers.",
            json!({
                "type": "object",
                "properties": {
                    "inquiry_type": {
                        "type": "string",
                        "enum": ["enrollment", "benefits", "points", "tiers"],
                        "description": "What the customer wants to know"
                    }
                }
            }),
        ),
    ]
}
