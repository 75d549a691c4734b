use std::fmt;

use serde::Serialize;

/// Topic a free-text request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    WebDev,
    MobileDev,
    SystemDev,
    Ecommerce,
    Pricing,
    Contact,
    Timeline,
    About,
    Unmatched,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::WebDev => "web_dev",
            Intent::MobileDev => "mobile_dev",
            Intent::SystemDev => "system_dev",
            Intent::Ecommerce => "ecommerce",
            Intent::Pricing => "pricing",
            Intent::Contact => "contact",
            Intent::Timeline => "timeline",
            Intent::About => "about",
            Intent::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, checked top to bottom. The first rule with any keyword
/// contained in the lowercased utterance wins, so order decides overlaps.
pub const RULES: &[(Intent, &[&str])] = &[
    (Intent::WebDev, &["web", "sitio", "página"]),
    (Intent::MobileDev, &["app", "móvil", "mobile"]),
    (Intent::SystemDev, &["sistema", "gestión", "crm", "erp"]),
    (Intent::Ecommerce, &["ecommerce", "tienda", "e-commerce"]),
    (Intent::Pricing, &["precio", "costo", "presupuesto"]),
    (Intent::Contact, &["contacto", "teléfono", "email"]),
    (Intent::Timeline, &["tiempo", "plazo", "cuánto"]),
    (Intent::About, &["experiencia", "quién", "empresa"]),
];

/// Maps an utterance to an intent by exact substring match. Never fails:
/// anything no rule claims is [`Intent::Unmatched`].
pub fn classify(utterance: &str) -> Intent {
    let folded = utterance.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| folded.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unmatched)
}
