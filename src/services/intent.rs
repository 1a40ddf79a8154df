use serde::{Deserialize, Serialize};
use std::fmt;

/// Topical category of a free-text prompt, used only for routing to canned
/// content. A closed set; classification always lands on exactly one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    HyperlocalAnalysis,
    SentimentAnalysis,
    WeddingIntelligence,
    CorporateStrategy,
    CompetitiveIntelligence,
    DemandForecasting,
    InventoryOptimization,
    SalesPerformance,
    TrendAnalysis,
    PremiumPositioning,
    /// Default when no keyword list matches.
    StrategicConsulting,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::HyperlocalAnalysis => "hyperlocal-analysis",
            Intent::SentimentAnalysis => "sentiment-analysis",
            Intent::WeddingIntelligence => "wedding-intelligence",
            Intent::CorporateStrategy => "corporate-strategy",
            Intent::CompetitiveIntelligence => "competitive-intelligence",
            Intent::DemandForecasting => "demand-forecasting",
            Intent::InventoryOptimization => "inventory-optimization",
            Intent::SalesPerformance => "sales-performance",
            Intent::TrendAnalysis => "trend-analysis",
            Intent::PremiumPositioning => "premium-positioning",
            Intent::StrategicConsulting => "strategic-consulting",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Keyword table walked top to bottom. Order is a product decision: when a
/// prompt matches several lists, the first one in this table wins.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::HyperlocalAnalysis,
        &[
            "hyperlocal",
            "local",
            "shivajinagar",
            "pune",
            "area",
            "location",
            "nearby",
        ],
    ),
    (
        Intent::SentimentAnalysis,
        &[
            "sentiment",
            "customer feedback",
            "reviews",
            "satisfaction",
            "opinion",
        ],
    ),
    (
        Intent::WeddingIntelligence,
        &[
            "wedding", "sherwani", "bandhgala", "ethnic", "marriage", "groom", "bride",
        ],
    ),
    (
        Intent::CorporateStrategy,
        &[
            "corporate",
            "business",
            "b2b",
            "bulk",
            "office",
            "professional",
            "it sector",
        ],
    ),
    (
        Intent::CompetitiveIntelligence,
        &[
            "competitor",
            "competition",
            "manyavar",
            "allen solly",
            "cotton king",
            "vs",
        ],
    ),
    (
        Intent::DemandForecasting,
        &[
            "forecast",
            "predict",
            "demand",
            "future",
            "next month",
            "upcoming",
        ],
    ),
    (
        Intent::InventoryOptimization,
        &["inventory", "stock", "optimize", "allocation", "mix"],
    ),
    (
        Intent::SalesPerformance,
        &["sales", "performance", "revenue", "growth", "metrics"],
    ),
    (
        Intent::TrendAnalysis,
        &["trend", "fashion", "style", "trending", "popular"],
    ),
    (
        Intent::PremiumPositioning,
        &["premium", "luxury", "high-end", "quality", "positioning"],
    ),
];

/// Classify a free-text prompt. Pure function of the input and the static
/// keyword table; never fails. No match is not an error, it is the default
/// label.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();

    for (intent, keywords) in INTENT_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *intent;
        }
    }

    Intent::StrategicConsulting
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_input_gets_exactly_one_label() {
        assert_eq!(classify(""), Intent::StrategicConsulting);
        assert_eq!(classify("   "), Intent::StrategicConsulting);
        assert_eq!(classify("tell me something"), Intent::StrategicConsulting);
        assert_eq!(classify("WEDDING plans"), Intent::WeddingIntelligence);
    }

    #[test]
    fn first_table_entry_wins_on_multiple_matches() {
        // Each keyword alone routes to its own label...
        assert_eq!(classify("sherwani stock levels?"), Intent::WeddingIntelligence);
        assert_eq!(classify("corporate partnerships"), Intent::CorporateStrategy);
        // ...and a prompt matching both resolves to the earlier table entry.
        assert_eq!(
            classify("corporate wedding packages"),
            Intent::WeddingIntelligence
        );

        assert_eq!(classify("nearby stores"), Intent::HyperlocalAnalysis);
        assert_eq!(classify("customer sentiment"), Intent::SentimentAnalysis);
        assert_eq!(
            classify("local customer sentiment"),
            Intent::HyperlocalAnalysis
        );
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(classify("ForeCast next quarter"), Intent::DemandForecasting);
        assert_eq!(classify("what is trending now"), Intent::TrendAnalysis);
        assert_eq!(classify("revenue numbers"), Intent::SalesPerformance);
    }

    #[test]
    fn labels_serialize_as_kebab_case() {
        let value = serde_json::to_value(Intent::HyperlocalAnalysis).expect("serialize");
        assert_eq!(value, "hyperlocal-analysis");
        assert_eq!(Intent::StrategicConsulting.label(), "strategic-consulting");
    }
}
