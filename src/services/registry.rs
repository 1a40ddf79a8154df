use serde_json::{json, Value};

/// The closed set of analysis functions the assistant can run. Each variant
/// carries a canned structured result; there is no real computation behind
/// any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFunction {
    SalesPerformance,
    DemandForecast,
    HyperlocalInsights,
    CustomerSentiment,
    MarketTrends,
    InventoryMix,
}

impl AnalysisFunction {
    /// Dispatch order. Earlier entries win when a prompt matches several.
    pub const ALL: [AnalysisFunction; 6] = [
        AnalysisFunction::SalesPerformance,
        AnalysisFunction::DemandForecast,
        AnalysisFunction::HyperlocalInsights,
        AnalysisFunction::CustomerSentiment,
        AnalysisFunction::MarketTrends,
        AnalysisFunction::InventoryMix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisFunction::SalesPerformance => "analyze_sales_performance",
            AnalysisFunction::DemandForecast => "predict_demand_forecast",
            AnalysisFunction::HyperlocalInsights => "hyperlocal_insights",
            AnalysisFunction::CustomerSentiment => "analyze_customer_sentiment",
            AnalysisFunction::MarketTrends => "research_market_trends",
            AnalysisFunction::InventoryMix => "optimize_inventory_mix",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnalysisFunction::SalesPerformance => {
                "Deep dive analysis of sales metrics, trends, and performance indicators"
            }
            AnalysisFunction::DemandForecast => {
                "AI-powered demand forecasting for inventory planning"
            }
            AnalysisFunction::HyperlocalInsights => {
                "Location-specific insights and market dynamics"
            }
            AnalysisFunction::CustomerSentiment => {
                "Customer sentiment analysis from reviews and feedback"
            }
            AnalysisFunction::MarketTrends => {
                "Comprehensive market research and competitor analysis"
            }
            AnalysisFunction::InventoryMix => {
                "Optimize inventory allocation based on trends and demand"
            }
        }
    }

    /// Loose match rule: the lowercased prompt contains either the function
    /// name with underscores as spaces, or the first three words of the
    /// description. Deliberately no smarter than that.
    fn matches(&self, lower_prompt: &str) -> bool {
        let spaced_name = self.name().replace('_', " ");
        if lower_prompt.contains(&spaced_name) {
            return true;
        }

        let prefix = self
            .description()
            .to_lowercase()
            .split_whitespace()
            .take(3)
            .collect::<Vec<_>>()
            .join(" ");
        lower_prompt.contains(&prefix)
    }

    /// Canned structured result for this function.
    pub fn execute(&self) -> Value {
        match self {
            AnalysisFunction::SalesPerformance => json!({
                "analysis": "Raymond Shivajinagar showing strong performance with 18.5% revenue growth",
                "key_metrics": {
                    "monthly_revenue": "₹28.5L",
                    "avg_order_value": "₹8,750",
                    "conversion_rate": "4.8%",
                    "custom_tailoring_orders": 145
                },
                "trends": [
                    "Wedding season driving ethnic wear sales",
                    "Corporate formal wear steady growth"
                ],
                "recommendations": [
                    "Focus on premium wedding packages",
                    "Expand corporate partnerships"
                ]
            }),
            AnalysisFunction::DemandForecast => json!({
                "forecast": {
                    "next_month": "+22% increase in wedding wear",
                    "next_quarter": "+15% overall growth",
                    "seasonal_peaks": ["Nov-Feb wedding season", "Aug-Sep festive season"]
                },
                "recommendations": [
                    "Increase sherwani inventory by 30%",
                    "Stock premium fabrics for custom orders",
                    "Prepare for corporate bulk orders"
                ]
            }),
            AnalysisFunction::HyperlocalInsights => json!({
                "location": "Shivajinagar, Pune",
                "demographics": { "millennials": 52, "gen_x": 35, "gen_z": 13 },
                "local_trends": [
                    "IT professionals driving formal wear demand",
                    "Wedding season premium positioning success",
                    "Custom tailoring services highly valued"
                ],
                "competitor_activity": "Allen Solly nearby, Manyavar expanding",
                "opportunities": ["Corporate partnerships", "Wedding packages", "Premium positioning"]
            }),
            AnalysisFunction::CustomerSentiment => json!({
                "overall_sentiment": 91,
                "categories": {
                    "custom_tailoring": { "sentiment": 94, "mentions": 1240 },
                    "wedding_collection": { "sentiment": 89, "mentions": 890 },
                    "formal_wear": { "sentiment": 87, "mentions": 2100 },
                    "store_experience": { "sentiment": 92, "mentions": 1560 }
                },
                "insights": [
                    "Custom tailoring receiving highest praise",
                    "Wedding collection quality appreciated",
                    "Store service excellence recognized"
                ]
            }),
            AnalysisFunction::MarketTrends => json!({
                "market_size": "₹45,000 Cr (Premium Menswear)",
                "growth_rate": "12% CAGR",
                "key_trends": [
                    "Premium positioning gaining traction",
                    "Custom tailoring demand increasing",
                    "Wedding market expanding",
                    "Corporate formal wear growth"
                ],
                "competitor_analysis": {
                    "manyavar": "Leading wedding segment",
                    "allen_solly": "Strong casual-formal positioning",
                    "cotton_king": "Value segment expansion"
                }
            }),
            AnalysisFunction::InventoryMix => json!({
                "recommendations": {
                    "increase": ["Sherwanis (+30%)", "Premium fabrics (+25%)", "Business suits (+20%)"],
                    "decrease": ["Casual wear (-10%)", "Basic shirts (-15%)"],
                    "maintain": ["Accessories", "Formal trousers"]
                },
                "reasoning": [
                    "Wedding season approaching",
                    "Corporate demand steady",
                    "Premium positioning success"
                ]
            }),
        }
    }
}

/// Try to match a prompt against the registry. `None` means "no enrichment
/// available" and is a perfectly valid outcome, not an error.
pub fn dispatch(prompt: &str) -> Option<Value> {
    let lower = prompt.to_lowercase();
    AnalysisFunction::ALL
        .iter()
        .find(|f| f.matches(&lower))
        .map(AnalysisFunction::execute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_spaced_function_name() {
        let result = dispatch("please analyze sales performance for this quarter");
        let result = result.expect("should match by name");
        assert!(result["analysis"]
            .as_str()
            .expect("analysis string")
            .contains("18.5%"));
    }

    #[test]
    fn dispatch_matches_description_prefix() {
        // First three words of the demand forecast description.
        let result = dispatch("run an ai-powered demand forecasting pass");
        let result = result.expect("should match by description prefix");
        assert_eq!(result["forecast"]["next_quarter"], "+15% overall growth");
    }

    #[test]
    fn dispatch_returns_none_when_nothing_matches() {
        assert!(dispatch("what's the weather like").is_none());
        assert!(dispatch("").is_none());
    }

    #[test]
    fn dispatch_is_case_insensitive() {
        assert!(dispatch("ANALYZE SALES PERFORMANCE").is_some());
    }

    #[test]
    fn partial_name_does_not_match() {
        // Underscore form is not the advertised surface; only the spaced name is.
        assert!(dispatch("analyze_sales_performance").is_none());
    }
}
