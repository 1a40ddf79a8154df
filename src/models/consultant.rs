use serde::{Deserialize, Serialize};

use crate::services::intent::Intent;

/// A named market trend from the static trend table, matched against
/// consultant prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendData {
    pub id: String,
    pub name: String,
    pub category: String,
    pub generation: Vec<String>,
    pub growth: f64,
    pub confidence: f64,
    pub description: String,
    pub matched_products: u32,
    pub forecasted_impact: f64,
    pub tags: Vec<String>,
}

impl TrendData {
    /// Ranking score used when picking the most relevant trends for a prompt.
    pub fn score(&self) -> f64 {
        self.growth * (self.confidence / 100.0) * self.forecasted_impact
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Quick,
    Moderate,
    Complex,
}

/// One step of the generated action plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub effort: Effort,
    pub impact: i64,
    pub timeline: String,
}

/// Headline projection attached to every consultant response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub metric: String,
    pub predicted: f64,
    pub confidence: u32,
    pub timeframe: String,
    pub factors: Vec<String>,
}

/// Full strategic response for one consultant prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantResponse {
    pub query: String,
    pub intent: Intent,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub forecast: Forecast,
    pub trends: Vec<TrendData>,
    pub actions: Vec<ActionPlan>,
}
