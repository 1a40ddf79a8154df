use std::time::Duration;

use crate::models::query::GeneratedQuery;

/// Turns a free-text prompt into a SQL-looking query string plus a canned
/// narrative answer.
///
/// This is a rule table, not a model: patterns are checked top to bottom on
/// the lowercased prompt and both outputs are fixed strings. The delay is
/// pure pacing to simulate "generation".
#[derive(Debug, Clone)]
pub struct PromptTranslator {
    delay: Duration,
}

impl PromptTranslator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn translate(&self, prompt: &str) -> GeneratedQuery {
        tokio::time::sleep(self.delay).await;
        translate_rules(prompt)
    }
}

fn translate_rules(prompt: &str) -> GeneratedQuery {
    let p = prompt.to_lowercase();

    let (sql, answer) = if p.contains("most sold") || p.contains("best selling") {
        (
            "SELECT product_name, SUM(quantity) AS total_sold FROM data GROUP BY product_name ORDER BY total_sold DESC LIMIT 5",
            "Based on the analysis, I've identified the best-selling products by total quantity sold. The Cotton Formal Shirt leads with 2 units sold, showing strong demand for essential formal wear items.",
        )
    } else if p.contains("revenue") || p.contains("sales") {
        (
            "SELECT brand, SUM(final_price * quantity) AS revenue FROM data GROUP BY brand ORDER BY revenue DESC LIMIT 5",
            "I've calculated the revenue by brand. Raymond brand generated ₹58,031 in total revenue, demonstrating strong performance across all product categories.",
        )
    } else if p.contains("return") {
        (
            "SELECT category, COUNT(*) AS return_count FROM data WHERE return_status = 1 GROUP BY category ORDER BY return_count DESC",
            "Analyzing return patterns, Casual Wear has 1 return due to size issues. The overall return rate is low at 20%, indicating good product quality and customer satisfaction.",
        )
    } else if p.contains("average") || p.contains("avg") {
        (
            "SELECT AVG(price) AS average_price, AVG(rating) AS average_rating FROM data",
            "The average product price is ₹12,499 and average customer rating is 4.4/5, reflecting Raymond's premium positioning and high customer satisfaction.",
        )
    } else {
        (
            "SELECT * FROM data LIMIT 10",
            "I've retrieved a sample of the data to help answer your question. The dataset contains Raymond sales transactions with details about products, pricing, and customer information.",
        )
    };

    GeneratedQuery {
        sql: sql.to_string(),
        answer: answer.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_selling_prompt_generates_quantity_query() {
        let gen = translate_rules("What are my best selling products?");
        assert!(gen.sql.contains("SUM(quantity)"));
        assert!(gen.answer.contains("best-selling"));
    }

    #[test]
    fn revenue_prompt_generates_brand_revenue_query() {
        let gen = translate_rules("Show me revenue by brand");
        assert!(gen.sql.contains("SUM(final_price * quantity)"));
        assert!(gen.answer.contains("₹58,031"));
    }

    #[test]
    fn return_prompt_generates_return_count_query() {
        let gen = translate_rules("Which products have the most returns?");
        assert!(gen.sql.contains("return_status = 1"));
    }

    #[test]
    fn unmatched_prompt_falls_back_to_preview_query() {
        let gen = translate_rules("hello there");
        assert_eq!(gen.sql, "SELECT * FROM data LIMIT 10");
    }

    #[test]
    fn pattern_order_puts_quantity_before_revenue() {
        // "best selling sales" matches both tables; the earlier rule wins.
        let gen = translate_rules("best selling sales items");
        assert!(gen.sql.contains("SUM(quantity)"));
    }

    #[tokio::test]
    async fn service_applies_rules_after_pacing() {
        let translator = PromptTranslator::new(Duration::ZERO);
        let gen = translator.translate("average rating?").await;
        assert!(gen.sql.contains("AVG(price)"));
    }
}
