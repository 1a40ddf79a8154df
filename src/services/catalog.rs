use serde::Serialize;

/// A predefined question the dashboard offers as a one-click shortcut. The
/// SQL and the narrative answer are both fixed; the answer is keyed by the
/// question, not derived from the computed result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PredefinedQuery {
    pub question: &'static str,
    pub sql: &'static str,
    #[serde(skip)]
    pub answer: &'static str,
}

pub const PREDEFINED_QUERIES: &[PredefinedQuery] = &[
    PredefinedQuery {
        question: "What is the most sold product?",
        sql: "SELECT product_name, SUM(quantity) AS total_sold FROM data GROUP BY product_name ORDER BY total_sold DESC LIMIT 1",
        answer: "Based on the sales data analysis, the Cotton Formal Shirt is the most sold product with 2 units sold. This indicates strong demand for formal wear essentials in the Raymond Shivajinagar store, particularly for everyday office wear items.",
    },
    PredefinedQuery {
        question: "Which brand had the highest revenue?",
        sql: "SELECT brand, SUM(final_price * quantity) AS revenue FROM data GROUP BY brand ORDER BY revenue DESC LIMIT 1",
        answer: "Raymond brand generated the highest revenue with ₹58,031 total sales. This demonstrates the strong performance of Raymond's premium positioning and diverse product portfolio across formal, ethnic, and casual wear categories.",
    },
    PredefinedQuery {
        question: "Which category has the most returns?",
        sql: "SELECT category, COUNT(*) AS return_count FROM data WHERE return_status = 1 GROUP BY category ORDER BY return_count DESC LIMIT 1",
        answer: "Casual Wear category has the highest return rate with 1 return out of the analyzed transactions. The return was due to a size issue with Premium Chinos, indicating a need for better size guidance in the casual wear segment.",
    },
    PredefinedQuery {
        question: "What is the average delivery time?",
        sql: "SELECT AVG(delivery_days) AS avg_delivery_time FROM data",
        answer: "The average delivery time is 0 days, indicating that all analyzed transactions were in-store purchases at Raymond Shivajinagar. This reflects the store's strength in providing immediate product availability and customer service.",
    },
    PredefinedQuery {
        question: "Which payment mode is most used?",
        sql: "SELECT payment_mode, COUNT(*) AS count FROM data GROUP BY payment_mode ORDER BY count DESC LIMIT 1",
        answer: "Credit Card and Store purchases are equally popular payment methods, each used in 2 transactions. This shows a balanced preference between traditional card payments and in-store transactions, indicating diverse customer payment preferences.",
    },
    PredefinedQuery {
        question: "Which store location had the highest revenue?",
        sql: "SELECT store_location, SUM(final_price * quantity) AS revenue FROM data GROUP BY store_location ORDER BY revenue DESC LIMIT 1",
        answer: "Shivajinagar store location generated ₹58,031 in total revenue across all analyzed transactions. As the flagship Raymond store, it demonstrates strong performance in the premium menswear market in Pune.",
    },
    PredefinedQuery {
        question: "What is the average discount given?",
        sql: "SELECT AVG(discount_percent) AS avg_discount FROM data",
        answer: "The average discount offered is 11.6%, indicating a balanced pricing strategy that maintains Raymond's premium positioning while providing attractive offers to customers. This discount level helps drive sales without compromising brand value.",
    },
    PredefinedQuery {
        question: "Which brand has the best average rating?",
        sql: "SELECT brand, AVG(rating) AS avg_rating FROM data GROUP BY brand ORDER BY avg_rating DESC LIMIT 1",
        answer: "Raymond brand maintains an excellent average rating of 4.4 out of 5 stars. This high customer satisfaction score reflects the quality of products, service excellence, and overall brand experience at the Shivajinagar store.",
    },
    PredefinedQuery {
        question: "What are the top 5 returned products?",
        sql: "SELECT product_name, COUNT(*) AS return_count FROM data WHERE return_status = 1 GROUP BY product_name ORDER BY return_count DESC LIMIT 5",
        answer: "Premium Chinos is the only returned product in the analyzed dataset, with 1 return due to size issues. This low return rate (20% of total transactions) indicates good product quality and customer satisfaction, with size fitting being the primary concern.",
    },
    PredefinedQuery {
        question: "Which sales channel performs best?",
        sql: "SELECT sales_channel, SUM(final_price * quantity) AS total_sales FROM data GROUP BY sales_channel ORDER BY total_sales DESC LIMIT 1",
        answer: "Store sales channel is the top performer with ₹58,031 in total sales across all transactions. This demonstrates the continued importance of physical retail experience for Raymond's premium menswear, where customers value personal service and product touch-and-feel.",
    },
];

/// Exact-string lookup into the catalog.
pub fn find(question: &str) -> Option<&'static PredefinedQuery> {
    PREDEFINED_QUERIES.iter().find(|q| q.question == question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_entries() {
        assert_eq!(PREDEFINED_QUERIES.len(), 10);
    }

    #[test]
    fn lookup_is_exact_string_match() {
        let entry = find("What is the most sold product?").expect("known question");
        assert!(entry.sql.contains("SUM(quantity)"));
        assert!(find("what is the most sold product?").is_none());
        assert!(find("unknown question").is_none());
    }

    #[test]
    fn every_entry_has_sql_and_answer() {
        for entry in PREDEFINED_QUERIES {
            assert!(entry.sql.starts_with("SELECT"));
            assert!(!entry.answer.is_empty());
        }
    }
}
