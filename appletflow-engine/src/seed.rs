//! Demo catalog and history loaded into a fresh store

use appletflow_core::domain::applet::{Applet, AppletId, SchemaTag};
use appletflow_core::domain::execution::{ExecutionLogEntry, ExecutionStatus};
use appletflow_core::domain::price::Price;

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

fn applet(
    id: AppletId,
    name: &str,
    description: &str,
    price: u128,
    input_schema: SchemaTag,
    output_schema: SchemaTag,
    owner: &str,
) -> Applet {
    Applet {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_smallest_units(price),
        input_schema,
        output_schema,
        owner: owner.to_string(),
        is_active: true,
    }
}

/// One hundredth of a whole unit, in smallest units
const CENT: u128 = 10_000_000_000_000_000;

/// Initial applet catalog
pub fn applets() -> Vec<Applet> {
    use SchemaTag::*;

    vec![
        applet(1, "Sentiment Analysis", "Analyzes text sentiment", 5 * CENT, Text, Json, "0x123..."),
        applet(2, "Image Resizer", "Resizes images", CENT, Image, Image, "0xABC..."),
        applet(3, "Data Cleaner", "Cleans CSV data", 2 * CENT, Csv, Csv, "0x456..."),
        applet(4, "Translator", "Translates text", 3 * CENT, Text, Text, "0x789..."),
        applet(5, "AI Summarizer", "Summarizes long text", 8 * CENT, Text, Text, "0xDEF..."),
        applet(
            6,
            "Crypto Price Oracle",
            "Fetches the live USD price of a coin",
            CENT,
            Text,
            Json,
            "0x0RA...",
        ),
    ]
}

/// Initial execution history, relative to `now` (seconds since epoch)
pub fn executions(now: i64) -> Vec<ExecutionLogEntry> {
    vec![
        ExecutionLogEntry {
            id: 101,
            pipeline_id: "0x8f...2a".to_string(),
            applet_ids: vec![1, 3],
            total_price: Price::from_smallest_units(7 * CENT),
            timestamp: now - HOUR,
            status: ExecutionStatus::Success,
            result: None,
            result_hash: None,
            user: None,
        },
        ExecutionLogEntry {
            id: 102,
            pipeline_id: "0x3b...9c".to_string(),
            applet_ids: vec![2, 2, 4],
            total_price: Price::from_smallest_units(CENT * 5 / 2),
            timestamp: now - DAY,
            status: ExecutionStatus::Success,
            result: None,
            result_hash: None,
            user: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_prices() {
        let prices: Vec<String> = applets().iter().map(|a| a.price.to_string()).collect();
        assert_eq!(prices, vec!["0.05", "0.01", "0.02", "0.03", "0.08", "0.01"]);
    }

    #[test]
    fn test_seed_ids_are_sequential() {
        let ids: Vec<AppletId> = applets().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_seed_history() {
        let history = executions(1_700_000_000);
        assert_eq!(history[0].total_price.to_string(), "0.07");
        assert_eq!(history[1].total_price.to_string(), "0.025");
        assert_eq!(history[1].applet_ids, vec![2, 2, 4]);
        assert!(history[0].timestamp > history[1].timestamp);
    }
}
