use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::client::{EdgarClient, EDGAR_ARCHIVES_HOST};
use super::error::EdgarError;

pub const TICKER_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// One company identity, derived per lookup and never cached. The CIK is
/// always the 10-digit zero-padded rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub cik: String,
    pub ticker: String,
    pub name: String,
}

/// Raw entry of the bulk `company_tickers.json` snapshot. CIKs are numeric
/// in the snapshot and only become padded strings in [`CompanyInfo`].
#[derive(Debug, Clone, Deserialize)]
pub struct TickerRecord {
    pub cik_str: u64,
    pub ticker: String,
    pub title: String,
}

/// Zero-pads a CIK to the 10-digit width every downstream manifest URL
/// assumes. Idempotent.
pub fn pad_cik(cik: &str) -> String {
    format!("{:0>10}", cik.trim())
}

/// Resolves a ticker symbol or free-text company name to company identities
/// using the single bulk snapshot. An empty match set is a typed error:
/// the caller always needs at least one company to proceed.
pub async fn resolve(client: &EdgarClient, query: &str) -> Result<Vec<CompanyInfo>, EdgarError> {
    log::debug!("Fetching tickers from SEC");
    let body = client.fetch(TICKER_URL, EDGAR_ARCHIVES_HOST).await?;
    let records = parse_company_snapshot(&body).map_err(|e| EdgarError::Decode {
        url: TICKER_URL.to_string(),
        cause: e.to_string(),
    })?;
    log::debug!("Found {} ticker entries", records.len());
    select_matches(&records, query)
}

pub fn parse_company_snapshot(json: &str) -> Result<Vec<TickerRecord>, serde_json::Error> {
    // Keyed by ordinal position; BTreeMap keeps the scan order stable.
    let entries: BTreeMap<String, TickerRecord> = serde_json::from_str(json)?;
    Ok(entries.into_values().collect())
}

pub fn select_matches(
    records: &[TickerRecord],
    query: &str,
) -> Result<Vec<CompanyInfo>, EdgarError> {
    let matches = match_companies(records, query);
    if matches.is_empty() {
        return Err(EdgarError::CompanyNotFound(query.to_string()));
    }
    Ok(matches)
}

/// Case-insensitive union of two match rules: exact ticker match, or the
/// query contained in the company title.
pub fn match_companies(records: &[TickerRecord], query: &str) -> Vec<CompanyInfo> {
    let query_upper = query.trim().to_uppercase();
    let query_lower = query.trim().to_lowercase();

    records
        .iter()
        .filter(|r| {
            r.ticker.to_uppercase() == query_upper
                || (!query_lower.is_empty() && r.title.to_lowercase().contains(&query_lower))
        })
        .map(|r| CompanyInfo {
            cik: format!("{:010}", r.cik_str),
            ticker: r.ticker.clone(),
            name: r.title.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<TickerRecord> {
        parse_company_snapshot(
            r#"{
                "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
                "1": {"cik_str": 50863, "ticker": "INTC", "title": "Intel Corp"},
                "2": {"cik_str": 1318605, "ticker": "TSLA", "title": "Tesla, Inc."}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn pad_cik_is_idempotent_and_ten_digits() {
        for raw in ["50863", "320193", "0000050863", "1"] {
            let once = pad_cik(raw);
            assert_eq!(once.len(), 10);
            assert_eq!(pad_cik(&once), once);
        }
    }

    #[test]
    fn exact_ticker_match_resolves_intel() {
        let matches = select_matches(&snapshot(), "INTC").unwrap();
        assert_eq!(
            matches,
            vec![CompanyInfo {
                cik: "0000050863".to_string(),
                ticker: "INTC".to_string(),
                name: "Intel Corp".to_string(),
            }]
        );
    }

    #[test]
    fn ticker_match_is_case_insensitive() {
        let matches = select_matches(&snapshot(), "intc").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].ticker, "INTC");
    }

    #[test]
    fn title_substring_match_resolves_apple() {
        let matches = select_matches(&snapshot(), "apple").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].cik, "0000320193");
    }

    #[test]
    fn record_matching_both_rules_appears_once() {
        let records = parse_company_snapshot(
            r#"{"0": {"cik_str": 7, "ticker": "INTEL", "title": "Intel Holdings"}}"#,
        )
        .unwrap();
        let matches = select_matches(&records, "intel").unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn no_match_is_a_typed_error() {
        let err = select_matches(&snapshot(), "ZZZZ").unwrap_err();
        assert!(matches!(err, EdgarError::CompanyNotFound(q) if q == "ZZZZ"));
    }
}
