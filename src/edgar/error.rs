use std::time::Duration;

/// Failure taxonomy for EDGAR access. Partial extraction is not represented
/// here: an empty relationship or an empty transaction list is a valid
/// result value, not an error.
#[derive(Debug, thiserror::Error)]
pub enum EdgarError {
    #[error("no company matched query {0:?}")]
    CompanyNotFound(String),

    #[error("filing {accession} not found in submissions for CIK {cik}")]
    FilingNotFound { cik: String, accession: String },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {cause}")]
    Fetch { url: String, cause: String },

    #[error("malformed response from {url}: {cause}")]
    Decode { url: String, cause: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_operation_and_cause() {
        let not_found = EdgarError::FilingNotFound {
            cik: "0000050863".to_string(),
            accession: "0000050863-24-000011".to_string(),
        };
        assert_eq!(
            not_found.to_string(),
            "filing 0000050863-24-000011 not found in submissions for CIK 0000050863"
        );

        let timeout = EdgarError::Timeout {
            url: "https://data.sec.gov/submissions/CIK0000050863.json".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert!(timeout.to_string().contains("timed out after 30s"));

        let fetch = EdgarError::Fetch {
            url: "https://www.sec.gov/files/company_tickers.json".to_string(),
            cause: "HTTP request failed with status: 403 Forbidden".to_string(),
        };
        assert!(fetch.to_string().contains("403 Forbidden"));
    }
}
