use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::InsiderConfig;
use crate::edgar::client::EdgarClient;
use crate::edgar::filing::{self, FilingMetadata};
use crate::edgar::form4::{self, Form4Extraction};
use crate::edgar::report::FormType;
use crate::edgar::tickers::{self, CompanyInfo};

/// Default listing depth for the trend surface.
const TREND_FILING_LIMIT: usize = 20;

/// A company together with its matching recent filings.
#[derive(Debug, Serialize)]
pub struct CompanyFilings {
    pub company: CompanyInfo,
    pub filings: Vec<FilingMetadata>,
}

/// Operation boundary consumed by the tool-dispatch front end. Arguments
/// are plain scalars and lists; results are the structured payloads the
/// front end renders. This is the one place failures are given their
/// operation context.
pub struct InsiderTools {
    client: EdgarClient,
}

impl InsiderTools {
    pub fn new() -> Self {
        Self {
            client: EdgarClient::new(),
        }
    }

    pub fn from_config(config: &InsiderConfig) -> Self {
        Self {
            client: EdgarClient::from_config(config),
        }
    }

    pub fn with_client(client: EdgarClient) -> Self {
        Self { client }
    }

    /// Resolves a ticker symbol or company name to candidate identities.
    pub async fn lookup_company(&self, query: &str) -> Result<Vec<CompanyInfo>> {
        tickers::resolve(&self.client, query)
            .await
            .with_context(|| format!("looking up company for query {:?}", query))
    }

    /// Lists recent filings of the requested form types for the best match
    /// of `query`.
    pub async fn recent_filings(
        &self,
        query: &str,
        forms: &[FormType],
        limit: usize,
    ) -> Result<CompanyFilings> {
        let mut matches = self.lookup_company(query).await?;
        let company = matches.remove(0);

        let filings = filing::recent_filings(&self.client, &company.cik, forms, limit)
            .await
            .with_context(|| {
                format!(
                    "listing recent filings for {} (CIK {})",
                    company.name, company.cik
                )
            })?;

        Ok(CompanyFilings { company, filings })
    }

    /// Extracts insider-transaction data from one filing. The `role`
    /// argument is part of the declared tool surface but is not applied to
    /// the result yet.
    pub async fn filing_transactions(
        &self,
        cik: &str,
        accession: &str,
        role: Option<&str>,
    ) -> Result<Form4Extraction> {
        if let Some(role) = role {
            log::debug!("Role filter {:?} accepted but not applied", role);
        }

        form4::extract(&self.client, cik, accession)
            .await
            .with_context(|| {
                format!(
                    "extracting transactions from filing {} for CIK {}",
                    accession, cik
                )
            })
    }

    /// Trend surface: returns the recent Form 4 listing for the company,
    /// unaggregated. The date window is part of the declared tool surface
    /// but is not applied to the result yet.
    pub async fn insider_trends(
        &self,
        query: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<CompanyFilings> {
        if from.is_some() || to.is_some() {
            log::debug!(
                "Date window {:?}..{:?} accepted but not applied to trend listing",
                from,
                to
            );
        }

        self.recent_filings(query, &[FormType::Form4], TREND_FILING_LIMIT)
            .await
    }
}

impl Default for InsiderTools {
    fn default() -> Self {
        Self::new()
    }
}

/// Form-type vocabulary for the front end's argument schema description.
pub fn supported_form_types() -> &'static str {
    FormType::list_types()
}
