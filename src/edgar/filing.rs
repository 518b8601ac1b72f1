use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::client::{EdgarClient, EDGAR_ARCHIVES_URL, EDGAR_DATA_HOST, EDGAR_DATA_URL};
use super::error::EdgarError;
use super::report::FormType;
use super::tickers::pad_cik;

/// One filing, assembled from the manifest's index-aligned columns. A row
/// is only ever built whole; an index missing any required field is skipped
/// at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilingMetadata {
    pub accession_number: String,
    pub form_type: FormType,
    pub filing_date: NaiveDate,
    pub primary_document: String,
}

/// Where a filing document lives in the archive. Derived from manifest data;
/// `accession` has its hyphens stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLocation {
    pub cik: String,
    pub accession: String,
    pub primary_document: String,
}

impl DocumentLocation {
    /// Canonical archive URL. The archive path wants the CIK as a bare
    /// integer while the submissions path wants it zero-padded; that
    /// asymmetry is the upstream contract.
    pub fn archive_url(&self) -> String {
        let cik_int = self.cik.trim_start_matches('0');
        let cik_int = if cik_int.is_empty() { "0" } else { cik_int };
        format!(
            "{}/Archives/edgar/data/{}/{}/{}",
            EDGAR_ARCHIVES_URL, cik_int, self.accession, self.primary_document
        )
    }
}

/// The `filings.recent` window of a company's submissions manifest, as
/// published: parallel arrays aligned by index, most recent first. Older
/// filings live in separate paginated files and are not fetched.
#[derive(Debug, Default, Deserialize)]
pub struct RecentColumns {
    #[serde(rename = "accessionNumber", default)]
    pub accession_number: Vec<String>,
    #[serde(rename = "form", default)]
    pub form: Vec<String>,
    #[serde(rename = "filingDate", default)]
    pub filing_date: Vec<String>,
    #[serde(rename = "primaryDocument", default)]
    pub primary_document: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilingsData {
    #[serde(default)]
    pub recent: RecentColumns,
}

#[derive(Debug, Deserialize)]
pub struct CompanySubmissions {
    #[serde(default)]
    pub name: String,
    pub filings: FilingsData,
}

pub fn submissions_url(cik: &str) -> String {
    format!("{}/submissions/CIK{}.json", EDGAR_DATA_URL, pad_cik(cik))
}

async fn fetch_submissions(
    client: &EdgarClient,
    cik: &str,
) -> Result<CompanySubmissions, EdgarError> {
    let url = submissions_url(cik);
    info!("Fetching company filings from {}", url);
    let body = client.fetch(&url, EDGAR_DATA_HOST).await?;
    parse_submissions(&body).map_err(|e| EdgarError::Decode {
        url,
        cause: e.to_string(),
    })
}

pub fn parse_submissions(json: &str) -> Result<CompanySubmissions, serde_json::Error> {
    serde_json::from_str(json)
}

/// Lists up to `limit` recent filings whose form type is in `forms`, in
/// manifest order. Fewer than `limit` matches is not an error.
pub async fn recent_filings(
    client: &EdgarClient,
    cik: &str,
    forms: &[FormType],
    limit: usize,
) -> Result<Vec<FilingMetadata>, EdgarError> {
    let submissions = fetch_submissions(client, cik).await?;
    let filings = filter_recent(&submissions.filings.recent, forms, limit);
    debug!(
        "Accepted {} of {} recent filings for CIK {}",
        filings.len(),
        submissions.filings.recent.accession_number.len(),
        cik
    );
    Ok(filings)
}

/// Resolves an accession number to its document location by re-reading the
/// manifest. The manifest may have changed since an earlier listing, so a
/// missing accession is an expected, typed failure.
pub async fn locate_document(
    client: &EdgarClient,
    cik: &str,
    accession: &str,
) -> Result<DocumentLocation, EdgarError> {
    let submissions = fetch_submissions(client, cik).await?;
    find_accession(&submissions.filings.recent, cik, accession).ok_or_else(|| {
        EdgarError::FilingNotFound {
            cik: pad_cik(cik),
            accession: accession.to_string(),
        }
    })
}

pub fn filter_recent(
    recent: &RecentColumns,
    forms: &[FormType],
    limit: usize,
) -> Vec<FilingMetadata> {
    let mut accepted = Vec::new();
    for index in 0..recent.accession_number.len() {
        if accepted.len() >= limit {
            break;
        }
        let Some(filing) = assemble_row(recent, index) else {
            debug!("Skipping incomplete manifest row {}", index);
            continue;
        };
        if forms.contains(&filing.form_type) {
            accepted.push(filing);
        }
    }
    accepted
}

pub fn find_accession(
    recent: &RecentColumns,
    cik: &str,
    accession: &str,
) -> Option<DocumentLocation> {
    for (index, candidate) in recent.accession_number.iter().enumerate() {
        if candidate != accession {
            continue;
        }
        let primary_document = recent.primary_document.get(index).map(|d| d.trim());
        match primary_document {
            Some(doc) if !doc.is_empty() => {
                return Some(DocumentLocation {
                    cik: pad_cik(cik),
                    accession: accession.replace('-', ""),
                    primary_document: doc.to_string(),
                });
            }
            // A matching accession without a document cannot yield a
            // usable location; keep scanning.
            _ => continue,
        }
    }
    None
}

/// Zips one index across the parallel arrays into a whole record, or `None`
/// if any required field is absent, empty, or unparseable.
fn assemble_row(recent: &RecentColumns, index: usize) -> Option<FilingMetadata> {
    let accession = recent.accession_number.get(index)?.trim();
    let form = recent.form.get(index)?.trim();
    let date = recent.filing_date.get(index)?.trim();
    let document = recent.primary_document.get(index)?.trim();

    if accession.is_empty() || form.is_empty() || document.is_empty() {
        return None;
    }
    let filing_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let form_type = form
        .parse::<FormType>()
        .unwrap_or_else(|_| FormType::Other(form.to_string()));

    Some(FilingMetadata {
        accession_number: accession.to_string(),
        form_type,
        filing_date,
        primary_document: document.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> RecentColumns {
        RecentColumns {
            accession_number: vec!["a".into(), "b".into(), "c".into()],
            form: vec!["4".into(), "10-K".into(), "4".into()],
            filing_date: vec!["2024-02-01".into(), "2024-01-20".into(), "2024-01-05".into()],
            primary_document: vec!["form4.xml".into(), "report.htm".into(), "form4.xml".into()],
        }
    }

    #[test]
    fn filter_keeps_requested_forms_in_manifest_order() {
        let filings = filter_recent(&manifest(), &[FormType::Form4], 10);
        let accessions: Vec<&str> = filings.iter().map(|f| f.accession_number.as_str()).collect();
        assert_eq!(accessions, vec!["a", "c"]);
        assert!(filings.iter().all(|f| f.form_type == FormType::Form4));
    }

    #[test]
    fn filter_stops_at_limit() {
        let filings = filter_recent(&manifest(), &[FormType::Form4], 1);
        assert_eq!(filings.len(), 1);
        assert_eq!(filings[0].accession_number, "a");
    }

    #[test]
    fn incomplete_rows_are_skipped_whole() {
        let recent = RecentColumns {
            accession_number: vec!["a".into(), "b".into(), "c".into()],
            form: vec!["4".into(), "4".into(), "4".into()],
            filing_date: vec!["2024-02-01".into(), "2024-01-20".into(), "not-a-date".into()],
            primary_document: vec!["form4.xml".into(), "".into(), "form4.xml".into()],
        };
        let filings = filter_recent(&recent, &[FormType::Form4], 10);
        let accessions: Vec<&str> = filings.iter().map(|f| f.accession_number.as_str()).collect();
        assert_eq!(accessions, vec!["a"]);
    }

    #[test]
    fn missing_accession_yields_no_location() {
        assert_eq!(find_accession(&manifest(), "50863", "zzz"), None);
    }

    #[test]
    fn location_strips_hyphens_and_pads_cik() {
        let recent = RecentColumns {
            accession_number: vec!["0000050863-24-000011".into()],
            form: vec!["4".into()],
            filing_date: vec!["2024-02-01".into()],
            primary_document: vec!["xslF345X05/form4.xml".into()],
        };
        let location = find_accession(&recent, "50863", "0000050863-24-000011").unwrap();
        assert_eq!(location.cik, "0000050863");
        assert_eq!(location.accession, "000005086324000011");
        assert_eq!(
            location.archive_url(),
            "https://www.sec.gov/Archives/edgar/data/50863/000005086324000011/xslF345X05/form4.xml"
        );
    }

    #[test]
    fn parse_submissions_reads_recent_window() {
        let json = r#"{
            "cik": "50863",
            "name": "Intel Corp",
            "filings": {
                "recent": {
                    "accessionNumber": ["a"],
                    "form": ["4"],
                    "filingDate": ["2024-02-01"],
                    "primaryDocument": ["form4.xml"]
                },
                "files": [{"name": "CIK0000050863-submissions-001.json"}]
            }
        }"#;
        let submissions = parse_submissions(json).unwrap();
        assert_eq!(submissions.name, "Intel Corp");
        assert_eq!(submissions.filings.recent.accession_number, vec!["a"]);
    }
}
