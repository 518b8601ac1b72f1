use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::client::{EdgarClient, EDGAR_ARCHIVES_HOST};
use super::error::EdgarError;
use super::filing;

/// Sentinel for a reporting owner with no officer title in the document.
pub const UNSPECIFIED_TITLE: &str = "Unspecified";

/// Tag spellings observed across filing eras: the camelCase form of the
/// current XML schema and the upper-snake form of older renderings. The
/// HTML parser lowercases element names, so both are probed lowercased.
const OWNER_NAME_TAGS: &[&str] = &["rptOwnerName", "RPT_OWNER_NAME"];
const OWNER_CIK_TAGS: &[&str] = &["rptOwnerCik", "RPT_OWNER_CIK"];
const IS_DIRECTOR_TAGS: &[&str] = &["isDirector", "IS_DIRECTOR"];
const IS_OFFICER_TAGS: &[&str] = &["isOfficer", "IS_OFFICER"];
const IS_TEN_PERCENT_TAGS: &[&str] = &["isTenPercentOwner", "IS_TEN_PERCENT_OWNER"];
const OFFICER_TITLE_TAGS: &[&str] = &["officerTitle", "OFFICER_TITLE"];

/// Reporting-owner identity and relationship to the issuer. Every field has
/// a documented default; a document that names none of them still parses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRelationship {
    pub name: String,
    pub cik: String,
    pub is_director: bool,
    pub is_officer: bool,
    pub is_ten_percent_owner: bool,
    pub officer_title: String,
}

impl Default for OwnerRelationship {
    fn default() -> Self {
        OwnerRelationship {
            name: String::new(),
            cik: String::new(),
            is_director: false,
            is_officer: false,
            is_ten_percent_owner: false,
            officer_title: UNSPECIFIED_TITLE.to_string(),
        }
    }
}

impl OwnerRelationship {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.cik.is_empty()
            && !self.is_director
            && !self.is_officer
            && !self.is_ten_percent_owner
            && self.officer_title == UNSPECIFIED_TITLE
    }
}

/// One candidate transaction: the row's text cells in order, plus the
/// original markup. The cell layout is not schema-verified, so no mapping
/// onto typed fields (date, code, shares, price) is claimed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub cells: Vec<String>,
    pub html: String,
}

/// How much of the document the heuristics managed to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionStatus {
    /// Relationship attributes and at least one transaction row.
    Complete,
    /// One of the two, but not both.
    Partial,
    /// Neither; still a valid result, distinct from any fetch failure.
    Empty,
}

#[derive(Debug, Serialize)]
pub struct Form4Extraction {
    pub owner: OwnerRelationship,
    pub transactions: Vec<TransactionRow>,
    pub document_url: String,
    pub status: ExtractionStatus,
}

/// Fetches the filing document for `accession` and extracts what it can.
/// Finding nothing is a reportable outcome, not an error; only lookup and
/// fetch failures propagate.
pub async fn extract(
    client: &EdgarClient,
    cik: &str,
    accession: &str,
) -> Result<Form4Extraction, EdgarError> {
    let location = filing::locate_document(client, cik, accession).await?;
    let document_url = location.archive_url();
    let body = client.fetch(&document_url, EDGAR_ARCHIVES_HOST).await?;

    let (owner, transactions) = parse_form4(&body);
    let status = extraction_status(&owner, &transactions);
    log::info!(
        "Extracted {} candidate transaction rows from {} ({:?})",
        transactions.len(),
        document_url,
        status
    );

    Ok(Form4Extraction {
        owner,
        transactions,
        document_url,
        status,
    })
}

/// Parses a filing body as a lenient markup tree. Works for both the
/// current XML schema and legacy HTML renderings; no schema negotiation.
pub fn parse_form4(body: &str) -> (OwnerRelationship, Vec<TransactionRow>) {
    let document = Html::parse_document(body);
    (
        extract_relationship(&document),
        extract_transaction_rows(&document),
    )
}

pub fn extraction_status(
    owner: &OwnerRelationship,
    transactions: &[TransactionRow],
) -> ExtractionStatus {
    match (!owner.is_empty(), !transactions.is_empty()) {
        (true, true) => ExtractionStatus::Complete,
        (false, false) => ExtractionStatus::Empty,
        _ => ExtractionStatus::Partial,
    }
}

fn extract_relationship(document: &Html) -> OwnerRelationship {
    OwnerRelationship {
        name: tag_text(document, OWNER_NAME_TAGS).unwrap_or_default(),
        cik: tag_text(document, OWNER_CIK_TAGS).unwrap_or_default(),
        is_director: tag_flag(document, IS_DIRECTOR_TAGS),
        is_officer: tag_flag(document, IS_OFFICER_TAGS),
        is_ten_percent_owner: tag_flag(document, IS_TEN_PERCENT_TAGS),
        officer_title: tag_text(document, OFFICER_TITLE_TAGS)
            .unwrap_or_else(|| UNSPECIFIED_TITLE.to_string()),
    }
}

/// First candidate tag with non-empty text wins; none is not an error.
fn tag_text(document: &Html, candidates: &[&str]) -> Option<String> {
    for tag in candidates {
        let lowered = tag.to_ascii_lowercase();
        let Ok(selector) = Selector::parse(&lowered) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = element_text(&element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn tag_flag(document: &Html, candidates: &[&str]) -> bool {
    tag_text(document, candidates)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Scans every table-like block for candidate transaction rows. A block
/// qualifies only if its full text mentions "Transaction" or "Shares"
/// (case-sensitive, upstream convention); within it, a row qualifies if it
/// has more than 5 cells, a non-empty first cell, and a first cell that is
/// not itself a "Transaction ..." header.
fn extract_transaction_rows(document: &Html) -> Vec<TransactionRow> {
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td, th").unwrap();

    let mut rows = Vec::new();
    for table in document.select(&table_selector) {
        let table_text: String = table.text().collect();
        if !table_text.contains("Transaction") && !table_text.contains("Shares") {
            continue;
        }
        for row in table.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| element_text(&cell))
                .collect();
            if is_candidate_transaction(&cells) {
                rows.push(TransactionRow {
                    cells,
                    html: row.html(),
                });
            }
        }
    }
    rows
}

fn is_candidate_transaction(cells: &[String]) -> bool {
    cells.len() > 5
        && !cells[0].is_empty()
        && !cells[0].to_lowercase().contains("transaction")
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
