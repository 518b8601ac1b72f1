pub mod client;
pub mod error;
pub mod filing;
pub mod form4;
pub mod rate_limiter;
pub mod report;
pub mod tickers;

pub use client::EdgarClient;
pub use error::EdgarError;
pub use filing::{DocumentLocation, FilingMetadata};
pub use form4::{ExtractionStatus, Form4Extraction, OwnerRelationship, TransactionRow};
pub use rate_limiter::RateLimiter;
pub use report::FormType;
pub use tickers::CompanyInfo;
