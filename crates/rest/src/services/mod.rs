//! Services behind the HTTP handlers.
//!
//! Each service borrows the store from [`crate::AppState`] for the duration
//! of one request.

mod charts;
mod credentials;
mod export;
mod query;

pub use charts::{Bin, BoxSummary, ChartService, ChartSet, box_summary, category_counts, histogram, top_k};
pub use credentials::{AuthError, CredentialService, hash_password, verify_password};
pub use export::{ExportError, ExportService, FileExport};
pub use query::{QueryService, SummaryPage};
