//! Query service: point reads, listings and section lookups.

use matdb_persistence::core::MaterialStorage;
use matdb_persistence::types::{Page, PageRequest, RecordId, StoredDocument};
use serde::Serialize;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::projection::{
    BandGap, ElasticProperties, MaterialRecord, MaterialSummary, SUMMARY_FIELDS, sections,
};

/// One page of the summary listing.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryPage {
    /// Summaries on this page, in store order.
    pub materials: Vec<MaterialSummary>,
    /// `ceil(count / page_size)`.
    pub total_pages: u64,
}

/// Read access to the material collection.
pub struct QueryService<'a, S: ?Sized> {
    storage: &'a S,
    page_size: u64,
}

impl<'a, S> QueryService<'a, S>
where
    S: MaterialStorage + ?Sized,
{
    /// Creates a query service over `storage` with the given summary page size.
    pub fn new(storage: &'a S, page_size: u64) -> Self {
        Self {
            storage,
            page_size: page_size.max(1),
        }
    }

    /// Fetches the raw document, or `NotFound`.
    pub async fn get_by_id(&self, id: &RecordId) -> RestResult<StoredDocument> {
        self.storage
            .read(id)
            .await?
            .ok_or_else(RestError::material_not_found)
    }

    /// Full record view of one document.
    pub async fn material(&self, id: &RecordId) -> RestResult<MaterialRecord> {
        let doc = self.get_by_id(id).await?;
        Ok(MaterialRecord::from_document(doc.content())?)
    }

    /// Every record in store order, unpaginated.
    pub async fn list_all(&self) -> RestResult<Vec<MaterialRecord>> {
        let docs = self.storage.list_all().await?;
        debug!(count = docs.len(), "Listing all materials");

        docs.iter()
            .map(|doc| MaterialRecord::from_document(doc.content()).map_err(RestError::from))
            .collect()
    }

    /// One page of summaries; pages below 1 are treated as page 1.
    pub async fn list_summaries(&self, page: i64) -> RestResult<SummaryPage> {
        let request = PageRequest::new(page, self.page_size);
        let total = self.storage.count().await?;
        let docs = self
            .storage
            .list_page(request.skip(), request.limit(), Some(SUMMARY_FIELDS))
            .await?;

        let page = Page::new(docs, request, total);
        debug!(
            page = page.page,
            items = page.items.len(),
            total = page.total,
            "Listing material summaries"
        );

        let materials = page
            .items
            .iter()
            .map(|doc| MaterialSummary::from_document(doc.content()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SummaryPage {
            materials,
            total_pages: page.total_pages,
        })
    }

    /// Summary view of one document.
    pub async fn summary(&self, id: &RecordId) -> RestResult<MaterialSummary> {
        let doc = self.get_by_id(id).await?;
        Ok(MaterialSummary::from_document(doc.content())?)
    }

    /// Optimisation inputs as plain text.
    pub async fn opt_text(&self, id: &RecordId) -> RestResult<String> {
        let doc = self.get_by_id(id).await?;
        Ok(sections::opt_text(doc.content())?)
    }

    /// SCF inputs as plain text.
    pub async fn scf_text(&self, id: &RecordId) -> RestResult<String> {
        let doc = self.get_by_id(id).await?;
        Ok(sections::scf_text(doc.content())?)
    }

    /// Elastic inputs and tensors as plain text.
    pub async fn elastic_text(&self, id: &RecordId) -> RestResult<String> {
        let doc = self.get_by_id(id).await?;
        Ok(sections::elastic_text(doc.content())?)
    }

    /// Derived elastic properties, tensors removed.
    pub async fn elastic_properties(&self, id: &RecordId) -> RestResult<ElasticProperties> {
        let doc = self.get_by_id(id).await?;
        Ok(sections::elastic_properties(doc.content())?)
    }

    /// Band gap summary.
    pub async fn band_gap(&self, id: &RecordId) -> RestResult<BandGap> {
        let doc = self.get_by_id(id).await?;
        Ok(sections::band_gap(doc.content())?)
    }
}
