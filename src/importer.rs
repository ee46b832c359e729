use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn, Instrument};

use crate::assembler::{assemble, publish};
use crate::catalog::CatalogBackend;
use crate::config::{AppConfig, RepresentativeImage};
use crate::document::ParsedDocument;
use crate::extractors::extract_fields;
use crate::fetcher::PageFetcher;
use crate::models::{AttachmentId, ExtractedFields, ProductId, ProductRecord};
use crate::trigger::ImportOutcome;
use crate::utils::error::ImportError;

/// Steps of one import run, entered strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Fetching,
    Parsing,
    Extracting,
    Validating,
    Assembling,
    Done,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Fetching => "fetching",
            ImportStage::Parsing => "parsing",
            ImportStage::Extracting => "extracting",
            ImportStage::Validating => "validating",
            ImportStage::Assembling => "assembling",
            ImportStage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedProduct {
    pub product_id: ProductId,
    pub record: ProductRecord,
    pub attached_images: Vec<AttachmentId>,
    pub representative_image: Option<AttachmentId>,
}

/// Runs the fetch, parse, extract, validate, assemble pipeline for one URL at a time.
///
/// Holds no per-run state, so one importer can serve concurrent runs.
pub struct ProductImporter<B> {
    fetcher: PageFetcher,
    backend: B,
    representative_image: RepresentativeImage,
}

impl<B: CatalogBackend> ProductImporter<B> {
    pub fn new(fetcher: PageFetcher, backend: B, representative_image: RepresentativeImage) -> Self {
        Self {
            fetcher,
            backend,
            representative_image,
        }
    }

    pub fn from_config(config: &AppConfig, backend: B) -> crate::Result<Self> {
        let fetcher = PageFetcher::new(&config.fetcher)?;
        Ok(Self::new(fetcher, backend, config.import.representative_image))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Everything up to the assembled record, without touching the catalog.
    pub async fn preview(&self, url: &str) -> Result<ProductRecord, ImportError> {
        enter(ImportStage::Fetching);
        let page = self.fetcher.fetch(url).await?;

        let fields = extract_from_html(&page.html);

        enter(ImportStage::Validating);
        let fields = validate(fields)?;

        enter(ImportStage::Assembling);
        Ok(assemble(fields))
    }

    pub async fn import(&self, url: &str) -> Result<ImportedProduct, ImportError> {
        let span = tracing::info_span!("import", %url);
        async move {
            let record = self.preview(url).await?;
            let published = publish(&record, &self.backend, self.representative_image).await?;

            enter(ImportStage::Done);
            info!("Product successfully imported with ID: {}", published.product_id);

            Ok(ImportedProduct {
                product_id: published.product_id,
                record,
                attached_images: published.attached_images,
                representative_image: published.representative_image,
            })
        }
        .instrument(span)
        .await
    }

    /// Like [`import`](Self::import), with any failure reduced to its reason string.
    pub async fn run(&self, url: &str) -> ImportOutcome {
        match self.import(url).await {
            Ok(imported) => ImportOutcome::created(imported.product_id),
            Err(e) => {
                warn!("Import of {} failed: {}", url, e);
                ImportOutcome::failed(e.to_string())
            }
        }
    }
}

/// Parses a page and runs every field extractor over it.
///
/// The parsed tree lives only inside this call.
pub fn extract_from_html(html: &str) -> ExtractedFields {
    enter(ImportStage::Parsing);
    let document = ParsedDocument::parse(html);

    enter(ImportStage::Extracting);
    extract_fields(&document)
}

fn validate(fields: ExtractedFields) -> Result<ExtractedFields, ImportError> {
    if !fields.has_title() {
        return Err(ImportError::MissingTitle);
    }
    Ok(fields)
}

fn enter(stage: ImportStage) {
    debug!(%stage, "Entering import stage");
}
