//! The document spatial-text index.
//!
//! At construction the index walks every page of a document once, keeps
//! one `(text, bbox, page_number)` record per text span, sorts each page's
//! records by vertical position, and serves all subsequent text and page
//! queries from that flattened, read-only collection with no re-parsing
//! per query. The trade is memory for simplicity: source documents are
//! tens of pages, so a linear scan over the span arena beats maintaining
//! a spatial tree.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::{BlockKind, ImageResource, PdfEngine};
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

/// One indexed text span: a contiguous run of text with a single bounding
/// box on one page. Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The span's text content
    pub text: String,
    /// Page-local bounding box
    pub bbox: BoundingBox,
    /// Zero-based page the span appears on
    pub page_number: usize,
}

/// Form fields of one page, keyed by field name in widget discovery order.
pub type FormFields = IndexMap<String, Option<String>>;

/// A queryable index of every text span in a document.
///
/// The index exclusively owns the underlying document (and a re-serialized
/// secondary view used for image listing) for its lifetime. Queries never
/// mutate, so a shared reference may be used from multiple threads.
///
/// Span order is page discovery order first, then ascending `bbox.y0`
/// within each page. The per-page sort is stable: spans with equal `y0`
/// keep their extraction order. There is deliberately no global re-sort
/// across pages.
pub struct SpatialTextIndex<E: PdfEngine> {
    doc: E::Document,
    converted: E::Document,
    spans: Vec<TextSpan>,
    page_count: usize,
}

impl<E: PdfEngine> SpatialTextIndex<E> {
    /// Open a document from a file path and build the index.
    ///
    /// Fails with [`Error::UnreadableDocument`] if the engine cannot parse
    /// the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let doc = E::open_path(path.as_ref())?;
        Self::from_document(doc)
    }

    /// Open a document from an in-memory byte stream and build the index.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = E::open_bytes(bytes)?;
        Self::from_document(doc)
    }

    /// Build the index from an already-opened engine document.
    ///
    /// Walks every page eagerly: spans of non-text blocks (images,
    /// drawings) are dropped, the remaining spans of each page are stably
    /// sorted by `bbox.y0`, and the sorted pages are concatenated in page
    /// order. Also re-serializes the full page range into the secondary
    /// view that backs [`get_images_by_page`](Self::get_images_by_page).
    pub fn from_document(doc: E::Document) -> Result<Self> {
        let page_count = E::page_count(&doc);
        let mut spans = Vec::new();

        for page_number in 0..page_count {
            let blocks = E::page_blocks(&doc, page_number)?;
            let mut page_spans: Vec<TextSpan> = blocks
                .into_iter()
                .filter(|block| block.kind == BlockKind::Text)
                .flat_map(|block| block.lines)
                .flat_map(|line| line.spans)
                .map(|span| TextSpan {
                    text: span.text,
                    bbox: span.bbox,
                    page_number,
                })
                .collect();
            // Stable: ties keep reading order.
            page_spans.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));
            spans.extend(page_spans);
        }

        let converted = E::reserialize(&doc, 0, page_count)?;
        log::debug!("indexed {} spans across {} pages", spans.len(), page_count);

        Ok(Self {
            doc,
            converted,
            spans,
            page_count,
        })
    }

    /// Number of pages in the primary document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// All indexed spans, page-ordered then y-sorted within each page.
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// The underlying engine document.
    pub fn document(&self) -> &E::Document {
        &self.doc
    }

    /// Page rectangle `(x0, y0, x1, y1)` in points.
    ///
    /// Fails with [`Error::PageIndexOutOfRange`] if `page_number` is
    /// outside `[0, page_count)`.
    pub fn page_dimension(&self, page_number: usize) -> Result<BoundingBox> {
        if page_number >= self.page_count {
            return Err(Error::PageIndexOutOfRange {
                page: page_number,
                page_count: self.page_count,
            });
        }
        E::page_dimension(&self.doc, page_number)
    }

    /// Raw image resources on one page of the secondary document view.
    ///
    /// Fails with [`Error::PageIndexOutOfRange`] if `page_number` is
    /// outside `[0, page_count)`.
    pub fn get_images_by_page(&self, page_number: usize) -> Result<Vec<ImageResource>> {
        let converted_pages = E::page_count(&self.converted);
        if page_number >= converted_pages {
            return Err(Error::PageIndexOutOfRange {
                page: page_number,
                page_count: converted_pages,
            });
        }
        E::page_images(&self.converted, page_number)
    }

    /// Distinct page numbers whose spans contain `text` as a substring.
    ///
    /// The containment check is case-insensitive and position-insensitive:
    /// a span `"INVOICE #123"` matches the query `"123"`. An empty set is
    /// the soft "not found" outcome, never an error.
    pub fn find_page_by_text(&self, text: &str) -> BTreeSet<usize> {
        let needle = text.to_lowercase();
        self.spans
            .iter()
            .filter(|span| span.text.to_lowercase().contains(&needle))
            .map(|span| span.page_number)
            .collect()
    }

    /// Bounding boxes and page numbers of spans whose trimmed text equals
    /// `text` exactly.
    ///
    /// Exact match, in contrast with the substring semantics of
    /// [`find_page_by_text`](Self::find_page_by_text): the query
    /// `"INVOICE"` does not match a span `"INVOICE #123"`. When
    /// `page_number` is given, only spans on that page are considered.
    /// Index order is preserved; an empty result is not an error.
    pub fn get_bbox_by_text(
        &self,
        text: &str,
        page_number: Option<usize>,
    ) -> Vec<(BoundingBox, usize)> {
        self.spans
            .iter()
            .filter(|span| span.text.trim() == text)
            .filter(|span| page_number.map_or(true, |page| span.page_number == page))
            .map(|span| (span.bbox, span.page_number))
            .collect()
    }

    /// All `(text, bbox)` pairs of one page, in index order.
    ///
    /// A pure filter over the span arena: a page with no text yields an
    /// empty sequence, and any page integer is tolerated.
    pub fn get_attributes_by_page(&self, page_number: usize) -> Vec<(&str, BoundingBox)> {
        self.spans
            .iter()
            .filter(|span| span.page_number == page_number)
            .map(|span| (span.text.as_str(), span.bbox))
            .collect()
    }

    /// Form fields of one page, as a name → value mapping in widget
    /// discovery order.
    ///
    /// Returns `Ok(None)` for a valid page with zero widgets; fails with
    /// [`Error::PageIndexOutOfRange`] when `page_number` exceeds the
    /// primary document's page count.
    pub fn get_form_fields_by_page(&self, page_number: usize) -> Result<Option<FormFields>> {
        if page_number >= self.page_count {
            return Err(Error::PageIndexOutOfRange {
                page: page_number,
                page_count: self.page_count,
            });
        }
        let widgets = E::page_widgets(&self.doc, page_number)?;
        if widgets.is_empty() {
            return Ok(None);
        }
        let fields = widgets
            .into_iter()
            .map(|widget| (widget.name, widget.value))
            .collect();
        Ok(Some(fields))
    }
}

impl<E: PdfEngine> std::fmt::Debug for SpatialTextIndex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialTextIndex")
            .field("page_count", &self.page_count)
            .field("spans", &self.spans.len())
            .finish_non_exhaustive()
    }
}
