//! Shared in-memory fixture engine for the integration tests.
//!
//! The fixture stands in for a real PDF engine: documents are plain
//! structs holding the per-page block/image/widget data a parser would
//! produce, so every index behavior can be exercised without a PDF file
//! on disk.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use pdf_atlas::engine::{
    BlockKind, DecodedPixels, ImageResource, PageBlock, PdfEngine, RawSpan, TextLine, WidgetField,
};
use pdf_atlas::error::{Error, Result};
use pdf_atlas::geometry::BoundingBox;

/// One fixture page: dimension plus the raw structures the engine yields.
#[derive(Debug, Clone)]
pub struct FixturePage {
    pub dimension: BoundingBox,
    pub blocks: Vec<PageBlock>,
    pub images: Vec<ImageResource>,
    pub widgets: Vec<WidgetField>,
}

impl FixturePage {
    /// A US-Letter page with no content.
    pub fn blank() -> Self {
        Self {
            dimension: BoundingBox::new(0.0, 0.0, 612.0, 792.0),
            blocks: Vec::new(),
            images: Vec::new(),
            widgets: Vec::new(),
        }
    }
}

/// A fixture document: pages plus decode tables keyed by xref.
#[derive(Debug, Clone, Default)]
pub struct FixtureDocument {
    pub pages: Vec<FixturePage>,
    pub decoded: HashMap<u32, DecodedPixels>,
    pub decoded_masked: HashMap<u32, DecodedPixels>,
}

/// The fixture engine front-end.
pub struct FixtureEngine;

impl PdfEngine for FixtureEngine {
    type Document = FixtureDocument;

    fn open_path(path: &Path) -> Result<FixtureDocument> {
        Err(Error::UnreadableDocument(format!(
            "cannot open {}",
            path.display()
        )))
    }

    fn open_bytes(bytes: &[u8]) -> Result<FixtureDocument> {
        if bytes.starts_with(b"%PDF") {
            Ok(FixtureDocument {
                pages: vec![FixturePage::blank()],
                ..Default::default()
            })
        } else {
            Err(Error::UnreadableDocument(
                "missing %PDF header".to_string(),
            ))
        }
    }

    fn page_count(doc: &FixtureDocument) -> usize {
        doc.pages.len()
    }

    fn page_dimension(doc: &FixtureDocument, page: usize) -> Result<BoundingBox> {
        Ok(fixture_page(doc, page)?.dimension)
    }

    fn page_blocks(doc: &FixtureDocument, page: usize) -> Result<Vec<PageBlock>> {
        Ok(fixture_page(doc, page)?.blocks.clone())
    }

    fn page_images(doc: &FixtureDocument, page: usize) -> Result<Vec<ImageResource>> {
        Ok(fixture_page(doc, page)?.images.clone())
    }

    fn page_widgets(doc: &FixtureDocument, page: usize) -> Result<Vec<WidgetField>> {
        Ok(fixture_page(doc, page)?.widgets.clone())
    }

    fn reserialize(doc: &FixtureDocument, from: usize, to: usize) -> Result<FixtureDocument> {
        let to = to.min(doc.pages.len());
        let from = from.min(to);
        Ok(FixtureDocument {
            pages: doc.pages[from..to].to_vec(),
            decoded: doc.decoded.clone(),
            decoded_masked: doc.decoded_masked.clone(),
        })
    }

    fn decode_image(doc: &FixtureDocument, resource: &ImageResource) -> Result<DecodedPixels> {
        doc.decoded
            .get(&resource.xref)
            .cloned()
            .ok_or_else(|| Error::Engine(format!("no image stream for xref {}", resource.xref)))
    }

    fn decode_image_with_mask(
        doc: &FixtureDocument,
        resource: &ImageResource,
    ) -> Result<DecodedPixels> {
        doc.decoded_masked
            .get(&resource.xref)
            .cloned()
            .ok_or_else(|| Error::Engine(format!("no masked stream for xref {}", resource.xref)))
    }
}

fn fixture_page(doc: &FixtureDocument, page: usize) -> Result<&FixturePage> {
    doc.pages
        .get(page)
        .ok_or_else(|| Error::Engine(format!("fixture has no page {page}")))
}

/// A span at the given vertical position, 12pt tall.
pub fn span(text: &str, x0: f32, y0: f32) -> RawSpan {
    RawSpan {
        text: text.to_string(),
        bbox: BoundingBox::new(x0, y0, x0 + 10.0 * text.len() as f32, y0 + 12.0),
    }
}

/// A text block with one line per span.
pub fn text_block(spans: Vec<RawSpan>) -> PageBlock {
    PageBlock::text(spans.into_iter().map(|s| TextLine { spans: vec![s] }).collect())
}

/// A non-text block the index must filter out.
pub fn image_block() -> PageBlock {
    PageBlock {
        kind: BlockKind::Image,
        lines: Vec::new(),
    }
}

/// An image resource descriptor.
pub fn image_resource(xref: u32, mask_xref: Option<u32>, colorspace: &str) -> ImageResource {
    ImageResource {
        xref,
        mask_xref,
        width: 2,
        height: 2,
        bits_per_component: 8,
        colorspace: colorspace.to_string(),
        name: format!("Im{xref}"),
    }
}
