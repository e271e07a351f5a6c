//! The external PDF engine boundary.
//!
//! The index never parses PDF syntax itself: an external engine owns the
//! document and yields, per page, block → line → span text structures, raw
//! image-resource descriptors, and interactive form widgets. [`PdfEngine`]
//! is the contract that engine must satisfy; the rest of the crate is
//! generic over it.
//!
//! Engine methods are associated functions over an opaque `Document` type
//! rather than `&self` methods, so stateless engine front-ends can
//! implement the trait as unit structs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::BoundingBox;

/// Kind of a page-level content block as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// A block containing text lines.
    Text,
    /// A placed raster image.
    Image,
    /// Vector drawing content.
    Drawing,
}

/// A single text run with one bounding box, as the engine reports it.
///
/// Coordinates are page-local points with `x0 < x1` and `y0 < y1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// The span's text content
    pub text: String,
    /// Bounding box of the span on its page
    pub bbox: BoundingBox,
}

/// One line of spans inside a text block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextLine {
    /// Spans in content-stream order
    pub spans: Vec<RawSpan>,
}

/// A page-level content block (text, image, or drawing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBlock {
    /// What the block contains
    pub kind: BlockKind,
    /// Lines of the block; empty for non-text blocks
    pub lines: Vec<TextLine>,
}

impl PageBlock {
    /// Create a text block from its lines.
    pub fn text(lines: Vec<TextLine>) -> Self {
        Self {
            kind: BlockKind::Text,
            lines,
        }
    }
}

/// Descriptor of a raster image resource embedded on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResource {
    /// Cross-reference id of the image stream
    pub xref: u32,
    /// Cross-reference id of the image's alpha mask, if it has one
    pub mask_xref: Option<u32>,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Bits per component (typically 8)
    pub bits_per_component: u8,
    /// Colorspace name, e.g. `DeviceRGB` or `DeviceGray`
    pub colorspace: String,
    /// Resource name the page refers to the image by
    pub name: String,
}

impl ImageResource {
    /// Whether the resource declares an alpha mask.
    pub fn has_mask(&self) -> bool {
        self.mask_xref.is_some()
    }
}

/// An interleaved 8-bit sample buffer decoded by the engine.
///
/// `channels` counts color components plus alpha: grayscale 1,
/// gray + alpha 2, RGB 3, RGBA 4, CMYK + alpha 5.
#[derive(Debug, Clone)]
pub struct DecodedPixels {
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Components per pixel, alpha included
    pub channels: u8,
    /// Row-major interleaved samples, `width * height * channels` bytes
    pub samples: Vec<u8>,
}

/// One interactive form widget on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetField {
    /// Field name (`/T`)
    pub name: String,
    /// Current field value (`/V`), absent when the field is unset
    pub value: Option<String>,
}

/// Contract an external PDF engine must satisfy for the index to consume
/// its documents.
///
/// All fallible methods return the crate [`Result`]; open failures are
/// reported as [`Error::UnreadableDocument`](crate::Error::UnreadableDocument)
/// and everything else the engine cannot deliver as
/// [`Error::Engine`](crate::Error::Engine).
pub trait PdfEngine {
    /// Opaque handle to an opened document. Owns every page and resource;
    /// pages never outlive it.
    type Document;

    /// Open a document from a file path.
    fn open_path(path: &Path) -> Result<Self::Document>;

    /// Open a document from an in-memory byte stream.
    fn open_bytes(bytes: &[u8]) -> Result<Self::Document>;

    /// Number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Page rectangle `(x0, y0, x1, y1)` in points.
    fn page_dimension(doc: &Self::Document, page: usize) -> Result<BoundingBox>;

    /// Block → line → span structure of one page.
    fn page_blocks(doc: &Self::Document, page: usize) -> Result<Vec<PageBlock>>;

    /// Raw image resources placed on one page, in discovery order.
    fn page_images(doc: &Self::Document, page: usize) -> Result<Vec<ImageResource>>;

    /// Interactive form widgets on one page, in discovery order.
    fn page_widgets(doc: &Self::Document, page: usize) -> Result<Vec<WidgetField>>;

    /// Re-serialize pages `[from, to)` into an independent secondary
    /// document, decoupled from any mutation of the primary one.
    fn reserialize(doc: &Self::Document, from: usize, to: usize) -> Result<Self::Document>;

    /// Decode an image resource to raw samples, ignoring any mask.
    fn decode_image(doc: &Self::Document, resource: &ImageResource) -> Result<DecodedPixels>;

    /// Decode an image resource composited with its alpha mask (RGBA out).
    fn decode_image_with_mask(
        doc: &Self::Document,
        resource: &ImageResource,
    ) -> Result<DecodedPixels>;
}
