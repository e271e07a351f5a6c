//! Error types for the document-index and geometry library.
//!
//! This module defines all error types that can occur while building the
//! spatial-text index or running the image-geometry routines.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during indexing and region processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document source could not be opened or parsed.
    ///
    /// Fatal for the index instance; surfaced at construction time.
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// A query referenced a page outside `[0, page_count)`.
    #[error("Page index {page} out of range (document has {page_count} pages)")]
    PageIndexOutOfRange {
        /// The page number the caller asked for
        page: usize,
        /// Number of pages in the document
        page_count: usize,
    },

    /// Template matching was invoked without a template.
    #[error("Missing required template for template matching")]
    MissingTemplate,

    /// The template is larger than the image it is matched against.
    #[error(
        "Template {template_width}x{template_height} exceeds search image {image_width}x{image_height}"
    )]
    TemplateTooLarge {
        /// Template width in pixels
        template_width: u32,
        /// Template height in pixels
        template_height: u32,
        /// Search image width in pixels
        image_width: u32,
        /// Search image height in pixels
        image_height: u32,
    },

    /// A padded crop region falls outside the image extent.
    ///
    /// Out-of-range regions are surfaced, never silently clamped.
    #[error("Crop region ({x0}, {y0})-({x1}, {y1}) exceeds image bounds {width}x{height}")]
    RegionOutOfBounds {
        /// Left edge of the requested region, after padding
        x0: i64,
        /// Top edge of the requested region, after padding
        y0: i64,
        /// Right edge of the requested region, after padding
        x1: i64,
        /// Bottom edge of the requested region, after padding
        y1: i64,
        /// Width of the image being cropped
        width: u32,
        /// Height of the image being cropped
        height: u32,
    },

    /// A decoded sample buffer declared a channel count that cannot be
    /// interpreted as a pixel layout.
    #[error("Unsupported pixel layout: {channels} channels")]
    UnsupportedPixelLayout {
        /// Channel count reported by the engine
        channels: u8,
    },

    /// The underlying PDF engine reported a failure.
    #[error("Engine error: {0}")]
    Engine(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
