//! Product and payment-proof images

/// Default CDN delivery base for product images.
pub const DEFAULT_CDN_BASE: &str = "https://res.cloudinary.com/dm3icigfr/image/upload";

/// Asset shown when an image is missing or fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.png";

/// Square thumbnail edge used on the checkout summary.
pub const CHECKOUT_THUMBNAIL: u32 = 64;

/// Square thumbnail edge used on the order detail item list.
pub const DETAIL_THUMBNAIL: u32 = 100;

/// Builds CDN delivery URLs for stored image references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    base: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE)
    }
}

impl ImageUrls {
    /// Create a URL builder for the given delivery base.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();

        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Square, cropped thumbnail for an image reference.
    pub fn thumbnail(&self, reference: &str, edge: u32) -> String {
        format!(
            "{}/w_{edge},h_{edge},c_fill,q_auto,f_auto/{}",
            self.base,
            reference.trim_start_matches('/')
        )
    }

    /// Thumbnail source with placeholder fallback, or the placeholder alone when there is
    /// no reference at all.
    pub fn thumbnail_source(&self, reference: Option<&str>, edge: u32) -> ImageSource {
        match reference.filter(|reference| !reference.is_empty()) {
            Some(reference) => ImageSource::new(self.thumbnail(reference, edge)),
            None => ImageSource::placeholder(),
        }
    }
}

/// Which asset an image element currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStage {
    /// The requested asset.
    Primary,

    /// The placeholder, after the primary failed.
    Placeholder,

    /// Both failed; the element shows nothing further.
    Exhausted,
}

/// An image with a one-shot fallback to the placeholder asset.
///
/// Load errors only ever move forward through [`ImageStage`], so a failing placeholder
/// cannot trigger another fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    primary: String,
    stage: ImageStage,
}

impl ImageSource {
    /// Source showing `primary` first.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            stage: ImageStage::Primary,
        }
    }

    /// Source that starts on the placeholder.
    pub fn placeholder() -> Self {
        Self {
            primary: PLACEHOLDER_IMAGE.to_string(),
            stage: ImageStage::Placeholder,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> ImageStage {
        self.stage
    }

    /// URL to load, or `None` once both assets have failed.
    pub fn current(&self) -> Option<&str> {
        match self.stage {
            ImageStage::Primary => Some(&self.primary),
            ImageStage::Placeholder => Some(PLACEHOLDER_IMAGE),
            ImageStage::Exhausted => None,
        }
    }

    /// Record a load failure of the current asset and return the next URL to try.
    pub fn on_error(&mut self) -> Option<&str> {
        self.stage = match self.stage {
            ImageStage::Primary if self.primary != PLACEHOLDER_IMAGE => ImageStage::Placeholder,
            ImageStage::Primary | ImageStage::Placeholder | ImageStage::Exhausted => {
                ImageStage::Exhausted
            }
        };

        self.current()
    }
}
