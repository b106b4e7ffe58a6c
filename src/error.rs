use thiserror::Error;

/// Error type returned by facesuit operations.
///
/// Configuration and asset errors are fatal at startup; degenerate
/// placements are recovered inside compositing by skipping the face.
#[derive(Debug, Error)]
pub enum FaceSuitError {
    /// Catalog built from empty or mismatched-length parameter sequences.
    #[error("invalid overlay configuration: {0}")]
    Configuration(String),

    /// A loaded asset violates an invariant (reserved `_alpha` name,
    /// zero dimension).
    #[error("invalid overlay asset: {0}")]
    InvalidAsset(String),

    /// A face's scaled overlay collapsed to zero size.
    #[error("degenerate placement: scaled overlay width is {width}")]
    DegeneratePlacement {
        /// The non-positive scaled width that made the placement unusable.
        width: i64,
    },

    /// An asset file could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Filesystem failure while scanning the overlay directory.
    #[error("i/o error while scanning overlay directory: {0}")]
    Io(#[from] std::io::Error),
}
