//! Result type alias for reco-export

use super::errors::RecoError;

/// Result type alias for reco-export operations
///
/// # Examples
///
/// ```
/// use reco_export::domain::result::Result;
/// use reco_export::domain::errors::RecoError;
///
/// fn failing_function() -> Result<()> {
///     Err(RecoError::InvalidArgument("limit must be non-negative".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RecoError>;
