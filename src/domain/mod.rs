//! Domain models and types for reco-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Value objects** ([`Item`], [`ItemType`], [`Criteria`], [`Credentials`])
//! - **Collections** ([`ItemList`], [`ItemGroup`], [`ItemGroupList`])
//! - **Export events** ([`ExportEvent`])
//! - **Error types** ([`RecoError`], [`NotificationError`]) and the [`Result`] alias
//!
//! All value objects are immutable after construction and validated by their
//! constructors or builders:
//!
//! ```rust
//! use reco_export::domain::{Criteria, RecoError};
//!
//! let err = Criteria::builder().limit(-1).build().unwrap_err();
//! assert!(matches!(err, RecoError::InvalidArgument(_)));
//! ```

pub mod collection;
pub mod credentials;
pub mod criteria;
pub mod errors;
pub mod event;
pub mod item;
pub mod result;

pub use collection::{ItemGroup, ItemGroupList, ItemList};
pub use credentials::Credentials;
pub use criteria::{Criteria, CriteriaBuilder, DEFAULT_LIMIT};
pub use errors::{NotificationError, RecoError};
pub use event::{ExportEvent, FULL_EXPORT_ACTION};
pub use item::{AttributeValue, Attributes, Item, ItemBuilder, ItemType};
pub use result::Result;
