//! External system integrations for reco-export.
//!
//! Adapters isolate the collaborators the export pipeline talks to:
//!
//! - [`datasource`] - item stores queried with [`Criteria`](crate::domain::Criteria)
//!   (in-memory fixtures, content repositories)
//! - [`writer`] - structured-document serializers used for chunk files
//! - [`notifier`] - outbound HTTP delivery of export notifications
//!
//! # Design Pattern
//!
//! Each collaborator is a trait with one or more implementations, so the core
//! pipeline can be exercised against in-memory doubles in tests.
//!
//! ```rust
//! use reco_export::adapters::datasource::{DataSource, InMemoryDataSource};
//! use reco_export::domain::{Criteria, Item, ItemType};
//!
//! # async fn example() -> reco_export::domain::Result<()> {
//! let article = ItemType::new(1, "article", "Article")?;
//! let item = Item::builder()
//!     .id("42")
//!     .item_type(article)
//!     .language("eng-GB")
//!     .attribute("title", "Hello")
//!     .build()?;
//!
//! let source = InMemoryDataSource::new("fixtures", vec![item]);
//! let criteria = Criteria::builder().languages(["eng-GB"]).build()?;
//! assert_eq!(source.count_items(&criteria).await?, 1);
//! # Ok(())
//! # }
//! ```

pub mod datasource;
pub mod notifier;
pub mod writer;
