//! Item grouping strategies
//!
//! A [`GroupItemStrategy`] splits the items a data source holds for some
//! criteria into named [`ItemGroup`](crate::domain::ItemGroup)s. Strategies
//! are registered under a key in a [`GroupItemStrategyDispatcher`] and
//! selected by that key at call time.

pub mod dispatcher;
pub mod item_type_language;

pub use dispatcher::{GroupItemStrategy, GroupItemStrategyDispatcher};
pub use item_type_language::{ItemTypeAndLanguageStrategy, ITEM_TYPE_AND_LANGUAGE};
