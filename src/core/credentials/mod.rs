//! Export credentials strategies
//!
//! A chunk directory is secured according to a named credentials method:
//!
//! - `none` - directory left open, no credentials
//! - `user` - credentials configured for the site scope
//! - `basic` - fresh random login and password for every export
//!
//! Methods are looked up in an [`ExportCredentialsDispatcher`].

pub mod dispatcher;
pub mod generator;
pub mod resolver;
pub mod strategies;

pub use dispatcher::{ExportCredentialsDispatcher, ExportCredentialsStrategy};
pub use generator::generate;
pub use resolver::{ConfigCredentialsResolver, CredentialsResolver};
pub use strategies::{
    BasicCredentialsStrategy, NoCredentialsStrategy, UserCredentialsStrategy, BASIC_METHOD,
    NONE_METHOD, USER_METHOD,
};
