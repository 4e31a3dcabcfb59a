//! HTTP request handlers.

pub mod accounts;
pub mod arrays;
pub mod common;
pub mod health;
pub mod history;

pub use accounts::*;
pub use arrays::*;
pub use common::*;
pub use health::*;
pub use history::*;
