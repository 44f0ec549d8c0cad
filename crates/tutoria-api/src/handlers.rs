//! Request handlers.

pub mod analyze;
pub mod health;
pub mod pages;

pub use analyze::*;
pub use health::*;
pub use pages::*;
