//! Core application primitives (runtime, HTTP boundary, wiring)

pub mod bootstrap;
pub mod http;
pub mod runtime;

pub use bootstrap::*;
pub use http::*;
pub use runtime::*;
