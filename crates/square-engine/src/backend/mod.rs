//! Backend implementations.

pub mod headless;
