//! Flat-file resources consumed by the transport layer.

pub mod lines;

pub use lines::LineStore;
