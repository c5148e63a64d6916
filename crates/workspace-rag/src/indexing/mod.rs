//! Write path: mapping documents into per-chunk index records

pub mod writer;

pub use writer::IndexWriter;
