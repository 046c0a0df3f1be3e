//! Rich-text tokenizing, measuring, wrapping and auto-fit of the text column.

pub mod fit;
pub mod markup;
pub mod measure;
pub mod shape;
pub mod wrap;
