#![cfg_attr(doc, doc = include_str!("../README.md"))]
//! SI dimension vectors for the quantor unit system

mod base;
mod dimension;

pub use base::BaseDimension;
pub use dimension::{CombineOp, SIDimension};
