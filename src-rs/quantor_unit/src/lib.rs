#![cfg_attr(doc, doc = include_str!("../README.md"))]
//! Units, scales, unit families and the unit registry

mod base;
mod builder;
pub mod catalog;
mod error;
mod prefix;
mod registry;
mod scale;
mod system;
mod unit;
mod util;

pub use base::UnitBase;
pub use builder::UnitBuilder;
pub use catalog::quantity;
pub use error::ConstructionError;
pub use prefix::{SiPrefix, SiPrefixes};
pub use registry::UnitRegistry;
pub use scale::{Scale, ScaleKind};
pub use system::UnitSystem;
pub use unit::{ANONYMOUS_QUANTITY, AbsoluteUnit, Unit};
pub use util::is_close;
