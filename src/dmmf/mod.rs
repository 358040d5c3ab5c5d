//! Prisma DMMF datamodel types and loaders.
//!
//! The generator never parses `schema.prisma` itself: Prisma hands over the
//! already parsed datamodel (models, fields, enums) either through the
//! generator protocol or as a DMMF JSON dump on disk.

mod load;
mod types;

pub use load::*;
pub use types::*;
