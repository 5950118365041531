//! Morphological inflection lookup.
//!
//! The inflection resource itself is an external capability behind the
//! [`Inflector`] trait. [`InflectionLookup`] memoizes it with an explicit
//! [`InflectionCache`] owned by the probing run, and [`UnimorphTable`] provides
//! a resource backed by UniMorph-format tables.

mod cache;
mod error;
mod lookup;
mod unimorph;

pub use cache::{CacheStats, InflectionCache};
pub use error::InflectionError;
pub use lookup::{InflectionLookup, Inflector};
pub use unimorph::UnimorphTable;
