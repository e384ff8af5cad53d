//! Vector index engine: exhaustive flat search with optional
//! caller-supplied ids, a string factory, cloning, and persistence.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod factory;
pub mod flat;
pub mod idmap;
pub mod io;
pub mod metric;
pub mod selector;

pub use factory::{clone_index, index_factory, AnyIndex};
pub use flat::FlatIndex;
pub use idmap::IdMapIndex;
pub use selector::IdSelector;
