//! Course catalogs of programming lessons.
//!
//! A catalog is an ordered list of units, each holding uniquely named
//! lessons. A lesson is either a code lesson (write a method with a given
//! signature) or a visual lesson (steer a robot across tile grids). Every
//! entity exists in a frozen and a mutable facet, is built only through a
//! validating factory, and round-trips through a JSON codec.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
