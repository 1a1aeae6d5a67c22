//! Mutable facet: setter-bearing counterparts of every entity.
//!
//! Every setter re-runs the factory's checks and either applies fully or
//! returns an error with the value untouched, so a mutable instance always
//! satisfies the same invariants as its frozen counterpart. `freeze()` and
//! `From<&Frozen>` convert between the two; both deep-copy.
//!
//! Mutable instances are not synchronized. Confine one to a single owner or
//! wrap it in a lock before sharing.

pub mod factory;
pub mod grid;
pub mod lesson;
pub mod tile;
pub mod unit;

pub use factory::MutableFactory;
pub use grid::MutableGrid;
pub use lesson::{MutableCodeLesson, MutableLesson, MutableVisualLesson};
pub use tile::{MutableParameter, MutableTile};
pub use unit::MutableUnit;

use crate::domain::error::DomainError;

pub(crate) fn out_of_bounds(field: &'static str, index: usize, len: usize) -> DomainError {
    DomainError::invalid(field, format!("index {index} out of bounds for length {len}"))
}

mod eq {
    use super::*;
    use crate::domain::compare::{
        code_lessons_equal, grids_equal, lessons_equal, parameters_equal, structural_eq,
        tiles_equal, units_equal, visual_lessons_equal,
    };

    structural_eq!(
        MutableParameter => parameters_equal,
        MutableTile => tiles_equal,
        MutableGrid => grids_equal,
        MutableCodeLesson => code_lessons_equal,
        MutableVisualLesson => visual_lessons_equal,
        MutableLesson => lessons_equal,
        MutableUnit => units_equal,
    );
}
