//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Entities come in two facets: the frozen types in [`entities`] and their
//! editable counterparts in [`mutable`]. Both implement the read-only traits
//! in [`view`], which is what the comparator and the codec work against.

pub mod color;
pub mod compare;
pub mod entities;
pub mod enums;
pub mod error;
pub mod factory;
pub mod mutable;
pub mod view;

pub use color::{default_color, set_default_color, Color, ColorParseError};
pub use compare::{
    code_lessons_equal, grids_equal, lessons_equal, parameters_equal, tiles_equal,
    unit_lists_equal, units_equal, visual_lessons_equal,
};
pub use entities::*;
pub use enums::{Direction, Method, Primitive};
pub use error::{DomainError, DomainResult};
pub use factory::{
    derive_starting_code, CodeLessonArgs, EntityFactory, Factory, VisualLessonArgs,
    RESERVED_METHOD_NAME,
};
pub use mutable::{
    MutableCodeLesson, MutableFactory, MutableGrid, MutableLesson, MutableParameter,
    MutableTile, MutableUnit, MutableVisualLesson,
};
pub use view::{
    CodeLessonView, GridView, LessonKind, LessonVariant, LessonView, ParameterView, TileView,
    UnitView, VisualLessonView,
};
