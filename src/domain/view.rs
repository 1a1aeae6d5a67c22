//! Read-only capability surface shared by the frozen and mutable facets.
//!
//! The comparator and the encoder are written against these traits, so either
//! facet (or a mix of both) can be compared and serialized.

use crate::domain::color::{default_color, Color};
use crate::domain::enums::{Direction, Method, Primitive};
use crate::domain::factory::derive_starting_code;

pub trait ParameterView {
    fn param_type(&self) -> Primitive;
    fn name(&self) -> &str;

    /// `"<type> <name>"`, as it appears in a method signature.
    fn declaration(&self) -> String {
        format!("{} {}", self.param_type(), self.name())
    }
}

pub trait TileView {
    /// Own color, `None` when unset.
    fn color(&self) -> Option<Color>;
    fn barrier_top(&self) -> bool;
    fn barrier_right(&self) -> bool;
    fn barrier_bottom(&self) -> bool;
    fn barrier_left(&self) -> bool;
    fn balls(&self) -> u32;

    /// Own color, or the process-wide default resolved now.
    fn background_color(&self) -> Color {
        self.color().unwrap_or_else(default_color)
    }
}

pub trait GridView {
    type Tile: TileView;

    /// Row-major tile matrix: `tiles()[row][column]`.
    fn tiles(&self) -> &[Vec<Self::Tile>];
    fn size(&self) -> usize;
    fn player_x(&self) -> usize;
    fn player_y(&self) -> usize;
    fn player_direction(&self) -> Direction;

    fn tile(&self, row: usize, column: usize) -> Option<&Self::Tile> {
        self.tiles().get(row).and_then(|r| r.get(column))
    }
}

/// Fields common to both lesson variants.
pub trait LessonView {
    fn name(&self) -> &str;
    fn starting_code(&self) -> &str;
    fn description(&self) -> &str;
    fn hint(&self) -> Option<&str>;
}

pub trait CodeLessonView: LessonView {
    type Parameter: ParameterView;

    fn method_name(&self) -> &str;
    fn parameters(&self) -> &[Self::Parameter];
    fn return_type(&self) -> Primitive;
    fn test(&self) -> &str;

    /// Method skeleton derived from the signature:
    /// `"<returnType> <methodName>(<type> <name>,...) {\n\t\n}"`.
    fn default_starting_code(&self) -> String {
        derive_starting_code(self.return_type(), self.method_name(), self.parameters())
    }
}

pub trait VisualLessonView: LessonView {
    type Grid: GridView;

    fn allowed_methods(&self) -> &[Method];
    fn required_strings(&self) -> &[String];
    fn starting_grids(&self) -> &[Self::Grid];
    fn ending_grids(&self) -> &[Self::Grid];
}

/// Borrowed view of one lesson's concrete variant.
#[derive(Debug)]
pub enum LessonVariant<'a, C, V> {
    Code(&'a C),
    Visual(&'a V),
}

/// A lesson that is exactly one of the two variants.
pub trait LessonKind: LessonView {
    type Code: CodeLessonView;
    type Visual: VisualLessonView;

    fn variant(&self) -> LessonVariant<'_, Self::Code, Self::Visual>;

    fn is_code(&self) -> bool {
        matches!(self.variant(), LessonVariant::Code(_))
    }
}

pub trait UnitView {
    type Lesson: LessonKind;

    fn name(&self) -> &str;
    fn lessons(&self) -> &[Self::Lesson];

    fn lesson(&self, name: &str) -> Option<&Self::Lesson> {
        self.lessons().iter().find(|l| l.name() == name)
    }
}
