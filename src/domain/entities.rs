//! Frozen entities: immutable once the factory hands them out.
//!
//! Fields are crate-private; the only public way to obtain an instance is
//! through [`Factory`](crate::domain::Factory), the codec, or freezing a
//! mutable counterpart.

use std::fmt;

use crate::domain::color::Color;
use crate::domain::enums::{Direction, Method, Primitive};
use crate::domain::view::{
    CodeLessonView, GridView, LessonKind, LessonVariant, LessonView, ParameterView, TileView,
    UnitView, VisualLessonView,
};

/// A typed, named argument of a code lesson's method. Never `void`.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub(crate) param_type: Primitive,
    pub(crate) name: String,
}

impl ParameterView for Parameter {
    fn param_type(&self) -> Primitive {
        self.param_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.param_type, self.name)
    }
}

/// One grid cell.
#[derive(Debug, Clone)]
pub struct Tile {
    pub(crate) color: Option<Color>,
    pub(crate) barrier_top: bool,
    pub(crate) barrier_right: bool,
    pub(crate) barrier_bottom: bool,
    pub(crate) barrier_left: bool,
    pub(crate) balls: u32,
}

impl TileView for Tile {
    fn color(&self) -> Option<Color> {
        self.color
    }

    fn barrier_top(&self) -> bool {
        self.barrier_top
    }

    fn barrier_right(&self) -> bool {
        self.barrier_right
    }

    fn barrier_bottom(&self) -> bool {
        self.barrier_bottom
    }

    fn barrier_left(&self) -> bool {
        self.barrier_left
    }

    fn balls(&self) -> u32 {
        self.balls
    }
}

/// Square tile matrix plus the robot's position and facing.
#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) tiles: Vec<Vec<Tile>>,
    pub(crate) size: usize,
    pub(crate) player_x: usize,
    pub(crate) player_y: usize,
    pub(crate) player_direction: Direction,
}

impl GridView for Grid {
    type Tile = Tile;

    fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    fn size(&self) -> usize {
        self.size
    }

    fn player_x(&self) -> usize {
        self.player_x
    }

    fn player_y(&self) -> usize {
        self.player_y
    }

    fn player_direction(&self) -> Direction {
        self.player_direction
    }
}

/// "Write a method" exercise.
#[derive(Debug, Clone)]
pub struct CodeLesson {
    pub(crate) name: String,
    pub(crate) starting_code: String,
    pub(crate) description: String,
    pub(crate) hint: Option<String>,
    pub(crate) method_name: String,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) return_type: Primitive,
    pub(crate) test: String,
}

impl LessonView for CodeLesson {
    fn name(&self) -> &str {
        &self.name
    }

    fn starting_code(&self) -> &str {
        &self.starting_code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl CodeLessonView for CodeLesson {
    type Parameter = Parameter;

    fn method_name(&self) -> &str {
        &self.method_name
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    fn return_type(&self) -> Primitive {
        self.return_type
    }

    fn test(&self) -> &str {
        &self.test
    }
}

/// "Move the robot" exercise: each starting grid must be driven to its ending grid.
#[derive(Debug, Clone)]
pub struct VisualLesson {
    pub(crate) name: String,
    pub(crate) starting_code: String,
    pub(crate) description: String,
    pub(crate) hint: Option<String>,
    pub(crate) allowed_methods: Vec<Method>,
    pub(crate) required_strings: Vec<String>,
    pub(crate) starting_grids: Vec<Grid>,
    pub(crate) ending_grids: Vec<Grid>,
}

impl LessonView for VisualLesson {
    fn name(&self) -> &str {
        &self.name
    }

    fn starting_code(&self) -> &str {
        &self.starting_code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl VisualLessonView for VisualLesson {
    type Grid = Grid;

    fn allowed_methods(&self) -> &[Method] {
        &self.allowed_methods
    }

    fn required_strings(&self) -> &[String] {
        &self.required_strings
    }

    fn starting_grids(&self) -> &[Grid] {
        &self.starting_grids
    }

    fn ending_grids(&self) -> &[Grid] {
        &self.ending_grids
    }
}

/// A lesson is exactly one of the two variants.
#[derive(Debug, Clone)]
pub enum Lesson {
    Code(CodeLesson),
    Visual(VisualLesson),
}

impl Lesson {
    pub fn as_code(&self) -> Option<&CodeLesson> {
        match self {
            Lesson::Code(lesson) => Some(lesson),
            Lesson::Visual(_) => None,
        }
    }

    pub fn as_visual(&self) -> Option<&VisualLesson> {
        match self {
            Lesson::Visual(lesson) => Some(lesson),
            Lesson::Code(_) => None,
        }
    }

    fn common(&self) -> &dyn LessonView {
        match self {
            Lesson::Code(lesson) => lesson,
            Lesson::Visual(lesson) => lesson,
        }
    }
}

impl LessonView for Lesson {
    fn name(&self) -> &str {
        self.common().name()
    }

    fn starting_code(&self) -> &str {
        self.common().starting_code()
    }

    fn description(&self) -> &str {
        self.common().description()
    }

    fn hint(&self) -> Option<&str> {
        self.common().hint()
    }
}

impl LessonKind for Lesson {
    type Code = CodeLesson;
    type Visual = VisualLesson;

    fn variant(&self) -> LessonVariant<'_, CodeLesson, VisualLesson> {
        match self {
            Lesson::Code(lesson) => LessonVariant::Code(lesson),
            Lesson::Visual(lesson) => LessonVariant::Visual(lesson),
        }
    }
}

impl From<CodeLesson> for Lesson {
    fn from(lesson: CodeLesson) -> Self {
        Lesson::Code(lesson)
    }
}

impl From<VisualLesson> for Lesson {
    fn from(lesson: VisualLesson) -> Self {
        Lesson::Visual(lesson)
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named, ordered collection of lessons with unique names.
#[derive(Debug, Clone)]
pub struct Unit {
    pub(crate) name: String,
    pub(crate) lessons: Vec<Lesson>,
}

impl UnitView for Unit {
    type Lesson = Lesson;

    fn name(&self) -> &str {
        &self.name
    }

    fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
