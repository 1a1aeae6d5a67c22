use crate::domain::color::Color;
use crate::domain::enums::{Direction, Primitive};
use crate::domain::error::DomainResult;
use crate::domain::factory::{CodeLessonArgs, EntityFactory, VisualLessonArgs};
use crate::domain::mutable::{
    MutableCodeLesson, MutableGrid, MutableLesson, MutableParameter, MutableTile,
    MutableUnit, MutableVisualLesson,
};

/// Factory for the mutable facet, applying the same checks as `Factory`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutableFactory;

impl EntityFactory for MutableFactory {
    type Parameter = MutableParameter;
    type Tile = MutableTile;
    type Grid = MutableGrid;
    type Lesson = MutableLesson;
    type Unit = MutableUnit;

    fn parameter(&self, param_type: Primitive, name: String) -> DomainResult<MutableParameter> {
        MutableParameter::new(param_type, name)
    }

    fn tile(
        &self,
        color: Option<Color>,
        barrier_top: bool,
        barrier_right: bool,
        barrier_bottom: bool,
        barrier_left: bool,
        balls: i32,
    ) -> DomainResult<MutableTile> {
        MutableTile::new(
            color,
            barrier_top,
            barrier_right,
            barrier_bottom,
            barrier_left,
            balls,
        )
    }

    fn grid(
        &self,
        tiles: Vec<Vec<MutableTile>>,
        size: usize,
        player_x: usize,
        player_y: usize,
        player_direction: Direction,
    ) -> DomainResult<MutableGrid> {
        MutableGrid::from_parts(tiles, size, player_x, player_y, player_direction)
    }

    fn code_lesson(&self, args: CodeLessonArgs<MutableParameter>) -> DomainResult<MutableLesson> {
        MutableCodeLesson::new(args).map(MutableLesson::Code)
    }

    fn visual_lesson(&self, args: VisualLessonArgs<MutableGrid>) -> DomainResult<MutableLesson> {
        MutableVisualLesson::new(args).map(MutableLesson::Visual)
    }

    fn unit(&self, name: String, lessons: Vec<MutableLesson>) -> DomainResult<MutableUnit> {
        MutableUnit::new(name, lessons)
    }
}
