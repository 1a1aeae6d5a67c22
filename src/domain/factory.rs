//! Validated construction of every entity.
//!
//! All invariants live here. The frozen [`Factory`], the mutable facet's
//! `MutableFactory` and the mutable setters share the `check_*` functions, so
//! each rule is enforced identically on every construction path.

use itertools::Itertools;
use tracing::trace;

use crate::domain::color::Color;
use crate::domain::entities::{CodeLesson, Grid, Lesson, Parameter, Tile, Unit, VisualLesson};
use crate::domain::enums::{Direction, Method, Primitive};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::view::{LessonView, ParameterView};

/// Method name reserved for the lesson's own verification code.
pub const RESERVED_METHOD_NAME: &str = "test";

/// Inputs for a code lesson, generic over the parameter facet.
#[derive(Debug, Clone)]
pub struct CodeLessonArgs<P> {
    pub name: String,
    pub starting_code: String,
    pub description: String,
    pub hint: Option<String>,
    pub method_name: String,
    pub parameters: Vec<P>,
    pub return_type: Primitive,
    pub test: String,
}

/// Inputs for a visual lesson, generic over the grid facet.
#[derive(Debug, Clone)]
pub struct VisualLessonArgs<G> {
    pub name: String,
    pub starting_code: String,
    pub description: String,
    pub hint: Option<String>,
    pub allowed_methods: Vec<Method>,
    pub required_strings: Vec<String>,
    pub starting_grids: Vec<G>,
    pub ending_grids: Vec<G>,
}

/// Constructor surface, one operation per entity kind.
///
/// Each operation returns a fully validated instance or fails without side
/// effects. The codec is generic over this trait so it can load straight into
/// either facet.
pub trait EntityFactory {
    type Parameter;
    type Tile;
    type Grid;
    type Lesson;
    type Unit;

    fn parameter(&self, param_type: Primitive, name: String) -> DomainResult<Self::Parameter>;

    fn tile(
        &self,
        color: Option<Color>,
        barrier_top: bool,
        barrier_right: bool,
        barrier_bottom: bool,
        barrier_left: bool,
        balls: i32,
    ) -> DomainResult<Self::Tile>;

    fn grid(
        &self,
        tiles: Vec<Vec<Self::Tile>>,
        size: usize,
        player_x: usize,
        player_y: usize,
        player_direction: Direction,
    ) -> DomainResult<Self::Grid>;

    fn code_lesson(&self, args: CodeLessonArgs<Self::Parameter>) -> DomainResult<Self::Lesson>;

    fn visual_lesson(&self, args: VisualLessonArgs<Self::Grid>) -> DomainResult<Self::Lesson>;

    fn unit(&self, name: String, lessons: Vec<Self::Lesson>) -> DomainResult<Self::Unit>;

    /// Tile without a color of its own.
    fn plain_tile(
        &self,
        barrier_top: bool,
        barrier_right: bool,
        barrier_bottom: bool,
        barrier_left: bool,
        balls: i32,
    ) -> DomainResult<Self::Tile> {
        self.tile(
            None,
            barrier_top,
            barrier_right,
            barrier_bottom,
            barrier_left,
            balls,
        )
    }
}

/// Factory for the frozen facet. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct Factory;

impl EntityFactory for Factory {
    type Parameter = Parameter;
    type Tile = Tile;
    type Grid = Grid;
    type Lesson = Lesson;
    type Unit = Unit;

    fn parameter(&self, param_type: Primitive, name: String) -> DomainResult<Parameter> {
        check_parameter_type(param_type)?;
        Ok(Parameter { param_type, name })
    }

    fn tile(
        &self,
        color: Option<Color>,
        barrier_top: bool,
        barrier_right: bool,
        barrier_bottom: bool,
        barrier_left: bool,
        balls: i32,
    ) -> DomainResult<Tile> {
        let balls = check_balls(balls)?;
        Ok(Tile {
            color,
            barrier_top,
            barrier_right,
            barrier_bottom,
            barrier_left,
            balls,
        })
    }

    fn grid(
        &self,
        tiles: Vec<Vec<Tile>>,
        size: usize,
        player_x: usize,
        player_y: usize,
        player_direction: Direction,
    ) -> DomainResult<Grid> {
        check_grid(&tiles, size, player_x, player_y)?;
        Ok(Grid {
            tiles,
            size,
            player_x,
            player_y,
            player_direction,
        })
    }

    fn code_lesson(&self, args: CodeLessonArgs<Parameter>) -> DomainResult<Lesson> {
        check_method_name(&args.method_name)?;
        check_unique_parameters(args.parameters.iter().map(ParameterView::name))?;
        trace!(name = %args.name, "code lesson validated");
        Ok(Lesson::Code(CodeLesson {
            name: args.name,
            starting_code: args.starting_code,
            description: args.description,
            hint: args.hint,
            method_name: args.method_name,
            parameters: args.parameters,
            return_type: args.return_type,
            test: args.test,
        }))
    }

    fn visual_lesson(&self, args: VisualLessonArgs<Grid>) -> DomainResult<Lesson> {
        check_grid_counts(args.starting_grids.len(), args.ending_grids.len())?;
        trace!(name = %args.name, "visual lesson validated");
        Ok(Lesson::Visual(VisualLesson {
            name: args.name,
            starting_code: args.starting_code,
            description: args.description,
            hint: args.hint,
            allowed_methods: distinct_methods(args.allowed_methods),
            required_strings: args.required_strings,
            starting_grids: args.starting_grids,
            ending_grids: args.ending_grids,
        }))
    }

    fn unit(&self, name: String, lessons: Vec<Lesson>) -> DomainResult<Unit> {
        check_unique_lessons(&name, lessons.iter().map(LessonView::name))?;
        Ok(Unit { name, lessons })
    }
}

/// Render a method skeleton from an already validated signature.
pub fn derive_starting_code<P: ParameterView>(
    return_type: Primitive,
    method_name: &str,
    parameters: &[P],
) -> String {
    let params = parameters.iter().map(ParameterView::declaration).join(",");
    format!("{return_type} {method_name}({params}) {{\n\t\n}}")
}

// ============================================================
// Shared invariant checks
// ============================================================

pub(crate) fn check_parameter_type(param_type: Primitive) -> DomainResult<()> {
    if param_type.is_void() {
        return Err(DomainError::invalid(
            "type",
            "a parameter cannot be of type void",
        ));
    }
    Ok(())
}

pub(crate) fn check_balls(balls: i32) -> DomainResult<u32> {
    u32::try_from(balls)
        .map_err(|_| DomainError::invalid("balls", format!("must be >= 0, got {balls}")))
}

pub(crate) fn check_size(size: usize) -> DomainResult<()> {
    if size < 1 {
        return Err(DomainError::invalid("size", "must be >= 1"));
    }
    Ok(())
}

pub(crate) fn check_player(player_x: usize, player_y: usize, size: usize) -> DomainResult<()> {
    if player_x >= size {
        return Err(DomainError::invalid(
            "playerX",
            format!("{player_x} is outside a grid of size {size}"),
        ));
    }
    if player_y >= size {
        return Err(DomainError::invalid(
            "playerY",
            format!("{player_y} is outside a grid of size {size}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_grid<T>(
    tiles: &[Vec<T>],
    size: usize,
    player_x: usize,
    player_y: usize,
) -> DomainResult<()> {
    check_size(size)?;
    if tiles.len() != size {
        return Err(DomainError::invalid(
            "tiles",
            format!("expected {size} rows, got {}", tiles.len()),
        ));
    }
    if let Some((row, cols)) = tiles.iter().enumerate().find(|(_, r)| r.len() != size) {
        return Err(DomainError::invalid(
            "tiles",
            format!("expected {size} columns in row {row}, got {}", cols.len()),
        ));
    }
    check_player(player_x, player_y, size)
}

pub(crate) fn check_method_name(method_name: &str) -> DomainResult<()> {
    if method_name == RESERVED_METHOD_NAME {
        return Err(DomainError::invalid(
            "methodName",
            format!("'{RESERVED_METHOD_NAME}' is reserved"),
        ));
    }
    Ok(())
}

pub(crate) fn check_unique_parameters<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> DomainResult<()> {
    match names.into_iter().duplicates().next() {
        Some(name) => Err(DomainError::invalid(
            "parameters",
            format!("duplicate parameter name '{name}'"),
        )),
        None => Ok(()),
    }
}

pub(crate) fn check_unique_lessons<'a>(
    unit_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> DomainResult<()> {
    match names.into_iter().duplicates().next() {
        Some(name) => Err(DomainError::invalid(
            "lessons",
            format!("duplicate lesson name '{name}' in unit '{unit_name}'"),
        )),
        None => Ok(()),
    }
}

/// One starting grid requires one ending grid; several starting grids
/// require one ending grid or one per starting grid. Neither may be empty.
pub(crate) fn check_grid_counts(starting: usize, ending: usize) -> DomainResult<()> {
    if starting == 0 {
        return Err(DomainError::invalid("startingGrids", "at least one grid is required"));
    }
    if ending == 0 {
        return Err(DomainError::invalid("endingGrids", "at least one grid is required"));
    }
    if starting == 1 && ending != 1 {
        return Err(DomainError::invalid(
            "endingGrids",
            format!("1 starting grid allows exactly 1 ending grid, got {ending}"),
        ));
    }
    if starting > 1 && ending != 1 && ending != starting {
        return Err(DomainError::invalid(
            "endingGrids",
            format!("{starting} starting grids allow 1 or {starting} ending grids, got {ending}"),
        ));
    }
    Ok(())
}

/// Allowed methods form an ordered set: first occurrence wins.
pub(crate) fn distinct_methods(methods: Vec<Method>) -> Vec<Method> {
    methods.into_iter().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::{CodeLessonView, GridView, TileView, UnitView, VisualLessonView};
    use rstest::rstest;

    fn blank_grid(size: usize) -> Grid {
        let tiles = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| Factory.plain_tile(false, false, false, false, 0).unwrap())
                    .collect()
            })
            .collect();
        Factory
            .grid(tiles, size, 0, 0, Direction::Right)
            .unwrap()
    }

    fn visual(name: &str, starting: usize, ending: usize) -> DomainResult<Lesson> {
        Factory.visual_lesson(VisualLessonArgs {
            name: name.into(),
            starting_code: String::new(),
            description: "walk".into(),
            hint: None,
            allowed_methods: vec![Method::Move],
            required_strings: vec![],
            starting_grids: (0..starting).map(|_| blank_grid(2)).collect(),
            ending_grids: (0..ending).map(|_| blank_grid(2)).collect(),
        })
    }

    fn code(method_name: &str, params: &[(&str, Primitive)]) -> DomainResult<Lesson> {
        let parameters = params
            .iter()
            .map(|(n, t)| Factory.parameter(*t, n.to_string()))
            .collect::<DomainResult<Vec<_>>>()?;
        Factory.code_lesson(CodeLessonArgs {
            name: "Sum".into(),
            starting_code: String::new(),
            description: "add".into(),
            hint: Some("use +".into()),
            method_name: method_name.into(),
            parameters,
            return_type: Primitive::Int,
            test: "return sum(1, 2) == 3;".into(),
        })
    }

    #[test]
    fn given_void_type_when_creating_parameter_then_rejected() {
        let err = Factory.parameter(Primitive::Void, "x".into()).unwrap_err();
        assert_eq!(err.field(), "type");
        assert!(Factory.parameter(Primitive::IntArray, "xs".into()).is_ok());
    }

    #[test]
    fn given_negative_balls_when_creating_tile_then_rejected() {
        let err = Factory.tile(None, false, false, false, false, -1).unwrap_err();
        assert_eq!(err.field(), "balls");
        let tile = Factory
            .tile(Some(Color::BLACK), true, false, true, false, 3)
            .unwrap();
        assert_eq!(tile.balls(), 3);
        assert!(tile.barrier_top() && tile.barrier_bottom());
    }

    #[test]
    fn given_mismatched_matrix_when_creating_grid_then_rejected() {
        let row = || vec![Factory.plain_tile(false, false, false, false, 0).unwrap(); 3];
        // 2 rows for size 3
        let err = Factory
            .grid(vec![row(), row()], 3, 0, 0, Direction::Top)
            .unwrap_err();
        assert_eq!(err.field(), "tiles");

        // ragged second row
        let mut ragged = vec![row(), row(), row()];
        ragged[1].pop();
        assert!(Factory.grid(ragged, 3, 0, 0, Direction::Top).is_err());
    }

    #[test]
    fn given_player_outside_grid_when_creating_grid_then_rejected() {
        let tiles = blank_grid(2).tiles;
        let err = Factory
            .grid(tiles, 2, 0, 2, Direction::Left)
            .unwrap_err();
        assert_eq!(err.field(), "playerY");
    }

    #[test]
    fn given_zero_size_when_creating_grid_then_rejected() {
        let err = Factory.grid(vec![], 0, 0, 0, Direction::Top).unwrap_err();
        assert_eq!(err.field(), "size");
    }

    #[rstest]
    #[case(1, 1, true)]
    #[case(1, 2, false)]
    #[case(3, 2, false)]
    #[case(3, 1, true)]
    #[case(3, 3, true)]
    #[case(2, 3, false)]
    #[case(0, 1, false)]
    #[case(1, 0, false)]
    fn given_grid_counts_when_creating_visual_lesson_then_cardinality_law_applies(
        #[case] starting: usize,
        #[case] ending: usize,
        #[case] ok: bool,
    ) {
        assert_eq!(visual("Walk", starting, ending).is_ok(), ok);
    }

    #[test]
    fn given_reserved_method_name_when_creating_code_lesson_then_rejected() {
        let err = code("test", &[]).unwrap_err();
        assert_eq!(err.field(), "methodName");
    }

    #[test]
    fn given_duplicate_parameters_when_creating_code_lesson_then_reports_first_duplicate() {
        let err = code(
            "sum",
            &[
                ("a", Primitive::Int),
                ("b", Primitive::Int),
                ("b", Primitive::Long),
                ("a", Primitive::Int),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("'b'"), "{err}");
    }

    #[test]
    fn given_duplicate_lesson_names_when_creating_unit_then_rejected() {
        let lessons = vec![visual("A", 1, 1).unwrap(), visual("A", 1, 1).unwrap()];
        let err = Factory.unit("U".into(), lessons).unwrap_err();
        assert_eq!(err.field(), "lessons");
        assert!(err.to_string().contains("'A'"));

        // names are case-sensitive
        let lessons = vec![visual("A", 1, 1).unwrap(), visual("a", 1, 1).unwrap()];
        let unit = Factory.unit("U".into(), lessons).unwrap();
        assert_eq!(unit.lessons().len(), 2);
    }

    #[test]
    fn given_repeated_methods_when_creating_visual_lesson_then_kept_once_in_order() {
        let lesson = Factory
            .visual_lesson(VisualLessonArgs {
                name: "Walk".into(),
                starting_code: String::new(),
                description: String::new(),
                hint: None,
                allowed_methods: vec![Method::TurnLeft, Method::Move, Method::TurnLeft],
                required_strings: vec![],
                starting_grids: vec![blank_grid(1)],
                ending_grids: vec![blank_grid(1)],
            })
            .unwrap();
        let Lesson::Visual(lesson) = lesson else {
            panic!("expected visual lesson");
        };
        assert_eq!(lesson.allowed_methods(), &[Method::TurnLeft, Method::Move]);
    }

    #[test]
    fn given_signature_when_deriving_starting_code_then_renders_skeleton() {
        let lesson = code(
            "sum",
            &[("a", Primitive::Int), ("bs", Primitive::IntArray)],
        )
        .unwrap();
        let lesson = lesson.as_code().unwrap();
        assert_eq!(
            lesson.default_starting_code(),
            "int sum(int a,int[] bs) {\n\t\n}"
        );
        assert_eq!(lesson.hint(), Some("use +"));

        let empty: [Parameter; 0] = [];
        assert_eq!(
            derive_starting_code(Primitive::Void, "run", &empty),
            "void run() {\n\t\n}"
        );
    }

    #[test]
    fn given_blank_grid_when_reading_then_tiles_addressable() {
        let grid = blank_grid(3);
        assert_eq!(grid.size(), 3);
        assert!(grid.tile(2, 2).is_some());
        assert!(grid.tile(3, 0).is_none());
    }
}
