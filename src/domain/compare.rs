//! Deep structural equality.
//!
//! Functions are generic over the view traits, so a frozen entity can be
//! compared against its mutable counterpart. Lessons of different variants are
//! never equal; sequences compare elementwise, in order.

use crate::domain::view::{
    CodeLessonView, GridView, LessonKind, LessonVariant, LessonView, ParameterView, TileView,
    UnitView, VisualLessonView,
};

pub fn parameters_equal(a: &impl ParameterView, b: &impl ParameterView) -> bool {
    a.param_type() == b.param_type() && a.name() == b.name()
}

/// Compares the resolved background color, so an unset color equals the
/// current default color.
pub fn tiles_equal(a: &impl TileView, b: &impl TileView) -> bool {
    a.background_color() == b.background_color()
        && a.barrier_top() == b.barrier_top()
        && a.barrier_right() == b.barrier_right()
        && a.barrier_bottom() == b.barrier_bottom()
        && a.barrier_left() == b.barrier_left()
        && a.balls() == b.balls()
}

pub fn grids_equal(a: &impl GridView, b: &impl GridView) -> bool {
    a.size() == b.size()
        && a.player_x() == b.player_x()
        && a.player_y() == b.player_y()
        && a.player_direction() == b.player_direction()
        && slices_equal(a.tiles(), b.tiles(), |ra, rb| {
            slices_equal(ra, rb, |ta, tb| tiles_equal(ta, tb))
        })
}

fn common_equal(a: &impl LessonView, b: &impl LessonView) -> bool {
    a.name() == b.name()
        && a.starting_code() == b.starting_code()
        && a.description() == b.description()
        && a.hint() == b.hint()
}

pub fn code_lessons_equal(a: &impl CodeLessonView, b: &impl CodeLessonView) -> bool {
    common_equal(a, b)
        && a.method_name() == b.method_name()
        && a.return_type() == b.return_type()
        && a.test() == b.test()
        && slices_equal(a.parameters(), b.parameters(), |pa, pb| {
            parameters_equal(pa, pb)
        })
}

pub fn visual_lessons_equal(a: &impl VisualLessonView, b: &impl VisualLessonView) -> bool {
    common_equal(a, b)
        && a.allowed_methods() == b.allowed_methods()
        && a.required_strings() == b.required_strings()
        && slices_equal(a.starting_grids(), b.starting_grids(), |ga, gb| {
            grids_equal(ga, gb)
        })
        && slices_equal(a.ending_grids(), b.ending_grids(), |ga, gb| {
            grids_equal(ga, gb)
        })
}

pub fn lessons_equal(a: &impl LessonKind, b: &impl LessonKind) -> bool {
    match (a.variant(), b.variant()) {
        (LessonVariant::Code(a), LessonVariant::Code(b)) => code_lessons_equal(a, b),
        (LessonVariant::Visual(a), LessonVariant::Visual(b)) => visual_lessons_equal(a, b),
        _ => false,
    }
}

pub fn units_equal(a: &impl UnitView, b: &impl UnitView) -> bool {
    a.name() == b.name()
        && slices_equal(a.lessons(), b.lessons(), |la, lb| lessons_equal(la, lb))
}

/// Unit sequences compare pairwise in order and must be the same length.
pub fn unit_lists_equal<A: UnitView, B: UnitView>(a: &[A], b: &[B]) -> bool {
    slices_equal(a, b, |ua, ub| units_equal(ua, ub))
}

fn slices_equal<A, B>(a: &[A], b: &[B], eq: impl Fn(&A, &B) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}

/// `PartialEq` for same-facet comparisons, delegating to the functions above.
macro_rules! structural_eq {
    ($($ty:ty => $f:ident),* $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $f(self, other)
                }
            }
        )*
    };
}

pub(crate) use structural_eq;

mod frozen {
    use super::{
        code_lessons_equal, grids_equal, lessons_equal, parameters_equal, tiles_equal,
        units_equal, visual_lessons_equal,
    };
    use crate::domain::entities::{CodeLesson, Grid, Lesson, Parameter, Tile, Unit, VisualLesson};

    structural_eq!(
        Parameter => parameters_equal,
        Tile => tiles_equal,
        Grid => grids_equal,
        CodeLesson => code_lessons_equal,
        VisualLesson => visual_lessons_equal,
        Lesson => lessons_equal,
        Unit => units_equal,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::{default_color, Color};
    use crate::domain::entities::{Lesson, Tile};
    use crate::domain::enums::{Direction, Method, Primitive};
    use crate::domain::factory::{CodeLessonArgs, EntityFactory, Factory, VisualLessonArgs};

    fn tile(color: Option<Color>) -> Tile {
        Factory.tile(color, false, true, false, true, 2).unwrap()
    }

    #[test]
    fn given_unset_color_when_comparing_then_equals_explicit_default() {
        assert!(tiles_equal(&tile(None), &tile(Some(default_color()))));
        assert_ne!(tile(None), tile(Some(Color::from_argb(0x01020304))));
    }

    #[test]
    fn given_grids_differing_in_one_tile_when_comparing_then_not_equal() {
        let grid = |balls: i32| {
            let mut tiles = vec![vec![tile(None); 2]; 2];
            tiles[1][0] = Factory.tile(None, false, true, false, true, balls).unwrap();
            Factory.grid(tiles, 2, 1, 1, Direction::Bottom).unwrap()
        };
        assert_eq!(grid(2), grid(2));
        assert_ne!(grid(2), grid(3));
    }

    #[test]
    fn given_code_and_visual_lessons_with_same_name_when_comparing_then_not_equal() {
        let grid = Factory
            .grid(vec![vec![tile(None)]], 1, 0, 0, Direction::Top)
            .unwrap();
        let visual = Factory
            .visual_lesson(VisualLessonArgs {
                name: "Same".into(),
                starting_code: "x".into(),
                description: "d".into(),
                hint: None,
                allowed_methods: vec![Method::Move],
                required_strings: vec![],
                starting_grids: vec![grid.clone()],
                ending_grids: vec![grid],
            })
            .unwrap();
        let code = Factory
            .code_lesson(CodeLessonArgs {
                name: "Same".into(),
                starting_code: "x".into(),
                description: "d".into(),
                hint: None,
                method_name: "run".into(),
                parameters: vec![],
                return_type: Primitive::Void,
                test: String::new(),
            })
            .unwrap();
        assert!(matches!(visual, Lesson::Visual(_)));
        assert!(!lessons_equal(&visual, &code));
        assert_ne!(visual, code);
        assert_eq!(code.clone(), code);
    }

    #[test]
    fn given_parameters_in_different_order_when_comparing_lessons_then_not_equal() {
        let lesson = |names: [&str; 2]| {
            let parameters = names
                .iter()
                .map(|n| Factory.parameter(Primitive::Int, n.to_string()).unwrap())
                .collect();
            Factory
                .code_lesson(CodeLessonArgs {
                    name: "L".into(),
                    starting_code: String::new(),
                    description: String::new(),
                    hint: None,
                    method_name: "f".into(),
                    parameters,
                    return_type: Primitive::Int,
                    test: String::new(),
                })
                .unwrap()
        };
        assert_eq!(lesson(["a", "b"]), lesson(["a", "b"]));
        assert_ne!(lesson(["a", "b"]), lesson(["b", "a"]));
    }
}
