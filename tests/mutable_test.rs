//! Tests for the mutable facet working against frozen entities

use rstest::rstest;

use courseware::domain::{
    grids_equal, lessons_equal, units_equal, CodeLessonArgs, Direction, EntityFactory, Factory,
    GridView, Lesson, LessonView, Method, MutableFactory, MutableGrid, MutableLesson,
    MutableParameter, MutableTile, MutableUnit, MutableVisualLesson, Primitive, TileView,
    UnitView, VisualLessonArgs, VisualLessonView,
};

fn frozen_unit() -> courseware::domain::Unit {
    let tile = Factory.plain_tile(false, false, false, false, 1).unwrap();
    let grid = Factory
        .grid(vec![vec![tile; 3]; 3], 3, 2, 2, Direction::Top)
        .unwrap();
    let visual = Factory
        .visual_lesson(VisualLessonArgs {
            name: "Collect".into(),
            starting_code: String::new(),
            description: "Pick up every ball.".into(),
            hint: Some("takeBall()".into()),
            allowed_methods: vec![Method::TakeBall, Method::Move],
            required_strings: vec![],
            starting_grids: vec![grid.clone()],
            ending_grids: vec![grid],
        })
        .unwrap();
    let code = Factory
        .code_lesson(CodeLessonArgs {
            name: "Max".into(),
            starting_code: String::new(),
            description: "Largest element.".into(),
            hint: None,
            method_name: "max".into(),
            parameters: vec![Factory.parameter(Primitive::IntArray, "xs".into()).unwrap()],
            return_type: Primitive::Int,
            test: "return max(new int[] {1, 3, 2}) == 3;".into(),
        })
        .unwrap();
    Factory.unit("Loops".into(), vec![visual, code]).unwrap()
}

#[test]
fn given_frozen_unit_when_copied_then_equal_and_independent() {
    // Arrange
    let frozen = frozen_unit();
    let mut copy = MutableUnit::from(&frozen);
    assert!(units_equal(&frozen, &copy));

    // Act
    copy.edit_lesson(0, |lesson| {
        let visual = lesson.as_visual_mut().expect("visual lesson");
        visual.allow_method(Method::TurnLeft);
        let grid = visual.starting_grid_mut(0).expect("grid");
        grid.tile_mut(1, 1).expect("tile").set_balls(0)?;
        grid.set_player_direction(Direction::Top.turn_left());
        Ok(())
    })
    .unwrap();

    // Assert
    assert!(!units_equal(&frozen, &copy));
    let Lesson::Visual(original) = &frozen.lessons()[0] else {
        panic!("expected visual lesson");
    };
    assert_eq!(original.allowed_methods(), &[Method::TakeBall, Method::Move]);
    assert_eq!(original.starting_grids()[0].tile(1, 1).unwrap().balls(), 1);
    assert_eq!(original.starting_grids()[0].player_direction(), Direction::Top);

    let refrozen = copy.freeze();
    let Lesson::Visual(edited) = &refrozen.lessons()[0] else {
        panic!("expected visual lesson");
    };
    assert_eq!(edited.starting_grids()[0].player_direction(), Direction::Left);
    assert!(lessons_equal(&refrozen.lessons()[1], &frozen.lessons()[1]));
}

#[test]
fn given_frozen_grid_when_resized_through_copy_then_frozen_untouched() {
    let frozen = frozen_unit();
    let Lesson::Visual(lesson) = &frozen.lessons()[0] else {
        panic!("expected visual lesson");
    };
    let original = &lesson.starting_grids()[0];
    let mut grid = MutableGrid::from(original);

    grid.resize(5).unwrap();

    assert_eq!(original.size(), 3);
    assert_eq!(grid.size(), 5);
    assert_eq!((grid.player_x(), grid.player_y()), (2, 2));
    assert_eq!(grid.tile(4, 4).unwrap().balls(), 0);
    assert_eq!(grid.tile(2, 2).unwrap().balls(), 1);

    grid.resize(3).unwrap();
    // shrinking back drops the added blanks and restores equality
    assert!(grids_equal(original, &grid));
    assert_eq!(grid.freeze(), *original);
}

#[rstest]
#[case(5, 4)]
#[case(2, 1)]
#[case(1, 0)]
fn given_grid_when_shrinking_then_player_clamped(#[case] size: usize, #[case] expected: usize) {
    let mut grid = MutableGrid::new(6).unwrap();
    grid.set_player_position(5, 5).unwrap();

    grid.resize(size).unwrap();

    assert_eq!((grid.player_x(), grid.player_y()), (expected, expected));
}

#[test]
fn given_mutable_factory_when_building_then_same_invariants_as_frozen() {
    let p = MutableFactory.parameter(Primitive::Int, "a".into()).unwrap();
    let duplicate = MutableFactory.code_lesson(CodeLessonArgs {
        name: "L".into(),
        starting_code: String::new(),
        description: String::new(),
        hint: None,
        method_name: "f".into(),
        parameters: vec![p.clone(), p],
        return_type: Primitive::Int,
        test: String::new(),
    });
    assert_eq!(duplicate.unwrap_err().field(), "parameters");

    let tile = MutableTile::default();
    assert!(MutableFactory
        .grid(vec![vec![tile.clone(), tile]], 1, 0, 0, Direction::Top)
        .is_err());
}

#[test]
fn given_visual_lesson_when_replacing_grids_then_cardinality_checked_atomically() {
    let grids = |n: usize| (0..n).map(|_| MutableGrid::new(2).unwrap()).collect::<Vec<_>>();
    let mut lesson = MutableVisualLesson::new(VisualLessonArgs {
        name: "V".into(),
        starting_code: String::new(),
        description: String::new(),
        hint: None,
        allowed_methods: vec![Method::Move],
        required_strings: vec![],
        starting_grids: grids(3),
        ending_grids: grids(3),
    })
    .unwrap();

    assert!(lesson.set_grids(grids(3), grids(2)).is_err());
    assert_eq!(lesson.ending_grids().len(), 3);

    lesson.set_grids(grids(1), grids(1)).unwrap();
    assert!(lesson.push_ending_grid(MutableGrid::new(2).unwrap()).is_err());
    assert!(lesson.remove_starting_grid(0).is_err());
    assert_eq!(lesson.starting_grids().len(), 1);
}

#[test]
fn given_unit_when_renaming_lesson_to_existing_name_then_rejected() {
    let mut unit = MutableUnit::from(&frozen_unit());
    let err = unit.rename_lesson(1, "Collect").unwrap_err();
    assert_eq!(err.field(), "lessons");
    assert_eq!(unit.lessons()[1].name(), "Max");

    let mut extra = MutableLesson::from(&frozen_unit().lessons()[1]);
    extra.set_name("Min");
    if let Some(code) = extra.as_code_mut() {
        code.push_parameter(MutableParameter::new(Primitive::Boolean, "desc").unwrap())
            .unwrap();
    }
    unit.push_lesson(extra).unwrap();
    assert_eq!(unit.lesson_index("Min"), Some(2));
    assert_eq!(unit.freeze().lessons().len(), 3);
}
