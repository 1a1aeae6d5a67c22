//! Mutable lessons.

use std::fmt;

use crate::domain::entities::{CodeLesson, Lesson, VisualLesson};
use crate::domain::enums::{Method, Primitive};
use crate::domain::error::DomainResult;
use crate::domain::factory::{
    check_grid_counts, check_method_name, check_unique_parameters, distinct_methods,
    CodeLessonArgs, VisualLessonArgs,
};
use crate::domain::mutable::{out_of_bounds, MutableGrid, MutableParameter};
use crate::domain::view::{
    CodeLessonView, LessonKind, LessonVariant, LessonView, ParameterView, VisualLessonView,
};

#[derive(Debug, Clone)]
pub struct MutableCodeLesson {
    name: String,
    starting_code: String,
    description: String,
    hint: Option<String>,
    method_name: String,
    parameters: Vec<MutableParameter>,
    return_type: Primitive,
    test: String,
}

impl MutableCodeLesson {
    pub fn new(args: CodeLessonArgs<MutableParameter>) -> DomainResult<Self> {
        check_method_name(&args.method_name)?;
        check_unique_parameters(args.parameters.iter().map(ParameterView::name))?;
        Ok(Self {
            name: args.name,
            starting_code: args.starting_code,
            description: args.description,
            hint: args.hint,
            method_name: args.method_name,
            parameters: args.parameters,
            return_type: args.return_type,
            test: args.test,
        })
    }

    pub fn set_method_name(&mut self, method_name: impl Into<String>) -> DomainResult<()> {
        let method_name = method_name.into();
        check_method_name(&method_name)?;
        self.method_name = method_name;
        Ok(())
    }

    /// `void` is a legal return type.
    pub fn set_return_type(&mut self, return_type: Primitive) {
        self.return_type = return_type;
    }

    pub fn set_test(&mut self, test: impl Into<String>) {
        self.test = test.into();
    }

    /// Replace the starting code with the skeleton derived from the signature.
    pub fn reset_starting_code(&mut self) {
        self.starting_code = self.default_starting_code();
    }

    pub fn push_parameter(&mut self, parameter: MutableParameter) -> DomainResult<()> {
        self.insert_parameter(self.parameters.len(), parameter)
    }

    pub fn insert_parameter(&mut self, index: usize, parameter: MutableParameter) -> DomainResult<()> {
        if index > self.parameters.len() {
            return Err(out_of_bounds("parameters", index, self.parameters.len()));
        }
        check_unique_parameters(
            self.parameters
                .iter()
                .map(ParameterView::name)
                .chain(std::iter::once(parameter.name())),
        )?;
        self.parameters.insert(index, parameter);
        Ok(())
    }

    /// Replace the parameter at `index`; the new name must not clash with the others.
    pub fn set_parameter(&mut self, index: usize, parameter: MutableParameter) -> DomainResult<()> {
        if index >= self.parameters.len() {
            return Err(out_of_bounds("parameters", index, self.parameters.len()));
        }
        check_unique_parameters(self.parameters.iter().enumerate().map(|(i, p)| {
            if i == index {
                parameter.name()
            } else {
                p.name()
            }
        }))?;
        self.parameters[index] = parameter;
        Ok(())
    }

    pub fn rename_parameter(&mut self, index: usize, name: impl Into<String>) -> DomainResult<()> {
        let mut parameter = self
            .parameters
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_bounds("parameters", index, self.parameters.len()))?;
        parameter.set_name(name);
        self.set_parameter(index, parameter)
    }

    pub fn set_parameter_type(&mut self, index: usize, param_type: Primitive) -> DomainResult<()> {
        let len = self.parameters.len();
        self.parameters
            .get_mut(index)
            .ok_or_else(|| out_of_bounds("parameters", index, len))?
            .set_param_type(param_type)
    }

    pub fn remove_parameter(&mut self, index: usize) -> DomainResult<MutableParameter> {
        if index >= self.parameters.len() {
            return Err(out_of_bounds("parameters", index, self.parameters.len()));
        }
        Ok(self.parameters.remove(index))
    }

    pub fn freeze(&self) -> CodeLesson {
        CodeLesson {
            name: self.name.clone(),
            starting_code: self.starting_code.clone(),
            description: self.description.clone(),
            hint: self.hint.clone(),
            method_name: self.method_name.clone(),
            parameters: self.parameters.iter().map(MutableParameter::freeze).collect(),
            return_type: self.return_type,
            test: self.test.clone(),
        }
    }
}

impl From<&CodeLesson> for MutableCodeLesson {
    fn from(l: &CodeLesson) -> Self {
        Self {
            name: l.name.clone(),
            starting_code: l.starting_code.clone(),
            description: l.description.clone(),
            hint: l.hint.clone(),
            method_name: l.method_name.clone(),
            parameters: l.parameters.iter().map(MutableParameter::from).collect(),
            return_type: l.return_type,
            test: l.test.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MutableVisualLesson {
    name: String,
    starting_code: String,
    description: String,
    hint: Option<String>,
    allowed_methods: Vec<Method>,
    required_strings: Vec<String>,
    starting_grids: Vec<MutableGrid>,
    ending_grids: Vec<MutableGrid>,
}

impl MutableVisualLesson {
    pub fn new(args: VisualLessonArgs<MutableGrid>) -> DomainResult<Self> {
        check_grid_counts(args.starting_grids.len(), args.ending_grids.len())?;
        Ok(Self {
            name: args.name,
            starting_code: args.starting_code,
            description: args.description,
            hint: args.hint,
            allowed_methods: distinct_methods(args.allowed_methods),
            required_strings: args.required_strings,
            starting_grids: args.starting_grids,
            ending_grids: args.ending_grids,
        })
    }

    pub fn set_allowed_methods(&mut self, methods: Vec<Method>) {
        self.allowed_methods = distinct_methods(methods);
    }

    /// Append `method` unless already allowed.
    pub fn allow_method(&mut self, method: Method) {
        if !self.allowed_methods.contains(&method) {
            self.allowed_methods.push(method);
        }
    }

    pub fn disallow_method(&mut self, method: Method) {
        self.allowed_methods.retain(|m| *m != method);
    }

    /// Required strings carry no invariant, so the list is exposed directly.
    pub fn required_strings_mut(&mut self) -> &mut Vec<String> {
        &mut self.required_strings
    }

    /// Replace both grid lists at once.
    pub fn set_grids(
        &mut self,
        starting_grids: Vec<MutableGrid>,
        ending_grids: Vec<MutableGrid>,
    ) -> DomainResult<()> {
        check_grid_counts(starting_grids.len(), ending_grids.len())?;
        self.starting_grids = starting_grids;
        self.ending_grids = ending_grids;
        Ok(())
    }

    pub fn push_starting_grid(&mut self, grid: MutableGrid) -> DomainResult<()> {
        check_grid_counts(self.starting_grids.len() + 1, self.ending_grids.len())?;
        self.starting_grids.push(grid);
        Ok(())
    }

    pub fn push_ending_grid(&mut self, grid: MutableGrid) -> DomainResult<()> {
        check_grid_counts(self.starting_grids.len(), self.ending_grids.len() + 1)?;
        self.ending_grids.push(grid);
        Ok(())
    }

    pub fn remove_starting_grid(&mut self, index: usize) -> DomainResult<MutableGrid> {
        let len = self.starting_grids.len();
        if index >= len {
            return Err(out_of_bounds("startingGrids", index, len));
        }
        check_grid_counts(len - 1, self.ending_grids.len())?;
        Ok(self.starting_grids.remove(index))
    }

    pub fn remove_ending_grid(&mut self, index: usize) -> DomainResult<MutableGrid> {
        let len = self.ending_grids.len();
        if index >= len {
            return Err(out_of_bounds("endingGrids", index, len));
        }
        check_grid_counts(self.starting_grids.len(), len - 1)?;
        Ok(self.ending_grids.remove(index))
    }

    /// Grids validate their own edits, so handing out `&mut` is safe.
    pub fn starting_grid_mut(&mut self, index: usize) -> Option<&mut MutableGrid> {
        self.starting_grids.get_mut(index)
    }

    pub fn ending_grid_mut(&mut self, index: usize) -> Option<&mut MutableGrid> {
        self.ending_grids.get_mut(index)
    }

    pub fn freeze(&self) -> VisualLesson {
        VisualLesson {
            name: self.name.clone(),
            starting_code: self.starting_code.clone(),
            description: self.description.clone(),
            hint: self.hint.clone(),
            allowed_methods: self.allowed_methods.clone(),
            required_strings: self.required_strings.clone(),
            starting_grids: self.starting_grids.iter().map(MutableGrid::freeze).collect(),
            ending_grids: self.ending_grids.iter().map(MutableGrid::freeze).collect(),
        }
    }
}

impl From<&VisualLesson> for MutableVisualLesson {
    fn from(l: &VisualLesson) -> Self {
        Self {
            name: l.name.clone(),
            starting_code: l.starting_code.clone(),
            description: l.description.clone(),
            hint: l.hint.clone(),
            allowed_methods: l.allowed_methods.clone(),
            required_strings: l.required_strings.clone(),
            starting_grids: l.starting_grids.iter().map(MutableGrid::from).collect(),
            ending_grids: l.ending_grids.iter().map(MutableGrid::from).collect(),
        }
    }
}

/// Setters for the fields every lesson has.
macro_rules! common_setters {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                pub fn set_name(&mut self, name: impl Into<String>) {
                    self.name = name.into();
                }

                pub fn set_starting_code(&mut self, starting_code: impl Into<String>) {
                    self.starting_code = starting_code.into();
                }

                pub fn set_description(&mut self, description: impl Into<String>) {
                    self.description = description.into();
                }

                pub fn set_hint(&mut self, hint: Option<String>) {
                    self.hint = hint;
                }
            }

            impl LessonView for $ty {
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
        )*
    };
}

common_setters!(MutableCodeLesson, MutableVisualLesson);

impl CodeLessonView for MutableCodeLesson {
    type Parameter = MutableParameter;

    fn method_name(&self) -> &str {
        &self.method_name
    }

    fn parameters(&self) -> &[MutableParameter] {
        &self.parameters
    }

    fn return_type(&self) -> Primitive {
        self.return_type
    }

    fn test(&self) -> &str {
        &self.test
    }
}

impl VisualLessonView for MutableVisualLesson {
    type Grid = MutableGrid;

    fn allowed_methods(&self) -> &[Method] {
        &self.allowed_methods
    }

    fn required_strings(&self) -> &[String] {
        &self.required_strings
    }

    fn starting_grids(&self) -> &[MutableGrid] {
        &self.starting_grids
    }

    fn ending_grids(&self) -> &[MutableGrid] {
        &self.ending_grids
    }
}

#[derive(Debug, Clone)]
pub enum MutableLesson {
    Code(MutableCodeLesson),
    Visual(MutableVisualLesson),
}

impl MutableLesson {
    pub fn as_code_mut(&mut self) -> Option<&mut MutableCodeLesson> {
        match self {
            MutableLesson::Code(lesson) => Some(lesson),
            MutableLesson::Visual(_) => None,
        }
    }

    pub fn as_visual_mut(&mut self) -> Option<&mut MutableVisualLesson> {
        match self {
            MutableLesson::Visual(lesson) => Some(lesson),
            MutableLesson::Code(_) => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            MutableLesson::Code(lesson) => lesson.set_name(name),
            MutableLesson::Visual(lesson) => lesson.set_name(name),
        }
    }

    pub fn set_starting_code(&mut self, starting_code: impl Into<String>) {
        match self {
            MutableLesson::Code(lesson) => lesson.set_starting_code(starting_code),
            MutableLesson::Visual(lesson) => lesson.set_starting_code(starting_code),
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        match self {
            MutableLesson::Code(lesson) => lesson.set_description(description),
            MutableLesson::Visual(lesson) => lesson.set_description(description),
        }
    }

    pub fn set_hint(&mut self, hint: Option<String>) {
        match self {
            MutableLesson::Code(lesson) => lesson.set_hint(hint),
            MutableLesson::Visual(lesson) => lesson.set_hint(hint),
        }
    }

    pub fn freeze(&self) -> Lesson {
        match self {
            MutableLesson::Code(lesson) => Lesson::Code(lesson.freeze()),
            MutableLesson::Visual(lesson) => Lesson::Visual(lesson.freeze()),
        }
    }

    fn common(&self) -> &dyn LessonView {
        match self {
            MutableLesson::Code(lesson) => lesson,
            MutableLesson::Visual(lesson) => lesson,
        }
    }
}

impl LessonView for MutableLesson {
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

impl LessonKind for MutableLesson {
    type Code = MutableCodeLesson;
    type Visual = MutableVisualLesson;

    fn variant(&self) -> LessonVariant<'_, MutableCodeLesson, MutableVisualLesson> {
        match self {
            MutableLesson::Code(lesson) => LessonVariant::Code(lesson),
            MutableLesson::Visual(lesson) => LessonVariant::Visual(lesson),
        }
    }
}

impl From<&Lesson> for MutableLesson {
    fn from(lesson: &Lesson) -> Self {
        match lesson {
            Lesson::Code(l) => MutableLesson::Code(l.into()),
            Lesson::Visual(l) => MutableLesson::Visual(l.into()),
        }
    }
}

impl From<MutableCodeLesson> for MutableLesson {
    fn from(lesson: MutableCodeLesson) -> Self {
        MutableLesson::Code(lesson)
    }
}

impl From<MutableVisualLesson> for MutableLesson {
    fn from(lesson: MutableVisualLesson) -> Self {
        MutableLesson::Visual(lesson)
    }
}

impl fmt::Display for MutableLesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_lesson() -> MutableCodeLesson {
        MutableCodeLesson::new(CodeLessonArgs {
            name: "Sum".into(),
            starting_code: String::new(),
            description: "Add two ints".into(),
            hint: None,
            method_name: "sum".into(),
            parameters: vec![
                MutableParameter::new(Primitive::Int, "a").unwrap(),
                MutableParameter::new(Primitive::Int, "b").unwrap(),
            ],
            return_type: Primitive::Int,
            test: "return sum(2, 3) == 5;".into(),
        })
        .unwrap()
    }

    fn walk_lesson(starting: usize, ending: usize) -> DomainResult<MutableVisualLesson> {
        MutableVisualLesson::new(VisualLessonArgs {
            name: "Walk".into(),
            starting_code: "move();".into(),
            description: "Walk to the wall".into(),
            hint: Some("keep moving".into()),
            allowed_methods: vec![Method::Move, Method::FrontIsClear],
            required_strings: vec!["while".into()],
            starting_grids: (0..starting).map(|_| MutableGrid::new(2).unwrap()).collect(),
            ending_grids: (0..ending).map(|_| MutableGrid::new(2).unwrap()).collect(),
        })
    }

    #[test]
    fn given_reserved_name_when_setting_method_name_then_rejected() {
        let mut lesson = sum_lesson();
        assert!(lesson.set_method_name("test").is_err());
        assert_eq!(lesson.method_name(), "sum");
        lesson.set_method_name("add").unwrap();
        assert_eq!(lesson.method_name(), "add");
    }

    #[test]
    fn given_clashing_name_when_adding_parameter_then_rejected_and_unchanged() {
        let mut lesson = sum_lesson();
        let err = lesson
            .push_parameter(MutableParameter::new(Primitive::Long, "a").unwrap())
            .unwrap_err();
        assert_eq!(err.field(), "parameters");
        assert_eq!(lesson.parameters().len(), 2);

        assert!(lesson.rename_parameter(1, "a").is_err());
        assert_eq!(lesson.parameters()[1].name(), "b");
        // renaming to its own name is not a clash
        lesson.rename_parameter(1, "b").unwrap();
        lesson.rename_parameter(1, "c").unwrap();
        assert_eq!(lesson.parameters()[1].name(), "c");
    }

    #[test]
    fn given_parameters_when_resetting_starting_code_then_derived() {
        let mut lesson = sum_lesson();
        lesson
            .insert_parameter(0, MutableParameter::new(Primitive::StringArray, "xs").unwrap())
            .unwrap();
        lesson.set_parameter_type(1, Primitive::Double).unwrap();
        assert!(lesson.set_parameter_type(1, Primitive::Void).is_err());
        lesson.reset_starting_code();
        assert_eq!(
            lesson.starting_code(),
            "int sum(String[] xs,double a,int b) {\n\t\n}"
        );
        lesson.remove_parameter(0).unwrap();
        assert!(lesson.remove_parameter(5).is_err());
        assert_eq!(lesson.parameters().len(), 2);
    }

    #[test]
    fn given_grid_edits_when_breaking_cardinality_then_rejected() {
        assert!(walk_lesson(1, 2).is_err());
        let mut lesson = walk_lesson(3, 3).unwrap();

        // 4 starting vs 3 ending is invalid
        assert!(lesson.push_starting_grid(MutableGrid::new(2).unwrap()).is_err());
        assert_eq!(lesson.starting_grids().len(), 3);

        // 3 vs 2 is invalid too; collapse to a single ending grid atomically
        assert!(lesson.remove_ending_grid(0).is_err());
        lesson
            .set_grids(
                lesson.starting_grids().to_vec(),
                vec![MutableGrid::new(2).unwrap()],
            )
            .unwrap();
        lesson.push_starting_grid(MutableGrid::new(2).unwrap()).unwrap();
        assert_eq!(lesson.starting_grids().len(), 4);
        assert_eq!(lesson.ending_grids().len(), 1);
    }

    #[test]
    fn given_allowed_methods_when_editing_then_kept_as_ordered_set() {
        let mut lesson = walk_lesson(1, 1).unwrap();
        lesson.allow_method(Method::Move);
        lesson.allow_method(Method::TurnLeft);
        lesson.disallow_method(Method::FrontIsClear);
        assert_eq!(lesson.allowed_methods(), &[Method::Move, Method::TurnLeft]);
        lesson.required_strings_mut().push("if".into());
        assert_eq!(lesson.required_strings(), &["while".to_string(), "if".to_string()]);
    }

    #[test]
    fn given_frozen_lesson_when_copied_then_mutation_is_isolated() {
        let frozen = Lesson::Visual(walk_lesson(2, 2).unwrap().freeze());
        let mut copy = MutableLesson::from(&frozen);
        assert!(crate::domain::compare::lessons_equal(&frozen, &copy));

        let visual = copy.as_visual_mut().unwrap();
        visual.starting_grid_mut(0).unwrap().resize(4).unwrap();
        copy.set_hint(None);

        assert!(!crate::domain::compare::lessons_equal(&frozen, &copy));
        let Lesson::Visual(original) = &frozen else {
            panic!("expected visual lesson");
        };
        assert_eq!(original.starting_grids()[0].tiles.len(), 2);
        assert_eq!(original.hint(), Some("keep moving"));
    }
}
