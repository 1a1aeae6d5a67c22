use tracing::debug;

use crate::domain::entities::Unit;
use crate::domain::error::DomainResult;
use crate::domain::factory::check_unique_lessons;
use crate::domain::mutable::{out_of_bounds, MutableLesson};
use crate::domain::view::{LessonView, UnitView};

/// Editable unit. Every edit keeps lesson names unique.
#[derive(Debug, Clone)]
pub struct MutableUnit {
    name: String,
    lessons: Vec<MutableLesson>,
}

impl MutableUnit {
    pub fn new(name: impl Into<String>, lessons: Vec<MutableLesson>) -> DomainResult<Self> {
        let name = name.into();
        check_unique_lessons(&name, lessons.iter().map(LessonView::name))?;
        Ok(Self { name, lessons })
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn lesson_index(&self, name: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.name() == name)
    }

    pub fn push_lesson(&mut self, lesson: MutableLesson) -> DomainResult<()> {
        self.insert_lesson(self.lessons.len(), lesson)
    }

    pub fn insert_lesson(&mut self, index: usize, lesson: MutableLesson) -> DomainResult<()> {
        if index > self.lessons.len() {
            return Err(out_of_bounds("lessons", index, self.lessons.len()));
        }
        check_unique_lessons(
            &self.name,
            self.lessons
                .iter()
                .map(LessonView::name)
                .chain(std::iter::once(lesson.name())),
        )?;
        self.lessons.insert(index, lesson);
        Ok(())
    }

    pub fn remove_lesson(&mut self, index: usize) -> DomainResult<MutableLesson> {
        if index >= self.lessons.len() {
            return Err(out_of_bounds("lessons", index, self.lessons.len()));
        }
        Ok(self.lessons.remove(index))
    }

    /// Move the lesson at `from` so that it ends up at index `to`.
    pub fn move_lesson(&mut self, from: usize, to: usize) -> DomainResult<()> {
        let len = self.lessons.len();
        if from >= len {
            return Err(out_of_bounds("lessons", from, len));
        }
        if to >= len {
            return Err(out_of_bounds("lessons", to, len));
        }
        let lesson = self.lessons.remove(from);
        self.lessons.insert(to, lesson);
        Ok(())
    }

    /// Apply `edit` to a draft of the lesson at `index`.
    ///
    /// The draft replaces the lesson only if `edit` succeeds and the lesson
    /// names stay unique; otherwise the unit is unchanged.
    pub fn edit_lesson<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut MutableLesson) -> DomainResult<R>,
    ) -> DomainResult<R> {
        let len = self.lessons.len();
        let mut draft = self
            .lessons
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_bounds("lessons", index, len))?;
        let result = edit(&mut draft)?;
        check_unique_lessons(
            &self.name,
            self.lessons.iter().enumerate().map(|(i, l)| {
                if i == index {
                    draft.name()
                } else {
                    l.name()
                }
            }),
        )?;
        self.lessons[index] = draft;
        Ok(result)
    }

    pub fn rename_lesson(&mut self, index: usize, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        debug!(unit = %self.name, %name, "rename lesson");
        self.edit_lesson(index, |lesson| {
            lesson.set_name(name);
            Ok(())
        })
    }

    pub fn freeze(&self) -> Unit {
        Unit {
            name: self.name.clone(),
            lessons: self.lessons.iter().map(MutableLesson::freeze).collect(),
        }
    }
}

impl UnitView for MutableUnit {
    type Lesson = MutableLesson;

    fn name(&self) -> &str {
        &self.name
    }

    fn lessons(&self) -> &[MutableLesson] {
        &self.lessons
    }
}

impl From<&Unit> for MutableUnit {
    fn from(unit: &Unit) -> Self {
        Self {
            name: unit.name.clone(),
            lessons: unit.lessons.iter().map(MutableLesson::from).collect(),
        }
    }
}
