//! Course model and course-option enumeration.
//!
//! A course declares an ordered list of component types (lecture,
//! discussion, lab, ...). Exactly one section must be taken per
//! component. A *course option* is one such selection whose sections
//! are mutually conflict-free.
//!
//! # Algorithm
//! Options are enumerated depth-first, component by component, dropping a
//! partial selection as soon as the newest section conflicts with one
//! already picked. The full cross product is never materialized.
//!
//! Order is lexicographic over (component order, candidate order), so
//! identical input always yields identical option order.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::trace;

use super::Section;
use crate::error::{Result, ScheduleError};

/// One conflict-free selection of sections for a course, in component order.
pub type CourseOption<'a> = Vec<&'a Section>;

/// Candidate sections for one component type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Component tag (`LEC`, `DIS`, ...).
    pub kind: String,
    /// Candidates in supplied order.
    pub sections: Vec<Section>,
}

impl Component {
    pub fn new(kind: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            kind: kind.into(),
            sections,
        }
    }
}

/// A course to be scheduled.
///
/// Constructed only through validating constructors, so every declared
/// component has at least one candidate. Options are computed on first
/// use and cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CourseDef")]
pub struct Course {
    id: String,
    name: String,
    components: Vec<Component>,
    #[serde(skip)]
    options: OnceLock<Vec<Vec<usize>>>,
}

/// Unvalidated wire shape of a [`Course`].
#[derive(Deserialize)]
struct CourseDef {
    id: String,
    #[serde(default)]
    name: String,
    components: Vec<Component>,
}

impl TryFrom<CourseDef> for Course {
    type Error = ScheduleError;

    fn try_from(def: CourseDef) -> Result<Self> {
        Self::from_components(def.id, def.name, def.components)
    }
}

impl Course {
    /// Creates a course from declared component types and their candidates.
    ///
    /// # Errors
    /// - `DuplicateComponent` if a type is declared twice
    /// - `UnknownComponent` if a declared type has no entry in
    ///   `sections_by_component`, or an entry has no declared type
    /// - `EmptyComponent` if a declared type maps to an empty list
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        component_types: impl IntoIterator<Item = S>,
        mut sections_by_component: HashMap<String, Vec<Section>>,
    ) -> Result<Self> {
        let id = id.into();
        let mut components = Vec::new();

        for kind in component_types {
            let kind = kind.into();
            if components.iter().any(|c: &Component| c.kind == kind) {
                return Err(ScheduleError::DuplicateComponent {
                    course: id,
                    component: kind,
                });
            }
            let Some(sections) = sections_by_component.remove(&kind) else {
                return Err(ScheduleError::UnknownComponent {
                    course: id,
                    component: kind,
                });
            };
            components.push(Component::new(kind, sections));
        }

        // Report the smallest leftover key so the error is deterministic.
        if let Some(extra) = sections_by_component.into_keys().min() {
            return Err(ScheduleError::UnknownComponent {
                course: id,
                component: extra,
            });
        }

        Self::from_components(id, String::new(), components)
    }

    /// Starts a builder for the given course id.
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::{Course, Section};
    ///
    /// let course = Course::builder("CS 61A")
    ///     .with_section(Section::new("001", "CS 61A", "LEC"))
    ///     .with_section(Section::new("101", "CS 61A", "DIS"))
    ///     .with_section(Section::new("102", "CS 61A", "DIS"))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(course.component_types().collect::<Vec<_>>(), ["LEC", "DIS"]);
    /// assert_eq!(course.option_count(), 2);
    /// ```
    pub fn builder(id: impl Into<String>) -> CourseBuilder {
        CourseBuilder::new(id)
    }

    fn from_components(id: String, name: String, components: Vec<Component>) -> Result<Self> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.kind.as_str()) {
                return Err(ScheduleError::DuplicateComponent {
                    course: id,
                    component: component.kind.clone(),
                });
            }
            if component.sections.is_empty() {
                return Err(ScheduleError::EmptyComponent {
                    course: id,
                    component: component.kind.clone(),
                });
            }
        }

        Ok(Self {
            id,
            name,
            components,
            options: OnceLock::new(),
        })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Components in declared order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Declared component types in order.
    pub fn component_types(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.kind.as_str())
    }

    /// Candidate sections for a component type.
    pub fn sections(&self, kind: &str) -> Option<&[Section]> {
        self.components
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.sections.as_slice())
    }

    /// All sections across components.
    pub fn all_sections(&self) -> impl Iterator<Item = &Section> {
        self.components.iter().flat_map(|c| c.sections.iter())
    }

    /// Size of the unpruned cross product of candidates.
    pub fn combination_count(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.sections.len())
            .fold(1, usize::saturating_mul)
    }

    /// Every internally conflict-free selection, one section per component.
    pub fn options(&self) -> Vec<CourseOption<'_>> {
        self.option_choices()
            .iter()
            .map(|choice| {
                choice
                    .iter()
                    .zip(&self.components)
                    .map(|(&index, component)| &component.sections[index])
                    .collect()
            })
            .collect()
    }

    /// Number of course options.
    pub fn option_count(&self) -> usize {
        self.option_choices().len()
    }

    /// Cached candidate indices per option, one index per component.
    fn option_choices(&self) -> &[Vec<usize>] {
        self.options.get_or_init(|| {
            let choices = enumerate_options(&self.components);
            trace!(
                course = %self.id,
                options = choices.len(),
                combinations = self.combination_count(),
                "enumerated course options"
            );
            choices
        })
    }
}

/// Depth-first enumeration of conflict-free selections.
fn enumerate_options(components: &[Component]) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut picked = Vec::with_capacity(components.len());
    extend_option(components, &mut picked, &mut out);
    out
}

fn extend_option(components: &[Component], picked: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    let Some(component) = components.get(picked.len()) else {
        out.push(picked.clone());
        return;
    };

    for (index, candidate) in component.sections.iter().enumerate() {
        let clashes = picked
            .iter()
            .zip(components)
            .any(|(&i, placed)| placed.sections[i].conflicts_with(candidate));
        if clashes {
            continue;
        }

        picked.push(index);
        extend_option(components, picked, out);
        picked.pop();
    }
}

/// Incremental course construction.
///
/// Component types are declared in the order they are first mentioned.
#[derive(Debug, Clone)]
pub struct CourseBuilder {
    id: String,
    name: String,
    components: Vec<Component>,
}

impl CourseBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            components: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declares a component with its full candidate list.
    ///
    /// Declaring the same type twice fails at [`build`](Self::build).
    pub fn with_component(mut self, kind: impl Into<String>, sections: Vec<Section>) -> Self {
        self.components.push(Component::new(kind, sections));
        self
    }

    /// Adds one candidate under its own `component` tag, declaring the
    /// type if it has not been seen yet.
    pub fn with_section(mut self, section: Section) -> Self {
        self.push_section(section);
        self
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        match self
            .components
            .iter_mut()
            .find(|c| c.kind == section.component)
        {
            Some(component) => component.sections.push(section),
            None => {
                let kind = section.component.clone();
                self.components.push(Component::new(kind, vec![section]));
            }
        }
    }

    /// Validates and builds the course.
    pub fn build(self) -> Result<Course> {
        Course::from_components(self.id, self.name, self.components)
    }
}
