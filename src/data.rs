use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// Type aliases for clarity
pub type ClassKey = String;
pub type TeacherName = String;
pub type SubjectName = String;
pub type SlotIndex = usize;

pub const SLOTS_PER_DAY: usize = 10;
pub const ASSEMBLY_SLOT: SlotIndex = 0;
pub const LUNCH_SLOT: SlotIndex = 6;
pub const CLASS_TEACHER_SLOT: SlotIndex = 1;
pub const TEACHING_SLOTS: [SlotIndex; 8] = [1, 2, 3, 4, 5, 7, 8, 9];

/// Fixed human-readable label per slot, in slot order. Downstream renderers
/// use these as row headers.
pub const PERIOD_LABELS: [&str; SLOTS_PER_DAY] = [
    "Assembly (10:00–10:10)",
    "Period 1 (10:10–10:55)",
    "Period 2 (10:55–11:40)",
    "Period 3 (11:40–12:25)",
    "Period 4 (12:25–13:10)",
    "Period 5 (13:10–13:55)",
    "Lunch (13:55–14:15)",
    "Period 6 (14:15–15:00)",
    "Period 7 (15:00–15:45)",
    "Period 8 (15:45–16:00)",
];

/// One of the six operating weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

pub const DAYS: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One cell of a class schedule. Serializes as its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassCell {
    Free,
    Assembly,
    Lunch,
    ClassTeacher(TeacherName),
    Subject(SubjectName),
    /// Raw text written by a post-generation manual override.
    Manual(String),
}

impl ClassCell {
    pub fn is_free(&self) -> bool {
        matches!(self, ClassCell::Free)
    }
}

impl fmt::Display for ClassCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassCell::Free => write!(f, "Free"),
            ClassCell::Assembly => write!(f, "Assembly"),
            ClassCell::Lunch => write!(f, "Lunch"),
            ClassCell::ClassTeacher(teacher) => write!(f, "{teacher} (Class Teacher)"),
            ClassCell::Subject(subject) => write!(f, "{subject}"),
            ClassCell::Manual(text) => write!(f, "{text}"),
        }
    }
}

impl Serialize for ClassCell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One cell of a teacher schedule. Serializes as its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeacherCell {
    Free,
    Lunch,
    Class(ClassKey),
}

impl TeacherCell {
    pub fn is_free(&self) -> bool {
        matches!(self, TeacherCell::Free)
    }
}

impl fmt::Display for TeacherCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeacherCell::Free => write!(f, "Free"),
            TeacherCell::Lunch => write!(f, "Lunch"),
            TeacherCell::Class(class) => write!(f, "{class}"),
        }
    }
}

impl Serialize for TeacherCell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One week of a class schedule: every day maps to its 10 slot cells.
pub type ClassGrid = BTreeMap<Day, Vec<ClassCell>>;

/// One week of a teacher schedule, same shape as [`ClassGrid`].
pub type TeacherGrid = BTreeMap<Day, Vec<TeacherCell>>;

/// Fresh class week: Assembly at slot 0, everything else Free.
pub fn empty_class_week() -> ClassGrid {
    DAYS.iter()
        .map(|&day| {
            let mut cells = vec![ClassCell::Free; SLOTS_PER_DAY];
            cells[ASSEMBLY_SLOT] = ClassCell::Assembly;
            (day, cells)
        })
        .collect()
}

/// Fresh teacher week, entirely Free.
pub fn empty_teacher_week() -> TeacherGrid {
    DAYS.iter()
        .map(|&day| (day, vec![TeacherCell::Free; SLOTS_PER_DAY]))
        .collect()
}

/// Composite class-section key, e.g. `"Class 1A"`.
pub fn class_key(grade: u32, section: &str) -> ClassKey {
    format!("Class {grade}{section}")
}

/// The complete input for one generation run.
///
/// All entries are assumed already validated by the caller: non-empty names,
/// positive counts, one quota map per grade. `subject_quotas[0]` belongs to
/// grade 1; every section of a grade shares that grade's quota map.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableInput {
    pub class_count: u32,
    pub sections: Vec<String>,
    pub subject_quotas: Vec<BTreeMap<SubjectName, u32>>,
    pub teacher_qualifications: BTreeMap<TeacherName, BTreeSet<SubjectName>>,
    #[serde(default)]
    pub class_teachers: BTreeMap<ClassKey, TeacherName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A structured warning or notice collected during generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectName>,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            class: None,
            subject: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            class: None,
            subject: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<ClassKey>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<SubjectName>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// The final output of one generation run.
///
/// Both schedule maps are fully populated: every class and every teacher from
/// the input appears with all six days present, Free where nothing was placed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableOutput {
    pub class_schedules: BTreeMap<ClassKey, ClassGrid>,
    pub teacher_schedules: BTreeMap<TeacherName, TeacherGrid>,
    pub period_labels: [&'static str; SLOTS_PER_DAY],
    pub notices: Vec<Notice>,
}
