use crate::data::{
    class_key, empty_class_week, empty_teacher_week, ClassCell, ClassGrid, ClassKey, Notice,
    SubjectName, TeacherCell, TeacherGrid, TeacherName, TimetableInput, TimetableOutput,
    CLASS_TEACHER_SLOT, DAYS, LUNCH_SLOT, PERIOD_LABELS, TEACHING_SLOTS,
};
use itertools::Itertools;
use log::{debug, info, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

// caps probing per subject
const MAX_ATTEMPTS: u32 = 100;

/// Generates the weekly timetable using the process random source.
pub fn generate(input: &TimetableInput) -> TimetableOutput {
    generate_with_rng(input, &mut rand::rng())
}

/// Generates the weekly timetable with an injected random source.
///
/// Deterministic for a seeded RNG. Placement is randomized greedy: for every
/// class the subject quotas are walked in map order and each subject's periods
/// are probed into a shuffled day-by-slot order, taking any (day, slot) pair
/// where both the class cell and the resolved teacher's cell are still Free.
/// Unmet demand never aborts the run; it is reported through the returned
/// notices and the affected cells stay Free.
pub fn generate_with_rng<R: Rng + ?Sized>(input: &TimetableInput, rng: &mut R) -> TimetableOutput {
    info!(
        "Generating timetable for {} grades, sections [{}], {} teachers",
        input.class_count,
        input.sections.iter().join(","),
        input.teacher_qualifications.len()
    );

    let available = (DAYS.len() * TEACHING_SLOTS.len()) as u32;
    let mut notices: Vec<Notice> = Vec::new();
    let mut class_schedules: BTreeMap<ClassKey, ClassGrid> = BTreeMap::new();
    // Every known teacher gets a week up front, placed or not.
    let mut teacher_schedules: BTreeMap<TeacherName, TeacherGrid> = input
        .teacher_qualifications
        .keys()
        .map(|name| (name.clone(), empty_teacher_week()))
        .collect();

    for grade in 1..=input.class_count {
        let quotas = &input.subject_quotas[grade as usize - 1];
        for section in &input.sections {
            let key = class_key(grade, section);
            let mut grid = empty_class_week();
            let class_teacher = input.class_teachers.get(&key);

            // Class-teacher and lunch seeding happen before any quota
            // placement; placement only writes cells that are still Free.
            for day in DAYS {
                let cells = grid.get_mut(&day).unwrap();
                if let Some(teacher) = class_teacher {
                    cells[CLASS_TEACHER_SLOT] = ClassCell::ClassTeacher(teacher.clone());
                }
                cells[LUNCH_SLOT] = ClassCell::Lunch;
            }
            if let Some(teacher) = class_teacher {
                let week = teacher_schedules
                    .entry(teacher.clone())
                    .or_insert_with(empty_teacher_week);
                for day in DAYS {
                    let cells = week.get_mut(&day).unwrap();
                    cells[CLASS_TEACHER_SLOT] = TeacherCell::Class(key.clone());
                    cells[LUNCH_SLOT] = TeacherCell::Lunch;
                }
            }

            let total_required: u32 = quotas.values().sum();
            debug!("{key}: demand {total_required} of {available} teaching slots");
            if total_required > available {
                notices.push(
                    Notice::warning(format!(
                        "{key}: total required periods ({total_required}) exceeds available \
                         periods ({available}). Some subjects may not be fully assigned."
                    ))
                    .with_class(&key),
                );
            } else if total_required < available - 6 {
                notices.push(
                    Notice::info(format!(
                        "{key}: only {total_required} periods requested out of {} available \
                         (excluding the class teacher period). Expect some free periods.",
                        available - 6
                    ))
                    .with_class(&key),
                );
            }

            for (subject, &required) in quotas {
                let Some(teacher) = qualified_teacher(&input.teacher_qualifications, subject)
                else {
                    notices.push(
                        Notice::warning(format!(
                            "No teacher available for subject '{subject}' in {key}. Skipping."
                        ))
                        .with_class(&key)
                        .with_subject(subject),
                    );
                    continue;
                };
                let week = teacher_schedules.get_mut(teacher).unwrap();
                let placed = place_subject(&mut grid, week, &key, subject, required, rng);
                trace!("{key}: {subject} placed {placed}/{required} with {teacher}");
                if placed < required {
                    notices.push(
                        Notice::warning(format!(
                            "Could not assign all {required} periods for {subject} in {key}. \
                             Assigned {placed} periods."
                        ))
                        .with_class(&key)
                        .with_subject(subject),
                    );
                }
            }

            class_schedules.insert(key, grid);
        }
    }

    TimetableOutput {
        class_schedules,
        teacher_schedules,
        period_labels: PERIOD_LABELS,
        notices,
    }
}

/// First teacher, in qualification-map order, qualified for the subject.
fn qualified_teacher<'a>(
    qualifications: &'a BTreeMap<TeacherName, BTreeSet<SubjectName>>,
    subject: &str,
) -> Option<&'a TeacherName> {
    qualifications
        .iter()
        .find(|(_, subjects)| subjects.contains(subject))
        .map(|(name, _)| name)
}

/// Probes shuffled (day, slot) pairs until the quota is met or the attempt
/// budget runs out, writing mutually free cells in both views. Returns the
/// number of periods actually placed.
fn place_subject<R: Rng + ?Sized>(
    grid: &mut ClassGrid,
    teacher_week: &mut TeacherGrid,
    key: &ClassKey,
    subject: &str,
    required: u32,
    rng: &mut R,
) -> u32 {
    let mut placed = 0u32;
    let mut attempts = 0u32;
    let mut days = DAYS;
    days.shuffle(rng);
    'week: for day in days {
        let mut slots = TEACHING_SLOTS;
        slots.shuffle(rng);
        for slot in slots {
            if placed >= required {
                break 'week;
            }
            let class_cell = &mut grid.get_mut(&day).unwrap()[slot];
            let teacher_cell = &mut teacher_week.get_mut(&day).unwrap()[slot];
            if class_cell.is_free() && teacher_cell.is_free() {
                *class_cell = ClassCell::Subject(subject.to_string());
                *teacher_cell = TeacherCell::Class(key.clone());
                placed += 1;
            }
            attempts += 1;
            if attempts > MAX_ATTEMPTS {
                break 'week;
            }
        }
    }
    placed
}
