use crate::data::{
    ClassCell, ClassKey, Day, Notice, TimetableOutput, ASSEMBLY_SLOT, LUNCH_SLOT, SLOTS_PER_DAY,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// One manual cell replacement, layered on a generated timetable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualOverride {
    pub class: ClassKey,
    pub day: Day,
    pub slot: usize,
    pub value: String,
}

/// Applies overrides to a generated result, in order; a later override wins
/// on the same cell. Overridden cells carry the given text verbatim and are
/// not re-checked against the generation invariants. Targets the schedule
/// does not expose for editing (Assembly, Lunch, an unknown class, a slot out
/// of range) are skipped with an info notice.
pub fn apply(output: &mut TimetableOutput, overrides: &[ManualOverride]) {
    for o in overrides {
        if o.slot >= SLOTS_PER_DAY || o.slot == ASSEMBLY_SLOT || o.slot == LUNCH_SLOT {
            output.notices.push(
                Notice::info(format!(
                    "Override for {} on {} slot {} skipped: slot is not editable.",
                    o.class, o.day, o.slot
                ))
                .with_class(&o.class),
            );
            continue;
        }
        match output.class_schedules.get_mut(&o.class) {
            Some(grid) => {
                debug!("override: {} {} slot {} -> '{}'", o.class, o.day, o.slot, o.value);
                grid.get_mut(&o.day).unwrap()[o.slot] = ClassCell::Manual(o.value.clone());
            }
            None => {
                output.notices.push(
                    Notice::info(format!(
                        "Override skipped: unknown class '{}'.",
                        o.class
                    ))
                    .with_class(&o.class),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Severity, TimetableInput};
    use crate::solver;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn generated() -> TimetableOutput {
        let input = TimetableInput {
            class_count: 1,
            sections: vec!["A".to_string()],
            subject_quotas: vec![[("Maths".to_string(), 4u32)].into_iter().collect()],
            teacher_qualifications: [(
                "T1".to_string(),
                ["Maths".to_string()].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
            class_teachers: BTreeMap::new(),
        };
        solver::generate_with_rng(&input, &mut StdRng::seed_from_u64(3))
    }

    fn single(class: &str, day: Day, slot: usize, value: &str) -> ManualOverride {
        ManualOverride {
            class: class.to_string(),
            day,
            slot,
            value: value.to_string(),
        }
    }

    #[test]
    fn override_replaces_the_cell_verbatim() {
        let mut output = generated();
        let before = output.notices.len();
        apply(
            &mut output,
            &[single("Class 1A", Day::Monday, 2, "Drama (Guest)")],
        );
        let cell = &output.class_schedules["Class 1A"][&Day::Monday][2];
        assert_eq!(cell, &ClassCell::Manual("Drama (Guest)".to_string()));
        assert_eq!(cell.to_string(), "Drama (Guest)");
        assert_eq!(output.notices.len(), before);
    }

    #[test]
    fn later_override_wins_on_the_same_cell() {
        let mut output = generated();
        apply(
            &mut output,
            &[
                single("Class 1A", Day::Tuesday, 3, "Music"),
                single("Class 1A", Day::Tuesday, 3, "Library"),
            ],
        );
        assert_eq!(
            output.class_schedules["Class 1A"][&Day::Tuesday][3],
            ClassCell::Manual("Library".to_string())
        );
    }

    #[test]
    fn assembly_and_lunch_slots_are_not_editable() {
        let mut output = generated();
        apply(
            &mut output,
            &[
                single("Class 1A", Day::Monday, ASSEMBLY_SLOT, "Maths"),
                single("Class 1A", Day::Monday, LUNCH_SLOT, "Maths"),
                single("Class 1A", Day::Monday, 12, "Maths"),
            ],
        );
        assert_eq!(
            output.class_schedules["Class 1A"][&Day::Monday][ASSEMBLY_SLOT],
            ClassCell::Assembly
        );
        assert_eq!(
            output.class_schedules["Class 1A"][&Day::Monday][LUNCH_SLOT],
            ClassCell::Lunch
        );
        let skips: Vec<_> = output
            .notices
            .iter()
            .filter(|n| n.severity == Severity::Info && n.message.contains("not editable"))
            .collect();
        assert_eq!(skips.len(), 3);
    }

    #[test]
    fn unknown_class_is_skipped_with_a_notice() {
        let mut output = generated();
        apply(&mut output, &[single("Class 9Z", Day::Friday, 2, "Maths")]);
        assert!(output
            .notices
            .iter()
            .any(|n| n.message.contains("unknown class 'Class 9Z'")));
    }
}
