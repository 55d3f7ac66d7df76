//! Field layout of each step kind.
//!
//! Front ends render the fields returned by [`fields_for_step`] in order.
//! The `required` flags mirror the validation rules; for member slots the
//! group as a whole is required, so individual slot fields are optional.

use rf_protocol::flow_models::StepKind;
use rf_protocol::form_models::{fields, FormData, MemberRecord};

/// Which part of a member record a field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPart {
    Name,
    Email,
    RegistrationNumber,
}

impl MemberPart {
    pub fn read(self, member: &MemberRecord) -> &str {
        match self {
            MemberPart::Name => &member.name,
            MemberPart::Email => &member.email,
            MemberPart::RegistrationNumber => &member.registration_number,
        }
    }

    pub fn write(self, member: &mut MemberRecord, value: String) {
        match self {
            MemberPart::Name => member.name = value,
            MemberPart::Email => member.email = value,
            MemberPart::RegistrationNumber => member.registration_number = value,
        }
    }
}

/// Where a field's value lives in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Text(&'static str),
    Member { slot: usize, part: MemberPart },
    Files,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: String,
    pub target: FieldTarget,
    pub required: bool,
}

impl FieldSpec {
    fn text(label: &str, key: &'static str, required: bool) -> Self {
        Self {
            label: label.to_string(),
            target: FieldTarget::Text(key),
            required,
        }
    }

    /// Current value as display text. Files read as a comma-separated list
    /// of names.
    pub fn read(&self, form: &FormData) -> String {
        match self.target {
            FieldTarget::Text(key) => form.text(key).unwrap_or_default().to_string(),
            FieldTarget::Member { slot, part } => form
                .members()
                .get(slot)
                .map(|member| part.read(member).to_string())
                .unwrap_or_default(),
            FieldTarget::Files => form
                .files()
                .iter()
                .map(|file| file.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Fields rendered for a step of `kind`. Team member steps render
/// `team_slots` member slots.
pub fn fields_for_step(kind: StepKind, team_slots: usize) -> Vec<FieldSpec> {
    match kind {
        StepKind::Guidelines | StepKind::Confirmation => Vec::new(),
        StepKind::PersonalInfo => vec![
            FieldSpec::text("Full name", fields::NAME, true),
            FieldSpec::text("Roll number", fields::ROLL_NO, true),
            FieldSpec::text("Email", fields::EMAIL, true),
            FieldSpec::text("Phone", fields::PHONE, false),
            FieldSpec::text("Course", fields::COURSE, false),
            FieldSpec::text("Year", fields::YEAR, false),
            FieldSpec::text("Why do you want to attend?", fields::MOTIVATION, false),
        ],
        StepKind::TeamLead => vec![
            FieldSpec::text("Team name", fields::TEAM_NAME, false),
            FieldSpec::text("Lead name", fields::NAME, true),
            FieldSpec::text("Lead registration number", fields::ROLL_NO, true),
            FieldSpec::text("Lead email", fields::EMAIL, true),
            FieldSpec::text("Lead phone", fields::PHONE, false),
        ],
        StepKind::TeamMembers => (0..team_slots)
            .flat_map(|slot| {
                let n = slot + 1;
                [
                    (format!("Member {n} name"), MemberPart::Name),
                    (format!("Member {n} email"), MemberPart::Email),
                    (
                        format!("Member {n} registration number"),
                        MemberPart::RegistrationNumber,
                    ),
                ]
                .into_iter()
                .map(move |(label, part)| FieldSpec {
                    label,
                    target: FieldTarget::Member { slot, part },
                    required: false,
                })
            })
            .collect(),
        StepKind::UploadDocuments => vec![FieldSpec {
            label: "Documents (file path, Enter to add)".to_string(),
            target: FieldTarget::Files,
            required: true,
        }],
    }
}
