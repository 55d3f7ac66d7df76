//! The built-in validation rules.

use rf_protocol::form_models::{fields, FormData, MemberRecord};

use super::{FailureClass, ValidationOutcome};

/// Fields every personal-info or team-lead step must fill.
pub const PERSONAL_REQUIRED: [&str; 3] = [fields::NAME, fields::ROLL_NO, fields::EMAIL];

/// Guidelines and confirmation.
pub fn always_valid(_form: &FormData) -> ValidationOutcome {
    ValidationOutcome::ok()
}

/// Name, roll number and email must be present.
pub fn personal_info(form: &FormData) -> ValidationOutcome {
    let missing: Vec<String> = PERSONAL_REQUIRED
        .iter()
        .filter(|key| form.is_blank(key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        ValidationOutcome::ok()
    } else {
        ValidationOutcome::invalid(FailureClass::MissingRequiredFields, missing)
    }
}

/// At least one member slot must be fully filled. Partial slots are ignored.
pub fn team_members(form: &FormData) -> ValidationOutcome {
    if form.members().iter().any(MemberRecord::is_complete) {
        ValidationOutcome::ok()
    } else {
        ValidationOutcome::invalid(
            FailureClass::NoCompleteTeamMember,
            vec![fields::TEAM_MEMBERS.to_string()],
        )
    }
}

/// At least one file must be selected.
pub fn upload_documents(form: &FormData) -> ValidationOutcome {
    if form.files().is_empty() {
        ValidationOutcome::invalid(
            FailureClass::NoDocumentsSelected,
            vec![fields::DOCUMENTS.to_string()],
        )
    } else {
        ValidationOutcome::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_protocol::form_models::FileRef;

    fn personal(name: &str, roll_no: &str, email: &str) -> FormData {
        let mut form = FormData::new();
        form.set_text(fields::NAME, name);
        form.set_text(fields::ROLL_NO, roll_no);
        form.set_text(fields::EMAIL, email);
        form
    }

    #[test]
    fn test_personal_info_requires_all_three_fields() {
        assert!(personal_info(&personal("Jane", "X", "a@b.com")).is_valid());

        let outcome = personal_info(&personal("", "X", "a@b.com"));
        assert!(!outcome.is_valid());
        assert_eq!(outcome.failure, Some(FailureClass::MissingRequiredFields));
        assert_eq!(outcome.missing, vec!["name".to_string()]);
    }

    #[test]
    fn test_personal_info_treats_whitespace_as_blank() {
        let outcome = personal_info(&personal("  ", "\t", "a@b.com"));
        assert_eq!(outcome.missing, vec!["name".to_string(), "rollNo".to_string()]);
    }

    #[test]
    fn test_personal_info_ignores_optional_fields_and_formats() {
        let mut form = personal("Jane", "X", "not-an-email");
        form.set_text(fields::PHONE, "");
        assert!(personal_info(&form).is_valid());
    }

    #[test]
    fn test_team_members_all_empty_slots_fail() {
        let mut form = FormData::new();
        for slot in 0..5 {
            form.set_member(slot, MemberRecord::default());
        }
        let outcome = team_members(&form);
        assert_eq!(outcome.failure, Some(FailureClass::NoCompleteTeamMember));
    }

    #[test]
    fn test_team_members_one_full_slot_passes_despite_partials() {
        let mut form = FormData::new();
        form.set_member(0, MemberRecord::new("Ann", "", "R-1"));
        form.set_member(3, MemberRecord::new("Bob", "bob@uni.edu", "R-2"));
        assert!(team_members(&form).is_valid());
    }

    #[test]
    fn test_team_members_whitespace_slot_is_incomplete() {
        let mut form = FormData::new();
        form.set_member(0, MemberRecord::new("Ann", "ann@uni.edu", "  "));
        assert!(!team_members(&form).is_valid());
    }

    #[test]
    fn test_upload_documents_needs_a_file() {
        let mut form = personal("Jane", "X", "a@b.com");
        assert!(!upload_documents(&form).is_valid());

        form.set_files(vec![FileRef::new("huge.exe", u64::MAX)]);
        assert!(upload_documents(&form).is_valid());
    }

    #[test]
    fn test_rules_are_deterministic() {
        let form = personal("", "X", "a@b.com");
        assert_eq!(personal_info(&form), personal_info(&form));
    }
}
