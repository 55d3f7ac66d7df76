//! Form state collected across the steps of a registration wizard.
//!
//! `FormData` is an ordered map from field name to value. Values are plain
//! text, numbers, file handles, or the repeating group of team members.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Well-known field names used by the built-in steps.
pub mod fields {
    pub const NAME: &str = "name";
    pub const ROLL_NO: &str = "rollNo";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const COURSE: &str = "course";
    pub const YEAR: &str = "year";
    pub const MOTIVATION: &str = "motivation";
    pub const TEAM_NAME: &str = "teamName";
    pub const TEAM_MEMBERS: &str = "teamMembers";
    pub const DOCUMENTS: &str = "documents";
}

/// A handle to a file chosen by the user. No bytes are read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: None,
        }
    }
}

/// One entry of the team members group.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

impl MemberRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        registration_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            registration_number: registration_number.into(),
        }
    }

    /// True when every field holds something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.registration_number]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    /// True when no field holds anything other than whitespace.
    pub fn is_blank(&self) -> bool {
        [&self.name, &self.email, &self.registration_number]
            .iter()
            .all(|value| value.trim().is_empty())
    }
}

/// A single form value.
///
/// Serialized as `{"type": "text", "value": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Files(Vec<FileRef>),
    Members(Vec<MemberRecord>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// All values collected by one wizard.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct FormData {
    fields: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, FieldValue::Text(value.into()));
    }

    /// Text value of a field. Missing and non-text fields read as `None`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_text)
    }

    /// True when the field is missing or holds only whitespace.
    pub fn is_blank(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(FieldValue::Text(text)) => text.trim().is_empty(),
            Some(FieldValue::Number(_)) => false,
            Some(FieldValue::Files(files)) => files.is_empty(),
            Some(FieldValue::Members(members)) => members.iter().all(MemberRecord::is_blank),
            None => true,
        }
    }

    /// Team member records in slot order.
    pub fn members(&self) -> &[MemberRecord] {
        match self.fields.get(fields::TEAM_MEMBERS) {
            Some(FieldValue::Members(members)) => members,
            _ => &[],
        }
    }

    /// Replace the member at `slot`, growing the group with blank records.
    ///
    /// A slot of `usize::MAX` is ignored.
    pub fn set_member(&mut self, slot: usize, member: MemberRecord) {
        let entry = self
            .fields
            .entry(fields::TEAM_MEMBERS.to_string())
            .or_insert_with(|| FieldValue::Members(Vec::new()));
        if !matches!(entry, FieldValue::Members(_)) {
            *entry = FieldValue::Members(Vec::new());
        }
        let (FieldValue::Members(members), Some(len)) = (entry, slot.checked_add(1)) else {
            return;
        };
        if members.len() < len {
            members.resize_with(len, MemberRecord::default);
        }
        members[slot] = member;
    }

    /// Selected documents.
    pub fn files(&self) -> &[FileRef] {
        match self.fields.get(fields::DOCUMENTS) {
            Some(FieldValue::Files(files)) => files,
            _ => &[],
        }
    }

    pub fn set_files(&mut self, files: Vec<FileRef>) {
        self.set(fields::DOCUMENTS, FieldValue::Files(files));
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}
