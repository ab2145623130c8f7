//! Rescue record types
//!
//! `ExtractedFields` is whatever the extraction completion produced, with
//! every field optional. `RescueRecord` is the complete form that is only
//! handed to callers once every required field is present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// How urgently the animal needs help
///
/// The extractor does not validate the model's answer, so anything outside
/// low/medium/high is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Other(String),
}

impl Urgency {
    pub fn as_str(&self) -> &str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Other(raw) => raw,
        }
    }

    /// An urgency counts as present when its text is non-empty
    pub fn is_present(&self) -> bool {
        !self.as_str().is_empty()
    }
}

impl From<String> for Urgency {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Urgency::Low,
            "medium" => Urgency::Medium,
            "high" => Urgency::High,
            _ => Urgency::Other(value),
        }
    }
}

impl From<Urgency> for String {
    fn from(urgency: Urgency) -> Self {
        match urgency {
            Urgency::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete rescue report for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescueRecord {
    pub animal_type: String,
    pub issue: String,
    pub location: String,
    pub urgency: Urgency,
    pub first_aid: Vec<String>,
    #[serde(default)]
    pub report_generated: bool,
}

/// Possibly-partial fields parsed from the extraction completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub animal_type: Option<String>,
    pub issue: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<Urgency>,
    pub first_aid: Option<Vec<String>>,
    pub report_generated: Option<bool>,
}

impl ExtractedFields {
    /// Fields used when the extraction output could not be parsed
    pub fn degenerate() -> Self {
        Self {
            report_generated: Some(false),
            ..Self::default()
        }
    }

    /// Read fields from a parsed JSON value
    ///
    /// Each field is read on its own: a value of the wrong type leaves that
    /// field absent without affecting the others. Anything other than an
    /// object yields no fields.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            animal_type: text_field(object, "animalType"),
            issue: text_field(object, "issue"),
            location: text_field(object, "location"),
            urgency: text_field(object, "urgency").map(Urgency::from),
            first_aid: first_aid_field(object),
            report_generated: object.get("reportGenerated").and_then(Value::as_bool),
        }
    }

    /// Names of required fields that are absent or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_filled(&self.animal_type) {
            missing.push("animalType");
        }
        if !is_filled(&self.issue) {
            missing.push("issue");
        }
        if !is_filled(&self.location) {
            missing.push("location");
        }
        if !self.urgency.as_ref().is_some_and(Urgency::is_present) {
            missing.push("urgency");
        }
        if self.first_aid.as_ref().is_none_or(|tips| tips.is_empty()) {
            missing.push("firstAid");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Promote to a `RescueRecord` when every required field is present
    ///
    /// Values are carried over unchanged. A complete extraction that omits
    /// `reportGenerated` is reported as generated.
    pub fn to_record(&self) -> Option<RescueRecord> {
        if !self.is_complete() {
            return None;
        }

        Some(RescueRecord {
            animal_type: self.animal_type.clone()?,
            issue: self.issue.clone()?,
            location: self.location.clone()?,
            urgency: self.urgency.clone()?,
            first_aid: self.first_aid.clone()?,
            report_generated: self.report_generated.unwrap_or(true),
        })
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Strings are taken as-is; numbers and booleans by their JSON text
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(scalar_text)
}

/// A list keeps its usable entries; a lone string is a single step
fn first_aid_field(object: &Map<String, Value>) -> Option<Vec<String>> {
    match object.get("firstAid")? {
        Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
        Value::String(step) if !step.is_empty() => Some(vec![step.clone()]),
        _ => None,
    }
}

/// Result of parsing the extraction completion
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The completion was valid JSON (fields may still be missing)
    Parsed(ExtractedFields),
    /// The completion was not usable JSON; raw text kept for logging
    Malformed(String),
}

impl ExtractionOutcome {
    /// Parse raw completion text
    ///
    /// Blank text is treated as an empty object. Only text that is not
    /// JSON at all is `Malformed`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let text = if trimmed.is_empty() { "{}" } else { trimmed };

        match serde_json::from_str::<Value>(text) {
            Ok(value) => ExtractionOutcome::Parsed(ExtractedFields::from_value(&value)),
            Err(_) => ExtractionOutcome::Malformed(raw.to_string()),
        }
    }

    /// Fields to hand to the rest of the pipeline
    pub fn fields(&self) -> ExtractedFields {
        match self {
            ExtractionOutcome::Parsed(fields) => fields.clone(),
            ExtractionOutcome::Malformed(_) => ExtractedFields::degenerate(),
        }
    }
}
