//! Prompts for the turn pipeline
//!
//! Each builder fills its values in a single `format!` pass, so text typed by
//! the user is never re-scanned for placeholders.

use crate::rescue::ExtractedFields;

/// Value shown for fields the extractor could not fill
pub const NOT_SPECIFIED: &str = "not specified";

/// YES/NO gate: is this message about a stray animal that needs help?
pub fn intent_prompt(message: &str) -> String {
    format!(
        r#"
Analyze this message and determine if it's about a stray animal that needs rescue or help.

Message: "{message}"

Respond with only "YES" if the message is about:
- A stray, lost, or abandoned animal
- An injured animal
- An animal in distress or danger
- Someone asking for help with an animal they found

Respond with only "NO" if the message is about:
- Pet care questions for owned animals
- General animal information
- Unrelated topics

Response:"#
    )
}

/// Structured extraction of the rescue record as a bare JSON object
pub fn extraction_prompt(message: &str, conversation: &str) -> String {
    format!(
        r#"
Extract rescue information from this conversation. If information is missing, leave the field empty.

Conversation:
{conversation}
Latest message: "{message}"

Extract and return ONLY a JSON object with these fields:
{{
  "animalType": "type of animal (dog, cat, bird, etc.) or empty string",
  "issue": "description of the problem/condition or empty string",
  "location": "where the animal was found or empty string",
  "urgency": "low, medium, or high based on severity",
  "firstAid": ["array of specific first aid tips relevant to this situation"],
  "reportGenerated": true
}}

Important:
- Only include specific, actionable first aid tips
- Set urgency to "high" for severe injuries, "medium" for moderate issues, "low" for minor concerns
- Return valid JSON only, no other text

JSON:"#
    )
}

/// Persona prompt for the conversational reply
pub fn response_prompt(message: &str, fields: &ExtractedFields, conversation: &str) -> String {
    let animal_type = or_not_specified(fields.animal_type.as_deref());
    let issue = or_not_specified(fields.issue.as_deref());
    let location = or_not_specified(fields.location.as_deref());

    format!(
        r#"
You are Curio, a compassionate AI assistant specialized in stray animal rescue.

Current situation:
- Animal type: {animal_type}
- Issue: {issue}
- Location: {location}

User message: "{message}"

Previous conversation:
{conversation}

Respond with empathy and provide:
1. Acknowledgment of their concern
2. Specific, actionable advice for this situation
3. First aid tips if relevant
4. Request for missing information (location, animal type, or condition) if needed
5. Encouragement and reassurance

Keep your response helpful, concise (2-3 paragraphs), and focused on immediate next steps.
Always prioritize animal and human safety.

Response:"#
    )
}

fn or_not_specified(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}
