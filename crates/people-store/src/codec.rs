//! JSON encoding of the forest held in a slot.

use people_model::Person;

use crate::error::CodecError;

/// Encode the forest. Non-finite salaries are rejected because serde_json
/// would write them as `null`, which no longer decodes.
pub fn encode_forest(records: &[Person]) -> Result<String, CodecError> {
    if let Some(person) = records.iter().find_map(Person::find_non_finite_salary) {
        return Err(CodecError::NonFiniteSalary {
            id: person.id.clone(),
        });
    }
    serde_json::to_string(records).map_err(CodecError::Encode)
}

/// Decode slot content. Blank content decodes to `None` (treated as absent).
pub fn decode_forest(content: &str) -> Result<Option<Vec<Person>>, CodecError> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(CodecError::Decode)
}
