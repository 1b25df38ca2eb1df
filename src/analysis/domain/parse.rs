//! Lenient decoding of model classification output.

use super::{
    DefaultReason, DomainAnalysis, OrchestrationPattern, QueryClassification, TechnicalLevel,
};
use serde_json::{Map, Value};

/// Parses a classification from raw model output.
///
/// The JSON object is taken from the first `{` to the last `}`, so prose
/// or code fences around it are ignored. Individual fields degrade to
/// their defaults: a missing intent becomes `query`, a missing domain
/// becomes `Unknown`, an unrecognised level becomes `beginner` and an
/// unrecognised pattern becomes `sequential`.
///
/// # Errors
///
/// Returns [`DefaultReason::Parse`] when no JSON object can be decoded and
/// [`DefaultReason::MissingFields`] when the object has none of
/// `user_intent`, `domain_analysis` and `orchestration_pattern` with the
/// expected JSON type. A field of the wrong type counts as missing.
pub fn parse_classification(
    output: &str,
    query: &str,
) -> Result<QueryClassification, DefaultReason> {
    let object = extract_object(output)?;

    let intent = object.get("user_intent").and_then(Value::as_str);
    let domain = object.get("domain_analysis").and_then(Value::as_object);
    let pattern = object.get("orchestration_pattern").and_then(Value::as_str);
    if intent.is_none() && domain.is_none() && pattern.is_none() {
        return Err(DefaultReason::MissingFields);
    }

    let user_intent = intent
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| query.trim());

    let domain_analysis = domain.map_or_else(DomainAnalysis::unknown, parse_domain);

    let orchestration_pattern =
        pattern.map_or(OrchestrationPattern::Sequential, OrchestrationPattern::from_reported);

    Ok(QueryClassification::new(
        user_intent,
        domain_analysis,
        orchestration_pattern,
    ))
}

fn extract_object(output: &str) -> Result<Map<String, Value>, DefaultReason> {
    let start = output
        .find('{')
        .ok_or_else(|| DefaultReason::Parse("no JSON object in output".to_owned()))?;
    let end = output
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| DefaultReason::Parse("unterminated JSON object".to_owned()))?;
    let candidate = output
        .get(start..=end)
        .ok_or_else(|| DefaultReason::Parse("JSON object is not on a char boundary".to_owned()))?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(DefaultReason::Parse("output is not a JSON object".to_owned())),
        Err(err) => Err(DefaultReason::Parse(err.to_string())),
    }
}

fn parse_domain(fields: &Map<String, Value>) -> DomainAnalysis {
    let primary = fields
        .get("primary_domain")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let level = fields
        .get("technical_level")
        .and_then(Value::as_str)
        .map_or(TechnicalLevel::Beginner, TechnicalLevel::from_reported);
    let secondary = match fields.get("secondary_domains") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    };

    DomainAnalysis::new(primary, level, secondary)
}
