use steeple_core::util::date::parse_date;

use super::FilterSpec;
use crate::error::{ServiceError, ServiceResult};

const FLAG_PREFIX: &str = "flag.";

fn parse_flag(name: &str, value: &str) -> ServiceResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ServiceError::ValidationError(format!(
            "flag.{name} must be true or false, got '{other}'"
        ))),
    }
}

impl FilterSpec {
    /// ## Summary
    /// Builds a filter from list query parameters.
    ///
    /// Recognised keys are `q`, `flag.<name>`, `from`, `to` and `status`;
    /// anything else is ignored so endpoints can mix in their own parameters.
    ///
    /// ## Errors
    /// Returns `ValidationError` for malformed flags or dates, or a range whose
    /// start is after its end.
    pub fn from_query<'a, I>(pairs: I) -> ServiceResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut spec = Self::default();

        for (key, value) in pairs {
            match key {
                "q" => spec.text = Some(value.to_string()).filter(|v| !v.trim().is_empty()),
                "from" => spec.date_range.from = Some(parse_query_date(key, value)?),
                "to" => spec.date_range.to = Some(parse_query_date(key, value)?),
                "status" => spec.status = Some(value.trim().to_string()).filter(|v| !v.is_empty()),
                _ => {
                    if let Some(name) = key.strip_prefix(FLAG_PREFIX).filter(|n| !n.is_empty()) {
                        spec.flags.insert(name.to_string(), parse_flag(name, value)?);
                    }
                }
            }
        }

        if let (Some(from), Some(to)) = (spec.date_range.from, spec.date_range.to)
            && from > to
        {
            return Err(ServiceError::ValidationError(format!(
                "from ({from}) is after to ({to})"
            )));
        }
        Ok(spec)
    }
}

fn parse_query_date(key: &str, value: &str) -> ServiceResult<chrono::NaiveDate> {
    parse_date(value).map_err(|e| ServiceError::ValidationError(format!("{key}: {e}")))
}
