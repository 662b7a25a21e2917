//! Declarative request-body shape checking: expected type per field, exact
//! key set. The write endpoints are strict: a missing, extra, or ill-typed
//! key rejects the whole body.

use crate::error::AppError;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
}

impl FieldType {
    fn matches(self, v: &Value) -> bool {
        match self {
            FieldType::String => v.is_string(),
            FieldType::Int => v.as_i64().is_some(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "integer",
        }
    }
}

/// Expected shape of a JSON request body.
pub struct BodySchema {
    fields: &'static [(&'static str, FieldType)],
}

impl BodySchema {
    pub const fn new(fields: &'static [(&'static str, FieldType)]) -> Self {
        BodySchema { fields }
    }

    pub fn validate(&self, body: &Value) -> Result<(), AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::BadRequest("body must be a JSON object".into()))?;
        for (name, ty) in self.fields {
            match obj.get(*name) {
                None => {
                    return Err(AppError::BadRequest(format!("missing field '{}'", name)));
                }
                Some(v) if !ty.matches(v) => {
                    return Err(AppError::BadRequest(format!(
                        "'{}' must be a {}",
                        name,
                        ty.name()
                    )));
                }
                Some(_) => {}
            }
        }
        if let Some(extra) = obj
            .keys()
            .find(|k| !self.fields.iter().any(|(name, _)| *name == k.as_str()))
        {
            return Err(AppError::BadRequest(format!("unknown field '{}'", extra)));
        }
        Ok(())
    }
}
