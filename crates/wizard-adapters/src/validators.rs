//! Validators concretos.
//!
//! Ambos son síncronos por dentro; el trait async del core les da un único
//! code path de espera en el motor.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use wizard_core::{get_path, StepValidator, ValidationOutcome, WizardError};

/// Validator declarativo: una lista de rutas que deben resolver a un valor
/// presente y no-null en el snapshot. Reporta un mensaje por ruta ausente.
pub struct RequiredFieldsValidator {
    fields: Vec<String>,
}

impl RequiredFieldsValidator {
    pub fn new<I, S>(fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { fields: fields.into_iter().map(Into::into).collect() }
    }
}

#[async_trait]
impl StepValidator for RequiredFieldsValidator {
    async fn validate(&self, data: &Value) -> Result<ValidationOutcome, WizardError> {
        let mut errors = HashMap::new();
        for field in &self.fields {
            if get_path(data, field).is_none() {
                errors.insert(field.clone(), format!("Missing required field: {field}"));
            }
        }
        if errors.is_empty() {
            Ok(ValidationOutcome::valid())
        } else {
            Ok(ValidationOutcome::invalid(errors))
        }
    }
}

/// Envuelve una closure síncrona como capability de validación.
pub struct FnValidator<F> {
    func: F,
}

impl<F> FnValidator<F> where F: Fn(&Value) -> ValidationOutcome + Send + Sync {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> StepValidator for FnValidator<F> where F: Fn(&Value) -> ValidationOutcome + Send + Sync {
    async fn validate(&self, data: &Value) -> Result<ValidationOutcome, WizardError> {
        Ok((self.func)(data))
    }
}
