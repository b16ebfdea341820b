//! Coordinación de validación por step.
//!
//! El validator es una capability: un objeto con una única operación
//! `validate(data)`. Puede ser síncrono o asíncrono; el motor siempre lo
//! espera por el mismo camino (un único code path). Un step sin validator
//! valida trivialmente.
//!
//! Un fallo de validación NO es un error: es un resultado de primera clase
//! (`is_valid: false` + mapa campo → mensaje) que bloquea la navegación hacia
//! adelante. Los `Err` de un validator son bugs de integración y se propagan
//! al caller sin capturar.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::WizardError;
use crate::step::StepDefinition;

/// Resultado normalizado de ejecutar un validator contra un snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Mapa ruta-de-campo → mensaje. Reemplaza en bloque la entrada previa
    /// del step; nunca se mergea parcialmente.
    pub errors: HashMap<String, String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self { is_valid: true, errors: HashMap::new() }
    }

    pub fn invalid(errors: HashMap<String, String>) -> Self {
        Self { is_valid: false, errors }
    }
}

/// Mapa agregado `step_id → (ruta de campo → mensaje)`.
pub type ErrorMap = HashMap<String, HashMap<String, String>>;

/// Resultado agregado de `validate_all`: AND lógico de todos los steps
/// activos más el mapa de errores completo.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: ErrorMap,
}

/// Capability de validación de un step.
///
/// Las implementaciones deben tratar `data` como un snapshot de sólo
/// lectura. Errores de la implementación se devuelven como `Err` y el motor
/// los propaga sin tocar su estado.
#[async_trait]
pub trait StepValidator: Send + Sync {
    async fn validate(&self, data: &Value) -> Result<ValidationOutcome, WizardError>;
}

/// Ejecuta el validator del step (si lo hay) contra el snapshot.
pub async fn validate_step(step: &StepDefinition, data: &Value) -> Result<ValidationOutcome, WizardError> {
    match step.validator() {
        Some(v) => v.validate(data).await,
        None => Ok(ValidationOutcome::valid()),
    }
}
