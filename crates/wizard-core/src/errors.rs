//! Errores específicos del core (simples por ahora).
//!
//! Los fallos de navegación NO son errores: se reportan como `false` en el
//! resultado booleano de las operaciones de navegación. `WizardError` queda
//! reservado para fallos de integración (un validator que revienta) y mal
//! uso interno del motor.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WizardError {
    #[error("validator failed for step `{step_id}`: {message}")]
    Validator { step_id: String, message: String },
    #[error("wizard has no configured steps")] NoSteps,
    #[error("internal: {0}")] Internal(String),
}
