//! Definición inmutable de un step del wizard.
//!
//! Se suministra una sola vez en configuración. El invariante de unicidad de
//! ids es responsabilidad del caller y no se re-valida después de configurar
//! (sólo hay un `debug_assert!` de ayuda en el builder del motor).

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::persist::{PersistenceMode, StorageAdapter};
use crate::validate::StepValidator;

/// Predicado de visibilidad sobre el snapshot de datos.
///
/// Es síncrono y sin efectos por tipo: el motor nunca espera una condición,
/// y el contrato "sin condiciones async" queda impuesto por el sistema de
/// tipos en lugar de por un guard en runtime.
pub type StepCondition = Box<dyn Fn(&Value) -> bool + Send + Sync>;

pub struct StepDefinition {
    id: String,
    label: String,
    condition: Option<StepCondition>,
    validator: Option<Arc<dyn StepValidator>>,
    auto_validate: Option<bool>,
    persistence_mode: Option<PersistenceMode>,
    persistence_adapter: Option<Arc<dyn StorageAdapter>>,
    /// Referencia opaca al componente de UI; el motor no la interpreta.
    component: Option<String>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(),
               label: label.into(),
               condition: None,
               validator: None,
               auto_validate: None,
               persistence_mode: None,
               persistence_adapter: None,
               component: None }
    }

    /// Predicado de visibilidad. Sin condición el step siempre está activo.
    pub fn with_condition(mut self, condition: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn StepValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Override por step del gate de validación en navegación hacia adelante.
    pub fn with_auto_validate(mut self, enabled: bool) -> Self {
        self.auto_validate = Some(enabled);
        self
    }

    /// Override por step del modo de persistencia.
    pub fn with_persistence_mode(mut self, mode: PersistenceMode) -> Self {
        self.persistence_mode = Some(mode);
        self
    }

    /// Override por step del adapter de persistencia.
    pub fn with_persistence_adapter(mut self, adapter: Arc<dyn StorageAdapter>) -> Self {
        self.persistence_adapter = Some(adapter);
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Identificador estable y único dentro de la configuración.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Evalúa la condición de visibilidad contra el snapshot.
    pub fn is_active(&self, data: &Value) -> bool {
        self.condition.as_ref().map_or(true, |c| c(data))
    }

    pub fn validator(&self) -> Option<&Arc<dyn StepValidator>> {
        self.validator.as_ref()
    }

    pub fn auto_validate_override(&self) -> Option<bool> {
        self.auto_validate
    }

    pub fn persistence_mode_override(&self) -> Option<PersistenceMode> {
        self.persistence_mode
    }

    pub fn persistence_adapter_override(&self) -> Option<&Arc<dyn StorageAdapter>> {
        self.persistence_adapter.as_ref()
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
         .field("id", &self.id)
         .field("label", &self.label)
         .field("conditional", &self.condition.is_some())
         .field("has_validator", &self.validator.is_some())
         .field("auto_validate", &self.auto_validate)
         .field("persistence_mode", &self.persistence_mode)
         .field("component", &self.component)
         .finish()
    }
}
