//! Builder para `WizardEngine`.
//!
//! Acumula la lista ordenada de steps, la configuración global y el snapshot
//! inicial opcional; `build()` consume el builder y entrega un motor todavía
//! sin hidratar (el caller debe llamar a `initialize()`).

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::WizardConfig;
use crate::engine::WizardEngine;
use crate::persist::{PersistenceMode, StorageAdapter};
use crate::step::StepDefinition;

pub struct WizardBuilder {
    steps: Vec<StepDefinition>,
    config: WizardConfig,
    initial_data: Value,
}

impl WizardBuilder {
    pub(crate) fn new() -> Self {
        Self { steps: Vec::new(),
               config: WizardConfig::default(),
               initial_data: Value::Object(Map::new()) }
    }

    /// Añade el siguiente step en orden de configuración.
    pub fn add_step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    /// Reemplaza la lista completa de steps.
    pub fn steps(mut self, steps: Vec<StepDefinition>) -> Self {
        self.steps = steps;
        self
    }

    /// Configuración global en bloque.
    pub fn config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn auto_validate(mut self, enabled: bool) -> Self {
        self.config.auto_validate = enabled;
        self
    }

    pub fn persistence_mode(mut self, mode: PersistenceMode) -> Self {
        self.config.persistence.mode = mode;
        self
    }

    pub fn persistence_adapter(mut self, adapter: Arc<dyn StorageAdapter>) -> Self {
        self.config.persistence.adapter = Some(adapter);
        self
    }

    /// Puerto de efectos post-transición (ver `config::TransitionHook`).
    pub fn on_transition(mut self, hook: impl Fn(Option<&str>, &str) + Send + Sync + 'static) -> Self {
        self.config.on_transition = Some(Box::new(hook));
        self
    }

    /// Snapshot inicial parcial; la hidratación persistida gana sobre él en
    /// claves solapadas.
    pub fn initial_data(mut self, data: Value) -> Self {
        self.initial_data = data;
        self
    }

    pub fn build(self) -> WizardEngine {
        // Ayuda al desarrollador: ids duplicados rompen la navegación. La
        // configuración es responsabilidad del caller y no se re-valida en
        // release.
        debug_assert!({
                          let mut seen = HashSet::new();
                          self.steps.iter().all(|s| seen.insert(s.id().to_string()))
                      },
                      "step ids must be unique within a wizard configuration");

        WizardEngine::from_parts(self.steps, self.config, self.initial_data)
    }
}
