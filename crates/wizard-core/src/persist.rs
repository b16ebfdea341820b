//! Coordinación de persistencia: cuándo se guarda, con qué adapter y cómo se
//! rehidrata una sesión al arranque.
//!
//! El adapter es una capability key/value mínima (`save_step` / `get_step` /
//! `clear`). Por contrato los adapters degradan con gracia: tragan o reportan
//! sus propios fallos y el coordinador no reintenta ni envuelve en try/catch.
//!
//! Layout persistido: un registro lógico por `step_id` (JSON arbitrario) más
//! un registro de metadata de sesión bajo la clave reservada
//! [`crate::constants::META_KEY`], siempre que el modo efectivo no sea
//! `Manual`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::META_KEY;
use crate::merge::merge_json;
use crate::step::StepDefinition;

/// Política de guardado durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// Guardar en cada mutación de datos.
    OnChange,
    /// Guardar al cambiar de step (default).
    #[default]
    OnStepChange,
    /// Guardar sólo ante `save()` explícito.
    Manual,
}

impl PersistenceMode {
    /// Parseo laxo para configuración por entorno.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "on_change" | "onChange" => Some(Self::OnChange),
            "on_step_change" | "onStepChange" => Some(Self::OnStepChange),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Disparador de un intento de guardado.
///
/// `Manual` siempre pasa; los disparadores automáticos sólo persisten si
/// coinciden con el modo efectivo configurado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    OnChange,
    OnStepChange,
    Manual,
}

impl SaveTrigger {
    fn passes(self, mode: PersistenceMode) -> bool {
        match self {
            SaveTrigger::Manual => true,
            SaveTrigger::OnChange => mode == PersistenceMode::OnChange,
            SaveTrigger::OnStepChange => mode == PersistenceMode::OnStepChange,
        }
    }
}

/// Capability de almacenamiento key/value.
///
/// Infalible por contrato: los fallos del backend son responsabilidad del
/// adapter (loguear, tragar), nunca del motor.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    async fn save_step(&self, step_id: &str, data: &Value);
    async fn get_step(&self, step_id: &str) -> Option<Value>;
    async fn clear(&self);
}

/// Metadata de sesión persistida junto a los datos de cada step para poder
/// reanudar una sesión completa (no sólo valores de campos) tras un reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub current_step_id: String,
    pub visited: Vec<String>,
    pub completed: Vec<String>,
}

/// Decide, por modo configurado y override por step, si y cuándo empujar
/// datos al adapter, y cómo hidratar al arranque.
pub struct PersistenceCoordinator {
    mode: PersistenceMode,
    adapter: Option<Arc<dyn StorageAdapter>>,
}

impl PersistenceCoordinator {
    pub fn new(mode: PersistenceMode, adapter: Option<Arc<dyn StorageAdapter>>) -> Self {
        Self { mode, adapter }
    }

    /// Modo efectivo para un step: override del step → config global.
    pub fn effective_mode(&self, step: &StepDefinition) -> PersistenceMode {
        step.persistence_mode_override().unwrap_or(self.mode)
    }

    fn adapter_for<'a>(&'a self, step: &'a StepDefinition) -> Option<&'a Arc<dyn StorageAdapter>> {
        step.persistence_adapter_override().or(self.adapter.as_ref())
    }

    /// Persiste `data` bajo el id del step si el disparador pasa el modo
    /// efectivo. Devuelve si hubo guardado.
    pub async fn maybe_save(&self, trigger: SaveTrigger, step: &StepDefinition, data: &Value) -> bool {
        if !trigger.passes(self.effective_mode(step)) {
            return false;
        }
        match self.adapter_for(step) {
            Some(adapter) => {
                adapter.save_step(step.id(), data).await;
                true
            }
            None => false,
        }
    }

    /// Guarda la metadata de sesión bajo la clave reservada. No-op en modo
    /// global `Manual` o sin adapter global.
    pub async fn save_meta(&self, meta: &SessionMeta) {
        if self.mode == PersistenceMode::Manual {
            return;
        }
        if let Some(adapter) = &self.adapter {
            match serde_json::to_value(meta) {
                Ok(v) => adapter.save_step(META_KEY, &v).await,
                Err(e) => eprintln!("[persist][meta] serialization failed: {e}"),
            }
        }
    }

    async fn load_meta(&self) -> Option<SessionMeta> {
        if self.mode == PersistenceMode::Manual {
            return None;
        }
        let raw = self.adapter.as_ref()?.get_step(META_KEY).await?;
        serde_json::from_value(raw).ok()
    }

    /// Hidratación de arranque: parte de `seed` (initial data del caller) y
    /// superpone el snapshot persistido de cada step en orden de
    /// configuración (merge shallow, steps posteriores ganan en colisión;
    /// lo persistido gana sobre el seed). Devuelve además la metadata de
    /// sesión si el modo lo permite.
    pub async fn hydrate(&self, steps: &[StepDefinition], seed: Value) -> (Value, Option<SessionMeta>) {
        let mut data = seed;
        for step in steps {
            if let Some(adapter) = self.adapter_for(step) {
                if let Some(snapshot) = adapter.get_step(step.id()).await {
                    data = merge_json(&data, &snapshot);
                }
            }
        }
        let meta = self.load_meta().await;
        (data, meta)
    }

    /// `clear()` sobre el adapter global y sobre cada adapter con override
    /// por step. No toca el estado en memoria del motor.
    pub async fn clear_all(&self, steps: &[StepDefinition]) {
        if let Some(adapter) = &self.adapter {
            adapter.clear().await;
        }
        for step in steps {
            if let Some(adapter) = step.persistence_adapter_override() {
                adapter.clear().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_trigger_always_passes() {
        for mode in [PersistenceMode::OnChange, PersistenceMode::OnStepChange, PersistenceMode::Manual] {
            assert!(SaveTrigger::Manual.passes(mode));
        }
    }

    #[test]
    fn automatic_triggers_require_matching_mode() {
        assert!(SaveTrigger::OnChange.passes(PersistenceMode::OnChange));
        assert!(!SaveTrigger::OnChange.passes(PersistenceMode::OnStepChange));
        assert!(!SaveTrigger::OnStepChange.passes(PersistenceMode::Manual));
        assert!(SaveTrigger::OnStepChange.passes(PersistenceMode::OnStepChange));
    }

    #[test]
    fn effective_mode_prefers_step_override() {
        let coordinator = PersistenceCoordinator::new(PersistenceMode::OnStepChange, None);
        let plain = StepDefinition::new("a", "A");
        let overridden = StepDefinition::new("b", "B").with_persistence_mode(PersistenceMode::Manual);
        assert_eq!(coordinator.effective_mode(&plain), PersistenceMode::OnStepChange);
        assert_eq!(coordinator.effective_mode(&overridden), PersistenceMode::Manual);
    }

    #[test]
    fn mode_parse_accepts_both_spellings() {
        assert_eq!(PersistenceMode::parse("on_change"), Some(PersistenceMode::OnChange));
        assert_eq!(PersistenceMode::parse("onStepChange"), Some(PersistenceMode::OnStepChange));
        assert_eq!(PersistenceMode::parse("manual"), Some(PersistenceMode::Manual));
        assert_eq!(PersistenceMode::parse("nope"), None);
    }
}
