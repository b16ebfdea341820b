//! Implementación del `WizardEngine`.
//!
//! El motor es el único escritor del estado canónico (datos, step actual,
//! conjuntos visited/completed/errored, flag de carga). Los lectores sólo ven
//! snapshots inmutables producidos por copy-on-write, así que no necesitan
//! sincronización externa. La única operación que suspende es la validación;
//! durante una transición en vuelo `transition_pending` hace que cualquier
//! segunda navegación devuelva `false` sin tocar estado.

use indexmap::IndexSet;
use serde_json::Value;

use crate::config::{TransitionHook, WizardConfig};
use crate::engine::WizardBuilder;
use crate::errors::WizardError;
use crate::merge::merge_json;
use crate::path::{get_path, get_path_or, set_path};
use crate::persist::{PersistenceCoordinator, SaveTrigger, SessionMeta};
use crate::step::{compute_active, StepDefinition};
use crate::validate::{self, ErrorMap, ValidationOutcome, ValidationReport};

fn find_step<'a>(steps: &'a [StepDefinition], step_id: &str) -> Option<&'a StepDefinition> {
    steps.iter().find(|s| s.id() == step_id)
}

pub struct WizardEngine {
    steps: Vec<StepDefinition>,
    auto_validate: bool,
    persistence: PersistenceCoordinator,
    on_transition: Option<TransitionHook>,

    data: Value,
    current_step_id: Option<String>,
    visited_steps: IndexSet<String>,
    completed_steps: IndexSet<String>,
    error_steps: IndexSet<String>,
    errors: ErrorMap,
    is_loading: bool,
    transition_pending: bool,
}

impl WizardEngine {
    /// Crea un nuevo builder para configurar el motor.
    #[inline]
    pub fn builder() -> WizardBuilder {
        WizardBuilder::new()
    }

    pub(crate) fn from_parts(steps: Vec<StepDefinition>, config: WizardConfig, initial_data: Value) -> Self {
        let WizardConfig { auto_validate, persistence, on_transition } = config;
        Self { steps,
               auto_validate,
               persistence: PersistenceCoordinator::new(persistence.mode, persistence.adapter),
               on_transition,
               data: initial_data,
               current_step_id: None,
               visited_steps: IndexSet::new(),
               completed_steps: IndexSet::new(),
               error_steps: IndexSet::new(),
               errors: ErrorMap::new(),
               is_loading: false,
               transition_pending: false }
    }

    // ---- hidratación ----

    /// Hidrata el estado desde el adapter: los snapshots persistidos se
    /// superponen al initial data (lo persistido gana en claves solapadas) y
    /// la metadata de sesión restaura step actual + visited + completed. Sin
    /// metadata, el step actual es el primero de la lista activa.
    pub async fn initialize(&mut self) {
        self.is_loading = true;
        let seed = std::mem::take(&mut self.data);
        let (data, meta) = self.persistence.hydrate(&self.steps, seed).await;
        self.data = data;

        if let Some(meta) = meta {
            self.visited_steps = meta.visited.into_iter().collect();
            self.completed_steps = meta.completed.into_iter().collect();
            let restored = meta.current_step_id;
            if self.active_step_ids().iter().any(|id| *id == restored) {
                self.current_step_id = Some(restored);
            }
        }
        if self.current_step_id.is_none() {
            self.current_step_id = self.active_steps().first().map(|s| s.id().to_string());
        }
        self.is_loading = false;
    }

    // ---- lectura ----

    /// Snapshot completo de datos.
    pub fn wizard_data(&self) -> &Value {
        &self.data
    }

    /// Lectura por ruta (`None` si algún segmento falta o es null).
    pub fn get_data(&self, path: &str) -> Option<&Value> {
        get_path(&self.data, path)
    }

    /// Lectura por ruta con default.
    pub fn get_data_or(&self, path: &str, default: Value) -> Value {
        get_path_or(&self.data, path, default)
    }

    /// Lista activa derivada (recalculada en cada llamada, nunca cacheada).
    pub fn active_steps(&self) -> Vec<&StepDefinition> {
        compute_active(&self.steps, &self.data)
    }

    fn active_step_ids(&self) -> Vec<String> {
        self.active_steps().iter().map(|s| s.id().to_string()).collect()
    }

    pub fn current_step(&self) -> Option<&StepDefinition> {
        let id = self.current_step_id.as_deref()?;
        find_step(&self.steps, id)
    }

    pub fn current_step_id(&self) -> Option<&str> {
        self.current_step_id.as_deref()
    }

    /// Índice del step actual dentro de la lista activa.
    pub fn current_step_index(&self) -> Option<usize> {
        let id = self.current_step_id.as_deref()?;
        self.active_steps().iter().position(|s| s.id() == id)
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step_index() == Some(0)
    }

    pub fn is_last_step(&self) -> bool {
        match self.current_step_index() {
            Some(i) => i + 1 == self.active_steps().len(),
            None => false,
        }
    }

    pub fn all_errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn visited_steps(&self) -> &IndexSet<String> {
        &self.visited_steps
    }

    pub fn completed_steps(&self) -> &IndexSet<String> {
        &self.completed_steps
    }

    pub fn error_steps(&self) -> &IndexSet<String> {
        &self.error_steps
    }

    /// `true` durante la hidratación o con una validación en vuelo.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    // ---- mutación de datos ----

    /// Merge shallow de primer nivel de `partial` sobre los datos (reemplazo
    /// en bloque de las claves top-level presentes en `partial`). En modo
    /// `OnChange` persiste SÓLO el parcial bajo `step_id`, no el snapshot
    /// resultante: payloads pequeños por escritura.
    pub async fn set_step_data(&mut self, step_id: &str, partial: Value) {
        self.data = merge_json(&self.data, &partial);
        if let Some(step) = find_step(&self.steps, step_id) {
            self.persistence.maybe_save(SaveTrigger::OnChange, step, &partial).await;
        }
    }

    /// Escritura copy-on-write en una ruta. En modo `OnChange` persiste el
    /// objeto completo resultante bajo el step actual.
    pub async fn set_data(&mut self, path: &str, value: Value) {
        self.data = set_path(&self.data, path, value);
        self.persist_on_change_full().await;
    }

    /// Merge shallow de `partial` sobre los datos, persistiendo el snapshot
    /// completo bajo el step actual si el modo es `OnChange`.
    pub async fn update_data(&mut self, partial: Value) {
        self.data = merge_json(&self.data, &partial);
        self.persist_on_change_full().await;
    }

    async fn persist_on_change_full(&self) {
        let Some(current) = self.current_step_id.as_deref() else { return };
        if let Some(step) = find_step(&self.steps, current) {
            self.persistence.maybe_save(SaveTrigger::OnChange, step, &self.data).await;
        }
    }

    // ---- navegación ----

    /// Transición al step `target_id`.
    ///
    /// Devuelve `Ok(false)` (no-op, sin cambio parcial de estado) si el
    /// target no está en la lista activa, si hay otra transición en vuelo, o
    /// si el gate de validación del step saliente falla. Sólo se valida al
    /// avanzar (índice activo mayor); hacia atrás nunca hay gate.
    pub async fn go_to_step(&mut self, target_id: &str) -> Result<bool, WizardError> {
        if self.transition_pending {
            return Ok(false);
        }
        self.transition_pending = true;
        let result = self.transition_to(target_id).await;
        self.transition_pending = false;
        result
    }

    async fn transition_to(&mut self, target_id: &str) -> Result<bool, WizardError> {
        let active_ids = self.active_step_ids();
        let Some(target_index) = active_ids.iter().position(|id| id == target_id) else {
            return Ok(false);
        };

        let previous_id = self.current_step_id.clone();
        let current_index = previous_id.as_deref()
                                       .and_then(|id| active_ids.iter().position(|x| x == id));

        if let (Some(departing), Some(ci)) = (previous_id.clone(), current_index) {
            if target_index > ci && self.effective_auto_validate(&departing) {
                self.is_loading = true;
                let gate = self.run_validation(&departing).await;
                self.is_loading = false;
                match gate {
                    Ok(true) => {}
                    // bloqueo: el step actual queda con su ErrorMap poblado
                    Ok(false) => return Ok(false),
                    Err(e) => return Err(e),
                }
            }
        }

        // persistencia del step saliente (modo on_step_change) + metadata
        if let Some(departing) = previous_id.as_deref() {
            if let Some(step) = find_step(&self.steps, departing) {
                self.persistence.maybe_save(SaveTrigger::OnStepChange, step, &self.data).await;
            }
        }

        self.current_step_id = Some(target_id.to_string());
        if let Some(prev) = previous_id.clone() {
            self.visited_steps.insert(prev);
        }
        self.persist_meta().await;

        if let Some(hook) = &self.on_transition {
            hook(previous_id.as_deref(), target_id);
        }
        Ok(true)
    }

    /// Avanza al siguiente step activo. No-op en el último. Al avanzar con
    /// éxito, el step abandonado entra en `completed` y la metadata se
    /// re-persiste con el conjunto actualizado.
    pub async fn go_to_next_step(&mut self) -> Result<bool, WizardError> {
        let active_ids = self.active_step_ids();
        let Some(current) = self.current_step_id.clone() else { return Ok(false) };
        let Some(index) = active_ids.iter().position(|id| *id == current) else { return Ok(false) };
        if index + 1 >= active_ids.len() {
            return Ok(false);
        }
        let target = active_ids[index + 1].clone();
        let moved = self.go_to_step(&target).await?;
        if moved {
            self.completed_steps.insert(current);
            self.persist_meta().await;
        }
        Ok(moved)
    }

    /// Retrocede al step activo anterior. No-op en el primero; hacia atrás
    /// no se valida nunca.
    pub async fn go_to_prev_step(&mut self) -> Result<bool, WizardError> {
        let active_ids = self.active_step_ids();
        let Some(current) = self.current_step_id.as_deref() else { return Ok(false) };
        let Some(index) = active_ids.iter().position(|id| id == current) else { return Ok(false) };
        if index == 0 {
            return Ok(false);
        }
        let target = active_ids[index - 1].clone();
        self.go_to_step(&target).await
    }

    fn effective_auto_validate(&self, step_id: &str) -> bool {
        find_step(&self.steps, step_id).and_then(|s| s.auto_validate_override())
                                       .unwrap_or(self.auto_validate)
    }

    // ---- validación ----

    /// Valida un step concreto y actualiza `error_steps`/`errors`.
    pub async fn validate_step(&mut self, step_id: &str) -> Result<bool, WizardError> {
        self.is_loading = true;
        let result = self.run_validation(step_id).await;
        self.is_loading = false;
        result
    }

    /// Valida TODOS los steps activos en orden, sin cortocircuito, y
    /// devuelve el AND lógico más el mapa de errores completo.
    pub async fn validate_all(&mut self) -> Result<ValidationReport, WizardError> {
        let active_ids = self.active_step_ids();
        self.is_loading = true;
        let mut all_valid = true;
        for id in &active_ids {
            match self.run_validation(id).await {
                Ok(valid) => all_valid &= valid,
                Err(e) => {
                    self.is_loading = false;
                    return Err(e);
                }
            }
        }
        self.is_loading = false;
        Ok(ValidationReport { is_valid: all_valid, errors: self.errors.clone() })
    }

    async fn run_validation(&mut self, step_id: &str) -> Result<bool, WizardError> {
        let outcome = match find_step(&self.steps, step_id) {
            Some(step) => validate::validate_step(step, &self.data).await?,
            // step sin definición: trivialmente válido
            None => ValidationOutcome::valid(),
        };
        let is_valid = outcome.is_valid;
        self.apply_outcome(step_id, outcome);
        Ok(is_valid)
    }

    /// Reemplazo en bloque por step: en fallo entra al set de error y su
    /// entrada del mapa se sustituye; en éxito ambos se limpian.
    fn apply_outcome(&mut self, step_id: &str, outcome: ValidationOutcome) {
        if outcome.is_valid {
            self.error_steps.shift_remove(step_id);
            self.errors.remove(step_id);
        } else {
            self.error_steps.insert(step_id.to_string());
            self.errors.insert(step_id.to_string(), outcome.errors);
        }
    }

    // ---- persistencia explícita ----

    /// Guardado forzado (trigger manual): siempre pasa, sin importar el modo
    /// configurado. Persiste el snapshot completo bajo el step actual.
    pub async fn save(&mut self) {
        let Some(current) = self.current_step_id.clone() else { return };
        if let Some(step) = find_step(&self.steps, &current) {
            self.persistence.maybe_save(SaveTrigger::Manual, step, &self.data).await;
        }
        self.persist_meta().await;
    }

    /// Borra el almacenamiento durable (adapter global + overrides por
    /// step). El estado en memoria no se resetea.
    pub async fn clear_storage(&self) {
        self.persistence.clear_all(&self.steps).await;
    }

    async fn persist_meta(&self) {
        let Some(current) = &self.current_step_id else { return };
        let meta = SessionMeta { current_step_id: current.clone(),
                                 visited: self.visited_steps.iter().cloned().collect(),
                                 completed: self.completed_steps.iter().cloned().collect() };
        self.persistence.save_meta(&meta).await;
    }
}
