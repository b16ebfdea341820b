//! Superficie de configuración global consumida (no producida) por el motor.

use std::sync::Arc;

use crate::persist::{PersistenceMode, StorageAdapter};

/// Puerto de efectos colaterales post-transición.
///
/// La capa de presentación inyecta aquí lo que antes era un efecto implícito
/// dentro de la navegación (scroll-reset, foco, analytics). Recibe
/// `(step saliente, step entrante)` tras un `go_to_step` exitoso; el motor no
/// depende de ninguna API de plataforma.
pub type TransitionHook = Box<dyn Fn(Option<&str>, &str) + Send + Sync>;

/// Configuración de persistencia global (modo + adapter por defecto).
#[derive(Default)]
pub struct PersistenceConfig {
    pub mode: PersistenceMode,
    pub adapter: Option<Arc<dyn StorageAdapter>>,
}

/// Configuración global del wizard.
pub struct WizardConfig {
    /// Gate de validación al navegar hacia adelante (default: true).
    /// Resolución: override por step → global → default.
    pub auto_validate: bool,
    pub persistence: PersistenceConfig,
    pub on_transition: Option<TransitionHook>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self { auto_validate: true,
               persistence: PersistenceConfig::default(),
               on_transition: None }
    }
}
