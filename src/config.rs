//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`) con los defaults de wizard que el binario de demo usa al
//! construir el motor.

use once_cell::sync::Lazy;
use std::env;

use wizard_core::PersistenceMode;

/// Configuración global de la aplicación (extensible para más secciones).
pub struct AppConfig {
    /// Defaults del motor de wizard.
    pub wizard: WizardDefaults,
}

/// Defaults configurables por entorno.
pub struct WizardDefaults {
    /// Modo de persistencia por defecto (`WIZARD_PERSISTENCE_MODE`).
    pub persistence_mode: PersistenceMode,
    /// Gate de validación hacia adelante (`WIZARD_AUTO_VALIDATE`).
    pub auto_validate: bool,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    let persistence_mode = env::var("WIZARD_PERSISTENCE_MODE").ok()
        .and_then(|v| PersistenceMode::parse(&v))
        .unwrap_or_default();
    let auto_validate = env::var("WIZARD_AUTO_VALIDATE").ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(true);
    AppConfig {
        wizard: WizardDefaults { persistence_mode, auto_validate },
    }
});
