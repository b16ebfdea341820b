//! wizard-flow: fachada del workspace.
//!
//! Re-exporta la superficie pública de los crates miembro para que los
//! consumidores dependan de un único crate:
//! - `wizard-core`: el motor de estado (steps, navegación, validación,
//!   persistencia, acceso por rutas).
//! - `wizard-adapters`: backends concretos (memoria, archivo JSON) y
//!   validators de ejemplo.

pub mod config;

pub use wizard_adapters::{FnValidator, JsonFileStorageAdapter, MemoryStorageAdapter,
                          RequiredFieldsValidator};
pub use wizard_core::{get_path, get_path_or, merge_json, parse_path, set_path, ErrorMap,
                      PathSegment, PersistenceConfig, PersistenceMode, SessionMeta, StepCondition,
                      StepDefinition, StepValidator, StorageAdapter, ValidationOutcome,
                      ValidationReport, WizardBuilder, WizardConfig, WizardEngine, WizardError};
