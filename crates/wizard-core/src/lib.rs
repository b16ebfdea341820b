//! wizard-core: motor de estado para asistentes multi-paso.
//!
//! Posee el objeto de datos unificado compartido por una secuencia ordenada
//! y filtrada dinámicamente de steps, registra visitas/completados/errores
//! por step y coordina cuándo se validan y persisten los datos. El render de
//! UI, los motores de validación y los backends de almacenamiento son
//! colaboradores externos enchufados por traits.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod merge;
pub mod path;
pub mod persist;
pub mod step;
pub mod validate;

pub use config::{PersistenceConfig, TransitionHook, WizardConfig};
pub use engine::{WizardBuilder, WizardEngine};
pub use errors::WizardError;
pub use merge::merge_json;
pub use path::{get_path, get_path_or, parse_path, set_path, PathSegment};
pub use persist::{PersistenceCoordinator, PersistenceMode, SaveTrigger, SessionMeta, StorageAdapter};
pub use step::{compute_active, StepCondition, StepDefinition};
pub use validate::{ErrorMap, StepValidator, ValidationOutcome, ValidationReport};
