//! wizard-adapters: implementaciones concretas de las capabilities del core.
//!
//! Este crate provee:
//! - Adapters de almacenamiento: `MemoryStorageAdapter` (tests/demos) y
//!   `JsonFileStorageAdapter` (un documento JSON por sesión en disco).
//! - Validators: `RequiredFieldsValidator` (rutas requeridas declarativas) y
//!   `FnValidator` (closure síncrona detrás del trait async).
//!
//! Nota: el core sólo conoce `StorageAdapter` y `StepValidator`; aquí no hay
//! semántica de wizard, sólo backends.

pub mod file;
pub mod memory;
pub mod validators;

pub use file::JsonFileStorageAdapter;
pub use memory::MemoryStorageAdapter;
pub use validators::{FnValidator, RequiredFieldsValidator};
