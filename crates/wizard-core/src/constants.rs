//! Constantes compartidas del core.

/// Clave reservada bajo la cual se persiste la metadata de sesión
/// (`SessionMeta`). El prefijo de doble guión bajo evita colisiones con
/// ids de steps configurados por el caller.
pub const META_KEY: &str = "__wizard_meta__";
