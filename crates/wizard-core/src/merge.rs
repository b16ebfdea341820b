//! Fusión shallow de snapshots JSON.
//!
//! El merge es de primer nivel únicamente: las claves top-level de `b`
//! reemplazan en bloque a las de `a` (last-write-wins, sin deep-merge). Es la
//! semántica que usan tanto `set_step_data`/`update_data` como la hidratación
//! de datos persistidos.

use serde_json::Value;

/// Merge shallow: keys from `b` override keys from `a` when both are objects.
/// Si alguno de los dos no es objeto, `b` tiene precedencia.
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (k, v) in mb.iter() {
                out.insert(k.clone(), v.clone());
            }
            Value::Object(out)
        }
        // Non-objects: override
        (_, other) => other.clone(),
    }
}
