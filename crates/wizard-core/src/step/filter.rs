//! Filtro de steps activos.
//!
//! La lista activa es derivada, nunca almacenada: se recalcula en cada
//! mutación de datos. El filtrado preserva siempre el orden de configuración
//! (sub-secuencia estable, jamás reordena).

use serde_json::Value;

use super::StepDefinition;

/// Subconjunto ordenado de steps cuyo predicado de visibilidad pasa contra
/// el snapshot actual. Puro, determinista, O(steps).
pub fn compute_active<'a>(steps: &'a [StepDefinition], data: &Value) -> Vec<&'a StepDefinition> {
    steps.iter().filter(|s| s.is_active(data)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Vec<StepDefinition> {
        vec![StepDefinition::new("a", "A"),
             StepDefinition::new("b", "B").with_condition(|d| d["flag"] == json!(true)),
             StepDefinition::new("c", "C")]
    }

    #[test]
    fn unconditional_steps_are_always_active() {
        let steps = fixture();
        let active = compute_active(&steps, &json!({"flag": false}));
        let ids: Vec<&str> = active.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn condition_flips_step_in_without_reordering() {
        let steps = fixture();
        let active = compute_active(&steps, &json!({"flag": true}));
        let ids: Vec<&str> = active.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let steps = fixture();
        let data = json!({"flag": true});
        let once: Vec<&str> = compute_active(&steps, &data).iter().map(|s| s.id()).collect();
        let twice: Vec<&str> = compute_active(&steps, &data).iter().map(|s| s.id()).collect();
        assert_eq!(once, twice);
    }
}
