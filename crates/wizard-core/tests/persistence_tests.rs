//! Escenarios de persistencia: modos de guardado, layout persistido
//! (registro por step + metadata de sesión) e hidratación.

use std::sync::Arc;

use serde_json::json;
use wizard_adapters::MemoryStorageAdapter;
use wizard_core::constants::META_KEY;
use wizard_core::{PersistenceMode, SessionMeta, StepDefinition, StorageAdapter, WizardEngine};

fn two_step_wizard(mode: PersistenceMode, adapter: Arc<MemoryStorageAdapter>) -> WizardEngine {
    WizardEngine::builder().persistence_mode(mode)
                           .persistence_adapter(adapter)
                           .add_step(StepDefinition::new("a", "A"))
                           .add_step(StepDefinition::new("b", "B"))
                           .build()
}

#[tokio::test]
async fn on_step_change_persists_departing_step_and_meta() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    let mut wizard = two_step_wizard(PersistenceMode::OnStepChange, adapter.clone());
    wizard.initialize().await;

    wizard.set_data("name", json!("Ada")).await;
    // on_change no aplica en este modo: nada guardado todavía
    assert!(adapter.is_empty());

    let moved = wizard.go_to_next_step().await.unwrap();
    assert!(moved);

    // registro del step saliente con sus datos pre-transición
    assert_eq!(adapter.get_step("a").await, Some(json!({"name": "Ada"})));

    // metadata bajo la clave reservada, con el completed actualizado
    let raw_meta = adapter.get_step(META_KEY).await.expect("meta record must exist");
    let meta: SessionMeta = serde_json::from_value(raw_meta).unwrap();
    assert_eq!(meta.current_step_id, "b");
    assert_eq!(meta.visited, vec!["a".to_string()]);
    assert_eq!(meta.completed, vec!["a".to_string()]);
}

#[tokio::test]
async fn on_change_set_step_data_persists_only_the_partial() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    let mut wizard = two_step_wizard(PersistenceMode::OnChange, adapter.clone());
    wizard.initialize().await;

    wizard.update_data(json!({"existing": true})).await;
    wizard.set_step_data("a", json!({"name": "Ada"})).await;

    // sólo el parcial, no el snapshot resultante (payloads pequeños)
    assert_eq!(adapter.get_step("a").await, Some(json!({"name": "Ada"})));
}

#[tokio::test]
async fn on_change_set_data_persists_full_snapshot_under_current_step() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    let mut wizard = two_step_wizard(PersistenceMode::OnChange, adapter.clone());
    wizard.initialize().await;

    wizard.set_data("user.name", json!("Ada")).await;
    wizard.set_data("user.age", json!(36)).await;

    assert_eq!(adapter.get_step("a").await,
               Some(json!({"user": {"name": "Ada", "age": 36}})));
}

#[tokio::test]
async fn manual_mode_only_saves_on_explicit_save() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    let mut wizard = two_step_wizard(PersistenceMode::Manual, adapter.clone());
    wizard.initialize().await;

    wizard.set_data("x", json!(1)).await;
    wizard.go_to_next_step().await.unwrap();
    assert!(adapter.is_empty(), "automatic triggers are no-ops in manual mode");

    wizard.save().await;
    assert_eq!(adapter.get_step("b").await, Some(json!({"x": 1})));
    // la metadata de sesión sólo se persiste cuando el modo no es manual
    assert_eq!(adapter.get_step(META_KEY).await, None);
}

#[tokio::test]
async fn hydration_restores_data_and_session_meta() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    {
        let mut first = two_step_wizard(PersistenceMode::OnStepChange, adapter.clone());
        first.initialize().await;
        first.set_data("name", json!("persisted")).await;
        first.go_to_next_step().await.unwrap();
    }

    // sesión nueva: initial data + lo persistido (lo persistido gana)
    let mut second = WizardEngine::builder()
        .persistence_mode(PersistenceMode::OnStepChange)
        .persistence_adapter(adapter.clone())
        .add_step(StepDefinition::new("a", "A"))
        .add_step(StepDefinition::new("b", "B"))
        .initial_data(json!({"name": "initial", "untouched": 1}))
        .build();
    second.initialize().await;

    assert_eq!(second.get_data("name"), Some(&json!("persisted")));
    assert_eq!(second.get_data("untouched"), Some(&json!(1)));
    assert_eq!(second.current_step_id(), Some("b"), "session resumes at the persisted step");
    assert!(second.visited_steps().contains("a"));
    assert!(second.completed_steps().contains("a"));
}

#[tokio::test]
async fn later_steps_win_on_hydration_collision() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    adapter.save_step("a", &json!({"shared": "from-a", "only_a": 1})).await;
    adapter.save_step("b", &json!({"shared": "from-b"})).await;

    let mut wizard = two_step_wizard(PersistenceMode::OnStepChange, adapter);
    wizard.initialize().await;

    assert_eq!(wizard.get_data("shared"), Some(&json!("from-b")));
    assert_eq!(wizard.get_data("only_a"), Some(&json!(1)));
}

#[tokio::test]
async fn clear_storage_leaves_nothing_to_hydrate() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    {
        let mut wizard = two_step_wizard(PersistenceMode::OnStepChange, adapter.clone());
        wizard.initialize().await;
        wizard.set_data("name", json!("Ada")).await;
        wizard.go_to_next_step().await.unwrap();
        assert!(!adapter.is_empty());

        wizard.clear_storage().await;
        // el estado en memoria no se resetea
        assert_eq!(wizard.get_data("name"), Some(&json!("Ada")));
    }
    assert!(adapter.is_empty());

    let mut fresh = two_step_wizard(PersistenceMode::OnStepChange, adapter);
    fresh.initialize().await;
    assert_eq!(fresh.wizard_data(), &json!({}));
    assert_eq!(fresh.current_step_id(), Some("a"));
}

#[tokio::test]
async fn per_step_adapter_override_is_honored() {
    let global = Arc::new(MemoryStorageAdapter::new());
    let dedicated = Arc::new(MemoryStorageAdapter::new());

    let mut wizard = WizardEngine::builder()
        .persistence_mode(PersistenceMode::OnStepChange)
        .persistence_adapter(global.clone())
        .add_step(StepDefinition::new("a", "A").with_persistence_adapter(dedicated.clone()))
        .add_step(StepDefinition::new("b", "B"))
        .build();
    wizard.initialize().await;

    wizard.set_data("k", json!("v")).await;
    wizard.go_to_next_step().await.unwrap();

    // datos del step "a" en su adapter dedicado; metadata en el global
    assert_eq!(dedicated.get_step("a").await, Some(json!({"k": "v"})));
    assert_eq!(global.get_step("a").await, None);
    assert!(global.get_step(META_KEY).await.is_some());

    // clear_storage barre global + overrides
    wizard.clear_storage().await;
    assert!(global.is_empty());
    assert!(dedicated.is_empty());
}

#[tokio::test]
async fn per_step_mode_override_changes_when_a_step_saves() {
    let adapter = Arc::new(MemoryStorageAdapter::new());
    let mut wizard = WizardEngine::builder()
        .persistence_mode(PersistenceMode::OnStepChange)
        .persistence_adapter(adapter.clone())
        .add_step(StepDefinition::new("a", "A").with_persistence_mode(PersistenceMode::Manual))
        .add_step(StepDefinition::new("b", "B"))
        .build();
    wizard.initialize().await;

    wizard.set_data("x", json!(1)).await;
    wizard.go_to_next_step().await.unwrap();

    // el override manual de "a" suprime su guardado on_step_change
    assert_eq!(adapter.get_step("a").await, None);
    // la metadata sigue al modo global (no manual)
    assert!(adapter.get_step(META_KEY).await.is_some());
}
