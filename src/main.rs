//! Binario de demo: un wizard de alta de cuenta con un step condicional y
//! persistencia en memoria, recorrido de punta a punta por consola.

use std::sync::Arc;

use serde_json::json;
use wizard_flow::config::CONFIG;
use wizard_flow::{get_path, MemoryStorageAdapter, RequiredFieldsValidator, StepDefinition,
                  WizardEngine, WizardError};

fn print_state(wizard: &WizardEngine) {
    let active: Vec<&str> = wizard.active_steps().iter().map(|s| s.id()).collect();
    println!("  step actual: {:?} | activos: {:?} | completados: {:?}",
             wizard.current_step_id(),
             active,
             wizard.completed_steps());
}

#[tokio::main]
async fn main() -> Result<(), WizardError> {
    let adapter = Arc::new(MemoryStorageAdapter::new());

    let mut wizard = WizardEngine::builder()
        .persistence_mode(CONFIG.wizard.persistence_mode)
        .auto_validate(CONFIG.wizard.auto_validate)
        .persistence_adapter(adapter.clone())
        .add_step(StepDefinition::new("account", "Cuenta")
            .with_validator(Arc::new(RequiredFieldsValidator::new(["account.email"]))))
        .add_step(StepDefinition::new("company", "Empresa")
            .with_condition(|d| get_path(d, "account.business").and_then(|v| v.as_bool())
                                                              .unwrap_or(false)))
        .add_step(StepDefinition::new("confirm", "Confirmación"))
        .initial_data(json!({"account": {}}))
        .build();

    wizard.initialize().await;
    println!("tras inicializar:");
    print_state(&wizard);

    // avanzar sin email: el gate de validación bloquea
    let moved = wizard.go_to_next_step().await?;
    println!("avance sin email -> {moved}, errores: {:?}", wizard.all_errors());

    wizard.set_data("account.email", json!("ada@example.com")).await;
    wizard.set_data("account.business", json!(true)).await;
    println!("tras completar la cuenta (el step condicional aparece):");
    print_state(&wizard);

    while wizard.go_to_next_step().await? {
        print_state(&wizard);
    }

    println!("registros persistidos: {:?}", adapter.snapshot().keys().collect::<Vec<_>>());
    Ok(())
}
