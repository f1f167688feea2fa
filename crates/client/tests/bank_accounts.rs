//! Bank account endpoints against the stub backend.

mod common;

use tesoreria_client::DeleteOutcome;
use tesoreria_core::bank::BankAccountInput;
use tesoreria_shared::AppError;
use tesoreria_shared::types::{BancoCuentaId, BancoId, Currency, UsuarioId};

#[tokio::test]
async fn test_account_create_then_fetch_round_trip() {
    let (client, _backend) = common::client().await;

    let input = BankAccountInput::new(BancoId::new(3), "Cta Cte");
    let created = client.create_account(&input).await.expect("create account");
    let fetched = client.get_account(created.id).await.expect("fetch account");

    assert_eq!(fetched.banco_id, BancoId::new(3));
    assert_eq!(fetched.nombre_cuenta, "Cta Cte");
    assert_eq!(fetched.moneda, Currency::Ars);
    assert!(fetched.activa);
}

#[tokio::test]
async fn test_acting_user_is_injected() {
    let (client, backend) = common::client().await;

    let input = BankAccountInput::new(BancoId::new(3), "Caja de ahorro");
    let created = client.create_account(&input).await.expect("create account");
    client.get_account(created.id).await.expect("fetch account");

    let requests = backend.requests_to("/banco-cuentas");
    assert_eq!(requests[0].body["usuario_log_id"], common::USER);
    assert_eq!(requests[0].body["banco_id"], 3);
    assert_eq!(requests[0].body["moneda"], "ARS");
    let query = requests[1].query.clone().unwrap_or_default();
    assert!(query.contains(&format!("usuario_log_id={}", common::USER)));
}

#[tokio::test]
async fn test_requests_go_out_unmodified_without_session() {
    let (client, backend) = common::client().await;
    let client = client.with_usuario(None);

    let input = BankAccountInput::new(BancoId::new(3), "Cta Cte");
    client.create_account(&input).await.expect("create account");

    let requests = backend.requests_to("/banco-cuentas");
    assert!(requests[0].body.get("usuario_log_id").is_none());
}

#[tokio::test]
async fn test_non_positive_user_counts_as_no_session() {
    let (client, backend) = common::client().await;
    let client = client.with_usuario(Some(UsuarioId::new(0)));
    assert!(client.usuario_id().is_none());

    let input = BankAccountInput::new(BancoId::new(3), "Cta Cte");
    let created = client.create_account(&input).await.expect("create account");
    client.get_account(created.id).await.expect("fetch account");

    let requests = backend.requests_to("/banco-cuentas");
    assert!(requests[0].body.get("usuario_log_id").is_none());
    let query = requests[1].query.clone().unwrap_or_default();
    assert!(!query.contains("usuario_log_id"));
}

#[tokio::test]
async fn test_invalid_account_is_not_sent() {
    let (client, backend) = common::client().await;

    let input = BankAccountInput::new(BancoId::new(3), "   ");
    let err = client.create_account(&input).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(backend.requests_to("/banco-cuentas").is_empty());
}

#[tokio::test]
async fn test_account_list_is_cached_until_a_mutation() {
    let (client, backend) = common::client().await;

    client.list_accounts(None).await.expect("first list");
    client.list_accounts(None).await.expect("cached list");
    assert_eq!(backend.state().account_list_hits, 1);

    let input = BankAccountInput::new(BancoId::new(3), "Cta Cte");
    client.create_account(&input).await.expect("create account");

    let accounts = client.list_accounts(None).await.expect("refreshed list");
    assert_eq!(backend.state().account_list_hits, 2);
    assert_eq!(accounts.len(), 1);

    client
        .list_accounts(Some(BancoId::new(3)))
        .await
        .expect("filtered list");
    assert_eq!(backend.state().account_list_hits, 3);
}

#[tokio::test]
async fn test_missing_account_maps_to_not_found() {
    let (client, _backend) = common::client().await;

    let err = client.get_account(BancoCuentaId::new(404)).await.unwrap_err();

    assert_eq!(err.error_code(), "NOT_FOUND");
    assert_eq!(err.to_string(), "Not found: Cuenta inexistente");
}

#[tokio::test]
async fn test_delete_with_dependents_falls_back_to_deactivation() {
    let (client, backend) = common::client().await;
    let input = BankAccountInput::new(BancoId::new(3), "Cta Cte");
    let created = client.create_account(&input).await.expect("create account");

    let outcome = client
        .delete_account(created.id, |err| err.is_conflict_code("CUENTA_CON_MOVIMIENTOS"))
        .await
        .expect("deactivated");
    assert_eq!(outcome, DeleteOutcome::Deactivated);

    let deletes: Vec<_> = backend
        .requests_to(&format!("/banco-cuentas/{}", created.id))
        .into_iter()
        .filter_map(|r| r.query)
        .collect();
    assert!(!deletes[0].contains("force"));
    assert!(deletes[1].contains("force=true"));
    assert!(!client.get_account(created.id).await.expect("fetch").activa);
}

#[tokio::test]
async fn test_declined_delete_surfaces_the_conflict() {
    let (client, _backend) = common::client().await;
    let input = BankAccountInput::new(BancoId::new(3), "Cta Cte");
    let created = client.create_account(&input).await.expect("create account");

    let err = client.delete_account(created.id, |_| false).await.unwrap_err();

    assert!(err.is_conflict_code("CUENTA_CON_MOVIMIENTOS"));
}
