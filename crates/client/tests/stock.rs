//! Stock movement submission against the stub backend.

mod common;

use tesoreria_core::stock::StockMovementDraft;
use tesoreria_shared::AppError;

#[tokio::test]
async fn test_stock_sign_violation_is_not_sent() {
    let (client, backend) = common::client().await;
    let draft = StockMovementDraft {
        producto_id: Some(10),
        local_id: Some(1),
        tipo: "SALE".into(),
        delta: 4,
        ref_tabla: Some("ventas".into()),
        ref_id: Some(77),
        ..StockMovementDraft::default()
    };

    let err = client.create_stock_movement(&draft).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(backend.requests_to("/stock-movimientos").is_empty());
}

#[tokio::test]
async fn test_valid_stock_movement_is_sent_with_user() {
    let (client, backend) = common::client().await;
    let draft = StockMovementDraft {
        producto_id: Some(10),
        local_id: Some(1),
        tipo: "ADJUSTMENT".into(),
        delta: -2,
        ref_tabla: Some("ventas".into()),
        notas: Some("x".repeat(400)),
        ..StockMovementDraft::default()
    };

    let created = client.create_stock_movement(&draft).await.expect("created");
    assert_eq!(created.delta, -2);

    let body = &backend.requests_to("/stock-movimientos")[0].body;
    assert_eq!(body["tipo"], "ADJUSTMENT");
    assert_eq!(body["moneda"], "ARS");
    assert_eq!(body["usuario_log_id"], common::USER);
    assert!(body.get("ref_tabla").is_none());
    assert_eq!(body["notas"].as_str().map(|n| n.chars().count()), Some(300));
}
