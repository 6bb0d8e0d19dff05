use application::{AdminService, AppError, RefreshOutcome};
use domain::{NotificationKind, TableStatus};
use presentation::render;
use serde_json::json;
use std::time::Instant;
use tests::{failure, menu_item, order, order_line, table, Backend, TOAST_TTL};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn statistics() -> serde_json::Value {
    json!({
        "success": true,
        "estatisticas": {
            "total_mesas": 3,
            "mesas_livres": 1,
            "mesas_ocupadas": 1,
            "mesas_aguardando_pagamento": 1,
            "pedidos_hoje": 4
        }
    })
}

fn tables() -> serde_json::Value {
    let juice = menu_item(2, "Suco", 8.5, "bebida");
    let mut waiting = table(20, 2, "aguardando_pagamento", Some("Bruno"));
    waiting["pedido_ativo"] = order(8, 20, "fechado", vec![order_line(1, juice, 2)], 17.0);
    json!({
        "success": true,
        "mesas": [
            table(10, 1, "livre", None),
            waiting,
            table(30, 3, "aberta", None)
        ]
    })
}

async fn mount_dashboard(backend: &Backend) {
    Mock::given(method("GET"))
        .and(path("/api/admin/estatisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(statistics()))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/mesas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tables()))
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn dashboard_renders_statistics_and_cards() {
    colored::control::set_override(false);
    let backend = Backend::start().await;
    mount_dashboard(&backend).await;
    let service = AdminService::new(backend.client(), TOAST_TTL);

    assert_eq!(service.refresh().await.unwrap(), RefreshOutcome::Refreshed);
    let snapshot = service.snapshot().await.unwrap();
    let text = render::dashboard(&snapshot, snapshot.fetched_at);

    assert!(text.contains("Total: 3"));
    assert!(text.contains("Pedidos Hoje: 4"));
    assert!(text.contains("Mesa 1  [Livre]"));
    assert!(text.contains("Mesa 2  [Aguardando Pagamento]"));
    assert!(text.contains("Cliente: Bruno"));
    assert!(text.contains("R$ 17,00"));
    assert!(text.contains("Cliente: N/A"));

    let details = service.table(2).await.unwrap();
    assert_eq!(details.status, TableStatus::AwaitingPayment);
    assert!(render::table_details(&details, snapshot.fetched_at).contains("2x R$ 8,50"));
}

#[tokio::test]
async fn one_failing_read_fails_the_whole_refresh() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/estatisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(statistics()))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/mesas"))
        .respond_with(ResponseTemplate::new(500).set_body_json(failure("Erro interno")))
        .mount(&backend.server)
        .await;
    let service = AdminService::new(backend.client(), TOAST_TTL);

    assert_eq!(service.refresh_and_notify().await, RefreshOutcome::Failed);
    assert!(service.snapshot().await.is_none());
    let toasts = service.notifications(Instant::now()).await;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NotificationKind::Error);
    assert_eq!(toasts[0].message, "Erro interno");
}

#[tokio::test]
async fn payment_confirmation_refreshes_the_dashboard() {
    let backend = Backend::start().await;
    mount_dashboard(&backend).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/mesas/2/confirmar-pagamento"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Pagamento confirmado para Mesa 2",
            "mesa": table(20, 2, "livre", None)
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    let service = AdminService::new(backend.client(), TOAST_TTL);

    assert!(service.confirm_payment(2, true).await.unwrap());
    assert!(service.snapshot().await.is_some());
    let toasts = service.notifications(Instant::now()).await;
    assert_eq!(toasts[0].message, "Pagamento confirmado com sucesso!");
}

#[tokio::test]
async fn payment_rejection_is_shown_verbatim() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/mesas/4/confirmar-pagamento"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(failure("Mesa não está aguardando pagamento")),
        )
        .mount(&backend.server)
        .await;
    let service = AdminService::new(backend.client(), TOAST_TTL);

    let err = service.confirm_payment(4, true).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(err.user_message(), "Mesa não está aguardando pagamento");
}

#[tokio::test]
async fn unknown_table_is_not_found() {
    let backend = Backend::start().await;
    mount_dashboard(&backend).await;
    let service = AdminService::new(backend.client(), TOAST_TTL);
    service.refresh().await.unwrap();

    let err = service.table(99).await.unwrap_err();
    assert_eq!(err.user_message(), "Mesa não encontrada");
}
