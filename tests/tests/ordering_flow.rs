use application::{Action, AppError, OrderingService};
use domain::{NotificationKind, Screen};
use presentation::render;
use rust_decimal::Decimal;
use serde_json::json;
use tests::{
    failure, menu, menu_item, order, order_line, session_started, table, Backend, TOAST_TTL,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn seated(backend: &Backend) -> OrderingService<infrastructure::RestaurantClient> {
    Mock::given(method("POST"))
        .and(path("/api/mesas/3/iniciar"))
        .and(body_json(json!({"cliente_nome": "Ana"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_started(30, 3, 7)))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cardapio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu()))
        .mount(&backend.server)
        .await;

    let mut service = OrderingService::new(backend.client(), TOAST_TTL);
    service
        .dispatch(Action::StartSession {
            customer_name: "  Ana ".into(),
            table_number: "3".into(),
        })
        .await
        .unwrap();
    service
}

#[tokio::test]
async fn full_visit_from_welcome_to_closed_table() {
    colored::control::set_override(false);
    let backend = Backend::start().await;
    let mut service = seated(&backend).await;

    assert_eq!(service.state().screen, Screen::Menu);
    let categories: Vec<&str> = service.state().catalog.categories().collect();
    assert_eq!(categories, ["bebida", "entrada"]);

    service.dispatch(Action::AddToCart(1)).await.unwrap();
    service.dispatch(Action::AddToCart(1)).await.unwrap();
    service.dispatch(Action::AddToCart(2)).await.unwrap();
    assert_eq!(service.state().cart.totals().value, Decimal::new(1850, 2));

    let water = menu_item(1, "Água", 5.0, "bebida");
    let juice = menu_item(2, "Suco", 8.5, "bebida");
    Mock::given(method("POST"))
        .and(path("/api/pedidos/7/adicionar-item"))
        .and(body_json(json!({"item_cardapio_id": 1, "quantidade": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "pedido": order(7, 30, "aberto", vec![order_line(1, water.clone(), 2)], 10.0)
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos/7/adicionar-item"))
        .and(body_json(json!({"item_cardapio_id": 2, "quantidade": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "pedido": order(
                7,
                30,
                "aberto",
                vec![order_line(1, water.clone(), 2), order_line(2, juice.clone(), 1)],
                18.5
            )
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    service.dispatch(Action::SubmitOrder).await.unwrap();
    assert_eq!(service.state().screen, Screen::OrderConfirmed);
    assert!(service.state().cart.is_empty());

    service.dispatch(Action::AddMoreItems).await.unwrap();
    assert_eq!(service.state().screen, Screen::Menu);

    Mock::given(method("POST"))
        .and(path("/api/pedidos/7/fechar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "pedido": order(
                7,
                30,
                "fechado",
                vec![order_line(1, water, 2), order_line(2, juice, 1)],
                18.5
            ),
            "mesa": table(30, 3, "aguardando_pagamento", Some("Ana"))
        })))
        .mount(&backend.server)
        .await;

    service.dispatch(Action::RequestBill).await.unwrap();
    assert_eq!(service.state().screen, Screen::BillRequested);
    let session = service.state().session.as_ref().unwrap();
    let bill = render::bill(session.order.as_ref());
    assert!(bill.contains("2x Água  R$ 10,00"));
    assert!(bill.contains("1x Suco  R$ 8,50"));
    assert!(bill.contains("Total: R$ 18,50"));

    Mock::given(method("POST"))
        .and(path("/api/mesas/30/fechar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table(30, 3, "livre", None)))
        .mount(&backend.server)
        .await;

    service
        .dispatch(Action::CloseTable { confirmed: true })
        .await
        .unwrap();
    assert_eq!(service.state().screen, Screen::Welcome);
    assert!(service.state().session.is_none());
    assert_eq!(
        service.notifications().latest().map(|n| n.message.as_str()),
        Some("Mesa fechada com sucesso! Obrigado pela visita!")
    );
}

#[tokio::test]
async fn rejected_line_stops_submission_and_keeps_cart() {
    let backend = Backend::start().await;
    let mut service = seated(&backend).await;

    service.dispatch(Action::AddToCart(1)).await.unwrap();
    service.dispatch(Action::AddToCart(2)).await.unwrap();
    service.dispatch(Action::AddToCart(3)).await.unwrap();

    Mock::given(method("POST"))
        .and(path("/api/pedidos/7/adicionar-item"))
        .and(body_json(json!({"item_cardapio_id": 1, "quantidade": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "pedido": order(7, 30, "aberto", vec![], 5.0)
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos/7/adicionar-item"))
        .and(body_json(json!({"item_cardapio_id": 2, "quantidade": 1})))
        .respond_with(ResponseTemplate::new(400).set_body_json(failure("Item não disponível")))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos/7/adicionar-item"))
        .and(body_json(json!({"item_cardapio_id": 3, "quantidade": 1})))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let err = service.dispatch(Action::SubmitOrder).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Submission {
            accepted: 1,
            total: 3,
            ..
        }
    ));
    assert_eq!(service.state().cart.lines().len(), 3);
    assert_eq!(service.state().screen, Screen::Menu);

    let latest = service.notifications().latest().unwrap();
    assert_eq!(latest.kind, NotificationKind::Error);
    assert_eq!(latest.message, "Item não disponível");
}

#[tokio::test]
async fn failed_table_close_leaves_everything_in_place() {
    let backend = Backend::start().await;
    let mut service = seated(&backend).await;
    service.dispatch(Action::AddToCart(1)).await.unwrap();

    Mock::given(method("POST"))
        .and(path("/api/mesas/30/fechar"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Mesa com conta aberta"})))
        .mount(&backend.server)
        .await;

    let before = service.state().clone();
    assert!(service
        .dispatch(Action::CloseTable { confirmed: true })
        .await
        .is_err());
    assert_eq!(service.state(), &before);
    assert_eq!(
        service.notifications().latest().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
}

#[tokio::test]
async fn missing_fields_never_reach_the_backend() {
    let backend = Backend::start().await;
    let mut service = OrderingService::new(backend.client(), TOAST_TTL);

    let err = service
        .dispatch(Action::StartSession {
            customer_name: "Ana".into(),
            table_number: "".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Por favor, preencha todos os campos");
    assert_eq!(service.state().screen, Screen::Welcome);
    assert!(backend.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_backend_reports_connection_error() {
    let config = infrastructure::Config::default().with_api_base_url("http://127.0.0.1:9/api");
    let client = infrastructure::RestaurantClient::new(&config).unwrap();
    let mut service = OrderingService::new(client, TOAST_TTL);
    let err = service
        .dispatch(Action::StartSession {
            customer_name: "Ana".into(),
            table_number: "3".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Erro de conexão com o servidor");
}
