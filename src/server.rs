use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::{
    booking::{BookingError, Ticket, book_ticket, quote_fare, recharge_wallet},
    network::NetworkGraph,
};

type SharedGraph = Arc<NetworkGraph>;

#[derive(Deserialize)]
pub struct FareQuery {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct BookRequest {
    pub source: String,
    pub destination: String,
    pub balance: u64,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub booked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<BookingError>,
    pub message: String,
    pub balance: u64,
}

#[derive(Deserialize)]
pub struct RechargeRequest {
    pub balance: u64,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(flatten)]
    pub error: BookingError,
}

pub fn router(graph: SharedGraph) -> Router {
    Router::new()
        .route("/stations", get(stations))
        .route("/fare", get(fare))
        .route("/book", post(book))
        .route("/recharge", post(recharge))
        .layer(CorsLayer::permissive())
        .with_state(graph)
}

pub async fn serve(graph: NetworkGraph, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(Arc::new(graph));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, "serving fare API");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn stations(State(graph): State<SharedGraph>) -> Json<Vec<String>> {
    Json(graph.stations().map(str::to_owned).collect())
}

async fn fare(
    State(graph): State<SharedGraph>,
    Query(query): Query<FareQuery>,
) -> Result<Json<Ticket>, (StatusCode, Json<ErrorResponse>)> {
    quote_fare(&graph, &query.from, &query.to).map(Json).map_err(|error| {
        let status = match error {
            BookingError::InvalidStation { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let message = error.to_string();
        (status, Json(ErrorResponse { message, error }))
    })
}

async fn book(State(graph): State<SharedGraph>, Json(req): Json<BookRequest>) -> Json<BookResponse> {
    let booking = book_ticket(&graph, &req.source, &req.destination, req.balance);

    let response = match booking.outcome {
        Ok(ticket) => BookResponse {
            booked: true,
            message: format!("Ticket booked! Fare: {}", ticket.fare),
            ticket: Some(ticket),
            rejection: None,
            balance: booking.balance,
        },
        Err(error) => BookResponse {
            booked: false,
            message: error.to_string(),
            ticket: None,
            rejection: Some(error),
            balance: booking.balance,
        },
    };

    Json(response)
}

async fn recharge(Json(req): Json<RechargeRequest>) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        balance: recharge_wallet(req.balance, req.amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::adapters::json::JsonAdapter;

    fn graph() -> SharedGraph {
        let mut graph = NetworkGraph::from_adapter(&JsonAdapter::builtin().unwrap()).unwrap();
        graph.add_station("Station E");
        Arc::new(graph)
    }

    fn book_request(source: &str, destination: &str, balance: u64) -> Json<BookRequest> {
        Json(BookRequest {
            source: source.into(),
            destination: destination.into(),
            balance,
        })
    }

    #[tokio::test]
    async fn lists_stations_in_order() {
        let Json(names) = stations(State(graph())).await;
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "Station A");
    }

    #[tokio::test]
    async fn fare_includes_the_route() {
        let query = Query(FareQuery {
            from: "Station A".into(),
            to: "Station D".into(),
        });
        let Json(body) = fare(State(graph()), query).await.unwrap();
        assert_eq!(body.fare, 28);
        assert_eq!(body.route, vec!["Station A", "Station C", "Station D"]);
    }

    #[tokio::test]
    async fn fare_status_codes_follow_the_error() {
        let query = Query(FareQuery {
            from: "Nowhere".into(),
            to: "Station D".into(),
        });
        let (status, _) = fare(State(graph()), query).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let query = Query(FareQuery {
            from: "Station A".into(),
            to: "Station E".into(),
        });
        let (status, Json(body)) = fare(State(graph()), query).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(matches!(body.error, BookingError::NoRoute { .. }));
    }

    #[tokio::test]
    async fn booking_returns_the_new_balance() {
        let Json(body) = book(State(graph()), book_request("Station A", "Station D", 30)).await;
        assert!(body.booked);
        assert_eq!(body.balance, 2);
        assert_eq!(body.message, "Ticket booked! Fare: 28");
    }

    #[tokio::test]
    async fn rejected_booking_keeps_the_balance() {
        let Json(body) = book(State(graph()), book_request("Station A", "Station D", 0)).await;
        assert!(!body.booked);
        assert_eq!(body.balance, 0);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["rejection"]["error"], "insufficient_funds");
        assert_eq!(json["rejection"]["required"], 28);
        assert!(json.get("ticket").is_none());
    }

    #[tokio::test]
    async fn recharge_adds_to_the_balance() {
        let req = Json(RechargeRequest {
            balance: 2,
            amount: 50,
        });
        let Json(body) = recharge(req).await;
        assert_eq!(body.balance, 52);
    }
}
