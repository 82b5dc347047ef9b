use axum::{
    extract::{rejection::QueryRejection, Query},
    http::StatusCode,
    response::Response,
};
use serde::Serialize;
use utoipa::IntoParams;

use crate::telemetry::{flight_timestamps, generate_series, parse_start_time, FlightSample};
use crate::web::api::error::{sized_response, ApiError, ApiResult, ErrorResponse};

#[derive(Debug, Default, PartialEq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlightDataQuery {
    /// Flight start time, epoch milliseconds.
    #[param(value_type = i64)]
    pub timestamp: Option<String>,
}

impl FlightDataQuery {
    /// The first `timestamp` wins when the parameter is repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        FlightDataQuery {
            timestamp: pairs
                .into_iter()
                .find(|(key, _)| key == "timestamp")
                .map(|(_, value)| value),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/get-all-flight-timestamps",
    responses(
        (status = 200, description = "Recorded flights, newest first", body = Vec<i64>)
    ),
    tag = "flights"
)]
pub async fn get_all_flight_timestamps() -> ApiResult<Response> {
    let now_ms = chrono::Utc::now().timestamp_millis();
    let timestamps = flight_timestamps(now_ms);

    let response = json_response(&timestamps)?;
    log::info!("API: served {} flight timestamps", timestamps.len());
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/get-flight-data",
    params(FlightDataQuery),
    responses(
        (status = 200, description = "Samples of one flight, oldest first", body = Vec<FlightSample>),
        (status = 400, description = "Missing or invalid timestamp", body = ErrorResponse)
    ),
    tag = "flights"
)]
pub async fn get_flight_data(
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Response> {
    let start_time = pairs
        .map_err(|e| ApiError::BadRequest(e.body_text()))
        .and_then(|Query(pairs)| {
            let query = FlightDataQuery::from_pairs(pairs);
            parse_start_time(query.timestamp.as_deref()).map_err(ApiError::from)
        })
        .inspect_err(|e| {
            log::warn!("API: rejected /api/get-flight-data: {:?}", e);
        })?;

    let series = generate_series(start_time, &mut rand::rng());

    let response = json_response(&series)?;
    log::info!(
        "API: served flight data for timestamp {} ({} data points)",
        start_time,
        series.len()
    );
    Ok(response)
}

fn json_response<T: Serialize>(data: &T) -> ApiResult<Response> {
    let bytes = serde_json::to_vec(data)?;
    Ok(sized_response(StatusCode::OK, "application/json", bytes))
}
