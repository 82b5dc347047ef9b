use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::telemetry::FlightSample;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::flights::get_all_flight_timestamps,
        super::api::flights::get_flight_data,
    ),
    components(schemas(FlightSample, ErrorResponse)),
    info(
        title = "Launchpad Dev Server API",
        description = "Mock flight telemetry served in place of the launchpad firmware",
        version = "0.1.0"
    ),
    tags(
        (name = "flights", description = "Recorded flights and their sensor data")
    )
)]
pub struct ApiDoc;
