use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dashboard::condition::ConditionIcon;
use crate::dashboard::{CurrentConditions, Dashboard, ForecastSummaryDay, HourlySeries};
use crate::error::ErrorResponse;
use crate::search::LocationSuggestion;

/// OpenAPI documentation for the skyrelay API
///
/// Lists the envelope and view-model schemas. Relayed WeatherAPI.com
/// payloads follow the provider's own documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "skyrelay API",
        version = "0.1.0",
        description = "Relay and view models for a WeatherAPI.com dashboard. Provides current weather, forecasts, location suggestions and derived chart series.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "weather", description = "Current weather and forecasts relayed from WeatherAPI.com"),
        (name = "search", description = "Location suggestions"),
        (name = "dashboard", description = "Derived forecast summary and hourly chart series")
    ),
    components(
        schemas(
            ErrorResponse,
            LocationSuggestion,
            ForecastSummaryDay,
            HourlySeries,
            ConditionIcon,
            CurrentConditions,
            Dashboard,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
