use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use std::convert::Infallible;

use crate::error::RelayError;
use crate::weather::ReportType;

/// Query parameters for weather/dashboard requests
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    /// Free-text location, e.g. "Colombo, Sri Lanka"
    pub location: Option<String>,
    /// Report type: current or forecast
    #[serde(rename = "type")]
    pub report: Option<String>,
}

/// Query parameters for location suggestions
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Partial query
    pub query: Option<String>,
}

/// Parse the query string, treating an undecodable one as empty.
///
/// The extractors never reject: the credential check has to run before any
/// parameter is judged, so validation is left to the services.
async fn lenient_query<T, S>(parts: &mut Parts, state: &S) -> T
where
    T: serde::de::DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    match Query::<T>::from_request_parts(parts, state).await {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable query string");
            T::default()
        }
    }
}

/// Raw location and report type for `/weather`
#[derive(Debug)]
pub struct WeatherParams {
    pub location: String,
    pub report: Option<String>,
}

impl WeatherParams {
    /// A missing `type` means current conditions
    pub fn report_type(&self) -> Result<ReportType, RelayError> {
        match self.report.as_deref() {
            Some(value) => value.parse(),
            None => Ok(ReportType::default()),
        }
    }
}

impl<S> FromRequestParts<S> for WeatherParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query: WeatherQuery = lenient_query(parts, state).await;

        Ok(WeatherParams {
            location: query.location.unwrap_or_default(),
            report: query.report,
        })
    }
}

/// Location only, for `/dashboard`
#[derive(Debug)]
pub struct LocationParam(pub String);

impl<S> FromRequestParts<S> for LocationParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query: WeatherQuery = lenient_query(parts, state).await;
        Ok(LocationParam(query.location.unwrap_or_default()))
    }
}

/// Partial query for `/search`
#[derive(Debug)]
pub struct SearchParam(pub String);

impl<S> FromRequestParts<S> for SearchParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query: SearchQuery = lenient_query(parts, state).await;
        Ok(SearchParam(query.query.unwrap_or_default()))
    }
}
