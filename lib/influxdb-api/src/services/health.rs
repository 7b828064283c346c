use crate::models::HealthCheck;
use crate::{Endpoint, HttpClient, Method, PathTemplate, Result};

api_service! {
    /// Server health.
    HealthApi
}

impl<C: HttpClient> HealthApi<C> {
    /// `GET /health`.
    ///
    /// An unhealthy server answers `503`, which surfaces as
    /// [`crate::Error::Api`].
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the body is not a health check.
    pub async fn get_health(&self) -> Result<HealthCheck> {
        self.client
            .call(Endpoint::new(Method::Get, PathTemplate::new("/health")))
            .await
    }
}
