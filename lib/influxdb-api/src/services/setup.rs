use crate::models::{IsOnboarding, OnboardingRequest, OnboardingResponse};
use crate::{Endpoint, HttpClient, Method, PathTemplate, Result};

const SETUP: PathTemplate = PathTemplate::new("/api/v2/setup");

api_service! {
    /// Initial server setup (onboarding).
    SetupApi
}

impl<C: HttpClient> SetupApi<C> {
    /// `GET /api/v2/setup`: whether the server still accepts onboarding.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_setup(&self) -> Result<IsOnboarding> {
        self.client.call(Endpoint::new(Method::Get, SETUP)).await
    }

    /// `POST /api/v2/setup`: create the initial user, organization, bucket and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, typically `422` when the server
    /// is already set up.
    pub async fn post_setup(&self, request: &OnboardingRequest) -> Result<OnboardingResponse> {
        self.client
            .call(Endpoint::new(Method::Post, SETUP).json(request)?)
            .await
    }
}
