use crate::models::{BucketTarget, DeletePredicateRequest};
use crate::{Endpoint, HttpClient, Method, PathTemplate, Result};

api_service! {
    /// Deletion of points by time range and predicate.
    DeleteApi
}

impl<C: HttpClient> DeleteApi<C> {
    /// `POST /api/v2/delete`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn post_delete(
        &self,
        target: &BucketTarget,
        request: &DeletePredicateRequest,
    ) -> Result<()> {
        self.client
            .call_empty(
                Endpoint::new(Method::Post, PathTemplate::new("/api/v2/delete"))
                    .query_params(target)?
                    .json(request)?,
            )
            .await
    }
}
