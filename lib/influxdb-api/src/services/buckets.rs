use crate::models::{Bucket, Buckets, ListBucketsParams, PatchBucketRequest, PostBucketRequest};
use crate::{Endpoint, HttpClient, Method, PathTemplate, Result};

const BUCKETS: PathTemplate = PathTemplate::new("/api/v2/buckets");
const BUCKET: PathTemplate = PathTemplate::new("/api/v2/buckets/{bucketID}");

api_service! {
    /// Bucket management.
    BucketsApi
}

impl<C: HttpClient> BucketsApi<C> {
    /// `GET /api/v2/buckets`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list(&self, params: &ListBucketsParams) -> Result<Buckets> {
        self.client
            .call(Endpoint::new(Method::Get, BUCKETS).query_params(params)?)
            .await
    }

    /// `GET /api/v2/buckets/{bucketID}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; see [`crate::Error::is_not_found`].
    pub async fn get(&self, bucket_id: &str) -> Result<Bucket> {
        self.client
            .call(Endpoint::new(Method::Get, BUCKET).path_param("bucketID", bucket_id))
            .await
    }

    /// `POST /api/v2/buckets`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, request: &PostBucketRequest) -> Result<Bucket> {
        self.client
            .call(Endpoint::new(Method::Post, BUCKETS).json(request)?)
            .await
    }

    /// `PATCH /api/v2/buckets/{bucketID}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn update(&self, bucket_id: &str, request: &PatchBucketRequest) -> Result<Bucket> {
        self.client
            .call(
                Endpoint::new(Method::Patch, BUCKET)
                    .path_param("bucketID", bucket_id)
                    .json(request)?,
            )
            .await
    }

    /// `DELETE /api/v2/buckets/{bucketID}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete(&self, bucket_id: &str) -> Result<()> {
        self.client
            .call_empty(Endpoint::new(Method::Delete, BUCKET).path_param("bucketID", bucket_id))
            .await
    }
}
