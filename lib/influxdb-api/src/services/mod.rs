//! Resource services.
//!
//! Each service is a thin set of typed operations over a shared
//! [`ApiClient`]. Services are cheap to clone and carry their own
//! [`ScopePrefix`](crate::ScopePrefix), set with `only_oss()` or `only_cloud()`.

use crate::ApiClient;

macro_rules! api_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<C> {
            client: $crate::ApiClient<C>,
        }

        impl<C> $name<C> {
            /// Create the service over a client.
            #[must_use]
            pub fn new(client: $crate::ApiClient<C>) -> Self {
                Self { client }
            }

            /// Prefix error messages as coming from an OSS-only command.
            #[must_use]
            pub fn only_oss(self) -> Self {
                self.with_scope($crate::ScopePrefix::OssOnly)
            }

            /// Prefix error messages as coming from a Cloud-only command.
            #[must_use]
            pub fn only_cloud(self) -> Self {
                self.with_scope($crate::ScopePrefix::CloudOnly)
            }

            /// Set the scope prefix of error messages.
            #[must_use]
            pub fn with_scope(self, scope: $crate::ScopePrefix) -> Self {
                Self {
                    client: self.client.with_scope(scope),
                }
            }

            /// Scope prefix of error messages.
            #[must_use]
            pub const fn scope(&self) -> $crate::ScopePrefix {
                self.client.scope()
            }
        }
    };
}

mod buckets;
mod delete;
mod health;
mod setup;
mod write;

pub use buckets::BucketsApi;
pub use delete::DeleteApi;
pub use health::HealthApi;
pub use setup::SetupApi;
pub use write::{WRITE_ERRORS, WriteApi, WriteOptions};

impl<C: Clone> ApiClient<C> {
    /// `/api/v2/buckets` operations.
    #[must_use]
    pub fn buckets(&self) -> BucketsApi<C> {
        BucketsApi::new(self.clone())
    }

    /// `/api/v2/delete` operations.
    #[must_use]
    pub fn delete(&self) -> DeleteApi<C> {
        DeleteApi::new(self.clone())
    }

    /// `/health` operations.
    #[must_use]
    pub fn health(&self) -> HealthApi<C> {
        HealthApi::new(self.clone())
    }

    /// `/api/v2/setup` operations.
    #[must_use]
    pub fn setup(&self) -> SetupApi<C> {
        SetupApi::new(self.clone())
    }

    /// `/api/v2/write` operations.
    #[must_use]
    pub fn write(&self) -> WriteApi<C> {
        WriteApi::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScopePrefix;

    #[test]
    fn scope_is_per_service() {
        let client = ApiClient::new((), "http://localhost:8086").expect("url");

        assert_eq!(client.buckets().scope(), ScopePrefix::None);
        assert_eq!(client.setup().only_oss().scope(), ScopePrefix::OssOnly);
        assert_eq!(client.write().only_cloud().scope(), ScopePrefix::CloudOnly);
        assert_eq!(client.scope(), ScopePrefix::None);
    }
}
