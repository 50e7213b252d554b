// src/domain/ids.rs
//
// Backend-assigned identifiers.
//
// The portal backend hands out opaque string ids (document ids). They are
// never generated client-side; wrapping them keeps a job id from being
// passed where a candidate id is expected.

use serde::{Deserialize, Serialize};

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

backend_id!(
    /// Identifier of a job application
    ApplicationId
);
backend_id!(
    /// Identifier of a candidate account
    CandidateId
);
backend_id!(
    /// Identifier of a company account
    CompanyId
);
backend_id!(
    /// Identifier of a posted job
    JobId
);
backend_id!(
    /// Identifier of an admin account
    AdminId
);
