//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a background job
///
/// On a heaven deployment this is the port label the job runs on. It may be
/// given as a string or a number; either way it is only used to build a URL
/// path segment, so no validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the endpoint that aborts this job
    pub fn abort_path(&self) -> String {
        format!("/port/{}/abort", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for JobId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

macro_rules! job_id_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JobId {
                fn from(value: $t) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

job_id_from_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
