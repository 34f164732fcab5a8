//! # Bitbucket Engine
//!
//! One generic read implementation interprets every data source descriptor.
//! A read is a fixed sequence of steps:
//!
//! 1. **Bind**: coerce host inputs to the declared parameter types
//! 2. **Build**: substitute path parameters (percent-encoded) and collect
//!    non-empty query parameters
//! 3. **Trace**: log the binding name and sanitized parameters
//! 4. **Dispatch**: `GET` through the shared [`BitbucketClient`]
//! 5. **Classify**: map transport failures and statuses to an error kind
//! 6. **Decode**: strict JSON parse, then flatten into host attributes
//! 7. **Identify**: render the synthetic identity template
//!
//! ## Usage
//!
//! ```no_run
//! use bitbucket_api::{BitbucketClient, ClientSettings, Credentials};
//! use bitbucket_engine::{Inputs, ReadOptions, read};
//! use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec, ResponseShape};
//! use serde_json::json;
//!
//! static TAG: BindingSpec = BindingSpec {
//!     name: "bitbucket_tag",
//!     summary: "A single tag",
//!     path: "2.0/repositories/{workspace}/{repo_slug}/refs/tags/{tag_name}",
//!     params: &[ParamSpec::path("workspace"), ParamSpec::path("repo_slug"), ParamSpec::path("tag_name")],
//!     response: ResponseShape::Scalar { fields: &[FieldSpec::string("name")] },
//!     identity: "{workspace}/{repo_slug}/{tag_name}",
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BitbucketClient::new(&Credentials::Unauthenticated, ClientSettings::default())?;
//! let inputs: Inputs = serde_json::from_value(json!({"workspace": "w", "repo_slug": "r", "tag_name": "v1"}))?;
//! let outcome = read(&client, &TAG, &inputs, &ReadOptions::default()).await?;
//! println!("{} => {:?}", outcome.id, outcome.attributes);
//! # Ok(())
//! # }
//! ```

pub mod bind;
pub mod classify;
pub mod flatten;
pub mod read;

pub use bind::{BoundParams, Inputs, REDACTED, bind_params};
pub use classify::{classify_status, classify_transport};
pub use flatten::{Attributes, flatten, zero_value};
pub use read::{PreparedRead, ReadOptions, ReadOutcome, prepare, read, render_identity};

#[doc(no_inline)]
pub use bitbucket_api::BitbucketClient;
