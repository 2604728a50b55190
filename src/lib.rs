//! A Rust provider for GO Feature Flag, evaluating feature flags against a relay proxy.
//!
//! # Overview
//!
//! The crate revolves around a [`GoFeatureFlagProvider`] that resolves flag values for an
//! [`EvaluationContext`]: a targeting key (user or session id) plus free-form attributes. Each
//! resolution sends the context and the caller's default value to the relay proxy and returns an
//! [`EvaluationResult`] holding the value along with its [`Reason`], variant, and [`ErrorCode`].
//!
//! The provider implements [`FeatureProvider`], the interface a flag-evaluation framework uses to
//! drive providers. It can also be used directly.
//!
//! ```no_run
//! # use gofeatureflag::{EvaluationContext, FeatureProvider, ProviderOptions};
//! let provider = ProviderOptions::from_endpoint("http://localhost:1031")
//!     .to_provider()
//!     .unwrap();
//!
//! let context = EvaluationContext::new("d45e303a-38c2-11ed-a261-0242ac120002")
//!     .with_attribute("email", "john.doe@gofeatureflag.org");
//!
//! let color = provider
//!     .resolve_string_value("title-color", "#000000".to_owned(), Some(&context))
//!     .value;
//! ```
//!
//! # Typed resolution
//!
//! There is one resolution method per flag type:
//! - [`FeatureProvider::resolve_boolean_value()`]
//! - [`FeatureProvider::resolve_string_value()`]
//! - [`FeatureProvider::resolve_integer_value()`]
//! - [`FeatureProvider::resolve_float_value()`]
//! - [`FeatureProvider::resolve_object_value()`]
//!
//! A value of the wrong type is reported as [`ErrorCode::TypeMismatch`]. Integer flags reject
//! floating-point values; float flags accept integers.
//!
//! # Error Handling
//!
//! Invalid configuration is reported by [`GoFeatureFlagProvider::new()`] as an [`Error`].
//!
//! Resolution never fails: when the relay is unreachable, the flag is unknown, or the answer is
//! malformed, the result carries the default value, [`Reason::ERROR`], and an [`ErrorCode`].
//! Flag evaluation should not be critical enough to crash the application.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging messages
//! under the `gofeatureflag` target. Consider integrating a `log`-compatible logger
//! implementation for better visibility into provider operations.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod config;
mod context;
mod details;
mod error;
mod eval;
mod provider;
mod request;
mod resolver;
mod value;

pub use config::ProviderOptions;
pub use context::{AttributeValue, Attributes, EvaluationContext};
pub use details::{ErrorCode, EvaluationResult, Reason};
pub use error::{Error, Result};
pub use provider::{FeatureProvider, GoFeatureFlagProvider, Hook, ProviderMetadata};
pub use value::{ValueKind, ValueType};
