use std::sync::Arc;

use serde::Serialize;

use crate::{
    context::RemoteUser,
    eval::interpret,
    request::ResolutionRequest,
    resolver::RemoteResolver,
    value::FlagType,
    EvaluationContext, EvaluationResult, ProviderOptions, Result,
};

/// Static description of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Human-readable provider name.
    pub name: &'static str,
}

/// A cross-cutting callback run by the host framework around flag evaluations.
///
/// All methods default to doing nothing.
pub trait Hook: Send + Sync {
    /// Called before the flag is resolved.
    fn before(&self, _flag_key: &str, _context: Option<&EvaluationContext>) {}

    /// Called after a successful resolution.
    fn after(&self, _flag_key: &str, _context: Option<&EvaluationContext>) {}

    /// Called when the resolution produced an error code.
    fn error(&self, _flag_key: &str, _context: Option<&EvaluationContext>) {}

    /// Called after every resolution.
    fn finally(&self, _flag_key: &str, _context: Option<&EvaluationContext>) {}
}

/// Interface a flag-evaluation framework uses to talk to a provider.
///
/// Resolution methods never fail: errors are reported through
/// [`EvaluationResult::error_code`] and the default value is returned.
pub trait FeatureProvider: Send + Sync {
    /// Provider metadata.
    fn metadata(&self) -> &ProviderMetadata;

    /// Hooks contributed by the provider.
    fn provider_hooks(&self) -> Vec<Arc<dyn Hook>>;

    /// Resolve a boolean flag.
    fn resolve_boolean_value(
        &self,
        flag_key: &str,
        default_value: bool,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<bool>;

    /// Resolve a string flag.
    fn resolve_string_value(
        &self,
        flag_key: &str,
        default_value: String,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<String>;

    /// Resolve an integer flag.
    fn resolve_integer_value(
        &self,
        flag_key: &str,
        default_value: i64,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<i64>;

    /// Resolve a floating-point flag.
    fn resolve_float_value(
        &self,
        flag_key: &str,
        default_value: f64,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<f64>;

    /// Resolve a structured flag. Objects and lists are both accepted.
    fn resolve_object_value(
        &self,
        flag_key: &str,
        default_value: serde_json::Value,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<serde_json::Value>;
}

/// Provider that evaluates flags against a GO Feature Flag relay proxy.
///
/// Every resolution issues exactly one HTTP request; nothing is cached. The provider holds only
/// read-only configuration and can be shared between threads.
///
/// # Examples
/// ```no_run
/// # use gofeatureflag::{EvaluationContext, FeatureProvider, GoFeatureFlagProvider, ProviderOptions};
/// let provider = GoFeatureFlagProvider::new(ProviderOptions::from_endpoint("http://localhost:1031"))
///     .unwrap();
/// let context = EvaluationContext::new("user-id");
/// let enabled = provider
///     .resolve_boolean_value("my-flag", false, Some(&context))
///     .value;
/// ```
#[derive(Debug)]
pub struct GoFeatureFlagProvider {
    metadata: ProviderMetadata,
    resolver: RemoteResolver,
}

impl GoFeatureFlagProvider {
    /// Provider name reported in metadata.
    pub const NAME: &'static str = "GO Feature Flag";

    /// Create a provider from options.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing, not an absolute `http(s)` URL, or if the HTTP
    /// client cannot be built.
    pub fn new(options: ProviderOptions) -> Result<Self> {
        let resolver = RemoteResolver::new(options)?;
        Ok(GoFeatureFlagProvider {
            metadata: ProviderMetadata { name: Self::NAME },
            resolver,
        })
    }

    fn resolve<T: FlagType>(
        &self,
        flag_key: &str,
        default_value: T,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<T> {
        let raw = RemoteUser::from_context(context).and_then(|user| {
            let request = ResolutionRequest::new(user, default_value.to_wire());
            self.resolver.resolve(flag_key, &request)
        });
        interpret(flag_key, default_value, raw)
    }
}

impl FeatureProvider for GoFeatureFlagProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn provider_hooks(&self) -> Vec<Arc<dyn Hook>> {
        Vec::new()
    }

    fn resolve_boolean_value(
        &self,
        flag_key: &str,
        default_value: bool,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<bool> {
        self.resolve(flag_key, default_value, context)
    }

    fn resolve_string_value(
        &self,
        flag_key: &str,
        default_value: String,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<String> {
        self.resolve(flag_key, default_value, context)
    }

    fn resolve_integer_value(
        &self,
        flag_key: &str,
        default_value: i64,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<i64> {
        self.resolve(flag_key, default_value, context)
    }

    fn resolve_float_value(
        &self,
        flag_key: &str,
        default_value: f64,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<f64> {
        self.resolve(flag_key, default_value, context)
    }

    fn resolve_object_value(
        &self,
        flag_key: &str,
        default_value: serde_json::Value,
        context: Option<&EvaluationContext>,
    ) -> EvaluationResult<serde_json::Value> {
        self.resolve(flag_key, default_value, context)
    }
}
