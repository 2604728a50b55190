use gofeatureflag::{EvaluationContext, FeatureProvider};

pub fn main() -> gofeatureflag::Result<()> {
    // Configure env_logger to see provider logs.
    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("gofeatureflag"))
        .init();

    let endpoint = std::env::var("GOFEATUREFLAG_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:1031".to_owned());
    let provider = gofeatureflag::ProviderOptions::from_endpoint(endpoint).to_provider()?;

    let context = EvaluationContext::new("test-subject")
        .with_attribute("name", "<your name>")
        .with_attribute("anonymous", false);

    // Resolution never fails: on error, the default value is returned along with an error code.
    let result = provider.resolve_boolean_value("a-boolean-flag", false, Some(&context));

    println!("{}", serde_json::to_string_pretty(&result).unwrap());

    Ok(())
}
