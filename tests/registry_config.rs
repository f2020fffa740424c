// self
use oauth2_interceptor::{
	_preludet::*,
	config::InterceptorConfig,
	error::ConfigError,
	interceptor::AuthInterceptor,
	registry::{ProtectedResourceRegistry, ScopeLookup},
};

#[test]
fn earlier_entries_take_precedence_over_wider_globs() {
	let registry = ProtectedResourceRegistry::builder()
		.protect("https://a/b", ["b.read"])
		.protect("https://a/*", ["a.read"])
		.build()
		.expect("Registry fixture should build successfully.");

	let ScopeLookup::Protected { pattern, scopes } = registry.lookup("https://a/b") else {
		panic!("Expected https://a/b to be protected.");
	};

	assert_eq!(pattern, "https://a/b");
	assert_eq!(scopes.as_slice(), ["b.read".to_string()]);
	assert_eq!(
		registry.scopes_for("https://a/c").map(|scopes| scopes.normalized()).as_deref(),
		Some("a.read")
	);
}

#[test]
fn default_registry_leaves_unrelated_urls_public() {
	let registry = ProtectedResourceRegistry::default();

	assert_eq!(registry.len(), 1);
	assert_eq!(registry.lookup("https://api.example.com/data"), ScopeLookup::NoMatch);
	assert_eq!(
		registry
			.scopes_for("https://graph.microsoft.com/v1.0/me")
			.map(|scopes| scopes.normalized())
			.as_deref(),
		Some("user.read")
	);
}

#[test]
fn config_file_builds_an_interceptor() {
	let path = std::env::temp_dir().join(format!(
		"oauth2-interceptor-config-{}.json",
		std::process::id()
	));

	std::fs::write(
		&path,
		r#"{
			"protected_resources": [
				{ "pattern": "https://contoso.example/api/*", "scopes": ["api://contoso/read"] }
			],
			"interactive_fallback": false
		}"#,
	)
	.expect("Config fixture should be writable.");

	let config = InterceptorConfig::from_path(&path).expect("Config file should parse.");

	std::fs::remove_file(&path).expect("Config fixture should be removable.");

	let acquirer = Arc::new(ScriptedAcquirer::default());
	let interceptor = AuthInterceptor::<ScriptedAcquirer>::from_config(acquirer, &config)
		.expect("Config should compile into an interceptor.");

	assert!(!interceptor.interactive_fallback());
	assert!(interceptor.registry().scopes_for("https://contoso.example/api/orders").is_some());
	assert!(interceptor.registry().scopes_for("https://contoso.example/web").is_none());
}

#[test]
fn missing_config_file_is_an_io_error() {
	let err = InterceptorConfig::from_path("/nonexistent/oauth2-interceptor.json")
		.expect_err("Missing files must be reported.");

	assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn duplicate_config_patterns_are_rejected() {
	let config = InterceptorConfig::from_json_str(
		r#"{
			"protected_resources": [
				{ "pattern": "https://a", "scopes": ["x"] },
				{ "pattern": "https://a", "scopes": ["y"] }
			]
		}"#,
	)
	.expect("Duplicate patterns are only detected when compiling the registry.");
	let acquirer = Arc::new(ScriptedAcquirer::default());
	let err = AuthInterceptor::<ScriptedAcquirer>::from_config(acquirer, &config)
		.expect_err("Duplicate patterns must be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::DuplicatePattern { .. })));
}
