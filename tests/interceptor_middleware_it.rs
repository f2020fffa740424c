// crates.io
use httpmock::prelude::*;
// self
use oauth2_interceptor::{
	_preludet::*,
	acquire::AcquireError,
	auth::Account,
	registry::ProtectedResourceRegistry,
};

fn protect(server: &MockServer, path: &str, scopes: &[&str]) -> ProtectedResourceRegistry {
	ProtectedResourceRegistry::builder()
		.protect(server.url(path), scopes.iter().copied())
		.build()
		.expect("Registry fixture should build successfully.")
}

fn acquisition_error(err: &reqwest_middleware::Error) -> Option<&Error> {
	match err {
		reqwest_middleware::Error::Middleware(inner) => inner.downcast_ref::<Error>(),
		_ => None,
	}
}

#[tokio::test]
async fn public_requests_are_forwarded_without_tokens() {
	let server = MockServer::start_async().await;
	let acquirer = Arc::new(ScriptedAcquirer::default());
	let client = build_test_client(acquirer.clone(), protect(&server, "/me", &["user.read"]));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/data")
				.header("x-correlation-id", "public-1")
				.header("accept", "application/json")
				.header_missing("authorization");
			then.status(200).body("public");
		})
		.await;
	let response = client
		.get(server.url("/data"))
		.header("x-correlation-id", "public-1")
		.header("accept", "application/json")
		.send()
		.await
		.expect("Public request should reach the server.");

	assert_eq!(response.status().as_u16(), 200);
	assert!(acquirer.silent_calls().is_empty());
	assert!(acquirer.interactive_calls().is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn silent_token_is_forwarded_as_bearer() {
	let server = MockServer::start_async().await;
	let account = Account::new("uid.utid");
	let acquirer = Arc::new(
		ScriptedAcquirer::default()
			.with_accounts([account.clone()])
			.push_silent(Ok(token("silent-token"))),
	);
	let client =
		build_test_client(acquirer.clone(), protect(&server, "/me", &["user.read", "openid"]));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/me")
				.header("x-correlation-id", "protected-1")
				.header("authorization", "Bearer silent-token");
			then.status(200).body("{\"displayName\":\"Ada\"}");
		})
		.await;

	client
		.get(server.url("/me"))
		.header("x-correlation-id", "protected-1")
		.send()
		.await
		.expect("Protected request should succeed.");

	let calls = acquirer.silent_calls();

	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].scopes.as_slice(), ["user.read".to_string(), "openid".to_string()]);
	assert_eq!(calls[0].account, Some(account));
	assert!(acquirer.interactive_calls().is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn silent_failure_falls_back_to_one_interactive_call() {
	let server = MockServer::start_async().await;
	let acquirer = Arc::new(
		ScriptedAcquirer::default()
			.push_silent(Err(AcquireError::InteractionRequired { reason: "consent".into() }))
			.push_interactive(Ok(token("popup-token"))),
	);
	let client = build_test_client(acquirer.clone(), protect(&server, "/me", &["user.read"]));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/me").header("authorization", "Bearer popup-token");
			then.status(200);
		})
		.await;

	client.get(server.url("/me")).send().await.expect("Fallback request should succeed.");

	let interactive = acquirer.interactive_calls();

	assert_eq!(acquirer.silent_calls().len(), 1);
	assert_eq!(interactive.len(), 1);
	assert_eq!(interactive[0].scopes.as_slice(), ["user.read".to_string()]);

	mock.assert_async().await;
}

#[tokio::test]
async fn fallback_ignores_the_silent_failure_cause() {
	for cause in [AcquireError::NoAccount, provider_failure("network unreachable")] {
		let server = MockServer::start_async().await;
		let acquirer = Arc::new(
			ScriptedAcquirer::default()
				.push_silent(Err(cause))
				.push_interactive(Ok(token("popup-token"))),
		);
		let client = build_test_client(acquirer.clone(), protect(&server, "/me", &["user.read"]));
		let mock = server
			.mock_async(|when, then| {
				when.path("/me").header("authorization", "Bearer popup-token");
				then.status(204);
			})
			.await;

		client.get(server.url("/me")).send().await.expect("Fallback request should succeed.");

		assert_eq!(acquirer.interactive_calls().len(), 1);

		mock.assert_async().await;
	}
}

#[tokio::test]
async fn double_failure_errors_without_forwarding() {
	let server = MockServer::start_async().await;
	let acquirer = Arc::new(
		ScriptedAcquirer::default()
			.push_silent(Err(provider_failure("refresh token expired")))
			.push_interactive(Err(AcquireError::Cancelled)),
	);
	let client = build_test_client(acquirer.clone(), protect(&server, "/me", &["user.read"]));
	let mock = server
		.mock_async(|when, then| {
			when.path("/me");
			then.status(200);
		})
		.await;
	let err = client
		.get(server.url("/me"))
		.send()
		.await
		.expect_err("Interactive failure should surface to the caller.");

	assert!(matches!(
		acquisition_error(&err),
		Some(Error::Acquisition { source: AcquireError::Cancelled })
	));
	assert_eq!(acquirer.silent_calls().len(), 1);
	assert_eq!(acquirer.interactive_calls().len(), 1);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn explicit_exclusion_skips_acquisition() {
	let server = MockServer::start_async().await;
	let acquirer = Arc::new(ScriptedAcquirer::default());
	let registry = ProtectedResourceRegistry::builder()
		.exclude(server.url("/me/photo"))
		.protect(server.url("/me"), ["user.read"])
		.build()
		.expect("Registry with exclusion should build.");
	let client = build_test_client(acquirer.clone(), registry);
	let mock = server
		.mock_async(|when, then| {
			when.path("/me/photo").header_missing("authorization");
			then.status(200);
		})
		.await;

	client.get(server.url("/me/photo")).send().await.expect("Excluded request should succeed.");

	assert!(acquirer.silent_calls().is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn concurrent_requests_acquire_independently() {
	let server = MockServer::start_async().await;
	let acquirer = Arc::new(
		ScriptedAcquirer::default()
			.push_silent(Ok(token("shared-token")))
			.push_silent(Ok(token("shared-token"))),
	);
	let client = build_test_client(acquirer.clone(), protect(&server, "/me", &["user.read"]));
	let mock = server
		.mock_async(|when, then| {
			when.path("/me").header("authorization", "Bearer shared-token");
			then.status(200);
		})
		.await;
	let (first, second) =
		tokio::join!(client.get(server.url("/me")).send(), client.get(server.url("/me")).send());

	first.expect("First concurrent request should succeed.");
	second.expect("Second concurrent request should succeed.");

	assert_eq!(acquirer.silent_calls().len(), 2);

	mock.assert_calls_async(2).await;
}
