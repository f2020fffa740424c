//! Calls a mock Graph `/me` endpoint through the interceptor with an in-process acquirer that
//! has no cached token, so the request is authorized by the interactive fallback.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_interceptor::{
	acquire::{
		AcquireError, AcquireFuture, InteractiveTokenRequest, SilentTokenRequest, TokenAcquirer,
	},
	auth::{Account, AuthorizationResult},
	interceptor::AuthInterceptor,
	registry::ProtectedResourceRegistry,
	reqwest::Client,
	reqwest_middleware::ClientBuilder,
};

struct DemoAcquirer {
	account: Account,
}
impl TokenAcquirer for DemoAcquirer {
	fn accounts(&self) -> Vec<Account> {
		vec![self.account.clone()]
	}

	fn acquire_token_silent(&self, request: SilentTokenRequest) -> AcquireFuture<'_> {
		println!("Silent acquisition for `{}` found no cached token.", request.scopes);

		let outcome: Result<AuthorizationResult, AcquireError> =
			Err(AcquireError::InteractionRequired { reason: "empty cache".into() });

		Box::pin(async move { outcome })
	}

	fn acquire_token_interactive(&self, request: InteractiveTokenRequest) -> AcquireFuture<'_> {
		println!("Interactive acquisition for `{}` succeeded.", request.scopes);

		let result = AuthorizationResult::new("demo-access")
			.with_scopes(request.scopes)
			.with_account(self.account.clone());

		Box::pin(async move { Ok(result) })
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/me").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"displayName\":\"Ada Lovelace\"}");
		})
		.await;
	let public_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/status").header_missing("authorization");
			then.status(200).body("ok");
		})
		.await;
	let registry = ProtectedResourceRegistry::builder()
		.protect(server.url("/v1.0/me"), ["user.read"])
		.build()?;
	let acquirer = Arc::new(DemoAcquirer { account: Account::new("demo-uid.demo-utid") });
	let interceptor = <AuthInterceptor<DemoAcquirer>>::new(acquirer, registry);
	let client = ClientBuilder::new(Client::new()).with(interceptor).build();
	let profile = client.get(server.url("/v1.0/me")).send().await?.text().await?;
	let status = client.get(server.url("/status")).send().await?.text().await?;

	println!("Profile: {profile}.");
	println!("Status: {status}.");

	me_mock.assert_async().await;
	public_mock.assert_async().await;

	Ok(())
}
