use rvw_auth::{AuthGate, TOKEN_KEY};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    token_source: Option<&'static str>,
    api_url: String,
    note: Option<String>,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let had_token = ctx.credentials.detect_source(TOKEN_KEY);
    ctx.session.load_from_storage().await;

    let api_url = ctx.client.base_url().to_string();
    let status = match ctx.session.gate() {
        AuthGate::Authenticated(user) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(user.id.clone()),
            email: Some(user.email.clone()),
            name: Some(user.name.clone()),
            token_source: ctx.credentials.detect_source(TOKEN_KEY),
            api_url,
            note: None,
        },
        AuthGate::Loading | AuthGate::RedirectToLogin => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            email: None,
            name: None,
            token_source: None,
            api_url,
            note: Some(
                if had_token.is_some() {
                    "stored token was rejected and has been cleared"
                } else {
                    "no stored token; run `rvw auth login`"
                }
                .into(),
            ),
        },
    };

    output(&status, flags.format)
}
