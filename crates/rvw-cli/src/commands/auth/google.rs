use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct GoogleSignInResponse {
    authorization_url: String,
    browser_opened: bool,
    next_step: &'static str,
}

/// The backend finishes the OAuth exchange and redirects to its web
/// callback with the session token; `rvw auth token` completes sign-in here.
pub async fn handle(no_browser: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let url = ctx
        .client
        .google_authorize_url()
        .await
        .context("failed to start Google sign-in")?;

    let browser_opened = !no_browser && open_browser(&url);
    output(
        &GoogleSignInResponse {
            authorization_url: url,
            browser_opened,
            next_step: "rvw auth token <TOKEN>",
        },
        flags.format,
    )
}

fn open_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, "could not open a browser; open the URL manually");
            false
        }
    }
}
