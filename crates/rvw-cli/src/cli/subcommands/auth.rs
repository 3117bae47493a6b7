use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account and sign in.
    Register(AuthRegisterArgs),
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Sign in with Google in the browser.
    Google {
        /// Print the URL instead of opening a browser.
        #[arg(long)]
        no_browser: bool,
    },
    /// Finish a browser sign-in with the token it handed back.
    Token {
        /// Session token from the sign-in callback.
        token: String,
    },
    /// Show current auth status.
    Status,
    /// Clear stored credentials.
    Logout,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password (falls back to RVW_PASSWORD).
    #[arg(long, env = "RVW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub email: String,
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Password (falls back to RVW_PASSWORD).
    #[arg(long, env = "RVW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
