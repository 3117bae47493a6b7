use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, ReviewCommands, TemplateCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Upload documents for review and follow results.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
    /// Reusable rule templates.
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Ask the review assistant a question.
    Chat(ChatArgs),
    /// Check backend health.
    Health,
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// Message to send.
    pub message: String,
    /// Ground the answer in this review's results.
    #[arg(long)]
    pub review: Option<String>,
}
