use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Review lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommands {
    /// Upload documents and start a review.
    New(ReviewNewArgs),
    /// Follow a review until it completes or fails.
    Watch { id: String },
    /// Show the current state of a review.
    Show { id: String },
    /// Write a completed review's result as JSON.
    Export {
        id: String,
        /// Directory to write into (defaults to the current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List reviews, newest first.
    List {
        #[arg(long)]
        status: Option<String>,
        /// 1-based page number; ignored when --offset is given.
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Delete a review.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct ReviewNewArgs {
    /// PDF, JPEG, or PNG files to review.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Rule template to apply.
    #[arg(long)]
    pub template: Option<String>,
    /// Free-text rules added to this review only.
    #[arg(long)]
    pub rules: Option<String>,
    /// Return right after the review starts.
    #[arg(long)]
    pub no_watch: bool,
}
