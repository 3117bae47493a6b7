use rvw_review::{UploadError, UploadFile, UploadSession};

use super::watch;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::review::ReviewNewArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Upload the files, start the review, and follow it unless `--no-watch`.
pub async fn handle(
    args: &ReviewNewArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut session = UploadSession::new()
        .with_template(args.template.clone())
        .with_custom_rules(args.rules.clone());
    for path in &args.files {
        session.add(UploadFile::read(path).await.map_err(user_error)?);
    }

    let spinner = Progress::spinner(&format!("Uploading {} documents", session.files().len()));
    let started = match session.submit(ctx.client.as_ref()).await {
        Ok(started) => started,
        Err(error) => {
            spinner.finish_err("upload failed");
            return Err(user_error(error));
        }
    };
    spinner.finish_clear();

    if args.no_watch {
        return output(&started, flags.format);
    }
    if !flags.quiet {
        eprintln!(
            "Review {} started for {} documents (about {}s)",
            started.review_id, started.file_count, started.estimated_seconds
        );
    }
    watch::follow(&started.review_id, ctx, flags).await
}

fn user_error(error: UploadError) -> anyhow::Error {
    anyhow::anyhow!(error.user_message())
}
