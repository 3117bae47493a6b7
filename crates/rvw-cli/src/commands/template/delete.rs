use rvw_templates::TemplateManager;
use serde::Serialize;

use super::user_error;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse<'a> {
    deleted: bool,
    template_id: &'a str,
}

pub async fn handle(
    template_id: &str,
    manager: &mut TemplateManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    manager
        .delete(template_id)
        .await
        .map_err(|error| user_error(error, "Failed to delete template"))?;
    output(
        &DeleteResponse {
            deleted: true,
            template_id,
        },
        flags.format,
    )
}
