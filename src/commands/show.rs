use crate::config::Config;
use crate::display::{Renderer, TerminalRenderer};
use crate::error::{DexError, Result};

use super::{detail_json, open_session, print_json};

/// Show the detail view of one entry
pub async fn cmd_show(config: &Config, id: u32, json: bool) -> Result<()> {
    let session = open_session(config)?;
    let detail = session
        .detail(id)
        .await
        .ok_or(DexError::EntityUnavailable(id))?;

    if json {
        return print_json(&detail_json(&detail));
    }

    let mut renderer = TerminalRenderer::stdout();
    renderer.render_detail(&detail)
}
