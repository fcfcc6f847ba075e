//! Pipeline-related API endpoints

use std::collections::HashSet;

use adopipe_core::dto::pipeline::{Pipeline, PipelineList};
use tracing::debug;

use crate::error::Result;
use crate::{CONTINUATION_TOKEN_HEADER, DevOpsClient};

impl DevOpsClient {
    // =============================================================================
    // Pipeline Lookup
    // =============================================================================

    /// List all pipelines of a project
    ///
    /// Follows continuation tokens until the service stops returning one, so
    /// the result is the complete list in the order the service returned it.
    /// A token that was already followed ends the listing.
    ///
    /// # Arguments
    /// * `project` - Project name or ID
    pub async fn list_pipelines(&self, project: &str) -> Result<Vec<Pipeline>> {
        let url = self.endpoint(project, &["pipelines"])?;
        let mut pipelines = Vec::new();
        let mut continuation: Option<String> = None;
        let mut seen = HashSet::new();

        loop {
            let mut request = self.get(url.clone());
            if let Some(token) = &continuation {
                request = request.query(&[("continuationToken", token)]);
            }
            let response = request.send().await?;

            let header = response
                .headers()
                .get(CONTINUATION_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok());
            let next = next_page_token(&mut seen, header);

            let page: PipelineList = self.handle_response(response).await?;
            debug!(project, count = page.value.len(), "Fetched pipeline page");
            pipelines.extend(page.value);

            match next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(pipelines)
    }
}

/// Token of the page to fetch next; `None` when the listing is complete
fn next_page_token(seen: &mut HashSet<String>, header: Option<&str>) -> Option<String> {
    let token = header.filter(|token| !token.is_empty())?;
    if !seen.insert(token.to_string()) {
        debug!(token, "Continuation token repeated, stopping");
        return None;
    }
    Some(token.to_string())
}
