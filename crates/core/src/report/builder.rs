//! Best-effort image collection for the report.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use tracing::warn;

use super::MAX_IMAGES_PER_SECTION;
use super::renderer::render_document;
use super::types::RenderedSection;
use crate::checklist::ChecklistItem;
use crate::store::{StoreClient, StoreError};

/// Builds the closing report for one submission.
///
/// Rendering itself is pure; this type owns the network half: it re-downloads
/// each referenced evidence photo (and the fallback logo) through the store
/// client before handing everything to the renderer. Every fetch is an
/// individual `Result` and failures are filtered out - a missing photo never
/// aborts the report, which is why `build` is infallible.
pub struct ReportBuilder {
    store: Arc<StoreClient>,
}

impl ReportBuilder {
    /// Create a new report builder.
    #[must_use]
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Assemble the report document for a submission.
    ///
    /// Fetches at most [`MAX_IMAGES_PER_SECTION`] photos per section, one at
    /// a time, then renders the HTML.
    pub async fn build(
        &self,
        token: &str,
        folder_name: &str,
        employee_name: &str,
        sections: &[ChecklistItem],
    ) -> String {
        let logo = self.fetch_logo(token).await;

        let mut rows = Vec::with_capacity(sections.len());
        for section in sections {
            let images = if section.require_image {
                self.fetch_section_images(token, folder_name, &section.images)
                    .await
            } else {
                Vec::new()
            };

            rows.push(RenderedSection {
                text: section.text.clone(),
                done: section.done,
                require_image: section.require_image,
                images,
            });
        }

        render_document(employee_name, Utc::now(), logo.as_deref(), &rows)
    }

    /// Download the fallback logo, if the branch has one configured.
    async fn fetch_logo(&self, token: &str) -> Option<String> {
        let path = self.store.config().logo_path();
        match self.store.download(token, &path).await {
            Ok(bytes) => Some(BASE64.encode(&bytes)),
            Err(e) => {
                warn!(path = %path, error = %e, "logo not available, skipping fallback image");
                None
            }
        }
    }

    /// Fetch up to the first [`MAX_IMAGES_PER_SECTION`] photos of a section.
    ///
    /// Each download is a `Result`; the failures are logged and the successes
    /// kept, so a half-missing folder still produces a report.
    async fn fetch_section_images(
        &self,
        token: &str,
        folder_name: &str,
        names: &[String],
    ) -> Vec<String> {
        let mut fetches: Vec<Result<String, StoreError>> = Vec::new();
        for name in names.iter().take(MAX_IMAGES_PER_SECTION) {
            let path = self.store.config().file_path(folder_name, name);
            let fetch = self
                .store
                .download(token, &path)
                .await
                .map(|bytes| BASE64.encode(&bytes));
            if let Err(e) = &fetch {
                warn!(path = %path, error = %e, "dropping evidence photo that failed to download");
            }
            fetches.push(fetch);
        }

        fetches.into_iter().filter_map(Result::ok).collect()
    }
}
