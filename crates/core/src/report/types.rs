//! Report rendering types.

/// One section of the report, ready for HTML assembly.
///
/// `images` holds base64-encoded payloads of the evidence photos that were
/// actually fetched - failed downloads have already been filtered out.
#[derive(Debug, Clone, Default)]
pub struct RenderedSection {
    /// Task description.
    pub text: String,
    /// Whether the employee marked the task done.
    pub done: bool,
    /// Whether the task required photo evidence.
    pub require_image: bool,
    /// Base64 payloads of the fetched evidence photos, in upload order.
    pub images: Vec<String>,
}
