//! Static HTML assembly for the closing report.

use chrono::{DateTime, Utc};

use super::MAX_IMAGES_PER_SECTION;
use super::types::RenderedSection;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 20px; }\n\
table { width: 100%; border-collapse: collapse; margin-top: 20px; }\n\
td, th { border: 1px solid #666; padding: 8px; text-align: left; }\n\
img { border-radius: 8px; border: 1px solid #ccc; width: 120px; height: 120px; object-fit: cover; }\n\
img.logo { object-fit: contain; border-color: #666; }\n\
div.images-row { display: flex; gap: 10px; }";

/// Render the full report document.
///
/// Pure string assembly: every image payload was fetched beforehand. A
/// section that required evidence but has no surviving images falls back to
/// the logo when one is available, otherwise renders no image element.
/// Sections that never required evidence get no image element at all.
#[must_use]
pub fn render_document(
    employee_name: &str,
    generated_at: DateTime<Utc>,
    logo: Option<&str>,
    sections: &[RenderedSection],
) -> String {
    let mut rows = String::new();
    for section in sections {
        let status = if section.done { "\u{2705}" } else { "\u{274c}" };
        rows.push_str(&format!(
            "<tr>\n<td class=\"task\">{}</td>\n<td class=\"status\">{status}</td>\n<td class=\"images\">{}</td>\n</tr>\n",
            escape_html(&section.text),
            section_images(section, logo),
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\" />\n\
         <title>Branch Closing Report</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h2>Branch Closing Report</h2>\n\
         <p><strong>Employee:</strong> {}</p>\n\
         <p><strong>Date:</strong> {}</p>\n\
         <table>\n<thead><tr><th>Task</th><th>Status</th><th>Photos</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>\n</body>\n</html>\n",
        escape_html(employee_name),
        generated_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Image cell markup for one section.
fn section_images(section: &RenderedSection, logo: Option<&str>) -> String {
    if !section.require_image {
        return String::new();
    }

    if section.images.is_empty() {
        return logo.map_or_else(String::new, logo_element);
    }

    let imgs: String = section
        .images
        .iter()
        .take(MAX_IMAGES_PER_SECTION)
        .map(|payload| format!("<img src=\"data:image/jpeg;base64,{payload}\" alt=\"evidence\" />"))
        .collect();

    format!("<div class=\"images-row\">{imgs}</div>")
}

fn logo_element(payload: &str) -> String {
    format!("<img class=\"logo\" src=\"data:image/png;base64,{payload}\" alt=\"No photo\" />")
}

/// Minimal HTML escaping for user-entered text.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
