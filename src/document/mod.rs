//! Document generation: draft record → section model → PDF.
//!
//! - `draft` - defensive key/value access to user-entered fields
//! - `templates` - per-jurisdiction section builders and their registry
//! - `render` - page layout and PDF serialisation
//! - `wrap` / `date` - text helpers shared by templates and the renderer

pub mod date;
pub mod draft;
pub mod kind;
pub mod render;
pub mod section;
pub mod templates;
pub mod wrap;

pub use date::format_date;
pub use draft::{DraftRecord, DraftValue};
pub use kind::{DocumentKind, Jurisdiction};
pub use render::{render, RenderOptions};
pub use section::Section;
pub use templates::{SectionBuilder, TemplateContext, TemplateRegistry};
pub use wrap::wrap_line;

use thiserror::Error;

/// Errors raised while turning sections into PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode page content: {0}")]
    Encode(String),
    #[error("failed to write PDF: {0}")]
    Save(String),
    #[error("render task failed: {0}")]
    Task(String),
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    /// Name of the builder that produced the sections.
    pub template: &'static str,
}

/// Download filename: `<case-id>-<doc-type-id>.pdf`, sanitised.
pub fn pdf_filename(case_id: &str, doc_type_id: &str) -> String {
    let name = sanitize_filename::sanitize(format!("{}-{}.pdf", case_id, doc_type_id));
    if name.trim_end_matches(".pdf").trim_matches('-').is_empty() {
        "document.pdf".to_string()
    } else {
        name
    }
}

/// Select a builder for the context, build its sections and render them.
pub fn generate(
    registry: &TemplateRegistry,
    ctx: &TemplateContext,
) -> Result<GeneratedDocument, RenderError> {
    let builder = registry.select(ctx.jurisdiction.as_ref(), ctx.kind);
    let sections = builder.build(ctx);

    let options = RenderOptions {
        title: Some(ctx.title_or("Document")),
    };
    let pdf = render(&sections, &options)?;

    Ok(GeneratedDocument {
        filename: pdf_filename(&ctx.case_id, &ctx.doc_type_id),
        pdf,
        template: builder.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("abc", "def"), "abc-def.pdf");
        assert_eq!(pdf_filename("a/b", "c"), "ab-c.pdf");
        assert_eq!(pdf_filename("", ""), "document.pdf");
    }

    #[test]
    fn test_generate_ca_notice() {
        let ctx = TemplateContext {
            case_id: "case-1".into(),
            doc_type_id: "doc-1".into(),
            doc_name: "Notice of Non-Renewal".into(),
            status: "draft".into(),
            generated_at: None,
            state_code: Some("CA".into()),
            jurisdiction: Jurisdiction::parse("CA"),
            kind: DocumentKind::from_slug("Notice of Non-Renewal"),
            draft: DraftRecord::from_json(json!({
                "tenant_name": "Jane Tenant",
                "notice_date": "2024-01-05"
            })),
        };

        let doc = generate(&TemplateRegistry::with_defaults(), &ctx).unwrap();
        assert_eq!(doc.template, "ca_notice_of_non_renewal");
        assert_eq!(doc.filename, "case-1-doc-1.pdf");
        assert!(doc.pdf.starts_with(b"%PDF-"));

        let pdf = lopdf::Document::load_mem(&doc.pdf).unwrap();
        let text = pdf.extract_text(&[1]).unwrap();
        for expected in [
            "Case + Document",
            "Notice of Non-Renewal Fields (from draft)",
            "Notice",
            "Jane Tenant",
            "notice_date: Jan 05, 2024",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in {text:?}");
        }
    }

    #[test]
    fn test_generate_unknown_kind_uses_fallback() {
        let ctx = TemplateContext {
            case_id: "case-2".into(),
            doc_type_id: "doc-9".into(),
            doc_name: "Entry Notice".into(),
            jurisdiction: Jurisdiction::parse("CA"),
            ..TemplateContext::default()
        };
        let doc = generate(&TemplateRegistry::with_defaults(), &ctx).unwrap();
        assert_eq!(doc.template, "fallback");
    }
}
