//! Generic template used when no dedicated builder is registered.

use super::{SectionBuilder, TemplateContext};
use crate::document::section::{field_line, Section};

/// Maximum number of draft keys dumped into the details section.
pub const MAX_DRAFT_KEYS: usize = 40;

pub struct FallbackBuilder;

impl SectionBuilder for FallbackBuilder {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn build(&self, ctx: &TemplateContext) -> Vec<Section> {
        let draft = &ctx.draft;

        let state = match ctx.state_display() {
            Some(code) => format!("State: {}", code),
            None => "State: (unknown)".to_string(),
        };

        let meta = Section::new(
            ctx.title_or("Document"),
            vec![
                "NoticePack — Generated PDF".to_string(),
                String::new(),
                field_line("Case ID", &ctx.case_id),
                field_line("Document Type ID", &ctx.doc_type_id),
                state,
                field_line("Status", &ctx.status),
                field_line("Generated", ctx.generated_display()),
            ],
        );

        let parties = Section::new(
            "Parties / Property (best-effort)",
            vec![
                field_line("Tenant", draft.text("tenant_name")),
                field_line("Landlord", draft.text("landlord_name")),
                field_line("Property Address", draft.text("property_address")),
                field_line("Notice Date", draft.date("notice_date")),
                field_line("Move-out Date", draft.date("move_out_date")),
            ],
        );

        let total = draft.len();
        let mut lines: Vec<String> = draft
            .keys()
            .take(MAX_DRAFT_KEYS)
            .map(|k| field_line(k, draft.text(k)))
            .collect();
        if lines.is_empty() {
            lines.push("(no draft fields)".to_string());
        }
        if total > MAX_DRAFT_KEYS {
            lines.push(String::new());
            lines.push(format!("(Showing {} of {} keys)", MAX_DRAFT_KEYS, total));
        }
        let details = Section::new(format!("Draft Fields (first {})", MAX_DRAFT_KEYS), lines);

        vec![meta, parties, details]
    }
}
