//! California notice of non-renewal.

use super::{SectionBuilder, TemplateContext};
use crate::document::date::format_date;
use crate::document::section::{field_line, Section};

/// Older drafts saved the notice date under a misspelled key.
const NOTICE_DATE_KEYS: [&str; 2] = ["notice_date", "otice_date"];

pub struct CaNoticeOfNonRenewalBuilder;

impl SectionBuilder for CaNoticeOfNonRenewalBuilder {
    fn name(&self) -> &'static str {
        "ca_notice_of_non_renewal"
    }

    fn build(&self, ctx: &TemplateContext) -> Vec<Section> {
        let draft = &ctx.draft;
        let notice_date = format_date(&draft.text_any(&NOTICE_DATE_KEYS));
        let move_out_date = draft.date("move_out_date");
        let tenant = draft.text("tenant_name");
        let landlord = draft.text("landlord_name");
        let address = draft.text("property_address");

        let status = if ctx.status.trim().is_empty() {
            "unknown"
        } else {
            ctx.status.as_str()
        };

        let case_section = Section::new(
            "Case + Document",
            vec![
                field_line("case_id", &ctx.case_id),
                field_line("document_type_id", &ctx.doc_type_id),
                field_line("document_name", &ctx.doc_name),
                field_line("status", status),
                field_line("generated_at", ctx.generated_display()),
            ],
        );

        let fields = Section::new(
            "Notice of Non-Renewal Fields (from draft)",
            vec![
                field_line("tenant_name", &tenant),
                field_line("property_address", &address),
                field_line("notice_date", &notice_date),
                field_line("move_out_date", &move_out_date),
                field_line("landlord_name", &landlord),
                field_line("landlord_phone", draft.text("landlord_phone")),
                field_line("landlord_email", draft.text("landlord_email")),
            ],
        );

        let mut body = vec![
            format!("To: {}", or_blank(&tenant)),
            format!("Premises: {}", or_blank(&address)),
            String::new(),
            format!(
                "You are hereby notified that the tenancy of the premises above will not be renewed and will terminate on {}.",
                or_blank(&move_out_date)
            ),
            "You are required to vacate and surrender possession of the premises on or before that date.".to_string(),
            String::new(),
            format!("Dated: {}", or_blank(&notice_date)),
            format!("Landlord: {}", or_blank(&landlord)),
        ];
        let contact = [draft.text("landlord_phone"), draft.text("landlord_email")]
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>();
        if !contact.is_empty() {
            body.push(format!("Contact: {}", contact.join(" / ")));
        }

        vec![case_section, fields, Section::new("Notice", body)]
    }
}

fn or_blank(value: &str) -> &str {
    if value.is_empty() {
        "________________"
    } else {
        value
    }
}
