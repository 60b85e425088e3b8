//! California notice to pay rent or quit.

use super::{money, SectionBuilder, TemplateContext};
use crate::document::section::{field_line, Section};

pub struct CaPayRentOrQuitBuilder;

impl SectionBuilder for CaPayRentOrQuitBuilder {
    fn name(&self) -> &'static str {
        "ca_pay_rent_or_quit"
    }

    fn build(&self, ctx: &TemplateContext) -> Vec<Section> {
        let draft = &ctx.draft;

        let rent = match draft.number("rent_amount") {
            Some(v) => money(v),
            None => draft.text("rent_amount"),
        };

        let meta = Section::new(
            ctx.title_or("Pay Rent or Quit"),
            vec![
                field_line("case_id", &ctx.case_id),
                field_line("document_type_id", &ctx.doc_type_id),
                field_line("status", &ctx.status),
                field_line("generated_at", ctx.generated_display()),
            ],
        );

        let parties = Section::new(
            "Parties / Property",
            vec![
                field_line("tenant_name", draft.text("tenant_name")),
                field_line("landlord_name", draft.text("landlord_name")),
                field_line("property_address", draft.text("property_address")),
            ],
        );

        let demand = Section::new(
            "Amount Due",
            vec![
                field_line("rent_amount", &rent),
                field_line("rent_due_date", draft.date("rent_due_date")),
                field_line("notice_date", draft.date("notice_date")),
                String::new(),
                format!(
                    "Within three (3) days after service of this notice, pay the rent due of {} or deliver possession of the premises.",
                    if rent.is_empty() { "________" } else { rent.as_str() }
                ),
            ],
        );

        let instructions = draft.text("payment_instructions");
        let payment = Section::new(
            "Payment Instructions",
            if instructions.trim().is_empty() {
                vec!["(none provided)".to_string()]
            } else {
                instructions.lines().map(str::to_string).collect()
            },
        );

        vec![meta, parties, demand, payment]
    }
}
