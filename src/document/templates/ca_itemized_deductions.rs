//! California itemized statement of security deposit deductions.
//!
//! Deduction rows are stored flat in the draft as `deduction_<n>_description`
//! and `deduction_<n>_amount`.

use std::collections::BTreeSet;

use super::{money, SectionBuilder, TemplateContext};
use crate::document::draft::DraftRecord;
use crate::document::section::{field_line, Section};

pub struct CaItemizedDeductionsBuilder;

/// One deduction row read back from the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Deduction {
    pub index: u32,
    pub description: String,
    pub amount: Option<f64>,
    pub raw_amount: String,
}

/// Collect deduction rows in ascending index order.
pub fn deductions(draft: &DraftRecord) -> Vec<Deduction> {
    let indices: BTreeSet<u32> = draft
        .keys()
        .filter_map(|key| {
            let rest = key.strip_prefix("deduction_")?;
            let (index, field) = rest.split_once('_')?;
            matches!(field, "description" | "amount")
                .then(|| index.parse::<u32>().ok())
                .flatten()
        })
        .collect();

    indices
        .into_iter()
        .map(|index| {
            let amount_key = format!("deduction_{}_amount", index);
            Deduction {
                index,
                description: draft.text(&format!("deduction_{}_description", index)),
                amount: draft.number(&amount_key),
                raw_amount: draft.text(&amount_key),
            }
        })
        .filter(|d| !d.description.trim().is_empty() || !d.raw_amount.trim().is_empty())
        .collect()
}

impl SectionBuilder for CaItemizedDeductionsBuilder {
    fn name(&self) -> &'static str {
        "ca_itemized_deductions_statement"
    }

    fn build(&self, ctx: &TemplateContext) -> Vec<Section> {
        let draft = &ctx.draft;

        let header = Section::new(
            ctx.title_or("Itemized Deductions Statement"),
            vec![
                "NoticePack PDF (template: CA / Itemized Deductions Statement)".to_string(),
                String::new(),
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
                field_line("notice_date", draft.date("notice_date")),
            ],
        );

        let rows = deductions(draft);
        let mut lines = Vec::new();
        if rows.is_empty() {
            lines.push("(no deductions entered)".to_string());
        }
        for row in &rows {
            let amount = match row.amount {
                Some(v) => money(v),
                None => row.raw_amount.clone(),
            };
            lines.push(format!("{}. {}: {}", row.index, row.description, amount));
        }

        let total = rows.iter().filter_map(|r| r.amount).fold(0.0, |acc, v| acc + v);
        lines.push(String::new());
        lines.push(field_line("Total deductions", money(total)));
        if let Some(deposit) = draft.number("deposit_amount") {
            lines.push(field_line("Security deposit", money(deposit)));
            let remaining = deposit - total;
            if remaining < 0.0 {
                lines.push(field_line("Amount owed by tenant", money(-remaining)));
            } else {
                lines.push(field_line("Amount to be returned", money(remaining)));
            }
        }

        vec![header, parties, Section::new("Deductions", lines)]
    }
}
