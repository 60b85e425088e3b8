//! Section builders for each supported (jurisdiction, document) pair.
//!
//! Every builder is a pure function of a [`TemplateContext`]. Builders are
//! looked up in a [`TemplateRegistry`] by stable keys; anything without a
//! dedicated builder goes through [`FallbackBuilder`].

pub mod ca_itemized_deductions;
pub mod ca_notice_of_non_renewal;
pub mod ca_pay_rent_or_quit;
pub mod fallback;

use std::collections::HashMap;

use super::date::format_date;
use super::draft::DraftRecord;
use super::kind::{DocumentKind, Jurisdiction};
use super::section::Section;

pub use ca_itemized_deductions::CaItemizedDeductionsBuilder;
pub use ca_notice_of_non_renewal::CaNoticeOfNonRenewalBuilder;
pub use ca_pay_rent_or_quit::CaPayRentOrQuitBuilder;
pub use fallback::FallbackBuilder;

/// Everything a builder may read.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub case_id: String,
    pub doc_type_id: String,
    pub doc_name: String,
    pub status: String,
    pub generated_at: Option<String>,
    /// State code exactly as stored, for display when it does not parse.
    pub state_code: Option<String>,
    pub jurisdiction: Option<Jurisdiction>,
    pub kind: Option<DocumentKind>,
    pub draft: DraftRecord,
}

impl TemplateContext {
    /// Generation timestamp rendered as `Mon DD, YYYY`.
    pub fn generated_display(&self) -> String {
        format_date(self.generated_at.as_deref().unwrap_or_default())
    }

    /// Parsed jurisdiction code, else the raw stored code when non-blank.
    pub fn state_display(&self) -> Option<String> {
        match &self.jurisdiction {
            Some(j) => Some(j.to_string()),
            None => self
                .state_code
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Document display name, or `default` when the name is blank.
    pub fn title_or(&self, default: &str) -> String {
        if self.doc_name.trim().is_empty() {
            default.to_string()
        } else {
            self.doc_name.clone()
        }
    }
}

/// US dollar amount with two decimals; negative zero prints as `$0.00`.
pub fn money(value: f64) -> String {
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("${:.2}", value)
}

/// Maps a context to a section model.
pub trait SectionBuilder: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn build(&self, ctx: &TemplateContext) -> Vec<Section>;
}

/// Explicit `(jurisdiction, kind) -> builder` table.
pub struct TemplateRegistry {
    builders: HashMap<(Jurisdiction, DocumentKind), Box<dyn SectionBuilder>>,
    fallback: FallbackBuilder,
}

impl TemplateRegistry {
    /// An empty registry: every lookup falls back.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
            fallback: FallbackBuilder,
        }
    }

    /// Registry with all built-in templates.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            Jurisdiction::ca(),
            DocumentKind::NoticeOfNonRenewal,
            CaNoticeOfNonRenewalBuilder,
        );
        registry.register(
            Jurisdiction::ca(),
            DocumentKind::ItemizedDeductionsStatement,
            CaItemizedDeductionsBuilder,
        );
        registry.register(
            Jurisdiction::ca(),
            DocumentKind::PayRentOrQuit,
            CaPayRentOrQuitBuilder,
        );
        registry
    }

    pub fn register<B>(&mut self, jurisdiction: Jurisdiction, kind: DocumentKind, builder: B)
    where
        B: SectionBuilder + 'static,
    {
        self.builders.insert((jurisdiction, kind), Box::new(builder));
    }

    /// Builder for the pair, or the fallback when either part is unknown or
    /// unregistered.
    pub fn select(
        &self,
        jurisdiction: Option<&Jurisdiction>,
        kind: Option<DocumentKind>,
    ) -> &dyn SectionBuilder {
        let found = match (jurisdiction, kind) {
            (Some(j), Some(k)) => self.builders.get(&(j.clone(), k)),
            _ => None,
        };
        match found {
            Some(builder) => builder.as_ref(),
            None => &self.fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
