//! Stable identifiers for template lookup: jurisdictions and document kinds.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref STATE_CODE: Regex = Regex::new(r"^[A-Z]{2}$").expect("valid state code pattern");
}

/// Two-letter US state code, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn ca() -> Self {
        Self("CA".to_string())
    }

    /// Parse a state code; returns `None` for anything that is not two letters.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        STATE_CODE.is_match(&code).then(|| Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document kinds known to the template registry and the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    NoticeOfNonRenewal,
    ItemizedDeductionsStatement,
    PayRentOrQuit,
    LateRentReminder,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::NoticeOfNonRenewal,
        DocumentKind::ItemizedDeductionsStatement,
        DocumentKind::PayRentOrQuit,
        DocumentKind::LateRentReminder,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            DocumentKind::NoticeOfNonRenewal => "notice_of_non_renewal",
            DocumentKind::ItemizedDeductionsStatement => "itemized_deductions_statement",
            DocumentKind::PayRentOrQuit => "pay_rent_or_quit",
            DocumentKind::LateRentReminder => "late_rent_reminder",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DocumentKind::NoticeOfNonRenewal => "Notice of Non-Renewal",
            DocumentKind::ItemizedDeductionsStatement => "Itemized Deductions Statement",
            DocumentKind::PayRentOrQuit => "Pay Rent or Quit",
            DocumentKind::LateRentReminder => "Late Rent Reminder",
        }
    }

    /// Exact lookup by slug. Display names are accepted after normalisation,
    /// so "Notice of Non-Renewal" and "notice_of_non_renewal" are the same key,
    /// but "Draft Notice of Non-Renewal v2" is not.
    pub fn from_slug(value: &str) -> Option<Self> {
        let key = normalize_key(value);
        Self::ALL.into_iter().find(|kind| kind.slug() == key)
    }

    /// Resolve the kind of a stored document type: an explicit slug wins over
    /// the display name.
    pub fn resolve(slug: Option<&str>, display_name: &str) -> Option<Self> {
        slug.filter(|s| !s.trim().is_empty())
            .and_then(Self::from_slug)
            .or_else(|| Self::from_slug(display_name))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Lower-case, with every run of non-alphanumerics collapsed to `_`.
pub fn normalize_key(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}
