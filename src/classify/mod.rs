//! Page classification: first-pass suggestions, review plans and field
//! inheritance.
//!
//! The suggestion pass runs before review and only seeds the editable plan.
//! After review, the [`Resolver`] computes each page's effective fields from
//! the confirmed modes.

mod date;
mod inherit;
mod plan;
mod suggest;

pub use date::{from_yymmdd, is_yymmdd, to_yymmdd, today_yymmdd};
pub use inherit::{
    is_editable, resolve_field, rule, FieldRule, ModeSet, ResolvedFields, Resolver, FIELD_RULES,
};
pub use plan::{PlanEntry, ReviewPlan};
pub use suggest::{
    CategoryRef, Suggester, Suggestion, DEFAULT_MINOR_CATEGORY, ENVELOPE_DOCUMENT_TYPE,
};
