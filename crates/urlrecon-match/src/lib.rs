//! Template matching for URL reconciliation.
//!
//! Templates are URLs with `{{name}}` placeholders. Each template is compiled
//! into an anchored, case-insensitive regex where every placeholder becomes a
//! non-greedy capture. Matching a template against a log of observed URLs
//! recovers the value bound to each placeholder occurrence.
//!
//! # Example
//!
//! ```
//! use urlrecon_match::{match_all, Candidate};
//!
//! let templates = vec![Some("/v1/{{client}}/orders/{{id}}")];
//! let candidates = vec![
//!     Candidate::new("/v1/acme/orders/99", "ok"),
//!     Candidate::new("/v1/acme/invoices/99", "ok"),
//! ];
//!
//! let records = match_all(&templates, &candidates);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].candidate, "/v1/acme/orders/99");
//! assert_eq!(records[0].bound, "/v1/acme/orders/99");
//! assert_eq!(*records[0].row, "ok");
//! ```

mod matcher;
mod reconcile;
mod template;

pub use matcher::{Capture, MatchError, MatchResult, Pattern};
pub use reconcile::{
    match_all, match_shard, match_template, reconcile, Candidate, MatchRecord, Reconciliation,
    Shard, TemplateOutcome,
};
pub use template::{parse_segments, Segment, Template};
