pub mod cli;
pub mod error;
pub mod output;
pub mod runner;

pub use urlrecon_match::{
    match_all, reconcile, Candidate, MatchRecord, Pattern, Reconciliation, Template,
};
pub use urlrecon_table::{read_log, read_templates, write_results, LogTable, OutputColumns, Row};
