use crate::cli::Cli;
use crate::error::Result;
use crate::output::Output;
use rayon::prelude::*;
use std::time::Instant;
use urlrecon_match::{match_shard, reconcile, Candidate, Reconciliation, Shard};
use urlrecon_table::{read_log, read_templates, write_results};

/// Matches every template against every candidate, sharding templates across
/// the rayon pool unless `sequential` is set. Both paths produce records in
/// the same order.
pub fn reconcile_log<'a, R: Sync>(
    templates: &'a [Option<String>],
    candidates: &'a [Candidate<R>],
    sequential: bool,
) -> Reconciliation<'a, R> {
    if sequential || templates.len() <= 1 {
        return reconcile(templates, candidates);
    }

    let shards: Vec<Shard<'a, R>> = templates
        .par_iter()
        .enumerate()
        .map(|(index, template)| match_shard(index, template.as_deref(), candidates))
        .collect();

    shards.into_iter().collect()
}

pub fn run(cli: &Cli, output: &mut Output) -> Result<()> {
    output.print_phase("Reading input files...")?;
    let templates = read_templates(&cli.templates, cli.template_column, cli.skip_template_header)?;
    let log = read_log(&cli.log, cli.url_column, cli.delimiter)?;
    output.print_inputs(templates.len(), log.candidates.len())?;

    output.print_phase("Comparing URLs...")?;
    let start_time = Instant::now();
    let reconciliation = reconcile_log(&templates, &log.candidates, cli.sequential);
    let elapsed = start_time.elapsed();

    output.print_phase("Writing output...")?;
    let clipped = write_results(
        &cli.output,
        &cli.output_columns(),
        &log.headers,
        &reconciliation.records,
    )?;
    output.print_written(&cli.output, clipped)?;

    output.print_summary(&reconciliation, cli.first_template_row(), elapsed, cli.verbose)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates(items: &[&str]) -> Vec<Option<String>> {
        items.iter().map(|t| Some(t.to_string())).collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let templates = templates(&[
            "/v1/{{client}}/orders/{{id}}",
            "/v1/static",
            "/v1/{{client}}/{{resource}}",
            "/health",
        ]);
        let candidates: Vec<Candidate<usize>> = [
            "/v1/acme/orders/99",
            "/v1/static",
            "/V1/globex/invoices",
            "/health",
            "/other",
        ]
        .iter()
        .enumerate()
        .map(|(i, url)| Candidate::new(*url, i))
        .collect();

        let sequential = reconcile_log(&templates, &candidates, true);
        let parallel = reconcile_log(&templates, &candidates, false);

        assert_eq!(sequential.records, parallel.records);
        assert_eq!(parallel.records.len(), 5);
        assert_eq!(parallel.records[0].bound, "/v1/acme/orders/99");
        assert_eq!(parallel.records[2].bound, "/v1/acme/orders/99");
        assert_eq!(parallel.records[3].bound, "/v1/globex/invoices");
        assert_eq!(parallel.records[4].template, "/health");
    }

    #[test]
    fn test_skipped_templates_counted_in_parallel() {
        let templates = vec![None, Some("/a/{{x}}".to_string()), None];
        let candidates = vec![Candidate::new("/a/1", ())];

        let reconciliation = reconcile_log(&templates, &candidates, false);
        assert_eq!(reconciliation.skipped_templates, 2);
        assert_eq!(reconciliation.records.len(), 1);
        assert_eq!(reconciliation.outcomes[0].index, 1);
    }
}
