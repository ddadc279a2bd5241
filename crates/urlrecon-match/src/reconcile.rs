//! Matching a template catalog against a log of observed URLs.

use crate::matcher::{MatchError, MatchResult, Pattern};

/// An observed URL plus the log row it came from.
///
/// `url` is `None` when the row had no value in the URL column; such
/// candidates never match.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<R> {
    pub url: Option<String>,
    pub row: R,
}

impl<R> Candidate<R> {
    pub fn new(url: impl Into<String>, row: R) -> Self {
        Self {
            url: Some(url.into()),
            row,
        }
    }

    pub fn absent(row: R) -> Self {
        Self { url: None, row }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord<'a, R> {
    pub template: &'a str,
    pub candidate: &'a str,
    pub bound: String,
    pub row: &'a R,
}

/// Matches one template against every candidate, in candidate order.
pub fn match_template<'a, R>(
    template: &'a str,
    candidates: &'a [Candidate<R>],
) -> Result<Vec<MatchRecord<'a, R>>, MatchError> {
    let pattern = Pattern::new(template)?;
    let mut records = Vec::new();

    for candidate in candidates {
        let Some(url) = candidate.url.as_deref() else {
            continue;
        };

        if let MatchResult::Match(captures) = pattern.match_extract(url) {
            let values: Vec<&str> = captures.iter().map(|c| c.value.as_str()).collect();
            records.push(MatchRecord {
                template,
                candidate: url,
                bound: pattern.template().bind(&values),
                row: &candidate.row,
            });
        }
    }

    Ok(records)
}

/// Matches every template against every candidate.
///
/// Records are ordered by template, then by candidate. Absent templates and
/// templates whose pattern cannot be compiled contribute nothing.
pub fn match_all<'a, T, R>(
    templates: &'a [Option<T>],
    candidates: &'a [Candidate<R>],
) -> Vec<MatchRecord<'a, R>>
where
    T: AsRef<str>,
{
    reconcile(templates, candidates).records
}

/// The result of matching a single template slot.
#[derive(Debug)]
pub struct Shard<'a, R> {
    pub index: usize,
    pub template: Option<&'a str>,
    pub result: Result<Vec<MatchRecord<'a, R>>, MatchError>,
}

pub fn match_shard<'a, R>(
    index: usize,
    template: Option<&'a str>,
    candidates: &'a [Candidate<R>],
) -> Shard<'a, R> {
    let result = match template {
        Some(template) => match_template(template, candidates),
        None => Ok(Vec::new()),
    };
    Shard {
        index,
        template,
        result,
    }
}

#[derive(Debug)]
pub struct TemplateOutcome<'a> {
    /// Position of the template in the input sequence.
    pub index: usize,
    pub template: &'a str,
    pub matches: usize,
    pub error: Option<MatchError>,
}

#[derive(Debug)]
pub struct Reconciliation<'a, R> {
    pub records: Vec<MatchRecord<'a, R>>,
    pub outcomes: Vec<TemplateOutcome<'a>>,
    pub skipped_templates: usize,
}

impl<'a, R> Reconciliation<'a, R> {
    /// Templates that compiled but matched no candidate.
    pub fn unmatched(&self) -> impl Iterator<Item = &TemplateOutcome<'a>> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_none() && o.matches == 0)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TemplateOutcome<'a>> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }
}

impl<'a, R> Default for Reconciliation<'a, R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            outcomes: Vec::new(),
            skipped_templates: 0,
        }
    }
}

/// Shards must arrive in template order for the records to come out in
/// template order.
impl<'a, R> FromIterator<Shard<'a, R>> for Reconciliation<'a, R> {
    fn from_iter<I: IntoIterator<Item = Shard<'a, R>>>(iter: I) -> Self {
        let mut reconciliation = Reconciliation::default();

        for shard in iter {
            let Some(template) = shard.template else {
                reconciliation.skipped_templates += 1;
                continue;
            };

            match shard.result {
                Ok(records) => {
                    reconciliation.outcomes.push(TemplateOutcome {
                        index: shard.index,
                        template,
                        matches: records.len(),
                        error: None,
                    });
                    reconciliation.records.extend(records);
                }
                Err(error) => reconciliation.outcomes.push(TemplateOutcome {
                    index: shard.index,
                    template,
                    matches: 0,
                    error: Some(error),
                }),
            }
        }

        reconciliation
    }
}

pub fn reconcile<'a, T, R>(
    templates: &'a [Option<T>],
    candidates: &'a [Candidate<R>],
) -> Reconciliation<'a, R>
where
    T: AsRef<str>,
{
    templates
        .iter()
        .enumerate()
        .map(|(index, template)| match_shard(index, template.as_ref().map(T::as_ref), candidates))
        .collect()
}
