//! Compiled template patterns.

use crate::template::Template;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("failed to build pattern regex: {0}")]
    RegexBuild(#[from] regex::Error),
}

/// One placeholder occurrence bound to the text it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Match(Vec<Capture>),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match(_))
    }
}

/// A template compiled into an anchored, case-insensitive regex.
///
/// # Example
///
/// ```
/// use urlrecon_match::{MatchResult, Pattern};
///
/// let pattern = Pattern::new("/v1/{{client}}/orders/{{id}}").unwrap();
///
/// match pattern.match_extract("/V1/acme/orders/99") {
///     MatchResult::Match(captures) => {
///         assert_eq!(captures[0].value, "acme");
///         assert_eq!(captures[1].value, "99");
///     }
///     MatchResult::NoMatch => panic!("expected match"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    template: Template,
    regex: Regex,
}

impl Pattern {
    pub fn new(template: impl Into<String>) -> Result<Self, MatchError> {
        Self::from_template(Template::parse(template))
    }

    pub fn from_template(template: Template) -> Result<Self, MatchError> {
        let regex = Regex::new(&template.regex_source())?;
        Ok(Self { template, regex })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    pub fn match_extract(&self, candidate: &str) -> MatchResult {
        let Some(caps) = self.regex.captures(candidate) else {
            return MatchResult::NoMatch;
        };

        debug_assert_eq!(caps.len() - 1, self.template.placeholder_count());

        let captures = self
            .template
            .placeholders()
            .zip(caps.iter().skip(1))
            .map(|(name, m)| Capture {
                name: name.to_string(),
                value: m.map_or("", |m| m.as_str()).to_string(),
            })
            .collect();

        MatchResult::Match(captures)
    }

    /// The template with its placeholders replaced by the values captured
    /// from `candidate`, or `None` when the candidate does not match.
    pub fn bind_match(&self, candidate: &str) -> Option<String> {
        match self.match_extract(candidate) {
            MatchResult::Match(captures) => {
                let values: Vec<&str> = captures.iter().map(|c| c.value.as_str()).collect();
                Some(self.template.bind(&values))
            }
            MatchResult::NoMatch => None,
        }
    }
}
