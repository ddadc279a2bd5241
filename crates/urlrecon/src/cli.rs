use clap::Parser;
use std::path::PathBuf;
use urlrecon_table::{OutputColumns, DEFAULT_TEMPLATE_COLUMN, DEFAULT_URL_COLUMN};

#[derive(Parser)]
#[command(
    name = "urlrecon",
    about = "Reconcile URL templates against a request log",
    version
)]
pub struct Cli {
    /// Spreadsheet (xlsx, xls, ods) or CSV file holding the URL templates
    pub templates: PathBuf,

    /// CSV request log holding the observed URLs
    pub log: PathBuf,

    /// Output file; .xlsx writes a workbook, anything else writes CSV
    #[arg(short, long, default_value = "results.xlsx")]
    pub output: PathBuf,

    /// Zero-based column of the templates
    #[arg(short = 't', long, default_value_t = DEFAULT_TEMPLATE_COLUMN)]
    pub template_column: usize,

    /// Zero-based column of the URL in the log
    #[arg(short = 'u', long, default_value_t = DEFAULT_URL_COLUMN)]
    pub url_column: usize,

    /// Field delimiter of the log (a single ASCII character, or "tab")
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Skip the first row of the template sheet
    #[arg(long)]
    pub skip_template_header: bool,

    /// Output header for the template column
    #[arg(long, default_value = "Swagger_url")]
    pub template_header: String,

    /// Output header for the matched URL column
    #[arg(long, default_value = "Target URL")]
    pub target_header: String,

    /// Output header for the bound template column
    #[arg(long, default_value = "Sanitized URL")]
    pub bound_header: String,

    /// Match templates sequentially instead of in parallel
    #[arg(short, long)]
    pub sequential: bool,

    /// List templates without matches
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn output_columns(&self) -> OutputColumns {
        OutputColumns {
            template: self.template_header.clone(),
            candidate: self.target_header.clone(),
            bound: self.bound_header.clone(),
        }
    }

    /// Spreadsheet row number of the first template, counting from 1.
    pub fn first_template_row(&self) -> usize {
        if self.skip_template_header {
            2
        } else {
            1
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("expected a single ASCII character, got '{}'", s)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["urlrecon", "templates.xlsx", "log.csv"]);
        assert_eq!(cli.template_column, 7);
        assert_eq!(cli.url_column, 14);
        assert_eq!(cli.delimiter, b',');
        assert_eq!(cli.output, PathBuf::from("results.xlsx"));
        assert_eq!(cli.output_columns(), OutputColumns::default());
        assert_eq!(cli.first_template_row(), 1);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("\u{e9}").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_header_overrides() {
        let cli = Cli::parse_from([
            "urlrecon",
            "t.csv",
            "l.csv",
            "--template-header",
            "Route",
            "--skip-template-header",
        ]);
        assert_eq!(cli.output_columns().template, "Route");
        assert_eq!(cli.output_columns().candidate, "Target URL");
        assert_eq!(cli.first_template_row(), 2);
    }
}
