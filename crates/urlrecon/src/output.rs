use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use urlrecon_match::Reconciliation;
use urlrecon_table::XLSX_MAX_CELL_CHARS;

pub struct Output {
    stdout: StandardStream,
}

impl Output {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn set_bold_color(&mut self, color: Color) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stdout.reset();
    }

    pub fn print_phase(&mut self, message: &str) -> io::Result<()> {
        self.set_dim();
        writeln!(self.stdout, "{}", message)?;
        self.reset();
        self.stdout.flush()
    }

    pub fn print_inputs(&mut self, templates: usize, log_rows: usize) -> io::Result<()> {
        writeln!(
            self.stdout,
            "  {} template rows, {} log rows",
            templates, log_rows
        )
    }

    pub fn print_written(&mut self, path: &Path, clipped_cells: usize) -> io::Result<()> {
        writeln!(self.stdout, "Output written to {}", path.display())?;
        if clipped_cells > 0 {
            self.set_color(Color::Yellow);
            writeln!(
                self.stdout,
                "  {} cells clipped to {} characters",
                clipped_cells, XLSX_MAX_CELL_CHARS
            )?;
            self.reset();
        }
        Ok(())
    }

    /// `first_row` is the spreadsheet row number of template index 0.
    pub fn print_summary<R>(
        &mut self,
        reconciliation: &Reconciliation<'_, R>,
        first_row: usize,
        elapsed: Duration,
        verbose: bool,
    ) -> io::Result<()> {
        let unmatched: Vec<_> = reconciliation.unmatched().collect();
        let failed: Vec<_> = reconciliation.failed().collect();

        if verbose && !unmatched.is_empty() {
            writeln!(self.stdout)?;
            self.set_bold_color(Color::Yellow);
            writeln!(self.stdout, "Templates without matches:")?;
            self.reset();
            for outcome in &unmatched {
                self.set_color(Color::Yellow);
                write!(self.stdout, "✗")?;
                self.reset();
                writeln!(
                    self.stdout,
                    " row {}: {}",
                    first_row + outcome.index,
                    outcome.template
                )?;
            }
        }

        if !failed.is_empty() {
            writeln!(self.stdout)?;
            self.set_bold_color(Color::Red);
            writeln!(self.stdout, "Templates that could not be compiled:")?;
            self.reset();
            for outcome in &failed {
                self.set_color(Color::Red);
                write!(self.stdout, "⊘")?;
                self.reset();
                write!(
                    self.stdout,
                    " row {}: {}",
                    first_row + outcome.index,
                    outcome.template
                )?;
                if let Some(error) = &outcome.error {
                    self.set_dim();
                    write!(self.stdout, " ({})", error)?;
                    self.reset();
                }
                writeln!(self.stdout)?;
            }
        }

        let total = reconciliation.outcomes.len();
        let matched = total - unmatched.len() - failed.len();
        let records = reconciliation.records.len();

        writeln!(self.stdout)?;
        if records > 0 {
            self.set_bold_color(Color::Green);
        } else {
            self.set_bold_color(Color::Yellow);
        }
        write!(self.stdout, "{} matches", records)?;
        self.reset();
        writeln!(
            self.stdout,
            " from {}/{} templates in {:.2}s",
            matched,
            total,
            elapsed.as_secs_f64()
        )?;

        if reconciliation.skipped_templates > 0 {
            self.set_dim();
            writeln!(
                self.stdout,
                "{} empty template rows skipped",
                reconciliation.skipped_templates
            )?;
            self.reset();
        }

        if !verbose && !unmatched.is_empty() {
            self.set_dim();
            writeln!(
                self.stdout,
                "{} templates without matches (use --verbose to list them)",
                unmatched.len()
            )?;
            self.reset();
        }

        self.stdout.flush()
    }
}
