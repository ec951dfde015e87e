use crate::convert::preview::PreviewReport;
use crate::convert::ConversionReport;
use std::fmt;

/// Text report formatter for a conversion run
pub struct TextReport<'a> {
    report: &'a ConversionReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a ConversionReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Summary")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Artifacts:      {}", self.report.artifacts.len())?;
        writeln!(f, "Skipped:        {}", self.report.skipped.len())?;
        writeln!(f, "Failed:         {}", self.report.failures.len())?;
        writeln!(f, "Log images:     {}", self.report.log_images.len())?;
        writeln!(
            f,
            "Elapsed:        {:.1}s",
            self.report.elapsed.as_secs_f64()
        )?;
        if self.report.cancelled {
            writeln!(f, "Cancelled:      yes")?;
        }

        if !self.report.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures")?;
            writeln!(f, "--------")?;
            for (file, reason) in &self.report.failures {
                writeln!(f, "{}: {}", file, reason)?;
            }
        }

        write_log_images(f, &self.report.log_images)
    }
}

/// Text report formatter for a preview run
pub struct PreviewTextReport<'a> {
    report: &'a PreviewReport,
}

impl<'a> PreviewTextReport<'a> {
    /// Creates a new preview report
    pub fn new(report: &'a PreviewReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for PreviewTextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Preview Summary")?;
        writeln!(f, "===============")?;
        writeln!(f)?;
        writeln!(f, "Written:        {}", self.report.written.len())?;
        writeln!(f, "Failed:         {}", self.report.failures.len())?;
        writeln!(
            f,
            "Elapsed:        {:.1}s",
            self.report.elapsed.as_secs_f64()
        )?;

        write_log_images(f, &self.report.log_images)
    }
}

fn write_log_images(f: &mut fmt::Formatter<'_>, files: &[String]) -> fmt::Result {
    if files.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Logarithmic intensity")?;
    writeln!(f, "---------------------")?;
    for file in files {
        writeln!(f, "{}", file)?;
    }
    Ok(())
}
