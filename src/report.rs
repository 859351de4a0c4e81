use crate::error::LbmsError;
use crate::estimator::BinReport;
use std::io::Write;

/// Receives the finished per-bin reports for display or logging.
pub trait ReportSink {
    fn emit(&mut self, reports: &[BinReport]) -> Result<(), LbmsError>;
}

/// Human-readable table, one block per bin.
pub struct TableReport<W: Write> {
    writer: W,
}

impl<W: Write> TableReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TableReport<W> {
    fn emit(&mut self, reports: &[BinReport]) -> Result<(), LbmsError> {
        for report in reports {
            writeln!(self.writer, "MAX MESSAGE LENGTH: {}", report.max_length)?;
            writeln!(self.writer, "  {:<20}{:>16}{:>16}", "", "RAW", "DICT")?;
            writeln!(self.writer, "  {:<20}{:>16}{:>16}", "Count:", report.raw.count, report.dictionary.count)?;
            writeln!(self.writer, "  {:<20}{:>16.2}{:>16.2}", "Min:", report.raw.min, report.dictionary.min)?;
            writeln!(self.writer, "  {:<20}{:>16.2}{:>16.2}", "Max:", report.raw.max, report.dictionary.max)?;
            writeln!(self.writer, "  {:<20}{:>16.2}{:>16.2}", "Avg:", report.raw.mean, report.dictionary.mean)?;
            writeln!(self.writer, "  Compression Factor: {:.2}%", report.ratio)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON array of reports.
pub struct JsonReport<W: Write> {
    writer: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn emit(&mut self, reports: &[BinReport]) -> Result<(), LbmsError> {
        serde_json::to_writer_pretty(&mut self.writer, reports)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
