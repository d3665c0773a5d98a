use crate::error::Result;
use crate::export::render::render_cell;
use crate::types::{ExportArtifact, ExportConfig, FieldSet, LineEnding, NormalizedRecord};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;
use std::io;
use std::path::Path;

/// Renders normalized records as quote-all, delimiter-separated text
pub struct TabularSerializer {
    config: ExportConfig,
}

impl TabularSerializer {
    pub fn new(config: ExportConfig) -> Self {
        TabularSerializer { config }
    }

    /// Render the records and package them as an artifact for `export_dir/file`.
    ///
    /// The export directory is created (recursively, idempotently) before the
    /// artifact is returned.
    pub fn serialize<P: AsRef<Path>>(
        &self,
        records: &[NormalizedRecord],
        fields: &FieldSet,
        export_dir: P,
        file: &str,
    ) -> Result<ExportArtifact> {
        let export_dir = export_dir.as_ref();
        if let Err(err) = std::fs::create_dir_all(export_dir) {
            tracing::error!(path = %export_dir.display(), error = %err, "Failed to create export directory");
            return Err(err.into());
        }

        let text = self.render(records, fields)?;

        Ok(ExportArtifact {
            text,
            file: file.to_string(),
            export_path: export_dir.to_path_buf(),
        })
    }

    /// Render the records as CSV text, columns in sorted path order
    pub fn render(&self, records: &[NormalizedRecord], fields: &FieldSet) -> Result<String> {
        self.config.validate()?;

        let columns = fields.sorted();
        let mut writer = WriterBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .quote(self.config.quote as u8)
            .quote_style(QuoteStyle::Always)
            .double_quote(true)
            .terminator(match self.config.line_ending {
                LineEnding::Lf => Terminator::Any(b'\n'),
                LineEnding::Crlf => Terminator::CRLF,
            })
            .from_writer(Vec::new());

        if columns.is_empty() {
            return Ok(String::new());
        }

        if self.config.include_header {
            writer.write_record(&columns)?;
        }

        for record in records {
            let row = columns.iter().map(|path| {
                get_by_dot_path(record, path, &self.config.path_separator)
                    .map(render_cell)
                    .unwrap_or_default()
            });
            writer.write_record(row)?;
        }

        let bytes = writer.into_inner().map_err(|err| err.into_error())?;
        let text = String::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        tracing::debug!(rows = records.len(), columns = columns.len(), "Rendered CSV");
        Ok(text)
    }
}

/// Walk a separator-joined path through a record.
///
/// Objects are entered by key, arrays by numeric index. Any missing step
/// resolves to `None`.
pub fn get_by_dot_path<'a>(
    record: &'a NormalizedRecord,
    path: &str,
    separator: &str,
) -> Option<&'a Value> {
    let mut segments = path.split(separator);
    let mut current = record.get(segments.next()?)?;

    for segment in segments {
        current = match current {
            Value::Object(obj) => obj.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}
