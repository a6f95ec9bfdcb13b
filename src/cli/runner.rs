//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SearchArgs};
use crate::config::{load_config, Config};
use crate::error::{Error, Result, ResultExt};
use crate::output::{results_to_arrow, write_batch_to_parquet};
use crate::search::{Results, SearchParser};
use crate::types::SearchParameters;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Decode {
                search,
                format,
                output,
            } => self.decode(search, *format, output.as_deref()),
            Commands::Summary { search } => self.summary(search),
        }
    }

    /// Load settings, falling back to defaults when no file was given
    fn load_config(&self) -> Result<Config> {
        match &self.cli.config {
            Some(path) => {
                load_config(path).with_context(|| format!("Loading {}", path.display()))
            }
            None => Ok(Config::default()),
        }
    }

    /// Read and decode the response named on the command line
    fn parse(&self, search: &SearchArgs, config: &Config) -> Result<Results> {
        let body = fs::read_to_string(&search.input).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: search.input.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let mut params = SearchParameters::new(&search.resource, &search.class);
        if let Some(indicator) = &search.restricted_indicator {
            params = params.with_restricted_indicator(indicator);
        }

        let parser = SearchParser::with_config(config.decoder.clone());
        let results = parser.parse_str(&body, &params)?;

        info!(
            resource = results.resource(),
            class = results.class(),
            returned = results.returned_results_count(),
            total = ?results.total_results_count(),
            max_rows = results.is_max_rows_reached(),
            "Decoded search response"
        );
        Ok(results)
    }

    fn decode(&self, search: &SearchArgs, format: OutputFormat, output: Option<&Path>) -> Result<()> {
        let config = self.load_config()?;
        let results = self.parse(search, &config)?;

        match format {
            OutputFormat::Json => {
                let mut text = String::new();
                for record in &results {
                    text.push_str(&serde_json::to_string(record)?);
                    text.push('\n');
                }
                emit(output, &text)
            }
            OutputFormat::Pretty => {
                let mut text = serde_json::to_string_pretty(&results)?;
                text.push('\n');
                emit(output, &text)
            }
            OutputFormat::Csv => emit(output, &results.to_csv()),
            OutputFormat::Parquet => {
                let path = output
                    .ok_or_else(|| Error::config("Parquet output requires --output <file>"))?;
                let batch = results_to_arrow(&results)?;
                let rows = write_batch_to_parquet(path, &batch, &config.output)?;
                info!("Wrote {} rows to {}", rows, path.display());
                Ok(())
            }
        }
    }

    fn summary(&self, search: &SearchArgs) -> Result<()> {
        let config = self.load_config()?;
        let results = self.parse(search, &config)?;

        let summary = json!({
            "resource": results.resource(),
            "class": results.class(),
            "headers": results.headers(),
            "returned": results.returned_results_count(),
            "total": results.total_results_count(),
            "max_rows_reached": results.is_max_rows_reached(),
        });
        emit(None, &format!("{}\n", serde_json::to_string_pretty(&summary)?))
    }
}

/// Write text to a file or stdout
fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text).map_err(|e| {
            Error::output(format!("Failed to write '{}': {e}", path.display()))
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    const RESPONSE: &str = "<RETS ReplyCode=\"0\"><COUNT Records=\"2\"/><DELIMITER value=\"09\"/>\
<COLUMNS>\tId\tCity\t</COLUMNS><DATA>\t1\tA\t</DATA><DATA>\t2\tB\t</DATA></RETS>";

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_decode_to_csv_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("response.xml");
        let output = dir.path().join("out.csv");
        fs::write(&input, RESPONSE).unwrap();

        runner(&[
            "rets-search",
            "decode",
            "-i",
            input.to_str().unwrap(),
            "--class",
            "RES",
            "-f",
            "csv",
            "-o",
            output.to_str().unwrap(),
        ])
        .run()
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "Id,City\n1,A\n2,B\n");
    }

    #[test]
    fn test_decode_to_json_lines_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("response.xml");
        let output = dir.path().join("out.jsonl");
        fs::write(&input, RESPONSE).unwrap();

        runner(&[
            "rets-search",
            "decode",
            "-i",
            input.to_str().unwrap(),
            "--class",
            "RES",
            "-o",
            output.to_str().unwrap(),
        ])
        .run()
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"Id":"1","City":"A"}"#, r#"{"Id":"2","City":"B"}"#]);
    }

    #[test]
    fn test_decode_parquet_requires_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("response.xml");
        fs::write(&input, RESPONSE).unwrap();

        let result = runner(&[
            "rets-search",
            "decode",
            "-i",
            input.to_str().unwrap(),
            "--class",
            "RES",
            "-f",
            "parquet",
        ])
        .run();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_decode_parquet_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("response.xml");
        let output = dir.path().join("out.parquet");
        fs::write(&input, RESPONSE).unwrap();

        runner(&[
            "rets-search",
            "decode",
            "-i",
            input.to_str().unwrap(),
            "--class",
            "RES",
            "-f",
            "parquet",
            "-o",
            output.to_str().unwrap(),
        ])
        .run()
        .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_decode_missing_input() {
        let result = runner(&[
            "rets-search",
            "decode",
            "-i",
            "/nonexistent/response.xml",
            "--class",
            "RES",
        ])
        .run();
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_with_strict_config() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("response.xml");
        let config = dir.path().join("decoder.yaml");
        fs::write(
            &input,
            "<RETS><COLUMNS>\tId\tCity\t</COLUMNS><DATA>\t1\t</DATA></RETS>",
        )
        .unwrap();
        fs::write(&config, "decoder:\n  row_policy: strict\n").unwrap();

        let result = runner(&[
            "rets-search",
            "-C",
            config.to_str().unwrap(),
            "decode",
            "-i",
            input.to_str().unwrap(),
            "--class",
            "RES",
            "-o",
            dir.path().join("out.json").to_str().unwrap(),
        ])
        .run();
        assert!(matches!(result, Err(Error::RowFieldMismatch { .. })));
    }
}
