use std::path::PathBuf;
use std::process::Command;

use log::{debug, warn};

use crate::error::{NnError, Result};
use crate::normalize::Normalizer;

/// Delegates normalization to an external script.
///
/// Runs `<interpreter> <script> --normalize f1 f2 ...` and expects the script
/// to print the normalized values as comma-separated floats on stdout.
#[derive(Debug, Clone)]
pub struct ScriptNormalizer {
    interpreter: String,
    script: PathBuf,
    expected_len: usize,
}

impl ScriptNormalizer {
    pub fn new(interpreter: impl Into<String>, script: impl Into<PathBuf>, expected_len: usize) -> ScriptNormalizer {
        ScriptNormalizer {
            interpreter: interpreter.into(),
            script: script.into(),
            expected_len,
        }
    }
}

impl Normalizer for ScriptNormalizer {
    fn normalize(&self, features: &[f64]) -> Result<Vec<f64>> {
        debug!("running {} {} on {} features", self.interpreter, self.script.display(), features.len());

        let output = Command::new(&self.interpreter)
            .arg(&self.script)
            .arg("--normalize")
            .args(features.iter().map(f64::to_string))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("normalizer exited with {}: {}", output.status, stderr.trim());
            return Err(NnError::Normalization(format!(
                "{} exited with {}",
                self.script.display(),
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_normalized(&stdout, self.expected_len)
    }
}

/// Parses the comma-separated output of a normalizer script.
pub fn parse_normalized(text: &str, expected_len: usize) -> Result<Vec<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NnError::Normalization("normalizer produced no output".into()));
    }

    let values = text.split(',')
        .map(|cell| {
            cell.trim().parse::<f64>().map_err(|_| {
                NnError::Normalization(format!("'{}' is not a number", cell.trim()))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != expected_len {
        return Err(NnError::Normalization(format!(
            "expected {expected_len} values, got {}",
            values.len()
        )));
    }
    Ok(values)
}
