use serde::{Serialize, Deserialize};

/// A serializable description of a network topology.
///
/// `NetworkSpec` can be saved to / loaded from JSON so a topology can be kept
/// in a config file and rebuilt with [`crate::Network::from_spec`]. It holds
/// no weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used only in logs.
    pub name: String,
    pub input_size: usize,
    pub output_size: usize,
    pub hidden_layer_count: usize,
    /// Width of every hidden layer. `None` picks
    /// [`NetworkSpec::default_hidden_size`].
    #[serde(default)]
    pub hidden_layer_size: Option<usize>,
}

impl NetworkSpec {
    /// Default hidden width: two thirds of input + output, at least 1.
    pub fn default_hidden_size(input_size: usize, output_size: usize) -> usize {
        ((input_size + output_size) * 2 / 3).max(1)
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_layer_size
            .unwrap_or_else(|| Self::default_hidden_size(self.input_size, self.output_size))
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hidden_width() {
        assert_eq!(NetworkSpec::default_hidden_size(3, 1), 2);
        assert_eq!(NetworkSpec::default_hidden_size(1, 0), 1);
        assert_eq!(NetworkSpec::default_hidden_size(10, 5), 10);
    }

    #[test]
    fn missing_hidden_size_uses_default() {
        let spec: NetworkSpec = serde_json::from_str(
            r#"{ "name": "cvd", "input_size": 6, "output_size": 3, "hidden_layer_count": 2 }"#,
        ).unwrap();
        assert_eq!(spec.hidden_layer_size, None);
        assert_eq!(spec.hidden_size(), 6);
    }
}
