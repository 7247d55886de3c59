use serde::{Deserialize, Serialize};

use crate::{
    activation::activation::Activation,
    error::{NetError, Result},
};

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

/// Construction parameters for an `Engine`.
///
/// `hidden_layers` is stated separately from `hidden_widths` and the two
/// must agree; a host typing both by hand gets an error instead of a
/// silently truncated topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub inputs: usize,
    pub hidden_layers: usize,
    #[serde(default)]
    pub hidden_widths: Vec<usize>,
    pub outputs: usize,
    #[serde(default)]
    pub activation: Activation,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl EngineConfig {
    pub fn new(inputs: usize, hidden_layers: usize, hidden_widths: Vec<usize>, outputs: usize) -> Self {
        EngineConfig {
            inputs,
            hidden_layers,
            hidden_widths,
            outputs,
            activation: Activation::default(),
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_layers != self.hidden_widths.len() {
            return Err(NetError::HiddenLayerMismatch {
                hidden_layers: self.hidden_layers,
                widths: self.hidden_widths.len(),
            });
        }
        if self.inputs == 0 {
            return Err(NetError::ZeroWidth { what: "the input layer" });
        }
        if self.outputs == 0 {
            return Err(NetError::ZeroWidth { what: "the output layer" });
        }
        if self.hidden_widths.contains(&0) {
            return Err(NetError::ZeroWidth { what: "every hidden layer" });
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = EngineConfig::from_json_str(r#"{"inputs": 2, "hidden_layers": 0, "outputs": 1}"#).unwrap();
        assert_eq!(config, EngineConfig::new(2, 0, vec![], 1));
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.activation, Activation::Sigmoid);
    }

    #[test]
    fn full_json() {
        let json = r#"{
            "inputs": 3,
            "hidden_layers": 2,
            "hidden_widths": [4, 2],
            "outputs": 1,
            "activation": "tanh",
            "learning_rate": 0.05
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.hidden_widths, vec![4, 2]);
        assert_eq!(config.activation, Activation::Tanh);
        assert_eq!(config.learning_rate, 0.05);
    }

    #[test]
    fn hidden_count_must_match_widths() {
        let err = EngineConfig::new(2, 2, vec![3], 1).validate().unwrap_err();
        assert!(matches!(err, NetError::HiddenLayerMismatch { hidden_layers: 2, widths: 1 }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn rejects_zero_widths_and_bad_rates() {
        assert!(EngineConfig::new(0, 0, vec![], 1).validate().is_err());
        assert!(EngineConfig::new(2, 0, vec![], 0).validate().is_err());
        assert!(EngineConfig::new(2, 1, vec![0], 1).validate().is_err());
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = EngineConfig::new(2, 0, vec![], 1).with_learning_rate(lr).validate().unwrap_err();
            assert!(matches!(err, NetError::InvalidLearningRate(_)));
        }
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = EngineConfig::from_json_str("{\"inputs\": 2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join("plastic_nn_config_test.json");
        std::fs::write(&path, r#"{"inputs": 4, "hidden_layers": 1, "hidden_widths": [3], "outputs": 2}"#).unwrap();
        let config = EngineConfig::load_json(path.to_str().unwrap()).unwrap();
        assert_eq!(config.inputs, 4);
        assert_eq!(config.hidden_widths, vec![3]);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            EngineConfig::load_json("/definitely/not/here.json"),
            Err(NetError::Io(_))
        ));
    }
}
