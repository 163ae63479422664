/*
Settings for the language cleaner.

An optional .json/.yaml file supplies defaults, command-line flags override it:

    target_lang: en
    detector: whatlang      # or fasttext
    fast_text_file: ft_classifiers/lid176.bin
    min_confidence: 0.0
    escape_ascii: false
*/

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Error, Result};
use serde::Serialize;
use serde_json::{json, Value};

use crate::utils::get_default;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Detector {
    Whatlang,
    FastText,
}

impl Detector {
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name.to_lowercase().as_str() {
            "whatlang" => Ok(Detector::Whatlang),
            "fasttext" => Ok(Detector::FastText),
            _ => bail!("Unknown language detector: {:?}", name),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct LanguageSettings {
    pub target_lang: String,
    pub detector: Detector,
    pub fast_text_file: Option<String>,
    pub min_confidence: f64,
    pub escape_ascii: bool,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            target_lang: String::from("en"),
            detector: Detector::Whatlang,
            fast_text_file: None,
            min_confidence: 0.0,
            escape_ascii: false,
        }
    }
}

impl LanguageSettings {
    pub fn from_config(config: &Value) -> Result<Self, Error> {
        let defaults = Self::default();
        let target_lang = get_default(config, "target_lang", defaults.target_lang);
        let detector = Detector::from_name(&get_default(config, "detector", String::from("whatlang")))?;
        let fast_text_file = get_default(config, "fast_text_file", defaults.fast_text_file);
        let min_confidence = get_default(config, "min_confidence", defaults.min_confidence);
        let escape_ascii = get_default(config, "escape_ascii", defaults.escape_ascii);
        Ok(Self { target_lang, detector, fast_text_file, min_confidence, escape_ascii })
    }

    pub fn load(config: Option<&PathBuf>) -> Result<Self, Error> {
        match config {
            Some(path) => Self::from_config(&parse_config(path)?),
            None => Self::from_config(&json!({})),
        }
    }
}


pub fn parse_config(config: &PathBuf) -> Result<Value, Error> {
    // Handle either .yaml or .json config and return a Json value
    let file = File::open(config).with_context(|| format!("Opening config {:?}", config))?;
    let reader = BufReader::new(file);

    let ext = config.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parsed_config: Value = match ext {
        "json" => serde_json::from_reader(reader)?,
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
            serde_json::to_value(yaml_value)?
        }
        _ => bail!("Weird config format: {:?}", config),
    };
    Ok(parsed_config)
}
