/* Language identification backends.

The filter only ever sees a `LanguageClassifier`: text in, ISO 639-1 code out (or a failure
when the text can't be classified). Two backends:
    - whatlang: trigram based, no model file, the default
    - fasttext: lid.176 style model loaded from disk
*/

use std::collections::HashMap;
use std::fmt;

use anyhow::{anyhow, bail, Error, Result};
use fasttext::FastText;
use once_cell::sync::Lazy;
use thiserror::Error as ThisError;

use crate::config::{Detector, LanguageSettings};

/*================================================================================
=                            CLASSIFIER TRAIT                                    =
================================================================================*/

#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum DetectionFailed {
    #[error("no language features in text")]
    NoFeatures,

    #[error("confidence {confidence:.2} for '{code}' is below {threshold:.2}")]
    LowConfidence { code: String, confidence: f64, threshold: f64 },

    #[error("classifier error: {0}")]
    Backend(String),
}

pub trait LanguageClassifier: fmt::Debug {
    fn classify(&self, text: &str) -> Result<String, DetectionFailed>;
}

pub fn build_classifier(settings: &LanguageSettings) -> Result<Box<dyn LanguageClassifier>, Error> {
    let classifier: Box<dyn LanguageClassifier> = match settings.detector {
        Detector::Whatlang => Box::new(WhatlangClassifier::new(settings.min_confidence)),
        Detector::FastText => {
            let model_file = settings
                .fast_text_file
                .as_ref()
                .ok_or_else(|| anyhow!("The fasttext detector needs a fast_text_file"))?;
            Box::new(FastTextClassifier::new(model_file, settings.min_confidence)?)
        }
    };
    Ok(classifier)
}


/*================================================================================
=                            WHATLANG                                            =
================================================================================*/

// whatlang speaks ISO 639-3; the rest of the world (and the dataset) speaks 639-1
static ISO_639_1: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("afr", "af"), ("aka", "ak"), ("amh", "am"), ("ara", "ar"), ("aze", "az"),
        ("bel", "be"), ("ben", "bn"), ("bul", "bg"), ("cat", "ca"), ("ces", "cs"),
        ("cmn", "zh"), ("dan", "da"), ("deu", "de"), ("ell", "el"), ("eng", "en"),
        ("epo", "eo"), ("est", "et"), ("fin", "fi"), ("fra", "fr"), ("guj", "gu"),
        ("heb", "he"), ("hin", "hi"), ("hrv", "hr"), ("hun", "hu"), ("hye", "hy"),
        ("ind", "id"), ("ita", "it"), ("jav", "jv"), ("jpn", "ja"), ("kan", "kn"),
        ("kat", "ka"), ("khm", "km"), ("kor", "ko"), ("lat", "la"), ("lav", "lv"),
        ("lit", "lt"), ("mal", "ml"), ("mar", "mr"), ("mkd", "mk"), ("mya", "my"),
        ("nep", "ne"), ("nld", "nl"), ("nob", "nb"), ("ori", "or"), ("pan", "pa"),
        ("pes", "fa"), ("pol", "pl"), ("por", "pt"), ("ron", "ro"), ("rus", "ru"),
        ("sin", "si"), ("slk", "sk"), ("slv", "sl"), ("sna", "sn"), ("spa", "es"),
        ("srp", "sr"), ("swe", "sv"), ("tam", "ta"), ("tel", "te"), ("tgl", "tl"),
        ("tha", "th"), ("tuk", "tk"), ("tur", "tr"), ("ukr", "uk"), ("urd", "ur"),
        ("uzb", "uz"), ("vie", "vi"), ("yid", "yi"), ("zul", "zu"),
    ])
});

pub fn iso_639_1(code: &str) -> &str {
    ISO_639_1.get(code).copied().unwrap_or(code)
}

#[derive(Debug, Clone)]
pub struct WhatlangClassifier {
    min_confidence: f64,
}

impl WhatlangClassifier {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Result<String, DetectionFailed> {
        let info = whatlang::detect(text).ok_or(DetectionFailed::NoFeatures)?;
        let code = iso_639_1(info.lang().code()).to_string();
        if info.confidence() < self.min_confidence {
            return Err(DetectionFailed::LowConfidence {
                code,
                confidence: info.confidence(),
                threshold: self.min_confidence,
            });
        }
        Ok(code)
    }
}


/*================================================================================
=                            FASTTEXT                                            =
================================================================================*/

const FASTTEXT_LABEL_PREFIX: &str = "__label__";

pub struct FastTextClassifier {
    fast_text_file: String,
    min_confidence: f64,
    model: FastText,
}

impl FastTextClassifier {
    pub fn new(fast_text_file: &str, min_confidence: f64) -> Result<Self, Error> {
        let mut model = FastText::new();
        if let Err(err) = model.load_model(fast_text_file) {
            bail!("Failed to load fasttext model {:?}: {}", fast_text_file, err);
        }
        Ok(Self { fast_text_file: fast_text_file.to_string(), min_confidence, model })
    }
}

impl fmt::Debug for FastTextClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastTextClassifier")
            .field("fast_text_file", &self.fast_text_file)
            .field("min_confidence", &self.min_confidence)
            .finish()
    }
}

impl LanguageClassifier for FastTextClassifier {
    fn classify(&self, text: &str) -> Result<String, DetectionFailed> {
        // fasttext reads one line per prediction
        let text = text.replace('\n', " ");
        let predictions = self.model.predict(&text, 1, 0.0).map_err(DetectionFailed::Backend)?;
        let top = predictions.into_iter().next().ok_or(DetectionFailed::NoFeatures)?;

        let code = top.label.trim_start_matches(FASTTEXT_LABEL_PREFIX).to_string();
        let confidence = top.prob as f64;
        if confidence < self.min_confidence {
            return Err(DetectionFailed::LowConfidence { code, confidence, threshold: self.min_confidence });
        }
        Ok(code)
    }
}
