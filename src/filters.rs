use serde_json::{Map, Value};
use anyhow::{Error, Result};

use crate::config::LanguageSettings;
use crate::lang::{build_classifier, LanguageClassifier};
use crate::utils::{field_text, json_get, nullable_str, optional_str, truncate_graphemes};

pub const REVERSE_INPUT_DESCRIPTION: &str = "no input description (reverse)";
pub const REVERSE_OUTPUT_DESCRIPTION: &str = "no output description (reverse)";
pub const REVERSE_STATEMENT: &str = "no statement (reverse)";

const WARN_TEXT_LEN: usize = 100;

/*================================================================================
=                            PROBLEM FILTER TRAIT                                =
================================================================================*/
/*
Every record gets exactly one verdict:
	- Keep: goes to the output untouched
	- Remove(reason): dropped, tallied under reason
	- Error(msg): dropped, tallied as an error/skip, msg is reported
Filters never mutate the record. Warnings that don't decide the verdict go in `notes`.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RemovalReason {
	Reverse,
	Language,
	ObjectTitle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
	Keep,
	Remove(RemovalReason),
	Error(String),
}

pub trait ProblemFilter {
	fn classify(&self, index: usize, record: &Value, notes: &mut Vec<String>) -> Verdict;
}


/*================================================================================
=                            LANGUAGE + REVERSE PLACEHOLDER                      =
================================================================================*/

#[derive(Debug)]
pub struct LanguageFilter {
	// Removes "(reverse)" placeholders and problems whose title/statement isn't in target_lang
	target_lang: String,
	classifier: Box<dyn LanguageClassifier>,
}

impl LanguageFilter {
	pub fn new(classifier: Box<dyn LanguageClassifier>, target_lang: &str) -> Self {
		Self { target_lang: target_lang.to_string(), classifier }
	}

	pub fn from_settings(settings: &LanguageSettings) -> Result<Self, Error> {
		let classifier = build_classifier(settings)?;
		Ok(Self::new(classifier, &settings.target_lang))
	}

	/// Empty text and the "(reverse)" statement placeholder always pass.
	/// Failed detection counts as a miss.
	pub fn is_target_language(&self, text: &str, notes: &mut Vec<String>) -> bool {
		if text.trim().is_empty() {
			return true;
		}
		if text.to_lowercase() == REVERSE_STATEMENT {
			return true;
		}
		match self.classifier.classify(text) {
			Ok(code) => code.eq_ignore_ascii_case(&self.target_lang),
			Err(err) => {
				notes.push(format!(
					"Language detection failed for text: \"{}...\" (assuming not '{}'): {}",
					truncate_graphemes(text, WARN_TEXT_LEN), self.target_lang, err
				));
				false
			}
		}
	}

	fn classify_problem(&self, problem: &Map<String, Value>, notes: &mut Vec<String>) -> Result<Verdict, Error> {
		let data = match problem.get("lastVersion").and_then(Value::as_object) {
			None => {
				return Ok(Verdict::Error(format!("Skipping problem '{}' due to missing or invalid 'lastVersion'.", field_text(problem, "title"))));
			}
			Some(last_version) => match last_version.get("data").and_then(Value::as_object) {
				Some(data) => data,
				None => {
					return Ok(Verdict::Error(format!("Skipping problem '{}' due to missing or invalid 'lastVersion.data'.", field_text(problem, "title"))));
				}
			},
		};

		// Placeholders go regardless of what title/statement hold
		let is_reverse = data.get("inputDescription").and_then(Value::as_str) == Some(REVERSE_INPUT_DESCRIPTION)
			&& data.get("outputDescription").and_then(Value::as_str) == Some(REVERSE_OUTPUT_DESCRIPTION);
		if is_reverse {
			return Ok(Verdict::Remove(RemovalReason::Reverse));
		}

		let title = nullable_str(problem, "title")?;
		let statement = optional_str(data, "statement")?;
		if !self.is_target_language(title, notes) || !self.is_target_language(statement, notes) {
			return Ok(Verdict::Remove(RemovalReason::Language));
		}
		Ok(Verdict::Keep)
	}
}

impl ProblemFilter for LanguageFilter {
	fn classify(&self, index: usize, record: &Value, notes: &mut Vec<String>) -> Verdict {
		let problem = match record.as_object() {
			Some(problem) => problem,
			None => {
				return Verdict::Error(format!("Skipping item at index {} as it is not an object: {}", index, record));
			}
		};

		match self.classify_problem(problem, notes) {
			Ok(verdict) => verdict,
			Err(err) => {
				let title = match problem.get("title") {
					Some(Value::String(title)) => title.clone(),
					Some(other) => other.to_string(),
					None => format!("Unknown Title at index {}", index),
				};
				Verdict::Error(format!("Error processing problem '{}': {}", title, err))
			}
		}
	}
}


/*================================================================================
=                            OBJECT TITLE IN TEST CASES                          =
================================================================================*/

/// True when some test case under lastVersion.data.testCases has an object as its title.
/// Missing or oddly shaped structure is never a match.
pub fn has_object_title_in_test_cases(record: &Value) -> bool {
	let test_cases = match json_get(record, "lastVersion.data.testCases").and_then(Value::as_array) {
		Some(test_cases) => test_cases,
		None => return false,
	};
	test_cases
		.iter()
		.filter_map(Value::as_object)
		.any(|test_case| test_case.get("title").map_or(false, Value::is_object))
}

#[derive(Debug, Default)]
pub struct ObjectTitleFilter;

impl ProblemFilter for ObjectTitleFilter {
	fn classify(&self, _index: usize, record: &Value, _notes: &mut Vec<String>) -> Verdict {
		if has_object_title_in_test_cases(record) {
			Verdict::Remove(RemovalReason::ObjectTitle)
		} else {
			Verdict::Keep
		}
	}
}
