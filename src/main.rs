use std::path::PathBuf;

use anyhow::{Error, Result};
use clap::{Parser, Subcommand};

use problem_clean::config::{Detector, LanguageSettings};
use problem_clean::{clean_language, filter_object_titles};

/*============================================================
=                            ARGS                            =
============================================================*/

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct ArgParser {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drop "(reverse)" placeholders and problems not written in the target language
    CleanLanguage {
        #[arg(long, default_value = "problems.json")]
        input: PathBuf,

        #[arg(long, default_value = "cleaned_problems.json")]
        output: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        target_lang: Option<String>,

        #[arg(long)]
        detector: Option<String>,

        #[arg(long)]
        fast_text_file: Option<String>,

        #[arg(long)]
        min_confidence: Option<f64>,

        #[arg(long)]
        escape_ascii: bool,

        #[arg(long, conflicts_with = "escape_ascii")]
        no_escape_ascii: bool,
    },

    /// Drop problems with an object where a test case title should be
    FilterObjectTitles {
        #[arg(long, default_value = "problems.json")]
        input: PathBuf,

        #[arg(long, default_value = "problems_filtered.json")]
        output: PathBuf,

        #[arg(long)]
        no_escape_ascii: bool,
    },
}

/*============================================================
=                            UTILITIES                       =
============================================================*/

fn language_settings(
    config: Option<&PathBuf>,
    target_lang: Option<String>,
    detector: Option<String>,
    fast_text_file: Option<String>,
    min_confidence: Option<f64>,
    escape_ascii: Option<bool>,
) -> Result<LanguageSettings, Error> {
    let mut settings = LanguageSettings::load(config)?;
    if let Some(target_lang) = target_lang {
        settings.target_lang = target_lang;
    }
    if let Some(detector) = detector {
        settings.detector = Detector::from_name(&detector)?;
    }
    if fast_text_file.is_some() {
        settings.fast_text_file = fast_text_file;
    }
    if let Some(min_confidence) = min_confidence {
        settings.min_confidence = min_confidence;
    }
    if let Some(escape_ascii) = escape_ascii {
        settings.escape_ascii = escape_ascii;
    }
    Ok(settings)
}

/*============================================================
=                            MAIN                            =
============================================================*/

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let args = ArgParser::parse();
    let result = match args.command {
        Commands::CleanLanguage {
            input,
            output,
            config,
            target_lang,
            detector,
            fast_text_file,
            min_confidence,
            escape_ascii,
            no_escape_ascii,
        } => {
            let escape_ascii = match (escape_ascii, no_escape_ascii) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            language_settings(config.as_ref(), target_lang, detector, fast_text_file, min_confidence, escape_ascii)
                .and_then(|settings| clean_language(&input, &output, &settings))
        }
        Commands::FilterObjectTitles {
            input,
            output,
            no_escape_ascii,
        } => filter_object_titles(&input, &output, !no_escape_ascii),
    };

    if let Err(err) = result {
        println!("Error: {:#}", err);
        std::process::exit(1);
    }
}
