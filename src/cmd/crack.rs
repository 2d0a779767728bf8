use crate::reports;
use clap::Args;
use cipherforge::alphabet::Language;
use cipherforge::api::{self, AnalysisKind, AnalyzeOptions};
use cipherforge::config::Config;
use cipherforge::dictionary::Dictionary;
use cipherforge::error::CfResult;
use cipherforge::scorer::Scorer;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ciphertext; read from stdin when omitted.
    pub text: Vec<String>,

    /// Print only the decrypted text.
    #[arg(short, long, default_value_t = false)]
    pub raw: bool,

    /// Always run the mixed-cipher check.
    #[arg(short, long, default_value_t = false)]
    pub mixed: bool,

    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,

    #[arg(long, default_value_t = false, conflicts_with = "raw")]
    pub json: bool,
}

pub fn run(args: CrackArgs, config: &Config) -> CfResult<()> {
    let text = super::read_text(&args.text)?;
    if text.is_empty() {
        return Ok(());
    }

    let dictionary = Arc::new(Dictionary::new(config.dictionary.clone()));
    let scorer = Scorer::new(dictionary.clone());

    let options = AnalyzeOptions {
        routing: config.routing.clone(),
        segmenter: config.segmenter.clone(),
        language: args.lang,
        force_mixed: args.mixed,
    };
    let analysis = api::analyze(&scorer, &text, &options);

    if args.raw {
        println!("{}", analysis.text);
        return Ok(());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    reports::print_header(dictionary.len(), &analysis);

    match analysis.kind {
        AnalysisKind::Single => {
            if let Some(best) = analysis.best() {
                reports::print_result(best, analysis.language);
                reports::print_alternatives(&analysis.ranking);
            }
        }
        AnalysisKind::Mixed => {
            println!("\n🔀 Mixed cipher: different keys in different parts of the text");
            reports::print_segments(&analysis.segments);
            println!("\n{}", analysis.text);
        }
        AnalysisKind::Bilingual => {
            reports::print_segments(&analysis.segments);
            println!("\n{}", analysis.text);
        }
    }
    Ok(())
}
