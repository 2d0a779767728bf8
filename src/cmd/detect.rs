use crate::reports;
use clap::Args;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::language::{self, count_letters};
use cipherforge::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub config: Config,

    pub text: Vec<String>,
}

pub fn run(args: DetectArgs, config: &Config) -> CfResult<()> {
    let text = super::read_text(&args.text)?;
    let scorer = Scorer::from_paths(&config.dictionary);

    let lang = scorer.detect_language(&text);
    let counts = count_letters(&text);
    let bilingual = language::is_bilingual(&text);
    let plaintext = scorer.is_plaintext_in(&text, lang);
    let spans = language::split_by_language(&text);

    println!("\n🔎 === LANGUAGE REPORT === 🔎");
    println!("Language:  {} ({})", lang.display_name(), lang);
    println!(
        "Letters:   {} Russian, {} English",
        counts.russian, counts.english
    );
    println!("Bilingual: {}", bilingual);
    println!("Plaintext: {}", plaintext);
    reports::print_spans(&spans);
    Ok(())
}
