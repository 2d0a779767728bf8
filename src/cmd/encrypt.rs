use clap::Args;
use cipherforge::alphabet::{Alphabet, Language};
use cipherforge::error::CfResult;
use cipherforge::language::detect_language;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    /// Plaintext; read from stdin when omitted.
    pub text: Vec<String>,

    /// Rotation key; drawn at random when omitted.
    #[arg(short, long, allow_hyphen_values = true)]
    pub key: Option<i64>,

    /// Rotate only this alphabet (both by default).
    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: EncryptArgs) -> CfResult<()> {
    let text = super::read_text(&args.text)?;

    let key = match args.key {
        Some(k) => k,
        None => {
            let mut rng = if let Some(s) = args.seed {
                fastrand::Rng::with_seed(s)
            } else {
                fastrand::Rng::new()
            };
            let size = Alphabet::new(args.lang.unwrap_or_else(|| detect_language(&text))).size;
            let k = rng.usize(1..size) as i64;
            info!("🎲 Random key {}", k);
            k
        }
    };

    let encrypted = match args.lang {
        Some(lang) => Alphabet::new(lang).encrypt(&text, key),
        None => Language::iter().fold(text, |acc, lang| Alphabet::new(lang).encrypt(&acc, key)),
    };

    eprintln!("🔑 Key: {}", key);
    println!("{}", encrypted);
    Ok(())
}
