#![allow(dead_code)]

use cipherforge::alphabet::{Alphabet, Language};
use cipherforge::dictionary::Dictionary;
use cipherforge::scorer::Scorer;
use std::sync::Arc;

pub const RU_PASSAGE_A: &str = "в начале лета мы поехали в деревню к бабушке где было много солнца \
и свежего воздуха каждый день мы ходили на речку купаться и ловить рыбу а вечером пили чай \
с вареньем на старой веранде";

pub const RU_PASSAGE_B: &str = "город проснулся рано утром люди спешили на работу по широким \
улицам ехали машины и автобусы в парке гуляли мамы с детьми а на скамейках сидели старики \
и читали свежие газеты";

pub const EN_PASSAGE: &str = "the quick brown fox jumps over the lazy dog while the farmer \
watches from the porch and drinks his morning coffee";

fn words_of(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Scorer whose dictionary knows every word of the test passages.
pub fn passage_scorer() -> Scorer {
    let mut ru = words_of(RU_PASSAGE_A);
    ru.extend(words_of(RU_PASSAGE_B));
    let en = words_of(EN_PASSAGE);
    Scorer::new(Arc::new(Dictionary::from_words(ru, en)))
}

pub fn scorer_with(ru: &[&str], en: &[&str]) -> Scorer {
    Scorer::new(Arc::new(Dictionary::from_words(ru.iter(), en.iter())))
}

pub fn encrypt(text: &str, key: i64, language: Language) -> String {
    Alphabet::new(language).encrypt(text, key)
}
