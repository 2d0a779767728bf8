use cipherforge::alphabet::Language;
use cipherforge::language::{count_letters, detect_language, is_bilingual, split_by_language};
use rstest::rstest;

#[rstest]
#[case("Привет мир", Language::Russian)]
#[case("hello world", Language::English)]
#[case("ab вг", Language::Russian)] // tie
#[case("", Language::Russian)]
#[case("1234 !?", Language::Russian)]
#[case("мир hello world", Language::English)]
fn test_detect_language(#[case] text: &str, #[case] expected: Language) {
    assert_eq!(detect_language(text), expected);
}

#[test]
fn test_count_letters_ignores_neutral() {
    let counts = count_letters("Ёж, hedgehog! 42");
    assert_eq!(counts.russian, 2);
    assert_eq!(counts.english, 8);
}

#[rstest]
#[case("Привет hello", true)]
#[case("Привет мир", false)]
#[case("", false)]
#[case("...", false)]
// 1 of 21 letters is under 5%
#[case("абвгдеёжзийклмнопрст z", false)]
// 2 of 22 letters is over 5%
#[case("абвгдеёжзийклмнопрст zz", true)]
fn test_is_bilingual(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_bilingual(text), expected);
}

#[test]
fn test_split_privet_hello() {
    let spans = split_by_language("Привет hello");
    assert_eq!(spans.len(), 2);

    assert_eq!(spans[0].language, Language::Russian);
    assert_eq!(spans[0].text, "Привет ");
    assert_eq!((spans[0].start, spans[0].end), (0, 7));

    assert_eq!(spans[1].language, Language::English);
    assert_eq!(spans[1].text, "hello");
    assert_eq!((spans[1].start, spans[1].end), (7, 12));
}

#[test]
fn test_split_without_whitespace_cuts_at_transition() {
    let spans = split_by_language("словоword");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "слово");
    assert_eq!(spans[1].text, "word");
}

#[test]
fn test_split_lookback_is_bounded() {
    let text = "да абвгдеёжзийкл word";
    let spans = split_by_language(text);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "да абвгдеёжзийкл ");

    // The only space is more than 10 code points before the switch
    let text = "да абвгдеёжзийклмнопword";
    let spans = split_by_language(text);
    assert_eq!(spans[0].text, "да абвгдеёжзийклмноп");
    assert_eq!(spans[1].text, "word");
}

#[test]
fn test_split_partitions_text() {
    let text = "Один two три four, пять!";
    let spans = split_by_language(text);
    let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, text);

    let mut expected_start = 0;
    for span in &spans {
        assert_eq!(span.start, expected_start);
        assert!(span.end > span.start);
        expected_start = span.end;
    }
    assert_eq!(expected_start, text.chars().count());

    let langs: Vec<Language> = spans.iter().map(|s| s.language).collect();
    assert_eq!(
        langs,
        vec![
            Language::Russian,
            Language::English,
            Language::Russian,
            Language::English,
            Language::Russian
        ]
    );
}

#[test]
fn test_split_edge_inputs() {
    assert!(split_by_language("").is_empty());

    let spans = split_by_language("123 ...");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].language, Language::Russian);
    assert_eq!(spans[0].text, "123 ...");

    let spans = split_by_language("hello");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].language, Language::English);
}

#[test]
fn test_split_leading_neutral_stays_in_first_span() {
    let spans = split_by_language("  42 hello мир");
    assert_eq!(spans[0].text, "  42 hello ");
    assert_eq!(spans[1].text, "мир");
}
