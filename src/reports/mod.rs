use cipherforge::alphabet::Language;
use cipherforge::api::{Analysis, AnalysisKind};
use cipherforge::language::LanguageSpan;
use cipherforge::mixed::Segment;
use cipherforge::scorer::ShiftResult;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

const PREVIEW_CHARS: usize = 60;

fn confidence_color(confidence: f64) -> Color {
    if confidence >= 70.0 {
        Color::Green
    } else if confidence >= 40.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn confidence_cell(result: &ShiftResult) -> Cell {
    let confidence = result.confidence();
    Cell::new(format!("{:.1}%", confidence))
        .fg(confidence_color(confidence))
        .set_alignment(CellAlignment::Right)
}

fn preview(text: &str) -> String {
    let mut out: String = text
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn format_num(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn print_header(dictionary_words: usize, analysis: &Analysis) {
    let languages: Vec<&str> = analysis
        .languages()
        .iter()
        .map(|l| l.display_name())
        .collect();

    println!("\n🔐 === CAESAR CRACKER === 🔐");
    println!("📖 Dictionary: {} words", format_num(dictionary_words));
    println!("🌐 Language:   {}", languages.join(" + "));
    if analysis.kind != AnalysisKind::Bilingual {
        let plain = if analysis.is_plaintext { "yes" } else { "no" };
        println!("📝 Plaintext:  {}", plain);
    }
}

pub fn print_result(best: &ShiftResult, language: Language) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Confidence").add_attribute(Attribute::Bold),
        Cell::new("Chi²"),
        Cell::new("Bigram"),
        Cell::new("Dict"),
        Cell::new("Stem"),
        Cell::new("Words"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{} ({})", best.key, language)).fg(Color::Cyan),
        confidence_cell(best),
        Cell::new(format!("{:.1}", best.chi_squared)),
        Cell::new(format!("{:.2}", best.bigram)),
        Cell::new(format!("{:.2}", best.dictionary)),
        Cell::new(format!("{:.2}", best.stem)),
        Cell::new(format!("{}/{}", best.matches, best.total_words)),
    ]);

    println!("\n🏆 Best candidate");
    println!("{}", table);
    println!("\n{}", best.text);
}

/// Runners-up after the best candidate.
pub fn print_alternatives(ranking: &[ShiftResult]) {
    if ranking.len() < 2 {
        return;
    }
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Confidence").add_attribute(Attribute::Bold),
        Cell::new("Text"),
    ]);
    for result in &ranking[1..] {
        table.add_row(vec![
            Cell::new(result.key).set_alignment(CellAlignment::Right),
            confidence_cell(result),
            Cell::new(preview(&result.text)),
        ]);
    }
    println!("\n📊 Alternatives");
    println!("{}", table);
}

pub fn print_segments(segments: &[Segment]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Span"),
        Cell::new("Lang"),
        Cell::new("Key").fg(Color::Cyan),
        Cell::new("Confidence"),
        Cell::new("Text"),
    ]);
    for (i, seg) in segments.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{}..{}", seg.start, seg.end)),
            Cell::new(seg.language),
            Cell::new(seg.key()).fg(Color::Cyan),
            confidence_cell(&seg.best),
            Cell::new(preview(&seg.best.text)),
        ]);
    }
    println!("\n🧩 Segments");
    println!("{}", table);
}

pub fn print_spans(spans: &[LanguageSpan]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Span").add_attribute(Attribute::Bold),
        Cell::new("Lang"),
        Cell::new("Text"),
    ]);
    for span in spans {
        table.add_row(vec![
            Cell::new(format!("{}..{}", span.start, span.end)),
            Cell::new(span.language),
            Cell::new(preview(&span.text)),
        ]);
    }
    println!("{}", table);
}
