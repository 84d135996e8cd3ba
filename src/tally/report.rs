//! The dashboard: classification of the `text` column with a preview, a chart
//! and the most frequent words, printed to the terminal.

use std::collections::HashMap;
use std::fmt::Write as _;

use vote_classifier::sample::{clamp_sample_size, sample};

use crate::tally::{chatbot::ChatbotClient, config_reader::ReportConfig, *};

/// The column read by the dashboard. There is no fuzzy search for this one.
pub const TEXT_COLUMN: &str = "text";

/// Words shorter than this are left out of the word frequencies.
pub const MIN_WORD_LEN: usize = 3;

const BAR_WIDTH: usize = 40;

#[derive(PartialEq, Debug, Clone)]
pub struct Report {
    pub classification: Classification,
    /// A preview of the non-missing comments.
    pub sample: Vec<String>,
    pub nulls: NullAssessment,
    pub top_words: Vec<(String, u64)>,
    /// All the non-missing comments, joined by a space.
    pub full_text: String,
}

pub fn build_report(table: &Table, config: &ReportConfig) -> TallyResult<Report> {
    let classification =
        classify_fixed_column(table, TEXT_COLUMN).context(MissingVoteColumnSnafu {})?;

    let texts: Vec<String> = table
        .column_values(classification.column.index)
        .flatten()
        .map(|s| s.to_string())
        .collect();
    debug!("build_report: {} non-missing comments", texts.len());

    let size = clamp_sample_size(config.sample_size, texts.len());
    let preview = sample(&texts, size, config.seed);

    let nulls = assess_nulls(&classification.counts);
    if nulls.level == NullLevel::High {
        warn!(
            "High share of null votes: {} of {} ({:.2}%)",
            nulls.nulls, nulls.total, nulls.percent
        );
    }

    let full_text = texts.join(" ");
    let top_words = word_frequencies(&full_text, config.top_words);

    Ok(Report {
        classification,
        sample: preview,
        nulls,
        top_words,
        full_text,
    })
}

/// The most frequent words of the text, most frequent first.
///
/// Words are split on anything that is not alphanumeric and lower-cased.
/// Equal counts are ordered alphabetically.
pub fn word_frequencies(text: &str, top: usize) -> Vec<(String, u64)> {
    let mut freqs: HashMap<String, u64> = HashMap::new();
    for w in text.split(|c: char| !c.is_alphanumeric()) {
        if w.chars().count() >= MIN_WORD_LEN {
            *freqs.entry(w.to_lowercase()).or_insert(0) += 1;
        }
    }
    let mut res: Vec<(String, u64)> = freqs.into_iter().collect();
    res.sort_by(|(w1, c1), (w2, c2)| c2.cmp(c1).then(w1.cmp(w2)));
    res.truncate(top);
    res
}

/// Draws one horizontal bar per label, scaled to the largest count.
pub fn render_bar_chart(counts: &CountMapping, width: usize) -> String {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let mut out = String::new();
    for (label, count) in counts.iter() {
        let len = if max == 0 {
            0
        } else {
            ((*count as f64 / max as f64) * width as f64).round() as usize
        };
        out.push_str(&format!(
            "{:<12} {} {}\n",
            label.as_str(),
            "#".repeat(len),
            count
        ));
    }
    out
}

pub fn render_report(report: &Report) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "== Sample of comments ({})", report.sample.len())?;
    for s in report.sample.iter() {
        writeln!(out, "  {}", s)?;
    }

    writeln!(out, "\n== Results")?;
    writeln!(out, "{}", counts_to_json(&report.classification.counts))?;

    writeln!(out, "\n== Vote distribution")?;
    out.push_str(&render_bar_chart(
        &report.classification.counts,
        BAR_WIDTH,
    ));

    writeln!(out, "\n== Null votes")?;
    writeln!(
        out,
        "Total null votes: {} ({:.2}%)",
        report.nulls.nulls, report.nulls.percent
    )?;
    writeln!(out, "{}", report.nulls.message())?;

    writeln!(out, "\n== Most frequent words")?;
    for (w, c) in report.top_words.iter() {
        writeln!(out, "  {:<20} {}", w, c)?;
    }
    Ok(out)
}

/// Reads the file, prints the report and optionally asks the chat service.
///
/// A failure of the chat service does not fail the report: it is printed instead.
pub async fn run_report(
    input: &str,
    input_type: Option<&str>,
    config: &ReportConfig,
    ask_chatbot: bool,
) -> TallyResult<Report> {
    let table = read_table(input, input_type)?;
    let report = build_report(&table, config)?;
    let rendered = render_report(&report).whatever_context("Could not render the report")?;
    println!("{}", rendered);

    if ask_chatbot {
        let client = ChatbotClient::new(&config.chatbot)?;
        match client.ask(&report.full_text).await {
            Ok(answer) => {
                println!("== Chat service answer\n{}", answer);
            }
            Err(e) => {
                warn!("Chat service request failed: {:?}", e);
                eprintln!("Error getting the answer of the chat service: {}", e);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::config_reader::Settings;
    use vote_classifier::builder::Builder;

    fn config(sample_size: usize) -> ReportConfig {
        Settings::default().report_config(Some(sample_size), None)
    }

    fn table(texts: &[Option<&str>]) -> Table {
        let mut b = Builder::new(&["id".to_string(), TEXT_COLUMN.to_string()]);
        for (idx, t) in texts.iter().enumerate() {
            b.add_row(vec![Some(idx.to_string()), t.map(|s| s.to_string())]);
        }
        b.build()
    }

    #[test]
    fn report_counts_and_nulls() {
        let t = table(&[
            Some("Noboa"),
            Some("Luisa"),
            Some("nada"),
            None,
            Some("Noboa otra vez"),
        ]);
        let r = build_report(&t, &config(10)).unwrap();
        assert_eq!(r.classification.counts.get(Label::Noboa), 2);
        assert_eq!(r.classification.counts.get(Label::Nulo), 2);
        assert_eq!(r.nulls.total, 5);
        assert!((r.nulls.percent - 40.0).abs() < 1e-9);
        assert_eq!(r.nulls.level, NullLevel::High);
        // The missing comment is not previewed and not in the text.
        assert_eq!(r.sample.len(), 4);
        assert_eq!(r.full_text, "Noboa Luisa nada Noboa otra vez");
    }

    #[test]
    fn sample_is_reproducible() {
        let texts: Vec<String> = (0..30).map(|i| format!("comentario {}", i)).collect();
        let refs: Vec<Option<&str>> = texts.iter().map(|s| Some(s.as_str())).collect();
        let t = table(&refs);
        let a = build_report(&t, &config(5)).unwrap();
        let b = build_report(&t, &config(5)).unwrap();
        assert_eq!(a.sample.len(), 5);
        assert_eq!(a.sample, b.sample);
    }

    #[test]
    fn sample_size_is_clamped() {
        let t = table(&[Some("a"), Some("b")]);
        assert_eq!(build_report(&t, &config(10)).unwrap().sample.len(), 2);
        assert_eq!(build_report(&t, &config(0)).unwrap().sample.len(), 1);
        let empty = table(&[]);
        let r = build_report(&empty, &config(10)).unwrap();
        assert!(r.sample.is_empty());
        assert!(r.classification.counts.is_empty());
        assert_eq!(r.nulls.level, NullLevel::Low);
    }

    #[test]
    fn text_column_is_required() {
        let b = Builder::new(&["ID".to_string(), "Voto".to_string()]);
        let err = build_report(&b.build(), &config(10)).unwrap_err();
        match err {
            TallyError::MissingVoteColumn { source } => {
                assert_eq!(source.columns(), &["id".to_string(), "voto".to_string()]);
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[tokio::test]
    async fn report_from_workbook() {
        let path = crate::tally::tests::test_data("comments.xlsx");
        let r = run_report(&path, None, &config(3), false).await.unwrap();
        assert_eq!(r.classification.counts.get(Label::Noboa), 3);
        assert_eq!(r.classification.counts.get(Label::Luisa), 2);
        assert_eq!(r.classification.counts.get(Label::Nulo), 3);
        assert!((r.nulls.percent - 37.5).abs() < 1e-9);
        assert_eq!(r.nulls.level, NullLevel::High);
        assert_eq!(r.sample.len(), 3);
        assert_eq!(r.top_words[0], ("noboa".to_string(), 3));
    }

    #[test]
    fn words() {
        let w = word_frequencies("Voto por Noboa. voto, VOTO; por Luisa y yo", 3);
        assert_eq!(
            w,
            vec![
                ("voto".to_string(), 3),
                ("por".to_string(), 2),
                ("luisa".to_string(), 1),
            ]
        );
        assert!(word_frequencies("", 10).is_empty());
    }

    #[test]
    fn accented_words() {
        let w = word_frequencies("elección Elección votación", 10);
        assert_eq!(w[0], ("elección".to_string(), 2));
        assert_eq!(w[1], ("votación".to_string(), 1));
    }

    #[test]
    fn bar_chart() {
        let labels = vec![Label::Noboa, Label::Noboa, Label::Luisa];
        let chart = render_bar_chart(&CountMapping::from_labels(&labels), 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Voto Noboa"));
        assert!(lines[0].contains(&"#".repeat(10)));
        assert!(lines[0].ends_with(" 2"));
        assert!(lines[1].contains(&"#".repeat(5)));
        assert!(!lines[1].contains(&"#".repeat(6)));
        assert_eq!(render_bar_chart(&CountMapping::default(), 10), "");
    }

    #[test]
    fn rendered_report() {
        let t = table(&[Some("Noboa"), Some("Noboa"), Some("Luisa"), Some("Luisa")]);
        let r = build_report(&t, &config(2)).unwrap();
        let s = render_report(&r).unwrap();
        assert!(s.contains("Total null votes: 0 (0.00%)"));
        assert!(s.contains("is low"));
        assert!(s.contains("noboa"));
        assert!(s.contains("== Sample of comments (2)"));
        assert!(s.contains("== Vote distribution\nVoto Luisa"));
    }
}
