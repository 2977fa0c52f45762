use serde::Serialize;
use wordfreq_core::WordRankEntry;
use wordfreq_engine::AnalysisReport;

const BAR_WIDTH: u64 = 40;
const BAR: char = '█';

pub fn chart_title(top_n: usize) -> String {
    format!("Top {top_n} Most Frequent Words")
}

/// Horizontal bar chart, most frequent word on top, bars scaled to the largest count.
pub fn render_bar_chart(entries: &[WordRankEntry], title: &str) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');

    let Some(max) = entries.iter().map(|e| e.count).max() else {
        out.push_str("(no words)");
        return out;
    };
    let label_width = entries
        .iter()
        .map(|e| e.word.chars().count())
        .max()
        .unwrap_or(0);

    for entry in entries {
        let len = bar_len(entry.count, max);
        let pad = label_width - entry.word.chars().count();
        out.push_str(&format!(
            "{}{} | {} {}\n",
            entry.word,
            " ".repeat(pad),
            BAR.to_string().repeat(len),
            entry.count
        ));
    }
    out.push_str(&format!("{} | Frequency", " ".repeat(label_width)));
    out
}

fn bar_len(count: u64, max: u64) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    // Round up so every non-zero count stays visible.
    (count * BAR_WIDTH).div_ceil(max) as usize
}

#[derive(Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    final_url: &'a str,
    encoding: &'a str,
    total_words: u64,
    distinct_words: usize,
    generated_utc: &'a str,
    top: &'a [WordRankEntry],
}

pub fn render_json(report: &AnalysisReport, generated_utc: &str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        url: &report.metadata.original_url,
        final_url: &report.metadata.final_url,
        encoding: &report.encoding_label,
        total_words: report.table.total(),
        distinct_words: report.table.len(),
        generated_utc,
        top: &report.top,
    })
}
