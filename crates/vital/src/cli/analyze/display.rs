//! Terminal presentation: progress spinner, styled report, typing animation.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;
use vital_core::Report;

/// Spinner shown on stderr while the remote call is in flight.
pub fn create_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("🔄 Analyzing medical image... Please wait.");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a report to the terminal with styling and an optional typing effect.
pub async fn print_report(report: &Report, typing_delay: Option<Duration>) -> std::io::Result<()> {
    let term = Term::stdout();
    let styled = term.is_term();

    let header = report.header();
    let footer = report.footer();

    if styled {
        term.write_str(&style(header).bold().cyan().to_string())?;
    } else {
        term.write_str(&header)?;
    }

    match typing_delay {
        Some(delay) if styled => type_out(&term, report.body(), delay).await?,
        _ => term.write_str(report.body())?,
    }

    if styled {
        let footer = if report.is_success() {
            style(footer).green()
        } else {
            style(footer).red()
        };
        term.write_str(&footer.to_string())?;
    } else {
        term.write_str(&footer)?;
    }
    Ok(())
}

/// Write `text` one word at a time, pausing `delay` between words.
async fn type_out(term: &Term, text: &str, delay: Duration) -> std::io::Result<()> {
    let mut out = term.clone();
    for chunk in word_chunks(text) {
        out.write_all(chunk.as_bytes())?;
        out.flush()?;
        tokio::time::sleep(delay).await;
    }
    Ok(())
}

/// Split text into words, each carrying the whitespace that follows it.
///
/// Concatenating the chunks reproduces `text` exactly.
fn word_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_space = false;
    let mut word_seen = false;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            // Leading whitespace stays attached to the first word
            in_space = word_seen;
        } else if in_space {
            chunks.push(&text[start..i]);
            start = i;
            in_space = false;
        } else {
            word_seen = true;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_chunks_reassemble() {
        let text = "  Findings:\n- mild  opacity\n\nImpression ok ";
        let chunks = word_chunks(text);
        assert_eq!(chunks.concat(), text);
        assert_eq!(chunks[0], "  Findings:\n");
        assert_eq!(chunks.last(), Some(&"ok "));
    }

    #[test]
    fn test_word_chunks_empty() {
        assert!(word_chunks("").is_empty());
    }

    #[test]
    fn test_hidden_spinner() {
        let pb = create_spinner(false);
        assert!(pb.is_hidden());
    }
}
