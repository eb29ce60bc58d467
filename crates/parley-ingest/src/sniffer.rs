//! Choosing a reader strategy for a document.

use crate::error::{IngestError, IngestResult};
use crate::readers::leading_label;
use parley_core::{Document, Paragraph, ReaderKind};
use tracing::debug;

/// Number of leading paragraphs inspected when sniffing.
pub const SNIFF_WINDOW: usize = 5;

/// Signal counts over the sniffed paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SniffScores {
    pub label: usize,
    pub italic: usize,
    pub bold: usize,
    pub list: usize,
}

impl SniffScores {
    /// Count the signals of the first `SNIFF_WINDOW` paragraphs, blank ones included.
    pub fn of(document: &Document) -> Self {
        document
            .paragraphs
            .iter()
            .take(SNIFF_WINDOW)
            .fold(Self::default(), |mut scores, paragraph| {
                scores.observe(paragraph);
                scores
            })
    }

    fn observe(&mut self, paragraph: &Paragraph) {
        if leading_label(&paragraph.text).is_some() {
            self.label += 1;
        }
        if paragraph.style.italic {
            self.italic += 1;
        }
        if paragraph.style.bold {
            self.bold += 1;
        }
        if paragraph.style.list_item {
            self.list += 1;
        }
    }

    pub fn get(&self, kind: ReaderKind) -> usize {
        match kind {
            ReaderKind::Label => self.label,
            ReaderKind::Italic => self.italic,
            ReaderKind::Bold => self.bold,
            ReaderKind::List => self.list,
        }
    }

    /// Highest scoring kind, ties going to the earlier kind in `ReaderKind::PRIORITY`.
    /// `None` when no signal was seen at all.
    pub fn best(&self) -> Option<ReaderKind> {
        let mut best: Option<(ReaderKind, usize)> = None;

        for kind in ReaderKind::PRIORITY {
            let score = self.get(kind);
            if score == 0 {
                continue;
            }
            match best {
                Some((_, top)) if top >= score => {}
                _ => best = Some((kind, score)),
            }
        }

        best.map(|(kind, _)| kind)
    }
}

/// Pick the reader kind for a document.
pub fn sniff(document: &Document) -> IngestResult<ReaderKind> {
    let scores = SniffScores::of(document);

    match scores.best() {
        Some(kind) => {
            debug!(
                "Sniffed {} as {} (label={}, italic={}, bold={}, list={})",
                document.path.display(),
                kind,
                scores.label,
                scores.italic,
                scores.bold,
                scores.list
            );
            Ok(kind)
        }
        None => Err(IngestError::UnreadableDocument {
            path: document.path.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(paragraphs: Vec<Paragraph>) -> Document {
        Document::new("t.docx", paragraphs)
    }

    #[test]
    fn test_label_document() {
        let document = doc(vec![
            Paragraph::new("Q: a?"),
            Paragraph::new("answer one."),
            Paragraph::new("Q: b?"),
        ]);
        assert_eq!(sniff(&document).unwrap(), ReaderKind::Label);
    }

    #[test]
    fn test_highest_score_wins() {
        let document = doc(vec![
            Paragraph::new("Kje?").bold(),
            Paragraph::new("Tam."),
            Paragraph::new("Kdaj?").bold(),
            Paragraph::new("Note: one labelled line"),
        ]);
        let scores = SniffScores::of(&document);
        assert_eq!(scores.bold, 2);
        assert_eq!(scores.label, 1);
        assert_eq!(sniff(&document).unwrap(), ReaderKind::Bold);
    }

    #[test]
    fn test_tie_break_order() {
        let italic_and_bold = doc(vec![Paragraph::new("x").bold(), Paragraph::new("y").italic()]);
        assert_eq!(sniff(&italic_and_bold).unwrap(), ReaderKind::Italic);

        let label_and_list = doc(vec![Paragraph::new("Q: x").list_item()]);
        assert_eq!(sniff(&label_and_list).unwrap(), ReaderKind::Label);

        let bold_and_list = doc(vec![Paragraph::new("x").bold(), Paragraph::new("y").list_item()]);
        assert_eq!(sniff(&bold_and_list).unwrap(), ReaderKind::Bold);
    }

    #[test]
    fn test_only_window_is_inspected() {
        let mut paragraphs: Vec<Paragraph> = (0..SNIFF_WINDOW)
            .map(|i| Paragraph::new(format!("plain {}", i)))
            .collect();
        paragraphs.push(Paragraph::new("late question").italic());

        assert!(matches!(
            sniff(&doc(paragraphs)),
            Err(IngestError::UnreadableDocument { .. })
        ));
    }

    #[test]
    fn test_blank_paragraphs_count_toward_the_window() {
        let mut paragraphs = vec![Paragraph::new(""); SNIFF_WINDOW];
        paragraphs.push(Paragraph::new("Q: late label"));
        assert!(matches!(
            sniff(&doc(paragraphs)),
            Err(IngestError::UnreadableDocument { .. })
        ));

        let mut paragraphs = vec![Paragraph::new(""); SNIFF_WINDOW - 1];
        paragraphs.push(Paragraph::new("Q: just in time"));
        assert_eq!(sniff(&doc(paragraphs)).unwrap(), ReaderKind::Label);
    }

    #[test]
    fn test_blank_styled_paragraph_still_scores() {
        let document = doc(vec![Paragraph::new("").bold(), Paragraph::new("prose")]);
        assert_eq!(SniffScores::of(&document).bold, 1);
        assert_eq!(sniff(&document).unwrap(), ReaderKind::Bold);
    }

    #[test]
    fn test_no_signal_is_unreadable() {
        let document = doc(vec![Paragraph::new("just prose"), Paragraph::new("more prose")]);
        assert_eq!(SniffScores::of(&document), SniffScores::default());
        assert!(SniffScores::of(&document).best().is_none());
        assert!(matches!(
            sniff(&document),
            Err(IngestError::UnreadableDocument { .. })
        ));
    }
}
