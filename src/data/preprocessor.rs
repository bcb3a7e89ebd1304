// ============================================================
// Layer 4 — OCR Text Normalizer
// ============================================================
// Tesseract output is noisy in predictable ways:
//   - a form feed (\x0c) after every page
//   - words hyphenated across line breaks ("appli-\ncation")
//   - runs of spaces from column layouts
//   - long stacks of blank lines between blocks
//
// The normalizer fixes those so previews read cleanly and the
// vectorizer sees whole words. It never drops letters or digits.

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, raw: &str) -> String {
        // form feeds, CRs and stray control characters
        let unified: String = raw
            .chars()
            .map(|c| match c {
                '\x0c' | '\r' => '\n',
                '\t' | '\u{00A0}' => ' ',
                c if c.is_control() && c != '\n' => ' ',
                c => c,
            })
            .collect();

        let lines: Vec<String> = unified.lines().map(collapse_spaces).collect();

        let mut out = String::with_capacity(unified.len());
        let mut blank_run = 0usize;
        let mut prev_hyphenated = false;

        for line in &lines {
            if line.is_empty() {
                blank_run += 1;
                continue;
            }

            // "appli-" directly above a lowercase "cation"
            let continues_word = prev_hyphenated
                && blank_run == 0
                && line.chars().next().is_some_and(char::is_lowercase);

            if continues_word {
                out.pop();
            } else if !out.is_empty() {
                out.push('\n');
                if blank_run > 0 {
                    out.push('\n');
                }
            }
            blank_run = 0;

            out.push_str(line);
            prev_hyphenated = ends_with_word_hyphen(line);
        }

        out
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_spaces(line: &str) -> String {
    line.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn ends_with_word_hyphen(line: &str) -> bool {
    let mut rev = line.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some('-'), Some(prev)) if prev.is_alphabetic()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feed_becomes_line_break() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("page one\x0cpage two"), "page one\npage two");
    }

    #[test]
    fn hyphenated_words_are_rejoined() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("my appli-\ncation form"), "my application form");
    }

    #[test]
    fn hyphen_before_a_blank_line_is_kept() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.clean("Ministry of ICT-\n\nHarare office"),
            "Ministry of ICT-\n\nHarare office"
        );
        assert_eq!(n.clean("appli-\n\ncation"), "appli-\n\ncation");
    }

    #[test]
    fn hyphen_before_a_capitalised_line_is_kept() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("ICT-\nHarare"), "ICT-\nHarare");
        assert_eq!(n.clean("Ref ZW-\n2024 budget"), "Ref ZW-\n2024 budget");
    }

    #[test]
    fn trailing_hyphen_survives() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("see over-"), "see over-");
    }

    #[test]
    fn lone_dash_is_not_joined() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("total -\n42"), "total -\n42");
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("Dear Sir,\n\n\n\n\nI write"), "Dear Sir,\n\nI write");
    }

    #[test]
    fn spaces_collapse_and_trim() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("  Invoice   no.\t 17  "), "Invoice no. 17");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean(" \n\x0c\n  "), "");
    }
}
