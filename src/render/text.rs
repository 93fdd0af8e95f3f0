//! Plain text rendering for extraction results.

use crate::model::{ExtractionResult, PageRecord};

/// Width of the rules framing banners and page headers.
pub const RULE_WIDTH: usize = 80;

/// Header written before each page's text.
///
/// ```
/// let header = pagewise::render::page_delimiter(2);
/// assert!(header.contains("PAGE 2"));
/// ```
pub fn page_delimiter(number: u32) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    format!("{rule}\nPAGE {number}\n{rule}\n\n")
}

/// Concatenate all pages in order, each preceded by its delimiter.
///
/// Failed pages contribute their delimiter and an empty body, so every
/// page number appears in the output.
pub fn to_text(result: &ExtractionResult) -> String {
    let mut output = String::new();
    for page in result.pages() {
        push_page(&mut output, page);
    }
    output
}

fn push_page(output: &mut String, page: &PageRecord) {
    output.push_str(&page_delimiter(page.number));
    output.push_str(&page.text);
    output.push_str("\n\n");
}

/// Console report: a banner with the document name and page count, then
/// every page block.
///
/// Unlike [`to_text`], the report notes why a failed page is empty.
pub fn report(result: &ExtractionResult) -> String {
    let banner = "=".repeat(RULE_WIDTH);
    let mut output = format!(
        "{banner}\nDOCUMENT: {}\nTOTAL PAGES: {}\n{banner}\n\n",
        result.name(),
        result.page_count()
    );

    for page in result.pages() {
        match page.failure_reason() {
            Some(reason) => {
                output.push_str(&page_delimiter(page.number));
                output.push_str(&format!("[extraction failed: {}]\n\n", reason));
            }
            None => push_page(&mut output, page),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractionResult {
        ExtractionResult::new(
            "memo.pdf",
            vec![
                PageRecord::extracted(1, "Hello, world!"),
                PageRecord::failed(2, "broken stream"),
            ],
        )
    }

    #[test]
    fn test_page_delimiter() {
        let header = page_delimiter(7);
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines[0].chars().count(), RULE_WIDTH);
        assert_eq!(lines[1], "PAGE 7");
        assert!(header.ends_with("\n\n"));
    }

    #[test]
    fn test_to_text() {
        let text = to_text(&sample());
        let expected = format!(
            "{}Hello, world!\n\n{}\n\n",
            page_delimiter(1),
            page_delimiter(2)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report() {
        let report = report(&sample());
        assert!(report.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(report.contains("DOCUMENT: memo.pdf"));
        assert!(report.contains("TOTAL PAGES: 2"));
        assert!(report.contains("Hello, world!"));
        assert!(report.contains("PAGE 2"));
        assert!(report.contains("[extraction failed: broken stream]"));
    }
}
