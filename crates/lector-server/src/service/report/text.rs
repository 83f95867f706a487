use std::fmt::Write;

use super::{DocumentReport, NO_INTERACTIONS};

/// Renders the plain text report.
pub(super) fn render(report: &DocumentReport<'_>) -> String {
    let document = report.document;
    let mut out = String::new();

    // Writing into a `String` cannot fail.
    let _ = writeln!(out, "REPORT FOR DOCUMENT: {}", document.file_name);
    let _ = writeln!(out, "========================================\n");
    let _ = writeln!(out, "STATUS: {}", document.status);
    let _ = writeln!(out, "CREATED AT: {}\n", report.created_at());
    let _ = writeln!(out, "--- EXTRACTED TEXT (OCR) ---");
    let _ = writeln!(out, "{}\n", report.extracted_text());
    let _ = writeln!(out, "--- AI INTERACTIONS ---");

    if report.interactions.is_empty() {
        out.push_str(NO_INTERACTIONS);
    }

    for interaction in report.interactions {
        let _ = writeln!(out, "\n[QUESTION]: {}", interaction.prompt);
        let _ = writeln!(out, "[ANSWER]: {}", interaction.answer);
    }

    out
}

#[cfg(test)]
mod tests {
    use lector_postgres::types::DocumentStatus;

    use super::*;
    use crate::service::report::tests::{document, interaction};

    #[test]
    fn completed_document_with_interactions() {
        let document = document(DocumentStatus::Completed, Some("Total: 42.00"));
        let interactions = [
            interaction("What is the total?", "42.00"),
            interaction("Who issued it?", "ACME"),
        ];

        let text = render(&DocumentReport::new(&document, &interactions));
        let expected = "REPORT FOR DOCUMENT: invoice.pdf\n\
                        ========================================\n\
                        \n\
                        STATUS: COMPLETED\n\
                        CREATED AT: 2025-03-14 09:26:53 UTC\n\
                        \n\
                        --- EXTRACTED TEXT (OCR) ---\n\
                        Total: 42.00\n\
                        \n\
                        --- AI INTERACTIONS ---\n\
                        \n\
                        [QUESTION]: What is the total?\n\
                        [ANSWER]: 42.00\n\
                        \n\
                        [QUESTION]: Who issued it?\n\
                        [ANSWER]: ACME\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn failed_document_uses_placeholders() {
        let document = document(DocumentStatus::Failed, None);
        let text = render(&DocumentReport::new(&document, &[]));

        assert!(text.contains("STATUS: FAILED\n"));
        assert!(text.contains("--- EXTRACTED TEXT (OCR) ---\nNo text extracted.\n\n"));
        assert!(text.ends_with("--- AI INTERACTIONS ---\nNo interactions recorded."));
    }
}
