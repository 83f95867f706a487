use lector_postgres::types::constants::document::{DEFAULT_FILE_NAME, MAX_FILE_NAME_LENGTH};

/// Reduces a client-supplied file name to a safe display name.
///
/// Drops directory components and control characters and caps the length.
/// Falls back to `"document"` when nothing usable remains.
pub fn sanitize_file_name(file_name: Option<&str>) -> String {
    let base = file_name
        .unwrap_or_default()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_FILE_NAME_LENGTH)
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return DEFAULT_FILE_NAME.to_owned();
    }

    cleaned.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_file_name(Some("invoice.pdf")), "invoice.pdf");
    }

    #[test]
    fn strips_directories() {
        assert_eq!(sanitize_file_name(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_file_name(Some("C:\\Users\\ada\\scan.png")), "scan.png");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(sanitize_file_name(None), "document");
        assert_eq!(sanitize_file_name(Some("")), "document");
        assert_eq!(sanitize_file_name(Some("uploads/")), "document");
        assert_eq!(sanitize_file_name(Some("  \t ")), "document");
        assert_eq!(sanitize_file_name(Some("..")), "document");
    }

    #[test]
    fn caps_length_in_characters() {
        let long = "é".repeat(400);
        let name = sanitize_file_name(Some(&long));
        assert_eq!(name.chars().count(), MAX_FILE_NAME_LENGTH);
    }
}
