use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Split a `DOC_TYPE=TEXT` checklist argument.
pub fn parse_checklist(raw: &str) -> anyhow::Result<(String, String)> {
    let (doc_type, text) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid checklist '{raw}': expected DOC_TYPE=TEXT"))?;
    let doc_type = doc_type.trim();
    if doc_type.is_empty() {
        anyhow::bail!("invalid checklist '{raw}': document type is empty");
    }
    Ok((doc_type.to_string(), text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use rvw_core::enums::{ReviewStatus, RuleMode};

    use super::{parse_checklist, parse_enum};

    #[test]
    fn parses_snake_case_enum() {
        let status: ReviewStatus = parse_enum("completed", "status").expect("status should parse");
        assert_eq!(status, ReviewStatus::Completed);
    }

    #[test]
    fn parses_mixed_case_value() {
        let mode: RuleMode = parse_enum("Replace", "mode").expect("mode should parse");
        assert_eq!(mode, RuleMode::Replace);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<ReviewStatus>("done", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'done'"));
    }

    #[test]
    fn checklist_splits_on_first_equals() {
        let (doc_type, text) =
            parse_checklist("invoice = Total = sum of lines").expect("should parse");
        assert_eq!(doc_type, "invoice");
        assert_eq!(text, "Total = sum of lines");
    }

    #[test]
    fn checklist_without_separator_is_rejected() {
        assert!(parse_checklist("invoice").is_err());
        assert!(parse_checklist(" = Totals match").is_err());
    }
}
