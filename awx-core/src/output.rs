//! Resource-name extraction from job stdout
//!
//! Best-effort heuristic over free-form log text: the resource name is
//! assumed to be the last path-like token, a forward slash followed by
//! word characters and terminated by a backslash or a double quote.
//! There is no structured field upstream carrying this value; if one
//! appears, it should replace this scan.

use regex_lite::Regex;

/// Pattern for path-like tokens: `/name\` or `/name"`.
const RESOURCE_PATTERN: &str = r#"/\w+[\\"]"#;

/// Scan job output for the last path-like token and return the bare
/// resource name (leading slash and trailing delimiter stripped).
///
/// Returns `None` when nothing in the text matches; this is not an
/// error, the caller just exports nothing.
pub fn extract_resource_name(output: &str) -> Option<String> {
    let pattern = Regex::new(RESOURCE_PATTERN).expect("resource pattern is valid");

    pattern.find_iter(output).last().map(|found| {
        let token = found.as_str();
        token[1..token.len() - 1].to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_match_wins() {
        let output = r#"creating /other\ ... done, wrote "/myResourceName" to state"#;
        assert_eq!(
            extract_resource_name(output),
            Some("myResourceName".to_string())
        );
    }

    #[test]
    fn test_backslash_delimited_token() {
        let output = r"copying files to /share\subdir";
        assert_eq!(extract_resource_name(output), Some("share".to_string()));
    }

    #[test]
    fn test_quote_delimited_token() {
        let output = r#"resource id: "/rg_prod_01""#;
        assert_eq!(extract_resource_name(output), Some("rg_prod_01".to_string()));
    }

    #[test]
    fn test_no_match_yields_none() {
        assert_eq!(extract_resource_name("nothing to see here"), None);
        assert_eq!(extract_resource_name(""), None);
        // A slash with no closing delimiter is not a match.
        assert_eq!(extract_resource_name("/unterminated token"), None);
    }
}
