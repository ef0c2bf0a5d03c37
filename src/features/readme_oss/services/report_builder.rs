//! Plain-text layout of the ReadMe OSS document.
//!
//! Output order mirrors input order exactly: no sorting, deduplication or
//! truncation happens here.

use crate::features::readme_oss::models::ReportContents;

/// Width of both separator lines
pub const SEPARATOR_WIDTH: usize = 121;

/// Blank-line break between blocks
pub const BREAK: &str = "\r\n\r\n";

pub const LINE_END: &str = "\r\n";

pub const COPYRIGHT_HEADER: &str = "Copyright notices";
pub const COPYRIGHT_PLACEHOLDER_HEADER: &str = "<Copyright notices>";
pub const COPYRIGHT_PLACEHOLDER_BODY: &str = "<notices>";

/// Render the report for `package_name`
pub fn generate_report(contents: &ReportContents, package_name: &str) -> String {
    let header_separator = "=".repeat(SEPARATOR_WIDTH);
    let license_separator = "-".repeat(SEPARATOR_WIDTH);

    let mut output = String::new();
    output.push_str(&header_separator);
    output.push_str(BREAK);
    output.push_str(package_name);
    output.push_str(BREAK);

    for license in &contents.licenses {
        output.push_str(&license.text);
        output.push_str(BREAK);
        output.push_str(&license_separator);
        output.push_str(BREAK);
    }

    if contents.copyrights.is_empty() {
        output.push_str(COPYRIGHT_PLACEHOLDER_HEADER);
        output.push_str(BREAK);
        output.push_str(COPYRIGHT_PLACEHOLDER_BODY);
    } else {
        output.push_str(COPYRIGHT_HEADER);
        output.push_str(BREAK);
        for copyright in &contents.copyrights {
            output.push_str(&copyright.content);
            output.push_str(LINE_END);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::readme_oss::models::{CopyrightStatement, LicenseStatement};

    fn license(text: &str) -> LicenseStatement {
        LicenseStatement {
            license_id: 0,
            content: String::new(),
            text: text.to_string(),
            files: Vec::new(),
        }
    }

    fn copyright(content: &str) -> CopyrightStatement {
        CopyrightStatement {
            content: content.to_string(),
            files: Vec::new(),
        }
    }

    fn contents(licenses: &[&str], copyrights: &[&str]) -> ReportContents {
        ReportContents {
            licenses: licenses.iter().map(|t| license(t)).collect(),
            copyrights: copyrights.iter().map(|c| copyright(c)).collect(),
        }
    }

    #[test]
    fn test_acme_report_layout() {
        let report = generate_report(
            &contents(&["MIT text", "BSD text"], &["Copyright 2020 Acme"]),
            "acme-lib",
        );

        let equals = "=".repeat(121);
        let dashes = "-".repeat(121);
        let expected = format!(
            "{equals}\r\n\r\nacme-lib\r\n\r\n\
             MIT text\r\n\r\n{dashes}\r\n\r\n\
             BSD text\r\n\r\n{dashes}\r\n\r\n\
             Copyright notices\r\n\r\nCopyright 2020 Acme\r\n"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_no_copyrights_ends_with_placeholders() {
        let report = generate_report(&contents(&["MIT text"], &[]), "acme-lib");

        assert!(report.ends_with("<Copyright notices>\r\n\r\n<notices>"));
        assert!(!report.contains("\r\nCopyright notices"));
    }

    #[test]
    fn test_empty_contents() {
        let report = generate_report(&ReportContents::default(), "empty");

        let expected = format!(
            "{}\r\n\r\nempty\r\n\r\n<Copyright notices>\r\n\r\n<notices>",
            "=".repeat(121)
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_block_counts_match_statement_counts() {
        let report = generate_report(
            &contents(
                &["A", "B", "A", "C"],
                &["Copyright 1 X", "Copyright 2 Y", "Copyright 1 X"],
            ),
            "pkg",
        );

        let dashes = "-".repeat(121);
        assert_eq!(report.matches(&format!("{dashes}\r\n\r\n")).count(), 4);

        let (_, copyright_section) = report.split_once("Copyright notices\r\n\r\n").unwrap();
        let lines: Vec<&str> = copyright_section.split_terminator("\r\n").collect();
        assert_eq!(lines, vec!["Copyright 1 X", "Copyright 2 Y", "Copyright 1 X"]);
        assert!(copyright_section.ends_with("\r\n"));
    }

    #[test]
    fn test_separators_are_full_width() {
        let report = generate_report(&contents(&["only"], &[]), "pkg");

        let first_line = report.split("\r\n").next().unwrap();
        assert_eq!(first_line.len(), SEPARATOR_WIDTH);
        assert!(first_line.chars().all(|c| c == '='));
        assert!(report.contains(&format!("\r\n{}\r\n", "-".repeat(SEPARATOR_WIDTH))));
    }

    #[test]
    fn test_order_follows_input() {
        let forward = generate_report(&contents(&["first", "second"], &[]), "pkg");
        let reversed = generate_report(&contents(&["second", "first"], &[]), "pkg");

        assert!(forward.find("first").unwrap() < forward.find("second").unwrap());
        assert!(reversed.find("second").unwrap() < reversed.find("first").unwrap());
        assert_eq!(forward.len(), reversed.len());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let input = contents(&["MIT text"], &["Copyright 2020 Acme"]);
        assert_eq!(
            generate_report(&input, "acme-lib"),
            generate_report(&input, "acme-lib")
        );
    }
}
