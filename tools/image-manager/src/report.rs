// SPDX-License-Identifier: PMPL-1.0-or-later
//! Console summary of an analysis run

use crate::record::ImageRecord;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

const RULE: &str = "============================================================";

pub fn generate_report(records: &[ImageRecord], generated: DateTime<Local>) -> String {
    let mut lines = vec![
        String::new(),
        RULE.to_string(),
        "📊 IMAGE ANALYSIS REPORT".to_string(),
        RULE.to_string(),
        String::new(),
        format!("Total Images Analyzed: {}", records.len()),
        format!("Generated: {}", generated.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "📁 By Category:".to_string(),
    ];

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *categories.entry(record.category.as_str()).or_default() += 1;
    }
    for (category, count) in &categories {
        lines.push(format!("   {:<15}: {} images", category, count));
    }

    let total_kb: f64 = records.iter().map(|r| r.size_kb).sum();
    let average_kb = if records.is_empty() {
        0.0
    } else {
        total_kb / records.len() as f64
    };
    lines.extend([
        String::new(),
        "💾 Size Analysis:".to_string(),
        format!("   Total: {:.2} KB", total_kb),
        format!("   Average: {:.2} KB per image", average_kb),
        String::new(),
    ]);

    let needs_review = records.iter().filter(|r| r.needs_review()).count();
    if needs_review > 0 {
        lines.push(format!("⚠️  {} images need manual review", needs_review));
    } else {
        lines.push("✅ All images have alt text generated".to_string());
    }

    lines.push(String::new());
    lines.push(RULE.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ImageAnalysis;
    use crate::record::ImageInfo;

    fn analyzed(category: &str, size_kb: f64) -> ImageRecord {
        let analysis = ImageAnalysis {
            alt_text: "alt".to_string(),
            ..ImageAnalysis::default()
        };
        let info = ImageInfo {
            size_kb,
            ..ImageInfo::default()
        };
        ImageRecord::analyzed(format!("images/{}/x.png", category), category.to_string(), analysis, &info)
    }

    #[test]
    fn test_report_counts_and_sizes() {
        let records = vec![
            analyzed("services", 100.0),
            analyzed("hero", 250.5),
            analyzed("services", 49.5),
        ];
        let report = generate_report(&records, Local::now());

        assert!(report.contains("Total Images Analyzed: 3"));
        assert!(report.contains("   hero           : 1 images"));
        assert!(report.contains("   services       : 2 images"));
        assert!(report.find("hero").unwrap() < report.find("services").unwrap());
        assert!(report.contains("   Total: 400.00 KB"));
        assert!(report.contains("   Average: 133.33 KB per image"));
        assert!(report.contains("✅ All images have alt text generated"));
    }

    #[test]
    fn test_report_flags_failures() {
        let mut records = vec![analyzed("hero", 10.0)];
        records.push(ImageRecord::failed(
            "images/icons/a.png".into(),
            "icons".into(),
            "boom".into(),
            &ImageInfo::default(),
        ));
        let mut empty_alt = analyzed("misc", 1.0);
        empty_alt.alt_text.clear();
        records.push(empty_alt);

        let report = generate_report(&records, Local::now());
        assert!(report.contains("⚠️  2 images need manual review"));
    }

    #[test]
    fn test_empty_run() {
        let report = generate_report(&[], Local::now());
        assert!(report.contains("Total Images Analyzed: 0"));
        assert!(report.contains("   Average: 0.00 KB per image"));
    }
}
