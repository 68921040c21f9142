//! Output formatting for CLI

use serde_json::Value;

use crate::content::DocumentCounts;

pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Document counts, flagging missing or duplicated singletons
pub fn format_counts(counts: &DocumentCounts) -> String {
    let mut output = String::new();

    output.push_str("Dataset documents:\n");
    output.push_str(&format!("  Speakers:      {}\n", counts.speakers));
    output.push_str(&format!("  Team members:  {}\n", counts.team));
    output.push_str(&format!("  Partners:      {}\n", counts.partners));
    output.push_str(&format!("  Supporters:    {}\n", counts.supporters));

    for (name, count) in [
        ("siteSettings", counts.site_settings),
        ("homePage", counts.home_page),
    ] {
        match count {
            1 => output.push_str(&format!("\n✅ {} present\n", name)),
            0 => output.push_str(&format!("\n⚠️  {} missing\n", name)),
            n => output.push_str(&format!("\n⚠️  {} has {} documents (expected 1)\n", name, n)),
        }
    }

    output
}
