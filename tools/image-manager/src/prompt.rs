// SPDX-License-Identifier: PMPL-1.0-or-later
//! Prompts sent to the vision model

use crate::config::PromptConfig;

pub const SYSTEM_PROMPT: &str = "You are an expert at analyzing website images for accessibility and SEO.
Generate concise, descriptive alt text that:
- Describes the key visual elements
- Is specific and actionable
- Is under 125 characters
- Uses natural language
- Focuses on what's relevant for the business context";

/// Built-in context sentences keyed by image category (parent directory name)
const CATEGORY_CONTEXTS: &[(&str, &str)] = &[
    (
        "hero",
        "This is a hero/banner image for a property concierge service website in Puerto Rico. It should convey trust, professionalism, and tropical appeal.",
    ),
    (
        "services",
        "This image represents a specific service offering (property management, translation, transportation, or coordination services) for a Puerto Rico property concierge business.",
    ),
    (
        "about",
        "This image represents a key benefit or team aspect of the property concierge service, likely showing bilingual capability, local expertise, or experience.",
    ),
    (
        "testimonials",
        "This is an avatar or profile image for a customer testimonial.",
    ),
    (
        "social",
        "This is a social media preview image (Open Graph or Twitter Card) for sharing the website.",
    ),
    (
        "icons",
        "This is an icon used for visual navigation or to represent a service feature.",
    ),
    (
        "misc",
        "This is a logo, branding element, or miscellaneous graphic for the website.",
    ),
];

const RESPONSE_TEMPLATE: &str = r#"Please provide:
1. A concise alt text (under 125 characters)
2. A detailed description (2-3 sentences)
3. Key visual elements (comma-separated list)
4. Suggested use cases for this image
5. Any accessibility concerns

Format as JSON:
{
    "alt_text": "...",
    "description": "...",
    "key_elements": ["...", "..."],
    "use_cases": ["...", "..."],
    "accessibility_notes": "..."
}"#;

/// Context sentence for a category.
///
/// Configured contexts win over the built-in table; anything else gets a
/// generic sentence naming the category and the site.
pub fn context_prompt(config: &PromptConfig, category: &str) -> String {
    if let Some(context) = config.contexts.get(category) {
        return context.clone();
    }

    CATEGORY_CONTEXTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, context)| context.to_string())
        .unwrap_or_else(|| {
            format!(
                "This is a {} image for a {}.",
                category, config.site_description
            )
        })
}

/// Full user prompt for one image
pub fn user_prompt(config: &PromptConfig, category: &str, file_stem: &str) -> String {
    format!(
        "{}\nFile name: {}\n\n{}",
        context_prompt(config, category),
        file_stem,
        RESPONSE_TEMPLATE
    )
}
