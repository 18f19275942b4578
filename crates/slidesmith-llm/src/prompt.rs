/// Build the single-layout prompt for one outline point. The template
/// embeds an example of the exact JSON shape expected back plus the
/// full enumerations of allowed layout and content types.
pub(crate) fn layout_prompt(outline: &str, index: usize) -> String {
    include_str!("../prompts/layout.md")
        .replace("{{outline}}", outline)
        .replace("{{slide_order}}", &(index + 1).to_string())
}

/// Build the outline-generation prompt for a topic.
pub(crate) fn outline_prompt(topic: &str) -> String {
    include_str!("../prompts/outline.md").replace("{{topic}}", topic)
}
