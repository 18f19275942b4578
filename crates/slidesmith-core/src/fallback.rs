use crate::content::{ContentItem, ContentPayload, ContentType};
use crate::layout::{LayoutType, SlideLayout};
use crate::stock::random_stock_url;
use uuid::Uuid;

/// Layout types rotated across fallback slides so a degraded deck still
/// has visual variety.
const LAYOUT_ROTATION: [LayoutType; 5] = [
    LayoutType::ImageAndText,
    LayoutType::TextAndImage,
    LayoutType::TwoColumns,
    LayoutType::AccentLeft,
    LayoutType::AccentRight,
];

const FALLBACK_BULLETS: [&str; 4] = [
    "Key concepts and definitions",
    "Practical applications and examples",
    "Benefits and considerations",
    "Future trends and developments",
];

const GENERIC_BODY: &str = "Explore the key concepts and insights related to this topic.";

const TITLE_MAX_CHARS: usize = 80;

/// Synthesize a slide layout from an outline point without any remote
/// call. Title, body, and layout type are pure functions of the inputs;
/// only the stock-image pick is pseudo-random.
pub fn fallback_layout(outline: &str, index: usize) -> SlideLayout {
    let layout_type = LAYOUT_ROTATION[index % LAYOUT_ROTATION.len()];

    // Title is the text before the first period or comma, capped.
    let head = outline.split(['.', ',']).next().unwrap_or(outline);
    let title: String = head.chars().take(TITLE_MAX_CHARS).collect::<String>().trim().to_string();
    let body = outline
        .get(head.len()..)
        .map(|rest| rest.trim_start_matches(['.', ',']).trim())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(GENERIC_BODY)
        .to_string();

    let slide_id = Uuid::new_v4().to_string();
    let alt = format!("Professional illustration representing {title}");

    let children = vec![
        ContentItem::text(ContentType::Heading1, "Heading1", title.clone(), "Heading1"),
        ContentItem::text(ContentType::Paragraph, "Paragraph", body, "Content"),
        ContentItem::image(random_stock_url(), alt),
        ContentItem {
            id: String::new(),
            content_type: ContentType::BulletList,
            name: "BulletList".to_string(),
            content: ContentPayload::Lines(FALLBACK_BULLETS.iter().map(|s| s.to_string()).collect()),
            alt: None,
            placeholder: Some("Bullet List".to_string()),
        },
    ];

    let mut root = ContentItem::column(children);
    root.id = format!("{slide_id}-content-{}", Uuid::new_v4());
    if let ContentPayload::Items(items) = &mut root.content {
        for (item_index, item) in items.iter_mut().enumerate() {
            item.id = format!("{slide_id}-item-{item_index}-{}", Uuid::new_v4());
        }
    }

    SlideLayout {
        slide_name: if title.is_empty() { format!("Slide {}", index + 1) } else { title },
        id: slide_id,
        layout_type,
        slide_order: index as u32 + 1,
        class_name: "min-h-[300px]".to_string(),
        content: root,
    }
}

/// Templated outline used when the text-generation quota is exhausted
/// before an outline could be produced.
pub fn fallback_outline(topic: &str) -> Vec<String> {
    [
        format!("Introduction to {topic} and its significance"),
        format!("Key concepts and principles of {topic}"),
        format!("Historical background and development of {topic}"),
        format!("Current applications and real-world examples of {topic}"),
        format!("Benefits and advantages of {topic}"),
        format!("Future trends and developments in {topic}"),
        format!("Conclusion and key takeaways about {topic}"),
    ]
    .into()
}
