use iced::Color;

use drivecore_item::IconKind;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "heic", "svg",
];

pub(crate) fn contains_ascii_case_insensitive(haystack: &str, needle_lower_ascii: &str) -> bool {
    if needle_lower_ascii.is_empty() {
        return true;
    }

    let h = haystack.as_bytes();
    let n = needle_lower_ascii.as_bytes();
    if n.len() > h.len() {
        return false;
    }

    h.windows(n.len())
        .any(|window| window.iter().zip(n).all(|(a, b)| a.to_ascii_lowercase() == *b))
}

pub(crate) fn is_image_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Elides the middle of a long label so its start and extension stay readable.
pub(crate) fn shorten_label(label: &str, max_chars: usize) -> String {
    let count = label.chars().count();
    if count <= max_chars {
        return label.to_string();
    }

    let budget = max_chars.saturating_sub(1);
    let tail = budget / 2;
    let head = budget - tail;
    let byte_at = |nth: usize| {
        label
            .char_indices()
            .nth(nth)
            .map(|(index, _)| index)
            .unwrap_or(label.len())
    };

    format!("{}\u{2026}{}", &label[..byte_at(head)], &label[byte_at(count - tail)..])
}

pub(crate) fn icon_glyph(icon: IconKind) -> &'static str {
    match icon {
        IconKind::Placeholder => "[ ]",
        IconKind::Folder => "[D]",
        IconKind::Image => "[I]",
        IconKind::File => "[F]",
    }
}

pub(crate) fn icon_color(icon: IconKind) -> Color {
    match icon {
        IconKind::Placeholder => Color::from_rgb8(120, 120, 120),
        IconKind::Folder => Color::from_rgb8(246, 224, 94),
        IconKind::Image => Color::from_rgb8(104, 211, 145),
        IconKind::File => Color::from_rgb8(220, 220, 220),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ascii_case_insensitive_works() {
        assert!(contains_ascii_case_insensitive("QuarterlyReport.pdf", "report"));
        assert!(!contains_ascii_case_insensitive("notes.txt", "report"));
        assert!(contains_ascii_case_insensitive("anything", ""));
    }

    #[test]
    fn image_names_by_extension() {
        assert!(is_image_name("beach.JPG"));
        assert!(is_image_name("diagram.svg"));
        assert!(!is_image_name("report.pdf"));
        assert!(!is_image_name("png"));
    }

    #[test]
    fn shorten_label_keeps_head_and_extension() {
        assert_eq!(shorten_label("Report.pdf", 10), "Report.pdf");
        assert_eq!(shorten_label("QuarterlyReport.pdf", 9), "Quar\u{2026}.pdf");
        assert_eq!(shorten_label("r\u{e9}sum\u{e9}-final.docx", 8), "r\u{e9}su\u{2026}ocx");
    }
}
