use drivecore_client::ThumbnailBytes;
use drivecore_item::{classify, DriveItemResult, IconKind};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub label: String,
    pub icon: IconKind,
    pub thumbnail: Option<ThumbnailBytes>,
}

impl RenderedItem {
    pub fn from_result(result: &DriveItemResult) -> Self {
        Self {
            label: result.name.clone(),
            icon: classify(result),
            thumbnail: None,
        }
    }

    /// Thumbnail path: the fetched image if there is one, the placeholder otherwise.
    pub fn with_thumbnail(result: &DriveItemResult, thumbnail: Option<ThumbnailBytes>) -> Self {
        let icon = if thumbnail.is_some() {
            classify(result)
        } else {
            IconKind::Placeholder
        };

        Self {
            label: result.name.clone(),
            icon,
            thumbnail,
        }
    }
}

/// The rendered batch currently on screen, kept in arrival order.
#[derive(Debug, Default)]
pub struct ResultList {
    items: Vec<RenderedItem>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases every tracked item and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let released = self.items.len();
        self.items.clear();
        if released > 0 {
            debug!(released, "cleared result list");
        }
        released
    }

    pub fn append(&mut self, item: RenderedItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderedItem> {
        self.items.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a RenderedItem;
    type IntoIter = std::slice::Iter<'a, RenderedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<DriveItemResult> {
        vec![
            DriveItemResult::new("1", "zeta.txt"),
            DriveItemResult::new("2", "Alpha").folder(),
            DriveItemResult::new("3", "beach.jpg").image(),
        ]
    }

    #[test]
    fn clear_then_append_keeps_arrival_order() {
        let mut list = ResultList::new();
        list.append(RenderedItem::from_result(&DriveItemResult::new("0", "old.doc")));

        assert_eq!(list.clear(), 1);
        for result in &batch() {
            list.append(RenderedItem::from_result(result));
        }

        assert_eq!(list.labels(), ["zeta.txt", "Alpha", "beach.jpg"]);
        let icons: Vec<_> = list.iter().map(|item| item.icon).collect();
        assert_eq!(icons, [IconKind::File, IconKind::Folder, IconKind::Image]);
    }

    #[test]
    fn clearing_empty_list_releases_nothing() {
        let mut list = ResultList::new();
        assert_eq!(list.clear(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn missing_thumbnail_falls_back_to_placeholder() {
        let result = DriveItemResult::new("3", "beach.jpg").image();
        let without = RenderedItem::with_thumbnail(&result, None);
        assert_eq!(without.icon, IconKind::Placeholder);

        let with = RenderedItem::with_thumbnail(&result, Some(vec![0xff, 0xd8].into()));
        assert_eq!(with.icon, IconKind::Image);
        assert!(with.thumbnail.is_some());
    }
}
