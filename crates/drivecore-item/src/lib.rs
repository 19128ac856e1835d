use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One record returned by a drive search. Never mutated after it leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveItemResult {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub is_special_folder: bool,
    #[serde(default)]
    pub is_image: bool,
}

impl DriveItemResult {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_folder: false,
            is_special_folder: false,
            is_image: false,
        }
    }

    pub fn folder(mut self) -> Self {
        self.is_folder = true;
        self
    }

    pub fn special_folder(mut self) -> Self {
        self.is_special_folder = true;
        self
    }

    pub fn image(mut self) -> Self {
        self.is_image = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Reserved for items waiting on (or missing) a thumbnail.
    Placeholder,
    Folder,
    Image,
    File,
}

impl IconKind {
    pub fn asset_name(self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Folder => "folder",
            Self::Image => "image",
            Self::File => "file",
        }
    }
}

/// First match wins: folder flags beat the image flag.
pub fn classify(item: &DriveItemResult) -> IconKind {
    if item.is_folder || item.is_special_folder {
        IconKind::Folder
    } else if item.is_image {
        IconKind::Image
    } else {
        IconKind::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_wins_over_image() {
        let item = DriveItemResult::new("1", "Holiday").folder().image();
        assert_eq!(classify(&item), IconKind::Folder);
    }

    #[test]
    fn special_folder_is_folder() {
        let item = DriveItemResult::new("2", "Documents").special_folder();
        assert_eq!(classify(&item), IconKind::Folder);
    }

    #[test]
    fn image_and_plain_file() {
        assert_eq!(
            classify(&DriveItemResult::new("3", "cat.png").image()),
            IconKind::Image
        );
        assert_eq!(
            classify(&DriveItemResult::new("4", "Report.pdf")),
            IconKind::File
        );
    }

    #[test]
    fn missing_flags_decode_as_false() {
        let item: DriveItemResult =
            serde_json::from_str(r#"{"id":"9","name":"notes.txt"}"#).unwrap();
        assert_eq!(item.id.as_str(), "9");
        assert_eq!(classify(&item), IconKind::File);
    }
}
