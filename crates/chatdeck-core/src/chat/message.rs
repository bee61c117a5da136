use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

/// Shared, immutable binary payload (uploaded image or rendered drawing).
pub type Blob = Arc<[u8]>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Drawing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Blob(Blob),
}

/// One turn in a chat. Fields are private so a message cannot change after
/// it has been appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    kind: MessageKind,
    content: Content,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            kind: MessageKind::Text,
            content: Content::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            kind: MessageKind::Text,
            content: Content::Text(content.into()),
        }
    }

    pub fn image(bytes: impl Into<Blob>) -> Self {
        Self {
            role: Role::User,
            kind: MessageKind::Image,
            content: Content::Blob(bytes.into()),
        }
    }

    pub fn drawing(bytes: impl Into<Blob>) -> Self {
        Self {
            role: Role::User,
            kind: MessageKind::Drawing,
            content: Content::Blob(bytes.into()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Text body, if this is a text message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(s) => Some(s),
            Content::Blob(_) => None,
        }
    }

    /// Binary body, if this is an image or drawing.
    pub fn blob(&self) -> Option<&[u8]> {
        match &self.content {
            Content::Blob(b) => Some(b),
            Content::Text(_) => None,
        }
    }

    /// Pixel size of an image or drawing, read from its header.
    pub fn image_dimensions(&self) -> Option<(u32, u32)> {
        let bytes = self.blob()?;
        image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pair_kind_with_content() {
        let text = Message::user("Hello");
        assert_eq!(text.role(), Role::User);
        assert_eq!(text.kind(), MessageKind::Text);
        assert_eq!(text.text(), Some("Hello"));
        assert!(text.blob().is_none());

        let img = Message::image(vec![1u8, 2, 3]);
        assert_eq!(img.role(), Role::User);
        assert_eq!(img.kind(), MessageKind::Image);
        assert_eq!(img.blob(), Some(&[1u8, 2, 3][..]));
        assert!(img.text().is_none());

        let drawing = Message::drawing(vec![9u8]);
        assert_eq!(drawing.kind(), MessageKind::Drawing);

        let reply = Message::assistant("Hi there");
        assert_eq!(reply.role(), Role::Assistant);
    }

    #[test]
    fn test_image_dimensions() {
        let img = image::RgbaImage::new(3, 2);
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();

        assert_eq!(Message::image(png.into_inner()).image_dimensions(), Some((3, 2)));
        assert_eq!(Message::image(vec![0u8; 4]).image_dimensions(), None);
        assert_eq!(Message::user("text").image_dimensions(), None);
    }

    #[test]
    fn test_role_and_kind_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&MessageKind::Drawing).unwrap(), "\"drawing\"");
        assert_eq!(Role::User.to_string(), "user");
    }
}
