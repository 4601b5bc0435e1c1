//! Content types accepted by the generator.
//!
//! Each [`ContentType`] maps to a static [`Descriptor`] holding what a front end
//! needs to draw the input field: label, placeholder, single/multi-line and an
//! optional hint line.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownContentType;

/// The kind of content a user wants to encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    #[default]
    Url,
    Text,
    AccessKey,
    Wifi,
    Email,
    Phone,
}

/// Static presentation data for a [`ContentType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
    pub hint: Option<&'static str>,
    /// Input must be an absolute `http`/`https` URL.
    pub requires_url: bool,
}

const DESCRIPTORS: [Descriptor; 6] = [
    Descriptor {
        label: "Link / URL",
        placeholder: "https://example.com",
        multiline: false,
        hint: None,
        requires_url: true,
    },
    Descriptor {
        label: "Text",
        placeholder: "Type any text...",
        multiline: true,
        hint: None,
        requires_url: false,
    },
    Descriptor {
        label: "Key / Hash",
        placeholder: "e.g. abc123-xyz789 or any access code",
        multiline: false,
        hint: None,
        requires_url: false,
    },
    Descriptor {
        label: "Wi-Fi",
        placeholder: "WIFI:T:WPA;S:NetworkName;P:NetworkPassword;;",
        multiline: true,
        hint: Some(
            "Format: WIFI:T:WPA;S:NetworkName;P:Password;; (replace the fields with your network name and password)",
        ),
        requires_url: false,
    },
    Descriptor {
        label: "E-mail",
        placeholder: "mailto:contact@example.com",
        multiline: false,
        hint: None,
        requires_url: false,
    },
    Descriptor {
        label: "Phone",
        placeholder: "tel:+5511999999999",
        multiline: false,
        hint: None,
        requires_url: false,
    },
];

impl ContentType {
    /// Every content type, in selector order.
    pub const ALL: [ContentType; 6] = [
        ContentType::Url,
        ContentType::Text,
        ContentType::AccessKey,
        ContentType::Wifi,
        ContentType::Email,
        ContentType::Phone,
    ];

    fn index(self) -> usize {
        use ContentType::*;
        match self {
            Url => 0,
            Text => 1,
            AccessKey => 2,
            Wifi => 3,
            Email => 4,
            Phone => 5,
        }
    }

    pub fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn placeholder(self) -> &'static str {
        self.descriptor().placeholder
    }

    pub fn is_multiline(self) -> bool {
        self.descriptor().multiline
    }

    /// Whether pressing Enter in the input field submits the form.
    ///
    /// Multi-line fields use Enter for line breaks, so only single-line
    /// types submit on it.
    pub fn submits_on_enter(self) -> bool {
        !self.is_multiline()
    }

    /// Stable identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        use ContentType::*;
        match self {
            Url => "url",
            Text => "text",
            AccessKey => "access-key",
            Wifi => "wifi",
            Email => "email",
            Phone => "phone",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}
