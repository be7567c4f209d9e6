/*!
Descriptive information about a program, shown alongside its usage message.
*/

use core::fmt;

/// The product information printed at the top of a program's output, like:
///
/// ```text
/// MyTool 1.2.0
/// Copyright (C) 2001-2024 The MyTool Developers
/// https://example.com/mytool
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub product: String,
    pub version: Option<String>,
    pub copyright: Option<String>,
    pub homepage: Option<String>,
}

impl Banner {
    #[must_use]
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(self, version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_copyright(self, copyright: impl Into<String>) -> Self {
        Self {
            copyright: Some(copyright.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_homepage(self, homepage: impl Into<String>) -> Self {
        Self {
            homepage: Some(homepage.into()),
            ..self
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::printers::print_banner(f, self)
    }
}
