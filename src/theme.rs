//! Resolved theme: global block, per-region defaults and the color palette

use std::path::Path;

use indexmap::IndexMap;

use crate::{
    colors::Color,
    config::{read_document, Attributes, StatusLine, ThemeDocument},
    error::StatuslineResult,
};

/// One of the three status line areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    StatusLeft,
    Window,
    StatusRight,
}

impl Region {
    /// Section name used in both documents.
    pub const fn section(self) -> &'static str {
        match self {
            Region::StatusLeft => "status_left",
            Region::Window => "window",
            Region::StatusRight => "status_right",
        }
    }
}

/// Named colors collected from a theme document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemePalette {
    slots: IndexMap<String, String>,
}

impl ThemePalette {
    /// Collect `foreground`, `background` and every explicit region color
    /// as `<region>.<attribute>`. Values written as `#...` must be valid
    /// hex colors; tmux color names pass through.
    pub fn from_document(doc: &ThemeDocument) -> StatuslineResult<Self> {
        let mut slots = IndexMap::new();

        let globals = [
            ("foreground", &doc.status_line.foreground),
            ("background", &doc.status_line.background),
        ];
        for (slot, value) in globals {
            if let Some(value) = value {
                slots.insert(slot.to_string(), checked(value)?);
            }
        }

        for (region, attrs) in [
            (Region::StatusLeft, &doc.status_left),
            (Region::Window, &doc.window),
            (Region::StatusRight, &doc.status_right),
        ] {
            for (attr, value) in attrs.colors() {
                slots.insert(format!("{}.{}", region.section(), attr), checked(value)?);
            }
        }

        Ok(Self { slots })
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn checked(value: &str) -> StatuslineResult<String> {
    if value.starts_with('#') {
        Color::from_hex(value)?;
    }
    Ok(value.to_string())
}

/// A loaded theme. Region defaults are filled from the global block once,
/// at construction, and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    status_line: StatusLine,
    status_left: Attributes,
    window: Attributes,
    status_right: Attributes,
    palette: ThemePalette,
}

impl Theme {
    pub fn load(path: impl AsRef<Path>) -> StatuslineResult<Self> {
        let path = path.as_ref();
        let src = read_document(path)?;
        Self::from_yaml(&src, path)
    }

    pub fn from_yaml(src: &str, origin: impl AsRef<Path>) -> StatuslineResult<Self> {
        Self::from_document(ThemeDocument::from_yaml(src, origin)?)
    }

    pub fn from_document(doc: ThemeDocument) -> StatuslineResult<Self> {
        let palette = ThemePalette::from_document(&doc)?;
        let status_left = region_defaults(&doc.status_line, Region::StatusLeft, doc.status_left);
        let window = region_defaults(&doc.status_line, Region::Window, doc.window);
        let status_right = region_defaults(&doc.status_line, Region::StatusRight, doc.status_right);

        Ok(Self {
            status_line: doc.status_line,
            status_left,
            window,
            status_right,
            palette,
        })
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn defaults(&self, region: Region) -> &Attributes {
        match region {
            Region::StatusLeft => &self.status_left,
            Region::Window => &self.window,
            Region::StatusRight => &self.status_right,
        }
    }

    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// Global icon for a region: the right-hand one for `status_right`,
    /// the left-hand one elsewhere.
    pub fn icon(&self, region: Region) -> Option<&str> {
        match region {
            Region::StatusRight => self.status_line.right_icon.as_deref(),
            _ => self.status_line.left_icon.as_deref(),
        }
    }

    /// Global decorator for a region, sided like [`Theme::icon`].
    pub fn decorator(&self, region: Region) -> Option<&str> {
        match region {
            Region::StatusRight => self.status_line.right_decorator.as_deref(),
            _ => self.status_line.left_decorator.as_deref(),
        }
    }
}

fn region_defaults(status_line: &StatusLine, region: Region, explicit: Attributes) -> Attributes {
    let fg = &status_line.foreground;
    let bg = &status_line.background;
    let (icon, decorator) = match region {
        Region::StatusRight => (&status_line.right_icon, &status_line.right_decorator),
        _ => (&status_line.left_icon, &status_line.left_decorator),
    };

    let inherited = Attributes {
        fg_option: fg.clone(),
        bg_option: bg.clone(),
        fg_icon: fg.clone(),
        bg_icon: bg.clone(),
        fg_decorator: fg.clone(),
        bg_decorator: bg.clone(),
        icon: icon.clone(),
        decorator: decorator.clone(),
        style: status_line.style.clone(),
        fg_window: fg.clone(),
        bg_window: bg.clone(),
        fg_number: fg.clone(),
        bg_number: bg.clone(),
    };
    explicit.or(&inherited)
}
