//! Style cascade resolution
//!
//! Every visual attribute of a segment is looked up in three places, first
//! hit wins: the segment's own override, the region default, the theme's
//! global block. The chain has no cycles, so a lookup either finds a value
//! or ends with nothing.

use std::fmt;

use crate::{
    config::Attributes,
    theme::{Region, Theme},
};

pub const STYLE_START: &str = "#[";
pub const STYLE_END: &str = "]";

/// The part of a segment a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The segment's text or placeholder.
    Option,
    Icon,
    Decorator,
    /// Window name, in the window region.
    Window,
    /// Window index, in the window region.
    Number,
}

impl Role {
    fn colors(self, attrs: &Attributes) -> (Option<&str>, Option<&str>) {
        let (fg, bg) = match self {
            Role::Option => (&attrs.fg_option, &attrs.bg_option),
            Role::Icon => (&attrs.fg_icon, &attrs.bg_icon),
            Role::Decorator => (&attrs.fg_decorator, &attrs.bg_decorator),
            Role::Window => (&attrs.fg_window, &attrs.bg_window),
            Role::Number => (&attrs.fg_number, &attrs.bg_number),
        };
        (fg.as_deref(), bg.as_deref())
    }
}

/// First present value along segment → region → theme.
#[inline]
pub fn cascade<'a>(
    segment: Option<&'a str>,
    region: Option<&'a str>,
    theme: Option<&'a str>,
) -> Option<&'a str> {
    segment.or(region).or(theme)
}

/// Foreground, background and style keyword for one role of one segment.
///
/// Displays as a style directive, `#[fg=..,bg=..,style]`. Empty colors
/// are left out; the style slot is always written, even when empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedStyle<'a> {
    pub fg: Option<&'a str>,
    pub bg: Option<&'a str>,
    pub style: Option<&'a str>,
}

impl fmt::Display for ResolvedStyle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(STYLE_START)?;
        if let Some(fg) = self.fg.filter(|c| !c.is_empty()) {
            write!(f, "fg={},", fg)?;
        }
        if let Some(bg) = self.bg.filter(|c| !c.is_empty()) {
            write!(f, "bg={},", bg)?;
        }
        f.write_str(self.style.unwrap_or_default())?;
        f.write_str(STYLE_END)
    }
}

/// Resolves segment styles within one region of a theme.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    theme: &'a Theme,
    region: Region,
}

impl<'a> StyleResolver<'a> {
    pub fn new(theme: &'a Theme, region: Region) -> Self {
        Self { theme, region }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn resolve(&self, segment: &'a Attributes, role: Role) -> ResolvedStyle<'a> {
        let defaults = self.theme.defaults(self.region);
        let global = self.theme.status_line();
        let (seg_fg, seg_bg) = role.colors(segment);
        let (reg_fg, reg_bg) = role.colors(defaults);

        ResolvedStyle {
            fg: cascade(seg_fg, reg_fg, global.foreground.as_deref()),
            bg: cascade(seg_bg, reg_bg, global.background.as_deref()),
            style: cascade(
                segment.style.as_deref(),
                defaults.style.as_deref(),
                global.style.as_deref(),
            ),
        }
    }

    /// Icon text, empty when unset at every level.
    pub fn icon(&self, segment: &'a Attributes) -> &'a str {
        cascade(
            segment.icon.as_deref(),
            self.theme.defaults(self.region).icon.as_deref(),
            self.theme.icon(self.region),
        )
        .unwrap_or_default()
    }

    /// Decorator text, empty when unset at every level.
    pub fn decorator(&self, segment: &'a Attributes) -> &'a str {
        cascade(
            segment.decorator.as_deref(),
            self.theme.defaults(self.region).decorator.as_deref(),
            self.theme.decorator(self.region),
        )
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THEME: &str = r##"
status_line:
  foreground: "#CDD6F4"
  background: "#1E1E2E"
status_left:
  fg_icon: "#F38BA8"
  bg_decorator: "#313244"
  style: bold
  icon: "I"
window:
  fg_window: "#A6E3A1"
status_right: {}
"##;

    fn theme() -> Theme {
        Theme::from_yaml(THEME, "test.theme.yaml").unwrap()
    }

    #[test]
    fn test_directive_format() {
        let style = ResolvedStyle {
            fg: Some("#FFFFFF"),
            bg: Some("#000000"),
            style: Some("bold"),
        };
        assert_eq!(style.to_string(), "#[fg=#FFFFFF,bg=#000000,bold]");
    }

    #[test]
    fn test_directive_keeps_empty_style_slot() {
        let style = ResolvedStyle {
            fg: Some("#FFFFFF"),
            bg: Some("#000000"),
            style: None,
        };
        assert_eq!(style.to_string(), "#[fg=#FFFFFF,bg=#000000,]");
        assert_eq!(ResolvedStyle::default().to_string(), "#[]");
    }

    #[test]
    fn test_directive_omits_empty_colors() {
        let style = ResolvedStyle {
            fg: Some(""),
            bg: Some("#000000"),
            style: Some("italics"),
        };
        assert_eq!(style.to_string(), "#[bg=#000000,italics]");
    }

    #[test]
    fn test_no_overrides_matches_region_default() {
        let theme = theme();
        let resolver = StyleResolver::new(&theme, Region::StatusLeft);
        let segment = Attributes::default();
        let defaults = theme.defaults(Region::StatusLeft);

        for role in [Role::Option, Role::Icon, Role::Decorator] {
            let (fg, bg) = role.colors(defaults);
            assert_eq!(
                resolver.resolve(&segment, role),
                ResolvedStyle {
                    fg,
                    bg,
                    style: defaults.style.as_deref(),
                }
            );
        }
        assert_eq!(resolver.icon(&segment), "I");
    }

    #[test]
    fn test_icon_override_touches_only_icon_fg() {
        let theme = theme();
        let resolver = StyleResolver::new(&theme, Region::StatusLeft);
        let plain = Attributes::default();
        let segment = Attributes {
            fg_icon: Some("#FAB387".into()),
            ..Attributes::default()
        };

        let icon = resolver.resolve(&segment, Role::Icon);
        let default_icon = resolver.resolve(&plain, Role::Icon);
        assert_eq!(icon.fg, Some("#FAB387"));
        assert_eq!(icon.bg, default_icon.bg);
        assert_eq!(icon.style, default_icon.style);

        for role in [Role::Option, Role::Decorator] {
            assert_eq!(resolver.resolve(&segment, role), resolver.resolve(&plain, role));
        }
    }

    #[test]
    fn test_region_default_beats_global() {
        let theme = theme();
        let resolver = StyleResolver::new(&theme, Region::StatusLeft);
        let segment = Attributes::default();
        assert_eq!(resolver.resolve(&segment, Role::Icon).fg, Some("#F38BA8"));
        assert_eq!(resolver.resolve(&segment, Role::Option).fg, Some("#CDD6F4"));
        assert_eq!(resolver.resolve(&segment, Role::Decorator).bg, Some("#313244"));
    }

    #[test]
    fn test_window_roles() {
        let theme = theme();
        let resolver = StyleResolver::new(&theme, Region::Window);
        let segment = Attributes::default();
        assert_eq!(resolver.resolve(&segment, Role::Window).fg, Some("#A6E3A1"));
        assert_eq!(resolver.resolve(&segment, Role::Number).fg, Some("#CDD6F4"));
        assert_eq!(resolver.resolve(&segment, Role::Window).style, None);
    }

    #[test]
    fn test_empty_override_still_wins() {
        let theme = theme();
        let resolver = StyleResolver::new(&theme, Region::StatusLeft);
        let segment = Attributes {
            fg_option: Some(String::new()),
            icon: Some(String::new()),
            ..Attributes::default()
        };
        let option = resolver.resolve(&segment, Role::Option);
        assert_eq!(option.to_string(), "#[bg=#1E1E2E,bold]");
        assert_eq!(resolver.icon(&segment), "");
    }

    #[test]
    fn test_cascade_order() {
        assert_eq!(cascade(Some("a"), Some("b"), Some("c")), Some("a"));
        assert_eq!(cascade(None, Some("b"), Some("c")), Some("b"));
        assert_eq!(cascade(None, None, Some("c")), Some("c"));
        assert_eq!(cascade(None, None, None), None);
    }
}
