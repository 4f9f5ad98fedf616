//! Theme font binding: which typeface the sizing defaults are measured in

use crate::Result;
use crate::error::SizingError;
use crate::font::FontSpec;
use roxmltree::{Document, Node};
use tracing::{debug, instrument};

const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// Stock themes: (name, major latin typeface, minor latin typeface)
const BUILTIN_THEMES: &[(&str, &str, &str)] = &[
    ("Office", "Cambria", "Calibri"),
    ("Office 2013 - 2022", "Calibri Light", "Calibri"),
    ("Office 2023", "Aptos Display", "Aptos"),
    ("Apex", "Lucida Sans", "Book Antiqua"),
    ("Aspect", "Verdana", "Verdana"),
    ("Austin", "Century Gothic", "Century Gothic"),
    ("Black Tie", "Garamond", "Garamond"),
    ("Civic", "Georgia", "Georgia"),
    ("Clarity", "Arial", "Arial"),
    ("Composite", "Calibri", "Calibri"),
    ("Concourse", "Lucida Sans Unicode", "Lucida Sans Unicode"),
    ("Elemental", "Palatino Linotype", "Palatino Linotype"),
    ("Equity", "Franklin Gothic Book", "Perpetua"),
    ("Essential", "Arial Black", "Arial"),
    ("Executive", "Century Gothic", "Palatino Linotype"),
    ("Flow", "Calibri", "Constantia"),
    ("Foundry", "Rockwell", "Rockwell"),
    ("Grid", "Franklin Gothic Medium", "Franklin Gothic Book"),
    ("Hardcover", "Book Antiqua", "Book Antiqua"),
    ("Horizon", "Arial Narrow", "Arial Narrow"),
    ("Median", "Tw Cen MT", "Tw Cen MT"),
    ("Metro", "Consolas", "Corbel"),
    ("Module", "Corbel", "Corbel"),
    ("Newsprint", "Impact", "Times New Roman"),
    ("Opulent", "Trebuchet MS", "Trebuchet MS"),
    ("Oriel", "Century Schoolbook", "Century Schoolbook"),
    ("Origin", "Bookman Old Style", "Gill Sans MT"),
    ("Paper", "Constantia", "Constantia"),
    ("Perspective", "Arial", "Arial"),
    ("Pushpin", "Constantia", "Franklin Gothic Book"),
    ("Slipstream", "Trebuchet MS", "Trebuchet MS"),
    ("Solstice", "Gill Sans MT", "Gill Sans MT"),
    ("Technic", "Franklin Gothic Book", "Arial"),
    ("Thatch", "Tw Cen MT", "Tw Cen MT"),
    ("Trek", "Franklin Gothic Medium", "Franklin Gothic Book"),
    ("Urban", "Trebuchet MS", "Georgia"),
    ("Verve", "Century Gothic", "Century Gothic"),
    ("Waveform", "Candara", "Candara"),
];

/// Latin typefaces of a theme's font scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFonts {
    pub name: Option<String>,
    /// Heading font
    pub major: Option<String>,
    /// Body font; the one column and row defaults are measured in
    pub minor: String,
}

impl ThemeFonts {
    pub fn new<S: Into<String>>(minor: S) -> Self {
        Self {
            name: None,
            major: None,
            minor: minor.into(),
        }
    }

    pub fn with_major<S: Into<String>>(mut self, major: S) -> Self {
        self.major = Some(major.into());
        self
    }

    /// Look up a stock theme by name, ignoring ASCII case
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_THEMES
            .iter()
            .find(|(theme, _, _)| theme.eq_ignore_ascii_case(name))
            .map(|&(theme, major, minor)| Self {
                name: Some(theme.to_string()),
                major: Some(major.to_string()),
                minor: minor.to_string(),
            })
    }

    /// Names of all stock themes
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_THEMES.iter().map(|(name, _, _)| *name)
    }

    /// Read the font scheme from a document's embedded theme part (`theme1.xml`)
    #[instrument(skip(xml), fields(len = xml.len()))]
    pub fn from_theme_part(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)
            .map_err(|e| SizingError::Theme(format!("theme part is not well-formed: {e}")))?;
        let root = doc.root_element();
        let scheme = root
            .descendants()
            .find(|n| n.has_tag_name((DRAWINGML_NS, "fontScheme")))
            .ok_or_else(|| SizingError::Theme("theme part has no font scheme".to_string()))?;

        let minor = latin_typeface(scheme, "minorFont")
            .ok_or_else(|| SizingError::Theme("font scheme has no minor latin font".to_string()))?;
        let major = latin_typeface(scheme, "majorFont");
        let name = root.attribute("name").map(str::to_string);

        debug!("Theme {:?} minor font '{}'", name, minor);
        Ok(Self { name, major, minor })
    }

    /// The body font at its default size
    pub fn minor_font_spec(&self) -> FontSpec {
        FontSpec::body(self.minor.clone())
    }
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self::builtin("Office").unwrap_or_else(|| Self::new("Calibri"))
    }
}

fn latin_typeface(scheme: Node<'_, '_>, slot: &str) -> Option<String> {
    scheme
        .children()
        .find(|n| n.has_tag_name((DRAWINGML_NS, slot)))?
        .children()
        .find(|n| n.has_tag_name((DRAWINGML_NS, "latin")))?
        .attribute("typeface")
        .filter(|face| !face.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME_PART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:fontScheme name="Office">
      <a:majorFont>
        <a:latin typeface="Calibri Light" panose="020F0302020204030204"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="Calibri" panose="020F0502020204030204"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_builtin_lookup() {
        let theme = ThemeFonts::builtin("office").unwrap();
        assert_eq!(theme.minor, "Calibri");
        assert_eq!(theme.major.as_deref(), Some("Cambria"));
        assert_eq!(ThemeFonts::builtin("Metro").unwrap().minor, "Corbel");
        assert!(ThemeFonts::builtin("Nonexistent").is_none());
    }

    #[test]
    fn test_builtin_names_cover_stock_themes() {
        assert!(ThemeFonts::builtin_names().count() >= 32);
        for name in ThemeFonts::builtin_names() {
            assert!(ThemeFonts::builtin(name).is_some());
        }
    }

    #[test]
    fn test_from_theme_part() {
        let theme = ThemeFonts::from_theme_part(THEME_PART).unwrap();
        assert_eq!(theme.name.as_deref(), Some("Office Theme"));
        assert_eq!(theme.major.as_deref(), Some("Calibri Light"));
        assert_eq!(theme.minor, "Calibri");
        assert_eq!(theme.minor_font_spec(), FontSpec::body("Calibri"));
    }

    #[test]
    fn test_theme_part_without_minor_font() {
        let xml = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <a:themeElements><a:fontScheme name="x">
    <a:minorFont><a:latin typeface=""/></a:minorFont>
  </a:fontScheme></a:themeElements>
</a:theme>"#;
        assert!(matches!(
            ThemeFonts::from_theme_part(xml),
            Err(SizingError::Theme(_))
        ));
    }

    #[test]
    fn test_theme_part_malformed() {
        assert!(matches!(
            ThemeFonts::from_theme_part("<a:theme"),
            Err(SizingError::Theme(_))
        ));
    }

    #[test]
    fn test_default_is_office() {
        assert_eq!(ThemeFonts::default().minor, "Calibri");
    }
}
