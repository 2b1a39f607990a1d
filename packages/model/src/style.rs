//! Lenient parser for the free-form custom CSS attached to a block.
//!
//! Text is split on `;` into declarations and each declaration on its first
//! `:`. Malformed declarations are set aside with a reason instead of failing
//! the whole string. Values are never validated.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Kebab-case property name
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn to_css(&self) -> String {
        format!("{}: {}", self.property, self.value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("missing ':' between property and value")]
    MissingColon,

    #[error("empty property name")]
    EmptyProperty,

    #[error("empty value for '{0}'")]
    EmptyValue(String),

    #[error("invalid property name '{0}'")]
    InvalidProperty(String),
}

/// A declaration that was skipped, with the text it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDeclaration {
    pub text: String,
    pub error: StyleError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub declarations: Vec<Declaration>,
    pub rejected: Vec<RejectedDeclaration>,
}

impl InlineStyle {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Accepted declarations joined as an inline `style` value
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(Declaration::to_css)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

pub fn parse_inline_style(text: &str) -> InlineStyle {
    let mut style = InlineStyle::default();

    for raw in text.split(';') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        match parse_declaration(raw) {
            Ok(declaration) => style.declarations.push(declaration),
            Err(error) => style.rejected.push(RejectedDeclaration {
                text: raw.to_string(),
                error,
            }),
        }
    }

    style
}

fn parse_declaration(raw: &str) -> Result<Declaration, StyleError> {
    let (property, value) = raw.split_once(':').ok_or(StyleError::MissingColon)?;
    let property = property.trim();
    let value = value.trim();

    if property.is_empty() {
        return Err(StyleError::EmptyProperty);
    }

    if !property
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StyleError::InvalidProperty(property.to_string()));
    }

    if value.is_empty() {
        return Err(StyleError::EmptyValue(property.to_string()));
    }

    Ok(Declaration {
        property: to_kebab_case(property),
        value: value.to_string(),
    })
}

/// `backgroundColor` → `background-color`. Custom properties (`--x`) are
/// left as written.
pub fn to_kebab_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `background-color` → `backgroundColor`, the DOM style key
pub fn to_camel_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len());
    let mut upper_next = false;
    for c in property.chars() {
        if c == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_declarations() {
        let style = parse_inline_style("margin: 10px; padding:4px 8px ;");

        assert_eq!(
            style.declarations,
            vec![
                Declaration {
                    property: "margin".to_string(),
                    value: "10px".to_string(),
                },
                Declaration {
                    property: "padding".to_string(),
                    value: "4px 8px".to_string(),
                },
            ]
        );
        assert!(style.rejected.is_empty());
        assert_eq!(style.to_css(), "margin: 10px; padding: 4px 8px");
    }

    #[test]
    fn test_malformed_declarations_are_skipped_not_fatal() {
        let style = parse_inline_style("color red; border: 1px solid; : 3px; width:; font{x}: 1");

        assert_eq!(style.to_css(), "border: 1px solid");
        let errors: Vec<_> = style.rejected.iter().map(|r| r.error.clone()).collect();
        assert_eq!(
            errors,
            vec![
                StyleError::MissingColon,
                StyleError::EmptyProperty,
                StyleError::EmptyValue("width".to_string()),
                StyleError::InvalidProperty("font{x}".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_may_contain_colons() {
        let style = parse_inline_style("background: url(https://example.com/bg.png)");
        assert_eq!(style.declarations[0].value, "url(https://example.com/bg.png)");
    }

    #[test]
    fn test_camel_case_properties_are_normalized() {
        let style = parse_inline_style("fontWeight: bold; --brand-color: #123456");
        assert_eq!(style.declarations[0].property, "font-weight");
        assert_eq!(style.declarations[1].property, "--brand-color");
        assert_eq!(style.to_css(), "font-weight: bold; --brand-color: #123456");
    }

    #[test]
    fn test_capitalized_property_has_no_leading_hyphen() {
        let style = parse_inline_style("Color: red; BackgroundColor: #fff");
        assert_eq!(style.to_css(), "color: red; background-color: #fff");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(to_kebab_case("Color"), "color");
        assert_eq!(to_kebab_case("WebkitTransition"), "webkit-transition");
        assert_eq!(to_camel_case("border-top-left-radius"), "borderTopLeftRadius");
        assert_eq!(to_camel_case("color"), "color");
        assert_eq!(to_camel_case("-webkit-transition"), "webkitTransition");
    }
}
