//! `{{name}}` placeholder substitution over static HTML.

use serde::Serialize;

use super::error::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A named slot that content templates may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Slot(&'a str),
}

/// A template checked against a known placeholder set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str, known: &[Placeholder]) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut offset = 0;
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(&rest[..start]));
            }
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or(TemplateError::Unterminated(offset + start))?;
            let name = &after_open[..end];
            if !known.iter().any(|p| p.name == name) {
                return Err(TemplateError::UnknownPlaceholder(name.to_string()));
            }
            segments.push(Segment::Slot(name));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }

        Ok(Template { segments })
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(name) => Some(*name),
            Segment::Text(_) => None,
        })
    }

    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }

    /// Substitute every slot. The output is re-scanned so a value can never
    /// smuggle an unresolved token through.
    pub fn render(&self, values: &[(&str, String)]) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let (_, value) = values
                        .iter()
                        .find(|(n, _)| n == name)
                        .ok_or_else(|| TemplateError::MissingValue(name.to_string()))?;
                    out.push_str(value);
                }
            }
        }

        if let Some(pos) = out.find(OPEN) {
            let near: String = out[pos..].chars().take(24).collect();
            return Err(TemplateError::Unresolved(near));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &[Placeholder] = &[
        Placeholder {
            name: "current_year",
            description: "year",
        },
        Placeholder {
            name: "tax_year",
            description: "tax year",
        },
    ];

    fn values() -> Vec<(&'static str, String)> {
        vec![
            ("current_year", "2026".to_string()),
            ("tax_year", "2025".to_string()),
        ]
    }

    #[derive(calc_content_derive::Placeholders)]
    struct Season {
        /// Fiscal year label
        #[serde(rename = "fiscal_year")]
        year: i32,
        #[serde(default, rename(serialize = "season", deserialize = "period"))]
        label: &'static str,
        #[serde(skip_serializing_if = "str::is_empty")]
        note: &'static str,
    }

    #[test]
    fn derived_placeholders_follow_serde_renames() {
        let names: Vec<_> = Season::placeholders().iter().map(|p| p.name).collect();
        assert_eq!(names, ["fiscal_year", "season", "note"]);
        assert_eq!(Season::placeholders()[0].description, "Fiscal year label");

        let season = Season {
            year: 2026,
            label: "spring",
            note: "",
        };
        let template = Template::parse("{{season}} {{fiscal_year}}", Season::placeholders()).unwrap();
        assert_eq!(template.render(&season.substitutions()).unwrap(), "spring 2026");
    }

    #[test]
    fn renders_all_slots() {
        let template =
            Template::parse("<h2>Rates for {{current_year}}</h2><p>{{tax_year}} brackets, {{current_year}}</p>", KNOWN)
                .unwrap();
        assert_eq!(
            template.render(&values()).unwrap(),
            "<h2>Rates for 2026</h2><p>2025 brackets, 2026</p>"
        );
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            ["current_year", "tax_year", "current_year"]
        );
    }

    #[test]
    fn static_template_passes_through() {
        let template = Template::parse("<p>No dates here.</p>", KNOWN).unwrap();
        assert!(template.is_static());
        assert_eq!(template.render(&[]).unwrap(), "<p>No dates here.</p>");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        assert_eq!(
            Template::parse("<p>{{curent_year}}</p>", KNOWN),
            Err(TemplateError::UnknownPlaceholder("curent_year".to_string()))
        );
    }

    #[test]
    fn rejects_unterminated_placeholder() {
        assert_eq!(
            Template::parse("<p>ok {{current_year</p>", KNOWN),
            Err(TemplateError::Unterminated(6))
        );
    }

    #[test]
    fn missing_value_fails_render() {
        let template = Template::parse("{{tax_year}}", KNOWN).unwrap();
        assert_eq!(
            template.render(&[("current_year", "2026".to_string())]),
            Err(TemplateError::MissingValue("tax_year".to_string()))
        );
    }

    #[test]
    fn leftover_token_in_output_fails_render() {
        let template = Template::parse("<p>{{current_year}}</p>", KNOWN).unwrap();
        let result = template.render(&[("current_year", "{{tax_year}}".to_string())]);
        assert!(matches!(result, Err(TemplateError::Unresolved(_))));
    }
}
