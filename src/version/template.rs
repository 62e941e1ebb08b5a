//! `{name}` placeholder substitution for URI and file name templates

use crate::error::ResourceError;
use crate::version::types::Version;

/// Renders `template`, replacing each `{field}` with the matching version field.
///
/// `{{` and `}}` produce literal braces.
pub fn render(template: &str, version: &Version) -> Result<String, ResourceError> {
    let malformed = |reason: &str| ResourceError::MalformedTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => return Err(malformed("unclosed '{'")),
                        Some(c) => name.push(c),
                    }
                }
                if name.is_empty() {
                    return Err(malformed("empty placeholder"));
                }
                let value = version
                    .field(&name)
                    .ok_or_else(|| ResourceError::Template {
                        template: template.to_string(),
                        placeholder: name.clone(),
                    })?;
                rendered.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '}' => return Err(malformed("single '}' encountered")),
            c => rendered.push(c),
        }
    }

    Ok(rendered)
}
