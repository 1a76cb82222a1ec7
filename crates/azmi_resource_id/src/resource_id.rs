//! Generic ARM resource ID segments.

use crate::error::{ResourceIdError, ResourceIdResult};

/// A resource ID split into its well-known prefix and the remaining
/// `type/name` pairs under the provider namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    raw: String,
    pub subscription_id: String,
    pub resource_group: Option<String>,
    pub provider: Option<String>,
    pub path: Vec<(String, String)>,
}

impl ResourceId {
    /// Split `/subscriptions/{sub}[/resourceGroups/{rg}][/providers/{ns}]/{type}/{name}...`.
    ///
    /// Keys of the well-known prefix match case-insensitively since ARM
    /// returns them in whatever casing the resource provider chose.
    pub fn parse(id: &str) -> ResourceIdResult<Self> {
        if id.trim().is_empty() {
            return Err(ResourceIdError::Empty);
        }
        if id != id.trim() {
            return Err(ResourceIdError::SurroundingWhitespace { id: id.to_string() });
        }
        let Some(rest) = id.strip_prefix('/') else {
            return Err(ResourceIdError::MissingLeadingSlash { id: id.to_string() });
        };

        // Repeated or trailing slashes leave empty components behind.
        let components: Vec<&str> = rest.split('/').collect();
        if components.iter().any(|c| c.is_empty()) {
            return Err(ResourceIdError::EmptySegment { id: id.to_string() });
        }
        if components.len() % 2 != 0 {
            return Err(ResourceIdError::OddSegments { id: id.to_string() });
        }

        let mut pairs = components
            .chunks(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .peekable();

        let subscription_id = match pairs.next() {
            Some((key, value)) if key.eq_ignore_ascii_case("subscriptions") => value,
            _ => {
                return Err(ResourceIdError::MissingSegment {
                    id: id.to_string(),
                    segment: "subscriptions",
                })
            }
        };

        let resource_group = pairs
            .next_if(|(key, _)| key.eq_ignore_ascii_case("resourceGroups"))
            .map(|(_, value)| value);
        let provider = pairs
            .next_if(|(key, _)| key.eq_ignore_ascii_case("providers"))
            .map(|(_, value)| value);

        Ok(Self {
            raw: id.to_string(),
            subscription_id,
            resource_group,
            provider,
            path: pairs.collect(),
        })
    }

    /// Remove and return the value of the first path segment whose key
    /// matches `key` case-insensitively.
    pub fn pop_segment(&mut self, key: &'static str) -> ResourceIdResult<String> {
        let position = self
            .path
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
            .ok_or_else(|| ResourceIdError::MissingSegment {
                id: self.raw.clone(),
                segment: key,
            })?;
        Ok(self.path.remove(position).1)
    }

    /// Fail if any path segments were left unconsumed.
    pub fn ensure_consumed(&self) -> ResourceIdResult<()> {
        if self.path.is_empty() {
            return Ok(());
        }
        let remaining = self
            .path
            .iter()
            .map(|(k, v)| format!("{k}/{v}"))
            .collect::<Vec<_>>()
            .join("/");
        Err(ResourceIdError::UnexpectedSegments {
            id: self.raw.clone(),
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_id() {
        let id = ResourceId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Web/sites/app/slots/blue",
        )
        .unwrap();
        assert_eq!(id.subscription_id, "sub");
        assert_eq!(id.resource_group.as_deref(), Some("rg"));
        assert_eq!(id.provider.as_deref(), Some("Microsoft.Web"));
        assert_eq!(
            id.path,
            vec![
                ("sites".to_string(), "app".to_string()),
                ("slots".to_string(), "blue".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_subscription_only() {
        let id = ResourceId::parse("/subscriptions/sub").unwrap();
        assert_eq!(id.subscription_id, "sub");
        assert!(id.resource_group.is_none());
        assert!(id.provider.is_none());
        assert!(id.path.is_empty());
    }

    #[test]
    fn test_parse_lowercase_keys() {
        let id = ResourceId::parse("/SUBSCRIPTIONS/sub/resourcegroups/rg").unwrap();
        assert_eq!(id.resource_group.as_deref(), Some("rg"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ResourceId::parse("  "), Err(ResourceIdError::Empty));
        assert!(matches!(
            ResourceId::parse("subscriptions/sub"),
            Err(ResourceIdError::MissingLeadingSlash { .. })
        ));
        assert!(matches!(
            ResourceId::parse("/subscriptions/sub/resourceGroups"),
            Err(ResourceIdError::OddSegments { .. })
        ));
        assert!(matches!(
            ResourceId::parse("/subscriptions//resourceGroups/rg"),
            Err(ResourceIdError::EmptySegment { .. })
        ));
        assert!(matches!(
            ResourceId::parse(" /subscriptions/sub"),
            Err(ResourceIdError::SurroundingWhitespace { .. })
        ));
        assert!(matches!(
            ResourceId::parse("//subscriptions/sub"),
            Err(ResourceIdError::EmptySegment { .. })
        ));
        assert!(matches!(
            ResourceId::parse("/subscriptions/sub/"),
            Err(ResourceIdError::EmptySegment { .. })
        ));
        assert!(matches!(
            ResourceId::parse("/resourceGroups/rg"),
            Err(ResourceIdError::MissingSegment {
                segment: "subscriptions",
                ..
            })
        ));
    }

    #[test]
    fn test_pop_segment_and_ensure_consumed() {
        let mut id =
            ResourceId::parse("/subscriptions/s/providers/Microsoft.Foo/bars/b/bazs/z").unwrap();
        assert_eq!(id.pop_segment("BARS").unwrap(), "b");
        assert!(id.pop_segment("bars").is_err());

        let err = id.ensure_consumed().unwrap_err();
        assert_eq!(
            err,
            ResourceIdError::UnexpectedSegments {
                id: "/subscriptions/s/providers/Microsoft.Foo/bars/b/bazs/z".to_string(),
                remaining: "bazs/z".to_string(),
            }
        );

        id.pop_segment("bazs").unwrap();
        assert!(id.ensure_consumed().is_ok());
    }
}
