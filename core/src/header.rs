//! Recognized request headers.
//!
//! # Design
//! Only a handful of headers are ever set by callers of this crate, so they
//! are modelled as a closed enum rather than free-form strings. Each variant
//! renders to exactly one `(name, value)` pair. The builder keys headers by
//! the rendered name, so two different variants that share a name replace
//! each other.

use std::fmt;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const CACHE_CONTROL: &str = "Cache-Control";

/// Values accepted for the `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Json,
    Xml,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Xml => "application/xml",
        }
    }
}

/// Values accepted for the `Cache-Control` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheControl {
    NoCache,
}

impl CacheControl {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheControl::NoCache => "no-cache",
        }
    }
}

/// A header that can be attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Header {
    ContentType(ContentType),
    /// Bearer token. Sent as-is; never validated or redacted.
    Authorization(String),
    CacheControl(CacheControl),
}

impl Header {
    /// The header name this variant renders to.
    pub fn name(&self) -> &'static str {
        match self {
            Header::ContentType(_) => CONTENT_TYPE,
            Header::Authorization(_) => AUTHORIZATION,
            Header::CacheControl(_) => CACHE_CONTROL,
        }
    }

    /// Render to the `(name, value)` pair sent on the wire.
    pub fn render(&self) -> (&'static str, String) {
        let value = match self {
            Header::ContentType(kind) => kind.as_str().to_string(),
            Header::Authorization(token) => format!("Bearer {token}"),
            Header::CacheControl(directive) => directive.as_str().to_string(),
        };
        (self.name(), value)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, value) = self.render();
        write!(f, "{name}: {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_renders_mime() {
        assert_eq!(
            Header::ContentType(ContentType::Json).render(),
            ("Content-Type", "application/json".to_string())
        );
        assert_eq!(
            Header::ContentType(ContentType::Xml).render(),
            ("Content-Type", "application/xml".to_string())
        );
    }

    #[test]
    fn authorization_renders_bearer_token() {
        let header = Header::Authorization("abc.def".to_string());
        assert_eq!(header.render(), ("Authorization", "Bearer abc.def".to_string()));
    }

    #[test]
    fn cache_control_renders_directive() {
        let header = Header::CacheControl(CacheControl::NoCache);
        assert_eq!(header.render(), ("Cache-Control", "no-cache".to_string()));
    }

    #[test]
    fn names_are_from_the_recognized_set() {
        let headers = [
            Header::ContentType(ContentType::Json),
            Header::Authorization(String::new()),
            Header::CacheControl(CacheControl::NoCache),
        ];
        for header in &headers {
            let (name, _) = header.render();
            assert!([CONTENT_TYPE, AUTHORIZATION, CACHE_CONTROL].contains(&name));
            assert_eq!(name, header.name());
            assert_eq!(header.render(), header.clone().render());
        }
    }

    #[test]
    fn display_joins_name_and_value() {
        let header = Header::CacheControl(CacheControl::NoCache);
        assert_eq!(header.to_string(), "Cache-Control: no-cache");
    }
}
