//! API Constants and Configuration for the heroes web API

/// Base resource path for hero records
pub const HEROES_PATH: &str = "api/heroes";

/// Service name used to prefix message log lines
pub const DEFAULT_SERVICE_NAME: &str = "HeroService";

/// Default quiescence window for search input, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Standard headers for hero API requests
pub mod headers {
    /// Content type header name
    pub const CONTENT_TYPE: &str = "Content-Type";

    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// User agent sent by the HTTP transport
    pub const USER_AGENT: &str = "hero-query/0.1";
}

/// Build the endpoint for a single hero record
pub fn hero_endpoint(id: i64) -> String {
    format!("{}/{}", HEROES_PATH, id)
}

/// Build the name search endpoint for a (trimmed) search term
pub fn search_endpoint(term: &str) -> String {
    format!("{}/?name={}", HEROES_PATH, urlencoding::encode(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_endpoint() {
        assert_eq!(hero_endpoint(11), "api/heroes/11");
    }

    #[test]
    fn test_search_endpoint_encodes_term() {
        assert_eq!(search_endpoint("bob"), "api/heroes/?name=bob");
        assert_eq!(search_endpoint("dr nice"), "api/heroes/?name=dr%20nice");
    }
}
