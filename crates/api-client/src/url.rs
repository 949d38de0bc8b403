//! URL construction for API endpoints.
//!
//! Path segments are percent-encoded individually (RFC 3986), so device
//! IDs containing `/`, spaces, or other reserved characters cannot break
//! out of their segment.

use crate::config::ParticleConfig;

/// Build a versioned API URL from path segments.
///
/// An empty segment list yields the bare versioned endpoint. No trailing
/// slash is added.
#[must_use]
pub fn api_url(config: &ParticleConfig, segments: &[&str]) -> String {
    let mut url = format!("{}{}", config.endpoint, config.api_version);

    for segment in segments {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
    }

    url
}

/// The OAuth token URL. Carries no API version component; the token
/// endpoint is version-independent.
#[must_use]
pub fn oauth_token_url(config: &ParticleConfig) -> String {
    format!("{}oauth/token", config.endpoint)
}

/// Append query parameters to a URL, percent-encoding keys and values.
#[must_use]
pub fn with_query(url: String, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return url;
    }

    let mut url = url;
    for (i, (key, value)) in pairs.iter().enumerate() {
        url.push(if i == 0 && !url.contains('?') { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_segments() {
        let config = ParticleConfig::default();
        assert_eq!(
            api_url(&config, &["devices", "abc123", "temperature"]),
            "https://api.particle.io/v1/devices/abc123/temperature"
        );
    }

    #[test]
    fn test_api_url_empty_segments() {
        let config = ParticleConfig::default();
        assert_eq!(api_url(&config, &[]), "https://api.particle.io/v1");
    }

    #[test]
    fn test_segments_are_fully_escaped() {
        let config = ParticleConfig::default();
        let url = api_url(&config, &["devices", "id/with slash"]);
        assert_eq!(
            url,
            "https://api.particle.io/v1/devices/id%2Fwith%20slash"
        );
    }

    #[test]
    fn test_segment_round_trip() {
        let config = ParticleConfig::default();
        let originals = ["plain", "with space", "a/b", "100%", "ümlaut", "a&b=c?d"];

        for original in originals {
            let url = api_url(&config, &[original]);
            let segment = url.rsplit('/').next().unwrap();
            let decoded = urlencoding::decode(segment).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_oauth_url_skips_version() {
        let config = ParticleConfig::default();
        assert_eq!(oauth_token_url(&config), "https://api.particle.io/oauth/token");
    }

    #[test]
    fn test_with_query_appends_and_encodes() {
        let url = with_query(
            "https://api.particle.io/v1/devices".to_string(),
            &[
                ("format".to_string(), "raw".to_string()),
                ("q".to_string(), "a b".to_string()),
            ],
        );
        assert_eq!(
            url,
            "https://api.particle.io/v1/devices?format=raw&q=a%20b"
        );
    }

    #[test]
    fn test_with_query_no_pairs() {
        let url = with_query("https://api.particle.io/v1/devices".to_string(), &[]);
        assert_eq!(url, "https://api.particle.io/v1/devices");
    }
}
