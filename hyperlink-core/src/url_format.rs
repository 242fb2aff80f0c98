/// Optional cleanup applied to captured URLs before they hit the clipboard
use url::Url;

/// Query parameters stripped when formatting is enabled
pub const TRACKING_PARAMS: &[&str] = &["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content"];

/// Remove tracking parameters, drop a leading `www.` and prefer HTTPS.
/// Everything else is kept byte for byte; input that does not parse as a URL
/// is returned unchanged.
pub fn format_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let (before_fragment, fragment) = match raw.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (raw, None),
    };
    let (base, query) = match before_fragment.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (before_fragment, None),
    };

    let mut result = String::with_capacity(raw.len() + 1);

    let Some((scheme, rest)) = base.split_once(':') else {
        return raw.to_string();
    };
    if url.scheme() == "http" && scheme.eq_ignore_ascii_case("http") {
        result.push_str("https");
    } else {
        result.push_str(scheme);
    }
    result.push(':');

    let has_www = url.host_str().is_some_and(starts_with_www);
    match rest.strip_prefix("//").filter(|_| has_www) {
        Some(after_slashes) => {
            result.push_str("//");
            result.push_str(&strip_www(after_slashes));
        }
        None => result.push_str(rest),
    }

    if let Some(query) = query {
        match strip_tracking(query) {
            Some(kept) if kept.is_empty() => {}
            Some(kept) => {
                result.push('?');
                result.push_str(&kept);
            }
            None => {
                result.push('?');
                result.push_str(query);
            }
        }
    }

    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }

    result
}

/// Drop `www.` from the host in `user@host:port/path`
fn strip_www(authority_and_path: &str) -> String {
    let authority_end = authority_and_path.find('/').unwrap_or(authority_and_path.len());
    let host_start = authority_and_path[..authority_end]
        .rfind('@')
        .map_or(0, |at| at + 1);

    let mut out = authority_and_path.to_string();
    if starts_with_www(&out[host_start..]) {
        out.replace_range(host_start..host_start + 4, "");
    }
    out
}

fn starts_with_www(host: &str) -> bool {
    host.len() > 4 && host.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."))
}

/// Query without tracking items, or `None` when there was nothing to remove
fn strip_tracking(query: &str) -> Option<String> {
    let segments: Vec<&str> = query.split('&').collect();
    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| {
            let name = segment.split_once('=').map_or(*segment, |(name, _)| name);
            !TRACKING_PARAMS.contains(&name)
        })
        .collect();

    if kept.len() == segments.len() {
        return None;
    }
    Some(kept.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tracking_params() {
        assert_eq!(
            format_url("https://example.com/post?utm_source=news&utm_medium=email&id=7"),
            "https://example.com/post?id=7"
        );
        assert_eq!(
            format_url("https://example.com/post?utm_campaign=spring"),
            "https://example.com/post"
        );
    }

    #[test]
    fn test_drops_www_and_upgrades_scheme() {
        assert_eq!(format_url("http://www.rust-lang.org/learn"), "https://rust-lang.org/learn");
    }

    #[test]
    fn test_leaves_other_urls_alone() {
        assert_eq!(format_url("https://docs.rs/url/latest/url/"), "https://docs.rs/url/latest/url/");
        assert_eq!(format_url("file:///Users/me/notes.txt"), "file:///Users/me/notes.txt");
    }

    #[test]
    fn test_unparseable_input_unchanged() {
        assert_eq!(format_url("not a url"), "not a url");
        assert_eq!(format_url(""), "");
    }

    #[test]
    fn test_untouched_urls_keep_their_bytes() {
        for url in [
            "https://example.com",
            "https://example.com/search?q=a%20b",
            "https://example.com/login?next=/home&flag",
            "https://example.com/?a=1&&b=2",
        ] {
            assert_eq!(format_url(url), url);
        }
    }

    #[test]
    fn test_only_tracking_items_are_removed() {
        assert_eq!(
            format_url("https://example.com/search?q=a%20b&utm_source=feed&next=/home"),
            "https://example.com/search?q=a%20b&next=/home"
        );
        assert_eq!(format_url("https://example.com?utm_medium"), "https://example.com");
    }

    #[test]
    fn test_bare_origin_gets_no_trailing_slash() {
        assert_eq!(format_url("http://www.example.com"), "https://example.com");
        assert_eq!(format_url("https://user@www.example.com:8443"), "https://user@example.com:8443");
    }

    #[test]
    fn test_www_only_stripped_from_host() {
        assert_eq!(
            format_url("https://docs.example.com/www.old/page"),
            "https://docs.example.com/www.old/page"
        );
    }

    #[test]
    fn test_keeps_fragment() {
        assert_eq!(
            format_url("https://www.example.com/a?utm_term=x#section"),
            "https://example.com/a#section"
        );
    }
}
