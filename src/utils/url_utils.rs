//! URL construction for search navigation.

use url::Url;

use super::constants::SEARCH_PATH;

/// Normalize a base URL: add `https://` when no scheme is present and make
/// sure the path ends with `/` so relative joins append instead of replace.
///
/// Query and fragment are left in place. Input that still fails to parse is
/// returned with only the scheme added, for the caller to reject.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let Ok(mut url) = Url::parse(&with_scheme) else {
        return with_scheme;
    };
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.to_string()
}

/// Build the navigation target for a keyword search
///
/// `keywords` always comes first, followed by `location` when given. Both
/// values are percent-encoded (spaces become `%20`).
///
/// # Errors
///
/// Returns an error if `base_url` cannot be parsed or joined.
pub fn build_search_url(
    base_url: &str,
    search_term: &str,
    location: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&normalize_base_url(base_url))?.join(SEARCH_PATH)?;

    let mut query = format!("keywords={}", urlencoding::encode(search_term));
    if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
        query.push_str("&location=");
        query.push_str(&urlencoding::encode(location));
    }
    url.set_query(Some(&query));

    Ok(url)
}
