//! Href and document URI helpers.

use std::path::Path;
use url::Url;

/// Split an href into its document part and fragment.
///
/// The document part ends at the first `#`; the fragment is whatever follows
/// the last `#`. An empty fragment is reported as `None`.
pub fn split_href(href: &str) -> (&str, Option<&str>) {
    let Some(first) = href.find('#') else {
        return (href, None);
    };
    let document = &href[..first];
    let fragment = href.rfind('#').map(|last| &href[last + 1..]);
    (document, fragment.filter(|f| !f.is_empty()))
}

/// Strip the `#fragment` from a document URI.
pub fn strip_fragment(uri: &str) -> &str {
    split_href(uri).0
}

/// Resolve `reference` against the URI of the document that contains it.
///
/// Absolute URLs are returned unchanged (minus any fragment). Relative
/// references are joined onto `base` when it is a URL, or onto the parent
/// directory when `base` is a filesystem path.
pub fn resolve_document_uri(base: Option<&str>, reference: &str) -> String {
    let reference = strip_fragment(reference);
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    let Some(base) = base else {
        return reference.to_string();
    };

    if let Ok(base_url) = Url::parse(base) {
        if let Ok(joined) = base_url.join(reference) {
            let mut joined = joined;
            joined.set_fragment(None);
            return joined.to_string();
        }
        return reference.to_string();
    }

    let reference_path = Path::new(reference);
    if reference_path.is_absolute() {
        return reference.to_string();
    }
    match Path::new(base).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(reference_path).to_string_lossy().into_owned()
        }
        _ => reference.to_string(),
    }
}

/// Remove a single trailing `/` from a base path.
pub fn strip_trailing_slash(base: &str) -> &str {
    base.strip_suffix('/').unwrap_or(base)
}
