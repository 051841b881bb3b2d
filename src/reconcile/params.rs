//! Mapping definition parameters onto tree properties.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::base::ParamStyle;
use crate::tree::{ParamHolder, ParamProperty};
use crate::wadl::ParamDescriptor;

/// Copy a parameter definition onto `property`.
///
/// The current value is overwritten with the definition default. Options are
/// only replaced when the definition lists at least one.
pub fn apply(descriptor: &ParamDescriptor, property: &mut ParamProperty) {
    property.default_value = descriptor.default.clone();
    property.value = descriptor.default.clone();
    property.style = descriptor.style.unwrap_or_default();
    property.required = descriptor.required;
    property.param_type = descriptor.param_type.clone();
    if !descriptor.options.is_empty() {
        property.options = descriptor.options.clone();
    }
}

/// Pull parameters out of a concrete URL.
///
/// Matrix parameters (`;name=value`) become MATRIX properties and query pairs
/// become QUERY properties. Integer path segments become TEMPLATE properties
/// `param0`, `param1`, … and are replaced by `{paramN}` in the returned path.
pub fn extract_params(url: &Url, params: &mut ParamHolder) -> String {
    let mut template_count = 0usize;
    let mut path = String::new();

    for segment in url.path().split('/') {
        let mut parts = segment.split(';');
        let mut item = parts.next().unwrap_or_default().to_string();
        for matrix in parts {
            add_pair(params, matrix, ParamStyle::Matrix);
        }

        if item.parse::<i32>().is_ok() {
            let name = format!("param{template_count}");
            template_count += 1;
            let property = params.upsert(&name);
            property.style = ParamStyle::Template;
            property.value = Some(item.clone());
            property.default_value = Some(item);
            item = format!("{{{name}}}");
        }

        if !item.is_empty() {
            path.push('/');
            path.push_str(&item);
        }
    }

    if let Some(query) = url.query() {
        for pair in query.split('&') {
            add_pair(params, pair, ParamStyle::Query);
        }
    }

    path
}

/// Add a `name[=value]` pair as a property of `style`.
fn add_pair(params: &mut ParamHolder, pair: &str, style: ParamStyle) {
    let (name, value) = match pair.split_once('=') {
        Some((name, value)) => (decode(name), Some(decode(value))),
        None => (decode(pair), None),
    };
    if name.is_empty() {
        return;
    }
    let property = params.upsert(&name);
    property.style = style;
    if value.is_some() {
        property.value = value;
    }
}

/// Form-style decoding: `+` is a space, then percent escapes.
fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
