/// Which builder package a tag resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagFamily {
    Plain,
    Primary,
    Secondary,
}

impl TagFamily {
    pub(crate) fn of(tag: &str) -> Self {
        if tag.starts_with("vx-") {
            TagFamily::Secondary
        } else if tag.starts_with("v-") {
            TagFamily::Primary
        } else {
            TagFamily::Plain
        }
    }

    pub(crate) fn is_component(self) -> bool {
        !matches!(self, TagFamily::Plain)
    }
}

/// Plain tags whose builder takes a single text argument.
const TEXT_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "span", "button", "label", "title", "option",
    "textarea", "strong", "em", "b", "i", "small", "code",
];

pub(crate) fn is_text_tag(tag: &str) -> bool {
    TEXT_TAGS.contains(&tag)
}

/// Builder function name for a tag, or `None` for unknown custom elements
/// that must go through the generic `Tag("name")` builder.
pub(crate) fn builder_name(tag: &str) -> Option<String> {
    match TagFamily::of(tag) {
        TagFamily::Secondary => Some(format!("VX{}", capitalize(&tag[3..].replace('-', "")))),
        TagFamily::Primary => Some(format!("V{}", pascal_case(&tag[2..]))),
        TagFamily::Plain if tag.contains('-') => None,
        TagFamily::Plain => Some(pascal_case(tag)),
    }
}

/// Chained method used for an attribute, if it has a dedicated one.
pub(crate) fn attribute_method(family: TagFamily, attr: &str) -> Option<&'static str> {
    let method = match attr {
        "class" => "Class",
        "id" => "Id",
        "style" => "Style",
        _ if family.is_component() => match attr {
            "color" => "Color",
            _ => return None,
        },
        "href" => "Href",
        "src" => "Src",
        "title" => "Title",
        "type" => "Type",
        "value" => "Value",
        "name" => "Name",
        "placeholder" => "Placeholder",
        _ => return None,
    };
    Some(method)
}

pub(crate) fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

pub(crate) fn pascal_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Go interpreted string literal.
pub(crate) fn go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
