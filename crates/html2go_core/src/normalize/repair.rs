use lazy_static::lazy_static;
use regex::Regex;

use super::strip::ASSIGNMENT_RE;

pub const GENERATED_HEADER: &str = "// Generated using htmlgo";

/// Builder methods that must not be reached through a leading dot.
const DOT_PREFIXED_METHODS: &[&str] = &["Class", "Attr", "Color", "Style", "ID", "Title", "Label"];

lazy_static! {
    static ref PACKAGE_DECL_RE: Regex =
        Regex::new(r"(?m)^[ \t]*(package[ \t]+[A-Za-z_][A-Za-z0-9_]*)[ \t]*\n(?:[ \t]*\n)*").unwrap();
}

/// Best-effort punctuation cleanup of generated builder code.
///
/// Operates purely on text: it can miss defects outside the known patterns
/// and can rewrite look-alike text inside string literals. The result always
/// starts with exactly one [`GENERATED_HEADER`] line.
pub fn repair_syntax(code: &str) -> String {
    let code = code
        .strip_prefix(GENERATED_HEADER)
        .map(|rest| rest.trim_start_matches('\n'))
        .unwrap_or(code);

    let (code, package_decl) = lift_package_declaration(code);
    let (code, assignment) = lift_assignment(&code);

    let code = drop_dots_before_methods(&code);
    let code = insert_chain_dots(&code);
    let code = fix_separator_artifacts(&code);
    let code = drop_commas_before_closing_lines(&code);
    // Only the comma goes; collapsing `),\n)` to a bare `\n)` would drop a
    // parenthesis and unbalance the chain that follows it.
    let mut code = code.replace("),\n)", ")\n)");

    if let Some(assignment) = assignment {
        if !code.contains(&assignment) {
            code = format!("{assignment}{code}");
        }
    }
    if let Some(package_decl) = package_decl {
        if !code.contains(&package_decl) {
            code = format!("{package_decl}\n\n{code}");
        }
    }
    if !code.contains(GENERATED_HEADER) {
        code = format!("{GENERATED_HEADER}\n\n{code}");
    }
    code
}

/// Removes the first package declaration line and the blank lines after it.
fn lift_package_declaration(code: &str) -> (String, Option<String>) {
    match PACKAGE_DECL_RE.captures(code) {
        Some(caps) => {
            let decl = caps[1].to_string();
            (PACKAGE_DECL_RE.replace(code, "").into_owned(), Some(decl))
        }
        None => (code.to_string(), None),
    }
}

/// Removes the first `var n = ` style prefix, returning it normalised to
/// end in a single space.
fn lift_assignment(code: &str) -> (String, Option<String>) {
    let mut lines: Vec<&str> = code.split('\n').collect();
    let Some(index) = lines.iter().position(|line| ASSIGNMENT_RE.is_match(line)) else {
        return (code.to_string(), None);
    };

    let line = lines[index];
    let Some(caps) = ASSIGNMENT_RE.captures(line) else {
        return (code.to_string(), None);
    };
    let prefix = caps[1].trim_start();
    let assignment = format!("{prefix} ");
    lines[index] = line[caps[1].len()..].trim_start();
    (lines.join("\n"), Some(assignment))
}

fn drop_dots_before_methods(code: &str) -> String {
    let mut code = code.to_string();
    for method in DOT_PREFIXED_METHODS {
        code = code.replace(&format!(".{method}("), &format!("{method}("));
    }
    code
}

/// `)Color(` becomes `).Color(`: a closing parenthesis directly followed by
/// an upper-case letter on the same line starts a chained call.
fn insert_chain_dots(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut prev = None;
    for ch in code.chars() {
        if prev == Some(')') && ch.is_ascii_uppercase() {
            out.push('.');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

fn fix_separator_artifacts(code: &str) -> String {
    code.replace(")\n\t", "),\n\t")
        .replace("),.", ").")
        .replace(").,", ").")
        .replace(",..", ".")
}

fn drop_commas_before_closing_lines(code: &str) -> String {
    let mut lines: Vec<String> = code.split('\n').map(str::to_string).collect();
    for i in 0..lines.len() {
        if !lines[i].ends_with(',') {
            continue;
        }
        let next = lines[i + 1..].iter().find(|line| !line.trim().is_empty());
        if next.is_some_and(|line| line.trim() == ")") {
            lines[i].pop();
        }
    }
    lines.join("\n")
}
