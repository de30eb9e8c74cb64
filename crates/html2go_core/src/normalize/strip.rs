use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub(crate) static ref PACKAGE_LINE_RE: Regex =
        Regex::new(r"^\s*package\s+[A-Za-z_][A-Za-z0-9_]*\s*$").unwrap();
    /// `var n = `, `n = `, `n := ` at the start of a line. The trailing group
    /// keeps `==` comparisons from matching.
    pub(crate) static ref ASSIGNMENT_RE: Regex =
        Regex::new(r"^(\s*(?:var\s+)?[A-Za-z_][A-Za-z0-9_]*\s*:?=)(?:[^=]|$)").unwrap();
    /// The wrapper call, bare or package-qualified, but not the tail of a
    /// longer identifier such as `TBody(`.
    static ref WRAPPER_RE: Regex = Regex::new(r"(?:^|[^A-Za-z0-9_])Body\(").unwrap();
}

/// Reduces generated source to the expression inside its `Body(...)` wrapper.
///
/// Every stage is keyed on a textual marker and does nothing when the
/// marker is absent. Parenthesis matching counts raw characters, so a `(`
/// or `)` inside a string literal shifts the match.
pub fn strip_wrappers(code: &str) -> String {
    let code = drop_package_declaration(code);
    let code = drop_assignment(&code);
    let code = extract_wrapper_body(&code);
    let code = remove_trailing_parentheses(&code);
    let code = remove_trailing_comma(&code);
    code.trim().to_string()
}

fn drop_package_declaration(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let Some(index) = lines.iter().position(|line| PACKAGE_LINE_RE.is_match(line)) else {
        return code.to_string();
    };

    let rest = &lines[index + 1..];
    let start = rest
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(rest.len());
    rest[start..].join("\n")
}

fn drop_assignment(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let Some(index) = lines.iter().position(|line| ASSIGNMENT_RE.is_match(line)) else {
        return code.to_string();
    };

    // Keep the line that opens the wrapper so the next stage can match it.
    let wrapper_line = lines[index..]
        .iter()
        .position(|line| WRAPPER_RE.is_match(line))
        .map(|offset| index + offset);

    match wrapper_line {
        Some(start) => lines[start..].join("\n"),
        None => {
            let mut rest: Vec<String> = lines[index..].iter().map(|l| l.to_string()).collect();
            if let Some(caps) = ASSIGNMENT_RE.captures(&rest[0]) {
                let prefix_len = caps[1].len();
                rest[0] = rest[0][prefix_len..].trim_start().to_string();
            }
            rest.join("\n")
        }
    }
}

fn extract_wrapper_body(code: &str) -> String {
    let Some(m) = WRAPPER_RE.find(code) else {
        return code.to_string();
    };
    let opening = m.end();

    let mut depth = 1usize;
    for (offset, byte) in code.as_bytes()[opening..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return code[opening..opening + offset].to_string();
                }
            }
            _ => {}
        }
    }

    code.to_string()
}

/// Trims `)` from the end while closing parentheses outnumber opening ones.
pub(crate) fn remove_trailing_parentheses(code: &str) -> String {
    let mut code = code.trim();
    let opening = code.matches('(').count();
    let closing = code.matches(')').count();

    for _ in opening..closing {
        match code.strip_suffix(')') {
            Some(rest) => code = rest.trim(),
            None => break,
        }
    }
    code.to_string()
}

pub(crate) fn remove_trailing_comma(code: &str) -> String {
    let code = code.trim();
    if let Some(rest) = code.strip_suffix(',') {
        return rest.to_string();
    }

    let mut lines: Vec<&str> = code.split('\n').collect();
    if let Some(last) = lines.iter().rposition(|line| !line.trim().is_empty()) {
        if let Some(rest) = lines[last].trim().strip_suffix(',') {
            lines[last] = rest;
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_body_wrapper() {
        let cases = [
            (
                "var n = Body(h.Div(h.P(\"Hello world\")))",
                "h.Div(h.P(\"Hello world\"))",
            ),
            (
                "  var n = Body(  h.Div(h.P(\"Hello\"))  )  ",
                "h.Div(h.P(\"Hello\"))",
            ),
            ("h.Div(h.P(\"No wrapper\"))", "h.Div(h.P(\"No wrapper\"))"),
            ("", ""),
            ("   ", ""),
            (
                "var n = Body(\n  h.Div(\n    h.P(\"Multiline\")\n  )\n)",
                "h.Div(\n    h.P(\"Multiline\")\n  )",
            ),
            (
                "var n = mypackage.Body(h.Div(h.P(\"With package\")))",
                "h.Div(h.P(\"With package\"))",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(strip_wrappers(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn strips_full_scaffold() {
        let generated = "package hello\n\nvar n = h.Body(\n\th.Div(\n\t\th.H1(\"Test\"),\n\t),\n)\n";
        assert_eq!(
            strip_wrappers(generated),
            "h.Div(\n\t\th.H1(\"Test\"),\n\t)"
        );
    }

    #[test]
    fn wrapper_on_line_after_assignment() {
        let generated = "package hello\n\nvar n =\n\th.Body(\n\t\th.Br(),\n\t)\n";
        assert_eq!(strip_wrappers(generated), "h.Br()");
    }

    #[test]
    fn assignment_without_wrapper_drops_prefix_only() {
        assert_eq!(strip_wrappers("var n = h.Div(\n\th.Br(),\n)"), "h.Div(\n\th.Br(),\n)");
    }

    #[test]
    fn package_only_input_becomes_empty() {
        assert_eq!(strip_wrappers("package hello\n\n"), "");
    }

    #[test]
    fn does_not_match_tbody() {
        let code = "h.Table(h.TBody(h.Tr()))";
        assert_eq!(strip_wrappers(code), code);
    }

    #[test]
    fn removes_excess_closing_parentheses() {
        assert_eq!(remove_trailing_parentheses("h.Div(h.Br()) ) )"), "h.Div(h.Br())");
        assert_eq!(remove_trailing_parentheses("h.Div(h.Br())"), "h.Div(h.Br())");
    }

    #[test]
    fn removes_comma_on_last_non_blank_line() {
        assert_eq!(remove_trailing_comma("h.Br(),\n"), "h.Br()");
        assert_eq!(remove_trailing_comma("a,\nb"), "a,\nb");
    }

    #[test]
    fn parentheses_in_strings_confuse_matching() {
        // Raw character counting; a ")" inside a literal closes the wrapper early.
        let code = "var n = Body(h.P(\"a)\"))";
        assert_eq!(strip_wrappers(code), "h.P(\"a)\"");
    }
}
