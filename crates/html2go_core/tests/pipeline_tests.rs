//! End-to-end checks of generator output flowing through the normalizer.

use html2go_core::{
    check_balance, repair_syntax, strip_wrappers, CodeGenerator, GeneratorOptions,
    HtmlGoGenerator, NormalizePipeline, ValidationMode, GENERATED_HEADER,
};

fn options(package_prefix: &str) -> GeneratorOptions {
    GeneratorOptions {
        package_prefix: package_prefix.to_string(),
        ..GeneratorOptions::default()
    }
}

fn convert(markup: &str, options: &GeneratorOptions) -> String {
    let generated = HtmlGoGenerator::new().generate(markup, options).unwrap();
    NormalizePipeline::default().run(&generated).unwrap()
}

const SAMPLES: &[&str] = &[
    "<div><h1>Test</h1></div>",
    "<div class=\"container\"><h1>Test</h1></div>",
    "<ul><li><a href=\"#\">Home</a></li><li>About</li></ul>",
    "<v-card><v-card-title>Card Title</v-card-title></v-card>",
    "<div><vx-date-picker label=\"Select Date\"></vx-date-picker></div>",
    "<p>Hello <b>world</b>, again</p><br>",
];

#[test]
fn stripped_output_is_the_wrapper_body() {
    let code = convert("<div><h1>Test</h1></div>", &options("h"));
    assert!(code.starts_with("h.Div("));
    assert!(code.contains("h.H1(\"Test\")"));
    assert!(!code.contains("package"));
    assert!(!code.contains("var n"));
    assert!(!code.contains("Body("));
    assert!(!code.ends_with(','));
}

#[test]
fn stripped_output_is_balanced_and_trimmed() {
    for markup in SAMPLES {
        let code = convert(markup, &options("h"));
        assert!(check_balance(&code).is_ok(), "unbalanced for {markup}: {code}");
        assert_eq!(code, code.trim());
        assert!(!code.ends_with(','));
    }
}

#[test]
fn stripping_is_idempotent() {
    for markup in SAMPLES {
        let once = convert(markup, &options("h"));
        assert_eq!(strip_wrappers(&once), once, "not idempotent for {markup}");
    }
}

#[test]
fn excess_closing_parentheses_are_removed() {
    let body = "h.Div(\n\th.Br(),\n)";
    for excess in 1..4 {
        let input = format!("{body}{}", ")".repeat(excess));
        let stripped = strip_wrappers(&input);
        assert_eq!(
            input.matches(')').count() - stripped.matches(')').count(),
            excess
        );
        assert_eq!(stripped.matches('(').count(), input.matches('(').count());
    }
}

#[test]
fn unqualified_output_without_package_prefix() {
    let code = convert("<div class=\"container\"><h1>Test</h1></div>", &options(""));
    assert!(code.contains("Div("));
    assert!(code.contains("Class(\"container\")"));
    assert!(code.contains("H1(\"Test\")"));
    assert!(!code.contains("h."));
}

#[test]
fn component_families_keep_their_prefixes() {
    let code = convert(
        "<div><v-btn color=\"primary\">Click me</v-btn><vx-dialog title=\"Confirm\">Sure?</vx-dialog></div>",
        &options("h"),
    );
    assert!(code.contains("v.VBtn(\"Click me\").Color(\"primary\")"));
    assert!(code.contains("vx.VXDialog(\"Sure?\").Attr(\"title\", \"Confirm\")"));
    assert!(!code.contains("h.v"));
}

#[test]
fn repaired_pipeline_output_has_one_header() {
    let pipeline = NormalizePipeline::new(true, ValidationMode::Enforce);
    let generated = HtmlGoGenerator::new()
        .generate("<div id=\"app\" class=\"container\"></div>", &options("h"))
        .unwrap();
    let code = pipeline.run(&generated).unwrap();
    assert_eq!(code.matches(GENERATED_HEADER).count(), 1);
    assert!(code.contains("Id(\"app\")"));
    assert!(code.contains("Class(\"container\")"));

    let again = repair_syntax(&repair_syntax(&code));
    assert_eq!(again.matches(GENERATED_HEADER).count(), 1);
}
