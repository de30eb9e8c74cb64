use crate::error::ImbalancedDelimiters;

/// Compares opening and closing counts of `()` and `{}` over the whole text.
///
/// Nesting order is never checked and string literals or comments are not
/// skipped, so `")("` counts as balanced.
pub fn check_balance(code: &str) -> Result<(), ImbalancedDelimiters> {
    let opening = code.matches('(').count();
    let closing = code.matches(')').count();
    if opening != closing {
        return Err(ImbalancedDelimiters::Parentheses { opening, closing });
    }

    let opening = code.matches('{').count();
    let closing = code.matches('}').count();
    if opening != closing {
        return Err(ImbalancedDelimiters::Braces { opening, closing });
    }

    Ok(())
}
