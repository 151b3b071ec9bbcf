//! Build log presentation helpers

use console::style;

/// Print a bracketed banner for a major build step.
///
/// `no_bracket` drops the separator lines for secondary steps, keeping the
/// blank-line rhythm of the surrounding log.
pub fn banner(message: &str, no_bracket: bool) {
    println!();
    if !no_bracket {
        println!("{}", "-".repeat(60));
    }
    println!("{}", style(message).bold());
    if !no_bracket {
        println!("{}", "-".repeat(60));
    }
    println!();
}
