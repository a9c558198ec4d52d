//! Interactive terminal prompts
//!
//! Thin wrappers around dialoguer widgets, plus the start/end time prompt
//! that feeds the range resolver. Resolution errors are reported and the
//! user is re-prompted; the resolver itself never retries.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::StitchResult;
use crate::timerange::{BoundingRange, RangeResolver, ResolvedRange};

/// Free-text entry with a default returned on empty input
pub fn prompt_with_default(message: &str, default: &str) -> StitchResult<String> {
    let value = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(value)
}

/// Numbered menu selection; returns the chosen index
pub fn select_from_list<T: ToString>(
    heading: &str,
    entries: &[T],
    default: usize,
) -> StitchResult<usize> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(heading)
        .items(entries)
        .default(default)
        .interact()?;
    Ok(index)
}

/// Checkbox-style multi selection; returns the chosen indices in list order
pub fn multi_select_from_list<T: ToString>(
    heading: &str,
    entries: &[T],
) -> StitchResult<Vec<usize>> {
    let indices = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(heading)
        .items(entries)
        .interact()?;
    Ok(indices)
}

/// Yes/no confirmation with a default answer
pub fn confirm(message: &str, default: bool) -> StitchResult<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(answer)
}

/// Explain the accepted time formats before prompting
pub fn print_range_help(resolver: &RangeResolver) {
    let example = chrono::Local::now()
        .format(resolver.config().datetime_format())
        .to_string();

    println!();
    println!("Times should be entered in the format:");
    println!("  {}", example.bold());
    println!();
    println!("Any missing components (for example, the year or full date)");
    println!("will be replaced with the provided default value(s).");
    println!();
    println!("Times can alternatively be entered as relative values by using");
    println!("a plus (+) or minus (-) sign in front of the time.");
    println!();
    println!("Notes on relative times:");
    println!("  Plus  (+) start times are interpreted relative to the default start time.");
    println!("  Minus (-) start times are interpreted relative to the provided end time.");
    println!("  Plus  (+) end   times are interpreted relative to the provided start time.");
    println!("  Minus (-) end   times are interpreted relative to the default end time.");
    println!("  Relative years and months are not accepted.");
}

/// Prompt for a start/end pair against `bounds`, re-prompting until the
/// inputs resolve cleanly
pub fn prompt_datetime_range(
    resolver: &RangeResolver,
    bounds: BoundingRange,
    show_help: bool,
) -> StitchResult<ResolvedRange> {
    if show_help {
        print_range_help(resolver);
    }

    // User input works at second precision only
    let bounds = bounds.rounded();

    let display_format = resolver.config().display_format(&bounds.start, &bounds.end);
    let default_start = bounds.start.format(display_format).to_string();
    let default_end = bounds.end.format(display_format).to_string();

    loop {
        let start_input = prompt_with_default("Enter start time", &default_start)?;
        let end_input = prompt_with_default("Enter end time", &default_end)?;

        match resolver.resolve(&start_input, &end_input, &bounds) {
            Ok(range) => return Ok(range),
            Err(e) => println!("\n{}", e.to_string().red()),
        }
    }
}

/// Echo a resolved range back to the user
pub fn print_selected_range(resolver: &RangeResolver, range: &ResolvedRange) {
    let format = resolver.config().datetime_format();

    println!();
    println!("--- Selected time range ---");
    println!();
    println!("  {} (start)", range.start.format(format).to_string().cyan());
    println!("  {} (end)", range.end.format(format).to_string().cyan());
}
