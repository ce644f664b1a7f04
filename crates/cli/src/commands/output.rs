//! Printing records to stdout.

use serde::Serialize;

use lingam_admin::error::Result;

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns `AppError::Output` if `value` cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}
