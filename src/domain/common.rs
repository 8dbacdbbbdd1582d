//! Shared traits and formatting helpers for shop records.

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Formats a numeric record id the way the desktop tables render them,
/// zero-padded to six digits.
pub fn format_record_id(id: u64) -> String {
    format!("{id:06}")
}
