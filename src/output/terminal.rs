//! Terminal output utilities.
//!
//! Provides formatting helpers for table output.

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.chars().count();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Resource group segment of an ARM id.
pub fn resource_group_of(id: &str) -> Option<&str> {
    let mut parts = id.split('/');
    parts
        .by_ref()
        .find(|p| p.eq_ignore_ascii_case("resourceGroups"))?;
    parts.next().filter(|rg| !rg.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_provisioning_state_column() {
        assert_eq!(format_field("Succeeded", 19), "        \"Succeeded\"");
        assert_eq!(format_field("Succeeded", 19).len(), 19);
    }

    #[test]
    fn test_format_field_empty_cell() {
        assert_eq!(format_field("", 4), "  \"\"");
    }

    #[test]
    fn test_format_field_multibyte_name() {
        let field = format_field("hub-zürich", 14);
        assert_eq!(field, "  \"hub-zürich\"");
        assert_eq!(field.chars().count(), 14);
    }

    #[test]
    fn test_format_field_wider_than_column() {
        let name = "vwan-hub-connection-westeurope-01";
        assert_eq!(format_field(name, 24), format!("\"{name}\""));
    }

    #[test]
    fn test_resource_group_of() {
        let id = "/subscriptions/s/resourceGroups/rg-net/providers/Microsoft.Network/virtualHubs/hub1";
        assert_eq!(resource_group_of(id), Some("rg-net"));
        assert_eq!(resource_group_of("/subscriptions/s"), None);
        assert_eq!(resource_group_of(""), None);
    }
}
