/// Parses a Discord snowflake. Zero is not a valid ID.
pub fn parse_id(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|id| *id != 0)
}

/// Parses a comma separated list of IDs, ignoring blank entries.
///
/// # Returns
/// - `Ok(Vec<u64>)` - IDs in input order
/// - `Err(String)` - The first entry that is not a valid ID
pub fn parse_id_list(value: &str) -> Result<Vec<u64>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_id(part).ok_or_else(|| part.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_list_with_whitespace() {
        assert_eq!(parse_id_list(" 1, 2 ,,3 ").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list("").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn reports_invalid_list_entry() {
        assert_eq!(parse_id_list("1,x,3"), Err("x".to_string()));
        assert_eq!(parse_id_list("1, 0"), Err("0".to_string()));
    }

    #[test]
    fn rejects_zero_id() {
        assert_eq!(parse_id(" 42 "), Some(42));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-1"), None);
    }
}
