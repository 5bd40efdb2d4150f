//! String manipulation utilities

/// Pluralize a word based on count
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("node", 0), "nodes");
        assert_eq!(pluralize("node", 1), "node");
        assert_eq!(pluralize("node", 5), "nodes");
    }
}
