use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Words in a report description that mark it as high urgency
    /// - Matches: "danger", "Very dangerous", "EMERGENCY", "critical", "urgently"
    /// - Ignores: "endangered", "criticism"
    pub static ref HIGH_URGENCY_REGEX: Regex =
        Regex::new(r"(?i)\b(?:danger(?:ous)?|emergency|critical|urgent(?:ly)?)\b").unwrap();

    /// Words that mark a report as medium urgency
    /// - Matches: "warning", "Alert", "caution", "alerts"
    pub static ref MEDIUM_URGENCY_REGEX: Regex =
        Regex::new(r"(?i)\b(?:warnings?|alerts?|caution)\b").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_urgency_regex() {
        assert!(HIGH_URGENCY_REGEX.is_match("Very dangerous waves near the pier"));
        assert!(HIGH_URGENCY_REGEX.is_match("EMERGENCY at the harbour"));
        assert!(HIGH_URGENCY_REGEX.is_match("danger"));
        assert!(HIGH_URGENCY_REGEX.is_match("needs help urgently"));
        assert!(!HIGH_URGENCY_REGEX.is_match("endangered turtles nesting"));
        assert!(!HIGH_URGENCY_REGEX.is_match("no criticism intended"));
        assert!(!HIGH_URGENCY_REGEX.is_match(""));
    }

    #[test]
    fn test_medium_urgency_regex() {
        assert!(MEDIUM_URGENCY_REGEX.is_match("Tide warning issued"));
        assert!(MEDIUM_URGENCY_REGEX.is_match("fishermen on alert"));
        assert!(MEDIUM_URGENCY_REGEX.is_match("Caution advised"));
        assert!(!MEDIUM_URGENCY_REGEX.is_match("calm sea today"));
    }
}
