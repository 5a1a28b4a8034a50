use crate::core::constants::MAX_NAME_LENGTH;

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '\'');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, apostrophes, and underscores"
                .to_string(),
        );
    }

    Ok(())
}

/// Normalizes a free-form subject label: trims and collapses inner whitespace.
pub fn normalize_subject(subject: &str) -> String {
    subject.split_whitespace().collect::<Vec<_>>().join(" ")
}
