pub(super) const MIN_PASSWORD_LENGTH: usize = 8;

pub(super) fn password_problem(password: &str) -> Option<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    if password.trim().is_empty() {
        return Some("password cannot be blank".into());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(password_problem("short").is_some());
        assert!(password_problem("        ").is_some());
        assert!(password_problem("long enough").is_none());
    }
}
