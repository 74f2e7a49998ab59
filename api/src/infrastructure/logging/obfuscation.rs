/// Masks the local part of an email address, keeping its first
/// `obfuscated_length` characters and the domain.
///
/// `abc@example.com` with a length of 2 becomes `ab*@example.com`. The split
/// happens on the last `@`. Values without an `@` are masked entirely.
pub fn obfuscated(email: &str, obfuscated_length: usize) -> String {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return "*".repeat(email.chars().count());
    };
    let kept: String = local.chars().take(obfuscated_length).collect();
    let masked = local.chars().count().saturating_sub(obfuscated_length);
    format!("{kept}{}@{domain}", "*".repeat(masked))
}
