/// `"{firstName} {lastName}"`, computed on read and never stored.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

/// Author name as shown on a blog post.
pub fn author_name(first_name: &str, last_name: &str) -> String {
    display_name(first_name, last_name).trim().to_string()
}
