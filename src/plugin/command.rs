/// A chat command accepted as `/name ...` or `name ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFilter {
    name: String,
    slash_form: String,
}

impl CommandFilter {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slash_form = format!("/{}", name);
        Self { name, slash_form }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a message invokes this command: the token must be the whole
    /// message or be followed by whitespace.
    pub fn matches(&self, message: &str) -> bool {
        let message = message.trim_start();
        [self.slash_form.as_str(), self.name.as_str()]
            .iter()
            .filter_map(|prefix| message.strip_prefix(prefix))
            .any(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    }

    /// The command argument: the message with a leading command token removed,
    /// trimmed. Messages without the token are only trimmed.
    pub fn strip<'a>(&self, message: &'a str) -> &'a str {
        let message = message.trim_start();
        message
            .strip_prefix(self.slash_form.as_str())
            .or_else(|| message.strip_prefix(self.name.as_str()))
            .unwrap_or(message)
            .trim()
    }
}
