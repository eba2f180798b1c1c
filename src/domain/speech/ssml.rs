use std::borrow::Cow;
use std::fmt;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_GENDER: &str = "Female";

/// A rendered SSML document, ready to be sent to the speech provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmlDocument(String);

impl SsmlDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SsmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a `<speak>` document with a single `<voice>` element.
///
/// Every value is escaped before it is written, so arbitrary user text can
/// never break out of the element it belongs to.
#[derive(Debug, Clone)]
pub struct SsmlBuilder<'a> {
    voice: &'a str,
    language: &'a str,
    gender: &'a str,
    text: &'a str,
}

impl<'a> SsmlBuilder<'a> {
    pub fn new(voice: &'a str) -> Self {
        Self {
            voice,
            language: DEFAULT_LANGUAGE,
            gender: DEFAULT_GENDER,
            text: "",
        }
    }

    pub fn language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }

    pub fn gender(mut self, gender: &'a str) -> Self {
        self.gender = gender;
        self
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    pub fn build(self) -> SsmlDocument {
        let language = escape_xml(self.language);

        SsmlDocument(format!(
            "<speak version='1.0' xml:lang='{lang}'><voice xml:lang='{lang}' xml:gender='{gender}' name='{voice}'>{text}</voice></speak>",
            lang = language,
            gender = escape_xml(self.gender),
            voice = escape_xml(self.voice),
            text = escape_xml(self.text),
        ))
    }
}

/// Escape the five XML reserved characters.
pub fn escape_xml(input: &str) -> Cow<'_, str> {
    if !input.contains(&['&', '<', '>', '\'', '"'][..]) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
