/// The canonical streamed reply used across the chat tests. Joined together
/// the fragments read "Sure, here's a plan".
pub fn reply_fragments_fixture() -> Vec<&'static str> {
    return vec!["Sure", ", here", "'s a plan"];
}

/// A raw `streamGenerateContent` response body delivering the fragments from
/// [`reply_fragments_fixture`], terminated by an empty text chunk.
pub fn gemini_stream_body_fixture() -> String {
    return [
        "[",
        "\"contents\": [{",
        "\"parts\": [{",
        "\"text\": \"Sure\"",
        "}]",
        "},",
        "{",
        "\"parts\": [{",
        "\"text\": \", here\"",
        "}]",
        "},",
        "{",
        "\"parts\": [{",
        "\"text\": \"'s a plan\"",
        "}]",
        "},",
        "{",
        "\"parts\": [{",
        "\"text\": \"\"",
        "}]",
        "}]",
        "]",
    ]
    .join("\n");
}
