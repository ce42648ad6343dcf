//! TwiML documents served from the voice webhook.

const VOICE: &str = "Polly.Joanna";

pub const DISCLAIMER: &str = "Hello. This is an automated summary call from the VitalCall \
    monitoring system. This is not a diagnosis or treatment recommendation.";

pub const CLOSING: &str = "This concludes the automated vitals summary. Thank you.";

pub const MISSING_CALL_ID: &str = "Error: missing call identifier.";

pub const CALL_NOT_FOUND: &str = "Error: call data not found.";

/// Escape text for an XML text node.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn say(text: &str) -> String {
    format!("<Say voice=\"{VOICE}\">{}</Say>", escape_xml(text))
}

fn response(verbs: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>{}</Response>",
        verbs.concat()
    )
}

/// Disclaimer, summary, and closing, separated by one-second pauses.
pub fn summary_call(summary_text: &str) -> String {
    let pause = "<Pause length=\"1\"/>".to_string();
    response(&[
        say(DISCLAIMER),
        pause.clone(),
        say(summary_text),
        pause,
        say(CLOSING),
    ])
}

/// A single spoken message, used when the call cannot be served.
pub fn spoken_error(message: &str) -> String {
    response(&[say(message)])
}
