//! Prompt construction for vitals summaries.
//!
//! The model only ever sees aggregate statistics, the risk level, and the
//! signal descriptions. It is told to describe the data, never to
//! interpret it clinically.

use std::fmt::Write;

use vitalcall_core::models::summary::SummaryRequest;
use vitalcall_core::models::vital::Vital;

/// Upper word count the model is asked to respect.
pub const TARGET_MAX_WORDS: usize = 200;

pub const SYSTEM_PROMPT: &str = "\
You are a medical data summarization assistant for an automated patient monitoring system.

Your role:
- Summarize vital signs data in clear, neutral language.
- Highlight concerning trends objectively.
- Use terminology appropriate for healthcare professionals.

Constraints:
- You are NOT a doctor and must NOT provide diagnoses.
- You must NOT recommend treatments or interventions.
- Only describe what the data shows, not what it means clinically.
- Use phrases like \"data shows\" or \"vitals indicate\", never \"patient has\" or \"diagnosis of\".

Output requirements:
- At most 200 words, in 2-3 short paragraphs.
- Mention the patient identifier, the monitoring window, and the risk level.
- Neutral, objective tone suitable for text-to-speech phone delivery.
- Plain text only: no markdown, lists, or headings.";

/// Build the user message for one summary request.
pub fn build_user_prompt(request: &SummaryRequest) -> String {
    let digest = &request.digest;
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Generate a summary for patient {} based on the following data:\n",
        request.patient_id
    );
    let _ = writeln!(
        prompt,
        "Time window: last {} hour{} ({} to {} UTC)",
        digest.window_hours,
        if digest.window_hours == 1 { "" } else { "s" },
        digest.start.strftime("%H:%M"),
        digest.end.strftime("%H:%M"),
    );
    let _ = writeln!(prompt, "Total readings: {}\n", digest.reading_count);

    prompt.push_str("Vital signs summary:\n");
    for vital in Vital::ALL {
        if let Some(stats) = digest.stats.get(&vital) {
            let _ = writeln!(
                prompt,
                "- {}: avg {} (range: {} to {})",
                vital.label(),
                vital.format_value(stats.avg),
                vital.format_value(stats.min),
                vital.format_value(stats.max),
            );
        }
    }

    let _ = writeln!(prompt, "\nOverall trend: {}", digest.trend.as_str());
    let _ = writeln!(prompt, "Risk assessment: {}", request.risk.risk_level);

    if !request.risk.signals.is_empty() {
        prompt.push_str("\nConcerning patterns detected:\n");
        for signal in &request.risk.signals {
            let _ = writeln!(prompt, "- {}", signal.description);
        }
    }

    let _ = writeln!(
        prompt,
        "\nPatient context: {} year old {}\n",
        digest.age, digest.gender
    );
    let _ = write!(
        prompt,
        "Generate a concise summary (max {TARGET_MAX_WORDS} words) suitable for a phone call to a \
         healthcare provider. Include: time window, overall trend, key vital statistics, and any \
         concerning patterns."
    );

    prompt
}
