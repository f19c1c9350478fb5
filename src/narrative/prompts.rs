use crate::db::models::{Persona, PersonaDraft, PersonaField};
use crate::movement::PersonaStats;

use super::generator::CrewMember;

const UNKNOWN: &str = "unknown";

/// Crew-wide weather: sunny when the average of the members' mean UV exceeds 50.
/// Members without readings do not count toward the average.
pub fn weather_label(crew: &[CrewMember]) -> &'static str {
    let means: Vec<f64> = crew.iter().filter_map(|m| m.stats.uv_mean()).collect();
    if means.is_empty() {
        return "overcast";
    }

    let average = means.iter().sum::<f64>() / means.len() as f64;
    if average > 50.0 {
        "sunny"
    } else {
        "overcast"
    }
}

fn roster<'a>(members: impl Iterator<Item = &'a CrewMember>) -> String {
    let names: Vec<String> = members
        .map(|m| {
            format!(
                "{} ({})",
                m.persona.name,
                m.persona.vocation.as_deref().unwrap_or(UNKNOWN)
            )
        })
        .collect();

    if names.is_empty() {
        "no one else, they sail alone today".to_string()
    } else {
        names.join(", ")
    }
}

pub fn summary_prompt(crew: &[CrewMember], weather: &str) -> String {
    format!(
        "Write an intriguing synopsis, like the blurb on the back of a book, about today's \
botanical crew adventure.\n\
\n\
The crew: {roster}.\n\
Setting: a {weather} day aboard their vessels.\n\
\n\
Center it on one mysterious or exciting event from today, hint at the crew's shared \
mission, and end on a hook that makes readers want more.\n\
\n\
Constraints: a single paragraph of 3-4 sentences. Do not resolve the central mystery; \
the individual logs will explore it.",
        roster = roster(crew.iter()),
    )
}

fn movement_line(stats: &PersonaStats) -> String {
    match stats.summary() {
        Some(s) => format!(
            "Today they travelled {:.1} inches over {} readings with an average UV exposure of {:.1}%.",
            s.distance_total, s.reading_count, s.uv_mean
        ),
        None => "Their sensors recorded nothing today.".to_string(),
    }
}

pub fn log_prompt(member: &CrewMember, crew: &[CrewMember]) -> String {
    let persona = &member.persona;
    let others = crew.iter().filter(|m| m.persona.name != persona.name);

    format!(
        "Write a personal log entry from {name}'s perspective. {name} is a sentient plant:\n\
- Personality: {personality}\n\
- Vocation: {vocation}\n\
- Vessel: {vessel}\n\
- Dream adventure: {adventure}\n\
{movement}\n\
\n\
Other crew members: {others}.\n\
\n\
In a single engaging paragraph, reveal their own view of today's central mystery, let \
their personality show in how they react, and hint at their relationship with at least \
one other crew member. It should read like a diary entry that adds one piece to the \
larger puzzle.",
        name = persona.name,
        personality = persona.personality.as_deref().unwrap_or(UNKNOWN),
        vocation = persona.vocation.as_deref().unwrap_or(UNKNOWN),
        vessel = persona.vessel.as_deref().unwrap_or(UNKNOWN),
        adventure = persona.adventure.as_deref().unwrap_or(UNKNOWN),
        movement = movement_line(&member.stats),
        others = roster(others),
    )
}

pub fn log_placeholder(persona: &Persona) -> String {
    format!(
        "{}'s log was lost somewhere in the botanical network. Try retrieving the crew entries again.",
        persona.name
    )
}

/// Prompt for one blank field, carrying every field already known.
pub fn autofill_prompt(draft: &PersonaDraft, field: PersonaField) -> String {
    let known: Vec<String> = [
        PersonaField::Personality,
        PersonaField::Vocation,
        PersonaField::Vessel,
        PersonaField::Adventure,
        PersonaField::Title,
    ]
    .into_iter()
    .filter(|f| *f != field && !draft.is_blank(*f))
    .map(|f| format!("- {}: {}", f.as_str(), draft.get(f).trim()))
    .collect();

    let subject = if draft.name.trim().is_empty() {
        "a sentient plant".to_string()
    } else {
        format!("a sentient plant named {}", draft.name.trim())
    };

    let context = if known.is_empty() {
        String::new()
    } else {
        format!("\nWhat we know so far:\n{}\n", known.join("\n"))
    };

    format!(
        "Come up with a hypothetical {phrase} for {subject}.\n{context}\n\
Keep it consistent with what we know. Reply with the {field} only, in one short phrase, \
without quotes or explanation.",
        phrase = field.prompt_phrase(),
        field = field.as_str(),
    )
}
