//! Persona saving and crew assembly on top of the persona store.

#[cfg(feature = "desktop")]
pub mod commands;

use anyhow::Result;
use log::{info, warn};

use crate::{
    db::{Database, Persona, PersonaDraft},
    movement::MovementPlot,
    narrative::{CrewMember, PersonaAutofill},
};

/// Save a draft, first filling its blank fields when an auto-filler is supplied.
///
/// Validation happens after auto-fill, so a draft with only a name can be saved when
/// auto-fill is on. Domain failures are `JournalError`s inside the returned error.
pub async fn save_persona(
    db: &Database,
    draft: PersonaDraft,
    autofill: Option<&PersonaAutofill>,
) -> Result<Persona> {
    let draft = match autofill {
        Some(filler) if !draft.name.trim().is_empty() => {
            let (filled, generated) = filler.fill_blanks(draft).await?;
            if !generated.is_empty() {
                info!(
                    "Generated {} for '{}'",
                    generated
                        .iter()
                        .map(|field| field.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    filled.name.trim()
                );
            }
            filled
        }
        _ => draft,
    };

    let persona = db.insert_persona(&draft).await?;
    info!("Saved persona '{}' (id {})", persona.name, persona.id);
    Ok(persona)
}

/// One crew member per tracked persona in the plot, in plot order. Names with no stored
/// persona are narrated as wanderers.
pub async fn build_crew(db: &Database, plot: &MovementPlot) -> Result<Vec<CrewMember>> {
    let mut crew = Vec::with_capacity(plot.tracks.len());
    for track in &plot.tracks {
        let persona = match db.get_persona(&track.name).await? {
            Some(persona) => persona,
            None => {
                warn!("No stored persona for '{}'; using wanderer profile", track.name);
                Persona::wanderer(track.name.clone())
            }
        };
        crew.push(CrewMember {
            persona,
            stats: track.stats.clone(),
        });
    }
    Ok(crew)
}
