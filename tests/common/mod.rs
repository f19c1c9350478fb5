#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use plant_crew_lib::{
    db::Persona,
    movement::{aggregate, Reading},
    narrative::{CrewMember, TextGenerator},
    teaser::{RetrievalEvent, StatusSink},
};

pub const SUMMARY_MARKER: &str = "Write an intriguing synopsis";
pub const AUTOFILL_MARKER: &str = "Come up with a hypothetical";

/// Text generator that answers from the prompt and records every call.
pub struct ScriptedGenerator {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    fail_when: Vec<String>,
    delay: Duration,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            fail_when: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    /// Fail every prompt containing `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_when.push(needle.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail_when.iter().any(|needle| prompt.contains(needle.as_str())) {
            return Err(anyhow!("scripted failure"));
        }

        if prompt.starts_with(SUMMARY_MARKER) {
            return Ok("  The crew woke to find the compass pointing at the moon.  \n".into());
        }

        if prompt.starts_with(AUTOFILL_MARKER) {
            let answer = if prompt.contains("vocation or hustle") {
                "cartographer"
            } else if prompt.contains("sweet ride") {
                "\"a paper lantern\""
            } else if prompt.contains("ideal adventure") {
                "charting the cloud sea"
            } else if prompt.contains("grand title") {
                "Keeper of Maps"
            } else {
                "curious"
            };
            return Ok(answer.to_string());
        }

        let name = prompt
            .split("log entry from ")
            .nth(1)
            .and_then(|rest| rest.split('\'').next())
            .unwrap_or("someone");
        Ok(format!("\n{name} noted the strange glow again.\n"))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RetrievalEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<RetrievalEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn publish(&self, event: &RetrievalEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn reading(name: &str, minute: u32, rotation: f64, distance: f64, uv: f64) -> Reading {
    Reading {
        persona_name: name.to_string(),
        timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap(),
        rotation_degrees: rotation,
        distance_traveled: distance,
        uv_level_percent: uv,
    }
}

pub fn crew_member(name: &str, vocation: &str, readings: &[Reading]) -> CrewMember {
    let mut persona = Persona::wanderer(name);
    persona.vocation = Some(vocation.to_string());
    persona.title = Some(format!("{name} the Bold"));
    CrewMember {
        persona,
        stats: aggregate(readings),
    }
}

pub fn three_member_crew() -> Vec<CrewMember> {
    vec![
        crew_member("Fern", "navigator", &[reading("Fern", 0, 0.0, 2.0, 10.0)]),
        crew_member("Basil", "cook", &[reading("Basil", 1, 90.0, 3.0, 90.0)]),
        crew_member("Moss", "lookout", &[reading("Moss", 2, 45.0, 1.0, 70.0)]),
    ]
}

pub fn shared(generator: ScriptedGenerator) -> (Arc<ScriptedGenerator>, Arc<dyn TextGenerator>) {
    let generator = Arc::new(generator);
    let dynamic: Arc<dyn TextGenerator> = generator.clone();
    (generator, dynamic)
}
