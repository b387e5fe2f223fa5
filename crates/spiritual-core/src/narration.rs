//! Priest Mode narration.
//!
//! A ritual is read aloud as a sequence of segments: an introduction, the
//! materials to gather (when there are any), then each step in order. The
//! client synthesizes one segment at a time and moves forward and back
//! through the script.

use serde::{Deserialize, Serialize};

use crate::model::Ritual;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Introduction,
    Materials,
    Step,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationSegment {
    /// Position in the script, starting at 0.
    pub index: usize,
    pub kind: SegmentKind,
    /// 1-based step number, only set for steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_number: Option<usize>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationScript {
    pub ritual_id: i64,
    pub title: String,
    pub total_steps: usize,
    pub segments: Vec<NarrationSegment>,
}

/// Build the narration script for a ritual.
pub fn narration_script(ritual: &Ritual) -> NarrationScript {
    let mut segments = Vec::with_capacity(ritual.steps.len() + 2);

    segments.push(NarrationSegment {
        index: 0,
        kind: SegmentKind::Introduction,
        step_number: None,
        text: format!("{}. {}", ritual.title.trim(), ritual.description.trim()),
    });

    let materials: Vec<&str> = ritual
        .materials
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect();
    if !materials.is_empty() {
        segments.push(NarrationSegment {
            index: segments.len(),
            kind: SegmentKind::Materials,
            step_number: None,
            text: format!("You will need: {}.", materials.join(", ")),
        });
    }

    for (i, step) in ritual.steps.iter().enumerate() {
        segments.push(NarrationSegment {
            index: segments.len(),
            kind: SegmentKind::Step,
            step_number: Some(i + 1),
            text: format!("Step {}. {}", i + 1, step.trim()),
        });
    }

    NarrationScript {
        ritual_id: ritual.id,
        title: ritual.title.clone(),
        total_steps: ritual.steps.len(),
        segments,
    }
}
