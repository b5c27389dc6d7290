use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Kind of input widget a step asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    /// Split into day, month and year parts.
    Date,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Text => write!(f, "text"),
            InputKind::Date => write!(f, "date"),
        }
    }
}

/// Hint text shown in an empty input, one entry per input part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placeholder {
    Single(String),
    Parts(Vec<String>),
}

impl Placeholder {
    pub fn parts(&self) -> Vec<&str> {
        match self {
            Placeholder::Single(s) => vec![s.as_str()],
            Placeholder::Parts(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts().join(" / "))
    }
}

/// One field of the transcription checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideStep {
    /// Position in the guide. Assigned by [`Guide::new`], never read from config.
    #[serde(default, skip_deserializing)]
    pub index: usize,
    pub title: String,
    pub description: String,
    #[serde(default, alias = "examples")]
    pub example_refs: Vec<String>,
    pub placeholder: Placeholder,
    #[serde(alias = "type")]
    pub input_kind: InputKind,
    pub input_width: u32,
}

/// The ordered, immutable list of guide steps shared by every record.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    steps: Vec<GuideStep>,
}

impl Guide {
    /// Builds a guide, renumbering steps by position. An empty list is rejected
    /// since step navigation is modular over the step count.
    pub fn new(steps: Vec<GuideStep>) -> Result<Self, WorkflowError> {
        if steps.is_empty() {
            return Err(WorkflowError::EmptyGuide);
        }
        Ok(Self::numbered(steps))
    }

    fn numbered(mut steps: Vec<GuideStep>) -> Self {
        for (i, step) in steps.iter_mut().enumerate() {
            step.index = i;
        }
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GuideStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[GuideStep] {
        &self.steps
    }

    /// The nine-field insect label guide.
    pub fn insect_labels() -> Self {
        let text = |title: &str, description: &str, example: &str| GuideStep {
            index: 0,
            title: title.to_string(),
            description: description.to_string(),
            example_refs: vec![format!("nfn/ui/herbarium/examples/{example}")],
            placeholder: Placeholder::Single(title.to_string()),
            input_kind: InputKind::Text,
            input_width: 540,
        };

        let steps = vec![
            text("Locality", "Locality description.", "ex_state.png"),
            text(
                "County",
                "This is the county name found on the record.",
                "ex_county.png",
            ),
            text(
                "State",
                "This is the state name found on the record.",
                "ex_state.png",
            ),
            GuideStep {
                index: 0,
                title: "Date collection".into(),
                description: "Date specimen collected. Likely below the location.".into(),
                example_refs: vec!["nfn/ui/herbarium/examples/ex_recorded_date.png".into()],
                placeholder: Placeholder::Parts(vec![
                    "day".into(),
                    "month".into(),
                    "year".into(),
                ]),
                input_kind: InputKind::Date,
                input_width: 700,
            },
            text(
                "Collected by",
                "The name the person that collected this specimen.",
                "ex_recorded_by.png",
            ),
            text(
                "Host",
                "The scientific name of the plant or animal that the specimen was found on.",
                "ex_county.png",
            ),
            text(
                "Elevation",
                "The elevation where the specimen was found.",
                "ex_county.png",
            ),
            text(
                "Latitude",
                "The latitude where the specimen was found.",
                "ex_county.png",
            ),
            text(
                "Longitude",
                "The longitude where the specimen was found.",
                "ex_county.png",
            ),
        ];

        Self::numbered(steps)
    }
}

impl Default for Guide {
    fn default() -> Self {
        Self::insect_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insect_guide_has_nine_numbered_steps() {
        let guide = Guide::insect_labels();
        assert_eq!(guide.len(), 9);
        for (i, step) in guide.steps().iter().enumerate() {
            assert_eq!(step.index, i);
        }
        assert_eq!(guide.get(0).unwrap().title, "Locality");
        assert_eq!(guide.get(8).unwrap().title, "Longitude");
    }

    #[test]
    fn date_step_has_three_placeholder_parts() {
        let guide = Guide::insect_labels();
        let date = guide.get(3).unwrap();
        assert_eq!(date.input_kind, InputKind::Date);
        assert_eq!(date.input_width, 700);
        assert_eq!(date.placeholder.parts(), vec!["day", "month", "year"]);
        assert_eq!(date.placeholder.to_string(), "day / month / year");
    }

    #[test]
    fn empty_guide_is_rejected() {
        assert_eq!(Guide::new(Vec::new()), Err(WorkflowError::EmptyGuide));
    }

    #[test]
    fn indices_come_from_position() {
        let raw = r#"
            [[steps]]
            title = "Country"
            description = "Country of collection."
            placeholder = "Country"
            type = "text"
            input_width = 540

            [[steps]]
            title = "Date"
            description = "Collection date."
            examples = ["ex_date.png"]
            placeholder = ["day", "month", "year"]
            input_kind = "date"
            input_width = 700
        "#;

        #[derive(Deserialize)]
        struct Raw {
            steps: Vec<GuideStep>,
        }

        let parsed: Raw = toml::from_str(raw).unwrap();
        let guide = Guide::new(parsed.steps).unwrap();
        assert_eq!(guide.get(1).unwrap().index, 1);
        assert_eq!(guide.get(1).unwrap().example_refs, vec!["ex_date.png"]);
        assert_eq!(guide.get(0).unwrap().input_kind, InputKind::Text);
        assert!(guide.get(0).unwrap().example_refs.is_empty());
    }

    #[test]
    fn unknown_input_kind_fails_to_parse() {
        let raw = r#"
            title = "Colour"
            description = "Label colour."
            placeholder = "Colour"
            type = "colour-picker"
            input_width = 200
        "#;
        assert!(toml::from_str::<GuideStep>(raw).is_err());
    }
}
