//! Assembled tender document and its exports

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{self, TenderError};
use crate::types::section::Section;

/// A complete tender: one generated text per [`Section`], in section order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderDocument {
    contents: [String; Section::COUNT],
}

impl TenderDocument {
    /// Build a document from entries given in [`Section::ALL`] order
    ///
    /// Fails if a section is missing, repeated, out of order, or if extra
    /// entries follow the last section.
    pub fn from_entries<I>(entries: I) -> errors::Result<Self>
    where
        I: IntoIterator<Item = (Section, String)>,
    {
        let mut contents = Vec::with_capacity(Section::COUNT);

        for (position, (section, text)) in entries.into_iter().enumerate() {
            match Section::ALL.get(position) {
                Some(expected) if *expected == section => contents.push(text),
                Some(expected) => {
                    return Err(TenderError::IncompleteDocument(format!(
                        "expected {} at position {}, found {}",
                        expected,
                        position + 1,
                        section
                    )))
                }
                None => {
                    return Err(TenderError::IncompleteDocument(format!(
                        "unexpected extra section {}",
                        section
                    )))
                }
            }
        }

        let found = contents.len();
        let contents: [String; Section::COUNT] = contents.try_into().map_err(|_| {
            TenderError::IncompleteDocument(format!(
                "expected {} sections, found {}",
                Section::COUNT,
                found
            ))
        })?;

        Ok(Self { contents })
    }

    /// Generated text for a section
    pub fn get(&self, section: Section) -> &str {
        &self.contents[section.index()]
    }

    /// Sections with their text, in section order
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        Section::ALL
            .iter()
            .copied()
            .zip(self.contents.iter().map(String::as_str))
    }

    /// Flat text export: `# TITLE`, a blank line, the text, and a blank
    /// line before the next heading
    pub fn to_text(&self) -> String {
        self.iter()
            .map(|(section, content)| format!("# {}\n\n{}", section, content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Pretty-printed JSON object keyed by section title
    pub fn to_json(&self) -> errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON export back into a document
    pub fn from_json(json: &str) -> errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// File name stem for exports, e.g. `tender_road_upgrade`
pub fn export_file_stem(title: &str) -> String {
    format!("tender_{}", title.to_lowercase().replace(' ', "_"))
}

impl Serialize for TenderDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Section::COUNT))?;
        for (section, content) in self.iter() {
            map.serialize_entry(section.title(), content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TenderDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = TenderDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping every tender section title to its text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut sections = BTreeMap::new();
                while let Some((key, content)) = map.next_entry::<String, String>()? {
                    let section: Section = key.parse().map_err(<A::Error as de::Error>::custom)?;
                    if sections.insert(section, content).is_some() {
                        return Err(<A::Error as de::Error>::custom(format!(
                            "duplicate section {}",
                            section
                        )));
                    }
                }
                TenderDocument::from_entries(sections).map_err(<A::Error as de::Error>::custom)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
