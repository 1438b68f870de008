use serde::{ser::SerializeMap, Serialize, Serializer};

// Keys that never make it into the sentence info
// "Index" only numbers the words, "" comes from lines like ":: snt1"
const SKIPPED_KEYS: [&str; 2] = ["", "Index"];

/// `key: value` pairs of the sentence info section, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceInfo {
    entries: Vec<(String, String)>,
}

impl SentenceInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// A repeated key keeps its first position and takes the new value.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn append(&mut self, key: &str, continuation: &str) {
        if let Some((_, value)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            value.push(' ');
            value.push_str(continuation);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for SentenceInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parses the lines between the meta info and the first graph section.
///
/// A line without ':' continues the value of the last key. Continuations of a
/// skipped key, or before any key, are dropped.
pub fn parse_sentence_info(section: &str) -> SentenceInfo {
    let mut info = SentenceInfo::new();

    let mut current_key: Option<String> = None;
    for line in section.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            current_key = Some(key.to_owned());

            if SKIPPED_KEYS.contains(&key) {
                continue;
            }

            info.insert(key.to_owned(), value.trim().to_owned());
        } else if !line.is_empty() {
            match &current_key {
                Some(key) if !SKIPPED_KEYS.contains(&key.as_str()) => info.append(key, line),
                _ => {}
            }
        }
    }

    info
}
