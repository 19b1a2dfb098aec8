//! Port binding tables.
//!
//! A binding maps a block's internal port name to the external signal name it is
//! wired to. Ports without an explicit binding keep their internal name.

/// Internal port name -> external signal name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: Vec<(String, String)>,
}

impl BindingTable {
    /// Create an empty table (every port keeps its internal name).
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `internal` to `external`, replacing any earlier binding of the same port.
    pub fn bind(mut self, internal: impl Into<String>, external: impl Into<String>) -> Self {
        let internal = internal.into();
        let external = external.into();
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == internal) {
            entry.1 = external;
        } else {
            self.entries.push((internal, external));
        }
        self
    }

    /// External name for an internal port.
    pub fn resolve<'a>(&'a self, internal: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(i, _)| i == internal)
            .map_or(internal, |(_, e)| e.as_str())
    }

    /// Iterate over explicit `(internal, external)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(i, e)| (i.as_str(), e.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_ports_keep_their_name() {
        let table = BindingTable::new().bind("thrust_total", "thrust_max_total");
        assert_eq!(table.resolve("thrust_total"), "thrust_max_total");
        assert_eq!(table.resolve("drag"), "drag");
    }

    #[test]
    fn rebinding_replaces() {
        let table = BindingTable::new().bind("a", "x").bind("a", "y");
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("a"), "y");
    }
}
