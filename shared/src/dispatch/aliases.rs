/// Extra names under which raw device events are dispatched, so an
/// application can listen for `BrushBtn_Down` whether it runs on a desktop
/// (`Kbdb_Down`) or in a CAVE (`WandTrigger_Down`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventAliases {
    // (alias, raw event name), in registration order
    entries: Vec<(String, String)>,
}

impl EventAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<A: Into<String>, R: Into<String>>(&mut self, alias: A, raw_event_name: R) {
        self.entries.push((alias.into(), raw_event_name.into()));
    }

    /// All aliases of a raw event name, in registration order
    pub fn aliases_for<'a>(&'a self, raw_event_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, raw)| raw == raw_event_name)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<A: Into<String>, R: Into<String>> FromIterator<(A, R)> for EventAliases {
    fn from_iter<I: IntoIterator<Item = (A, R)>>(iter: I) -> Self {
        let mut aliases = EventAliases::new();
        for (alias, raw) in iter {
            aliases.add(alias, raw);
        }
        aliases
    }
}
