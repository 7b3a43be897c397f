/// Looks up a user-facing string in the plugin's locale.
pub trait TextLookup {
    fn text(&self, key: &str) -> Option<String>;
}

/// Locale without translations; every key reads as itself.
impl TextLookup for () {
    fn text(&self, _key: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub key: &'static str,
    pub label: String,
    pub kind: PropertyKind,
}

/// Editable properties shown in the host's settings panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyList {
    properties: Vec<PropertyDescriptor>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color picker labeled by `label_key`, untranslated keys shown verbatim.
    pub fn add_color(&mut self, key: &'static str, label_key: &str, locale: &dyn TextLookup) {
        let label = locale.text(label_key).unwrap_or_else(|| label_key.to_owned());
        self.properties.push(PropertyDescriptor {
            key,
            label,
            kind: PropertyKind::Color,
        });
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a PropertyDescriptor;
    type IntoIter = std::slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
