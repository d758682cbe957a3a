/// Output column synthesized by a definition expression.
///
/// Not a schema object: it only exists so a raw-SQL view can still expose
/// typed columns to whatever validates against the view downstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleColumn {
    pub name: String,
    pub type_name: String,
    pub alias: String,
}

impl SimpleColumn {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            alias: alias.into(),
        }
    }

    /// Name the column is exposed under: the alias when set, the name otherwise.
    pub fn output_name(&self) -> &str {
        if self.alias.is_empty() {
            &self.name
        } else {
            &self.alias
        }
    }
}
