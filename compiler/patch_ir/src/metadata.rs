//! `@directive;` headers at the top of a script.

use crate::SourceSpan;

#[derive(Clone, PartialEq, Debug)]
pub struct Directive {
    pub name: String,
    pub span: SourceSpan,
}

/// Directives in declaration order.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Metadata {
    directives: Vec<Directive>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata::default()
    }

    /// Record a directive. Returns `false`, keeping the first occurrence,
    /// if the name was already declared.
    pub fn add(&mut self, name: impl Into<String>, span: SourceSpan) -> bool {
        let name = name.into();
        if self.has(&name) {
            return false;
        }
        self.directives.push(Directive { name, span });
        true
    }

    pub fn has(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SourceFile, SourcePos};

    #[test]
    fn test_duplicates_keep_first() {
        let file = SourceFile::new("meta", "@a; @a;");
        let first = SourcePos::new(file.clone(), 1, 2).to_span();
        let second = SourcePos::new(file, 1, 6).to_span();

        let mut metadata = Metadata::new();
        assert!(metadata.add("a", first.clone()));
        assert!(!metadata.add("a", second));
        assert!(metadata.add("b", first.clone()));

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("a").map(|d| d.span.clone()), Some(first));
        let names: Vec<_> = metadata.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(!metadata.has("c"));
    }
}
