use std::fmt;
use std::sync::Arc;

/// One step of a path through an instance: an object property name or a
/// list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Key under which this segment is looked up in a schema `properties` map.
    pub fn as_property_name(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Segment::Key(key) => std::borrow::Cow::Borrowed(key),
            Segment::Index(index) => std::borrow::Cow::Owned(index.to_string()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

#[derive(Debug)]
struct Crumb {
    segment: Segment,
    parent: Option<Arc<Crumb>>,
}

/// Immutable path from the instance root to the current position.
///
/// Extending a breadcrumb shares the existing prefix and never touches it, so
/// sibling branches of a walk hold independent paths.
#[derive(Debug, Clone, Default)]
pub struct BreadCrumb {
    tail: Option<Arc<Crumb>>,
    len: usize,
}

impl BreadCrumb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new breadcrumb with `segment` appended.
    pub fn add_crumb(&self, segment: impl Into<Segment>) -> Self {
        Self {
            tail: Some(Arc::new(Crumb {
                segment: segment.into(),
                parent: self.tail.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Segments in root-to-leaf order.
    pub fn build_chain(&self) -> Vec<Segment> {
        let mut chain = Vec::with_capacity(self.len);
        let mut cursor = self.tail.as_deref();
        while let Some(crumb) = cursor {
            chain.push(crumb.segment.clone());
            cursor = crumb.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq for BreadCrumb {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.build_chain() == other.build_chain()
    }
}

impl Eq for BreadCrumb {}

/// Renders the chain joined with `->`, without the `$.` root marker.
impl fmt::Display for BreadCrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.build_chain().iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_breadcrumb_has_no_chain() {
        let crumb = BreadCrumb::new();
        assert!(crumb.is_empty());
        assert!(crumb.build_chain().is_empty());
        assert_eq!(crumb.to_string(), "");
    }

    #[test]
    fn add_crumb_leaves_original_untouched() {
        let root = BreadCrumb::new().add_crumb("role");
        let nested = root.add_crumb("nested");

        assert_eq!(root.build_chain(), vec![Segment::from("role")]);
        assert_eq!(
            nested.build_chain(),
            vec![Segment::from("role"), Segment::from("nested")]
        );
        assert_eq!(nested.len(), 2);
    }

    #[test]
    fn sibling_branches_do_not_share_segments() {
        let parent = BreadCrumb::new().add_crumb("role");
        let left = parent.add_crumb("permissions").add_crumb(0usize);
        let right = parent.add_crumb("nested");

        assert_eq!(left.to_string(), "role->permissions->0");
        assert_eq!(right.to_string(), "role->nested");
        assert_ne!(left, right);
    }

    #[test]
    fn index_segments_resolve_to_decimal_property_names() {
        assert_eq!(Segment::Index(12).as_property_name(), "12");
        assert_eq!(Segment::from("id").as_property_name(), "id");
    }
}
