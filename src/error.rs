use crate::breadcrumb::{BreadCrumb, Segment};

/// An instance key with no matching property declaration, or an ancestor
/// schema node that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Data on path: [$.{breadcrumb}] is inconsistent with provided schema.")]
pub struct InconsistentSchema {
    breadcrumb: BreadCrumb,
}

impl InconsistentSchema {
    pub fn create(breadcrumb: BreadCrumb) -> Self {
        Self { breadcrumb }
    }

    pub fn breadcrumb(&self) -> &BreadCrumb {
        &self.breadcrumb
    }

    /// Structured location of the divergence, root first.
    pub fn path(&self) -> Vec<Segment> {
        self.breadcrumb.build_chain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_renders_rooted_arrow_path() {
        let crumb = BreadCrumb::new()
            .add_crumb("role")
            .add_crumb("nested")
            .add_crumb("unexpected");
        let err = InconsistentSchema::create(crumb);

        assert_eq!(
            err.to_string(),
            "Data on path: [$.role->nested->unexpected] is inconsistent with provided schema."
        );
        assert_eq!(err.path().len(), 3);
    }
}
