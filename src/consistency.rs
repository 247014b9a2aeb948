//! Consistency walk: every key present in the instance must be declared as a
//! property by the schema node at the same path.
//!
//! The walk is depth-first over the instance. At each container level, a
//! child container is explored before its own key is checked against the
//! parent schema, and the first inconsistency found aborts the walk.

use crate::breadcrumb::{BreadCrumb, Segment};
use crate::error::InconsistentSchema;
use crate::instance::Instance;
use crate::schema::SchemaNode;

/// Validate `instance` against `schema`, starting from the root path.
pub fn validate(instance: &Instance, schema: &SchemaNode) -> Result<(), InconsistentSchema> {
    validate_from(instance, schema, BreadCrumb::new())
}

/// Validate `instance` against `schema`, reporting paths relative to
/// `breadcrumb`.
///
/// Only an object-shaped root with at least one key is walked. Lists,
/// scalars and empty objects pass without inspection.
pub fn validate_from(
    instance: &Instance,
    schema: &SchemaNode,
    breadcrumb: BreadCrumb,
) -> Result<(), InconsistentSchema> {
    match instance {
        Instance::Object(entries) if !entries.is_empty() => {
            let walker = Walker { root: schema };
            walker.check_level(children(instance), &breadcrumb, &[])
        }
        _ => Ok(()),
    }
}

struct Walker<'s> {
    root: &'s SchemaNode,
}

impl<'s> Walker<'s> {
    fn check_level<'i>(
        &self,
        entries: impl Iterator<Item = (Segment, &'i Instance)>,
        breadcrumb: &BreadCrumb,
        parents: &[Segment],
    ) -> Result<(), InconsistentSchema> {
        tracing::trace!(path = %breadcrumb, "checking level");

        // Every key at this level resolves the same parent path, so the
        // lookup happens once, after the first key's subtree is explored.
        let mut level_schema: Option<&'s SchemaNode> = None;

        for (key, value) in entries {
            if value.is_container() {
                let child_parents = [parents, std::slice::from_ref(&key)].concat();
                self.check_level(
                    children(value),
                    &breadcrumb.add_crumb(key.clone()),
                    &child_parents,
                )?;
            }

            let current = match level_schema {
                Some(node) => node,
                None => {
                    let node = self.resolve(parents).ok_or_else(|| {
                        tracing::debug!(path = %breadcrumb, "ancestor schema missing");
                        InconsistentSchema::create(breadcrumb.clone())
                    })?;
                    level_schema = Some(node);
                    node
                }
            };

            if !current.is_object() {
                continue;
            }

            if current.property(&key.as_property_name()).is_none() {
                let offending = breadcrumb.add_crumb(key);
                tracing::debug!(path = %offending, "undeclared property");
                return Err(InconsistentSchema::create(offending));
            }
        }

        Ok(())
    }

    /// Follow `parents` through successive `properties` lookups.
    fn resolve(&self, parents: &[Segment]) -> Option<&'s SchemaNode> {
        parents
            .iter()
            .try_fold(self.root, |node, segment| node.property(&segment.as_property_name()))
    }
}

/// Keyed children of a container, in iteration order.
fn children(instance: &Instance) -> Box<dyn Iterator<Item = (Segment, &Instance)> + '_> {
    match instance {
        Instance::Object(entries) => Box::new(
            entries
                .iter()
                .map(|(key, child)| (Segment::Key(key.clone()), child)),
        ),
        Instance::List(items) => Box::new(
            items
                .iter()
                .enumerate()
                .map(|(index, child)| (Segment::Index(index), child)),
        ),
        Instance::Scalar(_) => Box::new(std::iter::empty()),
    }
}
