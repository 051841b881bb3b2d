//! Removal of resources the definition no longer describes.
//!
//! Only two levels are examined: top-level resources, and the direct
//! children of top-level resources that are kept. Deeper descendants are
//! left alone.

use super::changes::ChangeLog;
use crate::tree::{ResourceContainer, RestResource, RestService};
use crate::wadl::DescriptionDocument;

pub(crate) fn remove_obsolete(
    service: &mut RestService,
    document: &DescriptionDocument,
    changes: &mut ChangeLog,
) {
    let mut index = 0;
    while index < service.resources.len() {
        let resource = &service.resources[index];
        match expected_children(document, &resource.path) {
            None => {
                changes.deleted(&resource.name);
                service.delete_resource(index);
            }
            Some(expected) => {
                prune_children(&mut service.resources[index], &expected, changes);
                index += 1;
            }
        }
    }
}

/// Child paths a kept top-level resource may have, or `None` if the
/// resource itself is gone.
///
/// With several groups, a resource named after a group base is that group's
/// container and its children are the group's top-level resources.
fn expected_children<'d>(document: &'d DescriptionDocument, path: &str) -> Option<Vec<&'d str>> {
    if document.groups.len() > 1 {
        if let Some(group) = document.find_group(path) {
            return Some(
                group
                    .resources
                    .iter()
                    .filter_map(|r| r.path.as_deref())
                    .collect(),
            );
        }
    }
    document.find_resource(path).map(|descriptor| {
        descriptor
            .children
            .iter()
            .filter_map(|child| child.path.as_deref())
            .collect()
    })
}

fn prune_children(parent: &mut RestResource, expected: &[&str], changes: &mut ChangeLog) {
    let mut index = 0;
    while index < parent.children.len() {
        let child = &parent.children[index];
        if expected.contains(&child.path.as_str()) {
            index += 1;
        } else {
            changes.deleted_child(&parent.name, &child.name);
            parent.delete_resource(index);
        }
    }
}
