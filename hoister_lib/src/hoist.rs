//! The `hoist` module promotes anonymous struct types nested inside other types to named,
//! top-level type declarations.
//!
//! Given
//!
//! ```text
//! type Person struct {
//!     Address struct {
//!         Street string
//!     }
//! }
//! ```
//!
//! [`hoist_nested_structs`] appends `type Address struct { Street string }` to the file and
//! changes the type of `Person.Address` to `*Address`.
//!
//! The transformation works in two phases.  The collect phase queries the tree and turns each
//! match into an owned [`HoistCandidate`] that records the path of the struct and the name it
//! will receive.  The apply phase then changes the tree one candidate at a time, in collected
//! order.  Moving a struct to a new declaration moves every struct nested inside it as well, so
//! after each promotion the paths of the remaining candidates that lived inside the moved struct
//! are re-based onto its new location.

use crate::ast::{Decl, Expr, File, GenDecl};
use crate::error::HoisterError;
use crate::node::{NodeKind, NodeMut, NodeRef};
use crate::path::{NodePath, SlotStep};
use crate::replace::{replace_value_slot, Replacement};
use crate::search::{query, FoundNode};
use crate::traverser::Ancestry;
use std::collections::VecDeque;
use std::fmt;

/// Why a matched struct was left in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The struct already is the type of the named type declaration.
    AlreadyNamed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyNamed(name) => write!(f, "already the type of {name}"),
        }
    }
}

/// What the apply phase will do with a candidate.
#[derive(Debug)]
pub enum CandidatePlan {
    Promote(String),
    Skip(SkipReason),
    Fail(HoisterError),
}

/// An owned record of one matched struct, produced by the collect phase.
#[derive(Debug)]
pub struct HoistCandidate {
    /// The path of the struct at the time the candidate is processed.
    pub path: NodePath,
    pub plan: CandidatePlan,
}

/// A struct that was moved to a new top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Promotion {
    /// The name of the new type declaration.
    pub name: String,

    /// The path the struct had when it was promoted.
    pub source: NodePath,

    /// The index of the new declaration in the file's declaration list.
    pub declaration_index: usize,
}

/// A struct left in place on purpose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoistSkip {
    pub path: NodePath,
    pub reason: SkipReason,
}

/// A struct that could not be promoted.
#[derive(Debug)]
pub struct HoistFailure {
    pub path: NodePath,
    pub error: HoisterError,
}

/// A promoted name that is already used by another top-level type.  The declaration is still
/// added; resolving the clash is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionWarning {
    pub name: String,
    pub path: NodePath,
}

impl fmt::Display for CollisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "promoting struct at {} reuses existing type name {}",
            self.path, self.name
        )
    }
}

/// The terminal state of one matched struct.
#[derive(Debug)]
pub enum HoistOutcome {
    Promoted(Promotion),
    Skipped(HoistSkip),
    Failed(HoistFailure),
}

/// Result type returned from the hoisting transformation.
#[derive(Debug, Default)]
pub struct HoistReport {
    /// One outcome per matched struct, in processing order.
    pub outcomes: Vec<HoistOutcome>,

    /// Name collisions detected while promoting.
    pub collisions: Vec<CollisionWarning>,
}

impl HoistReport {
    /// Create a new, empty, report.
    pub fn new() -> HoistReport {
        HoistReport {
            outcomes: Vec::new(),
            collisions: Vec::new(),
        }
    }

    pub fn promoted(&self) -> Vec<&Promotion> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                HoistOutcome::Promoted(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> Vec<&HoistSkip> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                HoistOutcome::Skipped(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<&HoistFailure> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                HoistOutcome::Failed(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    /// Return true if the transformation left the file unchanged.
    pub fn is_noop(&self) -> bool {
        self.promoted().is_empty()
    }
}

impl fmt::Display for HoistReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} promoted, {} skipped, {} failed, {} name collisions",
            self.promoted().len(),
            self.skipped().len(),
            self.failures().len(),
            self.collisions.len()
        )
    }
}

/// Return true if `scope` is unset or one of the ancestors is the type declaration `scope`.
fn in_scope(ancestry: &Ancestry<'_>, scope: Option<&str>) -> bool {
    match scope {
        None => true,
        Some(name) => ancestry
            .iter()
            .any(|n| n.as_type_spec().map(|t| t.name.name == name).unwrap_or(false)),
    }
}

/// Derive the name for the struct in `found` from its enclosing field.  The nearest field
/// ancestor must hold the struct directly as its type and must have a name.
///
/// # Arguments
///
/// * `found` - The matched struct and its ancestors.
pub fn recover_name(found: &FoundNode<'_>) -> Result<String, HoisterError> {
    let nearest_field = found
        .ancestors
        .iter()
        .enumerate()
        .find_map(|(distance, n)| n.as_field().map(|f| (distance, f)));

    let (distance, field) = match nearest_field {
        Some(pair) => pair,
        None => return Err(HoisterError::NoFieldAncestor(found.path.to_string())),
    };

    let first_name = field.names.first().map(|i| i.name.clone());

    if distance != 0 {
        return Err(HoisterError::FieldNotDirectParent {
            path: found.path.to_string(),
            field: first_name.unwrap_or_else(|| String::from("<embedded>")),
        });
    }

    first_name.ok_or_else(|| HoisterError::UnnamedField(found.path.to_string()))
}

fn plan_for(found: &FoundNode<'_>) -> CandidatePlan {
    if let Some(spec) = found.parent().and_then(|p| p.as_type_spec()) {
        return CandidatePlan::Skip(SkipReason::AlreadyNamed(spec.name.name.clone()));
    }

    match recover_name(found) {
        Ok(name) => CandidatePlan::Promote(name),
        Err(e) => CandidatePlan::Fail(e),
    }
}

/// Run the collect phase: find every struct type below the root of `file` that lies within
/// `scope` and plan what to do with it.  The file is not changed.
///
/// # Arguments
///
/// * `file` - The file to search.
/// * `scope` - The name of a top-level type.  If present, only structs nested inside that type
/// are collected.
pub fn collect_candidates(file: &File, scope: Option<&str>) -> Vec<HoistCandidate> {
    let matches = query(NodeRef::from(file), |node, ancestry| {
        node.kind() == NodeKind::StructType && !ancestry.is_root() && in_scope(ancestry, scope)
    });

    matches
        .iter()
        .map(|found| HoistCandidate {
            path: found.path.clone(),
            plan: plan_for(found),
        })
        .collect()
}

/// Move the struct at `path` into a new declaration named `name` and put `*name` in its place.
/// Return the path of the struct in the new declaration and the index of the declaration.
fn promote(file: &mut File, path: &NodePath, name: &str) -> Result<(NodePath, usize), HoisterError> {
    let (parent_path, step) = match (path.parent(), path.last()) {
        (Some(parent_path), Some(step)) => (parent_path, *step),
        _ => return Err(HoisterError::NoFieldAncestor(path.to_string())),
    };

    let parent = parent_path.resolve_mut(NodeMut::from(&mut *file))?;
    let kind = parent.kind();
    if kind.value_slot() != Some(step.slot) || step.index.is_some() {
        return Err(HoisterError::SlotNotReplaceable {
            kind,
            slot: step.to_string(),
        });
    }

    let old = match replace_value_slot(parent, Expr::star(Expr::ident(name))) {
        Replacement::Replaced(old) => old,
        Replacement::Unchanged(_) => {
            return Err(HoisterError::SlotNotReplaceable {
                kind,
                slot: step.to_string(),
            })
        }
    };

    file.decls.push(Decl::GenDecl(GenDecl::type_decl(name, old)));
    let index = file.decls.len() - 1;
    let new_path = NodePath::from_steps(vec![
        SlotStep::at("decls", index),
        SlotStep::at("specs", 0),
        SlotStep::field("type"),
    ]);

    Ok((new_path, index))
}

/// Promote the anonymous struct types nested in `file` to top-level type declarations.
///
/// Each struct whose direct parent is a named field becomes `type <field name> struct {...}`,
/// appended to the declarations of the file, and the field type becomes a pointer to the new
/// type.  Structs that already are the type of a type declaration are skipped.  Structs whose
/// name cannot be derived are reported as failures and left in place; they do not stop the
/// other promotions.
///
/// # Arguments
///
/// * `file` - The file to transform in place.
/// * `scope` - The name of a top-level type.  If present and not empty, only structs nested
/// inside that type are promoted.
pub fn hoist_nested_structs(file: &mut File, scope: Option<&str>) -> HoistReport {
    let scope = scope.filter(|s| !s.is_empty());
    let mut pending: VecDeque<HoistCandidate> = collect_candidates(file, scope).into();
    let mut known_names: Vec<String> = file.type_specs().map(|t| t.name.name.clone()).collect();
    let mut report = HoistReport::new();

    while let Some(candidate) = pending.pop_front() {
        let HoistCandidate { path, plan } = candidate;

        let outcome = match plan {
            CandidatePlan::Skip(reason) => HoistOutcome::Skipped(HoistSkip { path, reason }),
            CandidatePlan::Fail(error) => {
                log::warn!("Unable to promote struct at {path}: {error}");
                HoistOutcome::Failed(HoistFailure { path, error })
            }
            CandidatePlan::Promote(name) => match promote(file, &path, &name) {
                Ok((new_path, declaration_index)) => {
                    for other in pending.iter_mut() {
                        if let Some(rebased) = other.path.rebase(&path, &new_path) {
                            other.path = rebased;
                        }
                    }

                    if known_names.contains(&name) {
                        let warning = CollisionWarning {
                            name: name.clone(),
                            path: path.clone(),
                        };
                        log::warn!("{warning}");
                        report.collisions.push(warning);
                    }
                    known_names.push(name.clone());

                    log::debug!("Promoted struct at {path} to type {name}");
                    HoistOutcome::Promoted(Promotion {
                        name,
                        source: path,
                        declaration_index,
                    })
                }
                Err(error) => {
                    log::warn!("Unable to promote struct at {path}: {error}");
                    HoistOutcome::Failed(HoistFailure { path, error })
                }
            },
        };

        report.outcomes.push(outcome);
    }

    log::info!("Struct hoisting finished: {report}");
    report
}
