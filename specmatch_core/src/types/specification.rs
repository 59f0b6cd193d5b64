//! Top-level specification: a set of identified criteria/groups plus the
//! declaration-order list evaluated as the outcome's top level (§3, §5).

use super::criterion::{CompositeCriterion, GroupChild, QueryCriterion};
use super::error::SpecificationError;
use std::collections::HashMap;

/// A declared top-level entry: either a leaf query criterion or a composite
/// group, evaluated independently and in declaration order (§5).
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Query(QueryCriterion),
    Composite(CompositeCriterion),
}

impl Declaration {
    pub fn id(&self) -> &str {
        match self {
            Declaration::Query(q) => &q.id,
            Declaration::Composite(c) => &c.id,
        }
    }
}

/// A validated specification: every id unique and non-empty, every
/// reference resolvable, and the reference graph acyclic (§3, §7).
#[derive(Debug, Clone)]
pub struct Specification {
    id: String,
    declarations: Vec<Declaration>,
    by_id: HashMap<String, usize>,
}

impl Specification {
    /// Validate and build a specification from its id and declaration-order
    /// list of top-level entries.
    ///
    /// Rejects empty ids, duplicate ids, references to unknown ids, and
    /// cyclic references among composite groups — all synchronously at
    /// construction time, never discovered mid-evaluation.
    pub fn new(id: impl Into<String>, declarations: Vec<Declaration>) -> Result<Self, SpecificationError> {
        let mut by_id = HashMap::with_capacity(declarations.len());
        for (index, decl) in declarations.iter().enumerate() {
            if decl.id().is_empty() {
                return Err(SpecificationError::EmptyCriterionId);
            }
            if let Declaration::Query(q) = decl {
                check_query_is_mapping(q)?;
            }
            if by_id.insert(decl.id().to_string(), index).is_some() {
                return Err(SpecificationError::DuplicateId {
                    id: decl.id().to_string(),
                });
            }
        }

        validate_children(&declarations, &by_id)?;
        detect_cycles(&declarations, &by_id)?;

        Ok(Self {
            id: id.into(),
            declarations,
            by_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn get(&self, id: &str) -> Option<&Declaration> {
        self.by_id.get(id).map(|&i| &self.declarations[i])
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Enforce §3's "`query` is a Value of Mapping kind" invariant.
fn check_query_is_mapping(criterion: &QueryCriterion) -> Result<(), SpecificationError> {
    if criterion.query.as_mapping().is_none() {
        return Err(SpecificationError::QueryMustBeMapping {
            found: criterion.query.type_name(),
        });
    }
    Ok(())
}

fn validate_children(
    declarations: &[Declaration],
    by_id: &HashMap<String, usize>,
) -> Result<(), SpecificationError> {
    for decl in declarations {
        if let Declaration::Composite(group) = decl {
            check_group_children(group, by_id)?;
        }
    }
    Ok(())
}

fn check_group_children(
    group: &CompositeCriterion,
    by_id: &HashMap<String, usize>,
) -> Result<(), SpecificationError> {
    for child in &group.children {
        match child {
            GroupChild::Query(q) => {
                if q.id.is_empty() {
                    return Err(SpecificationError::EmptyCriterionId);
                }
                check_query_is_mapping(q)?;
            }
            GroupChild::Composite(nested) => {
                if nested.id.is_empty() {
                    return Err(SpecificationError::EmptyCriterionId);
                }
                check_group_children(nested, by_id)?;
            }
            GroupChild::Reference { r#ref } => {
                if !by_id.contains_key(r#ref) {
                    return Err(SpecificationError::DanglingReference {
                        group: group.id.clone(),
                        reference: r#ref.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// DFS-based cycle check over the reference graph induced by composite
/// groups' `Reference` children, run once at construction time.
fn detect_cycles(
    declarations: &[Declaration],
    by_id: &HashMap<String, usize>,
) -> Result<(), SpecificationError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut stack: Vec<String> = Vec::new();

    fn visit<'a>(
        id: &'a str,
        declarations: &'a [Declaration],
        by_id: &HashMap<String, usize>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<String>,
    ) -> Result<(), SpecificationError> {
        match marks.get(id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                stack.push(id.to_string());
                let cycle_start = stack.iter().position(|s| s == id).unwrap_or(0);
                let cycle = stack[cycle_start..].join(" -> ");
                return Err(SpecificationError::ReferenceCycle { cycle });
            }
            None => {}
        }

        marks.insert(id, Mark::Visiting);
        stack.push(id.to_string());

        if let Some(&index) = by_id.get(id) {
            if let Declaration::Composite(group) = &declarations[index] {
                visit_group(group, declarations, by_id, marks, stack)?;
            }
        }

        stack.pop();
        marks.insert(id, Mark::Done);
        Ok(())
    }

    fn visit_group<'a>(
        group: &'a CompositeCriterion,
        declarations: &'a [Declaration],
        by_id: &HashMap<String, usize>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<String>,
    ) -> Result<(), SpecificationError> {
        for child in &group.children {
            match child {
                GroupChild::Reference { r#ref } => {
                    visit(r#ref, declarations, by_id, marks, stack)?;
                }
                GroupChild::Composite(nested) => {
                    visit_group(nested, declarations, by_id, marks, stack)?;
                }
                GroupChild::Query(_) => {}
            }
        }
        Ok(())
    }

    for decl in declarations {
        if let Declaration::Composite(_) = decl {
            visit(decl.id(), declarations, by_id, &mut marks, &mut stack)?;
        }
    }

    Ok(())
}
