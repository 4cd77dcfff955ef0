//! Tree assembly.
//!
//! Nodes are created first, then wired with [`TreeBuilder::add_child`] (composites, in priority or
//! chain order) and [`TreeBuilder::set_child`] (preconditions). Wiring errors are reported as soon
//! as they happen; whole-tree checks run in [`TreeBuilder::build`].

use arbiter_core::{Blackboard, Status};

use crate::action::{Action, Guard};
use crate::error::{BuildError, Result};
use crate::node::{AbortMode, Composite, CompositeRole, Node, NodeId, NodeKind, Precondition};
use crate::tree::Tree;

struct Draft {
    name: String,
    parent: Option<NodeId>,
    kind: DraftKind,
}

enum DraftKind {
    Action(Box<dyn Action>),
    Composite {
        role: CompositeRole,
        children: Vec<NodeId>,
        reevaluate: Vec<bool>,
    },
    Precondition {
        child: Option<NodeId>,
        guard: Option<Guard>,
        abort: AbortMode,
    },
}

#[derive(Default)]
pub struct TreeBuilder {
    drafts: Vec<Draft>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&mut self, name: impl Into<String>, action: impl Action) -> NodeId {
        self.push(name.into(), DraftKind::Action(Box::new(action)))
    }

    pub fn selector(&mut self, name: impl Into<String>) -> NodeId {
        self.composite(name.into(), CompositeRole::Selector)
    }

    pub fn sequence(&mut self, name: impl Into<String>) -> NodeId {
        self.composite(name.into(), CompositeRole::Sequence)
    }

    /// Parallel that succeeds once `threshold` children succeeded. The threshold is checked
    /// against the final child count in [`TreeBuilder::build`]: it must be at least 1 and, when
    /// the parallel has children, at most their number. An empty parallel succeeds immediately.
    pub fn parallel(&mut self, name: impl Into<String>, threshold: usize) -> NodeId {
        self.composite(name.into(), CompositeRole::Parallel { threshold })
    }

    pub fn precondition(
        &mut self,
        name: impl Into<String>,
        abort: AbortMode,
        guard: impl Fn(&Blackboard) -> bool + 'static,
    ) -> NodeId {
        self.push(
            name.into(),
            DraftKind::Precondition {
                child: None,
                guard: Some(Box::new(guard)),
                abort,
            },
        )
    }

    /// Precondition without a guard. It never lets its child start.
    pub fn precondition_unguarded(&mut self, name: impl Into<String>, abort: AbortMode) -> NodeId {
        self.push(
            name.into(),
            DraftKind::Precondition {
                child: None,
                guard: None,
                abort,
            },
        )
    }

    /// Append `child` to a composite. Registration order is priority order for selectors.
    ///
    /// A child that already has a parent is reported as `DuplicateParent` before any cycle check.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_known(parent, child)?;
        if !matches!(self.drafts[parent.index()].kind, DraftKind::Composite { .. }) {
            return Err(BuildError::NotComposite { node: parent });
        }
        self.check_links(parent, child)?;

        let reevaluates = matches!(
            self.drafts[child.index()].kind,
            DraftKind::Precondition { abort, .. } if abort.aborts_lower_priority()
        );
        if let DraftKind::Composite {
            role,
            children,
            reevaluate,
        } = &mut self.drafts[parent.index()].kind
        {
            children.push(child);
            reevaluate.push(*role == CompositeRole::Selector && reevaluates);
        }

        self.drafts[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Attach the single child of a precondition.
    pub fn set_child(&mut self, decorator: NodeId, child: NodeId) -> Result<()> {
        self.check_known(decorator, child)?;
        match &self.drafts[decorator.index()].kind {
            DraftKind::Precondition { child: Some(_), .. } => {
                return Err(BuildError::ChildAlreadyAttached { node: decorator });
            }
            DraftKind::Precondition { child: None, .. } => {}
            _ => return Err(BuildError::NotDecorator { node: decorator }),
        }
        self.check_links(decorator, child)?;

        if let DraftKind::Precondition { child: slot, .. } =
            &mut self.drafts[decorator.index()].kind
        {
            *slot = Some(child);
        }

        self.drafts[child.index()].parent = Some(decorator);
        Ok(())
    }

    pub fn build(self, root: NodeId) -> Result<Tree> {
        let root_draft = self.drafts.get(root.index()).ok_or(BuildError::UnknownNode(root))?;
        if root_draft.parent.is_some() {
            return Err(BuildError::RootHasParent { node: root });
        }

        for (index, draft) in self.drafts.iter().enumerate() {
            let id = NodeId(index);
            if self.topmost(id) != root {
                return Err(BuildError::Detached { node: id });
            }
            match &draft.kind {
                DraftKind::Precondition { child: None, .. } => {
                    return Err(BuildError::MissingChild { node: id });
                }
                DraftKind::Composite {
                    role: CompositeRole::Parallel { threshold },
                    children,
                    ..
                } if *threshold == 0 || (!children.is_empty() && *threshold > children.len()) => {
                    return Err(BuildError::InvalidThreshold {
                        node: id,
                        threshold: *threshold,
                        children: children.len(),
                    });
                }
                _ => {}
            }
        }

        let mut nodes = Vec::with_capacity(self.drafts.len());
        for draft in self.drafts {
            let kind = match draft.kind {
                DraftKind::Action(action) => NodeKind::Action(action),
                DraftKind::Composite {
                    role,
                    children,
                    reevaluate,
                } => NodeKind::Composite(Composite::new(role, children, reevaluate)),
                DraftKind::Precondition {
                    child: Some(child),
                    guard,
                    abort,
                } => NodeKind::Precondition(Precondition {
                    child,
                    guard,
                    abort,
                }),
                DraftKind::Precondition { child: None, .. } => {
                    unreachable!("missing children rejected above")
                }
            };
            nodes.push(Node {
                name: draft.name,
                status: Status::Idle,
                parent: draft.parent,
                kind,
            });
        }

        tracing::debug!(nodes = nodes.len(), root = %root, "behavior tree assembled");
        Ok(Tree::from_parts(nodes, root))
    }

    fn push(&mut self, name: String, kind: DraftKind) -> NodeId {
        let id = NodeId(self.drafts.len());
        self.drafts.push(Draft {
            name,
            parent: None,
            kind,
        });
        id
    }

    fn composite(&mut self, name: String, role: CompositeRole) -> NodeId {
        self.push(
            name,
            DraftKind::Composite {
                role,
                children: Vec::new(),
                reevaluate: Vec::new(),
            },
        )
    }

    fn check_known(&self, parent: NodeId, child: NodeId) -> Result<()> {
        for id in [parent, child] {
            if id.index() >= self.drafts.len() {
                return Err(BuildError::UnknownNode(id));
            }
        }
        Ok(())
    }

    fn check_links(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.drafts[child.index()].parent.is_some() {
            return Err(BuildError::DuplicateParent { child });
        }

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(BuildError::Cycle { parent, child });
            }
            cursor = self.drafts[ancestor.index()].parent;
        }
        Ok(())
    }

    fn topmost(&self, id: NodeId) -> NodeId {
        let mut top = id;
        while let Some(parent) = self.drafts[top.index()].parent {
            top = parent;
        }
        top
    }
}
