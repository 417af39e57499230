//! # Tree Scanner
//!
//! One depth-first pass over the materialized page-table tree that gathers
//! everything the frame allocator needs to serve a page fault:
//!
//! - the largest frame index in use (anything above it was never touched),
//! - the first table whose entries are all zero (reusable as-is),
//! - the resident page farthest from the faulting page (the eviction victim).
//!
//! The walk visits entries in ascending index order, so leaves are seen in
//! ascending page-number order. Ties are broken in favor of the first
//! candidate seen.

use vm_addresses::{FrameIndex, Geometry, PageNumber, PhysicalAddress};
use vm_physmem::PhysicalMemory;

/// The table entry that links a frame into the tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParentEdge {
    pub parent: FrameIndex,
    pub offset: u64,
}

impl ParentEdge {
    /// Physical address of the entry.
    #[inline]
    #[must_use]
    pub const fn address<G: Geometry>(self) -> PhysicalAddress {
        self.parent.entry::<G>(self.offset)
    }
}

/// A non-root table with no children.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TableSlot {
    pub frame: FrameIndex,
    pub edge: ParentEdge,
}

/// A resident data page scored against the faulting page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Victim {
    pub frame: FrameIndex,
    pub edge: ParentEdge,
    pub page: PageNumber,
    pub distance: u64,
}

/// Result of a [`scan`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanSummary {
    /// Largest frame index reachable from the root.
    pub max_used_frame: FrameIndex,
    /// First empty table in DFS order, excluding the root and the protected frame.
    pub empty_table: Option<TableSlot>,
    /// Resident page with the strictly largest cyclic distance to the target.
    pub victim: Option<Victim>,
}

impl ScanSummary {
    /// Distance of the current victim, `0` if there is none.
    #[inline]
    #[must_use]
    pub const fn best_distance(&self) -> u64 {
        match self.victim {
            Some(v) => v.distance,
            None => 0,
        }
    }
}

/// Walk the tree rooted at frame 0 on behalf of a fault on `target`.
///
/// `protected` is the table whose missing entry caused the fault. It is
/// never reported as an empty table or as a victim, even though it is
/// usually empty itself while a chain of tables is being built.
#[must_use]
pub fn scan<G, M>(memory: &M, target: PageNumber, protected: FrameIndex) -> ScanSummary
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    let scanner = Scanner {
        memory,
        target,
        protected,
    };
    let mut summary = ScanSummary::default();
    scanner.visit(
        Node {
            frame: FrameIndex::ROOT,
            depth: 0,
            edge: None,
            path: PageNumber::new(0),
        },
        &mut summary,
    );
    summary
}

struct Scanner<'a, M> {
    memory: &'a M,
    target: PageNumber,
    protected: FrameIndex,
}

#[derive(Copy, Clone)]
struct Node {
    frame: FrameIndex,
    depth: u32,
    /// `None` only for the root.
    edge: Option<ParentEdge>,
    /// Index bits consumed on the way down.
    path: PageNumber,
}

impl<G, M> Scanner<'_, M>
where
    G: Geometry,
    M: PhysicalMemory<Geometry = G>,
{
    fn visit(&self, node: Node, summary: &mut ScanSummary) {
        summary.max_used_frame = summary.max_used_frame.max(node.frame);

        if node.depth == G::TABLES_DEPTH {
            self.score_leaf(node, summary);
            return;
        }

        let mut empty = true;
        for offset in 0..G::PAGE_SIZE {
            let entry = self.memory.read(node.frame.entry::<G>(offset));
            let Some(child) = FrameIndex::from_entry(entry) else {
                continue;
            };
            empty = false;
            self.visit(
                Node {
                    frame: child,
                    depth: node.depth + 1,
                    edge: Some(ParentEdge {
                        parent: node.frame,
                        offset,
                    }),
                    path: node.path.child::<G>(offset),
                },
                summary,
            );
        }

        if !empty || node.frame == self.protected || summary.empty_table.is_some() {
            return;
        }
        if let Some(edge) = node.edge {
            summary.empty_table = Some(TableSlot {
                frame: node.frame,
                edge,
            });
        }
    }

    fn score_leaf(&self, node: Node, summary: &mut ScanSummary) {
        let Some(edge) = node.edge else {
            return;
        };
        if node.frame == self.protected {
            return;
        }
        let distance = self.target.cyclic_distance::<G>(node.path);
        if distance > summary.best_distance() {
            summary.victim = Some(Victim {
                frame: node.frame,
                edge,
                page: node.path,
                distance,
            });
        }
    }
}
