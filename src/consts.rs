/// Upper bound on the number of edits the Myers search may explore before
/// the whole changed region is reported as one coarse replacement.
pub const DEFAULT_MAX_DIFF_SIZE: usize = 5000;

/// Upper bound on the size of the table the LCS diff may allocate.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 4_000_000;

/// Node types which are matched as a whole before diffing.
pub const DEFAULT_FENCED_NODES: &[&str] = &["heading"];

/// Node types which delimit the root-level units an insertion is split into.
pub const DEFAULT_BOUNDARY_NODES: &[&str] = &[
    "heading",
    "paragraph",
    "ordered_list",
    "unordered_list",
    "box",
];

/// Attributes that never make two nodes differ.
pub const DEFAULT_IGNORED_ATTRIBUTES: &[&str] = &["blockId"];

/// Marks that never make two characters differ.
pub const DEFAULT_IGNORED_MARKS: &[&str] = &["comment"];

/// Changes closer than this many positions are simplified together.
pub const DEFAULT_MAX_SIMPLIFY_DISTANCE: usize = 30;

pub const MIN_UNCHANGED_FLOOR: usize = 2;
pub const MIN_UNCHANGED_CEILING: usize = 15;
pub const MIN_UNCHANGED_DIVISOR: usize = 10;
