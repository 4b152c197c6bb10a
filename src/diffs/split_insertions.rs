use crate::{diffs::DiffRange, tokenizer::Token};

/// Splits a replacement whose inserted tokens hold several root-level
/// boundary nodes into one replacement followed by one pure insertion per
/// additional node.
///
/// A cut goes after a closing token that either closes a boundary node at
/// the top level of the inserted content, or closes a node opened before
/// the range when the next inserted token opens a boundary node.
pub fn split_insertions(range: DiffRange, tok_b: &[Token], boundary: &[String]) -> Vec<DiffRange> {
    if range.from_a == range.to_a || range.from_b == range.to_b {
        return vec![range];
    }

    let mut cuts = Vec::new();
    let mut open: Vec<bool> = Vec::new();
    for i in range.from_b..range.to_b - 1 {
        let cut = match &tok_b[i] {
            Token::Open { kind, .. } => {
                open.push(boundary.contains(kind));
                false
            }
            Token::Close(_) => match open.pop() {
                Some(is_boundary) => is_boundary && open.is_empty(),
                None => tok_b[i + 1].opens_any(boundary),
            },
            Token::Character { .. } | Token::Leaf { .. } | Token::ForcedMatch => false,
        };
        if cut {
            cuts.push(i + 1);
        }
    }

    if cuts.is_empty() {
        return vec![range];
    }

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut piece_start = range.from_b;
    for piece_end in cuts.into_iter().chain([range.to_b]) {
        let from_a = if pieces.is_empty() { range.from_a } else { range.to_a };
        pieces.push(DiffRange {
            from_a,
            to_a: range.to_a,
            from_b: piece_start,
            to_b: piece_end,
        });
        piece_start = piece_end;
    }
    pieces
}
